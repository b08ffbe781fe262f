//! Pets and their medical records. Every route is scoped to the caller's
//! own pets; someone else's pet is indistinguishable from a missing one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::CurrentUser,
    error::ServerError,
    store::{require, require_dates, text, Document},
    AppState, Db,
};

/// Kind segment, required fields, date fields.
const RECORD_KINDS: [(&str, &[&str], &[&str]); 6] = [
    ("vaccinations", &["vaccineName", "vaccinationDate"], &["vaccinationDate", "nextDueDate"]),
    ("treatments", &["treatmentName", "treatmentDate"], &["treatmentDate"]),
    ("appointments", &["reason", "appointmentDate"], &["appointmentDate"]),
    ("medications", &["medicationName", "startDate", "dosage"], &["startDate", "endDate"]),
    ("allergies", &["allergen"], &["diagnosedDate"]),
    ("weights", &["weight", "measuredDate"], &["measuredDate"]),
];

fn record_kind(segment: &str) -> Result<(&'static [&'static str], &'static [&'static str]), ServerError> {
    RECORD_KINDS
        .iter()
        .find(|(kind, _, _)| *kind == segment)
        .map(|(_, required, dates)| (*required, *dates))
        .ok_or(ServerError::NotFound("Record type"))
}

fn owned_pet<'a>(db: &'a Db, user_id: &str, pet_id: &str) -> Result<&'a Document, ServerError> {
    db.pets
        .get(pet_id)
        .filter(|pet| text(pet, "owner") == Some(user_id))
        .ok_or(ServerError::NotFound("Pet"))
}

pub async fn list_pets(State(state): State<AppState>, CurrentUser(user): CurrentUser) -> Json<Vec<Document>> {
    let db = state.db.read().await;
    Json(
        db.pets
            .iter()
            .filter(|pet| text(pet, "owner") == Some(user.id.as_str()))
            .cloned()
            .collect(),
    )
}

pub async fn create_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    require(&input, &["name", "type"])?;
    input.insert("owner".to_string(), user.id.into());
    let pet = state.db.write().await.pets.insert(input);
    Ok((StatusCode::CREATED, Json(pet)))
}

pub async fn get_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Document>, ServerError> {
    let db = state.db.read().await;
    owned_pet(&db, &user.id, &id).cloned().map(Json)
}

pub async fn update_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<Document>,
) -> Result<Json<Document>, ServerError> {
    require(&input, &["name", "type"])?;
    let mut db = state.db.write().await;
    owned_pet(&db, &user.id, &id)?;
    db.pets.update(&id, input).map(Json).ok_or(ServerError::NotFound("Pet"))
}

/// Also drops the pet's medical records.
pub async fn delete_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut db = state.db.write().await;
    owned_pet(&db, &user.id, &id)?;
    db.pets.remove(&id);
    for records in db.medical.values_mut() {
        records.retain(|r| text(r, "pet") != Some(id.as_str()));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_records(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((pet_id, kind)): Path<(String, String)>,
) -> Result<Json<Vec<Document>>, ServerError> {
    record_kind(&kind)?;
    let db = state.db.read().await;
    owned_pet(&db, &user.id, &pet_id)?;
    let records = db
        .medical
        .get(&kind)
        .map(|records| {
            records
                .iter()
                .filter(|r| text(r, "pet") == Some(pet_id.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(records))
}

pub async fn create_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((pet_id, kind)): Path<(String, String)>,
    Json(mut input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    let (required, dates) = record_kind(&kind)?;
    require(&input, required)?;
    require_dates(&input, dates)?;
    let mut db = state.db.write().await;
    owned_pet(&db, &user.id, &pet_id)?;
    input.insert("pet".to_string(), pet_id.into());
    let record = db.medical.entry(kind).or_default().insert(input);
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((pet_id, kind, record_id)): Path<(String, String, String)>,
    Json(mut input): Json<Document>,
) -> Result<Json<Document>, ServerError> {
    let (required, dates) = record_kind(&kind)?;
    require(&input, required)?;
    require_dates(&input, dates)?;
    let mut db = state.db.write().await;
    owned_pet(&db, &user.id, &pet_id)?;
    input.remove("pet");
    let records = db.medical.get_mut(&kind).ok_or(ServerError::NotFound("Record"))?;
    if records.get(&record_id).and_then(|r| text(r, "pet")) != Some(pet_id.as_str()) {
        return Err(ServerError::NotFound("Record"));
    }
    records
        .update(&record_id, input)
        .map(Json)
        .ok_or(ServerError::NotFound("Record"))
}

pub async fn delete_record(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((pet_id, kind, record_id)): Path<(String, String, String)>,
) -> Result<StatusCode, ServerError> {
    record_kind(&kind)?;
    let mut db = state.db.write().await;
    owned_pet(&db, &user.id, &pet_id)?;
    let records = db.medical.get_mut(&kind).ok_or(ServerError::NotFound("Record"))?;
    if records.get(&record_id).and_then(|r| text(r, "pet")) != Some(pet_id.as_str()) {
        return Err(ServerError::NotFound("Record"));
    }
    records.remove(&record_id);
    Ok(StatusCode::NO_CONTENT)
}
