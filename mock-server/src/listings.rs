//! Lost-pet reports and adoption listings. Both are public to read and
//! editable only by whoever posted them (or an admin).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    auth::{CurrentUser, UserRecord},
    error::ServerError,
    store::{require, require_dates, text, Collection, Document},
    AppState, Db,
};

struct Listing {
    label: &'static str,
    required: &'static [&'static str],
    dates: &'static [&'static str],
    /// First entry is the default for new listings.
    statuses: [&'static str; 2],
    collection: fn(&Db) -> &Collection,
    collection_mut: fn(&mut Db) -> &mut Collection,
}

static LOST_PET: Listing = Listing {
    label: "Lost pet report",
    required: &["name", "species", "lastSeenLocation", "lastSeenDate", "contactPhone"],
    dates: &["lastSeenDate"],
    statuses: ["Kayıp", "Bulundu"],
    collection: |db| &db.lost_pets,
    collection_mut: |db| &mut db.lost_pets,
};

static ADOPTION: Listing = Listing {
    label: "Adoption listing",
    required: &["title", "species", "location", "contactName", "contactPhone"],
    dates: &[],
    statuses: ["Sahiplendirilecek", "Sahiplendirildi"],
    collection: |db| &db.adoptions,
    collection_mut: |db| &mut db.adoptions,
};

impl Listing {
    fn check_status(&self, doc: &mut Document, creating: bool) -> Result<(), ServerError> {
        let valid = match doc.get("status") {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) if self.statuses.contains(&s.as_str()) => true,
            Some(_) => {
                return Err(ServerError::BadRequest(format!(
                    "status must be one of: {}",
                    self.statuses.join(", ")
                )))
            }
        };
        if !valid {
            if creating {
                doc.insert("status".to_string(), self.statuses[0].into());
            } else {
                doc.remove("status");
            }
        }
        Ok(())
    }

    async fn list(&self, state: &AppState) -> Json<Vec<Document>> {
        let db = state.db.read().await;
        Json((self.collection)(&db).iter().rev().cloned().collect())
    }

    async fn get(&self, state: &AppState, id: &str) -> Result<Json<Document>, ServerError> {
        let db = state.db.read().await;
        (self.collection)(&db)
            .get(id)
            .cloned()
            .map(Json)
            .ok_or(ServerError::NotFound(self.label))
    }

    async fn create(
        &self,
        state: &AppState,
        user: &UserRecord,
        mut input: Document,
    ) -> Result<(StatusCode, Json<Document>), ServerError> {
        require(&input, self.required)?;
        require_dates(&input, self.dates)?;
        self.check_status(&mut input, true)?;
        input.insert("owner".to_string(), user.id.clone().into());
        let mut db = state.db.write().await;
        let listing = (self.collection_mut)(&mut db).insert(input);
        Ok((StatusCode::CREATED, Json(listing)))
    }

    /// Partial: a body of just `{"status": ...}` is a valid update.
    async fn update(
        &self,
        state: &AppState,
        user: &UserRecord,
        id: &str,
        mut input: Document,
    ) -> Result<Json<Document>, ServerError> {
        require_dates(&input, self.dates)?;
        self.check_status(&mut input, false)?;
        let mut db = state.db.write().await;
        self.authorize(&db, user, id)?;
        (self.collection_mut)(&mut db)
            .update(id, input)
            .map(Json)
            .ok_or(ServerError::NotFound(self.label))
    }

    async fn delete(&self, state: &AppState, user: &UserRecord, id: &str) -> Result<StatusCode, ServerError> {
        let mut db = state.db.write().await;
        self.authorize(&db, user, id)?;
        (self.collection_mut)(&mut db).remove(id);
        Ok(StatusCode::NO_CONTENT)
    }

    fn authorize(&self, db: &Db, user: &UserRecord, id: &str) -> Result<(), ServerError> {
        let listing = (self.collection)(db).get(id).ok_or(ServerError::NotFound(self.label))?;
        if text(listing, "owner") == Some(user.id.as_str()) || user.is_admin() {
            Ok(())
        } else {
            Err(ServerError::Forbidden)
        }
    }
}

pub async fn list_lost_pets(State(state): State<AppState>) -> Json<Vec<Document>> {
    LOST_PET.list(&state).await
}

pub async fn get_lost_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ServerError> {
    LOST_PET.get(&state, &id).await
}

pub async fn create_lost_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    LOST_PET.create(&state, &user, input).await
}

pub async fn update_lost_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<Document>,
) -> Result<Json<Document>, ServerError> {
    LOST_PET.update(&state, &user, &id, input).await
}

pub async fn delete_lost_pet(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    LOST_PET.delete(&state, &user, &id).await
}

pub async fn list_adoptions(State(state): State<AppState>) -> Json<Vec<Document>> {
    ADOPTION.list(&state).await
}

pub async fn get_adoption(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ServerError> {
    ADOPTION.get(&state, &id).await
}

pub async fn create_adoption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    ADOPTION.create(&state, &user, input).await
}

pub async fn update_adoption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<Document>,
) -> Result<Json<Document>, ServerError> {
    ADOPTION.update(&state, &user, &id, input).await
}

pub async fn delete_adoption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    ADOPTION.delete(&state, &user, &id).await
}
