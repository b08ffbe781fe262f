//! Donation organizations (admin-managed) and the read-only directory.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::AdminUser,
    error::ServerError,
    store::{require, text, Collection, Document},
    AppState,
};

pub async fn list_organizations(State(state): State<AppState>) -> Json<Vec<Document>> {
    let db = state.db.read().await;
    Json(db.organizations.iter().cloned().collect())
}

pub async fn create_organization(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Json(input): Json<Document>,
) -> Result<(StatusCode, Json<Document>), ServerError> {
    require(&input, &["name"])?;
    let organization = state.db.write().await.organizations.insert(input);
    Ok((StatusCode::CREATED, Json(organization)))
}

pub async fn update_organization(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(input): Json<Document>,
) -> Result<Json<Document>, ServerError> {
    require(&input, &["name"])?;
    let mut db = state.db.write().await;
    db.organizations
        .update(&id, input)
        .map(Json)
        .ok_or(ServerError::NotFound("Organization"))
}

pub async fn delete_organization(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let mut db = state.db.write().await;
    db.organizations
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(ServerError::NotFound("Organization"))
}

#[derive(Debug, Default, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// Lowercase without the dot `İ` leaves behind, so `izmir` matches `İzmir`.
fn fold(city: &str) -> String {
    city.trim().to_lowercase().replace('\u{307}', "")
}

/// `{"data": [...]}`, optionally narrowed to one city (case-insensitive).
fn directory(entries: &Collection, query: &CityQuery) -> Json<Value> {
    let city = query.city.as_deref().map(fold).filter(|c| !c.is_empty());
    let data: Vec<&Document> = entries
        .iter()
        .filter(|e| match &city {
            Some(city) => text(e, "city").is_some_and(|c| fold(c) == *city),
            None => true,
        })
        .collect();
    Json(json!({ "data": data }))
}

pub async fn list_veterinarians(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Json<Value> {
    let db = state.db.read().await;
    directory(&db.veterinarians, &query)
}

pub async fn list_petshops(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Json<Value> {
    let db = state.db.read().await;
    directory(&db.petshops, &query)
}
