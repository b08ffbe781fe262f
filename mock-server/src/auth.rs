use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::{error::ServerError, AppState};

pub const ADMIN_EMAIL: &str = "admin@pati.app";
pub const ADMIN_PASSWORD: &str = "admin123";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl UserRecord {
    pub fn new(email: &str, password: &str, first_name: &str, last_name: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.trim().to_lowercase(),
            password: password.to_string(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role: role.to_string(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    /// Embedded author object stored on questions and answers.
    pub fn author(&self) -> Value {
        json!({
            "_id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
        })
    }
}

/// The user behind the request's bearer token.
pub struct CurrentUser(pub UserRecord);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ServerError::Unauthorized)?;
        let db = state.db.read().await;
        db.tokens
            .get(token.trim())
            .and_then(|id| db.users.get(id))
            .cloned()
            .map(CurrentUser)
            .ok_or(ServerError::Unauthorized)
    }
}

/// `CurrentUser` with the admin role.
pub struct AdminUser(pub UserRecord);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            Err(ServerError::Forbidden)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRecord,
}

async fn issue_token(state: &AppState, user: UserRecord) -> AuthResponse {
    let token = Uuid::new_v4().simple().to_string();
    state
        .db
        .write()
        .await
        .tokens
        .insert(token.clone(), user.id.clone());
    AuthResponse { token, user }
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ServerError> {
    let email = body.email.trim().to_lowercase();
    let user = {
        let db = state.db.read().await;
        db.users
            .values()
            .find(|u| u.email == email && u.password == body.password)
            .cloned()
            .ok_or(ServerError::InvalidCredentials)?
    };
    info!(user = %user.id, "login");
    Ok(Json(issue_token(&state, user).await))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    for (field, value) in [
        ("email", &body.email),
        ("password", &body.password),
        ("firstName", &body.first_name),
        ("lastName", &body.last_name),
    ] {
        if value.trim().is_empty() {
            return Err(ServerError::required(field));
        }
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let user = UserRecord::new(&body.email, &body.password, &body.first_name, &body.last_name, "user");
    {
        let mut db = state.db.write().await;
        if db.users.values().any(|u| u.email == user.email) {
            return Err(ServerError::Conflict("Email is already registered".to_string()));
        }
        db.users.insert(user.id.clone(), user.clone());
    }
    info!(user = %user.id, "registered");
    Ok((StatusCode::CREATED, Json(issue_token(&state, user).await)))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserRecord> {
    Json(user)
}
