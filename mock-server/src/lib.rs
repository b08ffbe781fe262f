//! In-memory stand-in for the Pati backend.
//!
//! Serves every endpoint family the client core talks to, with the backend's
//! field names (`_id`, camelCase, embedded authors). State lives for the
//! lifetime of the router; nothing is persisted.

pub mod admin;
pub mod auth;
pub mod community;
pub mod error;
pub mod listings;
pub mod pets;
pub mod store;

use std::{collections::HashMap, sync::Arc};

use axum::{
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use auth::{UserRecord, ADMIN_EMAIL, ADMIN_PASSWORD};
pub use error::ServerError;
pub use store::{Collection, Document};

#[derive(Debug, Default)]
pub struct Db {
    pub users: HashMap<String, UserRecord>,
    /// Bearer token -> user id.
    pub tokens: HashMap<String, String>,
    pub pets: Collection,
    /// Keyed by kind segment (`vaccinations`, `weights`, ...).
    pub medical: HashMap<String, Collection>,
    pub questions: Collection,
    pub answers: Collection,
    pub lost_pets: Collection,
    pub adoptions: Collection,
    pub organizations: Collection,
    pub veterinarians: Collection,
    pub petshops: Collection,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub db: Arc<RwLock<Db>>,
}

impl AppState {
    /// An admin account plus a small clinic and shop directory.
    pub fn seeded() -> Self {
        let mut db = Db::default();
        let admin = UserRecord::new(ADMIN_EMAIL, ADMIN_PASSWORD, "Pati", "Yönetici", "admin");
        db.users.insert(admin.id.clone(), admin);

        for (name, city, address, phone, rating) in [
            ("Pati Veteriner Kliniği", "İstanbul", "Moda Cd. 12, Kadıköy", "0216 555 10 10", json!(4.7)),
            ("Can Dostlar Hayvan Hastanesi", "Ankara", "Tunalı Hilmi Cd. 40", "0312 555 20 20", json!(4.2)),
            ("Minik Patiler", "İzmir", "Kordon Boyu 3", "0232 555 30 30", json!(null)),
        ] {
            db.veterinarians
                .insert(directory_doc(name, city, address, phone, rating));
        }
        for (name, city, address, phone, rating) in [
            ("Mama Dünyası", "İstanbul", "Bağdat Cd. 210", "0216 555 40 40", json!(4.5)),
            ("Akvaryum ve Kuş Evi", "İzmir", "Alsancak 1453 Sk. 8", "0232 555 50 50", json!(3.9)),
        ] {
            db.petshops
                .insert(directory_doc(name, city, address, phone, rating));
        }

        Self {
            db: Arc::new(RwLock::new(db)),
        }
    }
}

fn directory_doc(name: &str, city: &str, address: &str, phone: &str, rating: Value) -> Document {
    let mut doc = Document::new();
    doc.insert("name".to_string(), name.into());
    doc.insert("city".to_string(), city.into());
    doc.insert("address".to_string(), address.into());
    doc.insert("phone".to_string(), phone.into());
    doc.insert("rating".to_string(), rating);
    doc
}

pub fn app() -> Router {
    router(AppState::seeded())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        .route("/pets", get(pets::list_pets).post(pets::create_pet))
        .route(
            "/pets/{id}",
            get(pets::get_pet).put(pets::update_pet).delete(pets::delete_pet),
        )
        .route(
            "/pets/{id}/medical-records/{kind}",
            get(pets::list_records).post(pets::create_record),
        )
        .route(
            "/pets/{id}/medical-records/{kind}/{record_id}",
            put(pets::update_record).delete(pets::delete_record),
        )
        .route(
            "/community/questions",
            get(community::list_questions).post(community::create_question),
        )
        .route(
            "/community/questions/{id}",
            get(community::get_question).delete(community::delete_question),
        )
        .route(
            "/community/questions/{id}/answers",
            get(community::list_answers).post(community::create_answer),
        )
        .route(
            "/lost-pets",
            get(listings::list_lost_pets).post(listings::create_lost_pet),
        )
        .route(
            "/lost-pets/{id}",
            get(listings::get_lost_pet)
                .put(listings::update_lost_pet)
                .delete(listings::delete_lost_pet),
        )
        .route(
            "/adoption-listings",
            get(listings::list_adoptions).post(listings::create_adoption),
        )
        .route(
            "/adoption-listings/{id}",
            get(listings::get_adoption)
                .put(listings::update_adoption)
                .delete(listings::delete_adoption),
        )
        .route(
            "/admin/donation-organizations",
            get(admin::list_organizations).post(admin::create_organization),
        )
        .route(
            "/admin/donation-organizations/{id}",
            put(admin::update_organization).delete(admin::delete_organization),
        )
        .route("/directory/veterinarians", get(admin::list_veterinarians))
        .route("/directory/petshops", get(admin::list_petshops))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
