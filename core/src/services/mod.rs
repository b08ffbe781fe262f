//! Domain services, one per backend resource family.
//!
//! # Design
//! Every operation is a `build_*` / `parse_*` pair over the shared
//! `ApiClient`. The error contract is uniform across services:
//! - reads never fail: list parses return an empty `Vec` and single-item
//!   parses return `None` on any error, logging it at `warn`;
//! - writes validate their input before building a request and return
//!   `Result<T, ApiError>` from both halves.

pub mod admin;
pub mod adoption;
pub mod auth;
pub mod community;
pub mod directory;
pub mod lost_pets;
pub mod medical;
pub mod pets;

pub use admin::AdminService;
pub use adoption::AdoptionService;
pub use auth::AuthService;
pub use community::CommunityService;
pub use directory::DirectoryService;
pub use lost_pets::LostPetService;
pub use medical::MedicalService;
pub use pets::PetService;

use tracing::warn;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn pets(&self) -> PetService<'_> {
        PetService::new(self)
    }

    pub fn medical(&self) -> MedicalService<'_> {
        MedicalService::new(self)
    }

    pub fn community(&self) -> CommunityService<'_> {
        CommunityService::new(self)
    }

    pub fn lost_pets(&self) -> LostPetService<'_> {
        LostPetService::new(self)
    }

    pub fn adoption(&self) -> AdoptionService<'_> {
        AdoptionService::new(self)
    }

    pub fn admin(&self) -> AdminService<'_> {
        AdminService::new(self)
    }

    pub fn directory(&self) -> DirectoryService<'_> {
        DirectoryService::new(self)
    }
}

/// Read-path policy for collections.
pub(crate) fn list_or_empty<T>(endpoint: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(endpoint, error = %e, "list read failed, showing empty list");
        Vec::new()
    })
}

/// Read-path policy for single records.
pub(crate) fn one_or_none<T>(endpoint: &str, result: Result<T, ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ApiError::NotFound) => None,
        Err(e) => {
            warn!(endpoint, error = %e, "read failed");
            None
        }
    }
}
