//! Client-side records and write payloads.
//!
//! # Design
//! Records (`Pet`, `HealthRecord`, ...) use the client's naming and are what
//! screens render; the `mapper` module produces them from backend JSON.
//! `*Input` payloads serialize with backend field names and carry a
//! `validate` method that runs before any request is built.

pub mod admin;
pub mod community;
pub mod health;
pub mod listing;
pub mod pet;
pub mod user;

pub use admin::{DirectoryEntry, DirectoryKind, DonationOrganization, DonationOrganizationInput};
pub use community::{Answer, AnswerInput, Question, QuestionInput};
pub use health::{
    AllergyInput, AppointmentInput, HealthRecord, HealthRecordInput, MedicationInput, RecordKind,
    TreatmentInput, VaccinationInput, WeightInput,
};
pub use listing::{
    AdoptionInput, AdoptionListing, AdoptionStatus, LostPet, LostPetInput, LostPetStatus,
    LostPetStatusUpdate,
};
pub use pet::{Gender, Pet, PetInput};
pub use user::{AuthSession, LoginInput, RegisterInput, Role, User};

/// Records with a backend-assigned id, used by list screens.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(
    Pet,
    HealthRecord,
    Question,
    Answer,
    AdoptionListing,
    LostPet,
    DonationOrganization,
    DirectoryEntry,
    User,
);
