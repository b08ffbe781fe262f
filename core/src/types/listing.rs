//! Adoption listings and lost-pet reports.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdoptionStatus {
    #[default]
    #[serde(rename = "Sahiplendirilecek")]
    Available,
    #[serde(rename = "Sahiplendirildi")]
    Adopted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LostPetStatus {
    #[default]
    #[serde(rename = "Kayıp")]
    Lost,
    #[serde(rename = "Bulundu")]
    Found,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdoptionListing {
    pub id: String,
    pub title: String,
    pub species: String,
    pub breed: String,
    pub age: Option<f64>,
    pub location: String,
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub status: AdoptionStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LostPet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub last_seen_location: String,
    pub last_seen_date: String,
    pub description: String,
    pub contact_phone: String,
    pub status: LostPetStatus,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionInput {
    pub title: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(default)]
    pub status: AdoptionStatus,
}

impl AdoptionInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("title", &self.title)
            .required("species", &self.species)
            .required("location", &self.location)
            .required("contact_name", &self.contact_name)
            .required("contact_phone", &self.contact_phone)
            .phone("contact_phone", &self.contact_phone)
            .non_negative("age", self.age);
        v.finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostPetInput {
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: String,
    pub last_seen_location: String,
    pub last_seen_date: String,
    #[serde(default)]
    pub description: String,
    pub contact_phone: String,
    #[serde(default)]
    pub status: LostPetStatus,
}

impl LostPetInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("name", &self.name)
            .required("species", &self.species)
            .required("last_seen_location", &self.last_seen_location)
            .required_date("last_seen_date", &self.last_seen_date)
            .required("contact_phone", &self.contact_phone)
            .phone("contact_phone", &self.contact_phone);
        v.finish()
    }
}

/// Partial update that only flips a lost-pet report's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostPetStatusUpdate {
    pub status: LostPetStatus,
}
