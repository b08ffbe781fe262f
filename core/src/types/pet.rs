use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Option<f64>,
    pub gender: Gender,
    pub owner_id: Option<String>,
}

/// Payload for creating or replacing a pet. Serializes with backend names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetInput {
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    #[serde(default)]
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Gender,
}

impl PetInput {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("name", &self.name)
            .required("species", &self.species)
            .non_negative("age", self.age);
        v.finish()
    }
}
