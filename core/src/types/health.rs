//! Pet health records.
//!
//! The backend stores each kind of medical event under its own endpoint with
//! its own field names. Client-side they are flattened into one
//! optional-heavy `HealthRecord`; inputs stay a proper tagged union so each
//! kind only carries the fields it owns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationErrors, Validator};

/// Placeholder shown when the backend leaves a descriptive field out.
pub const UNSPECIFIED: &str = "Belirtilmemiş";

pub const DEFAULT_WEIGHT_UNIT: &str = "kg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Vaccine,
    Treatment,
    Appointment,
    Medication,
    Allergy,
    Weight,
}

impl RecordKind {
    pub const ALL: [RecordKind; 6] = [
        RecordKind::Vaccine,
        RecordKind::Treatment,
        RecordKind::Appointment,
        RecordKind::Medication,
        RecordKind::Allergy,
        RecordKind::Weight,
    ];

    /// Path segment under `/pets/{id}/medical-records/`.
    pub fn segment(self) -> &'static str {
        match self {
            RecordKind::Vaccine => "vaccinations",
            RecordKind::Treatment => "treatments",
            RecordKind::Appointment => "appointments",
            RecordKind::Medication => "medications",
            RecordKind::Allergy => "allergies",
            RecordKind::Weight => "weights",
        }
    }

    /// Title used when a record carries no name of its own.
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Vaccine => "Aşı",
            RecordKind::Treatment => "Tedavi",
            RecordKind::Appointment => "Randevu",
            RecordKind::Medication => "İlaç",
            RecordKind::Allergy => "Alerji",
            RecordKind::Weight => "Kilo",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    /// Accepts both the singular kind name and the endpoint segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vaccine" | "vaccination" | "vaccinations" => Ok(RecordKind::Vaccine),
            "treatment" | "treatments" => Ok(RecordKind::Treatment),
            "appointment" | "appointments" => Ok(RecordKind::Appointment),
            "medication" | "medications" => Ok(RecordKind::Medication),
            "allergy" | "allergies" => Ok(RecordKind::Allergy),
            "weight" | "weights" => Ok(RecordKind::Weight),
            other => Err(format!("unknown health record kind: {other}")),
        }
    }
}

/// One medical event, flattened across kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: String,
    pub pet_id: String,
    pub kind: RecordKind,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`, or empty when the backend sent none.
    pub date: String,
    pub veterinarian: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub weight: Option<f64>,
    pub unit: Option<String>,
    pub severity: Option<String>,
    pub symptoms: Option<String>,
    pub cost: Option<f64>,
    pub next_due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccinationInput {
    pub vaccine_name: String,
    pub vaccination_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentInput {
    pub treatment_name: String,
    pub treatment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentInput {
    pub reason: String,
    pub appointment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veterinarian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationInput {
    pub medication_name: String,
    pub start_date: String,
    pub dosage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyInput {
    pub allergen: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosed_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightInput {
    pub weight: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub measured_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_unit() -> String {
    DEFAULT_WEIGHT_UNIT.to_string()
}

/// Payload for creating or updating a health record.
///
/// Serializes to the kind's own backend shape; the kind itself travels in
/// the endpoint path, not the body.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum HealthRecordInput {
    Vaccination(VaccinationInput),
    Treatment(TreatmentInput),
    Appointment(AppointmentInput),
    Medication(MedicationInput),
    Allergy(AllergyInput),
    Weight(WeightInput),
}

impl HealthRecordInput {
    pub fn kind(&self) -> RecordKind {
        match self {
            HealthRecordInput::Vaccination(_) => RecordKind::Vaccine,
            HealthRecordInput::Treatment(_) => RecordKind::Treatment,
            HealthRecordInput::Appointment(_) => RecordKind::Appointment,
            HealthRecordInput::Medication(_) => RecordKind::Medication,
            HealthRecordInput::Allergy(_) => RecordKind::Allergy,
            HealthRecordInput::Weight(_) => RecordKind::Weight,
        }
    }

    /// Deserialize a backend-shaped body for a known kind.
    pub fn from_value(kind: RecordKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            RecordKind::Vaccine => HealthRecordInput::Vaccination(serde_json::from_value(value)?),
            RecordKind::Treatment => HealthRecordInput::Treatment(serde_json::from_value(value)?),
            RecordKind::Appointment => HealthRecordInput::Appointment(serde_json::from_value(value)?),
            RecordKind::Medication => HealthRecordInput::Medication(serde_json::from_value(value)?),
            RecordKind::Allergy => HealthRecordInput::Allergy(serde_json::from_value(value)?),
            RecordKind::Weight => HealthRecordInput::Weight(serde_json::from_value(value)?),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        match self {
            HealthRecordInput::Vaccination(i) => {
                v.required("vaccine_name", &i.vaccine_name)
                    .required_date("vaccination_date", &i.vaccination_date)
                    .optional_date("next_due_date", i.next_due_date.as_deref());
            }
            HealthRecordInput::Treatment(i) => {
                v.required("treatment_name", &i.treatment_name)
                    .required_date("treatment_date", &i.treatment_date)
                    .non_negative("cost", i.cost);
            }
            HealthRecordInput::Appointment(i) => {
                v.required("reason", &i.reason)
                    .required_date("appointment_date", &i.appointment_date)
                    .non_negative("cost", i.cost);
            }
            HealthRecordInput::Medication(i) => {
                v.required("medication_name", &i.medication_name)
                    .required("dosage", &i.dosage)
                    .required_date("start_date", &i.start_date)
                    .optional_date("end_date", i.end_date.as_deref());
            }
            HealthRecordInput::Allergy(i) => {
                v.required("allergen", &i.allergen)
                    .optional_date("diagnosed_date", i.diagnosed_date.as_deref());
            }
            HealthRecordInput::Weight(i) => {
                v.positive("weight", Some(i.weight))
                    .required("unit", &i.unit)
                    .required_date("measured_date", &i.measured_date);
            }
        }
        v.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_singular_and_segment() {
        assert_eq!("vaccine".parse::<RecordKind>().unwrap(), RecordKind::Vaccine);
        assert_eq!("allergies".parse::<RecordKind>().unwrap(), RecordKind::Allergy);
        assert!("surgery".parse::<RecordKind>().is_err());
    }

    #[test]
    fn vaccination_serializes_backend_names() {
        let input = HealthRecordInput::Vaccination(VaccinationInput {
            vaccine_name: "Kuduz".to_string(),
            vaccination_date: "2024-03-01".to_string(),
            next_due_date: None,
            veterinarian: Some("Dr. Ayşe".to_string()),
            notes: None,
        });
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["vaccineName"], "Kuduz");
        assert_eq!(body["vaccinationDate"], "2024-03-01");
        assert_eq!(body["veterinarian"], "Dr. Ayşe");
        assert!(body.get("nextDueDate").is_none());
    }

    #[test]
    fn weight_rejects_zero_and_bad_date() {
        let input = HealthRecordInput::Weight(WeightInput {
            weight: 0.0,
            unit: "kg".to_string(),
            measured_date: "01/02/2024".to_string(),
            notes: None,
        });
        let errors = input.validate().unwrap_err();
        assert!(errors.for_field("weight").is_some());
        assert!(errors.for_field("measured_date").is_some());
    }

    #[test]
    fn from_value_uses_kind_shape() {
        let value = serde_json::json!({"weight": 4.2, "measuredDate": "2024-05-05"});
        let input = HealthRecordInput::from_value(RecordKind::Weight, value).unwrap();
        match input {
            HealthRecordInput::Weight(w) => assert_eq!(w.unit, "kg"),
            other => panic!("unexpected input: {other:?}"),
        }
    }
}
