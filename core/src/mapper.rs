//! Backend JSON → client records.
//!
//! # Design
//! Each backend entity has one private `Backend*` DTO that accepts every
//! field name the backend is known to use for it (`_id` or `id`, `type` or
//! `species`, embedded author objects or bare ids) and a `From` impl that
//! produces the client record with documented defaults. Services never touch
//! raw field names; they go through `record` / `records` here.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ApiError;
use crate::types::health::{DEFAULT_WEIGHT_UNIT, UNSPECIFIED};
use crate::types::{
    AdoptionListing, AdoptionStatus, Answer, AuthSession, DirectoryEntry, DirectoryKind,
    DonationOrganization, Gender, HealthRecord, LostPet, LostPetStatus, Pet, Question, RecordKind,
    Role, User,
};
use crate::validation::parse_date;

/// Decode one backend entity and convert it to its client record.
pub fn record<B, T>(payload: Value) -> Result<T, ApiError>
where
    B: DeserializeOwned + Into<T>,
{
    serde_json::from_value::<B>(payload)
        .map(Into::into)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Decode a backend collection. `null` is an empty collection.
pub fn records<B, T>(payload: Value) -> Result<Vec<T>, ApiError>
where
    B: DeserializeOwned + Into<T>,
{
    match payload {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(record::<B, T>).collect(),
        other => Err(ApiError::Deserialization(format!(
            "expected a JSON array, got {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Take the calendar date out of `YYYY-MM-DD` or an ISO-8601 timestamp.
/// Anything else is kept verbatim.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(prefix) = raw.get(..10) {
        if parse_date(prefix).is_some() && (raw.len() == 10 || raw[10..].starts_with('T')) {
            return prefix.to_string();
        }
    }
    raw.to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            Some(t.to_string())
        }
    })
}

fn or_unspecified(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| UNSPECIFIED.to_string())
}

fn date_of(value: Option<String>) -> Option<String> {
    non_blank(value).map(|d| normalize_date(&d))
}

/// Numbers sometimes arrive as strings (`"4.5"`) from form-backed endpoints.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', ".").parse().ok(),
        _ => None,
    })
}

/// Counts that are negative, fractional or garbage are treated as absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Ids arrive as strings or numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "id must be a string or number, got {}",
            kind_name(&other)
        ))),
    }
}

/// Free text that is either a string or a list of strings.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
            Some(parts.join(", "))
        }
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Users and auth
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "first_name", alias = "name")]
    first_name: String,
    #[serde(default, alias = "last_name", alias = "surname")]
    last_name: String,
    #[serde(default)]
    role: Option<String>,
}

impl From<BackendUser> for User {
    fn from(b: BackendUser) -> Self {
        let role = match b.role.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("admin") => Role::Admin,
            _ => Role::User,
        };
        User {
            id: b.id,
            email: b.email,
            first_name: b.first_name,
            last_name: b.last_name,
            role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BackendAuth {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    user: BackendUser,
}

impl From<BackendAuth> for AuthSession {
    fn from(b: BackendAuth) -> Self {
        AuthSession {
            token: b.token,
            user: b.user.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reference {
    Id(#[serde(deserialize_with = "lenient_id")] String),
    Embedded(BackendUser),
}

impl Reference {
    fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Embedded(user) => &user.id,
        }
    }

    fn display_name(&self) -> Option<String> {
        match self {
            Reference::Id(_) => None,
            Reference::Embedded(user) => {
                let name = format!("{} {}", user.first_name.trim(), user.last_name.trim());
                non_blank(Some(name))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendPet {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, rename = "type", alias = "species")]
    species: Option<String>,
    #[serde(default)]
    breed: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    age: Option<f64>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default, alias = "owner", alias = "userId")]
    owner_id: Option<Reference>,
}

impl From<BackendPet> for Pet {
    fn from(b: BackendPet) -> Self {
        let gender = match b.gender.as_deref().map(|g| g.trim().to_lowercase()).as_deref() {
            Some("male" | "erkek") => Gender::Male,
            Some("female" | "dişi") => Gender::Female,
            _ => Gender::Unknown,
        };
        Pet {
            id: b.id,
            name: b.name,
            species: non_blank(b.species).unwrap_or_default(),
            breed: non_blank(b.breed).unwrap_or_default(),
            age: b.age,
            gender,
            owner_id: b.owner_id.map(|r| r.id().to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Health records
// ---------------------------------------------------------------------------

/// Union of every field name the medical-record endpoints use.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendHealthRecord {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(alias = "pet")]
    pet_id: Option<Reference>,

    vaccine_name: Option<String>,
    vaccination_date: Option<String>,
    next_due_date: Option<String>,

    treatment_name: Option<String>,
    treatment_date: Option<String>,
    diagnosis: Option<String>,

    reason: Option<String>,
    appointment_date: Option<String>,

    medication_name: Option<String>,
    start_date: Option<String>,
    dosage: Option<String>,
    frequency: Option<String>,

    allergen: Option<String>,
    diagnosed_date: Option<String>,
    severity: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    symptoms: Option<String>,

    #[serde(deserialize_with = "lenient_f64")]
    weight: Option<f64>,
    unit: Option<String>,
    measured_date: Option<String>,

    veterinarian: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    cost: Option<f64>,
    notes: Option<String>,

    // Generic names some records carry instead of the per-kind ones.
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
}

/// Flatten a backend record of `kind` into a client `HealthRecord`.
///
/// `pet_id` comes from the request path and is used when the backend body
/// does not name the pet.
pub fn health_record(kind: RecordKind, pet_id: &str, b: BackendHealthRecord) -> HealthRecord {
    let (name, date, description) = match kind {
        RecordKind::Vaccine => (b.vaccine_name, b.vaccination_date, b.notes),
        RecordKind::Treatment => (b.treatment_name, b.treatment_date, b.diagnosis.or(b.notes)),
        RecordKind::Appointment => (b.reason, b.appointment_date, b.notes),
        RecordKind::Medication => (b.medication_name, b.start_date, b.notes),
        RecordKind::Allergy => (b.allergen, b.diagnosed_date, b.notes),
        RecordKind::Weight => (None, b.measured_date, b.notes),
    };

    let title = non_blank(name)
        .or_else(|| non_blank(b.title))
        .unwrap_or_else(|| kind.label().to_string());
    let date = date_of(date).or_else(|| date_of(b.date)).unwrap_or_default();
    let description = non_blank(description)
        .or_else(|| non_blank(b.description))
        .unwrap_or_default();

    let is = |k: RecordKind| kind == k;

    HealthRecord {
        id: b.id,
        pet_id: non_blank(b.pet_id.map(|r| r.id().to_string())).unwrap_or_else(|| pet_id.to_string()),
        kind,
        title,
        description,
        date,
        veterinarian: or_unspecified(b.veterinarian),
        dosage: if is(RecordKind::Medication) { non_blank(b.dosage) } else { None },
        frequency: if is(RecordKind::Medication) { non_blank(b.frequency) } else { None },
        weight: if is(RecordKind::Weight) { b.weight } else { None },
        unit: if is(RecordKind::Weight) {
            Some(non_blank(b.unit).unwrap_or_else(|| DEFAULT_WEIGHT_UNIT.to_string()))
        } else {
            None
        },
        severity: if is(RecordKind::Allergy) { Some(or_unspecified(b.severity)) } else { None },
        symptoms: if is(RecordKind::Allergy) { non_blank(b.symptoms) } else { None },
        cost: if is(RecordKind::Treatment) || is(RecordKind::Appointment) { b.cost } else { None },
        next_due_date: if is(RecordKind::Vaccine) { date_of(b.next_due_date) } else { None },
    }
}

pub fn health_records(
    kind: RecordKind,
    pet_id: &str,
    payload: Value,
) -> Result<Vec<HealthRecord>, ApiError> {
    let raw: Vec<BackendHealthRecord> = match payload {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other).map_err(|e| ApiError::Deserialization(e.to_string()))?,
    };
    Ok(raw.into_iter().map(|b| health_record(kind, pet_id, b)).collect())
}

// ---------------------------------------------------------------------------
// Community
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendQuestion {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default, alias = "authorId", alias = "user", alias = "userId")]
    author: Option<Reference>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "body", alias = "description")]
    content: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    answers: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient_count")]
    answer_count: Option<u32>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<BackendQuestion> for Question {
    fn from(b: BackendQuestion) -> Self {
        let answer_count = b
            .answer_count
            .or_else(|| b.answers.as_ref().map(|a| u32::try_from(a.len()).unwrap_or(u32::MAX)))
            .unwrap_or(0);
        let (author_id, embedded_name) = author_parts(b.author.as_ref());
        Question {
            id: b.id,
            author_id,
            author_name: non_blank(b.author_name)
                .or(embedded_name)
                .unwrap_or_else(|| UNSPECIFIED.to_string()),
            title: b.title,
            content: b.content,
            tags: b.tags,
            answer_count,
            created_at: b.created_at.unwrap_or_default(),
        }
    }
}

fn author_parts(author: Option<&Reference>) -> (String, Option<String>) {
    match author {
        Some(r) => (r.id().to_string(), r.display_name()),
        None => (String::new(), None),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendAnswer {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default, alias = "question")]
    question_id: Option<String>,
    #[serde(default, alias = "authorId", alias = "user", alias = "userId")]
    author: Option<Reference>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default, alias = "body")]
    content: String,
    #[serde(default)]
    created_at: Option<String>,
}

/// Answers are nested under a question; the path supplies the question id
/// when the body leaves it out.
pub fn answer(question_id: &str, b: BackendAnswer) -> Answer {
    let (author_id, embedded_name) = author_parts(b.author.as_ref());
    Answer {
        id: b.id,
        question_id: non_blank(b.question_id).unwrap_or_else(|| question_id.to_string()),
        author_id,
        author_name: non_blank(b.author_name)
            .or(embedded_name)
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        content: b.content,
        created_at: b.created_at.unwrap_or_default(),
    }
}

pub fn answers(question_id: &str, payload: Value) -> Result<Vec<Answer>, ApiError> {
    let raw: Vec<BackendAnswer> = match payload {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other).map_err(|e| ApiError::Deserialization(e.to_string()))?,
    };
    Ok(raw.into_iter().map(|b| answer(question_id, b)).collect())
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendAdoption {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "type")]
    species: Option<String>,
    #[serde(default)]
    breed: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    age: Option<f64>,
    #[serde(default, alias = "city")]
    location: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    contact_name: Option<String>,
    #[serde(default, alias = "phone")]
    contact_phone: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<BackendAdoption> for AdoptionListing {
    fn from(b: BackendAdoption) -> Self {
        let status = match b.status.as_deref() {
            Some("Sahiplendirildi" | "adopted") => AdoptionStatus::Adopted,
            _ => AdoptionStatus::Available,
        };
        AdoptionListing {
            id: b.id,
            title: b.title,
            species: non_blank(b.species).unwrap_or_default(),
            breed: non_blank(b.breed).unwrap_or_default(),
            age: b.age,
            location: or_unspecified(b.location),
            description: b.description.unwrap_or_default(),
            contact_name: or_unspecified(b.contact_name),
            contact_phone: non_blank(b.contact_phone).unwrap_or_default(),
            status,
            created_at: b.created_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendLostPet {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default, alias = "petName")]
    name: String,
    #[serde(default, alias = "type")]
    species: Option<String>,
    #[serde(default)]
    breed: Option<String>,
    #[serde(default, alias = "location")]
    last_seen_location: Option<String>,
    #[serde(default)]
    last_seen_date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "phone")]
    contact_phone: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<BackendLostPet> for LostPet {
    fn from(b: BackendLostPet) -> Self {
        let status = match b.status.as_deref() {
            Some("Bulundu" | "found") => LostPetStatus::Found,
            _ => LostPetStatus::Lost,
        };
        LostPet {
            id: b.id,
            name: b.name,
            species: non_blank(b.species).unwrap_or_default(),
            breed: non_blank(b.breed).unwrap_or_default(),
            last_seen_location: or_unspecified(b.last_seen_location),
            last_seen_date: date_of(b.last_seen_date).unwrap_or_default(),
            description: b.description.unwrap_or_default(),
            contact_phone: non_blank(b.contact_phone).unwrap_or_default(),
            status,
            created_at: b.created_at.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Admin and directory
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendDonationOrganization {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    iban: Option<String>,
    #[serde(default, alias = "url")]
    website: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl From<BackendDonationOrganization> for DonationOrganization {
    fn from(b: BackendDonationOrganization) -> Self {
        DonationOrganization {
            id: b.id,
            name: b.name,
            description: b.description.unwrap_or_default(),
            iban: non_blank(b.iban),
            website: non_blank(b.website),
            phone: non_blank(b.phone),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendDirectoryEntry {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    rating: Option<f64>,
}

pub fn directory_entry(kind: DirectoryKind, b: BackendDirectoryEntry) -> DirectoryEntry {
    DirectoryEntry {
        id: b.id,
        name: b.name,
        kind,
        city: or_unspecified(b.city),
        address: or_unspecified(b.address),
        phone: non_blank(b.phone),
        rating: b.rating.filter(|r| (0.0..=5.0).contains(r)),
    }
}

pub fn directory_entries(kind: DirectoryKind, payload: Value) -> Result<Vec<DirectoryEntry>, ApiError> {
    let raw: Vec<BackendDirectoryEntry> = match payload {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other).map_err(|e| ApiError::Deserialization(e.to_string()))?,
    };
    Ok(raw.into_iter().map(|b| directory_entry(kind, b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vaccination(value: Value) -> HealthRecord {
        let b: BackendHealthRecord = serde_json::from_value(value).unwrap();
        health_record(RecordKind::Vaccine, "pet-1", b)
    }

    #[test]
    fn vaccination_fields_are_renamed() {
        let record = vaccination(json!({
            "_id": "v1",
            "vaccineName": "Karma",
            "vaccinationDate": "2024-03-01T00:00:00.000Z",
            "nextDueDate": "2025-03-01",
            "veterinarian": "Dr. Ayşe",
            "notes": "ilk doz"
        }));
        assert_eq!(record.id, "v1");
        assert_eq!(record.pet_id, "pet-1");
        assert_eq!(record.title, "Karma");
        assert_eq!(record.date, "2024-03-01");
        assert_eq!(record.next_due_date.as_deref(), Some("2025-03-01"));
        assert_eq!(record.veterinarian, "Dr. Ayşe");
        assert_eq!(record.description, "ilk doz");
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let record = vaccination(json!({"_id": "v2", "vaccineName": "Kuduz"}));
        assert_eq!(record.veterinarian, UNSPECIFIED);
        assert_eq!(record.description, "");
        assert_eq!(record.date, "");
        assert_eq!(record.next_due_date, None);
        assert_eq!(record.cost, None);
    }

    #[test]
    fn blank_veterinarian_is_unspecified() {
        let record = vaccination(json!({"_id": "v3", "veterinarian": "   "}));
        assert_eq!(record.veterinarian, UNSPECIFIED);
        assert_eq!(record.title, RecordKind::Vaccine.label());
    }

    #[test]
    fn weight_record_defaults_unit_and_title() {
        let b: BackendHealthRecord =
            serde_json::from_value(json!({"id": 7, "weight": "4,5", "measuredDate": "2024-01-10"})).unwrap();
        let record = health_record(RecordKind::Weight, "p", b);
        assert_eq!(record.id, "7");
        assert_eq!(record.weight, Some(4.5));
        assert_eq!(record.unit.as_deref(), Some("kg"));
        assert_eq!(record.title, "Kilo");
    }

    #[test]
    fn allergy_symptoms_list_is_joined() {
        let b: BackendHealthRecord = serde_json::from_value(json!({
            "_id": "a1",
            "allergen": "Tavuk",
            "symptoms": ["kaşıntı", "kusma"]
        }))
        .unwrap();
        let record = health_record(RecordKind::Allergy, "p", b);
        assert_eq!(record.symptoms.as_deref(), Some("kaşıntı, kusma"));
        assert_eq!(record.severity.as_deref(), Some(UNSPECIFIED));
    }

    #[test]
    fn kind_specific_fields_do_not_leak() {
        let b: BackendHealthRecord = serde_json::from_value(json!({
            "_id": "t1",
            "treatmentName": "Antibiyotik",
            "dosage": "2x1",
            "cost": 350
        }))
        .unwrap();
        let record = health_record(RecordKind::Treatment, "p", b);
        assert_eq!(record.cost, Some(350.0));
        assert_eq!(record.dosage, None);
    }

    #[test]
    fn null_collection_is_empty() {
        let list = health_records(RecordKind::Vaccine, "p", Value::Null).unwrap();
        assert!(list.is_empty());
        let pets = records::<BackendPet, Pet>(Value::Null).unwrap();
        assert!(pets.is_empty());
    }

    #[test]
    fn non_array_collection_is_rejected() {
        let err = records::<BackendPet, Pet>(json!({"id": "x"})).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn pet_accepts_type_and_embedded_owner() {
        let pet: Pet = record::<BackendPet, Pet>(json!({
            "_id": "p1",
            "name": "Boncuk",
            "type": "Köpek",
            "gender": "Dişi",
            "age": "3",
            "owner": {"_id": "u1", "email": "a@b.c"}
        }))
        .unwrap();
        assert_eq!(pet.species, "Köpek");
        assert_eq!(pet.gender, Gender::Female);
        assert_eq!(pet.age, Some(3.0));
        assert_eq!(pet.owner_id.as_deref(), Some("u1"));
    }

    #[test]
    fn question_author_name_from_embedded_user() {
        let q: Question = record::<BackendQuestion, Question>(json!({
            "_id": "q1",
            "user": {"_id": "u9", "firstName": "Deniz", "lastName": "Kaya"},
            "title": "Aşı takvimi?",
            "content": "...",
            "answers": [{}, {}]
        }))
        .unwrap();
        assert_eq!(q.author_id, "u9");
        assert_eq!(q.author_name, "Deniz Kaya");
        assert_eq!(q.answer_count, 2);
        assert!(q.tags.is_empty());
    }

    #[test]
    fn bad_answer_count_does_not_drop_the_list() {
        let questions: Vec<Question> = records::<BackendQuestion, Question>(json!([
            {"_id": "q1", "title": "A", "answerCount": -3, "answers": [{}]},
            {"_id": "q2", "title": "B", "answerCount": "7"},
            {"_id": "q3", "title": "C", "answerCount": 2.5}
        ]))
        .unwrap();
        let counts: Vec<u32> = questions.iter().map(|q| q.answer_count).collect();
        assert_eq!(counts, vec![1, 7, 0]);
    }

    #[test]
    fn lost_pet_status_and_date() {
        let lost: LostPet = record::<BackendLostPet, LostPet>(json!({
            "_id": "l1",
            "petName": "Pamuk",
            "status": "Bulundu",
            "lastSeenDate": "2024-06-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(lost.name, "Pamuk");
        assert_eq!(lost.status, LostPetStatus::Found);
        assert_eq!(lost.last_seen_date, "2024-06-01");
        assert_eq!(lost.last_seen_location, UNSPECIFIED);
    }

    #[test]
    fn normalize_date_keeps_unknown_formats() {
        assert_eq!(normalize_date("2024-06-01"), "2024-06-01");
        assert_eq!(normalize_date("2024-06-01T08:00:00Z"), "2024-06-01");
        assert_eq!(normalize_date("01.06.2024"), "01.06.2024");
    }
}
