//! Health records under `/pets/{id}/medical-records/{kind}`.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendHealthRecord};
use crate::services::list_or_empty;
use crate::types::{HealthRecord, HealthRecordInput, RecordKind};

#[derive(Debug, Clone, Copy)]
pub struct MedicalService<'a> {
    api: &'a ApiClient,
}

fn collection_path(pet_id: &str, kind: RecordKind) -> String {
    format!("/pets/{pet_id}/medical-records/{}", kind.segment())
}

fn record_path(pet_id: &str, kind: RecordKind, record_id: &str) -> String {
    format!("{}/{record_id}", collection_path(pet_id, kind))
}

impl<'a> MedicalService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list(&self, pet_id: &str, kind: RecordKind) -> HttpRequest {
        self.api.build_get(&collection_path(pet_id, kind))
    }

    /// Zero records is an empty list, never an error.
    pub fn parse_list(&self, pet_id: &str, kind: RecordKind, response: HttpResponse) -> Vec<HealthRecord> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(|payload| mapper::health_records(kind, pet_id, payload));
        list_or_empty(&collection_path(pet_id, kind), result)
    }

    pub fn build_list_vaccinations(&self, pet_id: &str) -> HttpRequest {
        self.build_list(pet_id, RecordKind::Vaccine)
    }

    pub fn parse_list_vaccinations(&self, pet_id: &str, response: HttpResponse) -> Vec<HealthRecord> {
        self.parse_list(pet_id, RecordKind::Vaccine, response)
    }

    pub fn build_create(&self, pet_id: &str, input: &HealthRecordInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post(&collection_path(pet_id, input.kind()), input)
    }

    pub fn parse_create(
        &self,
        pet_id: &str,
        kind: RecordKind,
        response: HttpResponse,
    ) -> Result<HealthRecord, ApiError> {
        self.parse_one(pet_id, kind, response)
    }

    pub fn build_update(
        &self,
        pet_id: &str,
        record_id: &str,
        input: &HealthRecordInput,
    ) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_put(&record_path(pet_id, input.kind(), record_id), input)
    }

    pub fn parse_update(
        &self,
        pet_id: &str,
        kind: RecordKind,
        response: HttpResponse,
    ) -> Result<HealthRecord, ApiError> {
        self.parse_one(pet_id, kind, response)
    }

    pub fn build_delete(&self, pet_id: &str, kind: RecordKind, record_id: &str) -> HttpRequest {
        self.api.build_delete(&record_path(pet_id, kind, record_id))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }

    fn parse_one(&self, pet_id: &str, kind: RecordKind, response: HttpResponse) -> Result<HealthRecord, ApiError> {
        let payload = self.api.parse_payload(response)?;
        let backend: BackendHealthRecord =
            serde_json::from_value(payload).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(mapper::health_record(kind, pet_id, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::types::health::UNSPECIFIED;
    use crate::types::{TreatmentInput, VaccinationInput};

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:3000")
    }

    #[test]
    fn vaccination_list_path() {
        let req = client().medical().build_list_vaccinations("p1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/pets/p1/medical-records/vaccinations");
    }

    #[test]
    fn zero_vaccinations_is_empty_list() {
        let records = client()
            .medical()
            .parse_list_vaccinations("p1", HttpResponse::new(200, "[]"));
        assert!(records.is_empty());
    }

    #[test]
    fn parse_list_reshapes_and_defaults() {
        let body = r#"[{"_id":"v1","vaccineName":"Karma","vaccinationDate":"2024-01-05"}]"#;
        let records = client()
            .medical()
            .parse_list_vaccinations("p1", HttpResponse::new(200, body));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Karma");
        assert_eq!(records[0].veterinarian, UNSPECIFIED);
        assert_eq!(records[0].pet_id, "p1");
    }

    #[test]
    fn create_goes_to_kind_endpoint() {
        let input = HealthRecordInput::Treatment(TreatmentInput {
            treatment_name: "Pire".to_string(),
            treatment_date: "2024-02-02".to_string(),
            diagnosis: None,
            veterinarian: None,
            cost: Some(120.0),
        });
        let req = client().medical().build_create("p1", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/pets/p1/medical-records/treatments");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["treatmentName"], "Pire");
        assert_eq!(body["cost"], 120.0);
    }

    #[test]
    fn invalid_vaccination_never_builds() {
        let input = HealthRecordInput::Vaccination(VaccinationInput {
            vaccine_name: String::new(),
            vaccination_date: "2024/01/01".to_string(),
            next_due_date: None,
            veterinarian: None,
            notes: None,
        });
        let err = client().medical().build_create("p1", &input).unwrap_err();
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.for_field("vaccine_name").is_some());
                assert!(errors.for_field("vaccination_date").is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failed_create_is_an_error_not_a_local_record() {
        let err = client()
            .medical()
            .parse_create("p1", RecordKind::Vaccine, HttpResponse::new(500, "down"))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn delete_path_includes_record() {
        let req = client().medical().build_delete("p1", RecordKind::Allergy, "a9");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/pets/p1/medical-records/allergies/a9");
    }
}
