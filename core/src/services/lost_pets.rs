use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendLostPet};
use crate::services::{list_or_empty, one_or_none};
use crate::types::{LostPet, LostPetInput, LostPetStatus, LostPetStatusUpdate};

const LOST_PETS: &str = "/lost-pets";

#[derive(Debug, Clone, Copy)]
pub struct LostPetService<'a> {
    api: &'a ApiClient,
}

impl<'a> LostPetService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.api.build_get(LOST_PETS)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Vec<LostPet> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::records::<BackendLostPet, LostPet>);
        list_or_empty(LOST_PETS, result)
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.api.build_get(&format!("{LOST_PETS}/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Option<LostPet> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::record::<BackendLostPet, LostPet>);
        one_or_none("/lost-pets/{id}", result)
    }

    /// Rejects a `last_seen_date` that is not `YYYY-MM-DD` before building.
    pub fn build_create(&self, input: &LostPetInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post(LOST_PETS, input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<LostPet, ApiError> {
        mapper::record::<BackendLostPet, LostPet>(self.api.parse_payload(response)?)
    }

    pub fn build_update(&self, id: &str, input: &LostPetInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_put(&format!("{LOST_PETS}/{id}"), input)
    }

    pub fn build_mark_found(&self, id: &str) -> Result<HttpRequest, ApiError> {
        self.api.build_put(
            &format!("{LOST_PETS}/{id}"),
            &LostPetStatusUpdate {
                status: LostPetStatus::Found,
            },
        )
    }

    /// Parses the response of `build_update` and `build_mark_found`.
    pub fn parse_update(&self, response: HttpResponse) -> Result<LostPet, ApiError> {
        mapper::record::<BackendLostPet, LostPet>(self.api.parse_payload(response)?)
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        self.api.build_delete(&format!("{LOST_PETS}/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:3000")
    }

    fn input() -> LostPetInput {
        LostPetInput {
            name: "Pamuk".to_string(),
            species: "Kedi".to_string(),
            breed: String::new(),
            last_seen_location: "Moda".to_string(),
            last_seen_date: "2024-06-01".to_string(),
            description: String::new(),
            contact_phone: "05321234567".to_string(),
            status: LostPetStatus::Lost,
        }
    }

    #[test]
    fn bad_last_seen_date_blocks_request() {
        let mut bad = input();
        bad.last_seen_date = "1 Haziran".to_string();
        match client().lost_pets().build_create(&bad).unwrap_err() {
            ApiError::Validation(errors) => {
                assert_eq!(errors.errors.len(), 1);
                assert_eq!(errors.errors[0].field, "last_seen_date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mark_found_sends_status_only() {
        let req = client().lost_pets().build_mark_found("l1").unwrap();
        assert_eq!(req.url, "http://localhost:3000/lost-pets/l1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "Bulundu"}));
    }

    #[test]
    fn parse_list_bad_json_is_empty() {
        let list = client().lost_pets().parse_list(HttpResponse::new(200, "not json"));
        assert!(list.is_empty());
    }
}
