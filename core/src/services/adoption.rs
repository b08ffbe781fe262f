use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendAdoption};
use crate::services::{list_or_empty, one_or_none};
use crate::types::{AdoptionInput, AdoptionListing};

const LISTINGS: &str = "/adoption-listings";

#[derive(Debug, Clone, Copy)]
pub struct AdoptionService<'a> {
    api: &'a ApiClient,
}

impl<'a> AdoptionService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.api.build_get(LISTINGS)
    }

    pub fn parse_list(&self, response: HttpResponse) -> Vec<AdoptionListing> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::records::<BackendAdoption, AdoptionListing>);
        list_or_empty(LISTINGS, result)
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.api.build_get(&format!("{LISTINGS}/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Option<AdoptionListing> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::record::<BackendAdoption, AdoptionListing>);
        one_or_none("/adoption-listings/{id}", result)
    }

    pub fn build_create(&self, input: &AdoptionInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post(LISTINGS, input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<AdoptionListing, ApiError> {
        mapper::record::<BackendAdoption, AdoptionListing>(self.api.parse_payload(response)?)
    }

    pub fn build_update(&self, id: &str, input: &AdoptionInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_put(&format!("{LISTINGS}/{id}"), input)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<AdoptionListing, ApiError> {
        mapper::record::<BackendAdoption, AdoptionListing>(self.api.parse_payload(response)?)
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        self.api.build_delete(&format!("{LISTINGS}/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AdoptionStatus;

    #[test]
    fn missing_phone_blocks_create() {
        let client = ApiClient::with_base_url("http://localhost:3000");
        let input = AdoptionInput {
            title: "Yuva arıyor".to_string(),
            species: "Köpek".to_string(),
            breed: String::new(),
            age: None,
            location: "Ankara".to_string(),
            description: String::new(),
            contact_name: "Ali".to_string(),
            contact_phone: String::new(),
            status: AdoptionStatus::Available,
        };
        match client.adoption().build_create(&input).unwrap_err() {
            ApiError::Validation(errors) => {
                assert_eq!(errors.for_field("contact_phone"), Some("contact_phone is required"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_list_maps_status() {
        let client = ApiClient::with_base_url("http://localhost:3000");
        let body = r#"{"data":[{"_id":"a1","title":"Minnoş","type":"Kedi","status":"Sahiplendirildi"}]}"#;
        let listings = client.adoption().parse_list(HttpResponse::new(200, body));
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].species, "Kedi");
        assert_eq!(listings[0].status, AdoptionStatus::Adopted);
    }
}
