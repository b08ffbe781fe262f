use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendPet};
use crate::services::{list_or_empty, one_or_none};
use crate::types::{Pet, PetInput};

#[derive(Debug, Clone, Copy)]
pub struct PetService<'a> {
    api: &'a ApiClient,
}

impl<'a> PetService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// The signed-in user's pets.
    pub fn build_list(&self) -> HttpRequest {
        self.api.build_get("/pets")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Vec<Pet> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::records::<BackendPet, Pet>);
        list_or_empty("/pets", result)
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.api.build_get(&format!("/pets/{id}"))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Option<Pet> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::record::<BackendPet, Pet>);
        one_or_none("/pets/{id}", result)
    }

    pub fn build_create(&self, input: &PetInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post("/pets", input)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        mapper::record::<BackendPet, Pet>(self.api.parse_payload(response)?)
    }

    pub fn build_update(&self, id: &str, input: &PetInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_put(&format!("/pets/{id}"), input)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Pet, ApiError> {
        mapper::record::<BackendPet, Pet>(self.api.parse_payload(response)?)
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        self.api.build_delete(&format!("/pets/{id}"))
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }
}
