use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendDonationOrganization};
use crate::services::list_or_empty;
use crate::types::{DonationOrganization, DonationOrganizationInput};

const ORGANIZATIONS: &str = "/admin/donation-organizations";

/// Donation organizations. Writes need an admin token; the backend enforces
/// it and a non-admin gets `ApiError::Http { status: 403, .. }`.
#[derive(Debug, Clone, Copy)]
pub struct AdminService<'a> {
    api: &'a ApiClient,
}

impl<'a> AdminService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_list_organizations(&self) -> HttpRequest {
        self.api.build_get(ORGANIZATIONS)
    }

    pub fn parse_list_organizations(&self, response: HttpResponse) -> Vec<DonationOrganization> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::records::<BackendDonationOrganization, DonationOrganization>);
        list_or_empty(ORGANIZATIONS, result)
    }

    pub fn build_create_organization(
        &self,
        input: &DonationOrganizationInput,
    ) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post(ORGANIZATIONS, input)
    }

    pub fn parse_create_organization(&self, response: HttpResponse) -> Result<DonationOrganization, ApiError> {
        mapper::record::<BackendDonationOrganization, DonationOrganization>(self.api.parse_payload(response)?)
    }

    pub fn build_update_organization(
        &self,
        id: &str,
        input: &DonationOrganizationInput,
    ) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_put(&format!("{ORGANIZATIONS}/{id}"), input)
    }

    pub fn parse_update_organization(&self, response: HttpResponse) -> Result<DonationOrganization, ApiError> {
        mapper::record::<BackendDonationOrganization, DonationOrganization>(self.api.parse_payload(response)?)
    }

    pub fn build_delete_organization(&self, id: &str) -> HttpRequest {
        self.api.build_delete(&format!("{ORGANIZATIONS}/{id}"))
    }

    pub fn parse_delete_organization(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.api.parse_payload(response).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_create_surfaces_message() {
        let client = ApiClient::with_base_url("http://localhost:3000");
        let err = client
            .admin()
            .parse_create_organization(HttpResponse::new(403, r#"{"message":"Yalnızca yöneticiler"}"#))
            .unwrap_err();
        assert_eq!(err.user_message(), "Yalnızca yöneticiler");
    }

    #[test]
    fn list_drops_blank_optionals() {
        let client = ApiClient::with_base_url("http://localhost:3000");
        let body = r#"[{"_id":"o1","name":"Haytap","iban":"","url":"https://haytap.org"}]"#;
        let orgs = client.admin().parse_list_organizations(HttpResponse::new(200, body));
        assert_eq!(orgs[0].iban, None);
        assert_eq!(orgs[0].website.as_deref(), Some("https://haytap.org"));
    }
}
