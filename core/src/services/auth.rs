use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::mapper::{self, BackendAuth, BackendUser};
use crate::services::one_or_none;
use crate::types::{AuthSession, LoginInput, RegisterInput, User};

/// Login, registration, and the current-user profile.
///
/// Successful login / register parses establish the session on the client's
/// `SessionProvider`, so subsequent requests carry the new token.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn build_login(&self, input: &LoginInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post("/auth/login", input)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<AuthSession, ApiError> {
        self.establish(response)
    }

    pub fn build_register(&self, input: &RegisterInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.api.build_post("/auth/register", input)
    }

    pub fn parse_register(&self, response: HttpResponse) -> Result<AuthSession, ApiError> {
        self.establish(response)
    }

    pub fn build_me(&self) -> HttpRequest {
        self.api.build_get("/auth/me")
    }

    /// Refreshes the cached profile on success. A 401 clears the session.
    pub fn parse_me(&self, response: HttpResponse) -> Option<User> {
        let result = self
            .api
            .parse_payload(response)
            .and_then(mapper::record::<BackendUser, User>);
        if let Err(ApiError::Unauthorized) = result {
            self.api.session().clear();
        }
        let user = one_or_none("/auth/me", result)?;
        self.api.session().refresh(&user);
        Some(user)
    }

    /// Local only; the backend keeps no session state.
    pub fn logout(&self) {
        self.api.session().clear();
    }

    fn establish(&self, response: HttpResponse) -> Result<AuthSession, ApiError> {
        let payload = self.api.parse_payload(response)?;
        let auth = mapper::record::<BackendAuth, AuthSession>(payload)?;
        self.api.session().establish(&auth.token, &auth.user);
        Ok(auth)
    }
}
