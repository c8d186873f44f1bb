use fintrack_types::AuthUser;

use super::AUTH_ERRORS;
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn user_request() -> RequestDescriptor {
        RequestDescriptor::get("/auth/user").errors(AUTH_ERRORS)
    }

    /// Profile of whoever the attached credential belongs to.
    pub async fn user(&self) -> Result<AuthUser, ApiError> {
        self.client.execute(Self::user_request()).await
    }
}
