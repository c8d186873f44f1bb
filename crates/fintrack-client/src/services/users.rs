use fintrack_types::{UpdateUserReq, User};

use super::WRITE_ERRORS;
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct UserService<'a> {
    client: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn update_request(user: &UpdateUserReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::put("/user").json(user)?.errors(WRITE_ERRORS))
    }

    pub async fn update(&self, user: &UpdateUserReq) -> Result<User, ApiError> {
        self.client.execute(Self::update_request(user)?).await
    }
}
