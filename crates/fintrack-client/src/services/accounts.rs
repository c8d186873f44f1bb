use fintrack_types::{Account, CreateAccountReq, UpdateAccountReq};

use super::{AUTH_ERRORS, LOOKUP_ERRORS, WRITE_ERRORS};
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct AccountService<'a> {
    client: &'a ApiClient,
}

impl<'a> AccountService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request() -> RequestDescriptor {
        RequestDescriptor::get("/api/v1/account").errors(AUTH_ERRORS)
    }

    pub fn get_request(account_id: &str) -> RequestDescriptor {
        RequestDescriptor::get("/api/v1/account/{account_id}")
            .path_param("account_id", account_id)
            .errors(LOOKUP_ERRORS)
    }

    pub fn create_request(account: &CreateAccountReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::post("/api/v1/account")
            .json(account)?
            .errors(WRITE_ERRORS))
    }

    pub fn update_request(account: &UpdateAccountReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::put("/api/v1/account")
            .json(account)?
            .errors(LOOKUP_ERRORS))
    }

    /// All accounts of the authenticated user.
    pub async fn list(&self) -> Result<Vec<Account>, ApiError> {
        self.client.execute(Self::list_request()).await
    }

    pub async fn get(&self, account_id: &str) -> Result<Account, ApiError> {
        self.client.execute(Self::get_request(account_id)).await
    }

    pub async fn create(&self, account: &CreateAccountReq) -> Result<Account, ApiError> {
        self.client.execute(Self::create_request(account)?).await
    }

    pub async fn update(&self, account: &UpdateAccountReq) -> Result<Account, ApiError> {
        self.client.execute(Self::update_request(account)?).await
    }
}
