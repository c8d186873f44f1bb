use fintrack_types::{Category, Merchant, StaticBank};

use super::AUTH_ERRORS;
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

/// Reference data used to populate dropdowns.
pub struct StaticService<'a> {
    client: &'a ApiClient,
}

impl<'a> StaticService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn banks_request() -> RequestDescriptor {
        RequestDescriptor::get("/static/bank").errors(AUTH_ERRORS)
    }

    pub fn categories_request() -> RequestDescriptor {
        RequestDescriptor::get("/static/categories").errors(AUTH_ERRORS)
    }

    pub fn merchants_request() -> RequestDescriptor {
        RequestDescriptor::get("/static/merchants").errors(AUTH_ERRORS)
    }

    pub async fn banks(&self) -> Result<Vec<StaticBank>, ApiError> {
        self.client.execute(Self::banks_request()).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.execute(Self::categories_request()).await
    }

    pub async fn merchants(&self) -> Result<Vec<Merchant>, ApiError> {
        self.client.execute(Self::merchants_request()).await
    }
}
