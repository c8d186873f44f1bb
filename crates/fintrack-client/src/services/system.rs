use fintrack_types::HealthResponse;

use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct SystemService<'a> {
    client: &'a ApiClient,
}

impl<'a> SystemService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn health_request() -> RequestDescriptor {
        RequestDescriptor::get("/health").errors(&[(503, "Service Unavailable")])
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.client.execute(Self::health_request()).await
    }
}
