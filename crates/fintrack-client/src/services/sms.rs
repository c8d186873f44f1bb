use fintrack_types::{CreateSmsReq, SmsLog};

use super::{LOOKUP_ERRORS, WRITE_ERRORS};
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct SmsService<'a> {
    client: &'a ApiClient,
}

impl<'a> SmsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request() -> RequestDescriptor {
        RequestDescriptor::get("/sms").errors(WRITE_ERRORS)
    }

    pub fn get_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::get("/sms/{id}")
            .path_param("id", id)
            .errors(LOOKUP_ERRORS)
    }

    pub fn create_request(sms: &CreateSmsReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::post("/sms").json(sms)?.errors(WRITE_ERRORS))
    }

    pub async fn list(&self) -> Result<Vec<SmsLog>, ApiError> {
        self.client.execute(Self::list_request()).await
    }

    pub async fn get(&self, id: &str) -> Result<SmsLog, ApiError> {
        self.client.execute(Self::get_request(id)).await
    }

    /// Submit a raw bank SMS for parsing.
    pub async fn create(&self, sms: &CreateSmsReq) -> Result<SmsLog, ApiError> {
        self.client.execute(Self::create_request(sms)?).await
    }
}
