use fintrack_types::{CreateTxnReq, ParsedTxnRes, SoftDeleteTxnsReq, Transaction, TransactionFilter};

use super::WRITE_ERRORS;
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct TransactionService<'a> {
    client: &'a ApiClient,
}

impl<'a> TransactionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_request(filter: &TransactionFilter) -> RequestDescriptor {
        RequestDescriptor::get("/transaction")
            .query("account_id", filter.account_id.as_deref())
            .query("category_id", filter.category_id.as_deref())
            .query("merchant_id", filter.merchant_id.as_deref())
            .errors(WRITE_ERRORS)
    }

    pub fn create_request(transaction: &CreateTxnReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::post("/transaction")
            .json(transaction)?
            .errors(WRITE_ERRORS))
    }

    pub fn delete_request(request: &SoftDeleteTxnsReq) -> Result<RequestDescriptor, ApiError> {
        Ok(RequestDescriptor::delete("/transaction")
            .json(request)?
            .errors(WRITE_ERRORS))
    }

    pub fn parse_image_request(
        image: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    ) -> RequestDescriptor {
        RequestDescriptor::post("/transaction/image-parse")
            .file_field("image", image, file_name, content_type)
            .errors(WRITE_ERRORS)
    }

    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
        self.client.execute(Self::list_request(filter)).await
    }

    pub async fn create(&self, transaction: &CreateTxnReq) -> Result<Transaction, ApiError> {
        self.client.execute(Self::create_request(transaction)?).await
    }

    /// Soft-delete; the backend keeps the rows with `deleted_at` set.
    pub async fn delete(&self, request: &SoftDeleteTxnsReq) -> Result<(), ApiError> {
        self.client.execute(Self::delete_request(request)?).await
    }

    /// Let the backend extract a transaction from a receipt photo.
    pub async fn parse_image(
        &self,
        image: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    ) -> Result<ParsedTxnRes, ApiError> {
        self.client
            .execute(Self::parse_image_request(image, file_name, content_type))
            .await
    }
}
