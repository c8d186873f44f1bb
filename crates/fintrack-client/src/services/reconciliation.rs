use fintrack_types::{ParsedStatementRow, StatementUpload};

use super::WRITE_ERRORS;
use crate::client::ApiClient;
use crate::descriptor::RequestDescriptor;
use crate::error::ApiError;

pub struct ReconciliationService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReconciliationService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn upload_request(upload: StatementUpload) -> RequestDescriptor {
        let fileName = upload.file_name.clone();
        RequestDescriptor::post("/reconciliation/upload")
            .file_field(
                "statement",
                upload.statement,
                Some(fileName),
                upload.content_type,
            )
            .text_field("statement_period_start", upload.statement_period_start)
            .text_field("statement_period_end", upload.statement_period_end)
            .text_field("account_id", upload.account_id)
            .text_field("user_id", upload.user_id)
            .text_field("file_name", upload.file_name)
            .errors(WRITE_ERRORS)
    }

    /// Upload a bank statement; the backend answers 202 with the rows it parsed.
    pub async fn upload(&self, upload: StatementUpload) -> Result<Vec<ParsedStatementRow>, ApiError> {
        self.client.execute(Self::upload_request(upload)).await
    }
}
