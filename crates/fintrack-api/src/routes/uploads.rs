use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use fintrack_client::ApiError;
use fintrack_types::{ApiErrorDetails, ParsedStatementRow, ParsedTxnRes, StatementUpload};

use crate::middleware::auth::{AppState, RequestClient};
use crate::routes::ApiFailure;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/transactions/image-parse", post(parse_receipt))
        .route("/dashboard/reconciliation/upload", post(upload_statement))
}

struct UploadedFile {
    bytes: Vec<u8>,
    file_name: Option<String>,
    content_type: Option<String>,
}

/// Multipart body split into file parts (those sent with a filename) and text parts.
#[derive(Default)]
struct UploadForm {
    files: BTreeMap<String, UploadedFile>,
    text: BTreeMap<String, String>,
    missing: Vec<&'static str>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiFailure> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let fileName = field.file_name().map(str::to_string);
            let contentType = field.content_type().map(str::to_string);

            if fileName.is_some() {
                let bytes = field.bytes().await.map_err(malformed)?;
                form.files.insert(
                    name,
                    UploadedFile {
                        bytes: bytes.to_vec(),
                        file_name: fileName,
                        content_type: contentType,
                    },
                );
            } else {
                let text = field.text().await.map_err(malformed)?;
                form.text.insert(name, text);
            }
        }
        Ok(form)
    }

    fn file(&mut self, name: &'static str) -> Option<UploadedFile> {
        let file = self.files.remove(name).filter(|f| !f.bytes.is_empty());
        if file.is_none() {
            self.missing.push(name);
        }
        file
    }

    fn text(&mut self, name: &'static str) -> String {
        match self.text.remove(name).map(|t| t.trim().to_string()) {
            Some(text) if !text.is_empty() => text,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// 400 naming every required part that was absent or empty.
    fn rejection(&self) -> ApiFailure {
        let mut details = ApiErrorDetails::new("BAD_REQUEST", "missing upload fields", 400);
        for name in &self.missing {
            details.field_errors.insert(name.to_string(), "required".into());
        }
        ApiFailure(ApiError::Api(details))
    }
}

fn malformed(e: MultipartError) -> ApiFailure {
    let details = ApiErrorDetails::new("BAD_REQUEST", format!("malformed multipart body: {e}"), 400);
    ApiFailure(ApiError::Api(details))
}

/// Receipt photo in the `image` part; the backend extracts a draft transaction from it.
async fn parse_receipt(
    RequestClient(client): RequestClient,
    multipart: Multipart,
) -> Result<Json<ParsedTxnRes>, ApiFailure> {
    let mut form = UploadForm::read(multipart).await?;
    let Some(image) = form.file("image") else {
        return Err(form.rejection());
    };

    let parsed = client
        .transactions()
        .parse_image(image.bytes, image.file_name, image.content_type)
        .await?;
    Ok(Json(parsed))
}

/// Bank statement plus period and account metadata. `file_name` defaults to the
/// statement part's own filename.
async fn upload_statement(
    RequestClient(client): RequestClient,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<ParsedStatementRow>>), ApiFailure> {
    let mut form = UploadForm::read(multipart).await?;
    let statement = form.file("statement");
    let explicitName = form
        .text
        .remove("file_name")
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let fileName = explicitName.or_else(|| statement.as_ref().and_then(|s| s.file_name.clone()));
    if fileName.is_none() {
        form.missing.push("file_name");
    }

    let periodStart = form.text("statement_period_start");
    let periodEnd = form.text("statement_period_end");
    let accountId = form.text("account_id");
    let userId = form.text("user_id");

    let (Some(statement), Some(fileName), true) = (statement, fileName, form.missing.is_empty())
    else {
        return Err(form.rejection());
    };

    let rows = client
        .reconciliation()
        .upload(StatementUpload {
            statement: statement.bytes,
            content_type: statement.content_type,
            statement_period_start: periodStart,
            statement_period_end: periodEnd,
            account_id: accountId,
            user_id: userId,
            file_name: fileName,
        })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(rows)))
}
