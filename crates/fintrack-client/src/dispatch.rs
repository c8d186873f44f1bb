use fintrack_types::{ApiErrorDetails, BackendHttpError};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::descriptor::{FormValue, RequestBody, RequestDescriptor};
use crate::error::ApiError;
use crate::token::resolve_token;

impl ApiClient {
    /// Run one descriptor against the API. Never retries.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, ApiError> {
        // Snapshot before any await so a concurrent reconfiguration cannot change it mid-flight.
        let provider = self.active_provider();
        let path = descriptor.resolve_path()?;

        let token = resolve_token(provider.as_ref()).await;
        let request = self.build_request(&descriptor, &path, token.as_deref())?;

        debug!(
            method = %descriptor.method(),
            path = descriptor.path_template(),
            authenticated = token.is_some(),
            "dispatching api request"
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;
        read_response(&descriptor, response).await
    }

    /// Like [`execute`](Self::execute), but yields `None` once `cancel` fires. A cancelled
    /// dispatch never surfaces its response.
    pub async fn execute_cancellable<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
        cancel: &CancellationToken,
    ) -> Option<Result<T, ApiError>> {
        let template = descriptor.path_template();
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.execute::<T>(descriptor) => Some(result),
        };

        if outcome.is_none() || cancel.is_cancelled() {
            debug!(path = template, "api request cancelled");
            return None;
        }
        outcome
    }

    /// Dispatch in the background and hand the outcome to `on_settle`, unless the returned
    /// handle is cancelled first.
    pub fn spawn<T, F>(&self, descriptor: RequestDescriptor, on_settle: F) -> DispatchHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        self.spawn_scoped(descriptor, &CancellationToken::new(), on_settle)
    }

    /// Spawn under `scope`: cancelling the scope (e.g. when a page is torn down) cancels
    /// every dispatch started in it.
    pub fn spawn_scoped<T, F>(
        &self,
        descriptor: RequestDescriptor,
        scope: &CancellationToken,
        on_settle: F,
    ) -> DispatchHandle
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T, ApiError>) + Send + 'static,
    {
        let cancel = scope.child_token();
        let client = self.clone();
        let taskCancel = cancel.clone();

        let task = tokio::spawn(async move {
            if let Some(result) = client.execute_cancellable::<T>(descriptor, &taskCancel).await {
                on_settle(result);
            }
        });

        DispatchHandle { cancel, task }
    }

    pub(crate) fn build_request(
        &self,
        descriptor: &RequestDescriptor,
        path: &str,
        token: Option<&str>,
    ) -> Result<reqwest::Request, ApiError> {
        let url = format!("{}{}", self.base_url(), path);
        let mut builder = self
            .http
            .request(descriptor.method().clone(), url.as_str())
            .header(ACCEPT, "application/json");

        let queryPairs = descriptor.query_pairs();
        if !queryPairs.is_empty() {
            builder = builder.query(&queryPairs);
        }

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }

        builder = match descriptor.body() {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => {
                let mut form = Form::new();
                for field in fields {
                    match &field.value {
                        FormValue::Text(text) => {
                            form = form.text(field.name, text.clone());
                        }
                        FormValue::File {
                            bytes,
                            file_name,
                            content_type,
                        } => {
                            let mut part = Part::bytes(bytes.clone());
                            if let Some(fileName) = file_name {
                                part = part.file_name(fileName.clone());
                            }
                            if let Some(contentType) = content_type {
                                part = part.mime_str(contentType).map_err(|e| {
                                    ApiError::InvalidRequest(format!(
                                        "invalid content type for `{}`: {e}",
                                        field.name
                                    ))
                                })?;
                            }
                            form = form.part(field.name, part);
                        }
                    }
                }
                builder.multipart(form)
            }
        };

        builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build request for {url}: {e}")))
    }
}

async fn read_response<T: DeserializeOwned>(
    descriptor: &RequestDescriptor,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;

    if status.is_success() {
        return decode_success(&bytes);
    }

    let details = error_details(descriptor, status, &bytes);
    warn!(
        status = details.status,
        code = %details.code,
        path = descriptor.path_template(),
        "api request failed"
    );
    Err(ApiError::Api(details))
}

fn decode_success<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    // Empty bodies (204, void endpoints) decode as JSON null.
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(ApiError::Decode);
    }
    serde_json::from_slice(bytes).map_err(ApiError::Decode)
}

fn error_details(descriptor: &RequestDescriptor, status: StatusCode, bytes: &[u8]) -> ApiErrorDetails {
    let code = status.as_u16();

    if let Ok(mut body) = serde_json::from_slice::<BackendHttpError>(bytes) {
        if body.status == 0 {
            body.status = code;
        }
        return body.into();
    }

    let message = match descriptor.error_description(code) {
        Some(description) => description.to_string(),
        None => format!(
            "Generic Error: status {code}, {}",
            status.canonical_reason().unwrap_or("unknown status")
        ),
    };
    ApiErrorDetails::from_status(code, message)
}

/// Handle to a dispatch started with [`ApiClient::spawn`].
#[derive(Debug)]
pub struct DispatchHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl DispatchHandle {
    /// Abandon interest in the response. Safe to call at any time, any number of times.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the dispatch to settle or observe its cancellation.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "api dispatch task failed");
        }
    }
}
