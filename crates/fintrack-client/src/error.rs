use fintrack_types::ApiErrorDetails;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The descriptor could not be turned into a request. Raised before any network call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("api error {} ({}): {}", .0.status, .0.code, .0.message)]
    Api(ApiErrorDetails),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(details) => Some(details.status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        match self {
            Self::Api(details) => details.field_error(field),
            _ => None,
        }
    }

    /// Normalize any failure into the shape presentation code renders.
    pub fn details(&self) -> ApiErrorDetails {
        match self {
            Self::Api(details) => details.clone(),
            other => ApiErrorDetails::new("ERROR", other.to_string(), 500),
        }
    }

    /// Text suitable for a toast: the backend's message when it sent one.
    pub fn human_message(&self) -> String {
        match self {
            Self::Api(details) if !details.message.trim().is_empty() => details.message.clone(),
            Self::Api(details) => format!("Error {}", details.status),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_api_errors_normalize_to_generic_details() {
        let error = ApiError::InvalidRequest("unresolved path parameter `id`".into());
        let details = error.details();

        assert_eq!(details.code, "ERROR");
        assert_eq!(details.status, 500);
        assert!(details.message.contains("unresolved path parameter"));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn human_message_prefers_backend_message() {
        let error = ApiError::Api(ApiErrorDetails::new("NOT_FOUND", "account not found", 404));
        assert_eq!(error.human_message(), "account not found");

        let blank = ApiError::Api(ApiErrorDetails::new("HTTP_502", "", 502));
        assert_eq!(blank.human_message(), "Error 502");
    }

    #[test]
    fn unauthorized_is_detected_from_status() {
        let error = ApiError::Api(ApiErrorDetails::from_status(401, "Unauthorized"));
        assert!(error.is_unauthorized());
    }
}
