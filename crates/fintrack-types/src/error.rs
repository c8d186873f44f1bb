use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend for any non-2xx response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BackendHttpError {
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub r#override: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ErrorAction>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Redirect,
}

/// Follow-up the backend asks the caller to perform. Exposed as-is; interpretation
/// belongs to whoever renders the error.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorAction {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub message: String,
    pub value: String,
}

/// Normalized error handed to callers, whatever shape the failure arrived in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetails {
    pub code: String,
    pub message: String,
    pub status: u16,
    #[serde(default)]
    pub r#override: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ErrorAction>,
}

impl ApiErrorDetails {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
            r#override: false,
            field_errors: BTreeMap::new(),
            action: None,
        }
    }

    /// Fallback used when a response carries no parseable backend error body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(format!("HTTP_{status}"), message, status)
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

impl From<BackendHttpError> for ApiErrorDetails {
    fn from(body: BackendHttpError) -> Self {
        let mut fieldErrors = BTreeMap::new();
        for entry in body.errors.unwrap_or_default() {
            if entry.field.is_empty() || entry.error.is_empty() {
                continue;
            }
            fieldErrors.insert(entry.field, entry.error);
        }

        let code = if body.code.is_empty() {
            format!("HTTP_{}", body.status)
        } else {
            body.code
        };

        Self {
            code,
            message: body.message,
            status: body.status,
            r#override: body.r#override,
            field_errors: fieldErrors,
            action: body.action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_body_flattens_field_errors() {
        let body: BackendHttpError = serde_json::from_str(
            r#"{
                "code": "BAD_REQUEST",
                "message": "invalid amount",
                "status": 400,
                "override": false,
                "errors": [{"field": "amount", "error": "must be positive"}]
            }"#,
        )
        .expect("valid error body");

        let details = ApiErrorDetails::from(body);
        assert_eq!(details.code, "BAD_REQUEST");
        assert_eq!(details.status, 400);
        assert_eq!(details.field_error("amount"), Some("must be positive"));
        assert!(details.action.is_none());
    }

    #[test]
    fn missing_code_falls_back_to_status_code() {
        let body: BackendHttpError =
            serde_json::from_str(r#"{"message": "nope", "status": 409}"#).expect("valid body");

        let details = ApiErrorDetails::from(body);
        assert_eq!(details.code, "HTTP_409");
        assert!(!details.has_field_errors());
    }

    #[test]
    fn redirect_action_is_preserved() {
        let body: BackendHttpError = serde_json::from_str(
            r#"{
                "code": "SESSION_EXPIRED",
                "message": "sign in again",
                "status": 401,
                "override": true,
                "action": {"type": "redirect", "message": "Session expired", "value": "/sign-in"}
            }"#,
        )
        .expect("valid body");

        let details = ApiErrorDetails::from(body);
        let action = details.action.expect("action kept");
        assert_eq!(action.action_type, ActionType::Redirect);
        assert_eq!(action.value, "/sign-in");
        assert!(details.r#override);
    }

    #[test]
    fn blank_field_entries_are_dropped() {
        let body = BackendHttpError {
            code: "BAD_REQUEST".into(),
            message: "invalid".into(),
            status: 400,
            r#override: false,
            errors: Some(vec![
                FieldError { field: String::new(), error: "orphan".into() },
                FieldError { field: "name".into(), error: "required".into() },
            ]),
            action: None,
        };

        let details = ApiErrorDetails::from(body);
        assert_eq!(details.field_errors.len(), 1);
        assert_eq!(details.field_error("name"), Some("required"));
    }
}
