//! Declarative description of a single API call.
//!
//! Service stubs build a [`RequestDescriptor`] and hand it to the dispatcher, which is the
//! only place that knows how to turn one into an HTTP request.

pub use reqwest::Method;
use serde::Serialize;

use crate::error::ApiError;

/// Statuses every call may answer with, whatever the stub declares.
pub const COMMON_ERRORS: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (500, "Internal Server Error"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
];

#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        bytes: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FormValue,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormField>),
}

#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    method: Method,
    path: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Vec<(&'static str, Option<String>)>,
    body: RequestBody,
    errors: Vec<(u16, &'static str)>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            path_params: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            errors: Vec::new(),
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: &'static str) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: &'static str) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn path_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    /// Absent values are kept so the declared order survives, but never serialized.
    pub fn query<V: ToString>(mut self, name: &'static str, value: Option<V>) -> Self {
        self.query.push((name, value.map(|v| v.to_string())));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to serialize body: {e}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn text_field(self, name: &'static str, value: impl Into<String>) -> Self {
        self.form_field(name, FormValue::Text(value.into()))
    }

    pub fn file_field(
        self,
        name: &'static str,
        bytes: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    ) -> Self {
        self.form_field(
            name,
            FormValue::File {
                bytes,
                file_name,
                content_type,
            },
        )
    }

    fn form_field(mut self, name: &'static str, value: FormValue) -> Self {
        let field = FormField { name, value };
        match &mut self.body {
            RequestBody::Multipart(fields) => fields.push(field),
            _ => self.body = RequestBody::Multipart(vec![field]),
        }
        self
    }

    pub fn errors(mut self, errors: &[(u16, &'static str)]) -> Self {
        self.errors.extend_from_slice(errors);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path_template(&self) -> &'static str {
        self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Substitute every `{name}` placeholder with its percent-encoded value.
    pub fn resolve_path(&self) -> Result<String, ApiError> {
        let mut resolved = String::with_capacity(self.path.len());
        let mut rest = self.path;

        while let Some(open) = rest.find('{') {
            resolved.push_str(&rest[..open]);
            let afterOpen = &rest[open + 1..];
            let close = afterOpen.find('}').ok_or_else(|| {
                ApiError::InvalidRequest(format!("unterminated placeholder in {}", self.path))
            })?;
            let name = &afterOpen[..close];

            let value = self
                .path_params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    ApiError::InvalidRequest(format!(
                        "unresolved path parameter `{name}` in {}",
                        self.path
                    ))
                })?;
            resolved.push_str(&urlencoding::encode(value));
            rest = &afterOpen[close + 1..];
        }

        resolved.push_str(rest);
        Ok(resolved)
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        self.query
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
            .collect()
    }

    /// Names of the multipart fields that will be sent, in declaration order.
    pub fn multipart_field_names(&self) -> Vec<&'static str> {
        match &self.body {
            RequestBody::Multipart(fields) => fields.iter().map(|field| field.name).collect(),
            _ => Vec::new(),
        }
    }

    /// Description for a known error status: the stub's own entry wins over the common set.
    pub fn error_description(&self, status: u16) -> Option<&'static str> {
        self.errors
            .iter()
            .chain(COMMON_ERRORS.iter())
            .find(|(code, _)| *code == status)
            .map(|(_, description)| *description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_placeholders_are_substituted_and_encoded() {
        let descriptor = RequestDescriptor::get("/api/v1/account/{account_id}")
            .path_param("account_id", "abc 123/x");

        assert_eq!(
            descriptor.resolve_path().expect("resolves"),
            "/api/v1/account/abc%20123%2Fx"
        );
    }

    #[test]
    fn unresolved_placeholder_is_a_caller_error() {
        let descriptor = RequestDescriptor::get("/investment/goal/{id}");

        match descriptor.resolve_path() {
            Err(ApiError::InvalidRequest(message)) => assert!(message.contains("`id`")),
            other => panic!("expected invalid request, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let descriptor = RequestDescriptor::get("/sms/{id").path_param("id", "1");
        assert!(matches!(
            descriptor.resolve_path(),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn absent_query_values_are_omitted() {
        let descriptor = RequestDescriptor::get("/transaction")
            .query("account_id", Some("a1"))
            .query::<String>("category_id", None)
            .query("merchant_id", Some("m9"));

        assert_eq!(
            descriptor.query_pairs(),
            vec![("account_id", "a1"), ("merchant_id", "m9")]
        );
    }

    #[test]
    fn multipart_fields_keep_declaration_order() {
        let descriptor = RequestDescriptor::post("/reconciliation/upload")
            .file_field("statement", vec![1, 2, 3], Some("may.xlsx".into()), None)
            .text_field("statement_period_start", "2024-05-01")
            .text_field("account_id", "a1");

        assert_eq!(
            descriptor.multipart_field_names(),
            vec!["statement", "statement_period_start", "account_id"]
        );
    }

    #[test]
    fn declared_errors_override_common_descriptions() {
        let descriptor =
            RequestDescriptor::get("/sms").errors(&[(404, "SMS log missing"), (422, "Unprocessable")]);

        assert_eq!(descriptor.error_description(404), Some("SMS log missing"));
        assert_eq!(descriptor.error_description(422), Some("Unprocessable"));
        assert_eq!(descriptor.error_description(401), Some("Unauthorized"));
        assert_eq!(descriptor.error_description(418), None);
    }
}
