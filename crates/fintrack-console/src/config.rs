use serde::Deserialize;

pub const API_URL_ENV: &str = "FINTRACK_API_URL";

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub guard: GuardConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Credential for calls the server makes on its own behalf (startup health check).
    pub service_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            service_token: None,
        }
    }
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Static,
    Remote,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AuthConfig {
    pub session_cookie: String,
    pub sign_in_url: String,
    pub sign_up_url: String,
    pub dashboard_path: String,
    pub validation: ValidationMode,
    /// Only read in `static` mode.
    pub token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie: "__session".into(),
            sign_in_url: "/sign-in".into(),
            sign_up_url: "/sign-up".into(),
            dashboard_path: "/dashboard".into(),
            validation: ValidationMode::Static,
            token: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct GuardConfig {
    pub public_only: Vec<String>,
    pub protected: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            public_only: vec!["/sign-in".into(), "/sign-up".into(), "/api/webhooks".into()],
            protected: vec!["/dashboard".into()],
        }
    }
}

impl Config {
    /// Environment wins over the file for the backend URL.
    pub fn with_api_url_override(mut self, apiUrl: Option<String>) -> Self {
        if let Some(url) = apiUrl.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
        self
    }
}

pub fn load(path: &str) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse(&contents).unwrap_or_else(|e| {
            tracing::warn!("failed to parse config {path}: {e}, using defaults");
            Config::default()
        }),
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = parse(
            r#"
            [api]
            base_url = "https://api.fintrack.dev"

            [auth]
            validation = "remote"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.fintrack.dev");
        assert_eq!(config.auth.validation, ValidationMode::Remote);
        assert_eq!(config.auth.session_cookie, "__session");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.guard.protected, vec!["/dashboard".to_string()]);
    }

    #[test]
    fn unknown_validation_mode_is_rejected() {
        assert!(parse("[auth]\nvalidation = \"magic\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/fintrack.toml");
        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.auth.validation, ValidationMode::Static);
    }

    #[test]
    fn env_override_replaces_base_url_unless_blank() {
        let config = Config::default().with_api_url_override(Some("http://backend:9000".into()));
        assert_eq!(config.api.base_url, "http://backend:9000");

        let config = Config::default().with_api_url_override(Some("  ".into()));
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }
}
