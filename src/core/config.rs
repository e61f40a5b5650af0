//! Application configuration.
//!
//! The server loads [`Config`] from environment variables using
//! `Config::from_env()` after calling `dotenvy::dotenv()`. The browser side
//! uses [`ClientConfig`], which is fixed at build time.

use crate::core::session::BootstrapMode;

/// Default backend the `/api` proxy forwards to
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
/// Default path prefix for API calls
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Server configuration loaded from environment variables.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct Config {
    /// Treasury Monitor backend base URL
    /// Example: http://localhost:8080
    pub backend_url: String,

    /// Path prefix under which the API is proxied
    pub api_prefix: String,
}

#[cfg(feature = "ssr")]
impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BACKEND_URL").ok(),
            std::env::var("API_PREFIX").ok(),
        )
    }

    fn from_values(backend_url: Option<String>, api_prefix: Option<String>) -> Self {
        let backend_url = backend_url
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let api_prefix = api_prefix
            .filter(|v| !v.trim().is_empty())
            .map(|p| normalize_prefix(&p))
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            api_prefix,
        }
    }

    /// Backend URL for a proxied path, e.g. `/auth/login` -> `{backend}/api/auth/login`
    pub fn backend_endpoint(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.backend_url,
            self.api_prefix,
            path.trim_start_matches('/')
        )
    }
}

#[cfg(feature = "ssr")]
impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(feature = "ssr")]
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// Browser-side settings shared through context
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every API call
    pub api_base: String,
    /// Login entry point used by logout and the route guard
    pub login_path: String,
    /// Where a successful login lands
    pub home_path: String,
    /// How the session is established on first load
    pub bootstrap: BootstrapMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_PREFIX.to_string(),
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            bootstrap: if cfg!(feature = "demo-session") {
                BootstrapMode::Demo
            } else {
                BootstrapMode::Verify
            },
        }
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_when_unset() {
        let config = Config::from_values(None, None);

        assert_eq!(config.backend_url, "http://localhost:8080");
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn test_config_with_all_fields() {
        let config = Config::from_values(
            Some("https://api.treasury.example/".to_string()),
            Some("v2/".to_string()),
        );

        assert_eq!(config.backend_url, "https://api.treasury.example");
        assert_eq!(config.api_prefix, "/v2");
    }

    #[test]
    fn test_config_with_empty_string_values() {
        // Blank values fall back to the defaults instead of producing bad URLs
        let config = Config::from_values(Some("  ".to_string()), Some("".to_string()));

        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.api_prefix, DEFAULT_API_PREFIX);
    }

    #[test]
    fn test_root_prefix_is_empty() {
        let config = Config::from_values(None, Some("/".to_string()));
        assert_eq!(config.api_prefix, "");
        assert_eq!(
            config.backend_endpoint("health"),
            "http://localhost:8080/health"
        );
    }

    #[test]
    fn test_backend_endpoint() {
        let config = Config::from_values(Some("http://backend:8080".to_string()), None);

        assert_eq!(
            config.backend_endpoint("/auth/login"),
            "http://backend:8080/api/auth/login"
        );
        assert_eq!(
            config.backend_endpoint("billing/history"),
            "http://backend:8080/api/billing/history"
        );
    }

    #[test]
    fn test_config_from_env_returns_config() {
        // Actual values depend on environment, so only check invariants
        let config = Config::from_env();
        assert!(!config.backend_url.ends_with('/'));
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.api_base, "/api");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.home_path, "/dashboard");
        #[cfg(not(feature = "demo-session"))]
        assert_eq!(config.bootstrap, BootstrapMode::Verify);
    }
}
