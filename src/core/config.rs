//! Application configuration from environment variables.
//!
//! Load configuration using `AppConfig::from_env()` after calling
//! `dotenvy::dotenv()`. Database, JWT, and chat settings have their own
//! `from_env` constructors in their modules.

/// Default port the HTTP server binds to
const DEFAULT_PORT: u16 = 5000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to
    pub port: u16,

    /// Environment mode: "production" enables Secure cookies, SameSite=None
    /// and a locked-down CORS origin
    pub environment: String,

    /// Allowed cross-origin frontend URL (used in production only)
    pub frontend_url: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let environment =
            std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let frontend_url = std::env::var("FRONTEND_URL").ok();

        Self {
            port,
            environment,
            frontend_url,
        }
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if a frontend origin is configured
    pub fn has_frontend_url(&self) -> bool {
        self.frontend_url.as_ref().is_some_and(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_production() {
        let config = AppConfig {
            port: 5000,
            environment: "production".to_string(),
            frontend_url: None,
        };
        assert!(config.is_production());

        let config = AppConfig {
            environment: "development".to_string(),
            ..config
        };
        assert!(!config.is_production());
    }

    #[test]
    fn test_is_production_is_exact_match() {
        let config = AppConfig {
            port: 5000,
            environment: "Production".to_string(),
            frontend_url: None,
        };
        assert!(!config.is_production());

        let config = AppConfig {
            environment: "prod".to_string(),
            ..config
        };
        assert!(!config.is_production());
    }

    #[test]
    fn test_has_frontend_url() {
        let config = AppConfig {
            port: 5000,
            environment: "production".to_string(),
            frontend_url: Some("https://bank.example.com".to_string()),
        };
        assert!(config.has_frontend_url());

        let config = AppConfig {
            frontend_url: Some(String::new()),
            ..config.clone()
        };
        assert!(!config.has_frontend_url());

        let config = AppConfig {
            frontend_url: None,
            ..config
        };
        assert!(!config.has_frontend_url());
    }

    #[test]
    fn test_from_env_returns_config() {
        // Actual values depend on environment, so we only verify the
        // accessors work regardless of what is set.
        let config = AppConfig::from_env();
        let _ = config.is_production();
        let _ = config.has_frontend_url();
        assert!(config.port > 0);
    }

    #[test]
    fn test_config_clone_and_debug() {
        let config = AppConfig {
            port: 8080,
            environment: "production".to_string(),
            frontend_url: Some("https://front.example".to_string()),
        };

        let cloned = config.clone();
        assert_eq!(config.port, cloned.port);
        assert_eq!(config.environment, cloned.environment);
        assert_eq!(config.frontend_url, cloned.frontend_url);

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("AppConfig"));
        assert!(debug_str.contains("8080"));
    }
}
