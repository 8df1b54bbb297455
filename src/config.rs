//! Application configuration management with security considerations.
//!
//! All configuration values required by the enrollment app live here.
//! Sensitive fields are clearly marked and should never be logged.

use envconfig::Envconfig;
use std::sync::LazyLock;

/// Application configuration loaded from environment variables.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Use secret management systems in production
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/app.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: Database password to encrypt SQLite data
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost"
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    /// Common values: 80 (HTTP), 443 (HTTPS), 8080 (dev)
    pub web_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Example: "/etc/ssl/private/server.key"
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    /// Example: "/etc/ssl/certs/server.crt"
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: CSRF protection password (UUID format)
    pub csrf_pass: String,

    /// 🔒 SENSITIVE: CSRF protection salt (UUID format)
    /// Rotation: change with csrf_pass
    pub csrf_salt: String,

    /// Milliseconds the UI stays busy after each submit before the step
    /// transition completes (NON-SENSITIVE)
    #[envconfig(default = "3000")]
    pub settle_delay_ms: u64,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.web_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.web_server_host,
            port = self.web_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn web_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.web_server_protocol(), self.url_host())
    }
}

/// Global application configuration instance with validation
///
/// Validated on first access; the application panics with a descriptive
/// message when required environment variables are missing.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load and validate application configuration. Check environment variables.")
});

/// 🔒 SENSITIVE: One-Time Password secret (regenerated on each application start)
pub static OTP_SECRET: LazyLock<uuid::Uuid> = LazyLock::new(uuid::Uuid::new_v4);
