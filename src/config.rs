use std::env;

use crate::constants::DEFAULT_SESSION_TTL_SECS;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub session_ttl_secs: i64,
    pub environment: String,
    pub password_pepper: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/pomotrack.db".to_string());

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid SESSION_TTL_SECS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let password_pepper = env::var("PASSWORD_PEPPER")
            .map_err(|_| "PASSWORD_PEPPER must be set for password hashing")?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            allowed_origins,
            session_ttl_secs,
            environment,
            password_pepper,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Whether session cookies carry the cross-site production attributes
    /// (`Secure; SameSite=None`)
    pub fn secure_cookies(&self) -> bool {
        self.environment == "production"
    }
}
