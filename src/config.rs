//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup and injected into the
/// process through `AppState` (no module-level globals).
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// MongoDB database name
    pub mongo_db: String,
    /// Identity Toolkit API key
    pub firebase_api_key: String,
    /// TMDB API key
    pub tmdb_api_key: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            mongo_uri: "mongodb://localhost:27017".to_string(),
            mongo_db: "test-db".to_string(),
            firebase_api_key: "test_api_key".to_string(),
            tmdb_api_key: "test_tmdb_key".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            mongo_uri: env::var("MONGO_URI").map_err(|_| ConfigError::Missing("MONGO_URI"))?,
            mongo_db: env::var("MONGO_DB").unwrap_or_else(|_| "peliculas".to_string()),
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            tmdb_api_key: env::var("TMDB_API_KEY")
                .map_err(|_| ConfigError::Missing("TMDB_API_KEY"))?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("MONGO_URI", "mongodb://localhost:27017");
        env::set_var("FIREBASE_API_KEY", "test_key");
        env::set_var("TMDB_API_KEY", "test_tmdb");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.mongo_uri, "mongodb://localhost:27017");
        assert_eq!(config.firebase_api_key, "test_key");
        assert_eq!(config.port, 8080);
    }
}
