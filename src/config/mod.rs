//! Configuration module for the menu store.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Fixed key the menu snapshot blob is stored under
    pub store_key: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("MENU_DB_PATH")
            .unwrap_or_else(|_| "./data/menus.sqlite".to_string())
            .into();

        let store_key = env::var("MENU_STORE_KEY").unwrap_or_else(|_| "menu-storage".to_string());

        let log_level = env::var("MENU_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            store_key,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("MENU_DB_PATH");
        env::remove_var("MENU_STORE_KEY");
        env::remove_var("MENU_LOG_LEVEL");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/menus.sqlite"));
        assert_eq!(config.store_key, "menu-storage");
        assert_eq!(config.log_level, "info");
    }
}
