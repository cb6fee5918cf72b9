//! Configuration management for the PoloMarket identity server.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Nothing here writes to stdout, which carries the MCP stream.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the identity server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported in the MCP server info (default: "polomarket-identity")
    pub server_name: String,

    /// Reject registrations that carry no RUT (default: false)
    pub require_rut: bool,

    /// Upper bound for list operations (default: 50)
    pub max_list_results: usize,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SERVER_NAME`: MCP server name (default: "polomarket-identity")
    /// - `REQUIRE_RUT`: `true`/`false` (default: false)
    /// - `MAX_LIST_RESULTS`: 1-1000 (default: 50)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() does not print to stdout
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let server_name = env::var("SERVER_NAME").unwrap_or(defaults.server_name);
        if server_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SERVER_NAME".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let require_rut = Self::parse_env_bool("REQUIRE_RUT", defaults.require_rut)?;
        let max_list_results = Self::parse_env_usize("MAX_LIST_RESULTS", defaults.max_list_results)?;

        if !(1..=1000).contains(&max_list_results) {
            return Err(ConfigError::InvalidValue {
                var: "MAX_LIST_RESULTS".to_string(),
                reason: "Must be between 1 and 1000".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            server_name,
            require_rut,
            max_list_results,
            log_level,
        })
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_name: "polomarket-identity".to_string(),
            require_rut: false,
            max_list_results: 50,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_name, "polomarket-identity");
        assert!(!config.require_rut);
        assert_eq!(config.max_list_results, 50);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("SERVER_NAME", "polomarket-test");
        guard.set("REQUIRE_RUT", "true");
        guard.set("MAX_LIST_RESULTS", "10");

        let config = Config::from_env().unwrap();
        assert_eq!(config.server_name, "polomarket-test");
        assert!(config.require_rut);
        assert_eq!(config.max_list_results, 10);
    }

    #[test]
    #[serial]
    fn test_config_invalid_bool() {
        let mut guard = EnvGuard::new();
        guard.set("REQUIRE_RUT", "sometimes");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUIRE_RUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_max_list_results_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("MAX_LIST_RESULTS", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MAX_LIST_RESULTS"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_empty_server_name() {
        let mut guard = EnvGuard::new();
        guard.set("SERVER_NAME", "  ");

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_usize_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_USIZE_INVALID", "not-a-number");

        assert!(Config::parse_env_usize("TEST_USIZE_INVALID", 10).is_err());
        assert_eq!(Config::parse_env_usize("NONEXISTENT_USIZE", 10).unwrap(), 10);
    }
}
