//! Application settings loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::{
    APP_NAME, APP_VERSION, DEFAULT_ALLOWED_ORIGIN, DEFAULT_API_PREFIX, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};

/// Deployment environment.
///
/// Controls log format/verbosity and how much error detail leaves the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub version: String,
    pub environment: Environment,
    pub server_host: String,
    pub server_port: u16,
    pub api_prefix: String,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            version: APP_VERSION.to_string(),
            environment: Environment::default(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// Unset or unparsable values fall back to the defaults in
    /// [`constants`](super::constants).
    pub fn from_env() -> Self {
        Self::load().0
    }

    /// Like [`Config::from_env`], but also returns warnings about ignored
    /// values so they can be logged once tracing is up.
    pub fn load() -> (Self, Vec<String>) {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// `NODE_ENV` and `PORT` are honoured when `APP_ENV` and `SERVER_PORT`
    /// are unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        let environment = match lookup("APP_ENV").or_else(|| lookup("NODE_ENV")) {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                warnings.push(format!("{}, falling back to development", e));
                Environment::Development
            }),
            None => defaults.environment,
        };

        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warnings.push(format!(
                    "Invalid port '{}', falling back to {}",
                    raw, defaults.server_port
                ));
                defaults.server_port
            }),
            None => defaults.server_port,
        };

        let config = Self {
            environment,
            server_port,
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            api_prefix: lookup("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.api_prefix),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.allowed_origins),
            ..defaults
        };

        (config, warnings)
    }

    /// Builder-style override used by the CLI and tests.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Split a comma separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Ensure the prefix starts with `/` and has no trailing slash.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Dev ".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Test));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("http://a.test, ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("api/"), "/api");
        assert_eq!(normalize_prefix("/v1/api"), "/v1/api");
        assert_eq!(normalize_prefix("/"), "");
    }

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_lookup_reads_every_key() {
        let (config, warnings) = Config::from_lookup(lookup(&[
            ("APP_ENV", "production"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8081"),
            ("API_PREFIX", "v1"),
            ("ALLOWED_ORIGINS", "http://a.test,http://b.test"),
        ]));

        assert!(warnings.is_empty());
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server_addr(), "127.0.0.1:8081");
        assert_eq!(config.api_prefix, "/v1");
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_node_style_keys_are_fallbacks() {
        let (config, _) =
            Config::from_lookup(lookup(&[("NODE_ENV", "production"), ("PORT", "4000")]));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server_port, 4000);

        let (config, _) = Config::from_lookup(lookup(&[
            ("APP_ENV", "test"),
            ("NODE_ENV", "production"),
            ("SERVER_PORT", "5000"),
            ("PORT", "4000"),
        ]));
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.server_port, 5000);
    }

    #[test]
    fn test_bad_values_are_reported_not_logged() {
        let (config, warnings) =
            Config::from_lookup(lookup(&[("APP_ENV", "staging"), ("SERVER_PORT", "http")]));

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server_port, 3000);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("staging"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.api_prefix, "/api");
        assert!(!config.environment.is_production());
    }
}
