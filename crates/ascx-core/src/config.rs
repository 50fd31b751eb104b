// Rust guideline compliant 2026-10-12

//! Configuration management for ascx.

use crate::cursor::APP_STORE_CONNECT_BASE_URL;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    #[default]
    Json,
    /// Human-readable table format.
    Table,
    /// Markdown table format.
    Markdown,
}

impl OutputFormat {
    /// Parses a format name.
    ///
    /// # Errors
    ///
    /// Returns an error for anything but `json`, `table` or `markdown`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(crate::Error::Config(format!(
                "output format must be json, table, or markdown, got {:?}",
                other
            ))),
        }
    }
}

/// Configuration for ascx behavior.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Default app ID used when `--app` is omitted.
    #[serde(default)]
    pub app_id: Option<String>,

    /// Deadline in seconds applied to every command.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Pre-signed credential sent as a bearer token.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// API base URL. Its scheme and host form the trusted origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_base_url() -> String {
    APP_STORE_CONNECT_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            timeout_secs: default_timeout_secs(),
            output_format: OutputFormat::default(),
            bearer_token: None,
            base_url: default_base_url(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_format", &self.output_format)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Returns the configuration file used when no path is given.
    ///
    /// `ASC_CONFIG_PATH` wins over `~/.asc/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ASC_CONFIG_PATH") {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".asc").join("config.toml"))
    }

    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `path`, or `Config::default_path()`
    /// 3. Environment variables with `ASC_` prefix
    ///
    /// # Arguments
    ///
    /// * `path` - Explicit configuration file, if any
    ///
    /// # Returns
    ///
    /// A Config struct with values from file and environment variables applied.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let config_path = path.map(Path::to_path_buf).or_else(Self::default_path);
        if let Some(config_path) = config_path.filter(|p| p.exists()) {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content).map_err(|e| {
                crate::Error::Config(format!(
                    "invalid config file {}: {}",
                    config_path.display(),
                    e
                ))
            })?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `ASC_APP_ID` - Default app ID
    /// - `ASC_TIMEOUT_SECS` - Command deadline in seconds
    /// - `ASC_OUTPUT_FORMAT` - Output format (json/table/markdown)
    /// - `ASC_BEARER_TOKEN` - Bearer credential
    /// - `ASC_BASE_URL` - API base URL
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = non_empty_env("ASC_APP_ID") {
            self.app_id = Some(val);
        }

        if let Some(val) = non_empty_env("ASC_TIMEOUT_SECS") {
            self.timeout_secs = val.parse().map_err(|_| {
                crate::Error::Config("ASC_TIMEOUT_SECS must be a positive number".to_string())
            })?;
        }

        if let Some(val) = non_empty_env("ASC_OUTPUT_FORMAT") {
            self.output_format = OutputFormat::parse(&val)?;
        }

        if let Some(val) = non_empty_env("ASC_BEARER_TOKEN") {
            self.bearer_token = Some(val);
        }

        if let Some(val) = non_empty_env("ASC_BASE_URL") {
            self.base_url = val;
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - timeout_secs is zero
    /// - base_url is not an absolute URL with a host
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(crate::Error::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        let base = url::Url::parse(&self.base_url).map_err(|e| {
            crate::Error::Config(format!("base_url {:?} is invalid: {}", self.base_url, e))
        })?;
        if base.host_str().is_none() {
            return Err(crate::Error::Config(format!(
                "base_url {:?} has no host",
                self.base_url
            )));
        }

        Ok(())
    }

    /// Returns the command deadline.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolves the app ID from a flag value, falling back to configuration.
    #[must_use]
    pub fn resolve_app_id(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.app_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all_env_vars() {
        for key in [
            "ASC_APP_ID",
            "ASC_TIMEOUT_SECS",
            "ASC_OUTPUT_FORMAT",
            "ASC_BEARER_TOKEN",
            "ASC_BASE_URL",
            "ASC_CONFIG_PATH",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.base_url, APP_STORE_CONNECT_BASE_URL);
        assert!(config.app_id.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(Some(&temp_dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_config_load_from_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let content = r#"
app_id = "123456789"
timeout_secs = 15
output_format = "markdown"
"#;
        std::fs::write(&config_path, content).unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("123456789"));
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.output_format, OutputFormat::Markdown);
        assert_eq!(config.base_url, APP_STORE_CONNECT_BASE_URL);
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "timeout_secs = 0").unwrap();

        assert!(Config::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_config_file_overridden_by_env() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "app_id = \"from-file\"").unwrap();

        std::env::set_var("ASC_APP_ID", "from-env");
        std::env::set_var("ASC_OUTPUT_FORMAT", "table");
        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.app_id.as_deref(), Some("from-env"));
        assert_eq!(config.output_format, OutputFormat::Table);

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ASC_TIMEOUT_SECS", "soon");
        let result = Config::load(Some(&temp_dir.path().join("missing.toml")));
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_invalid_base_url() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ASC_BASE_URL", "not a url");
        let result = Config::load(Some(&temp_dir.path().join("missing.toml")));
        assert!(result.is_err());

        clear_all_env_vars();
    }

    #[test]
    fn test_config_env_huge_timeout_builds_context() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all_env_vars();
        let temp_dir = TempDir::new().unwrap();

        std::env::set_var("ASC_TIMEOUT_SECS", u64::MAX.to_string());
        let config = Config::load(Some(&temp_dir.path().join("missing.toml"))).unwrap();
        let ctx = crate::RequestContext::with_timeout(config.timeout());
        assert!(ctx.check().is_ok());

        clear_all_env_vars();
    }

    #[test]
    fn test_resolve_app_id_prefers_flag() {
        let config = Config {
            app_id: Some("from-config".to_string()),
            ..Config::default()
        };
        assert_eq!(config.resolve_app_id(Some(" flag ")).as_deref(), Some("flag"));
        assert_eq!(config.resolve_app_id(Some("")).as_deref(), Some("from-config"));
        assert_eq!(Config::default().resolve_app_id(None), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            bearer_token: Some("secret-token".to_string()),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("secret-token"));
    }
}
