use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR_NAME, DatabaseConfig, EncryptionConfig, LoggingConfig, ServerConfig,
    YoutubeConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub encryption: EncryptionConfig,
    pub logging: LoggingConfig,
    pub youtube: YoutubeConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CR_CONFIG_DIR env var, else use ./.curately/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CR_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CR_CONFIG_DIR env var > ./.curately/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    ///
    /// A missing or malformed encryption key is reported here so the process
    /// refuses to start instead of failing per request.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.encryption.validate()?;
        self.youtube.validate()?;

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);
        info!(
            "  auth: jwt_secret={}, internal_token={}, cookie={}",
            presence(&self.auth.jwt_secret),
            presence(&self.auth.internal_token),
            self.auth.session_cookie
        );
        info!("  encryption: key={}", presence(&self.encryption.key));
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  youtube: client={}, token_url={}, api={}, timeout={}s",
            if self.youtube.is_configured() {
                "configured"
            } else {
                "missing"
            },
            self.youtube.token_url,
            self.youtube.api_base_url,
            self.youtube.request_timeout_secs
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("CR_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("CR_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("CR_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("CR_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string("CR_AUTH_INTERNAL_TOKEN", &mut self.auth.internal_token);
        Self::apply_env_string("CR_AUTH_SESSION_COOKIE", &mut self.auth.session_cookie);

        // Encryption
        Self::apply_env_option_string("CR_ENCRYPTION_KEY", &mut self.encryption.key);

        // Logging
        Self::apply_env_parse("CR_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CR_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CR_LOG_FILE", &mut self.logging.file);

        // YouTube
        Self::apply_env_option_string("CR_YOUTUBE_CLIENT_ID", &mut self.youtube.client_id);
        Self::apply_env_option_string(
            "CR_YOUTUBE_CLIENT_SECRET",
            &mut self.youtube.client_secret,
        );
        Self::apply_env_string("CR_YOUTUBE_TOKEN_URL", &mut self.youtube.token_url);
        Self::apply_env_string("CR_YOUTUBE_API_BASE_URL", &mut self.youtube.api_base_url);
        Self::apply_env_parse(
            "CR_YOUTUBE_REQUEST_TIMEOUT_SECS",
            &mut self.youtube.request_timeout_secs,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() { "set" } else { "missing" }
}
