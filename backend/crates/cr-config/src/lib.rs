mod auth_config;
mod config;
mod database_config;
mod encryption_config;
mod error;
mod log_level;
mod logging_config;
mod server_config;
mod youtube_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use encryption_config::EncryptionConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use youtube_config::YoutubeConfig;

const CONFIG_DIR_ENV: &str = "CR_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".curately";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "identity.db";

const MIN_SECRET_LENGTH: usize = 32;
const DEFAULT_SESSION_COOKIE: &str = "session";

/// 256-bit key, hex encoded
const ENCRYPTION_KEY_HEX_LENGTH: usize = 64;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

const DEFAULT_YOUTUBE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

#[cfg(test)]
mod tests;
