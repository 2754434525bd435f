mod youtube;

use std::env;

use tempfile::TempDir;

pub(crate) const VALID_KEY: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
pub(crate) const VALID_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and point CR_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("CR_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Set the secrets validate() requires
pub(crate) fn required_secrets() -> (EnvGuard, EnvGuard) {
    (
        EnvGuard::set("CR_AUTH_JWT_SECRET", VALID_SECRET),
        EnvGuard::set("CR_ENCRYPTION_KEY", VALID_KEY),
    )
}
