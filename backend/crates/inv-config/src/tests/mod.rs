
use std::env;

use tempfile::TempDir;

pub(crate) const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes";

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

/// Create a temp config directory and set INV_CONFIG_DIR.
///
/// Also clears the legacy variables so a developer's shell can't leak into tests.
pub(crate) fn setup_config_dir() -> (TempDir, Vec<EnvGuard>) {
    let temp = TempDir::new().unwrap();
    let guards = vec![
        EnvGuard::set("INV_CONFIG_DIR", temp.path().to_str().unwrap()),
        EnvGuard::remove("PORT"),
        EnvGuard::remove("JWT_SECRET"),
        EnvGuard::remove("CORS_ALLOWED_ORIGINS"),
        EnvGuard::remove("INV_AUTH_JWT_SECRET"),
        EnvGuard::remove("INV_AUTH_JWT_PUBLIC_KEY_PATH"),
    ];
    (temp, guards)
}
