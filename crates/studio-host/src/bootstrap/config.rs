//! # Configuration Loader / 配置加载器
//!
//! - Read the TOML file into the [`AppConfig`] DTO, reporting I/O and parse
//!   errors with context.
//! - Overlay environment variables (`.env` is read first).
//! - Fill empty values with system defaults.
//!
//! The DTO mapping accepts whatever is in the file; deciding what an empty
//! value means happens here and nowhere else.

use anyhow::Context;
use std::path::{Path, PathBuf};
use studio_core::config::{AppConfig, DEFAULT_ATTACHMENT_BUCKET, DEFAULT_PRODUCT_PAGE_SIZE};
use studio_infra::paths::{default_config_path, default_data_dir};

pub const ENV_BACKEND_URL: &str = "STUDIO_BACKEND_URL";
pub const ENV_BACKEND_ANON_KEY: &str = "STUDIO_BACKEND_ANON_KEY";
pub const ENV_DATA_DIR: &str = "STUDIO_DATA_DIR";
pub const ENV_CONFIG_PATH: &str = "STUDIO_CONFIG";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Pure data loading: no validation, missing sections become empty values.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Overlay `STUDIO_*` environment variables onto a loaded config.
/// 用环境变量覆盖配置。
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

fn apply_overrides_from(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_empty(ENV_BACKEND_URL) {
        config.backend_url = url;
    }
    if let Some(key) = non_empty(ENV_BACKEND_ANON_KEY) {
        config.anon_key = key;
    }
    if let Some(dir) = non_empty(ENV_DATA_DIR) {
        config.data_dir = PathBuf::from(dir);
    }
}

/// Replace empty values with the system defaults.
pub fn fill_defaults(config: &mut AppConfig) {
    if config.data_dir.as_os_str().is_empty() {
        config.data_dir = default_data_dir();
    }
    if config.attachment_bucket.trim().is_empty() {
        config.attachment_bucket = DEFAULT_ATTACHMENT_BUCKET.to_string();
    }
    if config.product_page_size == 0 {
        config.product_page_size = DEFAULT_PRODUCT_PAGE_SIZE;
    }
}

/// Resolve the effective configuration at startup.
///
/// Reads `.env`, then the file at `path` (or `STUDIO_CONFIG`, or the per-user
/// default). A missing file is not an error: the app can run from environment
/// variables alone.
pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("Failed to read .env file");
        }
    }

    let path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path()),
    };

    let mut config = if path.exists() {
        load_config(path)?
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        AppConfig::empty()
    };

    apply_env_overrides(&mut config);
    fill_defaults(&mut config);
    Ok(config)
}
