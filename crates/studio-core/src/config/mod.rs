//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//!
//! > **This module contains data only.** Empty strings are valid facts; the
//! > bootstrap layer decides what to do with them.

use std::path::PathBuf;

/// Default number of products per page in the product grid.
pub const DEFAULT_PRODUCT_PAGE_SIZE: u32 = 24;

/// Default storage bucket for task and project attachments.
pub const DEFAULT_ATTACHMENT_BUCKET: &str = "attachments";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Public backend base URL, e.g. `https://xyzcompany.supabase.co`.
    /// This is the only value used to build public storage asset URLs.
    pub backend_url: String,

    /// Public (anon) API key sent as `apikey` on every backend call.
    pub anon_key: String,

    /// Storage bucket holding task and project attachments.
    pub attachment_bucket: String,

    /// Directory for local state (onboarding status, logs).
    pub data_dir: PathBuf,

    /// Page size passed to the product grid fetch.
    pub product_page_size: u32,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing keys map to empty values; this method must not validate.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            backend_url: str_at("backend", "url"),
            anon_key: str_at("backend", "anon_key"),
            attachment_bucket: str_at("storage", "attachment_bucket"),
            data_dir: PathBuf::from(str_at("app", "data_dir")),
            product_page_size: toml_value
                .get("app")
                .and_then(|a| a.get("product_page_size"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0) as u32,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            backend_url: String::new(),
            anon_key: String::new(),
            attachment_bucket: String::new(),
            data_dir: PathBuf::new(),
            product_page_size: 0,
        }
    }

    /// Create AppConfig with system-default values rooted at `data_dir`.
    ///
    /// The base directory is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            backend_url: String::new(),
            anon_key: String::new(),
            attachment_bucket: DEFAULT_ATTACHMENT_BUCKET.to_string(),
            data_dir,
            product_page_size: DEFAULT_PRODUCT_PAGE_SIZE,
        }
    }

    /// Directory that receives rolling log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
