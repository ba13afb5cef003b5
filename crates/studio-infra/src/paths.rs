use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "studiodesk";

/// Per-user local data directory, e.g. `~/.local/share/studiodesk`.
///
/// 返回应用本地数据目录；无法确定时回退到当前目录。
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Per-user config file location, e.g. `~/.config/studiodesk/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join("config.toml")
}
