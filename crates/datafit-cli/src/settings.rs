use std::io;
use std::path::Path;

use datafit_core::QualityConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Load a threshold profile, falling back to the defaults when no file is given.
///
/// The profile is only parsed here; bounds are checked when the service is
/// built from it.
pub fn load_config(path: Option<&Path>) -> SettingsResult<QualityConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            parse_config(&content)
        }
        None => Ok(QualityConfig::default()),
    }
}

pub fn parse_config(content: &str) -> SettingsResult<QualityConfig> {
    let config: QualityConfig = toml::from_str(content)?;
    Ok(config)
}
