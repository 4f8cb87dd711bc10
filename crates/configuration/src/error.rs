use thiserror::Error;

/// Why stockscope could not start with the given settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or a `STOCKSCOPE__*` variable could not be read or parsed.
    #[error("Failed to read stockscope settings: {0}")]
    LoadError(#[from] config::ConfigError),

    /// Settings parsed but name an unusable value.
    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key,
            reason: reason.into(),
        }
    }

    /// The offending setting, when the failure is a validation one.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::InvalidSetting { key, .. } => Some(*key),
            Self::LoadError(_) => None,
        }
    }
}
