//! Application error types

use std::path::PathBuf;

use prism_core::Theme;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A window setting references a theme variable that isn't defined
    #[error("window.{field} references @{name}, which is not defined in [theme.{theme}]")]
    UnknownThemeVariable {
        field: &'static str,
        name: String,
        theme: Theme,
    },

    /// `app.pages` is empty
    #[error("app.pages must list at least one page")]
    NoPages,
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
