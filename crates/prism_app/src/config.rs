//! Application configuration (prism.toml)
//!
//! Every section is optional; a missing file section falls back to the
//! defaults below.
//!
//! ```toml
//! [app]
//! name = "prism"
//! pages = ["pages/index/index"]
//! dev = false
//!
//! [window]
//! background_text_style = "light"
//! navigation_bar_background_color = "@navBackgroundColor"
//! navigation_bar_title_text = "Prism"
//! navigation_bar_text_style = "@navTextStyle"
//!
//! [theme]
//! default = "light"
//! follow_system = false
//! darkmode = true
//!
//! [theme.light]
//! navBackgroundColor = "#ffffff"
//! navTextStyle = "black"
//!
//! [theme.dark]
//! navBackgroundColor = "#1f1f1f"
//! navTextStyle = "white"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use prism_core::Theme;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::theme_vars::ThemedWindow;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl AppConfig {
    /// Read and parse a config file. Call [`AppConfig::validate`] before use.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        src.parse()
    }

    /// Check the config and resolve the window settings for both themes
    pub fn validate(&self) -> Result<ThemedWindow> {
        if self.app.pages.is_empty() {
            return Err(ConfigError::NoPages);
        }
        ThemedWindow::resolve(&self.window, &self.theme)
    }

    /// First page in `app.pages`
    pub fn entry_page(&self) -> Option<&str> {
        self.app.pages.first().map(String::as_str)
    }
}

impl FromStr for AppConfig {
    type Err = ConfigError;

    fn from_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }
}

/// `[app]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppSection {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_pages")]
    pub pages: Vec<String>,
    /// Enables the action logger and debug-level logs
    #[serde(default)]
    pub dev: bool,
}

fn default_name() -> String {
    "prism".to_string()
}

fn default_pages() -> Vec<String> {
    vec!["pages/index/index".to_string()]
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            pages: default_pages(),
            dev: false,
        }
    }
}

/// `[window]` section
///
/// Values starting with `@` name a theme variable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_background_text_style")]
    pub background_text_style: String,
    #[serde(default = "default_nav_background")]
    pub navigation_bar_background_color: String,
    #[serde(default = "default_title")]
    pub navigation_bar_title_text: String,
    #[serde(default = "default_nav_text_style")]
    pub navigation_bar_text_style: String,
}

fn default_background_text_style() -> String {
    "light".to_string()
}

fn default_nav_background() -> String {
    "@navBackgroundColor".to_string()
}

fn default_title() -> String {
    "Prism".to_string()
}

fn default_nav_text_style() -> String {
    "@navTextStyle".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            background_text_style: default_background_text_style(),
            navigation_bar_background_color: default_nav_background(),
            navigation_bar_title_text: default_title(),
            navigation_bar_text_style: default_nav_text_style(),
        }
    }
}

/// Named values a window setting can reference
pub type ThemeVariables = BTreeMap<String, String>;

/// `[theme]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Theme before any override
    #[serde(default)]
    pub default: Theme,
    /// Apply the host's color scheme at launch and when it changes
    #[serde(default)]
    pub follow_system: bool,
    /// Whether the host supports a dark variant at all
    #[serde(default = "default_true")]
    pub darkmode: bool,
    #[serde(default = "default_light_vars")]
    pub light: ThemeVariables,
    #[serde(default = "default_dark_vars")]
    pub dark: ThemeVariables,
}

fn default_true() -> bool {
    true
}

fn default_light_vars() -> ThemeVariables {
    ThemeVariables::from([
        ("navBackgroundColor".to_string(), "#ffffff".to_string()),
        ("navTextStyle".to_string(), "black".to_string()),
    ])
}

fn default_dark_vars() -> ThemeVariables {
    ThemeVariables::from([
        ("navBackgroundColor".to_string(), "#1f1f1f".to_string()),
        ("navTextStyle".to_string(), "white".to_string()),
    ])
}

impl ThemeConfig {
    /// Table that backs `theme`: dark falls back to light without darkmode
    pub fn table_for(&self, theme: Theme) -> Theme {
        match theme {
            Theme::Dark if self.darkmode => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Variable table used when `theme` is active
    pub fn variables(&self, theme: Theme) -> &ThemeVariables {
        match self.table_for(theme) {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Light,
            follow_system: false,
            darkmode: true,
            light: default_light_vars(),
            dark: default_dark_vars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config: AppConfig = "".parse().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.entry_page(), Some("pages/index/index"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = r#"
            [app]
            dev = true

            [theme]
            default = "dark"
            follow_system = true
        "#
        .parse()
        .unwrap();

        assert!(config.app.dev);
        assert_eq!(config.app.name, "prism");
        assert_eq!(config.theme.default, Theme::Dark);
        assert!(config.theme.follow_system);
        assert_eq!(config.theme.dark, default_dark_vars());
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn theme_names_ignore_case() {
        let config: AppConfig = "[theme]\ndefault = \"Dark\"".parse().unwrap();
        assert_eq!(config.theme.default, Theme::Dark);
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        let err = "[theme]\ndefault = \"sepia\"".parse::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_pages_rejected() {
        let config: AppConfig = "[app]\npages = []".parse().unwrap();
        assert!(matches!(config.validate().unwrap_err(), ConfigError::NoPages));
    }

    #[test]
    fn undefined_variable_rejected() {
        let config: AppConfig = r#"
            [window]
            navigation_bar_background_color = "@navBg"
        "#
        .parse()
        .unwrap();
        let err = config.validate().unwrap_err();

        match err {
            ConfigError::UnknownThemeVariable { field, name, theme } => {
                assert_eq!(field, "navigation_bar_background_color");
                assert_eq!(name, "navBg");
                assert_eq!(theme, Theme::Light);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dark_table_ignored_without_darkmode() {
        let config = ThemeConfig {
            darkmode: false,
            ..Default::default()
        };
        assert_eq!(config.table_for(Theme::Dark), Theme::Light);
        assert_eq!(config.variables(Theme::Dark), &default_light_vars());
    }

    #[test]
    fn validate_returns_the_resolved_window() {
        let window = AppConfig::default().validate().unwrap();
        assert_eq!(
            window.for_theme(Theme::Dark).navigation_bar_text_style,
            "white"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/nonexistent/prism.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/prism.toml"));
    }
}
