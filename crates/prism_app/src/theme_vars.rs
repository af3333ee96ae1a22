//! Theme variable resolution for window settings
//!
//! Window settings may name a theme variable (`"@navTextStyle"`) instead of a
//! literal value. Both themes are resolved up front so switching themes at
//! runtime is a lookup that cannot fail.

use prism_core::Theme;
use serde::Serialize;

use crate::config::{ThemeConfig, ThemeVariables, WindowConfig};
use crate::error::{ConfigError, Result};

/// Window settings with every variable resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowStyle {
    pub background_text_style: String,
    pub navigation_bar_background_color: String,
    pub navigation_bar_title_text: String,
    pub navigation_bar_text_style: String,
}

/// Resolved window settings for both themes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemedWindow {
    light: WindowStyle,
    dark: WindowStyle,
}

impl ThemedWindow {
    pub fn resolve(window: &WindowConfig, themes: &ThemeConfig) -> Result<Self> {
        Ok(Self {
            light: resolve_window(window, themes, Theme::Light)?,
            dark: resolve_window(window, themes, Theme::Dark)?,
        })
    }

    pub fn for_theme(&self, theme: Theme) -> &WindowStyle {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

fn resolve_window(window: &WindowConfig, themes: &ThemeConfig, theme: Theme) -> Result<WindowStyle> {
    // Errors name the table that was searched, not the theme being resolved.
    let table = themes.table_for(theme);
    let vars = themes.variables(theme);
    let field = |field: &'static str, value: &str| resolve_value(field, value, vars, table);

    Ok(WindowStyle {
        background_text_style: field("background_text_style", &window.background_text_style)?,
        navigation_bar_background_color: field(
            "navigation_bar_background_color",
            &window.navigation_bar_background_color,
        )?,
        navigation_bar_title_text: field(
            "navigation_bar_title_text",
            &window.navigation_bar_title_text,
        )?,
        navigation_bar_text_style: field(
            "navigation_bar_text_style",
            &window.navigation_bar_text_style,
        )?,
    })
}

/// Resolve a single `@name` reference; other values pass through
pub fn resolve_value(
    field: &'static str,
    value: &str,
    vars: &ThemeVariables,
    theme: Theme,
) -> Result<String> {
    let Some(name) = value.strip_prefix('@') else {
        return Ok(value.to_string());
    };

    vars.get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownThemeVariable {
            field,
            name: name.to_string(),
            theme,
        })
}
