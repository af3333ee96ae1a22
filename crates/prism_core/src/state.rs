//! Application state snapshot
//!
//! [`AppState`] is the whole content of the [`Store`](crate::Store): the active
//! [`Theme`] and the host-reported [`SystemInfo`]. Snapshots are immutable and
//! shared as `Arc<AppState>`; every transition produces a fresh one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::HostQueryError;

/// Visual mode of the application
///
/// Deserializes through [`FromStr`], so config files and host payloads accept
/// the same spellings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite mode
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown theme `{0}` (expected `light` or `dark`)")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = ParseThemeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Host-reported environment descriptor
///
/// Only `platform` (and the host's own color scheme, when it reports one we
/// understand) are interpreted. Everything else the host returns is carried
/// along untouched in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemInfo {
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SystemInfo {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            theme: None,
            extra: Map::new(),
        }
    }

    /// Attach the color scheme the host reports
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Attach an opaque host field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up an opaque host field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Classify a raw host value.
    ///
    /// `null` means the host had nothing to report and is classified the same
    /// way as a host without the query. Anything that is not an object with a
    /// non-empty string `platform` is malformed.
    pub fn classify(raw: Value) -> Result<Self, HostQueryError> {
        let mut fields = match raw {
            Value::Null => {
                return Err(HostQueryError::Unavailable(
                    "host returned no system info".to_string(),
                ))
            }
            Value::Object(map) => map,
            other => {
                return Err(HostQueryError::Malformed(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let platform = match fields.remove("platform") {
            Some(Value::String(p)) if !p.trim().is_empty() => p.trim().to_string(),
            Some(other) => {
                return Err(HostQueryError::Malformed(format!(
                    "`platform` must be a non-empty string, got {}",
                    json_kind(&other)
                )))
            }
            None => {
                return Err(HostQueryError::Malformed(
                    "missing `platform` field".to_string(),
                ))
            }
        };

        // Hosts may report schemes we don't model (e.g. "auto"); keep those opaque.
        let theme = fields
            .get("theme")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Theme>().ok());
        if theme.is_some() {
            fields.remove("theme");
        }

        Ok(Self {
            platform,
            theme,
            extra: fields,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(s) if s.trim().is_empty() => "an empty string",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Immutable application state snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AppState {
    pub theme: Theme,
    /// `None` when the host query failed or is unsupported
    pub system_info: Option<SystemInfo>,
}

impl AppState {
    /// Initial state before bootstrap has run
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            system_info: None,
        }
    }

    /// Platform reported by the host, if any
    pub fn platform(&self) -> Option<&str> {
        self.system_info.as_ref().map(|info| info.platform.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn toggle_flips_between_two_values() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }

    #[test]
    fn parse_theme_is_case_insensitive() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("auto".parse::<Theme>().is_err());
    }

    #[test]
    fn deserialize_matches_from_str() {
        for raw in ["dark", "Dark", " DARK "] {
            let theme: Theme = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(Ok(theme), raw.parse::<Theme>());
        }
        assert!(serde_json::from_value::<Theme>(json!("sepia")).is_err());
        assert_eq!(serde_json::to_value(Theme::Dark).unwrap(), json!("dark"));
    }

    #[test]
    fn classify_keeps_opaque_fields() {
        let info = SystemInfo::classify(json!({
            "platform": "ios",
            "theme": "dark",
            "model": "iPhone 15",
            "pixelRatio": 3
        }))
        .unwrap();

        assert_eq!(info.platform, "ios");
        assert_eq!(info.theme, Some(Theme::Dark));
        assert_eq!(info.field("model"), Some(&json!("iPhone 15")));
        assert_eq!(info.field("pixelRatio"), Some(&json!(3)));
        assert!(info.field("theme").is_none());
    }

    #[test]
    fn classify_leaves_unknown_scheme_opaque() {
        let info = SystemInfo::classify(json!({ "platform": "android", "theme": "auto" })).unwrap();
        assert_eq!(info.theme, None);
        assert_eq!(info.field("theme"), Some(&json!("auto")));
    }

    #[test]
    fn classify_null_is_unavailable() {
        assert!(matches!(
            SystemInfo::classify(Value::Null),
            Err(HostQueryError::Unavailable(_))
        ));
    }

    #[test]
    fn classify_rejects_malformed_values() {
        for raw in [
            json!("ios"),
            json!([1, 2]),
            json!({}),
            json!({ "platform": "" }),
            json!({ "platform": 7 }),
        ] {
            assert!(
                matches!(SystemInfo::classify(raw.clone()), Err(HostQueryError::Malformed(_))),
                "{raw} should be malformed"
            );
        }
    }

    #[test]
    fn serialized_state_flattens_host_fields() {
        let state = AppState {
            theme: Theme::Dark,
            system_info: Some(SystemInfo::new("devtools").with_field("brand", "devtools")),
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "theme": "dark",
                "system_info": { "platform": "devtools", "brand": "devtools" }
            })
        );
    }
}
