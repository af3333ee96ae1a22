//! Transitions and the reducer
//!
//! An [`Action`] is a transient request consumed synchronously by the store.
//! [`reduce`] is total: every action applies to every state, and each action
//! touches exactly one field.

use serde::Serialize;

use crate::state::{AppState, SystemInfo, Theme};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Replace the host-reported system info (`None` = absent)
    SetSystemInfo(Option<SystemInfo>),
    /// Replace the theme
    SetTheme(Theme),
    /// Switch to the opposite of the current theme
    ToggleTheme,
}

impl Action {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetSystemInfo(_) => "set_system_info",
            Action::SetTheme(_) => "set_theme",
            Action::ToggleTheme => "toggle_theme",
        }
    }
}

/// Apply an action to a snapshot, producing the next snapshot
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::SetSystemInfo(info) => AppState {
            theme: state.theme,
            system_info: info.clone(),
        },
        Action::SetTheme(theme) => AppState {
            theme: *theme,
            system_info: state.system_info.clone(),
        },
        Action::ToggleTheme => AppState {
            theme: state.theme.toggle(),
            system_info: state.system_info.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_system_info_leaves_theme_alone() {
        let state = AppState::with_theme(Theme::Dark);
        let next = reduce(
            &state,
            &Action::SetSystemInfo(Some(SystemInfo::new("android"))),
        );
        assert_eq!(next.theme, Theme::Dark);
        assert_eq!(next.platform(), Some("android"));
    }

    #[test]
    fn absent_system_info_is_a_valid_input() {
        let state = AppState {
            theme: Theme::Light,
            system_info: Some(SystemInfo::new("ios")),
        };
        let next = reduce(&state, &Action::SetSystemInfo(None));
        assert_eq!(next, AppState::with_theme(Theme::Light));
    }

    #[test]
    fn set_theme_leaves_system_info_alone() {
        let state = AppState {
            theme: Theme::Light,
            system_info: Some(SystemInfo::new("ios")),
        };
        let next = reduce(&state, &Action::SetTheme(Theme::Dark));
        assert_eq!(next.theme, Theme::Dark);
        assert_eq!(next.system_info, state.system_info);
    }

    #[test]
    fn toggle_ignores_host_theme() {
        let state = AppState {
            theme: Theme::Light,
            system_info: Some(SystemInfo::new("ios").with_theme(Theme::Light)),
        };
        let next = reduce(&state, &Action::ToggleTheme);
        assert_eq!(next.theme, Theme::Dark);
        assert_eq!(reduce(&next, &Action::ToggleTheme).theme, Theme::Light);
    }
}
