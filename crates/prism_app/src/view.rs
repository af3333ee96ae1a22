//! View-layer bindings
//!
//! Views own no state. A [`ViewBinding`] subscribes to the store, keeps the
//! latest snapshot and raises a render flag; UI frameworks poll the flag (or
//! wrap the binding) to decide when to re-render. Overrides go back through
//! the store.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use prism_core::{Action, AppState, Store, Subscription, SystemInfo, Theme};

/// Label shown when the host did not report a platform
pub const PLATFORM_FALLBACK: &str = "H5 / Web";

/// Theme-related props every page reads
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeViewProps {
    pub theme: Theme,
    pub system_info: Option<SystemInfo>,
}

impl ThemeViewProps {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            theme: state.theme,
            system_info: state.system_info.clone(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Host platform, or [`PLATFORM_FALLBACK`] when absent
    pub fn platform_label(&self) -> &str {
        self.system_info
            .as_ref()
            .map(|info| info.platform.as_str())
            .unwrap_or(PLATFORM_FALLBACK)
    }

    pub fn theme_label(&self) -> &'static str {
        match self.theme {
            Theme::Dark => "🌙 Dark",
            Theme::Light => "☀️ Light",
        }
    }
}

/// Keeps a view in sync with the store
pub struct ViewBinding {
    store: Arc<Store>,
    latest: Arc<RwLock<Arc<AppState>>>,
    needs_render: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl ViewBinding {
    pub fn new(store: Arc<Store>) -> Self {
        let latest = Arc::new(RwLock::new(store.state()));
        let needs_render = Arc::new(AtomicBool::new(true));

        let subscription = {
            let latest = latest.clone();
            let needs_render = needs_render.clone();
            store.subscribe(move |state| {
                *latest.write().unwrap_or_else(PoisonError::into_inner) = state.clone();
                needs_render.store(true, Ordering::SeqCst);
            })
        };

        Self {
            store,
            latest,
            needs_render,
            _subscription: subscription,
        }
    }

    /// Latest snapshot delivered by the store
    pub fn snapshot(&self) -> Arc<AppState> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn props(&self) -> ThemeViewProps {
        ThemeViewProps::from_state(&self.snapshot())
    }

    /// Check if the view should re-render
    pub fn needs_render(&self) -> bool {
        self.needs_render.load(Ordering::SeqCst)
    }

    /// Clear the render flag (after rendering)
    pub fn clear_render(&self) {
        self.needs_render.store(false, Ordering::SeqCst);
    }

    /// Send an intent to the store
    pub fn dispatch(&self, action: Action) {
        self.store.dispatch(action);
    }
}

/// Page wrapper that applies the theme class
pub struct PageContainer;

impl PageContainer {
    pub fn theme_class(theme: Theme) -> &'static str {
        theme.as_str()
    }

    /// Container class list: caller classes followed by the theme class
    pub fn class_name(theme: Theme, classes: &str) -> String {
        let classes = classes.trim();
        if classes.is_empty() {
            Self::theme_class(theme).to_string()
        } else {
            format!("{classes} {}", Self::theme_class(theme))
        }
    }
}

/// Rendered content of the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexView {
    pub container_class: String,
    pub title: &'static str,
    pub theme_label: &'static str,
    pub platform_label: String,
    pub toggle_label: &'static str,
    pub sync_note: &'static str,
}

impl fmt::Display for IndexView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "Environment & Theme Status")?;
        writeln!(f, "  Current Theme: {}", self.theme_label)?;
        writeln!(f, "  Platform:      {}", self.platform_label)?;
        writeln!(f)?;
        writeln!(f, "[ {} ]", self.toggle_label)?;
        write!(f, "{}", self.sync_note)
    }
}

/// Entry page: shows the theme and platform, offers a manual override
pub struct IndexPage {
    binding: ViewBinding,
    follow_system: bool,
}

impl IndexPage {
    pub fn new(store: Arc<Store>, follow_system: bool) -> Self {
        tracing::debug!("IndexPage loaded");
        Self {
            binding: ViewBinding::new(store),
            follow_system,
        }
    }

    pub fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    pub fn render(&self) -> IndexView {
        let props = self.binding.props();
        self.binding.clear_render();

        IndexView {
            container_class: PageContainer::class_name(props.theme, "page"),
            title: "Hello world!",
            theme_label: props.theme_label(),
            platform_label: props.platform_label().to_string(),
            toggle_label: "Toggle Manual Override",
            sync_note: if self.follow_system {
                "Note: System theme changes will automatically sync."
            } else {
                "Note: Theme changes only through the manual override."
            },
        }
    }

    /// Manual override: switch to the opposite theme
    pub fn toggle_theme(&self) {
        self.binding.dispatch(Action::ToggleTheme);
    }
}
