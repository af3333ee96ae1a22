//! Prism application layer
//!
//! Wires [`prism_core`] into a runnable application:
//!
//! - **Configuration**: `prism.toml` with window settings and per-theme
//!   variables
//! - **App root**: owns the store, runs bootstrap at launch, optionally
//!   follows the host color scheme
//! - **Views**: framework-agnostic bindings that re-render on store changes
//!
//! # Example
//!
//! ```rust
//! use prism_app::{App, AppConfig};
//! use prism_core::{Theme, UnsupportedHost};
//!
//! let app = App::new(AppConfig::default()).unwrap();
//! app.launch(&UnsupportedHost::named("h5"));
//!
//! let page = app.entry_page();
//! assert_eq!(page.render().platform_label, "H5 / Web");
//!
//! page.toggle_theme();
//! assert_eq!(app.store().theme(), Theme::Dark);
//! assert_eq!(app.window_style().navigation_bar_text_style, "white");
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod theme_vars;
pub mod view;

pub use app::App;
pub use config::{AppConfig, AppSection, ThemeConfig, ThemeVariables, WindowConfig};
pub use error::ConfigError;
pub use theme_vars::{ThemedWindow, WindowStyle};
pub use view::{
    IndexPage, IndexView, PageContainer, ThemeViewProps, ViewBinding, PLATFORM_FALLBACK,
};
