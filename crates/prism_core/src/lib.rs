//! Prism Core
//!
//! Application state for a cross-platform UI shell: the active light/dark
//! theme and the environment the host runtime reports.
//!
//! # Overview
//!
//! - **Store**: owns the current immutable [`AppState`] snapshot, applies
//!   [`Action`]s through a pure reducer and notifies listeners in
//!   subscription order
//! - **Bootstrap**: runs once at launch, asks the host for its system info
//!   and degrades to "absent" when the host can't answer
//! - **Host boundary**: [`SystemInfoHost`] turns sync and async host calls
//!   into one future-returning query
//!
//! # Quick Start
//!
//! ```rust
//! use prism_core::{Bootstrap, StaticHost, Store, Theme};
//! use serde_json::json;
//!
//! let store = Store::new(Theme::Light);
//! let host = StaticHost::new(json!({ "platform": "ios" }));
//!
//! Bootstrap::new().run_blocking(&store, &host);
//! assert_eq!(store.state().platform(), Some("ios"));
//!
//! store.toggle_theme();
//! assert_eq!(store.theme(), Theme::Dark);
//! ```

pub mod action;
pub mod bootstrap;
pub mod error;
pub mod host;
pub mod middleware;
pub mod state;
pub mod store;

pub use action::{reduce, Action};
pub use bootstrap::Bootstrap;
pub use error::HostQueryError;
pub use host::{HostFuture, NativeHost, StaticHost, SyncHost, SystemInfoHost, UnsupportedHost};
pub use middleware::{ActionLogger, Middleware};
pub use state::{AppState, ParseThemeError, SystemInfo, Theme};
pub use store::{Listener, Store, Subscription, SubscriptionId};
