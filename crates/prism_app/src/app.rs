//! Application root
//!
//! [`App`] owns the configuration, the store and the bootstrap sequencer.
//! Views receive the store by handle from here; nothing reaches it through a
//! global.

use std::sync::Arc;

use prism_core::{ActionLogger, Bootstrap, Store, SystemInfoHost, Theme};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::Result;
use crate::theme_vars::{ThemedWindow, WindowStyle};
use crate::view::IndexPage;

pub struct App {
    config: AppConfig,
    window: ThemedWindow,
    store: Arc<Store>,
    bootstrap: Bootstrap,
}

impl App {
    /// Build the application root. The store starts on the configured
    /// default theme with no system info.
    pub fn new(config: AppConfig) -> Result<Self> {
        let window = config.validate()?;

        let mut store = Store::new(config.theme.default);
        if config.app.dev {
            store = store.with_middleware(ActionLogger);
        }

        Ok(Self {
            config,
            window,
            store: Arc::new(store),
            bootstrap: Bootstrap::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared handle to the store
    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn is_launched(&self) -> bool {
        self.bootstrap.has_run()
    }

    /// Launch on the current thread, waiting for the host to answer
    pub fn launch<H>(&self, host: &H)
    where
        H: SystemInfoHost + ?Sized,
    {
        pollster::block_on(self.launch_async(host));
    }

    /// Launch the app: run bootstrap once, then apply the host's color
    /// scheme if the app follows it.
    pub async fn launch_async<H>(&self, host: &H)
    where
        H: SystemInfoHost + ?Sized,
    {
        if self.bootstrap.has_run() {
            debug!("App::launch - already launched");
            return;
        }

        info!("{} launched", self.config.app.name);
        self.bootstrap.run(&self.store, host).await;

        let host_theme = self
            .store
            .state()
            .system_info
            .as_ref()
            .and_then(|info| info.theme);
        if let Some(theme) = host_theme {
            self.on_system_theme_change(theme);
        }
    }

    /// Forward a host color scheme change.
    ///
    /// Only applied when `theme.follow_system` is set, and always through
    /// the store. Returns whether the theme was applied.
    pub fn on_system_theme_change(&self, theme: Theme) -> bool {
        if !self.config.theme.follow_system {
            debug!("App::on_system_theme_change - ignoring {theme}, follow_system is off");
            return false;
        }
        if self.store.theme() != theme {
            self.store.set_theme(theme);
        }
        true
    }

    /// Window settings for the current theme
    pub fn window_style(&self) -> &WindowStyle {
        self.window.for_theme(self.store.theme())
    }

    /// Entry page bound to this app's store
    pub fn entry_page(&self) -> IndexPage {
        IndexPage::new(self.store(), self.config.theme.follow_system)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("name", &self.config.app.name)
            .field("store", &self.store)
            .field("launched", &self.is_launched())
            .finish()
    }
}
