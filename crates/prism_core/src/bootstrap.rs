//! Launch-time bootstrap
//!
//! Runs once per application lifetime: query the host, classify the answer,
//! and populate the store's system info. Host failures are expected. They are
//! logged once at warn level and degrade the system info to absent; nothing
//! is propagated or retried.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::host::SystemInfoHost;
use crate::state::SystemInfo;
use crate::store::Store;

/// One-shot bootstrap sequencer
#[derive(Debug, Default)]
pub struct Bootstrap {
    started: AtomicBool,
}

impl Bootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether bootstrap has been started
    pub fn has_run(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Query the host and populate the store.
    ///
    /// The store keeps its default state until the host answers, so views
    /// can render before this future resolves. Calls after the first are
    /// ignored.
    pub async fn run<H>(&self, store: &Store, host: &H)
    where
        H: SystemInfoHost + ?Sized,
    {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Bootstrap::run - already ran, ignoring");
            return;
        }

        let info = match host.system_info().await.and_then(SystemInfo::classify) {
            Ok(info) => {
                debug!("Bootstrap::run - host platform {}", info.platform);
                Some(info)
            }
            Err(err) => {
                warn!("system info query failed, continuing without it: {err}");
                None
            }
        };

        store.set_system_info(info);
    }

    /// Run bootstrap to completion on the current thread
    pub fn run_blocking<H>(&self, store: &Store, host: &H)
    where
        H: SystemInfoHost + ?Sized,
    {
        pollster::block_on(self.run(store, host));
    }
}
