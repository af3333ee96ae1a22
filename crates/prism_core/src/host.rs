//! Host runtime boundary
//!
//! Hosts answer the "get system info" query synchronously on some platforms
//! and asynchronously on others. [`SystemInfoHost`] normalizes both into a
//! future so the bootstrap sequencer has a single code path. Synchronous
//! hosts hand back an already-ready future.

use std::any::Any;
use std::future::{ready, Future};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;

use serde_json::{json, Value};

use crate::error::{HostQueryError, Result};

/// Future returned by a host query
pub type HostFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;

/// A host runtime that can describe its environment
pub trait SystemInfoHost: Send + Sync {
    /// Query the host for its raw system info record.
    ///
    /// `Ok(Value::Null)` is allowed and is treated like a failed query.
    fn system_info(&self) -> HostFuture<'_>;
}

impl<H: SystemInfoHost + ?Sized> SystemInfoHost for &H {
    fn system_info(&self) -> HostFuture<'_> {
        (**self).system_info()
    }
}

impl<H: SystemInfoHost + ?Sized> SystemInfoHost for Box<H> {
    fn system_info(&self) -> HostFuture<'_> {
        (**self).system_info()
    }
}

/// Adapts a synchronous host call.
///
/// A panic inside the call is reported as [`HostQueryError::Unavailable`]
/// (builds with `panic = "abort"` still abort).
pub struct SyncHost<F> {
    query: F,
}

impl<F> SyncHost<F>
where
    F: Fn() -> Result<Value> + Send + Sync,
{
    pub fn new(query: F) -> Self {
        Self { query }
    }
}

impl<F> SystemInfoHost for SyncHost<F>
where
    F: Fn() -> Result<Value> + Send + Sync,
{
    fn system_info(&self) -> HostFuture<'_> {
        let result = catch_unwind(AssertUnwindSafe(|| (self.query)())).unwrap_or_else(|payload| {
            Err(HostQueryError::Unavailable(format!(
                "host query panicked: {}",
                panic_message(payload.as_ref())
            )))
        });
        Box::pin(ready(result))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// A host that does not implement the query at all (e.g. a plain browser)
#[derive(Debug, Default, Clone)]
pub struct UnsupportedHost {
    name: Option<String>,
}

impl UnsupportedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the runtime in the reported error
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl SystemInfoHost for UnsupportedHost {
    fn system_info(&self) -> HostFuture<'_> {
        let reason = match &self.name {
            Some(name) => format!("{name} does not support the system info query"),
            None => "host does not support the system info query".to_string(),
        };
        Box::pin(ready(Err(HostQueryError::Unavailable(reason))))
    }
}

/// A host that always answers with the same raw value
#[derive(Debug, Clone, PartialEq)]
pub struct StaticHost {
    value: Value,
}

impl StaticHost {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parse the host answer from JSON text
    pub fn from_json(src: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(src).map(Self::new)
    }
}

impl SystemInfoHost for StaticHost {
    fn system_info(&self) -> HostFuture<'_> {
        Box::pin(ready(Ok(self.value.clone())))
    }
}

/// The operating system this process runs on
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl NativeHost {
    /// Platform identifier in the vocabulary mini-program hosts use
    pub fn platform() -> &'static str {
        match std::env::consts::OS {
            "macos" => "mac",
            "windows" => "windows",
            "ios" => "ios",
            "android" => "android",
            "linux" => "linux",
            "" => "unknown",
            other => other,
        }
    }
}

impl SystemInfoHost for NativeHost {
    fn system_info(&self) -> HostFuture<'_> {
        let info = json!({
            "platform": Self::platform(),
            "system": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
            "family": std::env::consts::FAMILY,
        });
        Box::pin(ready(Ok(info)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_host_resolves_immediately() {
        let host = SyncHost::new(|| Ok(json!({ "platform": "ios" })));
        let value = pollster::block_on(host.system_info()).unwrap();
        assert_eq!(value["platform"], "ios");
    }

    #[test]
    fn panicking_sync_host_is_unavailable() {
        let host = SyncHost::new(|| -> Result<Value> { panic!("bridge not ready") });
        let err = pollster::block_on(host.system_info()).unwrap_err();
        assert_eq!(
            err,
            HostQueryError::Unavailable("host query panicked: bridge not ready".to_string())
        );
    }

    #[test]
    fn unsupported_host_names_the_runtime() {
        let err = pollster::block_on(UnsupportedHost::named("h5").system_info()).unwrap_err();
        assert_eq!(
            err,
            HostQueryError::Unavailable("h5 does not support the system info query".to_string())
        );
    }

    #[test]
    fn static_host_parses_json() {
        let host = StaticHost::from_json(r#"{ "platform": "devtools" }"#).unwrap();
        let value = pollster::block_on(host.system_info()).unwrap();
        assert_eq!(value, json!({ "platform": "devtools" }));
    }

    #[test]
    fn native_host_reports_a_platform() {
        let value = pollster::block_on(NativeHost.system_info()).unwrap();
        assert_eq!(value["platform"], NativeHost::platform());
        assert_eq!(value["arch"], std::env::consts::ARCH);
    }
}
