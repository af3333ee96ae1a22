//! Store middleware
//!
//! Middleware observes every transition after the reducer ran and before
//! listeners are notified. It cannot alter or veto the transition.

use crate::action::Action;
use crate::state::AppState;

pub trait Middleware: Send + Sync {
    fn after_reduce(&self, action: &Action, prev: &AppState, next: &AppState);
}

impl<F> Middleware for F
where
    F: Fn(&Action, &AppState, &AppState) + Send + Sync,
{
    fn after_reduce(&self, action: &Action, prev: &AppState, next: &AppState) {
        self(action, prev, next)
    }
}

/// Logs each action with the state before and after it (dev builds)
#[derive(Debug, Default, Clone, Copy)]
pub struct ActionLogger;

impl Middleware for ActionLogger {
    fn after_reduce(&self, action: &Action, prev: &AppState, next: &AppState) {
        tracing::debug!(
            target: "prism::action",
            action = action.name(),
            prev = ?prev,
            next = ?next,
            "action {}",
            action.name()
        );
    }
}
