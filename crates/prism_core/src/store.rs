//! Application state store
//!
//! The store owns the current [`AppState`] snapshot and the listener list.
//! All mutation goes through [`Store::dispatch`]:
//!
//! 1. the reducer computes the next snapshot under the state lock,
//! 2. middleware observes `(action, prev, next)`,
//! 3. listeners are called in subscription order with that same snapshot.
//!
//! Transitions are serialized by a re-entrant dispatch lock held through the
//! fan-out: other threads wait for the whole transition, while a listener on
//! the dispatching thread may dispatch again. The nested transition is fully
//! applied and fanned out before the nested `dispatch` call returns, and the
//! outer fan-out then stops, since every listener has already seen a newer
//! snapshot. The last snapshot any listener receives is always the one the
//! store currently holds.
//!
//! ```rust
//! use prism_core::{Store, Theme};
//!
//! let store = Store::new(Theme::Light);
//! let _sub = store.subscribe(|state| println!("theme is now {}", state.theme));
//!
//! store.toggle_theme();
//! assert_eq!(store.state().theme, Theme::Dark);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use indexmap::IndexMap;
use parking_lot::ReentrantMutex;

use crate::action::{reduce, Action};
use crate::middleware::Middleware;
use crate::state::{AppState, SystemInfo, Theme};

/// Callback invoked with each new snapshot
pub type Listener = Arc<dyn Fn(&Arc<AppState>) + Send + Sync>;

/// Identifier handed out for each subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type ListenerMap = Mutex<IndexMap<SubscriptionId, Listener>>;

pub struct Store {
    state: RwLock<Arc<AppState>>,
    dispatch_lock: ReentrantMutex<()>,
    listeners: Arc<ListenerMap>,
    next_id: AtomicU64,
    middleware: Vec<Box<dyn Middleware>>,
}

impl Store {
    /// Create a store holding `theme` and no system info
    pub fn new(theme: Theme) -> Self {
        Self::from_state(AppState::with_theme(theme))
    }

    pub fn from_state(state: AppState) -> Self {
        Self {
            state: RwLock::new(Arc::new(state)),
            dispatch_lock: ReentrantMutex::new(()),
            listeners: Arc::new(Mutex::new(IndexMap::new())),
            next_id: AtomicU64::new(1),
            middleware: Vec::new(),
        }
    }

    /// Add a middleware (builder style, before the store is shared)
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<AppState> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn theme(&self) -> Theme {
        self.state().theme
    }

    /// Apply a transition and notify every listener before returning.
    ///
    /// Returns the snapshot the transition produced.
    pub fn dispatch(&self, action: Action) -> Arc<AppState> {
        let _serial = self.dispatch_lock.lock();

        let (prev, next) = {
            let mut current = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let prev = current.clone();
            let next = Arc::new(reduce(&prev, &action));
            *current = next.clone();
            (prev, next)
        };

        tracing::trace!(
            "Store::dispatch - {} (theme {} -> {}, platform {:?} -> {:?})",
            action.name(),
            prev.theme,
            next.theme,
            prev.platform(),
            next.platform()
        );

        for middleware in &self.middleware {
            middleware.after_reduce(&action, &prev, &next);
        }

        // Snapshot the list so listeners can (un)subscribe while being notified.
        let listeners: Vec<Listener> = lock(&self.listeners).values().cloned().collect();
        for listener in listeners {
            if !self.is_current(&next) {
                // A listener dispatched; its fan-out already delivered a newer snapshot.
                tracing::trace!("Store::dispatch - {} superseded", action.name());
                break;
            }
            listener(&next);
        }

        next
    }

    fn is_current(&self, snapshot: &Arc<AppState>) -> bool {
        Arc::ptr_eq(
            &self.state.read().unwrap_or_else(PoisonError::into_inner),
            snapshot,
        )
    }

    /// Replace the system info (`None` = absent)
    pub fn set_system_info(&self, info: Option<SystemInfo>) -> Arc<AppState> {
        self.dispatch(Action::SetSystemInfo(info))
    }

    /// Replace the theme
    pub fn set_theme(&self, theme: Theme) -> Arc<AppState> {
        self.dispatch(Action::SetTheme(theme))
    }

    /// Switch to the opposite of the current theme
    pub fn toggle_theme(&self) -> Arc<AppState> {
        self.dispatch(Action::ToggleTheme)
    }

    /// Register a listener.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<AppState>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.listeners).insert(id, Arc::new(listener));
        tracing::trace!("Store::subscribe - {:?}", id);

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
            active: true,
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state())
            .field("listeners", &self.listener_count())
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

fn lock(listeners: &ListenerMap) -> MutexGuard<'_, IndexMap<SubscriptionId, Listener>> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by [`Store::subscribe`]
pub struct Subscription {
    id: SubscriptionId,
    listeners: Weak<ListenerMap>,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener from the store
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Keep the listener registered for the lifetime of the store
    pub fn detach(mut self) {
        self.active = false;
    }

    fn remove(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(listeners) = self.listeners.upgrade() {
            // shift_remove keeps the remaining listeners in subscription order
            lock(&listeners).shift_remove(&self.id);
            tracing::trace!("Store::unsubscribe - {:?}", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active)
            .finish()
    }
}
