//! Tab-wide "a navigation is in flight" flag.
//!
//! Link handlers call [`NavigationLoadingSignal::start`] before a route transition; the
//! route-arrival hook calls [`NavigationLoadingSignal::clear`]. The loading indicator
//! observes a `watch` receiver.

use std::rc::Rc;

use tokio::sync::watch;
use tracing::debug;

use crate::services::route_matcher::RouteMatcher;

/// Shared loading flag. Clones refer to the same flag.
#[derive(Debug, Clone)]
pub struct NavigationLoadingSignal {
    tx: Rc<watch::Sender<bool>>,
}

impl Default for NavigationLoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationLoadingSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Rc::new(tx) }
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    /// Marks a navigation as started. Returns false if one was already in flight.
    pub fn start(&self) -> bool {
        let started = self.tx.send_if_modified(|loading| {
            if *loading {
                false
            } else {
                *loading = true;
                true
            }
        });
        if started {
            debug!("navigation loading started");
        }
        started
    }

    /// Starts loading only when `href` is not the active entry for `current`.
    pub fn start_unless_active(&self, matcher: &RouteMatcher, current: &str, href: &str) -> bool {
        if matcher.is_active(current, href) {
            return false;
        }
        self.start()
    }

    /// Called when the destination route has mounted. Returns false if nothing was loading.
    pub fn clear(&self) -> bool {
        let cleared = self.tx.send_if_modified(|loading| {
            if *loading {
                *loading = false;
                true
            } else {
                false
            }
        });
        if cleared {
            debug!("navigation loading cleared");
        }
        cleared
    }

    /// A receiver for the loading indicator.
    pub fn watch(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
