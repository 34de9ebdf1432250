//! Routing collaborator interface.
//!
//! The host framework owns the URL; this core only reads the current location and asks
//! for navigations. [`MemoryRouter`] is an in-process implementation for headless hosts,
//! the demo binary and tests.

use std::cell::RefCell;

use crate::types::nav::NavigationIntent;

pub trait Router {
    fn current_path(&self) -> String;
    fn current_query(&self) -> Vec<(String, String)>;
    fn navigate(&self, intent: &NavigationIntent);

    /// Path plus percent-encoded query, e.g. `/douban?type=movie&page=2`.
    fn current_location(&self) -> String {
        NavigationIntent::new(self.current_path(), self.current_query()).to_location()
    }

    /// First value of query parameter `name`.
    fn query_param(&self, name: &str) -> Option<String> {
        self.current_query()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Router that keeps the location in memory and records every navigation.
#[derive(Debug)]
pub struct MemoryRouter {
    location: RefCell<NavigationIntent>,
    history: RefCell<Vec<NavigationIntent>>,
}

impl MemoryRouter {
    /// Starts at `href`, e.g. `"/"` or `"/search?q=dune"`.
    pub fn new(href: &str) -> Self {
        Self {
            location: RefCell::new(NavigationIntent::from_href(href)),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Moves to `href` without recording, as browser back/forward would.
    pub fn set_location(&self, href: &str) {
        *self.location.borrow_mut() = NavigationIntent::from_href(href);
    }

    /// Navigations requested so far, oldest first.
    pub fn navigations(&self) -> Vec<NavigationIntent> {
        self.history.borrow().clone()
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.location.borrow().path.clone()
    }

    fn current_query(&self) -> Vec<(String, String)> {
        self.location.borrow().query.clone()
    }

    fn navigate(&self, intent: &NavigationIntent) {
        *self.location.borrow_mut() = intent.clone();
        self.history.borrow_mut().push(intent.clone());
    }
}
