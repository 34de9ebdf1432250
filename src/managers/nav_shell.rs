//! Navigation shells: the desktop top bar and the mobile bottom bar.
//!
//! A shell owns its entry list (a fixed base plus an optional custom-category tail),
//! resolves active state against the current location on every render, hides
//! preference-dependent entries until hydrated, and guards loading on clicks.

use std::rc::Rc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::managers::navigation_loading::NavigationLoadingSignal;
use crate::services::preference_store::PersistentPreferenceStore;
use crate::services::route_matcher::RouteMatcher;
use crate::services::routing::Router;
use crate::types::config::NavigationConfig;
use crate::types::errors::CategoryError;
use crate::types::nav::{Category, NavEntry, NavIcon, NavSurface, NavigationIntent, RenderedEntry};
use crate::types::preference::{simple_mode_key, PreferenceKey, PreferenceState};

/// External source of user-defined categories.
#[async_trait(?Send)]
pub trait CategoryProvider {
    async fn custom_categories(&self) -> Result<Vec<Category>, CategoryError>;
}

/// A provider answering with a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticCategories(pub Vec<Category>);

#[async_trait(?Send)]
impl CategoryProvider for StaticCategories {
    async fn custom_categories(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.0.clone())
    }
}

/// Immutable base entries plus at most one appended tail entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntries {
    base: Rc<[NavEntry]>,
    tail: Option<NavEntry>,
}

impl NavEntries {
    pub fn new(base: Vec<NavEntry>) -> Self {
        Self {
            base: base.into(),
            tail: None,
        }
    }

    /// A new list with `tail` appended. A list that already has a tail is returned as is.
    pub fn with_tail(&self, tail: NavEntry) -> Self {
        if self.tail.is_some() {
            return self.clone();
        }
        Self {
            base: self.base.clone(),
            tail: Some(tail),
        }
    }

    pub fn has_tail(&self) -> bool {
        self.tail.is_some()
    }

    pub fn len(&self) -> usize {
        self.base.len() + usize::from(self.tail.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavEntry> {
        self.base.iter().chain(self.tail.iter())
    }
}

fn category_href(prefix: &str, sub_type: &str) -> String {
    format!("{prefix}?type={sub_type}")
}

fn category_entries(prefix: &str) -> Vec<NavEntry> {
    vec![
        NavEntry::new(NavIcon::Film, "电影", &category_href(prefix, "movie")),
        NavEntry::new(NavIcon::Tv, "剧集", &category_href(prefix, "tv")),
        NavEntry::new(NavIcon::Cat, "动漫", &category_href(prefix, "anime")),
        NavEntry::new(NavIcon::Clover, "综艺", &category_href(prefix, "show")),
    ]
}

/// Base entries for `surface`: the bottom bar adds home and search ahead of the categories.
pub fn base_entries(surface: NavSurface, config: &NavigationConfig) -> Vec<NavEntry> {
    let mut entries = Vec::new();
    if surface == NavSurface::BottomBar {
        entries.push(NavEntry::new(NavIcon::Home, "首页", &config.home_route));
        entries.push(NavEntry::new(NavIcon::Search, "搜索", &config.search_route));
    }
    entries.extend(category_entries(&config.category_prefix));
    entries
}

/// The entry appended once custom categories exist.
pub fn custom_entry(config: &NavigationConfig) -> NavEntry {
    NavEntry::new(
        NavIcon::Star,
        "自定义",
        &category_href(&config.category_prefix, "custom"),
    )
}

pub struct NavShell {
    surface: NavSurface,
    entries: NavEntries,
    custom_entry: NavEntry,
    matcher: RouteMatcher,
    router: Rc<dyn Router>,
    preferences: PersistentPreferenceStore,
    loading: NavigationLoadingSignal,
    categories: Rc<dyn CategoryProvider>,
    simple_mode_key: PreferenceKey<bool>,
    simple_mode: PreferenceState<bool>,
    active_path: Option<String>,
    home_route: String,
    search_route: String,
    favorites_route: String,
    scroll_threshold: f64,
    scroll_y: f64,
}

impl NavShell {
    pub fn new(
        surface: NavSurface,
        config: &NavigationConfig,
        router: Rc<dyn Router>,
        preferences: PersistentPreferenceStore,
        loading: NavigationLoadingSignal,
        categories: Rc<dyn CategoryProvider>,
    ) -> Self {
        Self {
            surface,
            entries: NavEntries::new(base_entries(surface, config)),
            custom_entry: custom_entry(config),
            matcher: RouteMatcher::new(&config.category_prefix),
            router,
            preferences,
            loading,
            categories,
            simple_mode_key: simple_mode_key(&config.simple_mode_key),
            simple_mode: PreferenceState::Uninitialized,
            active_path: None,
            home_route: config.home_route.clone(),
            search_route: config.search_route.clone(),
            favorites_route: config.favorites_route.clone(),
            scroll_threshold: config.scroll_threshold,
            scroll_y: 0.0,
        }
    }

    /// First client-side activation: reads simple mode, then asks for custom categories.
    pub async fn mount(&mut self) {
        self.preferences.activate();
        self.simple_mode = self.preferences.read(&self.simple_mode_key).await;

        match self.categories.custom_categories().await {
            Ok(categories) if !categories.is_empty() => {
                debug!(surface = ?self.surface, count = categories.len(), "custom categories found");
                self.entries = self.entries.with_tail(self.custom_entry.clone());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "custom categories unavailable"),
        }
    }

    pub fn surface(&self) -> NavSurface {
        self.surface
    }

    pub fn is_hydrated(&self) -> bool {
        self.simple_mode.is_ready()
    }

    pub fn simple_mode(&self) -> &PreferenceState<bool> {
        &self.simple_mode
    }

    /// Overrides the router's location for active-state purposes; `None` follows the router.
    pub fn set_active_path(&mut self, active_path: Option<&str>) {
        self.active_path = active_path.map(str::to_string);
    }

    /// The location active state is computed against.
    ///
    /// Without an override the top bar uses the full location and the bottom bar uses the
    /// path only, so its search tab stays active on a results page. Pages that want a
    /// bottom bar category lit pass their location through [`Self::set_active_path`].
    pub fn current_location(&self) -> String {
        match (&self.active_path, self.surface) {
            (Some(path), _) => path.clone(),
            (None, NavSurface::TopBar) => self.router.current_location(),
            (None, NavSurface::BottomBar) => self.router.current_path(),
        }
    }

    pub fn is_active(&self, href: &str) -> bool {
        self.matcher.is_active(&self.current_location(), href)
    }

    /// Every entry regardless of hydration or simple mode.
    pub fn entries(&self) -> &NavEntries {
        &self.entries
    }

    /// Entries to render now. Empty until mounted; simple mode keeps home and search only.
    pub fn visible_entries(&self) -> Vec<RenderedEntry> {
        let simple = match self.simple_mode.value() {
            Some(simple) => simple,
            None => return Vec::new(),
        };
        let location = self.current_location();

        self.entries
            .iter()
            .filter(|e| !simple || e.href == self.home_route || e.href == self.search_route)
            .map(|e| RenderedEntry {
                entry: e.clone(),
                active: self.matcher.is_active(&location, &e.href),
            })
            .collect()
    }

    /// Follows `href`, signalling loading only when it is not already active.
    pub fn click(&self, href: &str) -> NavigationIntent {
        self.loading
            .start_unless_active(&self.matcher, &self.current_location(), href);
        let intent = NavigationIntent::from_href(href);
        debug!(surface = ?self.surface, href, "nav click");
        self.router.navigate(&intent);
        intent
    }

    pub fn click_logo(&self) -> NavigationIntent {
        let home = self.home_route.clone();
        self.click(&home)
    }

    pub fn click_favorites(&self) -> NavigationIntent {
        let favorites = self.favorites_route.clone();
        self.click(&favorites)
    }

    /// The favorites shortcut is active only on exactly the favorites route.
    pub fn favorites_active(&self) -> bool {
        self.current_location() == self.favorites_route
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// True once scrolled past the threshold; the top bar then renders compact.
    pub fn is_scrolled(&self) -> bool {
        self.scroll_y > self.scroll_threshold
    }
}
