//! Search Interaction Controller for navsync.
//!
//! Drives the derived state of one mounted search box: suggestion and history popup
//! visibility (never both shown), outside-click dismissal of the history popup,
//! commits that write history and navigate, and inbound sync from the search route URL.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::managers::navigation_loading::NavigationLoadingSignal;
use crate::managers::search_history_store::{SearchHistoryStore, Subscription};
use crate::services::dismiss::DismissRegions;
use crate::services::route_matcher::RouteMatcher;
use crate::services::routing::Router;
use crate::types::nav::NavigationIntent;
use crate::types::search::{PointerDown, RegionId, RowClick, SearchUiState};

/// Query parameter carrying the search term.
pub const QUERY_PARAM: &str = "q";
/// Query parameter carrying the comma-joined selected sources.
pub const SOURCES_PARAM: &str = "sources";

pub struct SearchInteractionController {
    state: SearchUiState,
    history: SearchHistoryStore,
    loading: NavigationLoadingSignal,
    router: Rc<dyn Router>,
    matcher: RouteMatcher,
    search_route: String,
    history_regions: DismissRegions,
    history_items: Rc<RefCell<Option<Vec<String>>>>,
    subscription: Option<Subscription>,
    last_synced_query: Option<Vec<(String, String)>>,
}

impl SearchInteractionController {
    pub fn new(
        history: SearchHistoryStore,
        loading: NavigationLoadingSignal,
        router: Rc<dyn Router>,
        matcher: RouteMatcher,
        search_route: &str,
    ) -> Self {
        Self {
            state: SearchUiState::default(),
            history,
            loading,
            router,
            matcher,
            search_route: search_route.to_string(),
            history_regions: DismissRegions::new(&[
                RegionId::HistoryTrigger,
                RegionId::HistoryPopup,
            ]),
            history_items: Rc::new(RefCell::new(None)),
            subscription: None,
            last_synced_query: None,
        }
    }

    /// Subscribes to history changes, fetches the initial list, then syncs from the URL.
    pub async fn mount(&mut self) {
        if self.subscription.is_none() {
            let items = self.history_items.clone();
            self.subscription = Some(self.history.subscribe(move |terms| {
                *items.borrow_mut() = Some(terms.to_vec());
            }));
        }
        let terms = self.history.get_all().await;
        *self.history_items.borrow_mut() = Some(terms);
        self.sync_from_route();
    }

    /// Stops observing history. Writes already started still complete. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn state(&self) -> &SearchUiState {
        &self.state
    }

    /// Latest history terms known to this controller, most recent first.
    pub fn history_items(&self) -> Vec<String> {
        self.history_items.borrow().clone().unwrap_or_default()
    }

    /// Regions counted as "inside" the history popup for outside-click dismissal.
    pub fn history_regions_mut(&mut self) -> &mut DismissRegions {
        &mut self.history_regions
    }

    pub fn on_text_changed(&mut self, text: &str) {
        if text.is_empty() {
            self.clear_text();
            return;
        }
        self.state.search_text = text.to_string();
        if text.trim().is_empty() {
            self.hide_popups();
        } else {
            self.show_suggestions();
        }
    }

    /// The explicit clear control: hides both popups and resets the text.
    pub fn clear_text(&mut self) {
        self.state.search_text.clear();
        self.hide_popups();
    }

    /// Any text, whitespace included, reopens suggestions; an empty box opens history.
    pub async fn on_focus(&mut self) {
        if !self.state.search_text.is_empty() {
            self.show_suggestions();
            return;
        }
        if self.history_items.borrow().is_none() {
            let terms = self.history.get_all().await;
            *self.history_items.borrow_mut() = Some(terms);
        }
        self.show_history();
    }

    /// Toggle from the history trigger control.
    pub async fn toggle_history(&mut self) {
        if self.state.history_visible {
            self.state.history_visible = false;
        } else {
            if self.history_items.borrow().is_none() {
                let terms = self.history.get_all().await;
                *self.history_items.borrow_mut() = Some(terms);
            }
            self.show_history();
        }
    }

    pub fn on_pointer_down(&mut self, event: &PointerDown) {
        if self.state.history_visible && self.history_regions.is_outside(event) {
            self.state.history_visible = false;
        }
    }

    pub async fn on_enter(&mut self) -> Option<NavigationIntent> {
        let text = self.state.search_text.clone();
        self.commit(&text).await
    }

    pub async fn choose_suggestion(&mut self, suggestion: &str) -> Option<NavigationIntent> {
        self.commit(suggestion).await
    }

    pub async fn click_history_item(&mut self, term: &str) -> Option<NavigationIntent> {
        self.commit(term).await
    }

    /// Finalizes `term`: records it, signals loading if leaving another route, navigates
    /// to the search route and hides both popups. Blank terms are ignored.
    pub async fn commit(&mut self, term: &str) -> Option<NavigationIntent> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        self.history.add(term).await;

        let current_path = self.router.current_path();
        self.loading
            .start_unless_active(&self.matcher, &current_path, &self.search_route);

        let intent = self.destination(term);
        debug!(href = %intent.to_href(), "search commit");
        self.router.navigate(&intent);

        self.state.search_text = term.to_string();
        self.hide_popups();
        Some(intent)
    }

    /// Deletes one history row without committing it.
    pub async fn delete_history_item(&mut self, term: &str, click: &mut RowClick) {
        click.stop_propagation();
        self.history.remove(term).await;
    }

    pub async fn clear_history(&mut self) {
        self.history.clear().await;
        self.state.history_visible = false;
    }

    pub fn toggle_source(&mut self, source: &str) {
        if let Some(pos) = self.state.selected_sources.iter().position(|s| s == source) {
            self.state.selected_sources.remove(pos);
        } else {
            self.state.selected_sources.push(source.to_string());
        }
    }

    pub fn set_sources(&mut self, sources: &[&str]) {
        self.state.selected_sources.clear();
        for source in sources {
            if !self.state.selected_sources.iter().any(|s| s == source) {
                self.state.selected_sources.push((*source).to_string());
            }
        }
    }

    /// Overwrites text and sources from the URL when on the search route and the
    /// query changed since the last sync. Never commits. Returns whether it applied.
    pub fn sync_from_route(&mut self) -> bool {
        if self.router.current_path() != self.search_route {
            self.last_synced_query = None;
            return false;
        }

        let query = self.router.current_query();
        if self.last_synced_query.as_ref() == Some(&query) {
            return false;
        }

        let term = self
            .router
            .query_param(QUERY_PARAM)
            .map(|q| decode_term(&q))
            .unwrap_or_default();
        let sources: Vec<String> = self
            .router
            .query_param(SOURCES_PARAM)
            .map(|s| {
                s.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        self.state.search_text = term;
        self.state.selected_sources.clear();
        for source in sources {
            if !self.state.selected_sources.contains(&source) {
                self.state.selected_sources.push(source);
            }
        }
        self.last_synced_query = Some(query);
        true
    }

    fn destination(&self, term: &str) -> NavigationIntent {
        let mut query = vec![(QUERY_PARAM.to_string(), term.to_string())];
        if !self.state.selected_sources.is_empty() {
            query.push((
                SOURCES_PARAM.to_string(),
                self.state.selected_sources.join(","),
            ));
        }
        NavigationIntent::new(self.search_route.clone(), query)
    }

    fn show_suggestions(&mut self) {
        self.state.suggestions_visible = true;
        self.state.history_visible = false;
    }

    fn show_history(&mut self) {
        self.state.history_visible = true;
        self.state.suggestions_visible = false;
    }

    fn hide_popups(&mut self) {
        self.state.suggestions_visible = false;
        self.state.history_visible = false;
    }
}

/// Query values arrive form-decoded; a term may still carry a second layer of
/// percent-encoding from a shared link.
fn decode_term(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
