//! App Core for navsync.
//!
//! Composition root: builds one storage backend and one of each shared store, then hands
//! clones of them to every component it creates.

use std::path::Path;
use std::rc::Rc;

use tracing::{info, warn};

use crate::database::Database;
use crate::managers::nav_shell::{CategoryProvider, NavShell};
use crate::managers::navigation_loading::NavigationLoadingSignal;
use crate::managers::search_history_store::SearchHistoryStore;
use crate::services::preference_store::PersistentPreferenceStore;
use crate::services::route_matcher::RouteMatcher;
use crate::services::routing::Router;
use crate::services::search_controller::SearchInteractionController;
use crate::storage::{KeyValueStorage, MemoryStorage, SqliteStorage, UnavailableStorage};
use crate::types::config::NavigationConfig;
use crate::types::nav::NavSurface;

pub struct NavApp {
    pub config: NavigationConfig,
    pub storage: Rc<dyn KeyValueStorage>,
    pub history: SearchHistoryStore,
    pub preferences: PersistentPreferenceStore,
    pub loading: NavigationLoadingSignal,
    pub matcher: RouteMatcher,
}

impl NavApp {
    /// Opens the SQLite-backed app at `db_path`.
    ///
    /// If the database cannot be opened the app still starts, on storage that rejects
    /// every call: the session works in memory and nothing survives a reload.
    pub fn open<P: AsRef<Path>>(db_path: P, config: NavigationConfig) -> Self {
        let storage: Rc<dyn KeyValueStorage> = match Database::open(db_path.as_ref()) {
            Ok(db) => Rc::new(SqliteStorage::new(db)),
            Err(e) => {
                warn!(error = %e, path = %db_path.as_ref().display(), "database unavailable, persistence disabled");
                Rc::new(UnavailableStorage::new(e.to_string()))
            }
        };
        Self::with_storage(storage, config)
    }

    /// An app whose storage lives only as long as the process.
    pub fn in_memory(config: NavigationConfig) -> Self {
        Self::with_storage(Rc::new(MemoryStorage::new()), config)
    }

    pub fn with_storage(storage: Rc<dyn KeyValueStorage>, config: NavigationConfig) -> Self {
        let history = SearchHistoryStore::new(
            storage.clone(),
            &config.history_key,
            config.history_capacity,
        );
        let preferences = PersistentPreferenceStore::new(storage.clone());
        let matcher = RouteMatcher::new(&config.category_prefix);
        info!(capacity = config.history_capacity, "navsync app composed");

        Self {
            config,
            storage,
            history,
            preferences,
            loading: NavigationLoadingSignal::new(),
            matcher,
        }
    }

    pub fn search_controller(&self, router: Rc<dyn Router>) -> SearchInteractionController {
        SearchInteractionController::new(
            self.history.clone(),
            self.loading.clone(),
            router,
            self.matcher.clone(),
            &self.config.search_route,
        )
    }

    pub fn top_nav(&self, router: Rc<dyn Router>, categories: Rc<dyn CategoryProvider>) -> NavShell {
        self.nav_shell(NavSurface::TopBar, router, categories)
    }

    pub fn bottom_nav(&self, router: Rc<dyn Router>, categories: Rc<dyn CategoryProvider>) -> NavShell {
        self.nav_shell(NavSurface::BottomBar, router, categories)
    }

    fn nav_shell(
        &self,
        surface: NavSurface,
        router: Rc<dyn Router>,
        categories: Rc<dyn CategoryProvider>,
    ) -> NavShell {
        NavShell::new(
            surface,
            &self.config,
            router,
            self.preferences.clone(),
            self.loading.clone(),
            categories,
        )
    }
}
