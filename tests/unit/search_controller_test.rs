//! Unit tests for SearchInteractionController transitions, commits and URL sync.

use std::rc::Rc;

use navsync::app::NavApp;
use navsync::services::routing::{MemoryRouter, Router};
use navsync::services::search_controller::SearchInteractionController;
use navsync::types::config::NavigationConfig;
use navsync::types::search::{PointerDown, RegionId, RowClick};

fn setup(href: &str) -> (NavApp, Rc<MemoryRouter>, SearchInteractionController) {
    let app = NavApp::in_memory(NavigationConfig::default());
    let router = Rc::new(MemoryRouter::new(href));
    let controller = app.search_controller(router.clone());
    (app, router, controller)
}

fn assert_exclusive(controller: &SearchInteractionController) {
    let state = controller.state();
    assert!(
        !(state.suggestions_visible && state.history_visible),
        "popups must never both be visible: {:?}",
        state
    );
}

#[tokio::test]
async fn test_typing_shows_suggestions_and_hides_history() {
    let (_app, _router, mut c) = setup("/");
    c.mount().await;
    c.on_focus().await;
    assert!(c.state().history_visible);

    c.on_text_changed("abc");
    assert!(c.state().suggestions_visible);
    assert!(!c.state().history_visible);
    assert_eq!(c.state().search_text, "abc");
    assert_exclusive(&c);
}

#[tokio::test]
async fn test_clearing_text_hides_both() {
    let (_app, _router, mut c) = setup("/");
    c.on_text_changed("abc");
    c.on_text_changed("");
    assert!(!c.state().suggestions_visible);
    assert!(!c.state().history_visible);
    assert!(c.state().search_text.is_empty());
}

#[tokio::test]
async fn test_focus_with_text_shows_suggestions() {
    let (_app, _router, mut c) = setup("/");
    c.on_text_changed("dune");
    c.on_pointer_down(&PointerDown::outside());
    c.on_focus().await;
    assert!(c.state().suggestions_visible);
    assert!(!c.state().history_visible);
}

#[tokio::test]
async fn test_focus_without_text_loads_history_lazily() {
    let (app, _router, mut c) = setup("/");
    app.history.add("Matrix").await;

    // Not mounted: nothing cached yet, focus must fetch.
    c.on_focus().await;
    assert!(c.state().history_visible);
    assert_eq!(c.history_items(), vec!["Matrix"]);
}

#[tokio::test]
async fn test_mounted_controller_tracks_other_writers() {
    let (app, router, mut c) = setup("/");
    c.mount().await;

    let mut other = app.search_controller(router.clone());
    other.commit("Inception").await;

    assert_eq!(c.history_items(), vec!["Inception"]);
}

#[tokio::test]
async fn test_unmounted_controller_stops_tracking() {
    let (app, _router, mut c) = setup("/");
    c.mount().await;
    c.unmount();
    c.unmount();
    assert!(!c.is_mounted());

    app.history.add("Later").await;
    assert!(c.history_items().is_empty());
    assert_eq!(app.history.get_all().await, vec!["Later"]);
}

#[tokio::test]
async fn test_outside_click_hides_history_only_outside_regions() {
    let (_app, _router, mut c) = setup("/");
    c.on_focus().await;

    c.on_pointer_down(&PointerDown::inside(&[RegionId::HistoryPopup]));
    assert!(c.state().history_visible);
    c.on_pointer_down(&PointerDown::inside(&[RegionId::HistoryTrigger]));
    assert!(c.state().history_visible);

    c.on_pointer_down(&PointerDown::inside(&[RegionId::SuggestionPopup]));
    assert!(!c.state().history_visible);
}

#[tokio::test]
async fn test_outside_click_leaves_suggestions_alone() {
    let (_app, _router, mut c) = setup("/");
    c.on_text_changed("dune");
    c.on_pointer_down(&PointerDown::outside());
    assert!(c.state().suggestions_visible);
}

#[tokio::test]
async fn test_commit_from_home_starts_loading_once() {
    let (app, router, mut c) = setup("/");
    let mut rx = app.loading.watch();
    rx.borrow_and_update();

    c.on_text_changed("dune");
    let intent = c.on_enter().await.expect("commit should navigate");

    assert!(app.loading.is_loading());
    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();
    assert!(!app.loading.start(), "commit already started loading");
    assert!(!rx.has_changed().unwrap(), "exactly one loading transition");
    assert_eq!(intent.to_href(), "/search?q=dune");
    assert_eq!(router.navigations(), vec![intent]);
    assert!(!c.state().suggestions_visible);
    assert!(!c.state().history_visible);
    assert_eq!(app.history.get_all().await, vec!["dune"]);
}

#[tokio::test]
async fn test_commit_on_search_route_does_not_start_loading() {
    let (app, router, mut c) = setup("/search?q=dune");
    c.commit("dune").await;

    assert!(!app.loading.is_loading());
    assert_eq!(router.navigations().len(), 1);
}

#[tokio::test]
async fn test_focus_with_whitespace_text_shows_suggestions() {
    let (_app, _router, mut c) = setup("/");
    c.on_text_changed("  ");
    assert!(!c.state().suggestions_visible);

    c.on_focus().await;
    assert!(c.state().suggestions_visible);
    assert!(!c.state().history_visible);
}

#[tokio::test]
async fn test_blank_commit_is_ignored() {
    let (app, router, mut c) = setup("/");
    assert!(c.commit("   ").await.is_none());
    c.on_text_changed("  ");
    assert!(c.on_enter().await.is_none());

    assert!(router.navigations().is_empty());
    assert!(!app.loading.is_loading());
    assert!(app.history.get_all().await.is_empty());
}

#[tokio::test]
async fn test_commit_includes_selected_sources() {
    let (_app, _router, mut c) = setup("/");
    c.toggle_source("tmdb");
    c.toggle_source("douban");
    c.toggle_source("tmdb");
    c.toggle_source("bili");

    let intent = c.choose_suggestion("Dune").await.unwrap();
    assert_eq!(
        intent.query,
        vec![
            ("q".to_string(), "Dune".to_string()),
            ("sources".to_string(), "douban,bili".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_history_click_commits_and_moves_to_front() {
    let (app, _router, mut c) = setup("/");
    c.mount().await;
    app.history.add("A").await;
    app.history.add("B").await;

    c.on_focus().await;
    c.click_history_item("A").await;

    assert_eq!(c.history_items(), vec!["A", "B"]);
    assert_eq!(c.state().search_text, "A");
    assert!(!c.state().history_visible);
}

#[tokio::test]
async fn test_delete_history_item_stops_propagation_and_keeps_popup() {
    let (app, router, mut c) = setup("/");
    c.mount().await;
    app.history.add("A").await;
    app.history.add("B").await;
    c.on_focus().await;

    let mut click = RowClick::new();
    c.delete_history_item("A", &mut click).await;

    assert!(click.is_propagation_stopped());
    assert!(c.state().history_visible);
    assert_eq!(c.history_items(), vec!["B"]);
    assert!(router.navigations().is_empty());
}

#[tokio::test]
async fn test_clear_history_hides_popup() {
    let (app, _router, mut c) = setup("/");
    c.mount().await;
    app.history.add("A").await;
    c.on_focus().await;

    c.clear_history().await;
    assert!(!c.state().history_visible);
    assert!(c.history_items().is_empty());
}

#[tokio::test]
async fn test_route_sync_overwrites_text_and_sources_without_commit() {
    let (app, router, mut c) = setup("/search?q=%25E6%2598%259F&sources=a,b");
    c.mount().await;

    assert_eq!(c.state().search_text, "星");
    assert_eq!(c.state().selected_sources, vec!["a", "b"]);
    assert!(router.navigations().is_empty());
    assert!(app.history.get_all().await.is_empty());

    router.set_location("/search?q=dune");
    assert!(c.sync_from_route());
    assert_eq!(c.state().search_text, "dune");
    assert!(c.state().selected_sources.is_empty());

    // Same query again is not re-applied.
    c.on_text_changed("dun");
    assert!(!c.sync_from_route());
    assert_eq!(c.state().search_text, "dun");
}

#[tokio::test]
async fn test_route_sync_ignored_off_search_route() {
    let (_app, router, mut c) = setup("/douban?q=zzz");
    c.on_text_changed("typed");
    assert!(!c.sync_from_route());
    assert_eq!(c.state().search_text, "typed");
    assert_eq!(router.current_path(), "/douban");
}
