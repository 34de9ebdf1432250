//! navsync demo: a scripted session over an in-memory app, printing each step.
//!
//! Set `NAVSYNC_LOG=debug` to see the store and navigation traces.

use std::rc::Rc;

use navsync::app::NavApp;
use navsync::logging;
use navsync::managers::nav_shell::{NavShell, StaticCategories};
use navsync::services::config_loader::ConfigLoader;
use navsync::services::routing::{MemoryRouter, Router};
use navsync::types::nav::Category;
use navsync::types::preference::simple_mode_key;
use navsync::types::search::{PointerDown, RowClick};

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_nav(shell: &NavShell) {
    for item in shell.visible_entries() {
        let marker = if item.active { "*" } else { " " };
        println!("  [{}] {:<6} {}", marker, item.entry.label, item.entry.href);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let config = match ConfigLoader::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("config error: {}, using defaults", e);
            Default::default()
        }
    };
    let app = NavApp::in_memory(config);
    let router = Rc::new(MemoryRouter::new("/"));
    let categories = Rc::new(StaticCategories(vec![Category {
        name: "纪录片".to_string(),
        query: "documentary".to_string(),
    }]));

    section("Mobile bottom bar");
    let mut bottom = app.bottom_nav(router.clone(), categories.clone());
    println!("  before mount: {} visible entries", bottom.visible_entries().len());
    bottom.mount().await;
    print_nav(&bottom);

    section("Navigate to a category");
    bottom.click("/douban?type=movie");
    println!("  loading: {}", app.loading.is_loading());
    app.loading.clear();
    router.set_location("/douban?type=movie&page=2");
    bottom.set_active_path(Some(&router.current_location()));
    print_nav(&bottom);

    section("Search");
    let mut search = app.search_controller(router.clone());
    search.mount().await;
    search.on_focus().await;
    println!("  history popup: {}", search.state().history_visible);
    search.on_text_changed("Inception");
    println!("  suggestions popup: {}", search.state().suggestions_visible);
    if let Some(intent) = search.on_enter().await {
        println!("  navigated to {}", intent.to_href());
    }
    app.loading.clear();
    search.choose_suggestion("Matrix").await;
    search.click_history_item("Inception").await;
    println!("  history: {:?}", search.history_items());

    search.clear_text();
    search.on_focus().await;
    search.on_pointer_down(&PointerDown::outside());
    println!("  history popup after outside click: {}", search.state().history_visible);

    let mut click = RowClick::new();
    search.delete_history_item("Matrix", &mut click).await;
    println!("  after delete: {:?}", search.history_items());

    section("Simple mode");
    if let Err(e) = app
        .preferences
        .set(&simple_mode_key(&app.config.simple_mode_key), &true)
        .await
    {
        eprintln!("  could not save simple mode: {}", e);
    }
    let mut top = app.top_nav(router.clone(), categories);
    top.mount().await;
    bottom.mount().await;
    println!("  bottom bar in simple mode:");
    print_nav(&bottom);
    println!("  top bar in simple mode: {} entries", top.visible_entries().len());
    println!("  current location: {}", router.current_location());

    search.unmount();
}
