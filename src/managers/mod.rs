// navsync state managers
// Managers own shared mutable state: search history, the navigation loading flag, nav shells.

pub mod nav_shell;
pub mod navigation_loading;
pub mod search_history_store;
