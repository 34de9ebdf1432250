// navsync services
// Services provide logic over the managers: route matching, preferences, search interaction.

pub mod config_loader;
pub mod dismiss;
pub mod preference_store;
pub mod route_matcher;
pub mod routing;
pub mod search_controller;
