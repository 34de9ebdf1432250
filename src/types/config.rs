use serde::{Deserialize, Serialize};

/// Navigation and search configuration.
///
/// Every field has a default, so a partial config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum number of remembered search terms (N).
    pub history_capacity: usize,
    /// Storage key holding the serialized search history list.
    pub history_key: String,
    /// Storage key holding the JSON-boolean simple mode flag.
    pub simple_mode_key: String,
    /// Path prefix of the category-family route.
    pub category_prefix: String,
    pub search_route: String,
    pub home_route: String,
    pub favorites_route: String,
    /// Vertical scroll offset (px) past which the top bar renders compact.
    pub scroll_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            history_capacity: 20,
            history_key: "searchHistory".to_string(),
            simple_mode_key: "simpleMode".to_string(),
            category_prefix: "/douban".to_string(),
            search_route: "/search".to_string(),
            home_route: "/".to_string(),
            favorites_route: "/favorites".to_string(),
            scroll_threshold: 10.0,
        }
    }
}
