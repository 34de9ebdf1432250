//! navsync: navigation, search-history and preference state for a media browsing UI.
//!
//! Keeps independently mounted surfaces (desktop bar, mobile bar, search box and its
//! popups) consistent with the current route, a persisted simple mode flag and a shared
//! persisted search history.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod services;
pub mod storage;
pub mod types;
