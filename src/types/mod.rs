// navsync shared type definitions
// Each submodule defines plain data used across stores, controllers and shells.

pub mod config;
pub mod errors;
pub mod history;
pub mod nav;
pub mod preference;
pub mod search;
