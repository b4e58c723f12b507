//! Mover marketplace listings: movers with their statistics, movers a
//! customer liked, and open estimate requests, all cursor-paginated.

// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::model;

// === INTERNAL MODULES ===
// Exposed for integration tests and the server binary.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
pub mod module;

pub use config::MoversConfig;
pub use module::{migrate, router};
