//! # API Shared
//!
//! Shared definitions for the lung catalog surfaces.
//!
//! Contains:
//! - JSON response types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and `lung-cli` so both render the same shapes.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
