//! Record types held by the catalog.
//!
//! Records are plain data deserialised from the reference YAML. They are never mutated after the
//! catalog is built.

mod disease;
mod remedy;

pub use disease::{Disease, Severity};
pub use remedy::{Category, Effectiveness, Remedy};
