//! Shared error taxonomy and helpers used across all edgecloud crates.

pub mod error;

pub use error::{Error, FromMessage, Result, require_non_blank};
