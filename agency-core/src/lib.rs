//! agency-core: Shared infrastructure for the agency API workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use error::CoreError;
