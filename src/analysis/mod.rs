//! Startup analysis of the dashboard definition.
mod error;
pub mod validation;

pub use error::ConfigurationError;
pub use validation::{validate, Resolved};
