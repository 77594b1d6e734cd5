//! Error handling
//!
//! Defines error types and handling for the cloud store.

pub mod handlers;
pub mod types;

pub use handlers::{ErrorKind, classify, handle_error};
pub use types::*;
