//! Utility functions
//!
//! Provides logging setup and shared input validation.

pub mod logging;
pub mod validation;
