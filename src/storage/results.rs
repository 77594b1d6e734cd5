//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Outcome of deleting every indexed file of an account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAllReport {
    pub succeeded: usize,
    /// Names whose removal failed, in index order
    pub failed: Vec<String>,
}

impl DeleteAllReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
