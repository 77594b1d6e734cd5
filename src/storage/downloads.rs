//! Download bookkeeping
//!
//! Append-only record of names successfully read during a session, kept
//! for reporting only.

#[derive(Debug, Clone, Default)]
pub struct DownloadRecord {
    names: Vec<String>,
}

impl DownloadRecord {
    /// Records a name unless already present. Returns true if it was new.
    pub fn record(&mut self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Names in first-read order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
