//! File system storage management
//!
//! Per-account flat file namespaces, name validation and the file system
//! helpers shared with the credential store.

pub mod downloads;
pub mod filesystem;
pub mod results;
pub mod store;
pub mod validation;

pub use downloads::DownloadRecord;
pub use results::DeleteAllReport;
pub use store::{AccountFileStore, word_count};
pub use validation::{normalize_file_name, resolve_file_path};
