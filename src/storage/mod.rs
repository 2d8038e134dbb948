//! All things related to the storage of entries
//!
//! The whole slug to URL mapping is read and written as one document, there are no partial
//! updates. A load-mutate-save cycle is not guarded: when two requests interleave, the last
//! one to save wins.

use core::fmt;
use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;

pub use file::File;
#[cfg(test)]
pub use memory::Memory;

mod file;
#[cfg(test)]
mod memory;

/// All entries, mapping a slug to the URL it redirects to
pub type Entries = BTreeMap<String, String>;

/// Setup the storage
///
/// Entries are kept in a JSON file at the given path
pub fn setup(path: impl Into<PathBuf>) -> File {
    File::new(path)
}

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// Entries could not be written
    Write(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write(error) => write!(f, "Write error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Storage with all supported operations
#[async_trait]
pub trait Storage: Clone + Send + Sync + 'static {
    /// Load all entries
    ///
    /// Never fails: anything that can not be read results in an empty set of entries
    async fn load(&self) -> Entries;

    /// Replace all stored entries with the given entries
    async fn save(&self, entries: &Entries) -> Result<()>;
}
