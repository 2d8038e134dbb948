//! File storage
//!
//! Entries live in a single pretty-printed JSON object on disk

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::Entries;
use super::Error;
use super::Result;
use super::Storage;

/// A JSON file storage
#[derive(Clone, Debug)]
pub struct File {
    /// Location of the JSON document
    path: Arc<PathBuf>,
}

impl File {
    /// Create a file storage for the given path
    ///
    /// The file does not have to exist yet, it is created on the first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Location of the JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file used to replace the document in one go
    fn temporary_path(&self) -> PathBuf {
        let mut path = OsString::from(self.path.as_os_str());
        path.push(".tmp");

        PathBuf::from(path)
    }
}

#[async_trait]
impl Storage for File {
    async fn load(&self) -> Entries {
        let contents = match tokio::fs::read_to_string(self.path()).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("No entries yet, {} does not exist", self.path.display());
                return Entries::new();
            }
            Err(err) => {
                tracing::warn!(
                    "Could not read {}, continuing without entries: {err}",
                    self.path.display()
                );
                return Entries::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(
                "Corrupt entries in {}, continuing without entries: {err}",
                self.path.display()
            );
            Entries::new()
        })
    }

    async fn save(&self, entries: &Entries) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(entries).map_err(|err| Error::Write(err.to_string()))?;

        let temporary_path = self.temporary_path();

        tokio::fs::write(&temporary_path, contents)
            .await
            .map_err(|err| Error::Write(format!("{}: {err}", temporary_path.display())))?;

        tokio::fs::rename(&temporary_path, self.path())
            .await
            .map_err(|err| Error::Write(format!("{}: {err}", self.path.display())))
    }
}
