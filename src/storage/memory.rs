//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Entries;
use super::Result;
use super::Storage;

/// An in-memory storage
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All entries in storage
    entries: Arc<Mutex<Entries>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for Memory {
    async fn load(&self) -> Entries {
        self.entries.lock().await.clone()
    }

    async fn save(&self, entries: &Entries) -> Result<()> {
        entries.clone_into(&mut *self.entries.lock().await);

        Ok(())
    }
}
