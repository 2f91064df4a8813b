/// Persisted snapshot list for chrome.storage.local

use crate::error::SnapshotError;
use crate::host::TabHost;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Storage key holding the snapshot array
pub const SNAPSHOTS_KEY: &str = "snapshots";

/// Ordered list of snapshots. Snapshots are addressed by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotStore {
    pub snapshots: Vec<Snapshot>,
}

/// Import files hold either the exported array or a single snapshot
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Many(Vec<Snapshot>),
    One(Snapshot),
}

impl SnapshotStore {
    pub fn new() -> Self {
        SnapshotStore {
            snapshots: Vec::new(),
        }
    }

    pub async fn load<H: TabHost>(host: &H) -> Result<Self, SnapshotError> {
        let snapshots = host.read_snapshots().await?.unwrap_or_default();
        Ok(SnapshotStore { snapshots })
    }

    pub async fn save<H: TabHost>(&self, host: &H) -> Result<(), SnapshotError> {
        host.write_snapshots(&self.snapshots).await
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn add(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn delete(&mut self, index: usize) -> Result<Snapshot, SnapshotError> {
        if index < self.snapshots.len() {
            Ok(self.snapshots.remove(index))
        } else {
            Err(SnapshotError::InvalidIndex)
        }
    }

    pub fn rename(&mut self, index: usize, new_name: String) -> Result<(), SnapshotError> {
        let snapshot = self
            .snapshots
            .get_mut(index)
            .ok_or(SnapshotError::InvalidIndex)?;
        snapshot.name = new_name;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.snapshots)?)
    }

    /// Parse the contents of an exported file
    pub fn parse_import(text: &str) -> Result<Vec<Snapshot>, SnapshotError> {
        match serde_json::from_str::<ImportFile>(text) {
            Ok(ImportFile::Many(snapshots)) => Ok(snapshots),
            Ok(ImportFile::One(snapshot)) => Ok(vec![snapshot]),
            Err(e) => Err(SnapshotError::InvalidImport(e.to_string())),
        }
    }

    /// Append imported snapshots after the existing ones
    pub fn import(&mut self, snapshots: Vec<Snapshot>) -> usize {
        let count = snapshots.len();
        self.snapshots.extend(snapshots);
        count
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
