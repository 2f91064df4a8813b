/// Snapshot operations run by the background worker.
///
/// Each operation is one linear sequence of host calls. Calls that do not
/// depend on each other are awaited together.

use crate::error::SnapshotError;
use crate::host::TabHost;
use crate::matching::{open_groups_matching_group, open_groups_matching_snapshot, saved_group_for};
use crate::messages::{Request, Response};
use crate::snapshot::{GroupSnapshot, Snapshot, TabGroup};
use crate::storage::SnapshotStore;
use futures::future::{join_all, try_join_all};

/// Index for delete and rename; negative positions are out of range
fn valid_index(index: i64) -> Result<usize, SnapshotError> {
    usize::try_from(index).map_err(|_| SnapshotError::InvalidIndex)
}

/// Index for operations that look a snapshot up; negative positions hold nothing
fn existing_index(index: i64) -> Result<usize, SnapshotError> {
    usize::try_from(index).map_err(|_| SnapshotError::NotFound)
}

pub struct SnapshotService<H: TabHost> {
    host: H,
}

impl<H: TabHost> SnapshotService<H> {
    pub fn new(host: H) -> Self {
        SnapshotService { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Run a request and build the reply for `sendResponse`
    pub async fn handle(&self, request: Request) -> Response {
        let result = match request {
            Request::ListGroups => self
                .list_groups()
                .await
                .map(|groups| Response::Groups { groups }),
            Request::TakeSnapshot { group_ids, name } => self
                .take_snapshot(&group_ids, name)
                .await
                .map(|_| Response::done()),
            Request::RestoreSnapshot { snapshot_index } => match existing_index(snapshot_index) {
                Ok(index) => self.restore_snapshot(index).await.map(|_| Response::done()),
                Err(e) => Err(e),
            },
            Request::RestoreOpenFromSnapshot { snapshot_index } => match existing_index(snapshot_index) {
                Ok(index) => self.merge_snapshot(index).await.map(|_| Response::done()),
                Err(e) => Err(e),
            },
            Request::CloseSnapshotGroups { snapshot_index } => match existing_index(snapshot_index) {
                Ok(index) => self.close_snapshot_groups(index).await.map(|_| Response::done()),
                Err(e) => Err(e),
            },
            Request::DeleteSnapshot { snapshot_index } => match valid_index(snapshot_index) {
                Ok(index) => self.delete_snapshot(index).await.map(|_| Response::done()),
                Err(e) => Err(e),
            },
            Request::RenameSnapshot {
                snapshot_index,
                new_name,
            } => match valid_index(snapshot_index) {
                Ok(index) => self
                    .rename_snapshot(index, new_name)
                    .await
                    .map(|_| Response::done()),
                Err(e) => Err(e),
            },
            Request::ExportSnapshots => self
                .export_snapshots()
                .await
                .map(|json| Response::Exported { success: true, json }),
            Request::ImportSnapshots { snapshots } => self
                .import_snapshots(snapshots)
                .await
                .map(|imported| Response::Imported {
                    success: true,
                    imported,
                }),
        };

        if let Err(e) = &result {
            match e {
                SnapshotError::Host(_) | SnapshotError::Serialization(_) => log::error!("{}", e),
                _ => log::warn!("Request rejected: {}", e),
            }
        }

        result.into()
    }

    pub async fn list_groups(&self) -> Result<Vec<TabGroup>, SnapshotError> {
        self.host.query_groups(None).await
    }

    /// Capture the selected groups and append them as a new snapshot
    pub async fn take_snapshot(&self, group_ids: &[i32], name: String) -> Result<Snapshot, SnapshotError> {
        let all_groups = self.host.query_groups(None).await?;
        let selected: Vec<&TabGroup> = all_groups
            .iter()
            .filter(|group| group_ids.contains(&group.id))
            .collect();

        let member_tabs = try_join_all(selected.iter().map(|group| self.host.query_group_tabs(group.id))).await?;

        let groups: Vec<GroupSnapshot> = selected
            .iter()
            .zip(member_tabs.iter())
            .map(|(group, tabs)| GroupSnapshot::capture(group, tabs))
            .collect();

        let snapshot = Snapshot { name, groups };

        let mut store = SnapshotStore::load(&self.host).await?;
        store.add(snapshot.clone());
        store.save(&self.host).await?;

        log::info!(
            "Saved snapshot '{}' with {} groups and {} tabs",
            snapshot.name,
            snapshot.groups.len(),
            snapshot.tab_count()
        );
        Ok(snapshot)
    }

    /// Recreate every group of the snapshot as new tabs in the current
    /// window, then close the open groups it replaces.
    ///
    /// A group whose tabs partly fail to open is still recreated from the
    /// tabs that did open; the first failure is reported once every group
    /// has been handled.
    pub async fn restore_snapshot(&self, index: usize) -> Result<(), SnapshotError> {
        let snapshot = self.load_snapshot(index).await?;
        let window_id = self.host.current_window_id().await?;
        let existing = self.host.query_groups(Some(window_id)).await?;

        let to_recreate: Vec<&GroupSnapshot> = snapshot
            .groups
            .iter()
            .filter(|saved| !saved.tabs.is_empty())
            .collect();
        let outcomes = join_all(
            to_recreate
                .iter()
                .map(|saved| self.recreate_group(window_id, saved)),
        )
        .await;

        // Only groups that were recreated replace their open counterparts
        let mut replaced: Vec<&TabGroup> = Vec::new();
        for (saved, outcome) in to_recreate.iter().zip(outcomes.iter()) {
            if outcome.is_err() {
                continue;
            }
            for open in open_groups_matching_group(&existing, saved) {
                if !replaced.iter().any(|g| g.id == open.id) {
                    replaced.push(open);
                }
            }
        }
        let stale_tabs = self.tabs_of_groups(&replaced).await?;
        self.remove_tabs(&stale_tabs).await?;

        log::info!(
            "Restored snapshot {} into window {} ({} groups replaced)",
            index,
            window_id,
            replaced.len()
        );

        let first_failure = outcomes.into_iter().find_map(|outcome| match outcome {
            Ok(partial) => partial,
            Err(e) => Some(e),
        });
        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Replace the tabs of open groups that match the snapshot with the
    /// saved tabs. Saved groups with no open counterpart are ignored.
    pub async fn merge_snapshot(&self, index: usize) -> Result<(), SnapshotError> {
        let snapshot = self.load_snapshot(index).await?;
        let window_id = self.host.current_window_id().await?;
        let existing = self.host.query_groups(Some(window_id)).await?;
        let targets = open_groups_matching_snapshot(&existing, &snapshot);

        let outcomes = join_all(
            targets
                .iter()
                .map(|open| self.merge_group(window_id, open, &snapshot)),
        )
        .await;

        log::info!("Merged snapshot {} into {} open groups", index, targets.len());
        outcomes.into_iter().collect()
    }

    /// Close every tab in open groups of the current window that match the snapshot
    pub async fn close_snapshot_groups(&self, index: usize) -> Result<(), SnapshotError> {
        let snapshot = self.load_snapshot(index).await?;
        let window_id = self.host.current_window_id().await?;
        let existing = self.host.query_groups(Some(window_id)).await?;
        let targets = open_groups_matching_snapshot(&existing, &snapshot);

        let tab_ids = self.tabs_of_groups(&targets).await?;
        self.remove_tabs(&tab_ids).await?;

        log::info!("Closed {} tabs from {} groups", tab_ids.len(), targets.len());
        Ok(())
    }

    pub async fn delete_snapshot(&self, index: usize) -> Result<(), SnapshotError> {
        let mut store = SnapshotStore::load(&self.host).await?;
        let removed = store.delete(index)?;
        store.save(&self.host).await?;
        log::info!("Deleted snapshot '{}'", removed.name);
        Ok(())
    }

    pub async fn rename_snapshot(&self, index: usize, new_name: String) -> Result<(), SnapshotError> {
        let mut store = SnapshotStore::load(&self.host).await?;
        store.rename(index, new_name)?;
        store.save(&self.host).await
    }

    pub async fn export_snapshots(&self) -> Result<String, SnapshotError> {
        SnapshotStore::load(&self.host).await?.export_json()
    }

    pub async fn import_snapshots(&self, snapshots: Vec<Snapshot>) -> Result<usize, SnapshotError> {
        let mut store = SnapshotStore::load(&self.host).await?;
        let imported = store.import(snapshots);
        store.save(&self.host).await?;
        log::info!("Imported {} snapshots", imported);
        Ok(imported)
    }

    async fn load_snapshot(&self, index: usize) -> Result<Snapshot, SnapshotError> {
        SnapshotStore::load(&self.host)
            .await?
            .get(index)
            .cloned()
            .ok_or(SnapshotError::NotFound)
    }

    /// `Err` when no group could be made; `Ok(Some(_))` when the group was
    /// made but some of its tabs failed to open
    async fn recreate_group(&self, window_id: i32, saved: &GroupSnapshot) -> Result<Option<SnapshotError>, SnapshotError> {
        let (tab_ids, failure) = self.create_tabs(window_id, saved).await;
        if tab_ids.is_empty() {
            return Err(failure.unwrap_or_else(|| SnapshotError::Host("No tabs were created".to_string())));
        }

        let group_id = match self.host.group_tabs(&tab_ids, None).await {
            Ok(id) => id,
            Err(e) => {
                // Don't leave the new tabs behind ungrouped
                if let Err(cleanup) = self.remove_tabs(&tab_ids).await {
                    log::warn!("Could not close ungrouped tabs: {}", cleanup);
                }
                return Err(e);
            }
        };
        self.host.update_group(group_id, &saved.title, saved.color).await?;
        Ok(failure)
    }

    async fn merge_group(&self, window_id: i32, open: &TabGroup, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let Some(saved) = saved_group_for(open, snapshot) else {
            return Ok(());
        };
        if saved.tabs.is_empty() {
            return Ok(());
        }

        let old_tabs = self.host.query_group_tabs(open.id).await?;
        let (new_tabs, failure) = self.create_tabs(window_id, saved).await;
        if new_tabs.is_empty() {
            return Err(failure.unwrap_or_else(|| SnapshotError::Host("No tabs were created".to_string())));
        }

        let group_id = self.host.group_tabs(&new_tabs, Some(open.id)).await?;
        self.host.update_group(group_id, &saved.title, saved.color).await?;

        let old_ids: Vec<i32> = old_tabs.iter().map(|tab| tab.id).collect();
        self.remove_tabs(&old_ids).await?;

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Open the saved tabs. Returns the ids that opened and the first failure.
    async fn create_tabs(&self, window_id: i32, saved: &GroupSnapshot) -> (Vec<i32>, Option<SnapshotError>) {
        let results = join_all(saved.tabs.iter().map(|tab| self.host.create_tab(window_id, &tab.url))).await;

        let mut created = Vec::with_capacity(results.len());
        let mut failure = None;
        for (tab, result) in saved.tabs.iter().zip(results) {
            match result {
                Ok(id) => created.push(id),
                Err(e) => {
                    log::warn!("Could not open {}: {}", tab.url, e);
                    failure.get_or_insert(e);
                }
            }
        }
        (created, failure)
    }

    async fn tabs_of_groups(&self, groups: &[&TabGroup]) -> Result<Vec<i32>, SnapshotError> {
        let per_group = try_join_all(groups.iter().map(|group| self.host.query_group_tabs(group.id))).await?;
        Ok(per_group.into_iter().flatten().map(|tab| tab.id).collect())
    }

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), SnapshotError> {
        if tab_ids.is_empty() {
            return Ok(());
        }
        self.host.remove_tabs(tab_ids).await
    }
}
