/// Browser API abstraction used by the snapshot service
use crate::error::SnapshotError;
use crate::snapshot::{GroupColor, Snapshot, TabGroup, TabInfo};

/// The slice of the browser extension API that snapshot operations rely on.
///
/// Every call is asynchronous on the host side. Implementations map host
/// failures to `SnapshotError::Host`.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// Open tab groups, optionally restricted to one window
    async fn query_groups(&self, window_id: Option<i32>) -> Result<Vec<TabGroup>, SnapshotError>;

    /// Tabs currently in a group
    async fn query_group_tabs(&self, group_id: i32) -> Result<Vec<TabInfo>, SnapshotError>;

    async fn current_window_id(&self) -> Result<i32, SnapshotError>;

    /// Open a new tab and return its id
    async fn create_tab(&self, window_id: i32, url: &str) -> Result<i32, SnapshotError>;

    /// Move tabs into `group_id`, or into a fresh group when `None`.
    /// Returns the id of the group the tabs ended up in.
    async fn group_tabs(&self, tab_ids: &[i32], group_id: Option<i32>) -> Result<i32, SnapshotError>;

    async fn update_group(&self, group_id: i32, title: &str, color: GroupColor) -> Result<(), SnapshotError>;

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), SnapshotError>;

    /// Contents of the `snapshots` storage key, `None` when never written
    async fn read_snapshots(&self) -> Result<Option<Vec<Snapshot>>, SnapshotError>;

    async fn write_snapshots(&self, snapshots: &[Snapshot]) -> Result<(), SnapshotError>;
}
