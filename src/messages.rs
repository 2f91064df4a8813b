/// Messages exchanged between the popup and the background worker

use crate::error::SnapshotError;
use crate::snapshot::{Snapshot, TabGroup};
use serde::{Deserialize, Serialize};

/// A request sent with `chrome.runtime.sendMessage`, tagged by `action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    ListGroups,
    #[serde(rename_all = "camelCase")]
    TakeSnapshot { group_ids: Vec<i32>, name: String },
    #[serde(rename_all = "camelCase")]
    RestoreSnapshot { snapshot_index: i64 },
    #[serde(rename_all = "camelCase")]
    RestoreOpenFromSnapshot { snapshot_index: i64 },
    #[serde(rename_all = "camelCase")]
    CloseSnapshotGroups { snapshot_index: i64 },
    #[serde(rename_all = "camelCase")]
    DeleteSnapshot { snapshot_index: i64 },
    #[serde(rename_all = "camelCase")]
    RenameSnapshot { snapshot_index: i64, new_name: String },
    ExportSnapshots,
    ImportSnapshots { snapshots: Vec<Snapshot> },
}

/// Reply passed to `sendResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Groups { groups: Vec<TabGroup> },
    Exported { success: bool, json: String },
    Imported { success: bool, imported: usize },
    Done { success: bool },
    Failed { error: String },
}

impl Response {
    pub fn done() -> Response {
        Response::Done { success: true }
    }

    pub fn failed(error: &SnapshotError) -> Response {
        Response::Failed {
            error: error.to_string(),
        }
    }

    /// The error message carried by a failed response
    pub fn error(&self) -> Option<&str> {
        match self {
            Response::Failed { error } => Some(error),
            _ => None,
        }
    }
}

impl From<Result<Response, SnapshotError>> for Response {
    fn from(result: Result<Response, SnapshotError>) -> Self {
        result.unwrap_or_else(|e| Response::failed(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_names() {
        let request: Request = serde_json::from_value(json!({
            "action": "takeSnapshot",
            "groupIds": [3, 5],
            "name": "Evening"
        }))
        .unwrap();
        assert_eq!(
            request,
            Request::TakeSnapshot {
                group_ids: vec![3, 5],
                name: "Evening".to_string()
            }
        );

        let request: Request = serde_json::from_value(json!({
            "action": "restoreOpenFromSnapshot",
            "snapshotIndex": 2
        }))
        .unwrap();
        assert_eq!(request, Request::RestoreOpenFromSnapshot { snapshot_index: 2 });

        let request: Request = serde_json::from_value(json!({
            "action": "renameSnapshot",
            "snapshotIndex": 0,
            "newName": "Renamed"
        }))
        .unwrap();
        assert_eq!(
            request,
            Request::RenameSnapshot {
                snapshot_index: 0,
                new_name: "Renamed".to_string()
            }
        );

        let request: Request = serde_json::from_value(json!({ "action": "listGroups" })).unwrap();
        assert_eq!(request, Request::ListGroups);
    }

    #[test]
    fn test_request_field_checks() {
        assert!(serde_json::from_value::<Request>(json!({ "action": "explode" })).is_err());
        assert!(serde_json::from_value::<Request>(json!({ "action": "deleteSnapshot" })).is_err());

        let request: Request =
            serde_json::from_value(json!({ "action": "deleteSnapshot", "snapshotIndex": -1 })).unwrap();
        assert_eq!(request, Request::DeleteSnapshot { snapshot_index: -1 });
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(serde_json::to_value(Response::done()).unwrap(), json!({ "success": true }));
        assert_eq!(
            serde_json::to_value(Response::failed(&SnapshotError::NotFound)).unwrap(),
            json!({ "error": "Snapshot not found" })
        );
        assert_eq!(
            serde_json::to_value(Response::Imported { success: true, imported: 2 }).unwrap(),
            json!({ "success": true, "imported": 2 })
        );
    }

    #[test]
    fn test_response_parsing_prefers_specific_shapes() {
        let response: Response = serde_json::from_value(json!({ "success": true, "json": "[]" })).unwrap();
        assert_eq!(
            response,
            Response::Exported {
                success: true,
                json: "[]".to_string()
            }
        );

        let response: Response = serde_json::from_value(json!({ "error": "Invalid snapshot index" })).unwrap();
        assert_eq!(response.error(), Some("Invalid snapshot index"));
    }
}
