/// `TabHost` backed by the chrome.* extension APIs

use crate::error::SnapshotError;
use crate::host::TabHost;
use crate::snapshot::{GroupColor, Snapshot, TabGroup, TabInfo};
use crate::storage::SNAPSHOTS_KEY;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabGroups(window_id: Option<i32>) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryGroupTabs(group_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getCurrentWindowId() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(window_id: i32, url: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn groupTabs(tab_ids: JsValue, group_id: Option<i32>) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateTabGroup(group_id: i32, title: &str, color: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = sendMessage)]
    async fn send_message_js(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = downloadFile)]
    pub fn download_file(data: &str, filename: &str);
}

fn host_error(context: &str, e: JsValue) -> SnapshotError {
    SnapshotError::Host(format!("{}: {:?}", context, e))
}

fn as_i32(value: &JsValue, context: &str) -> Result<i32, SnapshotError> {
    value
        .as_f64()
        .map(|n| n as i32)
        .ok_or_else(|| SnapshotError::Host(format!("{}: expected a numeric id", context)))
}

/// Send a message to the background worker and wait for its reply
pub async fn send_message<T: Serialize, R: serde::de::DeserializeOwned>(message: &T) -> Result<R, SnapshotError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let message_js = message.serialize(&serializer)?;
    let reply = send_message_js(message_js)
        .await
        .map_err(|e| host_error("runtime.sendMessage", e))?;
    Ok(serde_wasm_bindgen::from_value(reply)?)
}

/// Read the stored snapshots directly, as the popup does when listing them
pub async fn load_snapshots() -> Result<Vec<Snapshot>, SnapshotError> {
    Ok(ChromeHost.read_snapshots().await?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeHost;

impl TabHost for ChromeHost {
    async fn query_groups(&self, window_id: Option<i32>) -> Result<Vec<TabGroup>, SnapshotError> {
        let groups_js = queryTabGroups(window_id)
            .await
            .map_err(|e| host_error("tabGroups.query", e))?;
        Ok(serde_wasm_bindgen::from_value(groups_js)?)
    }

    async fn query_group_tabs(&self, group_id: i32) -> Result<Vec<TabInfo>, SnapshotError> {
        let tabs_js = queryGroupTabs(group_id)
            .await
            .map_err(|e| host_error("tabs.query", e))?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn current_window_id(&self) -> Result<i32, SnapshotError> {
        let id = getCurrentWindowId()
            .await
            .map_err(|e| host_error("windows.getCurrent", e))?;
        as_i32(&id, "windows.getCurrent")
    }

    async fn create_tab(&self, window_id: i32, url: &str) -> Result<i32, SnapshotError> {
        let id = createTab(window_id, url)
            .await
            .map_err(|e| host_error("tabs.create", e))?;
        as_i32(&id, "tabs.create")
    }

    async fn group_tabs(&self, tab_ids: &[i32], group_id: Option<i32>) -> Result<i32, SnapshotError> {
        let tab_ids_js = serde_wasm_bindgen::to_value(tab_ids)?;
        let id = groupTabs(tab_ids_js, group_id)
            .await
            .map_err(|e| host_error("tabs.group", e))?;
        as_i32(&id, "tabs.group")
    }

    async fn update_group(&self, group_id: i32, title: &str, color: GroupColor) -> Result<(), SnapshotError> {
        updateTabGroup(group_id, title, color.as_str())
            .await
            .map_err(|e| host_error("tabGroups.update", e))?;
        Ok(())
    }

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), SnapshotError> {
        let tab_ids_js = serde_wasm_bindgen::to_value(tab_ids)?;
        removeTabs(tab_ids_js)
            .await
            .map_err(|e| host_error("tabs.remove", e))?;
        Ok(())
    }

    async fn read_snapshots(&self) -> Result<Option<Vec<Snapshot>>, SnapshotError> {
        let storage_js = getStorage(SNAPSHOTS_KEY)
            .await
            .map_err(|e| host_error("storage.local.get", e))?;

        if storage_js.is_null() || storage_js.is_undefined() {
            Ok(None)
        } else {
            Ok(Some(serde_wasm_bindgen::from_value(storage_js)?))
        }
    }

    async fn write_snapshots(&self, snapshots: &[Snapshot]) -> Result<(), SnapshotError> {
        // Plain objects, so storage.local receives JSON-compatible values
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let storage_js = snapshots.serialize(&serializer)?;

        setStorage(SNAPSHOTS_KEY, storage_js)
            .await
            .map_err(|e| host_error("storage.local.set", e))
    }
}
