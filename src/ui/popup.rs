/// Popup UI for the tab group snapshot extension

use crate::chrome::{download_file, load_snapshots, send_message};
use crate::matching::{default_snapshot_name, display_name, export_file_name, snapshot_file_name};
use crate::messages::{Request, Response};
use crate::snapshot::{Snapshot, TabGroup};
use crate::storage::SnapshotStore;
use crate::ui::group_list::GroupList;
use crate::ui::snapshot_card::SnapshotCard;
use patternfly_yew::prelude::*;
use std::collections::HashSet;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
    Notice(String),
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Idle);
    let groups = use_state(Vec::<TabGroup>::new);
    let selected = use_state(HashSet::<i32>::new);
    let snapshots = use_state(Vec::<Snapshot>::new);

    // Load groups and snapshots on mount
    {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Err(e) = refresh_groups(&groups, &selected).await {
                    state.set(AppState::Error(format!("Failed to list groups: {}", e)));
                }
                if let Err(e) = refresh_snapshots(&snapshots).await {
                    state.set(AppState::Error(format!("Failed to load snapshots: {}", e)));
                }
            });
            || ()
        });
    }

    let on_toggle_group = {
        let selected = selected.clone();
        Callback::from(move |(group_id, checked): (i32, bool)| {
            let mut next = (*selected).clone();
            if checked {
                next.insert(group_id);
            } else {
                next.remove(&group_id);
            }
            selected.set(next);
        })
    };

    // Take snapshot of the selected groups
    let on_take_snapshot = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(name) = prompt("Enter a name for this snapshot:", &default_snapshot_name(&locale_now())) else {
                return;
            };
            let group_ids: Vec<i32> = selected.iter().copied().collect();
            run_request(
                state.clone(),
                groups.clone(),
                selected.clone(),
                snapshots.clone(),
                "Saving snapshot...",
                Request::TakeSnapshot { group_ids, name },
            );
        })
    };

    let on_rename = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            let current = snapshots
                .get(index)
                .map(|s| display_name(s, index))
                .unwrap_or_default();
            if let Some(new_name) = prompt("Enter new name for the snapshot:", &current) {
                run_request(
                    state.clone(),
                    groups.clone(),
                    selected.clone(),
                    snapshots.clone(),
                    "Renaming snapshot...",
                    Request::RenameSnapshot {
                        snapshot_index: index as i64,
                        new_name,
                    },
                );
            }
        })
    };

    let on_restore = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            run_request(
                state.clone(),
                groups.clone(),
                selected.clone(),
                snapshots.clone(),
                "Restoring tab groups...",
                Request::RestoreSnapshot {
                    snapshot_index: index as i64,
                },
            );
        })
    };

    let on_merge = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            run_request(
                state.clone(),
                groups.clone(),
                selected.clone(),
                snapshots.clone(),
                "Merging with open tab groups...",
                Request::RestoreOpenFromSnapshot {
                    snapshot_index: index as i64,
                },
            );
        })
    };

    let on_close = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            run_request(
                state.clone(),
                groups.clone(),
                selected.clone(),
                snapshots.clone(),
                "Closing tab groups...",
                Request::CloseSnapshotGroups {
                    snapshot_index: index as i64,
                },
            );
        })
    };

    let on_delete = {
        let state = state.clone();
        let groups = groups.clone();
        let selected = selected.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            if confirm("Are you sure you want to delete this snapshot?") {
                run_request(
                    state.clone(),
                    groups.clone(),
                    selected.clone(),
                    snapshots.clone(),
                    "Deleting snapshot...",
                    Request::DeleteSnapshot {
                        snapshot_index: index as i64,
                    },
                );
            }
        })
    };

    // Export a single snapshot, as a one-element array so it imports like a full export
    let on_export_snapshot = {
        let state = state.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |index: usize| {
            let Some(snapshot) = snapshots.get(index) else {
                return;
            };
            let mut single = SnapshotStore::new();
            single.add(snapshot.clone());
            match single.export_json() {
                Ok(json) => download_file(&json, &snapshot_file_name(snapshot, index)),
                Err(e) => state.set(AppState::Error(format!("Export failed: {}", e))),
            }
        })
    };

    let on_export_all = {
        let state = state.clone();

        Callback::from(move |_: MouseEvent| {
            let state = state.clone();
            spawn_local(async move {
                match request(Request::ExportSnapshots).await {
                    Ok(Response::Exported { json, .. }) => {
                        download_file(&json, &export_file_name(js_sys::Date::now() as i64));
                    }
                    Ok(other) => {
                        log::warn!("Unexpected export response: {:?}", other);
                    }
                    Err(e) => state.set(AppState::Error(format!("Export failed: {}", e))),
                }
            });
        })
    };

    let on_import = {
        let state = state.clone();
        let snapshots = snapshots.clone();

        Callback::from(move |e: Event| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            // Allow importing the same file twice in a row
            input.set_value("");

            let state = state.clone();
            let snapshots = snapshots.clone();
            spawn_local(async move {
                let text = match read_file_text(&file).await {
                    Ok(text) => text,
                    Err(e) => {
                        alert(&format!("Could not read {}: {}", file.name(), e));
                        return;
                    }
                };

                let imported = match SnapshotStore::parse_import(&text) {
                    Ok(imported) => imported,
                    Err(e) => {
                        alert(&e.to_string());
                        return;
                    }
                };

                match request(Request::ImportSnapshots { snapshots: imported }).await {
                    Ok(Response::Imported { imported, .. }) => {
                        state.set(AppState::Notice(format!("Imported {} snapshots", imported)));
                    }
                    Ok(_) => state.set(AppState::Idle),
                    Err(e) => state.set(AppState::Error(format!("Import failed: {}", e))),
                }
                if let Err(e) = refresh_snapshots(&snapshots).await {
                    state.set(AppState::Error(format!("Failed to load snapshots: {}", e)));
                }
            });
        })
    };

    let is_busy = matches!(*state, AppState::Loading(_));
    let nothing_selected = !groups.iter().any(|g| selected.contains(&g.id));

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tab Group Snapshots"}</h1>

            // Status display
            {match &*state {
                AppState::Loading(msg) => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                },
                AppState::Notice(msg) => html! {
                    <Alert r#type={AlertType::Success} title={msg.clone()} inline={true}>
                    </Alert>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <GroupList
                groups={(*groups).clone()}
                selected={(*selected).clone()}
                on_toggle={on_toggle_group}
            />

            <div class="flex-column-gap">
                <Button
                    onclick={on_take_snapshot}
                    disabled={is_busy || nothing_selected}
                    variant={ButtonVariant::Primary}
                    block={true}
                >
                    {"📸 Take Snapshot"}
                </Button>
            </div>

            <div class="snapshot-list">
                <h3 class="section-title">{"Saved Snapshots:"}</h3>
                if snapshots.is_empty() {
                    <p class="empty-state-hint">{"No snapshots yet."}</p>
                }
                {for snapshots.iter().enumerate().map(|(index, snapshot)| html! {
                    <SnapshotCard
                        key={index}
                        snapshot={snapshot.clone()}
                        {index}
                        disabled={is_busy}
                        on_rename={on_rename.clone()}
                        on_restore={on_restore.clone()}
                        on_merge={on_merge.clone()}
                        on_close={on_close.clone()}
                        on_export={on_export_snapshot.clone()}
                        on_delete={on_delete.clone()}
                    />
                })}
            </div>

            <div class="flex-row-gap">
                <Button onclick={on_export_all} disabled={is_busy} variant={ButtonVariant::Secondary}>
                    {"📥 Export"}
                </Button>
                <label class="pf-v5-c-button pf-m-secondary import-label">
                    {"📤 Import"}
                    <input
                        type="file"
                        accept=".json,application/json"
                        class="hidden-input"
                        disabled={is_busy}
                        onchange={on_import}
                    />
                </label>
            </div>
        </div>
    }
}

// Helper functions

/// Send a request to the background worker; failed responses become `Err`
async fn request(message: Request) -> Result<Response, String> {
    let response: Response = send_message(&message)
        .await
        .map_err(|e| e.to_string())?;

    match response.error() {
        Some(error) => Err(error.to_string()),
        None => Ok(response),
    }
}

/// Run a snapshot request, then reload both lists. Restore, merge and close
/// replace or remove groups, so the group list is stale afterwards.
fn run_request(
    state: UseStateHandle<AppState>,
    groups: UseStateHandle<Vec<TabGroup>>,
    selected: UseStateHandle<HashSet<i32>>,
    snapshots: UseStateHandle<Vec<Snapshot>>,
    busy_message: &str,
    message: Request,
) {
    state.set(AppState::Loading(busy_message.to_string()));

    spawn_local(async move {
        match request(message).await {
            Ok(_) => state.set(AppState::Idle),
            Err(e) => state.set(AppState::Error(e)),
        }
        if let Err(e) = refresh_groups(&groups, &selected).await {
            state.set(AppState::Error(format!("Failed to list groups: {}", e)));
        }
        if let Err(e) = refresh_snapshots(&snapshots).await {
            state.set(AppState::Error(format!("Failed to load snapshots: {}", e)));
        }
    });
}

/// Reload the open groups and drop selections of groups that are gone
async fn refresh_groups(
    groups: &UseStateHandle<Vec<TabGroup>>,
    selected: &UseStateHandle<HashSet<i32>>,
) -> Result<(), String> {
    match request(Request::ListGroups).await? {
        Response::Groups { groups: open } => {
            selected.set(retain_open_selection(selected, &open));
            groups.set(open);
            Ok(())
        }
        other => Err(format!("Unexpected response: {:?}", other)),
    }
}

fn retain_open_selection(selected: &HashSet<i32>, open: &[TabGroup]) -> HashSet<i32> {
    selected
        .iter()
        .copied()
        .filter(|id| open.iter().any(|group| group.id == *id))
        .collect()
}

async fn refresh_snapshots(snapshots: &UseStateHandle<Vec<Snapshot>>) -> Result<(), String> {
    let stored = load_snapshots().await.map_err(|e| e.to_string())?;
    snapshots.set(stored);
    Ok(())
}

async fn read_file_text(file: &web_sys::File) -> Result<String, String> {
    let text = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| "file contents are not text".to_string())
}

fn locale_now() -> String {
    js_sys::Date::new_0()
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}

fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
