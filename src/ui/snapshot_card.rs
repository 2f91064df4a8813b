/// One saved snapshot with its action buttons

use crate::matching::{display_name, summary, tooltip};
use crate::snapshot::Snapshot;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SnapshotCardProps {
    pub snapshot: Snapshot,
    pub index: usize,
    #[prop_or(false)]
    pub disabled: bool,
    pub on_rename: Callback<usize>,
    pub on_restore: Callback<usize>,
    pub on_merge: Callback<usize>,
    pub on_close: Callback<usize>,
    pub on_export: Callback<usize>,
    pub on_delete: Callback<usize>,
}

#[function_component(SnapshotCard)]
pub fn snapshot_card(props: &SnapshotCardProps) -> Html {
    let index = props.index;
    let snapshot = &props.snapshot;

    let action = |icon: &'static str, label: &'static str, callback: &Callback<usize>| {
        html! {
            <button
                class="pf-v5-c-button pf-m-plain snapshot-action"
                title={label}
                aria-label={label}
                disabled={props.disabled}
                onclick={callback.reform(move |_: MouseEvent| index)}
            >
                <i class="material-icons">{icon}</i>
            </button>
        }
    };

    html! {
        <div class="snapshot-item">
            <div class="snapshot-info" title={tooltip(snapshot)}>
                <span class="snapshot-name">{display_name(snapshot, index)}</span>
                {format!(" {}", summary(snapshot))}
            </div>
            <div class="snapshot-actions">
                {action("edit", "Rename", &props.on_rename)}
                {action("restore", "Restore", &props.on_restore)}
                {action("merge_type", "Merge with open tab groups", &props.on_merge)}
                {action("tab_close", "Close matching tab groups", &props.on_close)}
                {action("download", "Export", &props.on_export)}
                {action("delete", "Delete", &props.on_delete)}
            </div>
        </div>
    }
}
