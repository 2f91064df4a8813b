/// Checkbox list of the open tab groups

use crate::matching::group_label;
use crate::snapshot::TabGroup;
use std::collections::HashSet;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GroupListProps {
    pub groups: Vec<TabGroup>,
    pub selected: HashSet<i32>,
    /// Fired with the group id and its new checked state
    pub on_toggle: Callback<(i32, bool)>,
}

#[function_component(GroupList)]
pub fn group_list(props: &GroupListProps) -> Html {
    html! {
        <div class="group-list">
            <h3 class="section-title">{"Current Tab Groups:"}</h3>
            if props.groups.is_empty() {
                <p class="empty-state-hint">{"No open tab groups."}</p>
            }
            {for props.groups.iter().map(|group| {
                let group_id = group.id;
                let onchange = props.on_toggle.reform(move |e: Event| {
                    let checked = e
                        .target_dyn_into::<HtmlInputElement>()
                        .map(|input| input.checked())
                        .unwrap_or(false);
                    (group_id, checked)
                });

                html! {
                    <div key={group.id} class="group-item">
                        <label>
                            <input
                                type="checkbox"
                                value={group.id.to_string()}
                                checked={props.selected.contains(&group.id)}
                                {onchange}
                            />
                            {format!(" {}", group_label(group))}
                        </label>
                    </div>
                }
            })}
        </div>
    }
}
