/// Data structures for tab group snapshots
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colors the browser allows for a tab group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An open tab group as reported by the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    pub color: GroupColor,
    pub window_id: i32,
}

/// An open browser tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "ungrouped")]
    pub group_id: i32,
}

fn ungrouped() -> i32 {
    TabInfo::NO_GROUP
}

impl TabInfo {
    /// Group id the browser reports for tabs outside any group
    pub const NO_GROUP: i32 = -1;
}

/// A named capture of tab groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub name: String,
    pub groups: Vec<GroupSnapshot>,
}

/// One tab group within a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    #[serde(default)]
    pub title: String,
    pub color: GroupColor,
    pub tabs: Vec<SavedTab>,
}

/// A saved tab within a group snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTab {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl GroupSnapshot {
    /// Capture an open group together with its member tabs
    pub fn capture(group: &TabGroup, tabs: &[TabInfo]) -> GroupSnapshot {
        GroupSnapshot {
            title: group.title.clone(),
            color: group.color,
            tabs: tabs
                .iter()
                .map(|tab| SavedTab {
                    url: tab.url.clone(),
                    title: tab.title.clone(),
                })
                .collect(),
        }
    }
}

impl Snapshot {
    pub fn tab_count(&self) -> usize {
        self.groups.iter().map(|g| g.tabs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_group() {
        let group = TabGroup {
            id: 7,
            title: "Work".to_string(),
            color: GroupColor::Blue,
            window_id: 1,
        };
        let tabs = vec![
            TabInfo {
                id: 10,
                url: "https://github.com".to_string(),
                title: "GitHub".to_string(),
                group_id: 7,
            },
            TabInfo {
                id: 11,
                url: "https://docs.rs".to_string(),
                title: "Docs.rs".to_string(),
                group_id: 7,
            },
        ];

        let saved = GroupSnapshot::capture(&group, &tabs);

        assert_eq!(saved.title, "Work");
        assert_eq!(saved.color, GroupColor::Blue);
        assert_eq!(saved.tabs.len(), 2);
        assert_eq!(saved.tabs[1].url, "https://docs.rs");
        assert_eq!(saved.tabs[1].title, "Docs.rs");
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"name":"Morning","groups":[{"title":"News","color":"orange","tabs":[{"url":"https://lwn.net","title":"LWN"}]}]}"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.name, "Morning");
        assert_eq!(snapshot.groups[0].color, GroupColor::Orange);
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), json);
    }

    #[test]
    fn test_untitled_group_defaults() {
        let json = r#"{"id":3,"color":"grey","windowId":2}"#;

        let group: TabGroup = serde_json::from_str(json).unwrap();

        assert_eq!(group.title, "");
        assert_eq!(group.window_id, 2);
    }

    #[test]
    fn test_tab_without_group() {
        let tab: TabInfo = serde_json::from_str(r#"{"id":4,"url":"about:blank"}"#).unwrap();
        assert_eq!(tab.group_id, TabInfo::NO_GROUP);
        assert_eq!(tab.title, "");
    }

    #[test]
    fn test_unknown_color_rejected() {
        let json = r#"{"title":"x","color":"magenta","tabs":[]}"#;
        assert!(serde_json::from_str::<GroupSnapshot>(json).is_err());
    }

    #[test]
    fn test_tab_count() {
        let snapshot = Snapshot {
            name: "s".to_string(),
            groups: vec![
                GroupSnapshot {
                    title: "a".to_string(),
                    color: GroupColor::Red,
                    tabs: vec![SavedTab { url: "https://a".to_string(), title: "A".to_string() }],
                },
                GroupSnapshot {
                    title: "b".to_string(),
                    color: GroupColor::Cyan,
                    tabs: vec![
                        SavedTab { url: "https://b".to_string(), title: "B".to_string() },
                        SavedTab { url: "https://c".to_string(), title: "C".to_string() },
                    ],
                },
            ],
        };

        assert_eq!(snapshot.tab_count(), 3);
    }
}
