/// Group identity matching and snapshot labels

use crate::snapshot::{GroupSnapshot, Snapshot, TabGroup};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix of exported file names
pub const EXPORT_FILE_PREFIX: &str = "tab-group-snapshots";

/// An open group and a saved group are the same group when title and color agree
pub fn same_identity(open: &TabGroup, saved: &GroupSnapshot) -> bool {
    open.title == saved.title && open.color == saved.color
}

/// Open groups matching any group of the snapshot, in host order
pub fn open_groups_matching_snapshot<'a>(open: &'a [TabGroup], snapshot: &Snapshot) -> Vec<&'a TabGroup> {
    open.iter()
        .filter(|group| snapshot.groups.iter().any(|saved| same_identity(group, saved)))
        .collect()
}

/// Open groups matching one saved group
pub fn open_groups_matching_group<'a>(open: &'a [TabGroup], saved: &GroupSnapshot) -> Vec<&'a TabGroup> {
    open.iter().filter(|group| same_identity(group, saved)).collect()
}

/// First saved group of the snapshot that matches an open group
pub fn saved_group_for<'a>(open: &TabGroup, snapshot: &'a Snapshot) -> Option<&'a GroupSnapshot> {
    snapshot.groups.iter().find(|saved| same_identity(open, saved))
}

pub fn display_name(snapshot: &Snapshot, index: usize) -> String {
    if snapshot.name.is_empty() {
        format!("Snapshot {}", index + 1)
    } else {
        snapshot.name.clone()
    }
}

pub fn summary(snapshot: &Snapshot) -> String {
    format!("({} groups, {} tabs)", snapshot.groups.len(), snapshot.tab_count())
}

/// One line per group: `title (n tabs)`
pub fn tooltip(snapshot: &Snapshot) -> String {
    snapshot
        .groups
        .iter()
        .map(|g| format!("{} ({} tabs)", g.title, g.tabs.len()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn group_label(group: &TabGroup) -> String {
    format!("{} ({})", group.title, group.color)
}

pub fn default_snapshot_name(now: &str) -> String {
    format!("Snapshot {}", now)
}

pub fn export_file_name(millis: i64) -> String {
    format!("{}-{}.json", EXPORT_FILE_PREFIX, millis)
}

/// File name for exporting a single snapshot, derived from its name
pub fn snapshot_file_name(snapshot: &Snapshot, index: usize) -> String {
    static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE_CHARS.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

    let name = display_name(snapshot, index);
    let slug = re.replace_all(&name, "-");
    let slug = slug.trim_matches('-').to_lowercase();

    if slug.is_empty() {
        format!("{}-{}.json", EXPORT_FILE_PREFIX, index + 1)
    } else {
        format!("{}.json", slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{GroupColor, SavedTab};

    fn open_group(id: i32, title: &str, color: GroupColor) -> TabGroup {
        TabGroup {
            id,
            title: title.to_string(),
            color,
            window_id: 1,
        }
    }

    fn saved_group(title: &str, color: GroupColor, tabs: usize) -> GroupSnapshot {
        GroupSnapshot {
            title: title.to_string(),
            color,
            tabs: (0..tabs)
                .map(|i| SavedTab {
                    url: format!("https://example.com/{}", i),
                    title: format!("Page {}", i),
                })
                .collect(),
        }
    }

    fn snapshot(groups: Vec<GroupSnapshot>) -> Snapshot {
        Snapshot {
            name: "Test".to_string(),
            groups,
        }
    }

    #[test]
    fn test_same_identity_requires_title_and_color() {
        let saved = saved_group("Work", GroupColor::Blue, 1);

        assert!(same_identity(&open_group(1, "Work", GroupColor::Blue), &saved));
        assert!(!same_identity(&open_group(1, "Work", GroupColor::Red), &saved));
        assert!(!same_identity(&open_group(1, "work", GroupColor::Blue), &saved));
    }

    #[test]
    fn test_open_groups_matching_snapshot() {
        let open = vec![
            open_group(1, "Work", GroupColor::Blue),
            open_group(2, "Work", GroupColor::Green),
            open_group(3, "Play", GroupColor::Red),
            open_group(4, "Work", GroupColor::Blue),
        ];
        let snap = snapshot(vec![
            saved_group("Work", GroupColor::Blue, 1),
            saved_group("Play", GroupColor::Red, 1),
        ]);

        let ids: Vec<i32> = open_groups_matching_snapshot(&open, &snap).iter().map(|g| g.id).collect();

        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_open_groups_matching_group() {
        let open = vec![
            open_group(1, "Work", GroupColor::Blue),
            open_group(2, "Play", GroupColor::Blue),
        ];

        let matched = open_groups_matching_group(&open, &saved_group("Play", GroupColor::Blue, 0));

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 2);
    }

    #[test]
    fn test_saved_group_for_picks_first() {
        let snap = snapshot(vec![
            saved_group("Work", GroupColor::Blue, 1),
            saved_group("Work", GroupColor::Blue, 3),
        ]);

        let found = saved_group_for(&open_group(9, "Work", GroupColor::Blue), &snap).unwrap();
        assert_eq!(found.tabs.len(), 1);

        assert!(saved_group_for(&open_group(9, "Work", GroupColor::Pink), &snap).is_none());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut snap = snapshot(vec![]);
        assert_eq!(display_name(&snap, 4), "Test");

        snap.name.clear();
        assert_eq!(display_name(&snap, 4), "Snapshot 5");
    }

    #[test]
    fn test_summary_and_tooltip() {
        let snap = snapshot(vec![
            saved_group("Work", GroupColor::Blue, 2),
            saved_group("Play", GroupColor::Red, 3),
        ]);

        assert_eq!(summary(&snap), "(2 groups, 5 tabs)");
        assert_eq!(tooltip(&snap), "Work (2 tabs)\nPlay (3 tabs)");
    }

    #[test]
    fn test_group_label() {
        assert_eq!(group_label(&open_group(1, "Work", GroupColor::Yellow)), "Work (yellow)");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name(1700000000000), "tab-group-snapshots-1700000000000.json");

        let mut snap = snapshot(vec![]);
        snap.name = "Friday / Release prep!".to_string();
        assert_eq!(snapshot_file_name(&snap, 0), "friday-release-prep.json");

        snap.name = "???".to_string();
        assert_eq!(snapshot_file_name(&snap, 2), "tab-group-snapshots-3.json");
    }
}
