//! Choosing which window belongs to the editor this run launched
//!
//! Windows that were already on screen before the launch are never picked, so
//! a Notepad the user has open is left alone. Dialogs are only accepted from
//! the process that owns the editor window.

use crate::platforms::titles::{classify_title, looks_like_editor, WindowKind};
use std::collections::HashSet;

/// UI Automation runtime id; unique among the windows currently on screen.
pub type RuntimeId = Vec<i32>;

/// The properties window selection looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub runtime_id: RuntimeId,
    pub pid: u32,
    pub title: String,
    pub class_name: String,
}

/// Runtime ids of the windows present before the editor was launched.
#[derive(Debug, Clone, Default)]
pub struct WindowSnapshot {
    ids: HashSet<RuntimeId>,
}

impl WindowSnapshot {
    pub fn new(ids: impl IntoIterator<Item = RuntimeId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, window: &WindowInfo) -> bool {
        self.ids.contains(&window.runtime_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Index of the launched editor's window among `candidates`.
///
/// Only editor-looking windows that appeared after the launch qualify. One
/// owned by `spawned_pid` wins; otherwise the first new one is taken, which
/// covers Notepad builds that hand the window over to another process.
pub fn pick_editor_window(
    candidates: &[WindowInfo],
    before_launch: &WindowSnapshot,
    spawned_pid: u32,
) -> Option<usize> {
    let fresh = |window: &WindowInfo| {
        !before_launch.contains(window) && looks_like_editor(&window.title, &window.class_name)
    };

    candidates
        .iter()
        .position(|window| fresh(window) && window.pid == spawned_pid)
        .or_else(|| candidates.iter().position(fresh))
}

/// Index of a `kind` dialog belonging to the editor process `editor_pid`.
pub fn pick_dialog(
    candidates: &[WindowInfo],
    kind: WindowKind,
    before_launch: &WindowSnapshot,
    editor_pid: u32,
) -> Option<usize> {
    candidates.iter().position(|window| {
        window.pid == editor_pid
            && !before_launch.contains(window)
            && classify_title(&window.title) == Some(kind)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(id: i32, pid: u32, title: &str, class_name: &str) -> WindowInfo {
        WindowInfo {
            runtime_id: vec![42, id],
            pid,
            title: title.to_string(),
            class_name: class_name.to_string(),
        }
    }

    #[test]
    fn user_notepad_open_before_launch_is_never_picked() {
        let users = window(1, 500, "notes.txt - Notepad", "Notepad");
        let snapshot = WindowSnapshot::new([users.runtime_id.clone()]);

        // the launched window has not shown up yet
        assert_eq!(pick_editor_window(&[users.clone()], &snapshot, 900), None);

        let ours = window(2, 900, "Untitled - Notepad", "Notepad");
        assert_eq!(pick_editor_window(&[users, ours], &snapshot, 900), Some(1));
    }

    #[test]
    fn spawned_pid_preferred_over_other_new_windows() {
        let snapshot = WindowSnapshot::default();
        let candidates = [
            window(1, 700, "Untitled - Notepad", "Notepad"),
            window(2, 900, "Untitled - Notepad", "Notepad"),
        ];
        assert_eq!(pick_editor_window(&candidates, &snapshot, 900), Some(1));
    }

    #[test]
    fn new_window_from_handoff_process_is_accepted() {
        let snapshot = WindowSnapshot::new([vec![42, 1]]);
        let candidates = [
            window(1, 500, "notes.txt - Notepad", "Notepad"),
            window(3, 1234, "Untitled - Notepad", "Notepad"),
        ];
        assert_eq!(pick_editor_window(&candidates, &snapshot, 900), Some(1));
    }

    #[test]
    fn non_editor_windows_are_ignored() {
        let candidates = [window(1, 900, "Program Manager", "Progman")];
        assert_eq!(
            pick_editor_window(&candidates, &WindowSnapshot::default(), 900),
            None
        );
    }

    #[test]
    fn save_dialog_of_another_application_is_ignored() {
        let snapshot = WindowSnapshot::default();
        let candidates = [
            window(5, 300, "Save As", "#32770"),
            window(6, 900, "Save As", "#32770"),
        ];
        assert_eq!(
            pick_dialog(&candidates, WindowKind::SaveAs, &snapshot, 900),
            Some(1)
        );
        assert_eq!(
            pick_dialog(&candidates[..1], WindowKind::SaveAs, &snapshot, 900),
            None
        );
    }

    #[test]
    fn dialog_open_before_launch_is_ignored() {
        let stale = window(5, 900, "Save As", "#32770");
        let snapshot = WindowSnapshot::new([stale.runtime_id.clone()]);
        assert_eq!(
            pick_dialog(&[stale], WindowKind::SaveAs, &snapshot, 900),
            None
        );
    }

    #[test]
    fn confirmation_is_told_apart_from_save_dialog() {
        let candidates = [
            window(6, 900, "Save As", "#32770"),
            window(7, 900, "Confirm Save As", "#32770"),
        ];
        assert_eq!(
            pick_dialog(
                &candidates,
                WindowKind::ConfirmOverwrite,
                &WindowSnapshot::default(),
                900
            ),
            Some(1)
        );
    }
}
