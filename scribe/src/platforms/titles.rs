//! Window title classification
//!
//! Titles are English and matched case-insensitively. The overwrite prompt is
//! titled "Confirm Save As", so it is checked before the "Save As" dialog.

use once_cell::sync::Lazy;
use regex::Regex;

/// Window class of the classic Notepad main window.
pub const EDITOR_CLASS: &str = "Notepad";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Editor,
    SaveAs,
    ConfirmOverwrite,
}

static CONFIRM_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*confirm|confirm.*save|save.*confirm").expect("valid confirm pattern")
});
static EDITOR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s-\snotepad\s*$").expect("valid editor suffix pattern"));
static SAVE_AS_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)save\s+as").expect("valid save-as pattern"));
static EDITOR_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)notepad|untitled").expect("valid editor pattern"));

pub fn classify_title(title: &str) -> Option<WindowKind> {
    if CONFIRM_TITLE.is_match(title) {
        Some(WindowKind::ConfirmOverwrite)
    } else if EDITOR_SUFFIX.is_match(title) {
        // "save as.txt - Notepad" is still the editor
        Some(WindowKind::Editor)
    } else if SAVE_AS_TITLE.is_match(title) {
        Some(WindowKind::SaveAs)
    } else if EDITOR_TITLE.is_match(title) {
        Some(WindowKind::Editor)
    } else {
        None
    }
}

/// True for the editor's main window, judged by class name or title.
pub fn looks_like_editor(title: &str, class_name: &str) -> bool {
    class_name == EDITOR_CLASS || classify_title(title) == Some(WindowKind::Editor)
}
