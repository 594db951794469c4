use crate::config::ScribeConfig;
use crate::record::RecordId;
use crate::AutomationError;
use std::fmt;
use std::path::Path;

pub mod keys;
pub mod selection;
pub mod titles;
#[cfg(target_os = "windows")]
pub mod windows;

/// Result of trying to save one record through the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The editor wrote the file.
    Saved,
    /// The editor process could not be started.
    LaunchFailed(String),
    /// No editor window showed up in time.
    WindowNotFound,
    /// Neither the edit control nor the keyboard accepted the text.
    TypingFailed(String),
    /// The "Save As" dialog never appeared.
    DialogTimeout,
    /// The dialog was found but submitting or confirming it failed.
    ConfirmFailed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveOutcome::Saved => write!(f, "saved"),
            SaveOutcome::LaunchFailed(reason) => write!(f, "launch failed: {reason}"),
            SaveOutcome::WindowNotFound => write!(f, "editor window not found"),
            SaveOutcome::TypingFailed(reason) => write!(f, "typing failed: {reason}"),
            SaveOutcome::DialogTimeout => write!(f, "save dialog did not appear"),
            SaveOutcome::ConfirmFailed(reason) => write!(f, "confirm failed: {reason}"),
        }
    }
}

/// The contract every editor backend fulfils. Implementations never panic or
/// return errors; any failure is reported through the outcome.
pub trait EditorDriver {
    fn save(&self, record: &RecordId, content: &str, destination: &Path) -> SaveOutcome;
}

/// Backend used when no editor can be automated. Every save reports
/// [`SaveOutcome::LaunchFailed`] so the caller falls back to a direct write.
#[derive(Debug, Clone)]
pub struct InertDriver {
    reason: String,
}

impl InertDriver {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl EditorDriver for InertDriver {
    fn save(&self, _record: &RecordId, _content: &str, _destination: &Path) -> SaveOutcome {
        SaveOutcome::LaunchFailed(self.reason.clone())
    }
}

/// Create the editor backend for the current platform
pub fn create_driver(config: &ScribeConfig) -> Result<Box<dyn EditorDriver>, AutomationError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::NotepadDriver::new(config)?))
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = config;
        Err(AutomationError::UnsupportedPlatform(
            "Notepad automation is only available on Windows".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_saved_counts_as_success() {
        assert!(SaveOutcome::Saved.is_saved());
        assert!(!SaveOutcome::WindowNotFound.is_saved());
        assert!(!SaveOutcome::DialogTimeout.is_saved());
        assert!(!SaveOutcome::TypingFailed("x".into()).is_saved());
        assert!(!SaveOutcome::ConfirmFailed("x".into()).is_saved());
    }

    #[test]
    fn inert_driver_always_reports_launch_failure() {
        let driver = InertDriver::new("no desktop");
        let outcome = driver.save(&RecordId::new("1"), "text", Path::new("post 1.txt"));
        assert_eq!(outcome, SaveOutcome::LaunchFailed("no desktop".to_string()));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn create_driver_is_unsupported_off_windows() {
        let result = create_driver(&ScribeConfig::default());
        assert!(matches!(
            result,
            Err(AutomationError::UnsupportedPlatform(_))
        ));
    }
}
