use std::path::Path;
use std::process::{Child, Command};
use tracing::{debug, warn};

use crate::AutomationError;

/// RAII wrapper for a spawned editor process. Kills the process on drop if it
/// is still running, so a stuck editor never outlives its record.
pub(crate) struct EditorProcess {
    child: Child,
}

impl EditorProcess {
    pub(crate) fn spawn(editor_path: &Path) -> Result<Self, AutomationError> {
        let child = Command::new(editor_path).spawn().map_err(|e| {
            AutomationError::PlatformError(format!(
                "Failed to start {}: {e}",
                editor_path.display()
            ))
        })?;
        debug!("started {} with pid {}", editor_path.display(), child.id());
        Ok(Self { child })
    }

    pub(crate) fn pid(&self) -> u32 {
        self.child.id()
    }

    fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl Drop for EditorProcess {
    fn drop(&mut self) {
        if !self.is_running() {
            return;
        }
        let pid = self.child.id();
        warn!("editor process {pid} still running, terminating it");
        if let Err(e) = self.child.kill() {
            warn!("failed to terminate editor process {pid}: {e}");
            return;
        }
        let _ = self.child.wait();
    }
}
