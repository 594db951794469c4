//! Notepad automation
//!
//! One call to [`NotepadDriver::save`] launches a fresh Notepad, types the
//! content, walks the "Save As" dialog (accepting an overwrite prompt if one
//! shows up) and closes the window again. Each step returns its own
//! `Result`; `save` maps the first failing step to a [`SaveOutcome`].
//! A save only counts once the destination file is newer than before.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use uiautomation::controls::ControlType;
use uiautomation::inputs::Keyboard;
use uiautomation::patterns::{
    UIExpandCollapsePattern, UIInvokePattern, UIValuePattern, UIWindowPattern,
};
use uiautomation::types::TreeScope;
use uiautomation::{UIAutomation, UIElement};

use super::process::EditorProcess;
use super::utils::{create_ui_automation_with_com_init, millis};
use crate::config::ScribeConfig;
use crate::output::{modified_time, written_since};
use crate::platforms::keys::{inject_text, send_keystrokes, CLOSE_SHORTCUT, ENTER, SAVE_SHORTCUT};
use crate::platforms::selection::{pick_dialog, pick_editor_window, WindowInfo, WindowSnapshot};
use crate::platforms::titles::WindowKind;
use crate::platforms::{EditorDriver, SaveOutcome};
use crate::record::RecordId;
use crate::wait::poll_until;
use crate::AutomationError;

const TYPE_SETTLE: Duration = Duration::from_millis(250);
const SUBMIT_SETTLE: Duration = Duration::from_millis(500);
const CLOSE_SETTLE: Duration = Duration::from_millis(200);
const CONTROL_LOOKUP_TIMEOUT_MS: u64 = 1000;

/// Automation id of the file name box in the common "Save As" dialog.
const FILE_NAME_AUTOMATION_ID: &str = "1001";

pub struct NotepadDriver {
    automation: UIAutomation,
    editor_path: PathBuf,
    key_pause: Duration,
    save_timeout: Duration,
    window_timeout: Duration,
    confirm_timeout: Duration,
    poll_interval: Duration,
    launch_settle: Duration,
}

impl NotepadDriver {
    pub fn new(config: &ScribeConfig) -> Result<Self, AutomationError> {
        let automation = create_ui_automation_with_com_init()?;
        Ok(Self {
            automation,
            editor_path: config.editor_path.clone(),
            key_pause: config.key_pause,
            save_timeout: config.save_timeout,
            window_timeout: config.window_timeout,
            confirm_timeout: config.confirm_timeout,
            poll_interval: config.poll_interval,
            launch_settle: config.launch_settle,
        })
    }

    fn keyboard(&self) -> Keyboard {
        Keyboard::new().interval(millis(self.key_pause))
    }

    /// Top-level windows plus the direct window children of `owners`; the
    /// editor's dialogs are parented to the editor window in the UIA tree.
    fn candidate_windows(&self, owners: &[&UIElement]) -> Vec<UIElement> {
        let condition = match self.automation.create_true_condition() {
            Ok(condition) => condition,
            Err(e) => {
                debug!("failed to create true condition: {e}");
                return Vec::new();
            }
        };

        let mut windows = match self.automation.get_root_element() {
            Ok(root) => root
                .find_all(TreeScope::Children, &condition)
                .unwrap_or_default(),
            Err(e) => {
                debug!("failed to get root element: {e}");
                Vec::new()
            }
        };

        for owner in owners {
            let children = owner
                .find_all(TreeScope::Children, &condition)
                .unwrap_or_default();
            windows.extend(children.into_iter().filter(|child| {
                child
                    .get_control_type()
                    .map(|control_type| control_type == ControlType::Window)
                    .unwrap_or(false)
            }));
        }

        windows
    }

    fn describe(window: &UIElement) -> Option<WindowInfo> {
        Some(WindowInfo {
            runtime_id: window.get_runtime_id().ok()?,
            pid: window.get_process_id().ok()?,
            title: window.get_name().unwrap_or_default(),
            class_name: window.get_classname().unwrap_or_default(),
        })
    }

    /// Candidate windows paired with their properties; windows whose runtime
    /// id or process cannot be read are dropped.
    fn described_windows(&self, owners: &[&UIElement]) -> (Vec<UIElement>, Vec<WindowInfo>) {
        self.candidate_windows(owners)
            .into_iter()
            .filter_map(|window| Self::describe(&window).map(|info| (window, info)))
            .unzip()
    }

    /// Runtime ids of everything on screen right now.
    fn snapshot_windows(&self) -> WindowSnapshot {
        let (_, infos) = self.described_windows(&[]);
        WindowSnapshot::new(infos.into_iter().map(|info| info.runtime_id))
    }

    fn find_editor_window(
        &self,
        spawned_pid: u32,
        before_launch: &WindowSnapshot,
    ) -> Result<(UIElement, WindowInfo), AutomationError> {
        poll_until(self.window_timeout, self.poll_interval, || {
            let (windows, infos) = self.described_windows(&[]);
            let index = pick_editor_window(&infos, before_launch, spawned_pid)?;
            windows.into_iter().nth(index).zip(infos.into_iter().nth(index))
        })
        .ok_or_else(|| {
            AutomationError::Timeout(format!(
                "Notepad window not found within {:?}",
                self.window_timeout
            ))
        })
    }

    fn find_dialog(
        &self,
        kind: WindowKind,
        owners: &[&UIElement],
        before_launch: &WindowSnapshot,
        editor_pid: u32,
    ) -> Option<UIElement> {
        let (windows, infos) = self.described_windows(owners);
        let index = pick_dialog(&infos, kind, before_launch, editor_pid)?;
        windows.into_iter().nth(index)
    }

    fn find_edit_surface(&self, window: &UIElement) -> Result<UIElement, AutomationError> {
        self.automation
            .create_matcher()
            .from_ref(window)
            .filter_fn(Box::new(|e: &UIElement| -> uiautomation::Result<bool> {
                let control_type = e.get_control_type().ok();
                let class_name = e.get_classname().unwrap_or_default();
                Ok(class_name == "Edit"
                    || control_type == Some(ControlType::Document)
                    || control_type == Some(ControlType::Edit))
            }))
            .depth(6)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first()
            .map_err(|e| AutomationError::ElementNotFound(format!("Edit control: {e}")))
    }

    fn type_content(&self, window: &UIElement, content: &str) -> Result<(), AutomationError> {
        let pause = millis(self.key_pause);
        let surface = self.find_edit_surface(window).and_then(|edit| {
            edit.set_focus()?;
            Ok(edit)
        });

        let path = inject_text(
            surface,
            |edit| {
                send_keystrokes(
                    content,
                    |text| edit.send_text(text, pause),
                    |keys| edit.send_keys(keys, pause),
                )?;
                Ok(())
            },
            |e| {
                warn!("Edit control unavailable ({e}). Falling back to keyboard input");
                window.set_focus()?;
                let keyboard = self.keyboard();
                send_keystrokes(
                    content,
                    |text| keyboard.send_text(text),
                    |keys| keyboard.send_keys(keys),
                )?;
                Ok(())
            },
        )?;
        debug!("typed {} bytes via {path:?}", content.len());
        Ok(())
    }

    fn select_save_as_menu(&self, window: &UIElement) -> Result<(), AutomationError> {
        let file_menu = self
            .automation
            .create_matcher()
            .from_ref(window)
            .control_type(ControlType::MenuItem)
            .filter_fn(Box::new(|e: &UIElement| -> uiautomation::Result<bool> {
                Ok(e.get_name().unwrap_or_default().trim() == "File")
            }))
            .depth(4)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first()?;
        file_menu.get_pattern::<UIExpandCollapsePattern>()?.expand()?;

        // the drop-down is a top-level popup, not a child of the window
        let root = self.automation.get_root_element()?;
        let save_as = self
            .automation
            .create_matcher()
            .from_ref(&root)
            .control_type(ControlType::MenuItem)
            .filter_fn(Box::new(|e: &UIElement| -> uiautomation::Result<bool> {
                Ok(e.get_name().unwrap_or_default().starts_with("Save As"))
            }))
            .depth(5)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first()?;
        save_as.get_pattern::<UIInvokePattern>()?.invoke()?;
        Ok(())
    }

    fn open_save_dialog(&self, window: &UIElement) -> Result<(), AutomationError> {
        if let Err(e) = self.select_save_as_menu(window) {
            warn!("File > Save As menu failed ({e}). Using the keyboard shortcut");
            window.set_focus()?;
            self.keyboard().send_keys(SAVE_SHORTCUT)?;
        }
        Ok(())
    }

    fn find_file_name_field(&self, dialog: &UIElement) -> Result<UIElement, AutomationError> {
        let by_id = self
            .automation
            .create_matcher()
            .from_ref(dialog)
            .control_type(ControlType::Edit)
            .filter_fn(Box::new(|e: &UIElement| -> uiautomation::Result<bool> {
                Ok(e.get_automation_id().unwrap_or_default() == FILE_NAME_AUTOMATION_ID)
            }))
            .depth(8)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first();
        if let Ok(field) = by_id {
            return Ok(field);
        }

        self.automation
            .create_matcher()
            .from_ref(dialog)
            .classname("Edit")
            .depth(8)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first()
            .map_err(|e| AutomationError::ElementNotFound(format!("File name field: {e}")))
    }

    fn enter_destination(&self, dialog: &UIElement, destination: &Path) -> Result<(), AutomationError> {
        let path = destination.to_string_lossy();
        dialog.set_focus()?;

        let direct = self.find_file_name_field(dialog).and_then(|field| {
            field.get_pattern::<UIValuePattern>()?.set_value(&path)?;
            Ok(())
        });

        if let Err(e) = direct {
            warn!("Could not set the file name through the control ({e}). Typing the path instead");
            dialog.set_focus()?;
            self.keyboard().send_text(&path)?;
        }
        Ok(())
    }

    fn accept_confirmation(&self, confirm: &UIElement) -> Result<(), AutomationError> {
        let clicked = self
            .automation
            .create_matcher()
            .from_ref(confirm)
            .control_type(ControlType::Button)
            .filter_fn(Box::new(|e: &UIElement| -> uiautomation::Result<bool> {
                Ok(e.get_name().unwrap_or_default().replace('&', "") == "Yes")
            }))
            .depth(5)
            .timeout(CONTROL_LOOKUP_TIMEOUT_MS)
            .find_first()
            .and_then(|yes| yes.get_pattern::<UIInvokePattern>()?.invoke());

        if let Err(e) = clicked {
            debug!("Yes button not usable ({e}), confirming with Enter");
            confirm.set_focus()?;
            self.keyboard().send_keys(ENTER)?;
        }
        Ok(())
    }

    /// Everything between a found editor window and closing it.
    fn type_and_save(
        &self,
        window: &UIElement,
        editor_pid: u32,
        before_launch: &WindowSnapshot,
        content: &str,
        destination: &Path,
    ) -> SaveOutcome {
        if let Err(e) = self.type_content(window, content) {
            warn!("Typing into Notepad failed: {e}");
            return SaveOutcome::TypingFailed(e.to_string());
        }
        thread::sleep(TYPE_SETTLE);

        let previous_write = modified_time(destination);

        if let Err(e) = self.open_save_dialog(window) {
            warn!("Could not open the Save As dialog: {e}");
            return SaveOutcome::DialogTimeout;
        }

        let dialog = match poll_until(self.save_timeout, self.poll_interval, || {
            self.find_dialog(WindowKind::SaveAs, &[window], before_launch, editor_pid)
        }) {
            Some(dialog) => dialog,
            None => {
                warn!("Save As dialog not detected within {:?}", self.save_timeout);
                return SaveOutcome::DialogTimeout;
            }
        };

        if let Err(e) = self.enter_destination(&dialog, destination) {
            warn!("Could not enter the destination path: {e}");
            return SaveOutcome::TypingFailed(e.to_string());
        }

        if let Err(e) = self.keyboard().send_keys(ENTER) {
            return SaveOutcome::ConfirmFailed(format!("submitting Save As failed: {e}"));
        }
        thread::sleep(SUBMIT_SETTLE);

        if let Some(confirm) = poll_until(self.confirm_timeout, self.poll_interval, || {
            self.find_dialog(
                WindowKind::ConfirmOverwrite,
                &[window, &dialog],
                before_launch,
                editor_pid,
            )
        }) {
            debug!("overwrite confirmation shown, accepting it");
            if let Err(e) = self.accept_confirmation(&confirm) {
                return SaveOutcome::ConfirmFailed(e.to_string());
            }
        }

        let written = poll_until(SUBMIT_SETTLE, self.poll_interval, || {
            written_since(destination, previous_write).then_some(())
        });
        if written.is_none() {
            warn!("{} was not written by Notepad", destination.display());
            return SaveOutcome::ConfirmFailed("file not written".to_string());
        }

        SaveOutcome::Saved
    }

    fn close_editor(&self, window: &UIElement) {
        let closed = window
            .get_pattern::<UIWindowPattern>()
            .and_then(|pattern| pattern.close());
        if let Err(e) = closed {
            debug!("WindowPattern close failed ({e}), falling back to Alt+F4");
            let _ = window.set_focus();
            if let Err(e) = self.keyboard().send_keys(CLOSE_SHORTCUT) {
                warn!("Failed to close Notepad: {e}");
            }
        }
    }
}

impl EditorDriver for NotepadDriver {
    #[instrument(skip(self, record, content, destination), fields(record = %record))]
    fn save(&self, record: &RecordId, content: &str, destination: &Path) -> SaveOutcome {
        let before_launch = self.snapshot_windows();
        debug!("{} windows on screen before launch", before_launch.len());

        let process = match EditorProcess::spawn(&self.editor_path) {
            Ok(process) => process,
            Err(e) => {
                warn!("Failed to start Notepad: {e}");
                return SaveOutcome::LaunchFailed(e.to_string());
            }
        };
        thread::sleep(self.launch_settle);

        let (window, info) = match self.find_editor_window(process.pid(), &before_launch) {
            Ok(found) => found,
            Err(e) => {
                warn!("{e}");
                return SaveOutcome::WindowNotFound;
            }
        };

        let outcome = self.type_and_save(&window, info.pid, &before_launch, content, destination);
        if outcome.is_saved() {
            info!("Saved via Notepad: {}", destination.display());
        }

        self.close_editor(&window);
        thread::sleep(CLOSE_SETTLE);
        outcome
    }
}
