//! Keystroke sequences sent to the editor
//!
//! Key strings use the `send_keys` notation of the automation layer: `^` holds
//! Ctrl and `%` holds Alt for the key that follows, named keys go in braces.

pub const ENTER: &str = "{ENTER}";
pub const SAVE_SHORTCUT: &str = "^s";
pub const CLOSE_SHORTCUT: &str = "%{F4}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke<'a> {
    /// Literal text, typed character by character
    Text(&'a str),
    Enter,
}

/// Splits `content` into literal runs separated by Enter presses so that line
/// breaks reach the editor as real key presses. `\r\n` and `\n` both count as
/// one line break.
pub fn keystrokes(content: &str) -> Vec<Keystroke<'_>> {
    let mut plan = Vec::new();
    for (index, line) in content.split('\n').enumerate() {
        if index > 0 {
            plan.push(Keystroke::Enter);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.is_empty() {
            plan.push(Keystroke::Text(line));
        }
    }
    plan
}

/// Sends `content` through the given senders and stops at the first failure.
pub fn send_keystrokes<E>(
    content: &str,
    mut send_text: impl FnMut(&str) -> Result<(), E>,
    mut send_keys: impl FnMut(&str) -> Result<(), E>,
) -> Result<(), E> {
    for keystroke in keystrokes(content) {
        match keystroke {
            Keystroke::Text(text) => send_text(text)?,
            Keystroke::Enter => send_keys(ENTER)?,
        }
    }
    Ok(())
}

/// How the text reached the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionPath {
    EditControl,
    Keyboard,
}

/// Types through the edit control when it could be located and focused,
/// otherwise through the global keyboard. A failure while typing into the
/// control is returned as is: part of the text is already in the editor, so
/// typing it all again would duplicate it.
pub fn inject_text<T, E>(
    surface: Result<T, E>,
    type_into_control: impl FnOnce(T) -> Result<(), E>,
    type_with_keyboard: impl FnOnce(E) -> Result<(), E>,
) -> Result<InjectionPath, E> {
    match surface {
        Ok(control) => type_into_control(control).map(|()| InjectionPath::EditControl),
        Err(e) => type_with_keyboard(e).map(|()| InjectionPath::Keyboard),
    }
}
