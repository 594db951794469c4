//! Windows backend: drives Notepad through the UI Automation API using the
//! uiautomation crate.

mod driver;
mod process;
mod utils;

pub use driver::NotepadDriver;
