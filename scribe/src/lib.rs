//! Save posts from a JSON API as text files by driving Notepad
//!
//! Records are fetched once over HTTP, then each one is typed into a fresh
//! Notepad window and saved through the "Save As" dialog. Whenever the
//! automation cannot confirm the save, the content is written directly to
//! the same path instead.

pub mod config;
pub mod errors;
pub mod format;
pub mod output;
pub mod platforms;
pub mod record;
pub mod runner;
pub mod source;
pub mod wait;

pub use config::ScribeConfig;
pub use errors::{AutomationError, ScribeError};
pub use format::compose;
pub use output::{ensure_output_dir, FallbackWriter, FsFallbackWriter};
pub use platforms::{create_driver, EditorDriver, InertDriver, SaveOutcome};
pub use record::{Record, RecordId};
pub use runner::{run, run_with, RunSummary};
pub use source::{HttpRecordSource, RecordSource};
