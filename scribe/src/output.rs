//! Output directory handling and the direct-write fallback

use crate::errors::ScribeError;
use crate::record::RecordId;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Creates `dir` and any missing parents. Safe to call repeatedly; always
/// returns the same path.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf, ScribeError> {
    fs::create_dir_all(dir).map_err(|source| ScribeError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    debug!("output directory ready: {}", dir.display());
    Ok(dir.to_path_buf())
}

/// Full path of the file a record is saved to.
pub fn destination_for(dir: &Path, id: &RecordId) -> PathBuf {
    dir.join(id.file_name())
}

/// Last modification time of `path`, `None` when it does not exist.
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// True when `path` exists and was modified after `before`, the value
/// [`modified_time`] returned before the save was attempted.
pub fn written_since(path: &Path, before: Option<SystemTime>) -> bool {
    match (modified_time(path), before) {
        (Some(now), Some(before)) => now > before,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Writes content straight to disk when the editor could not save it.
pub trait FallbackWriter {
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// UTF-8 file writer that replaces whatever is already at the path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFallbackWriter;

impl FallbackWriter for FsFallbackWriter {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let scratch = tempfile::tempdir().unwrap();
        let dir = scratch.path().join("Desktop").join("tjm-project");

        let first = ensure_output_dir(&dir).unwrap();
        let second = ensure_output_dir(&dir).unwrap();

        assert_eq!(first, second);
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_output_dir_reports_blocked_path() {
        let scratch = tempfile::tempdir().unwrap();
        let file = scratch.path().join("occupied");
        fs::write(&file, "x").unwrap();

        let err = ensure_output_dir(&file.join("child")).unwrap_err();
        assert!(matches!(err, ScribeError::OutputDir { .. }));
        assert!(!err.is_fetch_failure());
    }

    #[test]
    fn fallback_write_overwrites_existing_file() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 1.txt");
        fs::write(&path, "stale content that is longer than the new one").unwrap();

        let content = "ABC\n\nxyz\n\n(source: jsonplaceholder.typicode.com/posts/1)";
        FsFallbackWriter.write(&path, content).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn fallback_write_keeps_unicode_intact() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 2.txt");

        FsFallbackWriter.write(&path, "héllo — wörld").unwrap();

        assert_eq!(fs::read(&path).unwrap(), "héllo — wörld".as_bytes());
    }

    #[test]
    fn missing_file_was_not_written() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 3.txt");

        assert_eq!(modified_time(&path), None);
        assert!(!written_since(&path, None));
    }

    #[test]
    fn newly_created_file_counts_as_written() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 3.txt");
        let before = modified_time(&path);

        fs::write(&path, "saved").unwrap();

        assert!(written_since(&path, before));
    }

    #[test]
    fn untouched_stale_file_is_not_written() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 4.txt");
        fs::write(&path, "from an earlier run").unwrap();
        let before = modified_time(&path);

        assert!(before.is_some());
        assert!(!written_since(&path, before));
    }

    #[test]
    fn rewritten_file_counts_as_written() {
        let scratch = tempfile::tempdir().unwrap();
        let path = scratch.path().join("post 5.txt");
        fs::write(&path, "old").unwrap();
        let stale = SystemTime::now() - Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(stale)
            .unwrap();
        let before = modified_time(&path);

        FsFallbackWriter.write(&path, "new").unwrap();

        assert!(written_since(&path, before));
    }

    #[test]
    fn destination_joins_file_name() {
        let path = destination_for(Path::new("out"), &RecordId::new("5"));
        assert_eq!(path, Path::new("out").join("post 5.txt"));
    }
}
