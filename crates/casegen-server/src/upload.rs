//! Upload persistence.
//!
//! Stores uploaded documents on disk as `{unix_millis}-{seq}-{original name}`
//! so the pipeline can read them by path. `seq` is a per-process counter, so
//! two uploads of the same name in the same millisecond still land in
//! distinct files. Files are kept after the request finishes.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Writes uploaded files into a single directory
///
/// Clones share the sequence counter.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    seq: Arc<AtomicU64>,
}

impl UploadStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Directory uploads are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh file named after `original_name`
    ///
    /// Never overwrites: an existing file at the chosen path is an
    /// `AlreadyExists` error.
    pub async fn persist(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!(
            "{}-{}-{}",
            millis,
            seq,
            sanitize_filename(original_name)
        ));

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());

        Ok(path)
    }
}

/// Keep only the final path component and replace characters that are
/// awkward in file names
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
