use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::LabError;

/// Append-only, newline-delimited record of flagged requests, kept in a plain file so history
/// survives restarts.
///
/// Clones share one append lock; each entry goes out in a single write on a handle opened for
/// that entry alone.
#[derive(Clone)]
pub struct AttackLog {
    path: PathBuf,
    append_lock: Arc<Mutex<()>>,
}

impl AttackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> Result<bool, LabError> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    pub async fn record(
        &self,
        endpoint: &str,
        query: &str,
        input_summary: &str,
    ) -> Result<(), LabError> {
        let line = format_entry(
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            endpoint,
            query,
            input_summary,
        );

        let _guard = self.append_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %self.path.display(), endpoint, "attack attempt recorded");
        Ok(())
    }

    /// The last `n` entries, oldest first. A missing file reads as empty.
    pub async fn read_recent(&self, n: usize) -> Result<Vec<String>, LabError> {
        let lines = self.read_lines().await?;
        let skip = lines.len().saturating_sub(n);
        Ok(lines.into_iter().skip(skip).collect())
    }

    pub async fn count(&self) -> Result<usize, LabError> {
        Ok(self.read_lines().await?.len())
    }

    async fn read_lines(&self) -> Result<Vec<String>, LabError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(contents
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }
}

/// `[ts] endpoint - Query: q - Input: i` plus newline. Line breaks inside fields are escaped so
/// one call is always one line.
fn format_entry(ts: &str, endpoint: &str, query: &str, input_summary: &str) -> String {
    format!(
        "[{ts}] {} - Query: {} - Input: {}\n",
        one_line(endpoint),
        one_line(query),
        one_line(input_summary)
    )
}

fn one_line(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n")
}
