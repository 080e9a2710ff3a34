//! Append-only JSON-lines document logs (orders, reviews, contacts).
//!
//! One serialized document per line. Documents are never rewritten or
//! deleted once appended.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

pub struct DocumentLog {
    path: PathBuf,
}

impl DocumentLog {
    pub fn new(data_dir: &Path, name: &str) -> DocumentLog {
        DocumentLog {
            path: data_dir.join(name),
        }
    }

    /// Append one document as a single line.
    pub async fn append<T: Serialize>(&self, doc: &T) -> Result<()> {
        let mut line = serde_json::to_vec(doc).context("serializing document")?;
        line.push(b'\n');
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("opening {}", self.path.display()))?;
        file.write_all(&line).await.context("appending document")?;
        file.flush().await.context("flushing document log")?;
        Ok(())
    }

    /// Read every document in insertion order. A missing file is an empty
    /// collection; a corrupt line is skipped with a warning.
    pub async fn read_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };

        let mut docs = Vec::new();
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            match serde_json::from_str(line) {
                Ok(doc) => docs.push(doc),
                Err(err) => tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "skipping corrupt document line"
                ),
            }
        }
        Ok(docs)
    }
}
