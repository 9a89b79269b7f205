use crate::types::{DeployError, DeployResult};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A local site archive, read into memory once.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    bytes: Bytes,
}

impl Archive {
    /// Read the whole file. The handle is closed before this returns, on
    /// success or failure.
    pub async fn read(path: impl AsRef<Path>) -> DeployResult<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = tokio::fs::read(&path)
            .await
            .map_err(|source| DeployError::Archive {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), bytes = contents.len(), "Archive read");

        Ok(Self {
            path,
            bytes: Bytes::from(contents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}
