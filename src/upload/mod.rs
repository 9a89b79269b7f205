// Archive upload to a pre-signed storage URL

pub mod archive;
pub mod presigned;

pub use archive::*;
pub use presigned::*;

use crate::types::{DeployError, DeployResult};

/// Proof that the storage service accepted the archive with HTTP 200.
///
/// Only the uploader can create one, and starting a deployment requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    status: u16,
    bytes_sent: usize,
    etag: Option<String>,
    body: String,
}

impl UploadReceipt {
    pub(crate) fn new(status: u16, bytes_sent: usize, etag: Option<String>, body: String) -> Self {
        Self {
            status,
            bytes_sent,
            etag,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Result of the PUT: accepted (exactly 200) or rejected with the status and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted(UploadReceipt),
    Rejected { status: u16, body: String },
}

impl UploadOutcome {
    pub fn status(&self) -> u16 {
        match self {
            UploadOutcome::Accepted(receipt) => receipt.status(),
            UploadOutcome::Rejected { status, .. } => *status,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadOutcome::Accepted(_))
    }

    pub fn into_receipt(self) -> DeployResult<UploadReceipt> {
        match self {
            UploadOutcome::Accepted(receipt) => Ok(receipt),
            UploadOutcome::Rejected { status, body } => {
                Err(DeployError::UploadRejected { status, body })
            }
        }
    }
}
