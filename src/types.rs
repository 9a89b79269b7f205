// Type definitions shared by the upload and deployment stages

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Identifies the pending Amplify job to start. Values are passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub app_id: String,
    pub branch_name: String,
    pub job_id: String,
}

impl DeploymentTarget {
    pub fn new(
        app_id: impl Into<String>,
        branch_name: impl Into<String>,
        job_id: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            branch_name: branch_name.into(),
            job_id: job_id.into(),
        }
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} job {}", self.app_id, self.branch_name, self.job_id)
    }
}

/// A pre-signed upload URL.
///
/// The query string carries short-lived credentials, so neither `Debug` nor
/// `Display` ever print it. Use [`PresignedUrl::expose`] to get the full value
/// when building the request.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PresignedUrl(String);

impl PresignedUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The complete URL including its signature.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Scheme, host and path only.
    pub fn redacted(&self) -> &str {
        match self.0.split_once('?') {
            Some((base, _)) => base,
            None => &self.0,
        }
    }

    pub fn is_signed(&self) -> bool {
        self.0.contains('?')
    }
}

impl From<String> for PresignedUrl {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for PresignedUrl {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_signed() {
            write!(f, "{}?<redacted>", self.redacted())
        } else {
            f.write_str(self.redacted())
        }
    }
}

impl fmt::Debug for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PresignedUrl").field(&self.to_string()).finish()
    }
}

/// Response of a successful deployment start, kept as rendered by the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStarted {
    pub target: DeploymentTarget,
    pub response: String,
}

/// States of a single run. No state is re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Start,
    Uploading,
    UploadFailed,
    UploadSucceeded,
    Deploying,
    DeployFailed,
    DeploySucceeded,
}

impl RunStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStage::UploadFailed | RunStage::DeployFailed | RunStage::DeploySucceeded
        )
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStage::Start => write!(f, "start"),
            RunStage::Uploading => write!(f, "uploading"),
            RunStage::UploadFailed => write!(f, "upload_failed"),
            RunStage::UploadSucceeded => write!(f, "upload_succeeded"),
            RunStage::Deploying => write!(f, "deploying"),
            RunStage::DeployFailed => write!(f, "deploy_failed"),
            RunStage::DeploySucceeded => write!(f, "deploy_succeeded"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload transport error")]
    Transport(#[source] reqwest::Error),

    #[error("Upload rejected with HTTP status {status}: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("Deployment start failed: {0}")]
    Deployment(String),
}

impl From<::config::ConfigError> for DeployError {
    fn from(err: ::config::ConfigError) -> Self {
        DeployError::Config(err.to_string())
    }
}

pub type DeployResult<T> = std::result::Result<T, DeployError>;
