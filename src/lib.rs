// Amplify Deploy - upload a static-site archive and start its Amplify Hosting deployment

pub mod cli;
pub mod config;
pub mod deploy;
pub mod pipeline;
pub mod types;
pub mod upload;
pub mod utils;

// Re-exports for convenience
pub use crate::config::Config;
pub use deploy::{AmplifyConfig, AmplifyTrigger, DeploymentTrigger};
pub use pipeline::{run, RunRequest};
pub use types::{DeployError, DeployResult, DeploymentStarted, DeploymentTarget, PresignedUrl};
pub use upload::{Archive, UploadOutcome, UploadReceipt, Uploader};
