//! Upload-then-start run.
//!
//! ```text
//! Start → Uploading → UploadFailed
//!                   → UploadSucceeded → Deploying → DeployFailed
//!                                                 → DeploySucceeded
//! ```
//!
//! Deploying is only reachable with an [`UploadReceipt`], so a rejected or
//! failed upload can never start a deployment. Nothing is retried.

use crate::deploy::DeploymentTrigger;
use crate::types::{DeployResult, DeploymentStarted, DeploymentTarget, PresignedUrl, RunStage};
use crate::upload::{Archive, UploadReceipt, Uploader};
use std::path::Path;
use tracing::{error, info};

/// Everything one run needs, borrowed from the loaded configuration.
pub struct RunRequest<'a> {
    pub upload_url: &'a PresignedUrl,
    pub archive: &'a Path,
    pub target: &'a DeploymentTarget,
}

pub async fn run(
    uploader: &Uploader,
    trigger: &dyn DeploymentTrigger,
    request: RunRequest<'_>,
) -> DeployResult<DeploymentStarted> {
    transition(RunStage::Start, RunStage::Uploading);

    let receipt = match upload_stage(uploader, &request).await {
        Ok(receipt) => receipt,
        Err(e) => {
            error!(error = %e, "Upload failed");
            transition(RunStage::Uploading, RunStage::UploadFailed);
            return Err(e);
        }
    };

    transition(RunStage::Uploading, RunStage::UploadSucceeded);
    transition(RunStage::UploadSucceeded, RunStage::Deploying);

    match trigger.start_deployment(&receipt, request.target).await {
        Ok(started) => {
            transition(RunStage::Deploying, RunStage::DeploySucceeded);
            Ok(started)
        }
        Err(e) => {
            error!(error = %e, target = %request.target, "Deployment start failed");
            transition(RunStage::Deploying, RunStage::DeployFailed);
            Err(e)
        }
    }
}

async fn upload_stage(uploader: &Uploader, request: &RunRequest<'_>) -> DeployResult<UploadReceipt> {
    // The archive must be readable before anything goes over the network
    let archive = Archive::read(request.archive).await?;
    let outcome = uploader.upload(request.upload_url, &archive).await?;
    let receipt = outcome.into_receipt()?;

    info!(
        status = receipt.status(),
        bytes = receipt.bytes_sent(),
        etag = receipt.etag().unwrap_or("-"),
        "Upload accepted"
    );
    Ok(receipt)
}

fn transition(from: RunStage, to: RunStage) {
    info!(from = %from, to = %to, terminal = to.is_terminal(), "Run stage changed");
}
