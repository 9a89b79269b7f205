// Deployment trigger abstraction

pub mod amplify;

pub use amplify::*;

use crate::types::{DeployResult, DeploymentStarted, DeploymentTarget};
use crate::upload::UploadReceipt;
use async_trait::async_trait;

/// Starts a pending deployment job in the hosting service.
///
/// The receipt argument ties every call to an accepted upload. Implementations
/// make exactly one remote call and never retry.
#[async_trait]
pub trait DeploymentTrigger: Send + Sync {
    async fn start_deployment(
        &self,
        receipt: &UploadReceipt,
        target: &DeploymentTarget,
    ) -> DeployResult<DeploymentStarted>;
}
