// AWS Amplify Hosting adapter
// API Reference: https://docs.aws.amazon.com/amplify/latest/APIReference/API_StartDeployment.html
//
// The job must already exist: CreateDeployment issues the job id together with
// the pre-signed upload URL. This adapter only starts it.

use super::DeploymentTrigger;
use crate::types::{DeployError, DeployResult, DeploymentStarted, DeploymentTarget};
use crate::upload::UploadReceipt;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_amplify::config::retry::RetryConfig;
use aws_sdk_amplify::config::Region;
use aws_sdk_amplify::error::DisplayErrorContext;
use aws_sdk_amplify::Client;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmplifyConfig {
    /// Falls back to the standard AWS region chain when unset.
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Clone)]
pub struct AmplifyTrigger {
    client: Client,
}

impl AmplifyTrigger {
    /// Fails when neither the settings nor the AWS region chain yield a region,
    /// so the run stops before the single-use upload URL is spent.
    pub async fn new(config: &AmplifyConfig) -> DeployResult<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        let shared_config = loader.load().await;
        let region = shared_config.region().ok_or_else(|| {
            DeployError::Config(
                "no AWS region: pass --region, set AMPLIFY_DEPLOY_REGION or AWS_REGION".to_string(),
            )
        })?;
        debug!(region = %region, "Amplify client region resolved");

        // One StartDeployment request per run; the SDK's standard retries are off
        let mut builder = aws_sdk_amplify::config::Builder::from(&shared_config)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self::from_client(Client::from_conf(builder.build())))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeploymentTrigger for AmplifyTrigger {
    async fn start_deployment(
        &self,
        receipt: &UploadReceipt,
        target: &DeploymentTarget,
    ) -> DeployResult<DeploymentStarted> {
        debug!(
            upload_status = receipt.status(),
            bytes = receipt.bytes_sent(),
            "Starting deployment for accepted upload"
        );

        let output = self
            .client
            .start_deployment()
            .app_id(&target.app_id)
            .branch_name(&target.branch_name)
            .job_id(&target.job_id)
            .send()
            .await
            .map_err(|e| DeployError::Deployment(DisplayErrorContext(&e).to_string()))?;

        info!(
            app_id = %target.app_id,
            branch = %target.branch_name,
            job_id = %target.job_id,
            "Amplify accepted deployment start"
        );

        Ok(DeploymentStarted {
            target: target.clone(),
            response: format!("{:?}", output),
        })
    }
}
