use clap::Parser;
use std::path::PathBuf;

/// Upload a static-site archive to a pre-signed URL and start its Amplify deployment.
///
/// Every value can also come from a TOML file (--config) or from
/// AMPLIFY_DEPLOY_* environment variables. Flags take precedence.
#[derive(Parser, Debug, Default, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional TOML settings file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pre-signed PUT URL from CreateDeployment. Prefer AMPLIFY_DEPLOY_UPLOAD_URL,
    /// flags are visible in the process list.
    #[arg(long, value_name = "URL")]
    pub upload_url: Option<String>,

    /// Local site archive (.zip)
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Amplify application id
    #[arg(long)]
    pub app_id: Option<String>,

    /// Branch the deployment belongs to
    #[arg(long)]
    pub branch_name: Option<String>,

    /// Pending job id from CreateDeployment
    #[arg(long)]
    pub job_id: Option<String>,

    /// AWS region of the Amplify app
    #[arg(long)]
    pub region: Option<String>,

    /// Override the Amplify API endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,
}
