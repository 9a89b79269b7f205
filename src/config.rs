use crate::cli::Cli;
use crate::deploy::AmplifyConfig;
use crate::types::{DeployResult, DeploymentTarget, PresignedUrl};
use ::config::{Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "AMPLIFY_DEPLOY";

#[derive(Debug, Clone)]
pub struct Config {
    pub upload: UploadConfig,
    pub deployment: DeploymentTarget,
    pub amplify: AmplifyConfig,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub url: PresignedUrl,
    pub archive: PathBuf,
}

// Flat layout shared by the TOML file, the environment and the flags
#[derive(Debug, Deserialize)]
struct Settings {
    upload_url: PresignedUrl,
    archive: PathBuf,
    app_id: String,
    branch_name: String,
    job_id: String,
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl From<Settings> for Config {
    fn from(settings: Settings) -> Self {
        Self {
            upload: UploadConfig {
                url: settings.upload_url,
                archive: settings.archive,
            },
            deployment: DeploymentTarget {
                app_id: settings.app_id,
                branch_name: settings.branch_name,
                job_id: settings.job_id,
            },
            amplify: AmplifyConfig {
                region: settings.region,
                endpoint_url: settings.endpoint_url,
            },
        }
    }
}

impl Config {
    /// Layer the optional settings file, `.env` plus AMPLIFY_DEPLOY_* variables,
    /// and finally the command-line flags.
    pub fn load(cli: &Cli) -> DeployResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(cli, Environment::with_prefix(ENV_PREFIX))
    }

    pub fn from_sources(cli: &Cli, environment: Environment) -> DeployResult<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        let settings: Settings = builder
            .add_source(environment)
            .set_override_option("upload_url", cli.upload_url.clone())?
            .set_override_option(
                "archive",
                cli.archive
                    .as_ref()
                    .map(|path| path.to_string_lossy().into_owned()),
            )?
            .set_override_option("app_id", cli.app_id.clone())?
            .set_override_option("branch_name", cli.branch_name.clone())?
            .set_override_option("job_id", cli.job_id.clone())?
            .set_override_option("region", cli.region.clone())?
            .set_override_option("endpoint_url", cli.endpoint_url.clone())?
            .build()?
            .try_deserialize()?;

        Ok(settings.into())
    }
}
