use amplify_deploy::cli::Cli;
use amplify_deploy::pipeline::{self, RunRequest};
use amplify_deploy::utils::init_logger;
use amplify_deploy::{AmplifyTrigger, Config, DeploymentStarted, Uploader};
use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    init_logger();

    match deploy(cli).await {
        Ok(started) => {
            println!("✅ Upload successful!");
            println!("Deployment started for {}: {}", started.target, started.response);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn deploy(cli: Cli) -> anyhow::Result<DeploymentStarted> {
    let config = Config::load(&cli).context("Failed to load settings")?;
    info!(
        upload_url = %config.upload.url,
        archive = %config.upload.archive.display(),
        target = %config.deployment,
        region = config.amplify.region.as_deref().unwrap_or("<default chain>"),
        "Configuration loaded"
    );

    let uploader = Uploader::new();
    let trigger = AmplifyTrigger::new(&config.amplify).await?;

    let started = pipeline::run(
        &uploader,
        &trigger,
        RunRequest {
            upload_url: &config.upload.url,
            archive: &config.upload.archive,
            target: &config.deployment,
        },
    )
    .await?;

    Ok(started)
}
