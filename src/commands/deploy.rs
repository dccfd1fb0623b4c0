use std::path::PathBuf;
use tracing::info;

use crate::commands::wait::wait_with_interrupt;
use crate::core::{load_service_config, recipes, FactoryClient};
use crate::error::Result;
use crate::models::ModelInfo;

/// Deploy options
pub struct DeployOptions {
    /// Path to the service config
    pub service_path: PathBuf,
    /// Model info artifact written by a successful train run
    pub model_info: PathBuf,
    /// IoT platform credentials file
    pub credentials: PathBuf,
    /// Also prepare a KPI dashboard in the monitoring platform
    pub dashboard: bool,
    /// Submit and print the job id without waiting
    pub no_wait: bool,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Poll interval override in seconds
    pub poll_interval: Option<u64>,
    /// Max wait override in seconds
    pub max_wait: Option<u64>,
}

/// Deploy a trained model as a streaming KPI
///
/// The model info record is the required bridge from the train stage; a
/// deploy never re-queries training state.
pub async fn run_deploy(options: DeployOptions) -> Result<()> {
    let model_info = ModelInfo::load_from_file(&options.model_info)?;
    info!(
        "Deploying model {} from training job {}",
        model_info.onnx_model_uri, model_info.train_job_id
    );

    let config = load_service_config(
        &options.service_path,
        options.endpoint,
        options.poll_interval,
        options.max_wait,
    )?;

    let request = recipes::deploy_request(
        &config,
        &model_info,
        &options.credentials,
        options.dashboard,
    )
    .await?;
    let client = FactoryClient::new(config)?;

    let handle = client
        .submit(&request.url, request.fields, request.files)
        .await?;
    println!("Deployment job submitted: {}", handle.job_id);

    if options.no_wait {
        println!("Check progress with 'mfctl status {}'", handle.job_id);
        return Ok(());
    }

    wait_with_interrupt(&client, &handle.job_id).await?;
    println!(
        "Model deployed as a KPI on device '{}'",
        model_info.mas_device_name
    );

    Ok(())
}
