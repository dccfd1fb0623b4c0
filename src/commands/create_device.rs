use std::path::PathBuf;

use crate::commands::wait::wait_with_interrupt;
use crate::core::{load_kpi_spec, load_service_config, recipes, FactoryClient};
use crate::error::Result;

/// Device creation options
pub struct DeviceOptions {
    /// Path to the KPI specification
    pub kpi_path: PathBuf,
    /// Path to the service config
    pub service_path: PathBuf,
    /// Sample dataset used to derive the device metrics
    pub data: Option<PathBuf>,
    /// IoT platform credentials file
    pub credentials: PathBuf,
    /// Asset model description file
    pub asset_model: PathBuf,
    /// Submit and print the job id without waiting
    pub no_wait: bool,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Poll interval override in seconds
    pub poll_interval: Option<u64>,
    /// Max wait override in seconds
    pub max_wait: Option<u64>,
}

/// Register the device record in the monitoring platform
pub async fn run_create_device(options: DeviceOptions) -> Result<()> {
    let kpi = load_kpi_spec(&options.kpi_path)?;
    let config = load_service_config(
        &options.service_path,
        options.endpoint,
        options.poll_interval,
        options.max_wait,
    )?;

    let data_path = options
        .data
        .unwrap_or_else(|| PathBuf::from(&kpi.dataset_file));

    let request = recipes::create_device_request(
        &config,
        &kpi,
        &data_path,
        &options.credentials,
        &options.asset_model,
    )
    .await?;
    let client = FactoryClient::new(config)?;

    let handle = client
        .submit(&request.url, request.fields, request.files)
        .await?;
    println!("Device creation job submitted: {}", handle.job_id);

    if options.no_wait {
        println!("Check progress with 'mfctl status {}'", handle.job_id);
        return Ok(());
    }

    wait_with_interrupt(&client, &handle.job_id).await?;
    println!("Device '{}' created", kpi.device_name);

    Ok(())
}
