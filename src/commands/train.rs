use dialoguer::{theme::ColorfulTheme, Select};
use std::path::PathBuf;
use tracing::info;

use crate::commands::status::print_performance;
use crate::commands::wait::wait_with_interrupt;
use crate::core::{load_kpi_spec, load_service_config, recipes, select_model, FactoryClient};
use crate::error::{MfError, Result};
use crate::models::JobSummary;

/// Train options
pub struct TrainOptions {
    /// Path to the KPI specification
    pub kpi_path: PathBuf,
    /// Path to the service config
    pub service_path: PathBuf,
    /// Training dataset (defaults to the KPI spec's dataset_file)
    pub data: Option<PathBuf>,
    /// Where to write the model info artifact
    pub out: PathBuf,
    /// Candidate model to select by name
    pub select: Option<String>,
    /// Pick the candidate interactively
    pub pick: bool,
    /// Submit and print the job id without waiting
    pub no_wait: bool,
    /// Endpoint override
    pub endpoint: Option<String>,
    /// Poll interval override in seconds
    pub poll_interval: Option<u64>,
    /// Max wait override in seconds
    pub max_wait: Option<u64>,
}

/// Submit a training job, wait for it, and persist the selected model
pub async fn run_train(options: TrainOptions) -> Result<()> {
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

    let request = recipes::train_request(&config, &kpi, &data_path).await?;
    let client = FactoryClient::new(config)?;

    let handle = client
        .submit(&request.url, request.fields, request.files)
        .await?;
    println!("Training job submitted: {}", handle.job_id);

    if options.no_wait {
        println!("Check progress with 'mfctl status {}'", handle.job_id);
        return Ok(());
    }

    let summary = wait_with_interrupt(&client, &handle.job_id).await?;
    print_performance(&summary);

    let selected = match (&options.select, options.pick) {
        (Some(name), _) => Some(name.clone()),
        (None, true) => Some(pick_candidate(&summary)?),
        (None, false) => None,
    };

    let model_info = select_model(
        &summary,
        selected.as_deref(),
        &handle.job_id,
        &kpi.device_name,
    )?;
    model_info.save_to_file(&options.out)?;

    info!(
        "Selected model {} ({})",
        model_info.selected_model.as_deref().unwrap_or("?"),
        model_info.onnx_model_uri
    );
    println!("\nModel info written to {}", options.out.display());
    println!("Deploy with 'mfctl deploy --model-info {}'", options.out.display());

    Ok(())
}

fn pick_candidate(summary: &JobSummary) -> Result<String> {
    let names: Vec<String> = summary.performance_dictionary.keys().cloned().collect();
    if names.is_empty() {
        return Err(crate::error::ArtifactError::NoCandidates.into());
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a candidate model")
        .items(&names)
        .default(0)
        .interact()
        .map_err(|e| MfError::Prompt(format!("Failed to get user input: {}", e)))?;

    Ok(names[selection].clone())
}
