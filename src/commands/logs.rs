use std::path::Path;

use crate::commands::wait::print_remote_logs;
use crate::core::{load_service_config, FactoryClient};
use crate::error::Result;

/// Fetch and print the remote log text for a job
pub async fn show_logs(service_path: &Path, endpoint: Option<String>, job_id: &str) -> Result<()> {
    let config = load_service_config(service_path, endpoint, None, None)?;
    let client = FactoryClient::new(config)?;

    print_remote_logs(&client, job_id).await;
    Ok(())
}
