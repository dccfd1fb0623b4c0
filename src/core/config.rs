use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::models::{KpiSpec, ServiceConfig};

/// Load the service config with CLI overrides applied
///
/// Configuration is constructed once in the command entry point and passed
/// into the client by value; nothing reads config files after this point.
pub fn load_service_config(
    path: &Path,
    endpoint: Option<String>,
    poll_interval: Option<u64>,
    max_wait: Option<u64>,
) -> Result<ServiceConfig> {
    let config = ServiceConfig::load_or_default(path)?;
    let config = config.with_overrides(endpoint, poll_interval, max_wait);

    info!(
        "Factory configured: endpoint={}, poll every {}s, max wait {}s",
        config.endpoint_url, config.polling.interval_seconds, config.polling.max_wait_seconds
    );

    Ok(config)
}

/// Load the KPI specification
pub fn load_kpi_spec(path: &Path) -> Result<KpiSpec> {
    let spec = KpiSpec::load_from_file(path)?;

    info!(
        "KPI spec loaded: device={}, {} feature column(s), {} target column(s)",
        spec.device_name,
        spec.feature_columns.len(),
        spec.target_columns.len()
    );

    Ok(spec)
}
