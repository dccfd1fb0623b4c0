use std::path::Path;
use tracing::info;

use crate::core::{load_service_config, FactoryClient};
use crate::error::Result;
use crate::models::JobSummary;

/// Fetch and print the current status of a job (single request, no waiting)
pub async fn show_status(
    service_path: &Path,
    endpoint: Option<String>,
    job_id: &str,
) -> Result<()> {
    let config = load_service_config(service_path, endpoint, None, None)?;
    let client = FactoryClient::new(config)?;

    info!("Fetching status for job {}", job_id);
    let report = client.fetch_summary(job_id).await?;

    println!("Job:    {}", job_id);
    println!("Status: {}", report.status);

    if let Some(summary) = &report.summary {
        print_performance(summary);
    }

    Ok(())
}

/// Print the training performance dictionary as a readable table
pub fn print_performance(summary: &JobSummary) {
    if summary.performance_dictionary.is_empty() {
        return;
    }

    println!("\nCandidate models:");
    for (name, candidate) in &summary.performance_dictionary {
        println!("  {} -> {}", name, candidate.model_uri);
        for (split, metrics) in &candidate.performance {
            println!(
                "    {:<12} r2={} rmse={} coverage={} width(mean/median)={}/{}",
                split,
                fmt_metric(metrics.r2_score),
                fmt_metric(metrics.rmse),
                fmt_metric(metrics.coverage),
                fmt_metric(metrics.mean_interval_width),
                fmt_metric(metrics.median_interval_width),
            );
        }
    }
}

fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_metric() {
        assert_eq!(fmt_metric(Some(0.91234)), "0.9123");
        assert_eq!(fmt_metric(None), "-");
    }
}
