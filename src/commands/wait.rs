use tracing::warn;

use crate::core::FactoryClient;
use crate::error::{FactoryError, Result};
use crate::models::JobSummary;

/// Wait for a job, reacting to Ctrl-C instead of blocking through it
///
/// When the job ends in a failure state or the wait times out, the remote
/// log is fetched best-effort and printed so the operator sees why before
/// the error propagates.
pub async fn wait_with_interrupt(client: &FactoryClient, job_id: &str) -> Result<JobSummary> {
    let result = tokio::select! {
        result = client.wait_for_completion(job_id) => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted; job {} keeps running on the service", job_id);
            Err(FactoryError::Interrupted(job_id.to_string()))
        }
    };

    match result {
        Ok(summary) => Ok(summary),
        Err(err) => {
            if matches!(
                err,
                FactoryError::JobFailed { .. } | FactoryError::WaitTimeout { .. }
            ) {
                print_remote_logs(client, job_id).await;
            }
            Err(err.into())
        }
    }
}

/// Print whatever log text the service has for a job
pub async fn print_remote_logs(client: &FactoryClient, job_id: &str) {
    match client.fetch_logs(job_id).await {
        Ok(Some(logs)) => {
            println!("--- remote log for job {} ---", job_id);
            println!("{}", logs);
        }
        Ok(None) => println!("No logs available yet for job {}", job_id),
        Err(err) => warn!("Could not fetch logs for job {}: {}", job_id, err),
    }
}
