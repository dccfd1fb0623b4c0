use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::FactoryError;
use crate::models::{
    JobHandle, JobState, JobSummary, LogsResponse, ServiceConfig, StatusReport, SubmitResponse,
};

/// A named file attachment for a multipart submission
///
/// Bytes are read fully before the request is built, so no file handle is
/// held open across a network exchange.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Model Factory API client
///
/// Submits recipe jobs and observes their status. All job execution state
/// lives on the service; this client only reads it.
pub struct FactoryClient {
    client: Client,
    config: ServiceConfig,
}

impl FactoryClient {
    /// Create a new client with the given configuration
    pub fn new(config: ServiceConfig) -> Result<Self, FactoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| FactoryError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Submit a job as a single multipart POST
    ///
    /// Transport failure, a non-2xx response, or a body without a job id
    /// are all fatal: without a handle there is nothing to poll, and the
    /// submission is never retried automatically.
    pub async fn submit(
        &self,
        url: &str,
        fields: Vec<(String, String)>,
        files: Vec<(String, FilePart)>,
    ) -> Result<JobHandle, FactoryError> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        for (name, file) in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str(&file.content_type)
                .map_err(|e| FactoryError::RequestFailed(e.to_string()))?;
            form = form.part(name, part);
        }

        debug!("Submitting job to {}", url);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    FactoryError::ConnectionRefused(format!(
                        "Could not connect to the Model Factory at {}",
                        url
                    ))
                } else if e.is_timeout() {
                    FactoryError::Timeout(self.config.request_timeout_seconds)
                } else {
                    FactoryError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(FactoryError::HttpError { status, message });
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| FactoryError::ParseError(e.to_string()))?;

        if let Some(status) = &body.status {
            debug!("Submission accepted with initial status {}", status);
        }
        let handle = JobHandle::from_response(body)?;
        info!("Submitted job {}", handle.job_id);
        Ok(handle)
    }

    /// Fetch the current status report for a job (single GET, no side effects)
    pub async fn fetch_summary(&self, job_id: &str) -> Result<StatusReport, FactoryError> {
        let url = self.config.summary_url(job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(FactoryError::HttpError { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| FactoryError::ParseError(e.to_string()))
    }

    /// Fetch the job's log text, if the service has any yet
    pub async fn fetch_logs(&self, job_id: &str) -> Result<Option<String>, FactoryError> {
        let url = self.config.log_url(job_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(FactoryError::HttpError { status, message });
        }

        let body: LogsResponse = response
            .json()
            .await
            .map_err(|e| FactoryError::ParseError(e.to_string()))?;

        Ok(body.logs)
    }

    /// Poll the status endpoint until the job reaches a terminal state
    ///
    /// Running states sleep for the configured interval and retry, up to the
    /// configured maximum wait. The success state returns the summary. Any
    /// other status ends the wait immediately with an error; a remote
    /// failure must not look like "still running".
    pub async fn wait_for_completion(&self, job_id: &str) -> Result<JobSummary, FactoryError> {
        let interval = Duration::from_secs(self.config.polling.interval_seconds);
        let max_wait = Duration::from_secs(self.config.polling.max_wait_seconds);
        let started = Instant::now();
        let mut last_status = String::new();

        loop {
            let report = self.fetch_summary(job_id).await?;

            if report.status != last_status {
                info!("Job {} is {}", job_id, report.status);
                last_status = report.status.clone();
            } else {
                debug!("Job {} still {}", job_id, report.status);
            }

            match JobState::classify(&report.status, &self.config.polling) {
                JobState::Succeeded => {
                    info!(
                        "Job {} completed after {}s",
                        job_id,
                        started.elapsed().as_secs()
                    );
                    return Ok(report.summary.unwrap_or_default());
                }
                JobState::Failed => {
                    if self
                        .config
                        .polling
                        .failure_states
                        .iter()
                        .any(|s| *s == report.status)
                    {
                        warn!("Job {} reported failure state {}", job_id, report.status);
                    } else {
                        warn!(
                            "Job {} reported unrecognized state {}; treating as failure",
                            job_id, report.status
                        );
                    }
                    return Err(FactoryError::JobFailed {
                        job_id: job_id.to_string(),
                        status: report.status,
                    });
                }
                JobState::Running => {
                    if started.elapsed() >= max_wait {
                        return Err(FactoryError::WaitTimeout {
                            job_id: job_id.to_string(),
                            waited_secs: started.elapsed().as_secs(),
                        });
                    }
                    tokio::time::sleep(interval).await;
                }
            }
        }
    }
}
