use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for mfctl
#[derive(Error, Debug)]
pub enum MfError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Factory error: {0}")]
    Factory(#[from] FactoryError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("Credentials file not found: {0}")]
    CredentialsNotFound(PathBuf),

    #[error("Asset model file not found: {0}")]
    AssetModelNotFound(PathBuf),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the Model Factory API
#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Submission response carried no job id")]
    MissingJobId,

    #[error("Job {job_id} ended in state '{status}'")]
    JobFailed { job_id: String, status: String },

    #[error("Job {job_id} still running after {waited_secs}s (max wait reached)")]
    WaitTimeout { job_id: String, waited_secs: u64 },

    #[error("Interrupted while waiting for job {0}")]
    Interrupted(String),
}

impl From<reqwest::Error> for FactoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FactoryError::Timeout(0)
        } else if err.is_connect() {
            FactoryError::ConnectionRefused(err.to_string())
        } else if let Some(status) = err.status() {
            FactoryError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FactoryError::RequestFailed(err.to_string())
        }
    }
}

/// Errors related to the ModelInfo artifact bridging train and deploy
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read model info {0}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Failed to write model info {0}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Failed to parse model info {0}: {1}")]
    ParseError(PathBuf, String),

    #[error("Training summary contains no candidate models")]
    NoCandidates,

    #[error("Unknown model '{key}'; available: {available:?}")]
    UnknownModelKey { key: String, available: Vec<String> },
}

pub type Result<T> = std::result::Result<T, MfError>;
