use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// KPI specification loaded from kpi.yaml
///
/// Describes the dataset and the device the trained model will monitor.
/// Column lists and their human-readable labels are kept parallel; they are
/// comma-joined into form fields when a recipe is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSpec {
    /// Device name registered in the monitoring platform
    pub device_name: String,
    /// Human-readable device description
    #[serde(default)]
    pub device_description: String,
    /// CSV file with the training data
    pub dataset_file: String,
    /// Column holding the asset identifier
    pub assetid_column: String,
    /// Column holding the observation timestamp
    pub timestamp_column: String,
    /// strftime-style format of the timestamp column
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    /// Feature column names
    pub feature_columns: Vec<String>,
    /// Human-readable labels for the feature columns
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Target column names
    pub target_columns: Vec<String>,
    /// Human-readable labels for the target columns
    #[serde(default)]
    pub target_names: Vec<String>,
    /// Columns published as device metrics (defaults to features + targets)
    #[serde(default)]
    pub metric_columns: Vec<String>,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl KpiSpec {
    /// Columns published as device metrics
    pub fn metric_columns(&self) -> Vec<String> {
        if !self.metric_columns.is_empty() {
            return self.metric_columns.clone();
        }
        let mut columns = self.feature_columns.clone();
        columns.extend(self.target_columns.iter().cloned());
        columns
    }

    /// Labels fall back to the column names when not given
    pub fn feature_names(&self) -> Vec<String> {
        if self.feature_names.is_empty() {
            self.feature_columns.clone()
        } else {
            self.feature_names.clone()
        }
    }

    pub fn target_names(&self) -> Vec<String> {
        if self.target_names.is_empty() {
            self.target_columns.clone()
        } else {
            self.target_names.clone()
        }
    }
}

/// Model Factory service location loaded from factory.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the Model Factory service
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// Training recipe sub-path
    #[serde(default = "default_train_path")]
    pub train_path: String,
    /// Device creation sub-path
    #[serde(default = "default_device_path")]
    pub device_path: String,
    /// Model deployment sub-path
    #[serde(default = "default_deploy_path")]
    pub deploy_path: String,
    /// Timeout in seconds for a single HTTP request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Polling behavior
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            train_path: default_train_path(),
            device_path: default_device_path(),
            deploy_path: default_deploy_path(),
            request_timeout_seconds: default_request_timeout(),
            polling: PollingConfig::default(),
        }
    }
}

fn default_endpoint_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_train_path() -> String {
    "/recipe/supervised-anomaly".to_string()
}

fn default_device_path() -> String {
    "/deployment/monitor/device/create".to_string()
}

fn default_deploy_path() -> String {
    "/deployment/monitor/model/create".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

impl ServiceConfig {
    pub fn train_url(&self) -> String {
        format!("{}{}", self.endpoint_url, self.train_path)
    }

    pub fn device_url(&self) -> String {
        format!("{}{}", self.endpoint_url, self.device_path)
    }

    pub fn deploy_url(&self) -> String {
        format!("{}{}", self.endpoint_url, self.deploy_path)
    }

    pub fn summary_url(&self, job_id: &str) -> String {
        format!("{}/summary/{}", self.endpoint_url, job_id)
    }

    pub fn log_url(&self, job_id: &str) -> String {
        format!("{}/log/{}", self.endpoint_url, job_id)
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        poll_interval: Option<u64>,
        max_wait: Option<u64>,
    ) -> Self {
        if let Some(url) = endpoint {
            self.endpoint_url = url;
        }
        if let Some(secs) = poll_interval {
            self.polling.interval_seconds = secs;
        }
        if let Some(secs) = max_wait {
            self.polling.max_wait_seconds = secs;
        }
        self
    }
}

/// Polling behavior for the status endpoint
///
/// The status vocabulary is configuration, not a guess: the service may
/// report states beyond INITIALIZING/EXECUTING/DONE, and any status outside
/// `running_states` and `success_state` ends the wait immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between status requests
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Give up after this much total waiting
    #[serde(default = "default_max_wait")]
    pub max_wait_seconds: u64,
    /// Statuses that mean the job is still running
    #[serde(default = "default_running_states")]
    pub running_states: Vec<String>,
    /// Status that means the job succeeded
    #[serde(default = "default_success_state")]
    pub success_state: String,
    /// Statuses the service is known to report on failure
    #[serde(default = "default_failure_states")]
    pub failure_states: Vec<String>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            max_wait_seconds: default_max_wait(),
            running_states: default_running_states(),
            success_state: default_success_state(),
            failure_states: default_failure_states(),
        }
    }
}

fn default_interval() -> u64 {
    2
}

fn default_max_wait() -> u64 {
    1800
}

fn default_running_states() -> Vec<String> {
    vec!["INITIALIZING".to_string(), "EXECUTING".to_string()]
}

fn default_success_state() -> String {
    "DONE".to_string()
}

fn default_failure_states() -> Vec<String> {
    vec!["FAILED".to_string(), "ERROR".to_string()]
}

impl KpiSpec {
    /// Load a KPI spec from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }
}

impl ServiceConfig {
    /// Load a service config from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e))
    }

    /// Load from a file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, serde_yaml::Error),
}
