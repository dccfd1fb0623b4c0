use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ArtifactError;

/// Durable record bridging the train and deploy stages
///
/// Written once after a successful training job and read back by a later,
/// independent deploy invocation. The three required fields are the only
/// state the client owns; everything else lives on the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// URI of the exported ONNX model artifact
    pub onnx_model_uri: String,
    /// Id of the training job that produced the model
    pub train_job_id: String,
    /// Device the deployed KPI will attach to
    pub mas_device_name: String,
    /// Name of the selected candidate in the performance dictionary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_model: Option<String>,
    /// When the record was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
}

impl ModelInfo {
    /// Load a model info record from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ArtifactError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ArtifactError::ReadError(path.to_path_buf(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ArtifactError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Save the record atomically (write to temp, then rename)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ArtifactError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ArtifactError::ParseError(path.to_path_buf(), e.to_string()))?;

        let temp_file = path.with_extension("yaml.tmp");
        fs::write(&temp_file, &yaml)
            .map_err(|e| ArtifactError::WriteError(temp_file.clone(), e))?;
        fs::rename(&temp_file, path)
            .map_err(|e| ArtifactError::WriteError(path.to_path_buf(), e))?;

        Ok(())
    }
}
