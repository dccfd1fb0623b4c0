use chrono::Utc;

use crate::error::ArtifactError;
use crate::models::{CandidateModel, JobSummary, ModelInfo};

/// Pick a candidate model from a completed training summary
///
/// With an explicit key, returns exactly that entry; with none, the
/// first-inserted entry. No ranking is applied: callers who want a
/// different candidate inspect the metrics table and choose.
pub fn select_model(
    summary: &JobSummary,
    key: Option<&str>,
    train_job_id: &str,
    device_name: &str,
) -> Result<ModelInfo, ArtifactError> {
    let (name, candidate) = find_candidate(summary, key)?;

    Ok(ModelInfo {
        onnx_model_uri: candidate.model_uri.clone(),
        train_job_id: train_job_id.to_string(),
        mas_device_name: device_name.to_string(),
        selected_model: Some(name.to_string()),
        trained_at: Some(Utc::now()),
    })
}

fn find_candidate<'a>(
    summary: &'a JobSummary,
    key: Option<&str>,
) -> Result<(&'a str, &'a CandidateModel), ArtifactError> {
    let dictionary = &summary.performance_dictionary;

    match key {
        Some(key) => dictionary
            .get_key_value(key)
            .map(|(name, candidate)| (name.as_str(), candidate))
            .ok_or_else(|| ArtifactError::UnknownModelKey {
                key: key.to_string(),
                available: dictionary.keys().cloned().collect(),
            }),
        None => dictionary
            .first()
            .map(|(name, candidate)| (name.as_str(), candidate))
            .ok_or(ArtifactError::NoCandidates),
    }
}
