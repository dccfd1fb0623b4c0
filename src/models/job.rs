use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FactoryError;
use crate::models::PollingConfig;

/// Response to a recipe submission
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Handle for a submitted job
///
/// Only constructed from a submission response carrying a non-empty id, so
/// holding a handle means there is something to poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn from_response(response: SubmitResponse) -> Result<Self, FactoryError> {
        match response.job_id {
            Some(id) if !id.is_empty() => Ok(Self { job_id: id }),
            _ => Err(FactoryError::MissingJobId),
        }
    }
}

/// Client-side classification of a reported status string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Job is still running; poll again
    Running,
    /// Job reached the configured success state
    Succeeded,
    /// Job reached a failure state, or reported a status outside the
    /// configured vocabulary
    Failed,
}

impl JobState {
    /// Classify a status string against the configured state sets.
    ///
    /// Unknown statuses classify as Failed: the service can report states
    /// the client has never seen, and retrying those forever would hide a
    /// genuine server-side error.
    pub fn classify(status: &str, polling: &PollingConfig) -> JobState {
        if status == polling.success_state {
            JobState::Succeeded
        } else if polling.running_states.iter().any(|s| s == status) {
            JobState::Running
        } else {
            JobState::Failed
        }
    }
}

/// Body of `GET /summary/{job_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub summary: Option<JobSummary>,
}

/// Terminal summary of a completed job
///
/// `performance_dictionary` is present only for the training recipe; its
/// insertion order is preserved because model selection defaults to the
/// first entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default)]
    pub performance_dictionary: IndexMap<String, CandidateModel>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One candidate model in the training summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateModel {
    pub model_uri: String,
    /// Metrics keyed by dataset split (train/calibration/test)
    #[serde(default)]
    pub performance: BTreeMap<String, SplitMetrics>,
}

/// Per-split performance metrics; the server may omit any of them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r2_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rmse: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_interval_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median_interval_width: Option<f64>,
}

/// Body of `GET /log/{job_id}`
///
/// The service returns `{logs: ...}` once logs exist, or a plain status
/// object before that.
#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_from_response() {
        let response = SubmitResponse {
            job_id: Some("abc".to_string()),
            status: Some("INITIALIZING".to_string()),
            message: None,
        };
        let handle = JobHandle::from_response(response).unwrap();
        assert_eq!(handle.job_id, "abc");
    }

    #[test]
    fn test_handle_rejects_missing_id() {
        let response = SubmitResponse {
            job_id: None,
            status: Some("INITIALIZING".to_string()),
            message: None,
        };
        assert!(matches!(
            JobHandle::from_response(response),
            Err(FactoryError::MissingJobId)
        ));
    }

    #[test]
    fn test_handle_rejects_empty_id() {
        let response = SubmitResponse {
            job_id: Some(String::new()),
            status: None,
            message: None,
        };
        assert!(JobHandle::from_response(response).is_err());
    }

    #[test]
    fn test_classify_known_states() {
        let polling = PollingConfig::default();
        assert_eq!(
            JobState::classify("INITIALIZING", &polling),
            JobState::Running
        );
        assert_eq!(JobState::classify("EXECUTING", &polling), JobState::Running);
        assert_eq!(JobState::classify("DONE", &polling), JobState::Succeeded);
        assert_eq!(JobState::classify("FAILED", &polling), JobState::Failed);
    }

    #[test]
    fn test_classify_unknown_state_fails() {
        let polling = PollingConfig::default();
        assert_eq!(
            JobState::classify("SOMETHING_NEW", &polling),
            JobState::Failed
        );
        assert_eq!(JobState::classify("", &polling), JobState::Failed);
    }

    #[test]
    fn test_classify_respects_custom_vocabulary() {
        let mut polling = PollingConfig::default();
        polling.running_states.push("QUEUED".to_string());
        polling.success_state = "COMPLETE".to_string();
        assert_eq!(JobState::classify("QUEUED", &polling), JobState::Running);
        assert_eq!(JobState::classify("COMPLETE", &polling), JobState::Succeeded);
        // DONE is no longer the success state
        assert_eq!(JobState::classify("DONE", &polling), JobState::Failed);
    }

    #[test]
    fn test_status_report_requires_status() {
        let json = r#"{"job_id": "abc"}"#;
        assert!(serde_json::from_str::<StatusReport>(json).is_err());
    }

    #[test]
    fn test_summary_preserves_candidate_order() {
        let json = r#"{
            "performance_dictionary": {
                "modelB": {"model_uri": "s3://models/b.onnx"},
                "modelA": {"model_uri": "s3://models/a.onnx"}
            }
        }"#;
        let summary: JobSummary = serde_json::from_str(json).unwrap();
        let keys: Vec<&String> = summary.performance_dictionary.keys().collect();
        assert_eq!(keys, vec!["modelB", "modelA"]);
    }

    #[test]
    fn test_summary_metrics_deserialization() {
        let json = r#"{
            "performance_dictionary": {
                "modelA": {
                    "model_uri": "s3://models/a.onnx",
                    "performance": {
                        "test": {
                            "r2_score": 0.91,
                            "rmse": 0.42,
                            "coverage": 0.95,
                            "mean_interval_width": 1.2,
                            "median_interval_width": 1.1
                        }
                    }
                }
            },
            "elapsed_seconds": 312
        }"#;
        let summary: JobSummary = serde_json::from_str(json).unwrap();
        let candidate = &summary.performance_dictionary["modelA"];
        let test_split = &candidate.performance["test"];
        assert_eq!(test_split.r2_score, Some(0.91));
        assert_eq!(test_split.coverage, Some(0.95));
        // Fields the client does not model survive in `extra`
        assert_eq!(summary.extra["elapsed_seconds"], 312);
    }

    #[test]
    fn test_logs_response_variants() {
        let ready: LogsResponse = serde_json::from_str(r#"{"logs": "step 1 ok"}"#).unwrap();
        assert_eq!(ready.logs.as_deref(), Some("step 1 ok"));

        let pending: LogsResponse =
            serde_json::from_str(r#"{"status": "INITIALIZING"}"#).unwrap();
        assert!(pending.logs.is_none());
        assert_eq!(pending.status.as_deref(), Some("INITIALIZING"));
    }
}
