use std::path::Path;

use crate::core::client::FilePart;
use crate::error::{MfError, Result};
use crate::models::{KpiSpec, ModelInfo, ServiceConfig};

/// A fully assembled recipe submission: target URL, form fields, attachments
#[derive(Debug)]
pub struct RecipeRequest {
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, FilePart)>,
}

fn comma_join(columns: &[String]) -> String {
    columns.join(",")
}

async fn read_part(path: &Path, content_type: &str) -> std::io::Result<FilePart> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    Ok(FilePart {
        filename,
        bytes,
        content_type: content_type.to_string(),
    })
}

async fn data_part(path: &Path) -> Result<FilePart> {
    read_part(path, "text/csv")
        .await
        .map_err(|_| MfError::DataFileNotFound(path.to_path_buf()))
}

async fn credentials_part(path: &Path) -> Result<FilePart> {
    read_part(path, "application/x-yaml")
        .await
        .map_err(|_| MfError::CredentialsNotFound(path.to_path_buf()))
}

async fn asset_model_part(path: &Path) -> Result<FilePart> {
    read_part(path, "application/json")
        .await
        .map_err(|_| MfError::AssetModelNotFound(path.to_path_buf()))
}

/// Build the supervised-anomaly training submission
pub async fn train_request(
    service: &ServiceConfig,
    kpi: &KpiSpec,
    data_path: &Path,
) -> Result<RecipeRequest> {
    let data_file = data_part(data_path).await?;

    Ok(RecipeRequest {
        url: service.train_url(),
        fields: vec![
            (
                "feature_columns".to_string(),
                comma_join(&kpi.feature_columns),
            ),
            (
                "feature_names".to_string(),
                comma_join(&kpi.feature_names()),
            ),
            (
                "target_columns".to_string(),
                comma_join(&kpi.target_columns),
            ),
            ("target_names".to_string(), comma_join(&kpi.target_names())),
        ],
        files: vec![("data_file".to_string(), data_file)],
    })
}

/// Build the monitoring-device creation submission
pub async fn create_device_request(
    service: &ServiceConfig,
    kpi: &KpiSpec,
    data_path: &Path,
    credentials_path: &Path,
    asset_model_path: &Path,
) -> Result<RecipeRequest> {
    let credentials = credentials_part(credentials_path).await?;
    let data_file = data_part(data_path).await?;
    let asset_model = asset_model_part(asset_model_path).await?;

    Ok(RecipeRequest {
        url: service.device_url(),
        fields: vec![
            ("device_type_name".to_string(), kpi.device_name.clone()),
            (
                "device_type_description".to_string(),
                kpi.device_description.clone(),
            ),
            (
                "metric_columns".to_string(),
                comma_join(&kpi.metric_columns()),
            ),
            (
                "timestamp_column".to_string(),
                kpi.timestamp_column.clone(),
            ),
            ("assetid_column".to_string(), kpi.assetid_column.clone()),
        ],
        files: vec![
            ("iot_credentials".to_string(), credentials),
            ("data_file".to_string(), data_file),
            ("assetmodel_file".to_string(), asset_model),
        ],
    })
}

/// Build the KPI deployment submission from a trained model record
pub async fn deploy_request(
    service: &ServiceConfig,
    model_info: &ModelInfo,
    credentials_path: &Path,
    prepare_dashboard: bool,
) -> Result<RecipeRequest> {
    let credentials = credentials_part(credentials_path).await?;

    Ok(RecipeRequest {
        url: service.deploy_url(),
        fields: vec![
            (
                "onnx_model_uri".to_string(),
                model_info.onnx_model_uri.clone(),
            ),
            (
                "mas_device_name".to_string(),
                model_info.mas_device_name.clone(),
            ),
            ("train_job_id".to_string(), model_info.train_job_id.clone()),
            (
                "prepare_kpi_dashboard".to_string(),
                prepare_dashboard.to_string(),
            ),
        ],
        files: vec![("iot_credentials".to_string(), credentials)],
    })
}
