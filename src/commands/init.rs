use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::Result;

const KPI_TEMPLATE: &str = r#"# KPI specification for the supervised-anomaly pipeline
device_name: WindTurbine
device_description: Wind turbine gearbox monitor
dataset_file: turbine.csv
assetid_column: asset_id
timestamp_column: Timestamp
timestamp_format: "%Y-%m-%d %H:%M:%S"
feature_columns: [P_avg, Gb1t_avg, Gb2t_avg, Ws_avg]
feature_names: [Active power, Gearbox bearing 1 temp, Gearbox bearing 2 temp, Wind speed]
target_columns: [Rs_avg]
target_names: [Rotor speed]
"#;

const FACTORY_TEMPLATE: &str = r#"# Model Factory service location
endpoint_url: http://localhost:8000
polling:
  interval_seconds: 2
  max_wait_seconds: 1800
  running_states: [INITIALIZING, EXECUTING]
  success_state: DONE
  failure_states: [FAILED, ERROR]
"#;

/// Scaffold starter configuration files for a new pipeline
pub fn init_project(project_root: &Path) -> Result<()> {
    info!("Initializing mfctl pipeline at {}", project_root.display());

    if !project_root.exists() {
        fs::create_dir_all(project_root)?;
    }

    create_file_if_not_exists(&project_root.join("kpi.yaml"), KPI_TEMPLATE)?;
    create_file_if_not_exists(&project_root.join("factory.yaml"), FACTORY_TEMPLATE)?;

    println!("Pipeline initialized at {}", project_root.display());
    println!("\nNext steps:");
    println!("1. Edit kpi.yaml to describe your dataset and device");
    println!("2. Edit factory.yaml to point at your Model Factory endpoint");
    println!("3. Run 'mfctl train --data <dataset.csv>' to train a model");
    println!("4. Run 'mfctl create-device --credentials <iot.yaml> --asset-model <assetmodel.json>'");
    println!("5. Run 'mfctl deploy --model-info model_info.yaml --credentials <iot.yaml>'");

    Ok(())
}

fn create_file_if_not_exists(path: &Path, content: &str) -> Result<()> {
    if !path.exists() {
        fs::write(path, content)?;
        info!("Created file: {}", path.display());
    } else {
        info!("File already exists: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config_files() {
        let temp_dir = TempDir::new().unwrap();
        init_project(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("kpi.yaml").exists());
        assert!(temp_dir.path().join("factory.yaml").exists());

        // Templates parse with the real config types
        let kpi = crate::models::KpiSpec::load_from_file(&temp_dir.path().join("kpi.yaml"));
        assert!(kpi.is_ok());
        let service =
            crate::models::ServiceConfig::load_from_file(&temp_dir.path().join("factory.yaml"));
        assert!(service.is_ok());
    }

    #[test]
    fn test_init_preserves_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let kpi_path = temp_dir.path().join("kpi.yaml");
        fs::write(&kpi_path, "device_name: Existing\n").unwrap();

        init_project(temp_dir.path()).unwrap();

        let contents = fs::read_to_string(&kpi_path).unwrap();
        assert_eq!(contents, "device_name: Existing\n");
    }
}
