//! mfctl - CLI client for the Model Factory training and deployment service
//!
//! mfctl drives a three-stage pipeline against a remote "Model Factory" HTTP
//! service: train a conformal-prediction anomaly model, register a device in
//! the monitoring platform, and deploy the trained model as a streaming KPI.
//! Each stage is one multipart submission followed by bounded status polling;
//! the train and deploy stages are bridged by a small ModelInfo YAML artifact.
//!
//! # Architecture
//!
//! - **commands**: CLI command implementations (init, train, create-device, deploy, status, logs)
//! - **core**: Core functionality (factory client, recipe assembly, model selection, config loading)
//! - **models**: Data structures (config, wire types, the ModelInfo artifact)
//! - **error**: Error types

pub mod commands;
pub mod core;
pub mod error;
pub mod models;

pub use error::{MfError, Result};
