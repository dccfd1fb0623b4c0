use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod core;
mod error;
mod models;

use commands::{
    init_project, run_create_device, run_deploy, run_train, show_logs, show_status,
    DeployOptions, DeviceOptions, TrainOptions,
};

/// mfctl - CLI client for the Model Factory training and deployment service
#[derive(Parser)]
#[command(name = "mfctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize starter configuration files
    Init {
        /// Project directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Train a supervised-anomaly model and persist the selected candidate
    Train {
        /// KPI specification file
        #[arg(long, default_value = "kpi.yaml")]
        kpi: PathBuf,

        /// Service config file
        #[arg(long, default_value = "factory.yaml")]
        service: PathBuf,

        /// Training dataset CSV (defaults to the KPI spec's dataset_file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output path for the model info artifact
        #[arg(long, short = 'o', default_value = "model_info.yaml")]
        out: PathBuf,

        /// Candidate model to select by name (defaults to the first)
        #[arg(long)]
        select: Option<String>,

        /// Pick the candidate interactively
        #[arg(long, conflicts_with = "select")]
        pick: bool,

        /// Submit without waiting for completion
        #[arg(long)]
        no_wait: bool,

        /// Override the factory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the poll interval in seconds
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Override the maximum wait in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Create the device record in the monitoring platform
    CreateDevice {
        /// KPI specification file
        #[arg(long, default_value = "kpi.yaml")]
        kpi: PathBuf,

        /// Service config file
        #[arg(long, default_value = "factory.yaml")]
        service: PathBuf,

        /// Sample dataset CSV (defaults to the KPI spec's dataset_file)
        #[arg(long)]
        data: Option<PathBuf>,

        /// IoT platform credentials file
        #[arg(long)]
        credentials: PathBuf,

        /// Asset model description file
        #[arg(long)]
        asset_model: PathBuf,

        /// Submit without waiting for completion
        #[arg(long)]
        no_wait: bool,

        /// Override the factory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the poll interval in seconds
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Override the maximum wait in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Deploy a trained model as a streaming KPI
    Deploy {
        /// Service config file
        #[arg(long, default_value = "factory.yaml")]
        service: PathBuf,

        /// Model info artifact written by 'mfctl train'
        #[arg(long, default_value = "model_info.yaml")]
        model_info: PathBuf,

        /// IoT platform credentials file
        #[arg(long)]
        credentials: PathBuf,

        /// Also prepare a KPI dashboard
        #[arg(long)]
        dashboard: bool,

        /// Submit without waiting for completion
        #[arg(long)]
        no_wait: bool,

        /// Override the factory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,

        /// Override the poll interval in seconds
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Override the maximum wait in seconds
        #[arg(long)]
        max_wait: Option<u64>,
    },

    /// Show the current status of a job
    Status {
        /// Job id returned at submission
        job_id: String,

        /// Service config file
        #[arg(long, default_value = "factory.yaml")]
        service: PathBuf,

        /// Override the factory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Show the remote log text of a job
    Logs {
        /// Job id returned at submission
        job_id: String,

        /// Service config file
        #[arg(long, default_value = "factory.yaml")]
        service: PathBuf,

        /// Override the factory endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();

    let result = match cli.command {
        Commands::Init { path } => {
            let project_root = path.unwrap_or_else(|| std::env::current_dir().unwrap());
            init_project(&project_root)
        }

        Commands::Train {
            kpi,
            service,
            data,
            out,
            select,
            pick,
            no_wait,
            endpoint,
            poll_interval,
            max_wait,
        } => {
            run_train(TrainOptions {
                kpi_path: kpi,
                service_path: service,
                data,
                out,
                select,
                pick,
                no_wait,
                endpoint,
                poll_interval,
                max_wait,
            })
            .await
        }

        Commands::CreateDevice {
            kpi,
            service,
            data,
            credentials,
            asset_model,
            no_wait,
            endpoint,
            poll_interval,
            max_wait,
        } => {
            run_create_device(DeviceOptions {
                kpi_path: kpi,
                service_path: service,
                data,
                credentials,
                asset_model,
                no_wait,
                endpoint,
                poll_interval,
                max_wait,
            })
            .await
        }

        Commands::Deploy {
            service,
            model_info,
            credentials,
            dashboard,
            no_wait,
            endpoint,
            poll_interval,
            max_wait,
        } => {
            run_deploy(DeployOptions {
                service_path: service,
                model_info,
                credentials,
                dashboard,
                no_wait,
                endpoint,
                poll_interval,
                max_wait,
            })
            .await
        }

        Commands::Status {
            job_id,
            service,
            endpoint,
        } => show_status(&service, endpoint, &job_id).await,

        Commands::Logs {
            job_id,
            service,
            endpoint,
        } => show_logs(&service, endpoint, &job_id).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
