use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use color_eyre::config::HookBuilder;
use tracing_subscriber::EnvFilter;

mod handlers;

/// dcbox-upload - mirror a local directory into DirectCloud-BOX
#[derive(Parser, Debug)]
#[command(name = "dcbox-upload")]
#[command(version)]
#[command(about = "Upload a local file or directory tree to a DirectCloud-BOX folder", long_about = None)]
pub struct Cli {
    /// Service name issued for API access
    #[arg(long, env = "DIRECTCLOUDBOX_SERVICE", hide_env_values = true)]
    pub service: Option<String>,

    /// Service key issued for API access
    #[arg(long, env = "DIRECTCLOUDBOX_SERVICE_KEY", hide_env_values = true)]
    pub service_key: Option<String>,

    /// Company code
    #[arg(long, env = "DIRECTCLOUDBOX_CODE", hide_env_values = true)]
    pub code: Option<String>,

    /// User id
    #[arg(long, env = "DIRECTCLOUDBOX_ID", hide_env_values = true)]
    pub id: Option<String>,

    /// User password
    #[arg(long, env = "DIRECTCLOUDBOX_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Remote folder node to upload into
    #[arg(long, env = "DIRECTCLOUDBOX_NODE")]
    pub node: Option<String>,

    /// Local file or directory to upload, relative to the working directory
    #[arg(long, env = "DIRECTCLOUDBOX_FILE_PATH")]
    pub file_path: Option<String>,

    /// API base URL
    #[arg(long, env = "DIRECTCLOUDBOX_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Emit GitHub Actions workflow commands for warnings and failures
    #[arg(
        long,
        env = "GITHUB_ACTIONS",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub annotations: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Setup error handling
    if let Err(e) = HookBuilder::default().install() {
        eprintln!("Warning: Failed to install error handler: {}", e);
    }

    // Logs go to stderr; stdout is reserved for workflow commands
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let cli = Cli::parse();

    match handlers::handle_upload(&cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!("run failed: {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
