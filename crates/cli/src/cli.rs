//! Command-line definitions

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use helpdesk_assign_engine::EngineConfig;
use tracing::info;

use crate::commands;
use crate::logging::{parse_log_level, setup_logging, LoggingConfig};

/// Helpdesk ticket assignment
#[derive(Debug, Parser)]
#[command(name = "helpdesk", version, about = "Assign support tickets to agents by urgency and skill")]
pub struct Cli {
    /// Engine configuration file (TOML); defaults are used when omitted
    #[arg(short, long, global = true, env = "HELPDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Include source file and line in log lines
    #[arg(long, global = true)]
    pub log_source: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assign every ticket of a dataset and write the result files
    Assign {
        /// Dataset JSON with `agents` and `tickets`
        dataset: PathBuf,

        /// Submission file (ticket_id, assigned_agent_id, rationale)
        #[arg(short, long, default_value = "output_result.json")]
        output: PathBuf,

        /// Detailed report with scores and run summary
        #[arg(short, long, default_value = "detailed_assignment_report.json")]
        report: PathBuf,

        /// Skip the summary table
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the urgency assessment and inferred skill for ticket texts
    Analyze {
        /// Ticket texts to analyze
        #[arg(required_unless_present = "dataset")]
        texts: Vec<String>,

        /// Analyze every ticket of a dataset instead
        #[arg(short, long, conflicts_with = "texts")]
        dataset: Option<PathBuf>,

        /// Print assessments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Cli {
    /// Run the selected command
    pub async fn execute(self) -> Result<()> {
        let level = parse_log_level(&self.log_level)?;
        let mut logging = LoggingConfig::new(level);
        if self.json_logs {
            logging = logging.with_json();
        }
        if self.log_source {
            logging = logging.with_file_info();
        }
        setup_logging(logging)?;

        let config = load_config(self.config.as_deref()).await?;

        match self.command {
            Commands::Assign {
                dataset,
                output,
                report,
                quiet,
            } => commands::assign::execute(&config, &dataset, &output, &report, quiet).await,
            Commands::Analyze {
                texts,
                dataset,
                json,
            } => commands::analyze::execute(&config, texts, dataset.as_deref(), json).await,
            Commands::Config => {
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", rendered);
                Ok(())
            }
        }
    }
}

/// Read and validate the engine configuration
pub async fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: EngineConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    info!("📝 Loaded configuration from {}", path.display());
    Ok(config)
}
