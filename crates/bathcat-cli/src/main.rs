mod batch;
mod publish;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bathcat")]
#[command(about = "Turn storefront product snapshots into catalog import CSVs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export product and combination CSVs from snapshot files
    Export {
        /// Snapshot files; each holds one document or a JSON array of them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the CSV files (overrides `BATHCAT_OUTPUT_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Category ID for product rows (overrides `BATHCAT_CATEGORY_ID`)
        #[arg(long)]
        category: Option<String>,

        /// First external product ID (overrides `BATHCAT_FIRST_PRODUCT_ID`)
        #[arg(long)]
        first_id: Option<u64>,

        /// Copy the written files here (overrides `BATHCAT_OUTBOX_DIR`)
        #[arg(long)]
        outbox: Option<PathBuf>,

        /// Report what would be exported without writing any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the attribute descriptors discovered for each document as JSON
    Inspect {
        /// Snapshot file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bathcat_core::load_export_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export {
            inputs,
            out_dir,
            category,
            first_id,
            outbox,
            dry_run,
        } => {
            let options = batch::ExportOptions {
                output_dir: out_dir.unwrap_or_else(|| config.output_dir.clone()),
                category,
                first_id,
                outbox: outbox.or_else(|| config.outbox_dir.clone()),
                dry_run,
            };
            batch::run_export(&config, &inputs, &options)?;
        }
        Commands::Inspect { file } => batch::run_inspect(&config, &file)?,
    }

    Ok(())
}
