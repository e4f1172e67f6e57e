mod dump;
mod make_csv;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mkrsbnb")]
#[command(about = "Extract vacation-rental listings from captured search traffic")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert the search results of a HAR capture to CSV
    MakeCsv {
        /// HAR file to read (a raw response body with --response)
        #[arg(long, short = 'f')]
        file: PathBuf,
        /// Output destination; `-` writes to stdout. Defaults to `MKRSBNB_OUTPUT`
        #[arg(long, short = 'o')]
        csv_file: Option<String>,
        /// Keep listings that have no reviews
        #[arg(long)]
        keep_no_review: bool,
        /// Treat the input as a single search API response body
        #[arg(long)]
        response: bool,
    },
    /// Print the search API response bodies of a HAR capture as a JSON array
    Dump {
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = mkrsbnb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::MakeCsv {
            file,
            csv_file,
            keep_no_review,
            response,
        }) => make_csv::run(
            &config,
            &make_csv::MakeCsvArgs {
                file,
                csv_file,
                keep_no_review,
                response,
            },
        ),
        Some(Commands::Dump { file }) => dump::run(&file),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
