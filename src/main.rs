use std::path::PathBuf;

use clap::{Parser, Subcommand};
use question_bank::data::import_questions;
use question_bank::{Settings, logging, server};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on, overrides the settings file
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Create the database tables
    InitDb,
    /// Replace all questions with the rows of a JSON sheet
    Import {
        /// JSON file to load the questions from
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref())?;
    logging::init_logging(&settings.logging);

    match args.command {
        Command::Serve { address } => {
            if let Some(address) = address {
                settings.server.address = address;
            }
            server::run(settings).await?;
        }
        Command::InitDb => {
            settings.open_store()?;
            info!(path = %settings.database.path.display(), "database tables created");
        }
        Command::Import { file } => {
            let store = settings.open_store()?;
            let stats = import_questions(store.as_ref(), &file)?;
            info!(questions = stats.total, "import complete");
        }
    }

    Ok(())
}
