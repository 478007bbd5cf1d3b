use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use frinzy_core::profile::City;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "frinzy")]
#[command(about = "Frinzy - hobby-based friend matching", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding profiles.toml (defaults to the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run onboarding, discovery, matching and chat end to end in memory
    Demo {
        /// City for the demo member
        #[arg(long, default_value = "Delhi")]
        city: City,
    },
    /// Score two hobby lists against each other
    Score {
        /// Comma-separated hobbies of the first member
        #[arg(long, value_delimiter = ',')]
        a: Vec<String>,
        /// Comma-separated hobbies of the second member
        #[arg(long, value_delimiter = ',')]
        b: Vec<String>,
    },
    /// Manage the profile store
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
    /// Print the ranked discovery queue for a stored profile
    Discover {
        /// Viewer profile id
        viewer: String,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// Write the sample roster into the profile store
    Seed,
    /// List stored profiles
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init,
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = commands::config::load(cli.config.clone())?;
    logging::init(&settings.logging);

    match cli.command {
        Commands::Demo { city } => commands::demo::run(settings, city).await?,
        Commands::Score { a, b } => commands::score::run(&a, &b),
        Commands::Profiles { action } => match action {
            ProfilesAction::Seed => commands::profiles::seed(cli.data_dir).await?,
            ProfilesAction::List => commands::profiles::list(cli.data_dir).await?,
        },
        Commands::Discover { viewer } => {
            commands::discover::run(settings, cli.data_dir, &viewer).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&settings)?,
            ConfigAction::Init => commands::config::init(cli.config)?,
            ConfigAction::Path => commands::config::path(cli.config)?,
        },
    }

    Ok(())
}
