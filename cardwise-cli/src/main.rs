//! Cardwise CLI
//!
//! Command-line interface for Cardwise - finds and merges duplicate contacts.

mod commands;
mod config;
mod display;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cardwise_core::DEFAULT_THRESHOLD;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "cardwise")]
#[command(version, about = "Find and merge duplicate contacts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (default: platform data directory + /cardwise)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Minimum score (0-100) for two contacts to count as duplicates
    #[arg(
        long,
        global = true,
        env = "CARDWISE_THRESHOLD",
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    threshold: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a contact
    Add {
        /// Display name
        name: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Company
        #[arg(long)]
        company: Option<String>,

        /// Job title
        #[arg(long)]
        title: Option<String>,

        /// LinkedIn profile URL
        #[arg(long)]
        linkedin: Option<String>,
    },

    /// Import contacts from a JSON array
    Import {
        /// Input file path
        file: PathBuf,
    },

    /// List all contacts
    List,

    /// Show contact details and likely duplicates
    Show {
        /// Contact ID
        id: String,
    },

    /// Add a note to a contact's timeline
    Note {
        /// Contact ID
        id: String,

        /// Note text
        text: String,
    },

    /// Score two contacts against each other
    Score {
        /// First contact ID
        a: String,

        /// Second contact ID
        b: String,
    },

    /// List groups of likely duplicates
    Dupes {
        /// Print groups as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge the secondary contact into the primary
    Merge {
        /// Contact that survives the merge
        primary: String,

        /// Contact that is folded in and removed
        secondary: String,

        /// Field choice: FIELD=left, FIELD=right, or FIELD==VALUE
        #[arg(long = "keep", value_name = "FIELD=CHOICE")]
        keep: Vec<String>,

        /// Show the merged contact without saving it
        #[arg(long)]
        dry_run: bool,
    },

    /// Undo the most recent merge
    Undo,

    /// Show merge history
    History,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("cardwise_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Resolve data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardwise")
    });

    let config = CliConfig {
        data_dir,
        threshold: cli.threshold,
    };

    match cli.command {
        Commands::Add {
            name,
            email,
            phone,
            company,
            title,
            linkedin,
        } => {
            let fields = commands::contacts::NewContactFields {
                email,
                phone,
                company,
                title,
                linkedin,
            };
            commands::contacts::add(&config, &name, fields)?;
        }
        Commands::Import { file } => commands::contacts::import(&config, &file)?,
        Commands::List => commands::contacts::list(&config)?,
        Commands::Show { id } => commands::contacts::show(&config, &id)?,
        Commands::Note { id, text } => commands::contacts::note(&config, &id, &text)?,
        Commands::Score { a, b } => commands::dupes::score(&config, &a, &b)?,
        Commands::Dupes { json } => commands::dupes::list(&config, json)?,
        Commands::Merge {
            primary,
            secondary,
            keep,
            dry_run,
        } => {
            commands::merge::merge(&config, &primary, &secondary, &keep, dry_run)?;
        }
        Commands::Undo => commands::merge::undo(&config)?,
        Commands::History => commands::merge::history(&config)?,
    }

    Ok(())
}
