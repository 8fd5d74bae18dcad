//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use shasse_core::Generation;

#[derive(Parser)]
#[command(name = "shasse")]
#[command(about = "Scrape and browse shiny-hunting methods from the Pokébip wiki", long_about = None)]
pub(crate) struct Cli {
    /// SQLite database to use (overrides the configured path)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every scrape target.
#[derive(Args, Clone, Debug)]
pub(crate) struct ScrapeArgs {
    /// Pokémon pages fetched concurrently (default from config)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Skip sprite and artwork downloads
    #[arg(long)]
    pub no_media: bool,

    /// Scrape without downloading media or writing to the database
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Disable scrape log file
    #[arg(long)]
    pub no_log: bool,

    /// Maximum number of Pokémon to process per generation
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Also write the scraped Pokémon to a JSON export file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scrape hunting pages and store the results
    Scrape {
        #[command(subcommand)]
        target: ScrapeTarget,
    },

    /// Extract methods from a saved HTML page, without network or database
    Extract {
        /// Saved Pokémon page
        file: PathBuf,

        /// Pokémon the page is about
        #[arg(long)]
        name: String,

        /// Print the extraction as JSON
        #[arg(long)]
        json: bool,

        /// Also list the rows that were rejected
        #[arg(long)]
        report: bool,
    },

    /// Show the stored methods of a Pokémon
    Show {
        /// Pokémon name (case and accents are ignored)
        name: String,

        /// Only this generation's page (e.g., 3, 3g, gen3)
        #[arg(short, long)]
        generation: Option<Generation>,
    },

    /// List stored Pokémon
    List {
        /// Only this generation
        #[arg(short, long)]
        generation: Option<Generation>,

        /// Only names containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show database statistics
    Stats {
        /// Number of most used methods to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },

    /// Write stored Pokémon to a JSON export file
    Export {
        /// Output file
        output: PathBuf,

        /// Only this generation
        #[arg(short, long)]
        generation: Option<Generation>,
    },

    /// Load a JSON export file into the database
    Import {
        /// Export file written by `scrape --export` or `export`
        file: PathBuf,
    },

    /// Manage scraper configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ScrapeTarget {
    /// Every Pokémon on one generation's portal
    Generation {
        /// Generation number (e.g., 3, 3g, gen3)
        generation: Generation,

        #[command(flatten)]
        args: ScrapeArgs,
    },

    /// Every generation, one portal after the other
    All {
        #[command(flatten)]
        args: ScrapeArgs,
    },

    /// A single Pokémon, looked up on its generation's portal
    Pokemon {
        /// Pokémon name as shown on the portal
        name: String,

        /// Generation whose page to scrape
        generation: Generation,

        #[command(flatten)]
        args: ScrapeArgs,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and where each value comes from
    Show,

    /// Print the config file path
    Path,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
