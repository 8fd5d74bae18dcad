//! shasse CLI
//!
//! Command-line interface for scraping shiny-hunting methods from the Pokébip
//! wiki into a local SQLite database, and browsing what was stored.

mod cli_types;
mod commands;
mod error;
mod events;
mod spinner;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_scraper::{ConfigSources, ScraperConfig};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Settings shared by every command.
pub(crate) struct AppContext {
    pub config: ScraperConfig,
    pub sources: ConfigSources,
    /// Database path after applying `--database`.
    pub database: PathBuf,
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (config, sources) =
        ScraperConfig::load().map_err(|e| CliError::config(e.to_string()))?;
    let database = cli.database.unwrap_or_else(|| config.database.clone());
    let ctx = AppContext {
        config,
        sources,
        database,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Scrape { target } => commands::scrape::run_scrape(&ctx, target),
        Commands::Extract {
            file,
            name,
            json,
            report,
        } => commands::extract::run_extract(&file, &name, json, report),
        Commands::Show { name, generation } => commands::show::run_show(&ctx, &name, generation),
        Commands::List { generation, search } => {
            commands::show::run_list(&ctx, generation, search.as_deref())
        }
        Commands::Stats { top } => commands::stats::run_stats(&ctx, top),
        Commands::Export { output, generation } => {
            commands::transfer::run_export(&ctx, &output, generation)
        }
        Commands::Import { file } => commands::transfer::run_import(&ctx, &file),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    }
}

/// Log an empty line, used to space out command output.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Install the logger. Normal output goes through `log::info!`, so the
/// default format is the bare message; `--verbose` adds time, level and
/// target.
fn init_logging(verbose: bool, quiet: bool, logfile: Option<&Path>) -> std::io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("shasse", level)
        .parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    match logfile {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(TeeWriter { file })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder.init();
    Ok(())
}

/// Writes log output to stdout and, without colour codes, to a file.
struct TeeWriter {
    file: std::fs::File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()?;
        self.file.flush()
    }
}
