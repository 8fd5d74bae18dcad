use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_scraper::ValueSource;

use crate::{AppContext, CliError};

/// Show the resolved settings and where each came from.
pub(crate) fn run_config_show(ctx: &AppContext) -> Result<(), CliError> {
    let path = shasse_scraper::config_path();

    log::info!(
        "{}",
        "Scraper Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let config = &ctx.config;
    let sources = &ctx.sources;
    let fields: [(&str, String, &ValueSource); 7] = [
        ("base_url", config.base_url.clone(), &sources.base_url),
        ("user_agent", config.user_agent.clone(), &sources.user_agent),
        (
            "timeout_secs",
            config.timeout.as_secs().to_string(),
            &sources.timeout,
        ),
        (
            "request_interval_ms",
            config.request_interval.as_millis().to_string(),
            &sources.request_interval,
        ),
        ("workers", config.workers.to_string(), &sources.workers),
        (
            "database",
            config.database.display().to_string(),
            &sources.database,
        ),
        (
            "assets_dir",
            config.assets_dir.display().to_string(),
            &sources.assets_dir,
        ),
    ];

    for (name, value, source) in &fields {
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if ctx.database != config.database {
        log::info!(
            "  {} {} {}",
            "database:".if_supports_color(Stdout, |t| t.cyan()),
            ctx.database.display(),
            "(--database)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match shasse_scraper::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}

/// Write a config file holding the default settings.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = shasse_scraper::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let written = shasse_scraper::save_default().map_err(|e| CliError::config(e.to_string()))?;
    log::info!(
        "{} Default config written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        written.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
