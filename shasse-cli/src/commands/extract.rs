use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shasse_catalog::PokemonEntry;
use shasse_core::Generation;
use shasse_scraper::{ExtractionReport, detect_shiny_lock_html, extract_html};

use crate::CliError;

/// Run the extractor on a saved page and print what it found.
pub(crate) fn run_extract(
    file: &Path,
    name: &str,
    json: bool,
    report: bool,
) -> Result<(), CliError> {
    let html = std::fs::read_to_string(file)?;
    let extraction = extract_html(&html, name);

    if json {
        let out = serde_json::to_string_pretty(&extraction)
            .map_err(|e| CliError::export(format!("Failed to serialize extraction: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    let lock = detect_shiny_lock_html(&html, name);
    // A saved page carries no portal data; guess the generation from the
    // oldest game listed.
    let generation = extraction
        .details
        .games
        .iter()
        .filter_map(|g| g.generation)
        .min()
        .unwrap_or(Generation::FIRST);
    let entry = PokemonEntry::new(name, generation);

    super::print_details(&entry, lock, &extraction.details);
    crate::log_blank();
    print_report(&extraction.report, report);
    Ok(())
}

fn print_report(report: &ExtractionReport, show_rejected: bool) {
    log::info!(
        "  {} tables, {} rows seen, {} normalized, {} rejected, {} duplicates collapsed",
        report.tables_found,
        report.rows_seen,
        report.rows_normalized,
        report.rows_rejected(),
        report.duplicates_collapsed,
    );
    if !report.summary_found {
        log::info!(
            "  {}",
            "No summary box on this page".if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    if report.used_fallback {
        log::info!(
            "  {}",
            "General methods found by keyword scan".if_supports_color(Stdout, |t| t.dimmed())
        );
    }

    if show_rejected {
        for row in &report.rejected {
            log::warn!(
                "  {} table {} row {}: {} ({} | {} | {})",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                row.table + 1,
                row.row + 1,
                row.reason,
                row.game,
                row.method,
                row.location,
            );
        }
    }
}
