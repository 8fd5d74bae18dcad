use std::path::Path;

use shasse_catalog::ShinyLock;
use shasse_core::Generation;

/// A single entry in the scrape log.
#[derive(Debug, Clone)]
pub enum LogEntry {
    Success {
        pokemon: String,
        generation: Generation,
        general_methods: usize,
        specific_methods: usize,
        shiny_lock: ShinyLock,
        media_downloaded: Vec<String>,
        /// Rows the validator refused on this page.
        rows_rejected: usize,
    },
    /// The page was fetched but no method could be extracted.
    NoData {
        pokemon: String,
        generation: Generation,
        url: String,
    },
    Error {
        pokemon: String,
        message: String,
    },
}

/// Collects scrape results and writes a log file.
#[derive(Debug, Default)]
pub struct ScrapeLog {
    entries: Vec<LogEntry>,
}

impl ScrapeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for entry in &self.entries {
            match entry {
                LogEntry::Success {
                    general_methods,
                    specific_methods,
                    shiny_lock,
                    media_downloaded,
                    rows_rejected,
                    ..
                } => {
                    summary.total_success += 1;
                    summary.general_methods += general_methods;
                    summary.specific_methods += specific_methods;
                    summary.rows_rejected += rows_rejected;
                    summary.media_downloaded += media_downloaded.len();
                    if shiny_lock.is_locked() {
                        summary.shiny_locked += 1;
                    }
                }
                LogEntry::NoData { .. } => summary.total_no_data += 1,
                LogEntry::Error { .. } => summary.total_errors += 1,
            }
        }
        summary
    }

    /// Write the log to a file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Scrape Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Successful: {} (general methods: {}, specific methods: {})",
            summary.total_success, summary.general_methods, summary.specific_methods
        )?;
        writeln!(file, "No data: {}", summary.total_no_data)?;
        writeln!(file, "Errors: {}", summary.total_errors)?;
        writeln!(file, "Shiny locked: {}", summary.shiny_locked)?;
        writeln!(file, "Rejected rows: {}", summary.rows_rejected)?;
        writeln!(file, "Media downloaded: {}", summary.media_downloaded)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for entry in &self.entries {
            match entry {
                LogEntry::Success {
                    pokemon,
                    generation,
                    general_methods,
                    specific_methods,
                    shiny_lock,
                    media_downloaded,
                    rows_rejected,
                } => {
                    writeln!(
                        file,
                        "[OK] {} ({}G): {} general, {} specific, shiny {}",
                        pokemon, generation, general_methods, specific_methods, shiny_lock
                    )?;
                    if *rows_rejected > 0 {
                        writeln!(file, "     Rejected rows: {}", rows_rejected)?;
                    }
                    if !media_downloaded.is_empty() {
                        writeln!(file, "     Media: {}", media_downloaded.join(", "))?;
                    }
                }
                LogEntry::NoData {
                    pokemon,
                    generation,
                    url,
                } => {
                    writeln!(file, "[NO DATA] {} ({}G)", pokemon, generation)?;
                    writeln!(file, "     Page: {}", url)?;
                }
                LogEntry::Error { pokemon, message } => {
                    writeln!(file, "[ERROR] {}: {}", pokemon, message)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub total_success: usize,
    pub total_no_data: usize,
    pub total_errors: usize,
    pub general_methods: usize,
    pub specific_methods: usize,
    pub shiny_locked: usize,
    pub rows_rejected: usize,
    pub media_downloaded: usize,
}
