//! Page-level extraction.
//!
//! Turns a parsed Pokémon hunting page into [`PokemonDetails`]:
//!
//! 1. general methods from the "Méthodes de shasse disponibles" summary box,
//!    or from a keyword scan of the page text when the box is missing;
//! 2. the synthetic Masuda entry for breedable Pokémon;
//! 3. specific methods from every "Jeu" / "Méthode" table, row by row;
//! 4. validation and deduplication of those records;
//! 5. the distinct games, each tagged with its generation.
//!
//! Extraction never fails. Anything it skips is counted in the
//! [`ExtractionReport`] returned next to the details.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use shasse_catalog::{GameEntry, GeneralMethodRecord, PokemonDetails, SpecificMethodRecord};
use shasse_core::methods::{is_breedable, scan_general_methods};
use shasse_core::text::{fold_key, normalize_ws};
use shasse_core::{MethodCategory, classify_general_method, detect_generation_from_game};

use crate::cell::RawCell;
use crate::dedup::dedupe;
use crate::normalize::{RowContext, normalize_row};
use crate::validate::{Rejection, check};

/// Header text of the summary box listing the general methods.
pub const SUMMARY_HEADER: &str = "Méthodes de shasse disponibles";

const MASUDA: &str = "Masuda";
const MASUDA_CONDITIONS: &str = "Taux x6 avec Charme Chroma";

static SELECTOR_TH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("static pattern"));
static SELECTOR_TD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static pattern"));
static SELECTOR_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static pattern"));
static SELECTOR_TR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static pattern"));
static SELECTOR_BIPCODE_LI: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.listh-bipcode").expect("static pattern"));
static SELECTOR_LI: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("static pattern"));

/// A candidate record the validator refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// Index of the method table on the page (0-based).
    pub table: usize,
    /// Index of the body row within that table (0-based, header excluded).
    pub row: usize,
    pub reason: Rejection,
    pub game: String,
    pub method: String,
    pub location: String,
}

/// Diagnostics for one extraction call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub summary_found: bool,
    /// The keyword scan ran because the summary gave nothing.
    pub used_fallback: bool,
    pub tables_found: usize,
    pub rows_seen: usize,
    pub rows_normalized: usize,
    pub rejected: Vec<RejectedRow>,
    pub duplicates_collapsed: usize,
}

impl ExtractionReport {
    pub fn rows_rejected(&self) -> usize {
        self.rejected.len()
    }
}

/// Extracted details plus what happened along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageExtraction {
    pub details: PokemonDetails,
    pub report: ExtractionReport,
}

/// Parse raw HTML and extract it.
pub fn extract_html(html: &str, pokemon_name: &str) -> PageExtraction {
    extract(&Html::parse_document(html), pokemon_name)
}

/// Extract hunting methods for `pokemon_name` from a parsed page.
pub fn extract(document: &Html, pokemon_name: &str) -> PageExtraction {
    let mut report = ExtractionReport::default();

    let mut general_methods = match summary_methods(document) {
        Some(methods) => {
            report.summary_found = true;
            methods
        }
        None => Vec::new(),
    };
    let mut fallback_hit = false;
    if general_methods.is_empty() {
        report.used_fallback = true;
        general_methods = fallback_methods(&page_text(document));
        fallback_hit = !general_methods.is_empty();
    }

    let candidates = table_records(document, &mut report);

    let mut valid = Vec::with_capacity(candidates.len());
    for (table, row, record) in candidates {
        match check(&record) {
            Ok(()) => valid.push(record),
            Err(reason) => {
                log::debug!(
                    "{}: table {} row {} rejected ({}): {:?} / {:?} / {:?}",
                    pokemon_name,
                    table,
                    row,
                    reason,
                    record.game,
                    record.method,
                    record.location
                );
                report.rejected.push(RejectedRow {
                    table,
                    row,
                    reason,
                    game: record.game,
                    method: record.method,
                    location: record.location,
                });
            }
        }
    }

    let deduped = dedupe(valid);
    report.duplicates_collapsed = deduped.collapsed;
    let specific_methods = deduped.records;

    // Only vouch for breeding when the page was recognized as a hunting page.
    let has_evidence = report.summary_found || fallback_hit || report.tables_found > 0;
    if has_evidence && is_breedable(pokemon_name) {
        add_masuda(&mut general_methods);
    }

    let games = collect_games(&specific_methods);

    log::debug!(
        "{}: {} games, {} general, {} specific ({} rows, {} rejected, {} duplicates)",
        pokemon_name,
        games.len(),
        general_methods.len(),
        specific_methods.len(),
        report.rows_seen,
        report.rows_rejected(),
        report.duplicates_collapsed
    );

    PageExtraction {
        details: PokemonDetails {
            general_methods,
            specific_methods,
            games,
        },
        report,
    }
}

/// Elements that start a new line of page text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "tr", "table", "br", "h1", "h2", "h3", "h4", "h5", "h6",
    "section", "article", "header", "footer", "blockquote", "dt", "dd",
];

/// Whole-page text. Inline markup is joined as written, block elements
/// break lines and table cells are separated by a space.
pub fn page_text(document: &Html) -> String {
    let mut out = String::new();
    push_text(document.root_element(), &mut out);
    out
}

fn push_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if name == "script" || name == "style" {
                    continue;
                }
                let Some(child) = ElementRef::wrap(child) else {
                    continue;
                };
                let separator = if BLOCK_TAGS.contains(&name) {
                    Some('\n')
                } else if name == "td" || name == "th" {
                    Some(' ')
                } else {
                    None
                };
                out.extend(separator);
                push_text(child, out);
                out.extend(separator);
            }
            _ => {}
        }
    }
}

// -- General methods --

/// Methods listed in the summary box, or `None` when there is no box.
fn summary_methods(document: &Html) -> Option<Vec<GeneralMethodRecord>> {
    let header = document
        .select(&SELECTOR_TH)
        .find(|th| th.text().collect::<String>().contains(SUMMARY_HEADER))?;

    let header_row = header
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tr")?;
    let next_row = header_row
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "tr");

    let mut methods = Vec::new();
    let Some(cell) = next_row.and_then(|row| row.select(&SELECTOR_TD).next()) else {
        return Some(methods);
    };

    let mut items: Vec<ElementRef<'_>> = cell.select(&SELECTOR_BIPCODE_LI).collect();
    if items.is_empty() {
        items = cell.select(&SELECTOR_LI).collect();
    }

    for item in items {
        let name = normalize_ws(&item.text().collect::<String>());
        if name.chars().count() < 2 {
            continue;
        }
        push_general(&mut methods, &name);
    }
    Some(methods)
}

fn fallback_methods(page_text: &str) -> Vec<GeneralMethodRecord> {
    let mut methods = Vec::new();
    for name in scan_general_methods(page_text) {
        push_general(&mut methods, name);
    }
    methods
}

/// Append unless a method with the same name is already present.
fn push_general(methods: &mut Vec<GeneralMethodRecord>, name: &str) {
    let key = fold_key(name);
    if methods.iter().any(|m| fold_key(&m.name) == key) {
        return;
    }
    let info = classify_general_method(name);
    methods.push(GeneralMethodRecord {
        name: name.to_string(),
        category: info.category,
        description: info.description.to_string(),
        conditions: None,
    });
}

fn add_masuda(methods: &mut Vec<GeneralMethodRecord>) {
    let key = fold_key(MASUDA);
    if methods.iter().any(|m| fold_key(&m.name) == key) {
        return;
    }
    let info = classify_general_method(MASUDA);
    methods.push(GeneralMethodRecord {
        name: MASUDA.to_string(),
        category: MethodCategory::Breeding,
        description: info.description.to_string(),
        conditions: Some(MASUDA_CONDITIONS.to_string()),
    });
}

// -- Method tables --

/// Rows of `table` itself, skipping rows of nested tables.
fn own_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table
        .select(&SELECTOR_TR)
        .filter(|tr| {
            tr.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "table")
                .is_some_and(|nearest| nearest.id() == table.id())
        })
        .collect()
}

/// The `th`/`td` children of a row.
fn row_cells(row: ElementRef<'_>) -> Vec<RawCell> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| matches!(e.value().name(), "th" | "td"))
        .map(RawCell::from_element)
        .collect()
}

/// A method table has at least three header cells, including "Jeu" and
/// "Méthode".
fn is_method_header(cells: &[RawCell]) -> bool {
    let has = |label: &str| cells.iter().any(|c| c.text.trim().eq_ignore_ascii_case(label));
    cells.len() >= 3 && has("Jeu") && (has("Méthode") || has("Methode"))
}

/// Candidate records from every method table, tagged with their position.
fn table_records(
    document: &Html,
    report: &mut ExtractionReport,
) -> Vec<(usize, usize, SpecificMethodRecord)> {
    let mut out = Vec::new();

    for table in document.select(&SELECTOR_TABLE) {
        let rows = own_rows(table);
        let Some((header, body)) = rows.split_first() else {
            continue;
        };
        if !is_method_header(&row_cells(*header)) {
            continue;
        }

        let table_index = report.tables_found;
        report.tables_found += 1;

        // Carry-forward context never crosses a table boundary.
        let mut context = RowContext::default();
        for (row_index, row) in body.iter().enumerate() {
            report.rows_seen += 1;
            let cells = row_cells(*row);
            let (next, normalized) = normalize_row(context, &cells);
            context = next;
            if let Some(normalized) = normalized {
                report.rows_normalized += 1;
                out.push((table_index, row_index, normalized.into_record()));
            }
        }
    }

    out
}

/// Distinct games in first-seen order, with their generation when known.
fn collect_games(records: &[SpecificMethodRecord]) -> Vec<GameEntry> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(fold_key(&r.game)))
        .map(|r| GameEntry {
            name: r.game.clone(),
            generation: detect_generation_from_game(&r.game),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
