use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use shasse_core::text::normalize_ws;

static SELECTOR_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("static pattern"));
static SELECTOR_TITLED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[title]").expect("static pattern"));

/// A table cell as scraped: its visible text and its raw markup.
///
/// The markup is kept so later stages can look for embedded sprites and
/// tooltip attributes that never show up in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    pub text: String,
    pub markup: String,
}

impl RawCell {
    pub fn new(text: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: markup.into(),
        }
    }

    /// A cell with text only, as if it had been written `<td>text</td>`.
    pub fn text_only(text: &str) -> Self {
        Self::new(normalize_ws(text), format!("<td>{}</td>", text))
    }

    /// Build from a `td`/`th` element. Text nodes are trimmed and joined with
    /// single spaces.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let text = element
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text: normalize_ws(&text),
            markup: element.html(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn has_image(&self) -> bool {
        self.markup.contains("<img")
    }

    /// `alt` texts of the images in the cell, deduplicated, in order.
    pub fn image_alts(&self) -> Vec<String> {
        if !self.has_image() {
            return Vec::new();
        }
        let fragment = Html::parse_fragment(&self.markup);
        let mut alts: Vec<String> = Vec::new();
        for img in fragment.select(&SELECTOR_IMG) {
            if let Some(alt) = img.value().attr("alt") {
                let alt = normalize_ws(alt);
                if !alt.is_empty() && !alts.contains(&alt) {
                    alts.push(alt);
                }
            }
        }
        alts
    }

    /// `title` attributes in the cell (hover tooltips), in order.
    pub fn tooltips(&self) -> Vec<String> {
        if !self.markup.contains("title=") {
            return Vec::new();
        }
        let fragment = Html::parse_fragment(&self.markup);
        fragment
            .select(&SELECTOR_TITLED)
            .filter_map(|el| el.value().attr("title"))
            .map(normalize_ws)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_td(html: &str) -> RawCell {
        let doc = Html::parse_document(html);
        let td = Selector::parse("td").unwrap();
        RawCell::from_element(doc.select(&td).next().unwrap())
    }

    #[test]
    fn text_nodes_are_joined_with_spaces() {
        let cell = first_td("<table><tr><td>Route<br>12 <b>Nord</b></td></tr></table>");
        assert_eq!(cell.text, "Route 12 Nord");
        assert!(cell.markup.starts_with("<td>"));
    }

    #[test]
    fn image_alts_are_deduplicated() {
        let cell = first_td(
            r#"<table><tr><td>Route 1 <img src="a.png" alt="Rattata"><img src="b.png" alt="Rattata"><img src="c.png" alt="Roucool"></td></tr></table>"#,
        );
        assert!(cell.has_image());
        assert_eq!(cell.image_alts(), vec!["Rattata", "Roucool"]);
    }

    #[test]
    fn tooltips_are_collected() {
        let cell = first_td(
            r#"<table><tr><td><span title="TC = 10%">50%</span></td></tr></table>"#,
        );
        assert_eq!(cell.tooltips(), vec!["TC = 10%"]);
        assert!(RawCell::text_only("50%").tooltips().is_empty());
    }

    #[test]
    fn sprite_only_cell_is_blank() {
        let cell = first_td(r#"<table><tr><td><img src="a.png" alt="Pikachu"></td></tr></table>"#);
        assert!(cell.is_blank());
        assert!(cell.has_image());
    }
}
