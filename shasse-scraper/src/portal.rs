//! Generation portal parsing: the list of Pokémon links for one generation.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use shasse_catalog::PokemonEntry;
use shasse_core::Generation;
use shasse_core::text::normalize_ws;

static SELECTOR_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static pattern"));
static SELECTOR_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("static pattern"));

static POKEMON_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/page/jeuxvideo/dossier_shasse/pokedex_shasse/\d+g/").expect("static pattern")
});
static NUMBER_IN_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("static pattern"));
static NUMBER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\d+\s*").expect("static pattern"));

/// Sprite URL shapes that embed the Pokédex number, most specific first.
static SPRITE_NUMBER_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"/NG/(\d+)\.png", r"/(\d+)\.png", r"/(\d+)_", r"(\d+)\.png"]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern"))
        .collect()
});

/// Pokédex number written as `#NNN` in link text.
pub fn number_from_text(text: &str) -> Option<u32> {
    NUMBER_IN_TEXT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Pokédex number embedded in a sprite URL.
pub fn number_from_sprite_url(url: &str) -> Option<u32> {
    SPRITE_NUMBER_RES
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps[1].parse().ok())
}

/// Every Pokémon linked from a portal page, deduplicated by name, in page
/// order.
pub fn parse_portal(document: &Html, generation: Generation) -> Vec<PokemonEntry> {
    let mut entries: Vec<PokemonEntry> = Vec::new();

    for link in document.select(&SELECTOR_LINK) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !POKEMON_HREF_RE.is_match(href) {
            continue;
        }

        let text = normalize_ws(&link.text().collect::<Vec<_>>().join(" "));
        let name = NUMBER_PREFIX_RE.replace_all(&text, "").trim().to_string();
        if name.is_empty() {
            continue;
        }
        if entries.iter().any(|e| e.name.eq_ignore_ascii_case(&name)) {
            continue;
        }

        let sprite_url = link
            .select(&SELECTOR_IMG)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);
        let number = number_from_text(&text)
            .or_else(|| sprite_url.as_deref().and_then(number_from_sprite_url));

        entries.push(PokemonEntry {
            name,
            number,
            generation,
            sprite_url,
        });
    }

    log::debug!(
        "Portal {}G: {} Pokémon links",
        generation,
        entries.len()
    );
    entries
}

/// Find one Pokémon on a portal page by (case-insensitive) name.
pub fn find_entry<'a>(entries: &'a [PokemonEntry], name: &str) -> Option<&'a PokemonEntry> {
    let wanted = name.trim().to_lowercase();
    entries
        .iter()
        .find(|e| e.name.to_lowercase() == wanted)
        .or_else(|| {
            entries
                .iter()
                .find(|e| e.name.to_lowercase().contains(&wanted))
        })
}
