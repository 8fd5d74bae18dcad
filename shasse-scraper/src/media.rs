use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use scraper::{Html, Selector};
use shasse_catalog::PokemonEntry;

use crate::client::PageSource;
use crate::error::ScrapeError;
use crate::urls::{absolute_url, sanitize_filename, sprite_url};

static SELECTOR_IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("static pattern"));

/// `src` fragments that mark a large artwork, checked when no HOME render
/// is on the page.
const ARTWORK_HINTS: &[&str] = &["artworks", "artwork", "hq", "high", "big", "large"];

/// Kinds of image saved per Pokémon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Sprite,
    Artwork,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sprite => "sprite",
            Self::Artwork => "artwork",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-generation media directory (`<assets>/gen_3`).
pub fn generation_dir(assets_dir: &Path, entry: &PokemonEntry) -> PathBuf {
    assets_dir.join(format!("gen_{}", entry.generation))
}

/// `<assets>/gen_<g>/<NNN>_<name>.png`
pub fn sprite_path(assets_dir: &Path, entry: &PokemonEntry) -> PathBuf {
    generation_dir(assets_dir, entry).join(format!(
        "{}_{}.png",
        entry.padded_number(),
        sanitize_filename(&entry.name)
    ))
}

/// `<assets>/gen_<g>/<NNN>_<name>_hq<ext>`, keeping the extension of `url`.
pub fn artwork_path(assets_dir: &Path, entry: &PokemonEntry, url: &str) -> PathBuf {
    generation_dir(assets_dir, entry).join(format!(
        "{}_{}_hq{}",
        entry.padded_number(),
        sanitize_filename(&entry.name),
        url_extension(url)
    ))
}

/// File extension of a URL's path, with its dot, defaulting to `.png`.
fn url_extension(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 4
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => ".png".to_string(),
    }
}

/// Pick the high-quality image on a Pokémon page.
///
/// A HOME render (`/home/` in the `src`) wins, then any artwork-looking
/// `src`, then the first image whose `alt` names the Pokémon.
pub fn select_artwork(document: &Html, pokemon_name: &str) -> Option<String> {
    let images: Vec<(&str, String)> = document
        .select(&SELECTOR_IMG)
        .filter_map(|img| {
            let src = img.value().attr("src")?;
            let alt = img.value().attr("alt").unwrap_or_default().to_lowercase();
            (!src.is_empty()).then_some((src, alt))
        })
        .collect();

    if let Some((src, _)) = images.iter().find(|(src, _)| src.contains("/home/")) {
        return Some(src.to_string());
    }
    if let Some((src, _)) = images.iter().find(|(src, _)| {
        let lower = src.to_lowercase();
        ARTWORK_HINTS.iter().any(|hint| lower.contains(hint))
    }) {
        return Some(src.to_string());
    }

    let name = pokemon_name.trim().to_lowercase();
    images
        .iter()
        .find(|(_, alt)| (!name.is_empty() && alt.contains(&name)) || alt.contains("pokemon"))
        .map(|(src, _)| src.to_string())
}

/// Download `url` to `dest` unless `dest` already exists.
pub async fn download_to<S: PageSource>(
    source: &S,
    url: &str,
    dest: &Path,
) -> Result<PathBuf, ScrapeError> {
    if dest.exists() {
        log::debug!("Already downloaded: {}", dest.display());
        return Ok(dest.to_path_buf());
    }
    let bytes = source.fetch_bytes(url).await?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, &bytes)?;
    log::debug!("Saved {} ({} bytes)", dest.display(), bytes.len());
    Ok(dest.to_path_buf())
}

/// Download the shiny mini-sprite for a portal entry.
pub async fn download_sprite<S: PageSource>(
    source: &S,
    base_url: &str,
    assets_dir: &Path,
    entry: &PokemonEntry,
) -> Result<PathBuf, ScrapeError> {
    let url = match entry.sprite_url.as_deref() {
        Some(src) => absolute_url(base_url, src),
        None => sprite_url(base_url, &entry.name, entry.number),
    };
    download_to(source, &url, &sprite_path(assets_dir, entry)).await
}

/// Download the artwork picked by [`select_artwork`].
pub async fn download_artwork<S: PageSource>(
    source: &S,
    base_url: &str,
    assets_dir: &Path,
    entry: &PokemonEntry,
    src: &str,
) -> Result<PathBuf, ScrapeError> {
    let url = absolute_url(base_url, src);
    let dest = artwork_path(assets_dir, entry, &url);
    download_to(source, &url, &dest).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use shasse_core::Generation;

    fn entry(name: &str, number: Option<u32>) -> PokemonEntry {
        PokemonEntry {
            name: name.to_string(),
            number,
            generation: Generation::new(3).unwrap(),
            sprite_url: None,
        }
    }

    #[test]
    fn media_paths() {
        let assets = Path::new("assets");
        assert_eq!(
            sprite_path(assets, &entry("Poussifeu", Some(255))),
            Path::new("assets/gen_3/255_Poussifeu.png")
        );
        assert_eq!(
            sprite_path(assets, &entry("Mr. Mime", None)),
            Path::new("assets/gen_3/XXX_Mr_Mime.png")
        );
        assert_eq!(
            artwork_path(assets, &entry("Arcko", Some(252)), "https://x/home/252.jpg?v=2"),
            Path::new("assets/gen_3/252_Arcko_hq.jpg")
        );
        assert_eq!(
            artwork_path(assets, &entry("Arcko", Some(252)), "https://x/render/arcko"),
            Path::new("assets/gen_3/252_Arcko_hq.png")
        );
    }

    #[test]
    fn artwork_prefers_home_render() {
        let doc = Html::parse_document(
            r#"<img src="/img/artworks/1.png"><img src="/img/home/1.png" alt="x">"#,
        );
        assert_eq!(select_artwork(&doc, "Bulbizarre").as_deref(), Some("/img/home/1.png"));
    }

    #[test]
    fn artwork_falls_back_to_hint_then_alt() {
        let doc = Html::parse_document(
            r#"<img src="/logo.png" alt="Logo"><img src="/img/Large/1.png">"#,
        );
        assert_eq!(select_artwork(&doc, "Bulbizarre").as_deref(), Some("/img/Large/1.png"));

        let doc = Html::parse_document(
            r#"<img src="/logo.png" alt="Logo"><img src="/p/1.png" alt="Bulbizarre chromatique">"#,
        );
        assert_eq!(select_artwork(&doc, "Bulbizarre").as_deref(), Some("/p/1.png"));

        let doc = Html::parse_document(r#"<img src="/logo.png" alt="Logo">"#);
        assert_eq!(select_artwork(&doc, "Bulbizarre"), None);
    }
}
