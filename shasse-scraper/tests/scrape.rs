use std::collections::HashMap;
use std::sync::Mutex;

use shasse_catalog::ShinyLock;
use shasse_core::{Generation, MethodCategory};
use shasse_scraper::{
    LogEntry, PageSource, ScrapeError, ScrapeEvent, ScrapeOptions, find_in_portal,
    scrape_generation,
};
use tokio::sync::mpsc;

const BASE: &str = "https://wiki.test";

const PORTAL: &str = r#"
<html><body>
  <a href="/page/jeuxvideo/dossier_shasse/pokedex_shasse/1g/bulbizarre">
    <img src="/pages/icones/minichroma/NG/1.png">#001 Bulbizarre</a>
  <a href="/page/jeuxvideo/dossier_shasse/pokedex_shasse/1g/carapuce">#007 Carapuce</a>
  <a href="/page/jeuxvideo/dossier_shasse/pokedex_shasse/1g/mew">#151 Mew</a>
  <a href="/page/jeuxvideo/dossier_shasse/pokedex_shasse/1g/missingno">Missingno</a>
</body></html>
"#;

const BULBIZARRE: &str = r#"
<html><body>
  <img src="/img/home/1.png" alt="Bulbizarre">
  <table>
    <tr><th>Méthodes de shasse disponibles</th></tr>
    <tr><td><ul><li class="listh-bipcode">Charme Chroma</li></ul></td></tr>
  </table>
  <table>
    <tr><th>Jeu</th><th>Méthode</th><th>Lieu</th><th>Taux</th></tr>
    <tr><td>Rouge</td><td>Reset</td><td>Bourg Palette (Starter)</td><td>1/8192</td></tr>
    <tr><td>Écarlate</td><td>Rencontre</td><td>Zone Est</td><td>5%</td></tr>
  </table>
</body></html>
"#;

const MEW: &str = r#"
<html><body>
  <p>Mew est shiny lock dans Rouge et Bleu.</p>
  <table>
    <tr><th>Jeu</th><th>Méthode</th><th>Lieu</th></tr>
    <tr><td>Rouge</td><td>Reset</td><td>Île Faraday</td></tr>
  </table>
</body></html>
"#;

const CARAPUCE: &str = "<html><body><p>En construction</p></body></html>";

fn dossier(slug: &str) -> String {
    format!("{}/page/jeuxvideo/dossier_shasse/pokedex_shasse/{}", BASE, slug)
}

/// Serves canned pages and bytes, recording every request.
#[derive(Default)]
struct MemorySource {
    pages: HashMap<String, String>,
    bytes: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    fn site() -> Self {
        let mut source = Self::default();
        source.pages.insert(dossier("portail/1g"), PORTAL.to_string());
        source.pages.insert(dossier("1g/bulbizarre"), BULBIZARRE.to_string());
        source.pages.insert(dossier("1g/mew"), MEW.to_string());
        source.pages.insert(dossier("1g/carapuce"), CARAPUCE.to_string());
        source.bytes.insert(
            format!("{}/pages/icones/minichroma/NG/1.png", BASE),
            b"sprite-1".to_vec(),
        );
        source.bytes.insert(
            format!("{}/pages/icones/minichroma/NG/151.png", BASE),
            b"sprite-151".to_vec(),
        );
        source
            .bytes
            .insert(format!("{}/img/home/1.png", BASE), b"home-1".to_vec());
        source
    }

    fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    fn not_found(url: &str) -> ScrapeError {
        ScrapeError::Status {
            status: 404,
            url: url.to_string(),
        }
    }
}

impl PageSource for MemorySource {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bytes
            .get(url)
            .cloned()
            .ok_or_else(|| Self::not_found(url))
    }
}

fn options(assets: &std::path::Path) -> ScrapeOptions {
    ScrapeOptions {
        base_url: BASE.to_string(),
        assets_dir: assets.to_path_buf(),
        workers: 3,
        download_media: true,
        limit: None,
    }
}

#[tokio::test]
async fn scrapes_a_generation_end_to_end() {
    let assets = tempfile::tempdir().unwrap();
    let source = MemorySource::site();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let result = scrape_generation(&source, Generation::FIRST, &options(assets.path()), tx)
        .await
        .unwrap();

    let names: Vec<&str> = result.pokemon.iter().map(|p| p.entry.name.as_str()).collect();
    assert_eq!(names, vec!["Bulbizarre", "Carapuce", "Mew"]);

    let summary = result.log.summary();
    assert_eq!(summary.total_success, 2);
    assert_eq!(summary.total_no_data, 1);
    assert_eq!(summary.total_errors, 1);
    assert_eq!(summary.shiny_locked, 1);

    // Portal order is kept in the log too.
    assert!(matches!(
        &result.log.entries()[3],
        LogEntry::Error { pokemon, .. } if pokemon == "Missingno"
    ));

    let mut started = 0;
    let mut last = None;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, ScrapeEvent::PokemonStarted { .. }) {
            started += 1;
        }
        last = Some(event);
    }
    assert_eq!(started, 4);
    assert!(matches!(last, Some(ScrapeEvent::Done)));
}

#[tokio::test]
async fn bulbizarre_methods_and_media() {
    let assets = tempfile::tempdir().unwrap();
    let source = MemorySource::site();
    let (tx, _rx) = mpsc::unbounded_channel();

    let result = scrape_generation(&source, Generation::FIRST, &options(assets.path()), tx)
        .await
        .unwrap();
    let bulbizarre = &result.pokemon[0];

    let general: Vec<&str> = bulbizarre
        .details
        .general_methods
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(general, vec!["Charme Chroma", "Masuda"]);
    assert_eq!(bulbizarre.details.specific_methods.len(), 2);
    assert_eq!(bulbizarre.details.specific_methods[0].category, MethodCategory::Reset);
    assert_eq!(bulbizarre.shiny_lock, ShinyLock::Unlocked);

    let sprite = bulbizarre.sprite_path.as_ref().unwrap();
    assert_eq!(sprite, &assets.path().join("gen_1").join("001_Bulbizarre.png"));
    assert_eq!(std::fs::read(sprite).unwrap(), b"sprite-1");

    let artwork = bulbizarre.image_path.as_ref().unwrap();
    assert_eq!(artwork, &assets.path().join("gen_1").join("001_Bulbizarre_hq.png"));
    assert_eq!(std::fs::read(artwork).unwrap(), b"home-1");
}

#[tokio::test]
async fn locked_and_empty_pages() {
    let assets = tempfile::tempdir().unwrap();
    let source = MemorySource::site();
    let (tx, _rx) = mpsc::unbounded_channel();

    let result = scrape_generation(&source, Generation::FIRST, &options(assets.path()), tx)
        .await
        .unwrap();

    let mew = &result.pokemon[2];
    assert_eq!(mew.shiny_lock, ShinyLock::Locked);
    assert!(mew.details.general_methods.is_empty());
    assert_eq!(mew.details.games[0].generation, Generation::new(1));

    // No sprite is served for Carapuce: the Pokémon still comes back.
    let carapuce = &result.pokemon[1];
    assert!(carapuce.details.is_empty());
    assert_eq!(carapuce.shiny_lock, ShinyLock::Unknown);
    assert!(carapuce.sprite_path.is_none());
}

#[tokio::test]
async fn existing_media_is_not_downloaded_again() {
    let assets = tempfile::tempdir().unwrap();
    let source = MemorySource::site();
    let sprite_url = format!("{}/pages/icones/minichroma/NG/1.png", BASE);

    for _ in 0..2 {
        let (tx, _rx) = mpsc::unbounded_channel();
        scrape_generation(&source, Generation::FIRST, &options(assets.path()), tx)
            .await
            .unwrap();
    }
    assert_eq!(source.request_count(&sprite_url), 1);
}

#[tokio::test]
async fn no_media_and_limit_options() {
    let assets = tempfile::tempdir().unwrap();
    let source = MemorySource::site();
    let (tx, _rx) = mpsc::unbounded_channel();
    let options = ScrapeOptions {
        download_media: false,
        limit: Some(1),
        ..options(assets.path())
    };

    let result = scrape_generation(&source, Generation::FIRST, &options, tx)
        .await
        .unwrap();
    assert_eq!(result.pokemon.len(), 1);
    assert!(result.pokemon[0].sprite_path.is_none());
    assert_eq!(source.request_count(&format!("{}/img/home/1.png", BASE)), 0);
}

#[tokio::test]
async fn missing_portal_is_an_error() {
    let source = MemorySource::site();
    let (tx, _rx) = mpsc::unbounded_channel();
    let result = scrape_generation(
        &source,
        Generation::new(2).unwrap(),
        &ScrapeOptions {
            base_url: BASE.to_string(),
            ..ScrapeOptions::default()
        },
        tx,
    )
    .await;
    assert!(matches!(result, Err(ScrapeError::Status { status: 404, .. })));
}

#[tokio::test]
async fn finds_pokemon_on_portal() {
    let source = MemorySource::site();
    let entry = find_in_portal(&source, BASE, "mew", Generation::FIRST)
        .await
        .unwrap();
    assert_eq!(entry.name, "Mew");
    assert_eq!(entry.number, Some(151));

    let missing = find_in_portal(&source, BASE, "Pikachu", Generation::FIRST).await;
    assert!(matches!(missing, Err(ScrapeError::NotInPortal { .. })));
}
