//! JSON export files for scraped data.
//!
//! A dry-run scrape can be written to an export file and loaded back later,
//! so that a slow crawl and the database import are decoupled.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ScrapedPokemon;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The on-disk export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFile {
    /// RFC 3339 timestamp of when the export was written.
    pub exported_at: String,
    pub pokemon: Vec<ScrapedPokemon>,
}

impl ExportFile {
    pub fn new(pokemon: Vec<ScrapedPokemon>) -> Self {
        Self {
            exported_at: chrono::Local::now().to_rfc3339(),
            pokemon,
        }
    }
}

/// Write scraped Pokémon to a pretty-printed JSON export file.
pub fn save_export(path: &Path, pokemon: &[ScrapedPokemon]) -> Result<(), ExportError> {
    let file = ExportFile::new(pokemon.to_vec());
    let json = serde_json::to_string_pretty(&file).map_err(|e| ExportError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    std::fs::write(path, json).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load an export file written by [`save_export`].
pub fn load_export(path: &Path) -> Result<ExportFile, ExportError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| ExportError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
