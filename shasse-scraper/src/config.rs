use std::path::{Path, PathBuf};

use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::urls::DEFAULT_BASE_URL;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_INTERVAL_MS: u64 = 500;
pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_DATABASE: &str = "pokemon_shasse.db";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

const ENV_BASE_URL: &str = "SHASSE_BASE_URL";
const ENV_DATABASE: &str = "SHASSE_DATABASE";
const ENV_ASSETS_DIR: &str = "SHASSE_ASSETS_DIR";
const ENV_WORKERS: &str = "SHASSE_WORKERS";

/// Resolved scraper and storage settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Minimum delay between two requests to the site.
    pub request_interval: Duration,
    /// Pokémon pages processed concurrently.
    pub workers: usize,
    pub database: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            request_interval: Duration::from_millis(DEFAULT_REQUEST_INTERVAL_MS),
            workers: DEFAULT_WORKERS,
            database: PathBuf::from(DEFAULT_DATABASE),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Hard-coded default value.
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    pub base_url: ValueSource,
    pub user_agent: ValueSource,
    pub timeout: ValueSource,
    pub request_interval: ValueSource,
    pub workers: ValueSource,
    pub database: ValueSource,
    pub assets_dir: ValueSource,
}

/// TOML config file format.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ConfigFile {
    pub scraper: Option<ScraperSection>,
    pub storage: Option<StorageSection>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ScraperSection {
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_secs: Option<u64>,
    pub request_interval_ms: Option<u64>,
    pub workers: Option<usize>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct StorageSection {
    pub database: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
}

/// Pick env, then file, then default, recording which one won.
fn pick<T>(
    env: Option<(&'static str, T)>,
    file: Option<T>,
    default: T,
) -> (T, ValueSource) {
    if let Some((var, value)) = env {
        (value, ValueSource::EnvVar(var))
    } else if let Some(value) = file {
        (value, ValueSource::ConfigFile)
    } else {
        (default, ValueSource::Default)
    }
}

impl ScraperConfig {
    /// Load settings from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<(Self, ConfigSources), ScrapeError> {
        let file = match config_path() {
            Some(path) => load_config_file(&path)?,
            None => None,
        };
        Self::resolve(file.as_ref(), |var| std::env::var(var).ok())
    }

    /// Resolve settings from an already-read config file and an env lookup.
    pub fn resolve(
        file: Option<&ConfigFile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, ConfigSources), ScrapeError> {
        let defaults = Self::default();
        let scraper = file.and_then(|f| f.scraper.clone()).unwrap_or_default();
        let storage = file.and_then(|f| f.storage.clone()).unwrap_or_default();

        let env_workers = match env(ENV_WORKERS) {
            Some(raw) => {
                let n: usize = raw.trim().parse().map_err(|_| {
                    ScrapeError::Config(format!("{} must be a number, got '{}'", ENV_WORKERS, raw))
                })?;
                Some((ENV_WORKERS, n))
            }
            None => None,
        };

        let (base_url, base_url_src) = pick(
            env(ENV_BASE_URL).map(|v| (ENV_BASE_URL, v)),
            scraper.base_url,
            defaults.base_url,
        );
        let (user_agent, user_agent_src) = pick(None, scraper.user_agent, defaults.user_agent);
        let (timeout, timeout_src) = pick(
            None,
            scraper.timeout_secs.map(Duration::from_secs),
            defaults.timeout,
        );
        let (request_interval, interval_src) = pick(
            None,
            scraper.request_interval_ms.map(Duration::from_millis),
            defaults.request_interval,
        );
        let (workers, workers_src) = pick(env_workers, scraper.workers, defaults.workers);
        let (database, database_src) = pick(
            env(ENV_DATABASE).map(|v| (ENV_DATABASE, PathBuf::from(v))),
            storage.database,
            defaults.database,
        );
        let (assets_dir, assets_src) = pick(
            env(ENV_ASSETS_DIR).map(|v| (ENV_ASSETS_DIR, PathBuf::from(v))),
            storage.assets_dir,
            defaults.assets_dir,
        );

        if workers == 0 {
            return Err(ScrapeError::Config("workers must be at least 1".to_string()));
        }

        let config = Self {
            base_url,
            user_agent,
            timeout,
            request_interval,
            workers,
            database,
            assets_dir,
        };
        let sources = ConfigSources {
            base_url: base_url_src,
            user_agent: user_agent_src,
            timeout: timeout_src,
            request_interval: interval_src,
            workers: workers_src,
            database: database_src,
            assets_dir: assets_src,
        };
        Ok((config, sources))
    }

    /// The config file form of these settings.
    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            scraper: Some(ScraperSection {
                base_url: Some(self.base_url.clone()),
                user_agent: Some(self.user_agent.clone()),
                timeout_secs: Some(self.timeout.as_secs()),
                request_interval_ms: Some(self.request_interval.as_millis() as u64),
                workers: Some(self.workers),
            }),
            storage: Some(StorageSection {
                database: Some(self.database.clone()),
                assets_dir: Some(self.assets_dir.clone()),
            }),
        }
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shasse").join("config.toml"))
}

/// Read a config file. A missing file is `Ok(None)`; a malformed one is an
/// error.
pub fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ScrapeError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
}

/// Write `config` to `path`, creating parent directories as needed.
pub fn save_config_file(path: &Path, config: &ScraperConfig) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(&config.to_file())
        .map_err(|e| ScrapeError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Write a config file with the default settings to the standard location.
/// Returns the path the file was written to.
pub fn save_default() -> Result<PathBuf, ScrapeError> {
    let path = config_path().ok_or_else(|| {
        ScrapeError::Config("Could not determine config directory".to_string())
    })?;
    save_config_file(&path, &ScraperConfig::default())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let (config, sources) = ScraperConfig::resolve(None, no_env).unwrap();
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(sources.base_url, ValueSource::Default);
        assert_eq!(sources.workers, ValueSource::Default);
    }

    #[test]
    fn env_beats_file_beats_default() {
        let file = ConfigFile {
            scraper: Some(ScraperSection {
                base_url: Some("http://file.example".to_string()),
                workers: Some(4),
                ..Default::default()
            }),
            storage: Some(StorageSection {
                database: Some(PathBuf::from("/data/file.db")),
                assets_dir: None,
            }),
        };
        let env = |var: &str| match var {
            "SHASSE_BASE_URL" => Some("http://env.example".to_string()),
            _ => None,
        };

        let (config, sources) = ScraperConfig::resolve(Some(&file), env).unwrap();
        assert_eq!(config.base_url, "http://env.example");
        assert_eq!(sources.base_url, ValueSource::EnvVar("SHASSE_BASE_URL"));
        assert_eq!(config.workers, 4);
        assert_eq!(sources.workers, ValueSource::ConfigFile);
        assert_eq!(config.database, PathBuf::from("/data/file.db"));
        assert_eq!(config.assets_dir, PathBuf::from(DEFAULT_ASSETS_DIR));
        assert_eq!(sources.assets_dir, ValueSource::Default);
    }

    #[test]
    fn bad_worker_count_is_a_config_error() {
        let env = |var: &str| (var == "SHASSE_WORKERS").then(|| "many".to_string());
        assert!(matches!(
            ScraperConfig::resolve(None, env),
            Err(ScrapeError::Config(_))
        ));

        let zero = |var: &str| (var == "SHASSE_WORKERS").then(|| "0".to_string());
        assert!(ScraperConfig::resolve(None, zero).is_err());
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        assert_eq!(load_config_file(&path).unwrap(), None);

        let mut config = ScraperConfig::default();
        config.workers = 6;
        save_config_file(&path, &config).unwrap();

        let file = load_config_file(&path).unwrap().unwrap();
        let (loaded, sources) = ScraperConfig::resolve(Some(&file), no_env).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(sources.timeout, ValueSource::ConfigFile);
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scraper\nworkers = ").unwrap();
        assert!(matches!(load_config_file(&path), Err(ScrapeError::Toml(_))));
    }
}
