use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::config::ScraperConfig;
use crate::error::ScrapeError;

/// Something that can hand back page markup and media bytes for a URL.
///
/// The live site is [`PokebipClient`]; tests use an in-memory map.
pub trait PageSource: Sync {
    /// Fetch a page as text.
    fn fetch_page(&self, url: &str) -> impl Future<Output = Result<String, ScrapeError>> + Send;

    /// Fetch a binary resource (sprite, artwork).
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ScrapeError>> + Send;
}

/// HTTP client for the wiki, with a browser user agent and rate limiting.
pub struct PokebipClient {
    http: reqwest::Client,
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl PokebipClient {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            min_interval: config.request_interval,
            last_request: Arc::new(Mutex::new(Instant::now() - config.request_interval)),
        })
    }

    /// Enforce rate limiting: wait until at least `min_interval` has passed
    /// since the last request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ScrapeError> {
        self.rate_limit().await;
        log::debug!("GET {}", url);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp)
    }
}

impl PageSource for PokebipClient {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self.get(url).await?;
        Ok(resp.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let resp = self.get(url).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
