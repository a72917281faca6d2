use std::time::Duration;

use itertools::Itertools;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid homepage url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("homepage request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("homepage returned status {0}")]
    Status(StatusCode),
    #[error("no paragraph text on {0}")]
    NoText(Url),
}

pub struct WebsiteScraper {
    client: Client,
}

impl WebsiteScraper {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(WebsiteScraper { client })
    }

    /// Fetches the homepage over https, falling back to http. The error of the
    /// http attempt is the one reported.
    pub async fn scrape(&self, hostname: &str) -> Result<String, ScrapeError> {
        match self.scrape_url(&format!("https://{}", hostname)).await {
            Ok(text) => return Ok(text),
            Err(e) => log::info!("Scraping https://{} failed: {}", hostname, e),
        }

        self.scrape_url(&format!("http://{}", hostname)).await
    }

    async fn scrape_url(&self, url: &str) -> Result<String, ScrapeError> {
        let url = Url::parse(url)?;
        let res = self.client.get(url.clone()).send().await?;

        if res.status() != StatusCode::OK {
            return Err(ScrapeError::Status(res.status()));
        }

        let html = res.text().await?;
        let text = extract_paragraph_text(&html);

        match text.trim().is_empty() {
            true => Err(ScrapeError::NoText(url)),
            false => Ok(text),
        }
    }
}

pub fn extract_paragraph_text(html: &str) -> String {
    let Ok(p_selector) = Selector::parse("p") else {
        return String::new();
    };

    Html::parse_document(html)
        .select(&p_selector)
        .map(|p| p.text().collect::<String>())
        .join(" ")
}
