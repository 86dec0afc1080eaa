// src/fetch/mod.rs

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::schedule::Sheet;

// Published exports sit behind an edge cache; an unchanged URL can serve the
// same body for minutes. Each request therefore carries a `t` pair that no
// previous request used.
static SEQ: AtomicU64 = AtomicU64::new(0);

fn cache_busted(base: &Url) -> Url {
    let tag = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        SEQ.fetch_add(1, Ordering::Relaxed)
    );
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("t", &tag);
    url
}

/// GET the published CSV once and return its body as text.
pub async fn fetch_sheet(client: &Client, base: &Url) -> Result<String> {
    let url = cache_busted(base);
    debug!(%url, "fetching sheet");

    let text = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body from {}", url))?;

    Ok(text)
}

/// The production sheet source: one HTTP GET per cycle.
pub struct HttpSheet {
    client: Client,
    url: Url,
}

impl HttpSheet {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }
}

impl Sheet for HttpSheet {
    async fn fetch(&self) -> Result<String> {
        fetch_sheet(&self.client, &self.url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_requests_get_distinct_urls() {
        let base = Url::parse("https://example.com/pub?output=csv").unwrap();
        let a = cache_busted(&base);
        let b = cache_busted(&base);
        assert_ne!(a, b);
    }

    #[test]
    fn base_query_is_preserved_alongside_the_buster() {
        let base = Url::parse("https://example.com/pub?output=csv").unwrap();
        let url = cache_busted(&base);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.iter().any(|(k, v)| k == "output" && v == "csv"));
        assert!(pairs.iter().any(|(k, _)| k == "t"));
    }
}
