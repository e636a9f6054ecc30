//! Web search over the Tavily HTTP API.

use crate::capabilities::{SearchProvider, SearchResult};
use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Retrieval is restricted to reputable medical sources.
const INCLUDE_DOMAINS: [&str; 6] = [
    "mayoclinic.org",
    "nih.gov",
    "who.int",
    "cdc.gov",
    "webmd.com",
    "healthline.com",
];

/// A [`SearchProvider`] backed by the Tavily search API.
pub struct TavilySearchClient {
    client: reqwest::Client,
    api_key: String,
}

impl TavilySearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'static str,
    include_domains: &'static [&'static str],
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[async_trait]
impl SearchProvider for TavilySearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let payload = TavilyRequest {
            query,
            search_depth: "advanced",
            include_domains: &INCLUDE_DOMAINS,
        };

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("Tavily search failed with status {status}");
        }

        let body: TavilyResponse = response.json().await?;
        Ok(body.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_with_missing_results_deserializes_as_empty() {
        let body: TavilyResponse = serde_json::from_str("{}").unwrap();
        assert!(body.results.is_empty());
    }

    #[test]
    fn response_results_keep_order() {
        let raw = r#"{"results": [
            {"title": "First", "content": "a"},
            {"title": "Second", "content": "b"}
        ]}"#;
        let body: TavilyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(body.results[0].title, "First");
        assert_eq!(body.results[1].title, "Second");
    }
}
