use super::{clamp_confidence, ApiData, ApiFetcher, NewsArticle, Verdict};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Fetches the server's latest batch of fetched-and-classified news
/// from `GET /analyze-live`.
pub struct LiveNewsFetcher {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LiveResponse {
    results: Vec<ApiArticle>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    title: Option<String>,
    // Some server paths label the field "headline" instead of "title"
    headline: Option<String>,
    source: Option<String>,
    published_at: Option<String>,
    prediction: String,
    confidence: f64,
    url: Option<String>,
}

impl LiveNewsFetcher {
    pub fn new(base_url: String, client: reqwest::Client) -> Self {
        Self { base_url, client }
    }
}

#[async_trait]
impl ApiFetcher for LiveNewsFetcher {
    async fn fetch(&self) -> Result<ApiData> {
        let url = format!("{}/analyze-live", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("live news API error: {}", response.status()));
        }

        let body = response.text().await?;
        let articles = parse_live_news(&body)?;

        Ok(ApiData::LiveNews(articles))
    }
}

/// Parse an `/analyze-live` response body. The `results` array is
/// required; each article degrades per-field, so one sparse item never
/// sinks the batch. Server order is preserved.
fn parse_live_news(body: &str) -> Result<Vec<NewsArticle>> {
    let response: LiveResponse =
        serde_json::from_str(body).context("malformed live news response")?;

    let articles = response
        .results
        .into_iter()
        .map(|article| {
            let title = article
                .title
                .or(article.headline)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "(untitled)".to_string());

            NewsArticle {
                title,
                source: article.source.filter(|s| !s.trim().is_empty()),
                published_at: article.published_at.as_deref().and_then(parse_timestamp),
                verdict: Verdict::from_label(&article.prediction),
                label: article.prediction,
                confidence: clamp_confidence(article.confidence),
                url: article.url.filter(|u| !u.trim().is_empty()),
            }
        })
        .collect();

    Ok(articles)
}

/// Parse an ISO-8601 timestamp, with or without a zone offset.
/// Zoneless values are taken as UTC. Anything unparseable is None.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(with_zone) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_zone.with_timezone(&Utc));
    }

    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
