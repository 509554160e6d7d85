use super::{clamp_confidence, Analysis, ApiData, ApiFetcher, Verdict};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Submits one headline to `POST /predict` for classification.
pub struct PredictFetcher {
    base_url: String,
    headline: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: String,
    confidence: f64,
    headline: Option<String>,
}

impl PredictFetcher {
    pub fn new(base_url: String, headline: String, client: reqwest::Client) -> Self {
        Self {
            base_url,
            headline,
            client,
        }
    }
}

#[async_trait]
impl ApiFetcher for PredictFetcher {
    async fn fetch(&self) -> Result<ApiData> {
        let url = format!("{}/predict", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "headline": self.headline }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "prediction API error: {}",
                response.status()
            ));
        }

        let body = response.text().await?;
        let analysis = parse_analysis(&body, &self.headline)?;

        Ok(ApiData::Analysis(analysis))
    }
}

/// Parse a `/predict` response body. `prediction` and `confidence`
/// are required; a response that omits the echoed headline falls back
/// to the text that was submitted.
fn parse_analysis(body: &str, submitted: &str) -> Result<Analysis> {
    let response: PredictResponse =
        serde_json::from_str(body).context("malformed prediction response")?;

    let headline = response
        .headline
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| submitted.to_string());

    Ok(Analysis {
        headline,
        verdict: Verdict::from_label(&response.prediction),
        label: response.prediction,
        confidence: clamp_confidence(response.confidence),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{"prediction": "Fake", "confidence": 87.32, "headline": "Aliens built the pyramids"}"#;
        let analysis = parse_analysis(body, "ignored").unwrap();
        assert_eq!(analysis.headline, "Aliens built the pyramids");
        assert_eq!(analysis.label, "Fake");
        assert_eq!(analysis.verdict, Verdict::Fake);
        assert_eq!(analysis.confidence, 87.32);
    }

    #[test]
    fn test_parse_real_prediction() {
        let body = r#"{"prediction": "Real", "confidence": 64.1, "headline": "City council approves budget"}"#;
        let analysis = parse_analysis(body, "ignored").unwrap();
        assert_eq!(analysis.verdict, Verdict::Real);
    }

    #[test]
    fn test_parse_uppercase_fake() {
        let body = r#"{"prediction": "FAKE", "confidence": 92.0, "headline": "x"}"#;
        let analysis = parse_analysis(body, "ignored").unwrap();
        assert_eq!(analysis.verdict, Verdict::Fake);
    }

    #[test]
    fn test_parse_missing_headline_uses_submitted() {
        let body = r#"{"prediction": "Real", "confidence": 55.0}"#;
        let analysis = parse_analysis(body, "Submitted headline").unwrap();
        assert_eq!(analysis.headline, "Submitted headline");
    }

    #[test]
    fn test_parse_blank_headline_uses_submitted() {
        let body = r#"{"prediction": "Real", "confidence": 55.0, "headline": "  "}"#;
        let analysis = parse_analysis(body, "Submitted headline").unwrap();
        assert_eq!(analysis.headline, "Submitted headline");
    }

    #[test]
    fn test_parse_missing_prediction_fails() {
        let body = r#"{"confidence": 55.0, "headline": "x"}"#;
        assert!(parse_analysis(body, "x").is_err());
    }

    #[test]
    fn test_parse_missing_confidence_fails() {
        let body = r#"{"prediction": "Real", "headline": "x"}"#;
        assert!(parse_analysis(body, "x").is_err());
    }

    #[test]
    fn test_parse_not_json_fails() {
        assert!(parse_analysis("<html>502 Bad Gateway</html>", "x").is_err());
    }

    #[test]
    fn test_parse_clamps_confidence() {
        let body = r#"{"prediction": "Fake", "confidence": 180.0, "headline": "x"}"#;
        let analysis = parse_analysis(body, "x").unwrap();
        assert_eq!(analysis.confidence, 100.0);
    }
}
