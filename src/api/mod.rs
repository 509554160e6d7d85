pub mod live;
pub mod predict;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Binary outcome of a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    /// The service labels predictions with free-form strings; only a
    /// case-insensitive "fake" maps to Fake, everything else is Real.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("fake") {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }

    pub fn is_fake(self) -> bool {
        self == Verdict::Fake
    }
}

/// Result of classifying a single submitted headline.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub headline: String,
    pub label: String,
    pub verdict: Verdict,
    pub confidence: f64,
}

/// One article from the live-news batch, already classified server-side.
#[derive(Debug, Clone)]
pub struct NewsArticle {
    pub title: String,
    pub source: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub label: String,
    pub verdict: Verdict,
    pub confidence: f64,
    pub url: Option<String>,
}

/// Payload delivered from a background fetch task back to the app.
#[derive(Debug, Clone)]
pub enum ApiData {
    Analysis(Analysis),
    LiveNews(Vec<NewsArticle>),
    Loading,
    Error(String),
}

/// Which panel a completed fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Analysis,
    LiveNews,
}

#[derive(Debug, Clone)]
pub struct ApiMessage {
    pub panel: Panel,
    pub data: ApiData,
}

#[async_trait]
pub trait ApiFetcher: Send + Sync {
    async fn fetch(&self) -> Result<ApiData>;
}

/// Clamp a wire confidence value into the displayable 0-100 range.
pub(crate) fn clamp_confidence(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_fake_lowercase() {
        assert_eq!(Verdict::from_label("fake"), Verdict::Fake);
    }

    #[test]
    fn test_verdict_fake_mixed_case() {
        assert_eq!(Verdict::from_label("FaKe"), Verdict::Fake);
    }

    #[test]
    fn test_verdict_fake_padded() {
        assert_eq!(Verdict::from_label(" Fake "), Verdict::Fake);
    }

    #[test]
    fn test_verdict_real() {
        assert_eq!(Verdict::from_label("Real"), Verdict::Real);
    }

    #[test]
    fn test_verdict_unknown_label_is_real() {
        assert_eq!(Verdict::from_label("satire"), Verdict::Real);
    }

    #[test]
    fn test_clamp_confidence_in_range() {
        assert_eq!(clamp_confidence(87.5), 87.5);
    }

    #[test]
    fn test_clamp_confidence_out_of_range() {
        assert_eq!(clamp_confidence(120.0), 100.0);
        assert_eq!(clamp_confidence(-3.0), 0.0);
    }

    #[test]
    fn test_clamp_confidence_nan() {
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
    }
}
