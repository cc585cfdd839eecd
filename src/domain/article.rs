use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::HopeTier;

/// Backend-assigned article identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub i64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub headline: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub source_url: String,
    pub source_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub hopefulness_score: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(id: i64, headline: &str, source_url: &str, source_name: &str) -> Self {
        Self {
            id: ArticleId(id),
            headline: headline.to_string(),
            summary: None,
            image_url: None,
            source_url: source_url.to_string(),
            source_name: source_name.to_string(),
            category: None,
            region: None,
            hopefulness_score: None,
            published_at: None,
        }
    }

    pub fn tier(&self) -> Option<HopeTier> {
        self.hopefulness_score.map(HopeTier::from_score)
    }

    /// Summary with markup removed and entities decoded.
    pub fn plain_summary(&self) -> String {
        self.summary
            .as_deref()
            .map(strip_markup)
            .unwrap_or_default()
    }

    /// Text placed on the clipboard by the share action.
    pub fn share_text(&self) -> String {
        format!("{} — {}", self.headline, self.source_url)
    }
}

/// Accepts RFC 3339 as well as the naive UTC timestamps the backend emits.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_timestamp(&s).map(Some).map_err(de::Error::custom),
    }
}

/// Scores are clamped to 0-100 so one odd value can't fail a whole page.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(raw
        .filter(|score| score.is_finite())
        .map(|score| score.round().clamp(0.0, 100.0) as u8))
}

pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("Invalid timestamp: {}", s))
}

fn strip_markup(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                // Tags count as word breaks.
                in_tag = false;
                if !last_was_space && !result.is_empty() {
                    result.push(' ');
                    last_was_space = true;
                }
            }
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    html_escape::decode_html_entities(result.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const BACKEND_ARTICLE: &str = r#"{
        "id": 42,
        "guid": "https://example.org/story",
        "headline": "Coral reef recovers",
        "summary": "<p>Scientists report <b>record</b> growth &amp; new species.</p>",
        "source_url": "https://example.org/story",
        "source_name": "Example News",
        "image_url": null,
        "published_at": "2024-05-01T12:30:00",
        "fetched_at": "2024-05-01T13:00:00",
        "category": "Environment",
        "region": "Oceania",
        "hopefulness_score": 82,
        "is_rated": true,
        "rating_failed": false,
        "excluded_reason": null,
        "created_at": "2024-05-01T13:00:00"
    }"#;

    #[test]
    fn test_deserialize_backend_article() {
        let article: Article = serde_json::from_str(BACKEND_ARTICLE).unwrap();
        assert_eq!(article.id, ArticleId(42));
        assert_eq!(article.headline, "Coral reef recovers");
        assert_eq!(article.category.as_deref(), Some("Environment"));
        assert_eq!(article.hopefulness_score, Some(82));
        assert_eq!(article.image_url, None);

        let published = article.published_at.unwrap();
        assert_eq!(published.year(), 2024);
        assert_eq!(published.hour(), 12);
        assert_eq!(published.minute(), 30);
    }

    #[test]
    fn test_deserialize_minimal_article() {
        let json = r#"{
            "id": 1,
            "headline": "Hello",
            "source_url": "https://a.example",
            "source_name": "A"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.summary, None);
        assert_eq!(article.published_at, None);
        assert_eq!(article.tier(), None);
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        let page: Vec<Article> = serde_json::from_str(
            r#"[
                {"id": 1, "headline": "a", "source_url": "u", "source_name": "s", "hopefulness_score": -4},
                {"id": 2, "headline": "b", "source_url": "u", "source_name": "s", "hopefulness_score": 300},
                {"id": 3, "headline": "c", "source_url": "u", "source_name": "s", "hopefulness_score": 72.6},
                {"id": 4, "headline": "d", "source_url": "u", "source_name": "s", "hopefulness_score": null}
            ]"#,
        )
        .unwrap();

        let scores: Vec<Option<u8>> = page.iter().map(|a| a.hopefulness_score).collect();
        assert_eq!(scores, vec![Some(0), Some(100), Some(73), None]);
    }

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let dt = parse_timestamp("2024-05-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_fractional_naive() {
        let dt = parse_timestamp("2024-05-01T12:30:00.123456").unwrap();
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_plain_summary_strips_markup() {
        let article: Article = serde_json::from_str(BACKEND_ARTICLE).unwrap();
        assert_eq!(
            article.plain_summary(),
            "Scientists report record growth & new species."
        );
    }

    #[test]
    fn test_plain_summary_empty_when_missing() {
        let article = Article::new(1, "Hello", "https://a.example", "A");
        assert_eq!(article.plain_summary(), "");
    }

    #[test]
    fn test_share_text() {
        let article = Article::new(1, "Hello", "https://a.example", "A");
        assert_eq!(article.share_text(), "Hello — https://a.example");
    }
}
