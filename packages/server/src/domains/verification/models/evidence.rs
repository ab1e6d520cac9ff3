use serde::{Deserialize, Serialize};

/// Snippet recorded when a result page could not be loaded.
pub const FAILED_SNIPPET: &str = "Failed to scrape content.";

/// Where an evidence item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceSource {
    #[serde(rename = "web search")]
    WebSearch,
    #[serde(rename = "fact-check index")]
    FactCheckIndex,
}

/// Publisher metadata attached to fact-check index results.
///
/// Fields are required on deserialize so that a flattened web item
/// reads back as `fact_check: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckDetails {
    pub headline: String,
    pub publisher: String,
    pub claim: String,
    pub verdict: String,
}

/// One piece of supporting material handed to the adjudicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source: EvidenceSource,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheckDetails>,
}

impl EvidenceItem {
    pub fn web(link: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            source: EvidenceSource::WebSearch,
            link: link.into(),
            snippet: snippet.into(),
            fact_check: None,
        }
    }

    /// Fact-check result. The snippet is the checked claim text, or the
    /// headline when the card had no claim.
    pub fn fact_check(link: impl Into<String>, details: FactCheckDetails) -> Self {
        let snippet = if details.claim.trim().is_empty() {
            details.headline.clone()
        } else {
            details.claim.clone()
        };
        Self {
            source: EvidenceSource::FactCheckIndex,
            link: link.into(),
            snippet,
            fact_check: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_web_item_shape() {
        let item = EvidenceItem::web("https://bbc.com/a", "Summary");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"source": "web search", "link": "https://bbc.com/a", "snippet": "Summary"})
        );
    }

    #[test]
    fn test_fact_check_item_is_flattened() {
        let item = EvidenceItem::fact_check(
            "https://factly.in/x",
            FactCheckDetails {
                headline: "No, the dam did not burst".into(),
                publisher: "Factly".into(),
                claim: "Dam burst in Kerala".into(),
                verdict: "False".into(),
            },
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["source"], "fact-check index");
        assert_eq!(value["snippet"], "Dam burst in Kerala");
        assert_eq!(value["publisher"], "Factly");
        assert_eq!(value["verdict"], "False");
    }

    #[test]
    fn test_fact_check_snippet_falls_back_to_headline() {
        let item = EvidenceItem::fact_check(
            "https://example.org",
            FactCheckDetails { headline: "Headline only".into(), ..Default::default() },
        );
        assert_eq!(item.snippet, "Headline only");
    }

    #[test]
    fn test_stored_web_item_deserializes_without_details() {
        let item: EvidenceItem =
            serde_json::from_value(json!({"source": "web search", "link": "https://a.com", "snippet": "s"}))
                .unwrap();
        assert_eq!(item, EvidenceItem::web("https://a.com", "s"));
    }
}
