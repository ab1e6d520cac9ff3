use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{json_array_slice, strip_code_fences};

/// Deduplicated, normalized domain names considered reputable for a topic.
///
/// Order is preserved from the source list. An empty set means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedDomainSet(Vec<String>);

impl TrustedDomainSet {
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Vec::new();
        for domain in domains {
            if let Some(normalized) = normalize_domain(domain.as_ref()) {
                if !set.contains(&normalized) {
                    set.push(normalized);
                }
            }
        }
        Self(set)
    }

    /// Parse a model reply that should be a JSON list of domain names.
    ///
    /// Returns `None` when no JSON list can be found. Non-string entries
    /// are skipped.
    pub fn from_model_text(text: &str) -> Option<Self> {
        let cleaned = strip_code_fences(text);
        let candidate = json_array_slice(&cleaned)?;
        let items: Vec<Value> = serde_json::from_str(candidate).ok()?;
        Some(Self::from_domains(items.iter().filter_map(Value::as_str)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if the link mentions any trusted domain.
    pub fn matches(&self, link: &str) -> bool {
        let link = link.to_lowercase();
        self.0.iter().any(|domain| link.contains(domain.as_str()))
    }

    /// `site:a OR site:b ...`, or `None` for an empty set.
    pub fn site_clause(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        Some(
            self.0
                .iter()
                .map(|d| format!("site:{}", d))
                .collect::<Vec<_>>()
                .join(" OR "),
        )
    }
}

fn normalize_domain(raw: &str) -> Option<String> {
    let mut domain = raw.trim().to_lowercase();

    for prefix in ["site:", "https://", "http://", "www."] {
        if let Some(rest) = domain.strip_prefix(prefix) {
            domain = rest.to_string();
        }
    }
    if let Some(idx) = domain.find(['/', '?', '#']) {
        domain.truncate(idx);
    }
    let domain = domain.trim_matches('.');

    if domain.is_empty() || !domain.contains('.') || domain.contains(char::is_whitespace) {
        return None;
    }
    Some(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_text_plain_list() {
        let set = TrustedDomainSet::from_model_text(r#"["bbc.com", "reuters.com", "gov.in"]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["bbc.com", "reuters.com", "gov.in"]);
    }

    #[test]
    fn test_from_model_text_fenced_and_noisy() {
        let text = "```json\n[\"https://www.BBC.com/news\", \"bbc.com\", 42, \"ndtv.com\"]\n```";
        let set = TrustedDomainSet::from_model_text(text).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["bbc.com", "ndtv.com"]);
    }

    #[test]
    fn test_from_model_text_rejects_prose() {
        assert!(TrustedDomainSet::from_model_text("I recommend BBC and Reuters.").is_none());
    }

    #[test]
    fn test_normalize_drops_garbage() {
        let set = TrustedDomainSet::from_domains(["", "localhost", "not a domain.com", "site:who.int"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["who.int"]);
    }

    #[test]
    fn test_matches_is_substring_based() {
        let set = TrustedDomainSet::from_domains(["reuters.com"]);
        assert!(set.matches("https://www.reuters.com/world/article-1"));
        assert!(set.matches("https://WWW.REUTERS.COM/x"));
        assert!(!set.matches("https://example.org/reuters"));
    }

    #[test]
    fn test_site_clause() {
        let set = TrustedDomainSet::from_domains(["bbc.com", "thehindu.com"]);
        assert_eq!(set.site_clause().as_deref(), Some("site:bbc.com OR site:thehindu.com"));
        assert_eq!(TrustedDomainSet::default().site_clause(), None);
    }
}
