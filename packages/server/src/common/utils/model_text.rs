//! Pure helpers for cleaning up free-form model output.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or trail off with
//! commentary. These functions cut the text down to the part worth parsing
//! without making any decision about what the content means.

/// Remove surrounding markdown code fences (```json ... ```) and whitespace.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // Drop the language tag on the opening fence line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    body.trim().to_string()
}

/// Slice from the first `{` to the last `}`, if both exist in that order.
pub fn json_object_slice(text: &str) -> Option<&str> {
    delimited_slice(text, '{', '}')
}

/// Slice from the first `[` to the last `]`, if both exist in that order.
pub fn json_array_slice(text: &str) -> Option<&str> {
    delimited_slice(text, '[', ']')
}

fn delimited_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences_with_language_tag() {
        let text = "```json\n{\"event\": \"flood\"}\n```";
        assert_eq!(strip_code_fences(text), "{\"event\": \"flood\"}");
    }

    #[test]
    fn test_strip_code_fences_plain_text_untouched() {
        assert_eq!(strip_code_fences("  Occurred  "), "Occurred");
    }

    #[test]
    fn test_strip_code_fences_without_closing_fence() {
        assert_eq!(strip_code_fences("```\n[\"bbc.com\"]"), "[\"bbc.com\"]");
    }

    #[test]
    fn test_json_object_slice_skips_chatter() {
        let text = "Sure! Here you go: {\"result\": \"Unlikely\"} Hope that helps.";
        assert_eq!(json_object_slice(text), Some("{\"result\": \"Unlikely\"}"));
    }

    #[test]
    fn test_json_slices_require_order() {
        assert_eq!(json_object_slice("} nothing {"), None);
        assert_eq!(json_array_slice("no brackets"), None);
        assert_eq!(json_array_slice("list: [\"a.com\"]."), Some("[\"a.com\"]"));
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
