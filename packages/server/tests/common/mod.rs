//! Shared fixtures for integration tests.
//!
//! `scripted_deps()` wires a MockAI and MockBrowser that together produce a
//! complete, successful verification of `CLAIM`.

#![allow(dead_code)]

use server_core::kernel::{MockAI, MockBrowser, TestDependencies};

pub const CLAIM: &str = "There was an earthquake in Tokyo yesterday";
pub const USER_EMAIL: &str = "Desk@Newsroom.example";

/// Distinctive fragments of each prompt, used as MockAI patterns
pub const EXTRACTION_PROMPT: &str = "Extract the event name";
pub const DOMAINS_PROMPT: &str = "reputable news or official domains";
pub const ADJUDICATION_PROMPT: &str = "Respond with one of these labels";

pub const NHK_LINK: &str = "https://www.nhk.or.jp/news/quake";
pub const REUTERS_LINK: &str = "https://www.reuters.com/world/japan-quake";
pub const SPAM_LINK: &str = "https://spam.example.net/quake";
pub const FACT_CHECK_LINK: &str = "https://factly.in/tokyo-quake-video";

pub const EXTRACTION_REPLY: &str =
    r#"```json
{"event": "earthquake", "location": "Tokyo", "time": "yesterday"}
```"#;
pub const DOMAINS_REPLY: &str = r#"["nhk.or.jp", "reuters.com"]"#;
pub const ADJUDICATION_REPLY: &str =
    r#"{"result": "Occurred", "reasoning": "NHK and Reuters both reported the quake."}"#;

pub fn scripted_ai() -> MockAI {
    MockAI::new()
        .with_response(EXTRACTION_PROMPT, EXTRACTION_REPLY)
        .with_response(DOMAINS_PROMPT, DOMAINS_REPLY)
        .with_response(ADJUDICATION_PROMPT, ADJUDICATION_REPLY)
}

pub fn scripted_browser() -> MockBrowser {
    MockBrowser::new()
        .with_search_links(&[NHK_LINK, SPAM_LINK, REUTERS_LINK, NHK_LINK])
        .with_snippet(NHK_LINK, "A magnitude 6.1 earthquake struck Tokyo on Monday.")
        .with_snippet(REUTERS_LINK, "Tokyo shaken by strong quake, no major damage")
        .with_fact_check(
            "Old video shared as Tokyo quake footage",
            "Factly",
            "Video shows yesterday's Tokyo earthquake",
            "Misleading",
            FACT_CHECK_LINK,
        )
}

pub fn scripted_deps() -> TestDependencies {
    TestDependencies::new()
        .mock_ai(scripted_ai())
        .mock_browser(scripted_browser())
}
