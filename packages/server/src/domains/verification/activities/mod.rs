pub mod adjudicate;
pub mod build_query;
pub mod extract_event;
pub mod fact_check;
pub mod gather_evidence;
pub mod trusted_domains;
pub mod verify_claim;
pub mod web_search;

pub use adjudicate::adjudicate_claim;
pub use build_query::{build_search_query, compose_search_query, SearchQuery};
pub use extract_event::extract_event;
pub use fact_check::{search_fact_checks, strip_site_clauses};
pub use gather_evidence::gather_evidence;
pub use trusted_domains::resolve_trusted_domains;
pub use verify_claim::{verify_claim, VerificationOutcome};
pub use web_search::{search_web, select_links};
