// Claim Verifier - API Core
//
// Accepts a free-text claim, extracts the event it describes, gathers evidence
// from web search and a fact-check index, and asks a model for a verdict.
// Progress for every run is broadcast to connected WebSocket observers.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
