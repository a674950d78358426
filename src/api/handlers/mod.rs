mod activity;
mod agents;
mod comments;
mod costs;
mod operator;
mod tasks;

pub use activity::*;
pub use agents::*;
pub use comments::*;
pub use costs::*;
pub use operator::*;
pub use tasks::*;

/// Parses a JSON-array Text column into a string list; a missing or
/// malformed column reads as empty.
pub(crate) fn parse_string_list(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .and_then(|r| serde_json::from_str(r).ok())
        .unwrap_or_default()
}

/// Parses a JSON Text column into a detail payload
pub(crate) fn parse_details(raw: &Option<String>) -> Option<serde_json::Value> {
    raw.as_deref().and_then(|r| serde_json::from_str(r).ok())
}
