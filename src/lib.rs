//! Mission-control coordination backend for agent teams.
//!
//! The crate exposes a JSON API over an embedded SQLite store covering
//! the shared task queue, per-task comments with attachments, the
//! activity feed and task audit trail, agent presence, the cost
//! ledger, and the operator-status snapshot.

pub mod api;
pub mod cli;
pub mod constants;
pub mod core;
pub mod db;
pub mod errors;
pub mod schema;
pub mod storage;
pub mod utils;
