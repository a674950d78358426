mod activity_repository;
mod agent_repository;
mod comment_repository;
mod cost_repository;
mod models;
mod operator_repository;
mod task_repository;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

pub use activity_repository::*;
pub use agent_repository::*;
pub use comment_repository::*;
pub use cost_repository::*;
pub use models::*;
pub use operator_repository::*;
pub use task_repository::*;

/// Schema bootstrap executed on every pool creation. SQLite-only, so
/// the tables are created in place rather than through migration
/// tooling; every statement is idempotent.
const BOOTSTRAP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL,
    priority TEXT NOT NULL,
    created_by TEXT NOT NULL,
    assigned_to TEXT,
    project TEXT,
    tags TEXT,
    mentions TEXT,
    due_at TEXT,
    started_at TEXT,
    completed_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
CREATE INDEX IF NOT EXISTS idx_tasks_assigned_to ON tasks(assigned_to);

CREATE TABLE IF NOT EXISTS task_history (
    id TEXT PRIMARY KEY NOT NULL,
    task_id TEXT NOT NULL,
    changed_by TEXT NOT NULL,
    field_changed TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_task_history_task ON task_history(task_id);

CREATE TABLE IF NOT EXISTS activity_logs (
    id TEXT PRIMARY KEY NOT NULL,
    agent TEXT NOT NULL,
    action_type TEXT NOT NULL,
    task_id TEXT,
    details TEXT,
    session_id TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_activity_logs_agent ON activity_logs(agent);

CREATE TABLE IF NOT EXISTS agents (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE,
    status TEXT NOT NULL,
    health TEXT NOT NULL,
    current_task_id TEXT,
    last_heartbeat TEXT,
    tokens_today BIGINT NOT NULL DEFAULT 0,
    cost_today DOUBLE NOT NULL DEFAULT 0,
    config TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS task_comments (
    id TEXT PRIMARY KEY NOT NULL,
    task_id TEXT NOT NULL,
    author TEXT NOT NULL,
    content TEXT NOT NULL,
    content_type TEXT NOT NULL,
    attachments TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_task_comments_task ON task_comments(task_id);

CREATE TABLE IF NOT EXISTS costs (
    id TEXT PRIMARY KEY NOT NULL,
    agent TEXT NOT NULL,
    model TEXT NOT NULL,
    tokens_in BIGINT NOT NULL,
    tokens_out BIGINT NOT NULL,
    estimated_cost DOUBLE NOT NULL,
    task_id TEXT,
    session_id TEXT,
    turn_type TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_costs_agent ON costs(agent);

CREATE TABLE IF NOT EXISTS operator_status (
    id TEXT PRIMARY KEY NOT NULL,
    credits_free_remaining DOUBLE NOT NULL,
    credits_free_total DOUBLE NOT NULL,
    workspace_balance DOUBLE NOT NULL,
    loop_running BOOL NOT NULL,
    loop_current_task BIGINT,
    loop_total_tasks BIGINT,
    loop_project TEXT,
    last_updated TEXT NOT NULL
);
"#;

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens (or creates) the SQLite database at `db_path` and ensures
    /// the schema exists.
    pub fn new(db_path: &str) -> Self {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = Pool::builder()
            .build(manager)
            .expect("Failed to create pool.");

        let database = Database {
            pool: Arc::new(pool),
        };

        database
            .get_conn()
            .batch_execute(BOOTSTRAP_SQL)
            .expect("Failed to initialize database schema");

        database
    }

    pub fn get_conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().expect("Failed to get connection")
    }
}
