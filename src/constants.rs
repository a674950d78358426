/// Activity action recorded when a task is created
pub const ACTION_TASK_CREATED: &str = "task_created";

/// Activity action recorded when a task transitions into `in_progress`
pub const ACTION_TASK_STARTED: &str = "task_started";

/// Activity action recorded when a task transitions into `done`
pub const ACTION_TASK_COMPLETED: &str = "task_completed";

/// Activity action recorded for every other status transition
pub const ACTION_TASK_UPDATED: &str = "task_updated";

/// Activity action recorded when a plain comment is added to a task
pub const ACTION_COMMENT_ADDED: &str = "comment_added";

/// Activity action recorded when a comment carries file attachments
pub const ACTION_FILE_ATTACHED: &str = "file_attached";

/// Actor recorded on history and activity rows when no caller is supplied
/// and the task has no assignee
pub const SYSTEM_ACTOR: &str = "system";

/// Role label given to agents created implicitly through upsert
pub const DEFAULT_AGENT_ROLE: &str = "Agent";

/// Emoji given to agents created implicitly through upsert
pub const DEFAULT_AGENT_EMOJI: &str = "🤖";

/// Default number of rows returned by the recent-activity query
pub const DEFAULT_ACTIVITY_LIMIT: i64 = 20;

/// Default number of rows returned by the per-agent activity query
pub const AGENT_ACTIVITY_LIMIT: i64 = 50;

/// Default number of rows returned by the cost ledger queries
pub const DEFAULT_COST_LIMIT: i64 = 100;
