use crate::constants::{ACTION_TASK_COMPLETED, ACTION_TASK_STARTED, ACTION_TASK_UPDATED};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the current status of a task in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Waiting in the queue, not picked up by anyone
    Pending,
    /// Actively being worked on
    InProgress,
    /// Cannot proceed until something external unblocks it
    Blocked,
    /// Work finished, awaiting review
    Review,
    /// Completed
    Done,
    /// Abandoned; excluded from the default queue listing
    Cancelled,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for TaskStatus {
    fn to_string(&self) -> String {
        match self {
            TaskStatus::Pending => "pending".to_string(),
            TaskStatus::InProgress => "in_progress".to_string(),
            TaskStatus::Blocked => "blocked".to_string(),
            TaskStatus::Review => "review".to_string(),
            TaskStatus::Done => "done".to_string(),
            TaskStatus::Cancelled => "cancelled".to_string(),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl TaskStatus {
    /// Returns the activity-log action recorded for a transition into
    /// this status
    pub fn activity_action(&self) -> &'static str {
        match self {
            TaskStatus::Done => ACTION_TASK_COMPLETED,
            TaskStatus::InProgress => ACTION_TASK_STARTED,
            _ => ACTION_TASK_UPDATED,
        }
    }
}

/// Represents the scheduling priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
    Urgent,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for TaskPriority {
    fn to_string(&self) -> String {
        match self {
            TaskPriority::Low => "low".to_string(),
            TaskPriority::Normal => "normal".to_string(),
            TaskPriority::High => "high".to_string(),
            TaskPriority::Urgent => "urgent".to_string(),
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "normal" => Ok(TaskPriority::Normal),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(()),
        }
    }
}

impl TaskPriority {
    /// Sort rank for queue ordering: urgent first, low last
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Urgent => 0,
            TaskPriority::High => 1,
            TaskPriority::Normal => 2,
            TaskPriority::Low => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Blocked,
            TaskStatus::Review,
            TaskStatus::Done,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(status.to_string().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn activity_actions_follow_target_status() {
        assert_eq!(TaskStatus::Done.activity_action(), "task_completed");
        assert_eq!(TaskStatus::InProgress.activity_action(), "task_started");
        assert_eq!(TaskStatus::Blocked.activity_action(), "task_updated");
        assert_eq!(TaskStatus::Cancelled.activity_action(), "task_updated");
    }

    #[test]
    fn priority_rank_orders_urgent_first() {
        assert!(TaskPriority::Urgent.rank() < TaskPriority::High.rank());
        assert!(TaskPriority::High.rank() < TaskPriority::Normal.rank());
        assert!(TaskPriority::Normal.rank() < TaskPriority::Low.rank());
    }
}
