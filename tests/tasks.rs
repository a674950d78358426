mod common;

use opsboard::core::{TaskPriority, TaskStatus};
use opsboard::db::{ActivityRepository, TaskPatch, TaskRepository};
use opsboard::errors::Error;

fn create_task(repo: &mut TaskRepository, title: &str, priority: TaskPriority) -> String {
    repo.create_task(
        title.to_string(),
        None,
        priority,
        "operator".to_string(),
        None,
        None,
        None,
        None,
        None,
    )
    .expect("create task")
    .id
}

#[test]
fn create_task_starts_pending_and_logs_activity() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();

    let task = TaskRepository::new(&mut conn)
        .create_task(
            "Ship the report".to_string(),
            Some("weekly rollup".to_string()),
            TaskPriority::High,
            "nash".to_string(),
            Some("dev".to_string()),
            Some("rollups".to_string()),
            Some(vec!["reporting".to_string()]),
            None,
            None,
        )
        .expect("create task");

    assert_eq!(task.status, "pending");
    assert_eq!(task.priority, "high");
    assert!(task.started_at.is_none());
    assert!(task.completed_at.is_none());

    let logs = ActivityRepository::new(&mut conn).recent(10).expect("logs");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, "task_created");
    assert_eq!(logs[0].agent, "nash");
    assert_eq!(logs[0].task_id.as_deref(), Some(task.id.as_str()));
}

#[test]
fn status_transitions_stamp_timestamps_once() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let id = create_task(&mut repo, "Investigate flaky deploy", TaskPriority::High);

    let task = repo
        .update_status(&id, TaskStatus::InProgress, Some("dev"))
        .expect("start");
    let started_at = task.started_at.clone().expect("started_at stamped");
    assert!(task.completed_at.is_none());

    // Bouncing through blocked and back must not restamp started_at.
    repo.update_status(&id, TaskStatus::Blocked, Some("dev"))
        .expect("block");
    let task = repo
        .update_status(&id, TaskStatus::InProgress, Some("dev"))
        .expect("resume");
    assert_eq!(task.started_at.as_deref(), Some(started_at.as_str()));

    let task = repo
        .update_status(&id, TaskStatus::Done, Some("dev"))
        .expect("complete");
    let completed_at = task.completed_at.clone().expect("completed_at stamped");
    assert_eq!(task.started_at.as_deref(), Some(started_at.as_str()));

    // A second transition into done keeps the original stamp.
    repo.update_status(&id, TaskStatus::Review, Some("dev"))
        .expect("reopen");
    let task = repo
        .update_status(&id, TaskStatus::Done, Some("dev"))
        .expect("complete again");
    assert_eq!(task.completed_at.as_deref(), Some(completed_at.as_str()));
    assert_eq!(task.started_at.as_deref(), Some(started_at.as_str()));
}

#[test]
fn each_status_change_writes_one_history_and_one_activity_row() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();

    let id = {
        let mut repo = TaskRepository::new(&mut conn);
        create_task(&mut repo, "Queue drain", TaskPriority::Normal)
    };

    let history_before = TaskRepository::new(&mut conn)
        .get_task_history(&id)
        .expect("history")
        .len();
    let activity_before = ActivityRepository::new(&mut conn)
        .recent(100)
        .expect("activity")
        .len();

    TaskRepository::new(&mut conn)
        .update_status(&id, TaskStatus::InProgress, Some("dev"))
        .expect("start");
    TaskRepository::new(&mut conn)
        .update_status(&id, TaskStatus::Done, Some("dev"))
        .expect("complete");

    let history = TaskRepository::new(&mut conn)
        .get_task_history(&id)
        .expect("history");
    let activity = ActivityRepository::new(&mut conn)
        .recent(100)
        .expect("activity");

    assert_eq!(history.len() - history_before, 2);
    assert_eq!(activity.len() - activity_before, 2);

    assert!(history
        .iter()
        .all(|h| h.field_changed == "status" && h.changed_by == "dev"));
    assert_eq!(history[0].old_value.as_deref(), Some("pending"));
    assert_eq!(history[0].new_value.as_deref(), Some("in_progress"));
    assert_eq!(history[1].old_value.as_deref(), Some("in_progress"));
    assert_eq!(history[1].new_value.as_deref(), Some("done"));

    let actions: Vec<&str> = activity.iter().map(|a| a.action_type.as_str()).collect();
    assert!(actions.contains(&"task_started"));
    assert!(actions.contains(&"task_completed"));
}

#[test]
fn status_change_actor_defaults_to_assignee_then_system() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let unassigned = create_task(&mut repo, "Orphan task", TaskPriority::Low);
    repo.update_status(&unassigned, TaskStatus::Blocked, None)
        .expect("block");
    let history = repo.get_task_history(&unassigned).expect("history");
    assert_eq!(history[0].changed_by, "system");

    let assigned = repo
        .create_task(
            "Owned task".to_string(),
            None,
            TaskPriority::Normal,
            "operator".to_string(),
            Some("dev".to_string()),
            None,
            None,
            None,
            None,
        )
        .expect("create")
        .id;
    repo.update_status(&assigned, TaskStatus::InProgress, None)
        .expect("start");
    let history = repo.get_task_history(&assigned).expect("history");
    assert_eq!(history[0].changed_by, "dev");
}

#[test]
fn status_change_on_unknown_task_is_not_found() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let err = repo
        .update_status("missing-id", TaskStatus::Done, None)
        .unwrap_err();
    assert!(matches!(err, Error::TaskNotFound(_)));
}

#[test]
fn assignment_writes_history_but_no_activity() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();

    let id = {
        let mut repo = TaskRepository::new(&mut conn);
        create_task(&mut repo, "Handover", TaskPriority::Normal)
    };
    let activity_before = ActivityRepository::new(&mut conn)
        .recent(100)
        .expect("activity")
        .len();

    let task = TaskRepository::new(&mut conn)
        .assign(&id, Some("dev".to_string()), Some("operator"))
        .expect("assign");
    assert_eq!(task.assigned_to.as_deref(), Some("dev"));

    let task = TaskRepository::new(&mut conn)
        .assign(&id, None, Some("operator"))
        .expect("unassign");
    assert!(task.assigned_to.is_none());

    let history = TaskRepository::new(&mut conn)
        .get_task_history(&id)
        .expect("history");
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|h| h.field_changed == "assigned_to"));
    assert_eq!(history[1].old_value.as_deref(), Some("dev"));
    assert_eq!(history[1].new_value, None);

    let activity_after = ActivityRepository::new(&mut conn)
        .recent(100)
        .expect("activity")
        .len();
    assert_eq!(activity_after, activity_before);
}

#[test]
fn list_orders_by_priority_and_hides_cancelled() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let low = create_task(&mut repo, "Tidy docs", TaskPriority::Low);
    let urgent = create_task(&mut repo, "Pager is firing", TaskPriority::Urgent);
    let normal = create_task(&mut repo, "Refill queue", TaskPriority::Normal);
    let cancelled = create_task(&mut repo, "Old idea", TaskPriority::High);
    repo.update_status(&cancelled, TaskStatus::Cancelled, None)
        .expect("cancel");

    let listed = repo.list_tasks(false).expect("list");
    let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![urgent.as_str(), normal.as_str(), low.as_str()]);

    let all = repo.list_tasks(true).expect("list all");
    assert_eq!(all.len(), 4);
}

#[test]
fn partial_update_touches_only_supplied_fields() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let id = create_task(&mut repo, "Original title", TaskPriority::Normal);

    let task = repo
        .update_task(
            &id,
            TaskPatch {
                title: Some("Renamed".to_string()),
                priority: Some(TaskPriority::Urgent.to_string()),
                ..Default::default()
            },
        )
        .expect("patch");
    assert_eq!(task.title, "Renamed");
    assert_eq!(task.priority, "urgent");
    assert_eq!(task.status, "pending");

    // An empty patch is a no-op, not an error.
    let unchanged = repo.update_task(&id, TaskPatch::default()).expect("noop");
    assert_eq!(unchanged.title, "Renamed");

    let err = repo
        .update_task("missing-id", TaskPatch::default())
        .unwrap_err();
    assert!(matches!(err, Error::TaskNotFound(_)));
}
