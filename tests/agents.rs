mod common;

use opsboard::core::{AgentConfig, AgentStatus, HealthStatus};
use opsboard::db::AgentRepository;
use opsboard::errors::Error;

#[test]
fn heartbeat_requires_an_existing_agent() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);

    let err = repo.heartbeat("dev", None, None).unwrap_err();
    assert!(matches!(err, Error::AgentNotFound(_)));
}

#[test]
fn upsert_creates_with_defaults_then_patches_in_place() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);

    let agent = repo.upsert_agent("dev", None, None, None).expect("create");
    assert_eq!(agent.status, "offline");
    assert_eq!(agent.health, "healthy");
    let config: AgentConfig = serde_json::from_str(&agent.config).expect("config json");
    assert_eq!(config, AgentConfig::default());

    // Patching status must not disturb the stored config.
    let custom = AgentConfig {
        role: "Backend".to_string(),
        emoji: "🔧".to_string(),
    };
    repo.upsert_agent("dev", None, Some(custom.clone()), None)
        .expect("set config");
    let agent = repo
        .upsert_agent("dev", Some(AgentStatus::Busy), None, None)
        .expect("patch status");

    assert_eq!(agent.status, "busy");
    let config: AgentConfig = serde_json::from_str(&agent.config).expect("config json");
    assert_eq!(config, custom);

    // Still one registered agent after three upserts.
    assert_eq!(repo.list_agents().expect("list").len(), 1);
}

#[test]
fn heartbeat_stamps_time_and_overwrites_current_task() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);

    repo.upsert_agent("dev", Some(AgentStatus::Offline), None, Some(HealthStatus::Error))
        .expect("create");

    let agent = repo
        .heartbeat("dev", None, Some("task-42".to_string()))
        .expect("heartbeat");
    assert!(agent.last_heartbeat.is_some());
    assert_eq!(agent.status, "online");
    assert_eq!(agent.health, "healthy");
    assert_eq!(agent.current_task_id.as_deref(), Some("task-42"));

    // A heartbeat without a task clears the previous one.
    let agent = repo
        .heartbeat("dev", Some(AgentStatus::Busy), None)
        .expect("heartbeat");
    assert_eq!(agent.status, "busy");
    assert!(agent.current_task_id.is_none());
}

#[test]
fn going_offline_marks_the_agent_degraded() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);

    repo.upsert_agent("dev", Some(AgentStatus::Online), None, None)
        .expect("create");

    let agent = repo
        .update_agent_status("dev", AgentStatus::Offline)
        .expect("offline");
    assert_eq!(agent.health, "degraded");

    let agent = repo
        .update_agent_status("dev", AgentStatus::Online)
        .expect("online");
    assert_eq!(agent.health, "healthy");

    let err = repo
        .update_agent_status("ghost", AgentStatus::Online)
        .unwrap_err();
    assert!(matches!(err, Error::AgentNotFound(_)));
}

#[test]
fn daily_counters_update_and_reset() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);

    repo.upsert_agent("dev", None, None, None).expect("dev");
    repo.upsert_agent("ops", None, None, None).expect("ops");

    let agent = repo.update_costs("dev", 12_500, 0.42).expect("costs");
    assert_eq!(agent.tokens_today, 12_500);
    assert!((agent.cost_today - 0.42).abs() < f64::EPSILON);

    let err = repo.update_costs("ghost", 1, 0.1).unwrap_err();
    assert!(matches!(err, Error::AgentNotFound(_)));

    let reset = repo.reset_daily_costs().expect("reset");
    assert_eq!(reset, 2);
    for agent in repo.list_agents().expect("list") {
        assert_eq!(agent.tokens_today, 0);
        assert_eq!(agent.cost_today, 0.0);
    }
}
