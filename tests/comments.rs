mod common;

use opsboard::core::TaskPriority;
use opsboard::db::Attachment;
use opsboard::db::{ActivityRepository, CommentRepository, TaskRepository};
use opsboard::errors::Error;

fn seed_task(database: &opsboard::db::Database) -> String {
    let mut conn = database.get_conn();
    TaskRepository::new(&mut conn)
        .create_task(
            "Review deploy logs".to_string(),
            None,
            TaskPriority::Normal,
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

fn attachment(store: &opsboard::storage::BlobStore, filename: &str) -> Attachment {
    let storage_ref = store.put(b"attachment bytes").expect("put blob");
    Attachment {
        storage_ref,
        filename: filename.to_string(),
        mime_type: "text/plain".to_string(),
        size: 16,
    }
}

#[test]
fn comment_on_unknown_task_is_not_found() {
    let (_dir, database) = common::test_db();
    let mut conn = database.get_conn();
    let mut repo = CommentRepository::new(&mut conn);

    let err = repo
        .add_comment(
            "missing-task",
            "dev".to_string(),
            "hello?".to_string(),
            "text".to_string(),
            vec![],
        )
        .unwrap_err();
    assert!(matches!(err, Error::TaskNotFound(_)));
}

#[test]
fn plain_comment_logs_comment_added() {
    let (_dir, database) = common::test_db();
    let task_id = seed_task(&database);
    let mut conn = database.get_conn();

    let comment = CommentRepository::new(&mut conn)
        .add_comment(
            &task_id,
            "dev".to_string(),
            "logs look clean".to_string(),
            "markdown".to_string(),
            vec![],
        )
        .expect("add comment");
    assert_eq!(comment.content_type, "markdown");

    let logs = ActivityRepository::new(&mut conn)
        .by_agent("dev", 10)
        .expect("activity");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, "comment_added");
    assert_eq!(logs[0].task_id.as_deref(), Some(task_id.as_str()));
}

#[test]
fn comment_with_attachments_logs_file_attached() {
    let (_dir, database, blobs) = common::test_db_with_blobs();
    let task_id = seed_task(&database);
    let mut conn = database.get_conn();

    CommentRepository::new(&mut conn)
        .add_comment(
            &task_id,
            "dev".to_string(),
            "full log dump attached".to_string(),
            "text".to_string(),
            vec![attachment(&blobs, "deploy.log")],
        )
        .expect("add comment");

    let logs = ActivityRepository::new(&mut conn)
        .by_agent("dev", 10)
        .expect("activity");
    assert_eq!(logs[0].action_type, "file_attached");
}

#[test]
fn removing_a_comment_deletes_every_blob_then_the_row() {
    let (_dir, database, blobs) = common::test_db_with_blobs();
    let task_id = seed_task(&database);
    let mut conn = database.get_conn();

    let attachments = vec![
        attachment(&blobs, "deploy.log"),
        attachment(&blobs, "trace.txt"),
        attachment(&blobs, "screenshot.png"),
    ];
    let refs: Vec<String> = attachments.iter().map(|a| a.storage_ref.clone()).collect();

    let comment = CommentRepository::new(&mut conn)
        .add_comment(
            &task_id,
            "dev".to_string(),
            "evidence".to_string(),
            "text".to_string(),
            attachments,
        )
        .expect("add comment");

    CommentRepository::new(&mut conn)
        .remove_comment(&blobs, &comment.id)
        .expect("remove comment");

    for storage_ref in &refs {
        assert!(!blobs.contains(storage_ref), "blob {} survived", storage_ref);
    }
    let remaining = CommentRepository::new(&mut conn)
        .get_comments(&task_id)
        .expect("comments");
    assert!(remaining.is_empty());
}

#[test]
fn blob_delete_failure_does_not_block_record_removal() {
    let (_dir, database, blobs) = common::test_db_with_blobs();
    let task_id = seed_task(&database);
    let mut conn = database.get_conn();

    let real = attachment(&blobs, "kept.log");
    let real_ref = real.storage_ref.clone();
    let phantom = Attachment {
        storage_ref: "already-gone".to_string(),
        filename: "ghost.log".to_string(),
        mime_type: "text/plain".to_string(),
        size: 0,
    };

    let comment = CommentRepository::new(&mut conn)
        .add_comment(
            &task_id,
            "dev".to_string(),
            "mixed attachments".to_string(),
            "text".to_string(),
            vec![phantom, real],
        )
        .expect("add comment");

    CommentRepository::new(&mut conn)
        .remove_comment(&blobs, &comment.id)
        .expect("remove comment");

    assert!(!blobs.contains(&real_ref));
    assert!(CommentRepository::new(&mut conn)
        .get_comments(&task_id)
        .expect("comments")
        .is_empty());
}

#[test]
fn removing_an_unknown_comment_is_not_found() {
    let (_dir, database, blobs) = common::test_db_with_blobs();
    let mut conn = database.get_conn();

    let err = CommentRepository::new(&mut conn)
        .remove_comment(&blobs, "missing-comment")
        .unwrap_err();
    assert!(matches!(err, Error::CommentNotFound(_)));
}

#[test]
fn comments_list_in_creation_order() {
    let (_dir, database) = common::test_db();
    let task_id = seed_task(&database);
    let mut conn = database.get_conn();
    let mut repo = CommentRepository::new(&mut conn);

    for body in ["first", "second", "third"] {
        repo.add_comment(
            &task_id,
            "dev".to_string(),
            body.to_string(),
            "text".to_string(),
            vec![],
        )
        .expect("add comment");
    }

    let comments = repo.get_comments(&task_id).expect("comments");
    let bodies: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
}
