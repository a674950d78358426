use opsboard::db::Database;
use opsboard::storage::BlobStore;
use tempfile::TempDir;

/// Opens a fresh file-backed database in a temp directory. The
/// TempDir must be kept alive for the duration of the test.
pub fn test_db() -> (TempDir, Database) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let database = Database::new(db_path.to_str().expect("utf-8 path"));
    (dir, database)
}

/// Opens a fresh database plus a blob store rooted in the same temp
/// directory.
#[allow(dead_code)]
pub fn test_db_with_blobs() -> (TempDir, Database, BlobStore) {
    let (dir, database) = test_db();
    let blobs = BlobStore::new(dir.path().join("blobs")).expect("blob store");
    (dir, database, blobs)
}
