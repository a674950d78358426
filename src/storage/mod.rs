use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Flat on-disk store for comment attachment blobs, keyed by storage
/// reference. References are opaque uuids handed out by `put`; callers
/// keep them in the comment's attachment metadata.
#[derive(Clone, Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Opens the store rooted at `root`, creating the directory if
    /// needed.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(BlobStore { root })
    }

    /// Writes a blob and returns its storage reference
    pub fn put(&self, bytes: &[u8]) -> io::Result<String> {
        let storage_ref = Uuid::new_v4().to_string();
        fs::write(self.path(&storage_ref), bytes)?;
        Ok(storage_ref)
    }

    /// Deletes the blob behind `storage_ref`. Deleting a reference
    /// that no longer exists is an error, surfaced to the caller.
    pub fn delete(&self, storage_ref: &str) -> io::Result<()> {
        fs::remove_file(self.path(storage_ref))
    }

    /// True when a blob exists for `storage_ref`
    pub fn contains(&self, storage_ref: &str) -> bool {
        self.path(storage_ref).is_file()
    }

    fn path(&self, storage_ref: &str) -> PathBuf {
        // References are generated uuids; strip any path components a
        // caller-supplied ref might smuggle in.
        let name = Path::new(storage_ref)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        self.root.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn put_then_delete_removes_the_blob() {
        let dir = TempDir::new().expect("tempdir");
        let store = BlobStore::new(dir.path()).expect("store");

        let storage_ref = store.put(b"report contents").expect("put");
        assert!(store.contains(&storage_ref));

        store.delete(&storage_ref).expect("delete");
        assert!(!store.contains(&storage_ref));
    }

    #[test]
    fn delete_of_unknown_ref_errors() {
        let dir = TempDir::new().expect("tempdir");
        let store = BlobStore::new(dir.path()).expect("store");
        assert!(store.delete("no-such-ref").is_err());
    }

    #[test]
    fn refs_cannot_escape_the_root() {
        let dir = TempDir::new().expect("tempdir");
        let store = BlobStore::new(dir.path().join("blobs")).expect("store");
        assert!(!store.contains("../outside"));
    }
}
