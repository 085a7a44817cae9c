//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tagnotes::GitRepository;

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// Open the repository the way the CLI does.
    pub fn open(&self) -> GitRepository {
        GitRepository::discover(self.dir.path()).expect("Failed to open test repo")
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        self.commit_file("test.txt", &content, message)
    }

    /// Write `content` to `path`, stage it and commit. Returns the commit OID.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> Oid {
        let sig = self.signature();
        self.commit_file_as(path, content, message, &sig)
    }

    /// Like [`TestRepo::commit_file`] with a fixed author/committer time.
    pub fn commit_file_at(
        &self,
        path: &str,
        content: &str,
        message: &str,
        seconds: i64,
        offset_minutes: i32,
    ) -> Oid {
        let sig = Signature::new(
            "Test User",
            "test@example.com",
            &Time::new(seconds, offset_minutes),
        )
        .expect("Failed to create signature");
        self.commit_file_as(path, content, message, &sig)
    }

    fn commit_file_as(&self, path: &str, content: &str, message: &str, sig: &Signature) -> Oid {
        std::fs::write(self.dir.path().join(path), content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        self.commit_index(index, message, sig)
    }

    /// Rename a tracked file (like `git mv`) and commit. Returns the commit OID.
    pub fn rename_file(&self, from: &str, to: &str, message: &str) -> Oid {
        std::fs::rename(self.dir.path().join(from), self.dir.path().join(to))
            .expect("Failed to rename test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(from)).expect("Failed to remove old path");
        index.add_path(Path::new(to)).expect("Failed to add new path");
        let sig = self.signature();
        self.commit_index(index, message, &sig)
    }

    /// Write a root commit object from raw bytes, bypassing UTF-8 checks.
    /// Returns the commit OID; HEAD is not moved.
    pub fn commit_raw(&self, author_name: &[u8], message: &[u8]) -> Oid {
        let tree = self
            .repo
            .treebuilder(None)
            .and_then(|builder| builder.write())
            .expect("Failed to write empty tree");

        let mut buf = format!("tree {}\nauthor ", tree).into_bytes();
        buf.extend_from_slice(author_name);
        buf.extend_from_slice(
            b" <test@example.com> 1792404000 +0000\n\
              committer Test User <test@example.com> 1792404000 +0000\n\n",
        );
        buf.extend_from_slice(message);

        self.repo
            .odb()
            .and_then(|odb| odb.write(git2::ObjectType::Commit, &buf))
            .expect("Failed to write raw commit")
    }

    fn commit_index(&self, mut index: git2::Index, message: &str, sig: &Signature) -> Oid {
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), sig, sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo.tag_lightweight(name, &obj, false).expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = self.signature();
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo.tag(name, &obj, &sig, message, false).expect("Failed to create annotated tag");
    }
}
