//! A temporary directory laid out like a build output tree

use crate::fixtures;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary tree holding the two templates and a link tree.
///
/// The directory is deleted when the workspace is dropped.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Workspace with `templates/run_inplace.py.in`,
    /// `templates/run_inplace_lite.py.in` and an empty `a/b/link-tree`
    pub fn new() -> Self {
        let workspace = Self::empty();
        workspace.write("templates/run_inplace.py.in", fixtures::full_template());
        workspace.write(
            "templates/run_inplace_lite.py.in",
            fixtures::lite_template(),
        );
        workspace.mkdir("a/b/link-tree");
        workspace
    }

    pub fn empty() -> Self {
        TestWorkspace {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn template(&self) -> PathBuf {
        self.path("templates/run_inplace.py.in")
    }

    pub fn template_lite(&self) -> PathBuf {
        self.path("templates/run_inplace_lite.py.in")
    }

    pub fn modules_dir(&self) -> PathBuf {
        self.path("a/b/link-tree")
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, relative: impl AsRef<Path>) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission bits of a file on disk
#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o7777
}
