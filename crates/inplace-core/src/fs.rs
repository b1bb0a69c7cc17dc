//! Filesystem access used by the generator, with an in-memory double for tests

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Owner, group and other execute bits
pub const EXECUTE_BITS: u32 = 0o111;

pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write `contents` as the whole file, replacing anything already there
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Permission bits of `path`
    fn mode(&self, path: &Path) -> io::Result<u32>;

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    fn current_dir(&self) -> io::Result<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    #[cfg(unix)]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        use std::os::unix::fs::PermissionsExt;
        Ok(std::fs::metadata(path)?.permissions().mode())
    }

    #[cfg(not(unix))]
    fn mode(&self, path: &Path) -> io::Result<u32> {
        std::fs::metadata(path).map(|_| 0o644)
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, path: &Path, _mode: u32) -> io::Result<()> {
        // Executability is not a permission bit here
        std::fs::metadata(path).map(|_| ())
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

#[derive(Debug, Clone)]
struct MockFile {
    contents: String,
    mode: u32,
}

/// In-memory filesystem for unit tests.
///
/// Writes require the parent directory to exist, like the real thing. Paths
/// are compared as given, so tests should stick to one spelling per file.
#[derive(Debug)]
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, MockFile>>,
    dirs: Mutex<HashSet<PathBuf>>,
    read_only: Mutex<Vec<PathBuf>>,
    cwd: PathBuf,
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystem {
    /// Empty filesystem whose working directory is `/work`
    pub fn new() -> Self {
        Self::with_current_dir("/work")
    }

    pub fn with_current_dir(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let fs = MockFileSystem {
            files: Mutex::new(HashMap::new()),
            dirs: Mutex::new(HashSet::new()),
            read_only: Mutex::new(Vec::new()),
            cwd: cwd.clone(),
        };
        fs.insert_dirs(&cwd);
        fs
    }

    /// Seed a file with mode `0o644`, creating its parent directories
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.files.lock().unwrap().insert(
            path,
            MockFile {
                contents: contents.into(),
                mode: 0o644,
            },
        );
    }

    /// Deny creating or writing anything under `path`
    pub fn make_read_only(&self, path: impl Into<PathBuf>) {
        self.read_only.lock().unwrap().push(path.into());
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|f| f.contents.clone())
    }

    pub fn file_mode(&self, path: &Path) -> Option<u32> {
        self.files.lock().unwrap().get(path).map(|f| f.mode)
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn insert_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        let read_only = self.read_only.lock().unwrap();
        if read_only.iter().any(|dir| path.starts_with(dir)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path.display()),
            ));
        }
        Ok(())
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file: {}", path.display()),
        )
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.contents(path).ok_or_else(|| Self::not_found(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.check_writable(path)?;
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.is_dir(parent) => {
                return Err(Self::not_found(parent));
            }
            _ => {}
        }

        let mut files = self.files.lock().unwrap();
        let mode = files.get(path).map(|f| f.mode).unwrap_or(0o644);
        files.insert(
            path.to_path_buf(),
            MockFile {
                contents: contents.to_string(),
                mode,
            },
        );
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.is_dir(path) {
            return Ok(());
        }
        self.check_writable(path)?;
        self.insert_dirs(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn mode(&self, path: &Path) -> io::Result<u32> {
        self.file_mode(path).ok_or_else(|| Self::not_found(path))
    }

    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()> {
        self.check_writable(path)?;
        let mut files = self.files.lock().unwrap();
        match files.get_mut(path) {
            Some(file) => {
                file.mode = mode;
                Ok(())
            }
            None => Err(Self::not_found(path)),
        }
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}
