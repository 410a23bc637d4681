//! Exclusive lock around `menu.json` read-modify-write cycles.
//!
//! Mutating commands create `.protogen.lock` with `create_new` before loading
//! the menu and remove it on drop. A second invocation against the same project
//! fails fast instead of racing on the menu. A lock left behind by a killed
//! process names the pid that held it; delete the file to recover.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOCK_FILE: &str = ".protogen.lock";

#[derive(Error, Debug)]
pub enum LockError {
    #[error("project is locked by another run (pid {pid}); remove {path:?} if none is running")]
    HeldBy { pid: String, path: PathBuf },
    #[error("could not create lock file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Removes the lock file when dropped.
#[derive(Debug)]
pub struct ProjectLock {
    path: PathBuf,
}

impl ProjectLock {
    pub fn acquire(project_dir: &Path) -> Result<Self, LockError> {
        let path = project_dir.join(LOCK_FILE);
        match OpenOptions::new().create_new(true).write(true).open(&path) {
            Ok(mut file) => {
                // The pid is informational only.
                let _ = writeln!(file, "{}", std::process::id());
                tracing::debug!(path = %path.display(), "acquired project lock");
                Ok(Self { path })
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                let mut pid = String::new();
                let _ = OpenOptions::new()
                    .read(true)
                    .open(&path)
                    .and_then(|mut f| f.read_to_string(&mut pid));
                let pid = match pid.trim() {
                    "" => "unknown".to_string(),
                    p => p.to_string(),
                };
                Err(LockError::HeldBy { pid, path })
            }
            Err(source) => Err(LockError::Io { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
