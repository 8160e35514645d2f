//! Last-IP state store
//!
//! Persists the last successfully published IP as a single-line flat file.
//! This is the only durable state the updater owns. Reads fail open: an
//! unreadable file is treated as "unknown", which forces an update attempt.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::warn;

//==============================================================================
// StateStore
//==============================================================================

/// File-backed store for the last published IP.
///
/// The file is overwritten wholesale on each save and removed on `clear`.
/// No locking or atomic rename: the external scheduler is assumed not to
/// overlap runs.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the last published IP.
    ///
    /// A missing file is not an error and yields `None`. Any other read
    /// failure is logged as a warning and also yields `None`.
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let ip = content.trim();
                if ip.is_empty() {
                    None
                } else {
                    Some(ip.to_string())
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(
                    "Could not read last IP file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Overwrites the file with exactly `ip`.
    pub fn save(&self, ip: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create state directory {}", parent.display())
                })?;
            }
        }
        std::fs::write(&self.path, ip)
            .with_context(|| format!("Failed to write last IP file {}", self.path.display()))
    }

    /// Removes the file. A missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to remove last IP file {}", self.path.display())
            }),
        }
    }
}

//==============================================================================
// Tests
//==============================================================================
