//! Where lsblk snapshots come from.
//!
//! The crate never runs lsblk itself. A [`SnapshotSource`] hands over one
//! complete JSON buffer, captured however the caller likes (a pipe, a saved
//! `lsblk -pabOJ > dump.json`, a test fixture).

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::decode::decode_device_tree;
use crate::error::DecodeError;
use crate::types::DeviceTree;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

pub trait SnapshotSource {
    /// Returns one complete snapshot. Called once per scan.
    fn read_snapshot(&mut self) -> Result<Vec<u8>, SourceError>;
}

/// Reads a snapshot from any reader, e.g. stdin.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> SnapshotSource for ReaderSource<R> {
    fn read_snapshot(&mut self) -> Result<Vec<u8>, SourceError> {
        let mut buffer = Vec::new();
        self.reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Reads a saved snapshot from disk. The file is re-read on every call.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn read_snapshot(&mut self) -> Result<Vec<u8>, SourceError> {
        fs::read(&self.path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                SourceError::NotFound(self.path.clone())
            } else {
                SourceError::Io(e)
            }
        })
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &mut S {
    fn read_snapshot(&mut self) -> Result<Vec<u8>, SourceError> {
        (**self).read_snapshot()
    }
}

/// Takes a fresh snapshot and decodes it into a new tree.
pub fn load_tree<S: SnapshotSource>(mut source: S) -> Result<DeviceTree, SourceError> {
    let bytes = source.read_snapshot()?;
    debug!(bytes = bytes.len(), "read lsblk snapshot");

    let tree = decode_device_tree(&bytes)?;
    if tree.is_empty() {
        warn!("lsblk snapshot lists no block devices");
    } else {
        debug!(
            roots = tree.len(),
            records = tree.walk().count(),
            "decoded device tree"
        );
    }
    Ok(tree)
}
