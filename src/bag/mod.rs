//! The conventional on-disk bag layout.

pub use bagit_core::bag::Bag;

use crate::core::BagResult;
use crate::manifest::store::ManifestStore;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default name of the payload directory below the bag root
pub const DEFAULT_PAYLOAD_DIR: &str = "data";

/// A bag stored as a plain directory.
///
/// Payload files are every regular file below `<root>/data`. The tracked tag
/// files are whatever the first tag manifest on disk lists, so the set
/// survives between runs without any extra bookkeeping file.
#[derive(Debug, Clone)]
pub struct DirectoryBag {
    root: PathBuf,
    payload_dir: String,
}

impl DirectoryBag {
    /// A relative `root` is made absolute against the current directory, so
    /// every path the bag hands out is absolute.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            root: std::path::absolute(&root).unwrap_or(root),
            payload_dir: DEFAULT_PAYLOAD_DIR.to_string(),
        }
    }

    pub fn with_payload_dir(mut self, payload_dir: impl Into<String>) -> Self {
        self.payload_dir = payload_dir.into();
        self
    }

    pub fn payload_dir(&self) -> PathBuf {
        self.root.join(&self.payload_dir)
    }
}

impl Bag for DirectoryBag {
    fn bag_root(&self) -> &Path {
        &self.root
    }

    fn payload_files(&self) -> BagResult<Vec<PathBuf>> {
        let payload_dir = self.payload_dir();
        if !payload_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&payload_dir).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn tag_files(&self) -> BagResult<Vec<PathBuf>> {
        let store = ManifestStore::tag(&self.root);
        let Some(first) = store.list_files()?.into_iter().next() else {
            return Ok(Vec::new());
        };

        Ok(store
            .read_records(&first)?
            .iter()
            .map(|record| self.root.join(record.decoded_path()))
            .collect())
    }
}
