//! Payload and tag manifests of a bag, and fixity checks against them.

pub mod codec;
pub mod digest;
pub mod fixity;
pub mod generator;
pub mod store;
pub mod tag_files;
pub mod tagmanifest;

pub use digest::Algorithm;
pub use fixity::{FailureReason, FixityChecker, FixityFailure, FixityReport};
pub use generator::{AlgorithmSelector, ManifestGenerator};
pub use store::{ManifestKind, ManifestRecord, ManifestStore};
pub use tag_files::{TagFileManager, TagFileSource};
pub use tagmanifest::TagManifestGenerator;

use crate::config::Config;
use crate::core::{Bag, BagResult};
use std::path::{Path, PathBuf};

/// Every manifest operation for one bag behind a single handle.
///
/// Callers must not run two mutating operations against the same bag root at
/// once: regeneration deletes the manifests before rewriting them.
pub struct Manifests<'a> {
    bag: &'a dyn Bag,
    sha512_writes_sha512: bool,
}

impl<'a> Manifests<'a> {
    pub fn new(bag: &'a dyn Bag) -> Self {
        Self {
            bag,
            sha512_writes_sha512: false,
        }
    }

    pub fn with_config(bag: &'a dyn Bag, config: &Config) -> Self {
        Self {
            bag,
            sha512_writes_sha512: config.sha512_writes_sha512,
        }
    }

    /// `manifest!`
    pub fn manifest(&self, selector: AlgorithmSelector) -> BagResult<()> {
        ManifestGenerator::new(self.bag)
            .sha512_writes_sha512(self.sha512_writes_sha512)
            .generate(selector)
    }

    /// `tagmanifest!` over the bag's tracked tag files
    pub fn tagmanifest(&self) -> BagResult<Vec<PathBuf>> {
        TagManifestGenerator::new(self.bag).generate_current()
    }

    /// `tagmanifest!` over an explicit tag-file list
    pub fn tagmanifest_with(&self, tags: Vec<PathBuf>) -> BagResult<Vec<PathBuf>> {
        TagManifestGenerator::new(self.bag).generate(tags)
    }

    pub fn add_tag_file(&self, path: impl AsRef<Path>, source: TagFileSource<'_>) -> BagResult<Vec<PathBuf>> {
        TagFileManager::new(self.bag).add_tag_file(path, source)
    }

    pub fn remove_tag_file(&self, path: impl AsRef<Path>) -> BagResult<Vec<PathBuf>> {
        TagFileManager::new(self.bag).remove_tag_file(path)
    }

    pub fn delete_tag_file(&self, path: impl AsRef<Path>) -> BagResult<Vec<PathBuf>> {
        TagFileManager::new(self.bag).delete_tag_file(path)
    }

    /// `fixed?`
    pub fn is_fixed(&self) -> bool {
        FixityChecker::new(self.bag).is_fixed()
    }

    pub fn check(&self) -> BagResult<FixityReport> {
        FixityChecker::new(self.bag).check()
    }

    pub fn manifest_files(&self) -> BagResult<Vec<PathBuf>> {
        ManifestStore::payload(self.bag.bag_root()).list_files()
    }

    pub fn tagmanifest_files(&self) -> BagResult<Vec<PathBuf>> {
        ManifestStore::tag(self.bag.bag_root()).list_files()
    }
}
