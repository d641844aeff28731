//! Tag manifest regeneration.
//!
//! Tag manifests have to list the payload manifests, and writing a payload
//! manifest is what calls for a tag manifest refresh in the first place. The
//! loop is broken by collecting the complete candidate list up front and
//! digesting each candidate exactly once: payload manifests are read straight
//! from disk here, `manifest!` is never re-entered.

use crate::core::{Bag, BagResult};
use crate::manifest::codec;
use crate::manifest::digest::digest_file_all;
use crate::manifest::store::{ManifestKind, ManifestStore};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub struct TagManifestGenerator<'a> {
    bag: &'a dyn Bag,
    tag_manifests: ManifestStore,
    payload_manifests: ManifestStore,
}

impl<'a> TagManifestGenerator<'a> {
    pub fn new(bag: &'a dyn Bag) -> Self {
        Self {
            bag,
            tag_manifests: ManifestStore::tag(bag.bag_root()),
            payload_manifests: ManifestStore::payload(bag.bag_root()),
        }
    }

    /// Regenerate from the tag files the bag currently tracks
    pub fn generate_current(&self) -> BagResult<Vec<PathBuf>> {
        let tags = self.bag.tag_files()?;
        self.generate(tags)
    }

    /// Delete all tag manifests and rewrite them for `tags` plus every payload
    /// manifest and both bag declaration files.
    ///
    /// Every candidate is digested before the old tag manifests are removed,
    /// so a failure leaves them (and the tracked set read from them) intact.
    ///
    /// Returns the new tracked tag-file set.
    pub fn generate(&self, tags: Vec<PathBuf>) -> BagResult<Vec<PathBuf>> {
        let working_set = self.working_set(tags)?;
        let records = working_set
            .iter()
            .map(|file| self.digest(file))
            .collect::<BagResult<Vec<_>>>()?;

        self.tag_manifests.clear()?;
        for (record_path, digests) in &records {
            self.write(record_path, digests)?;
        }

        tracing::info!(
            bag = %self.bag.bag_root().display(),
            files = working_set.len(),
            "wrote tag manifests"
        );
        Ok(working_set)
    }

    /// Append SHA-1 and MD5 records for one existing tag file.
    pub fn record(&self, file: &Path) -> BagResult<()> {
        let (record_path, digests) = self.digest(file)?;
        self.write(&record_path, &digests)
    }

    /// Whether `file` ends up in every tag manifest regardless of the tracked
    /// set: a payload manifest on disk or one of the two declaration files.
    pub fn is_folded_in(&self, file: &Path) -> BagResult<bool> {
        let file = self.bag.resolve(file);
        if file == self.bag.bag_info_path() || file == self.bag.bagit_declaration_path() {
            return Ok(true);
        }
        Ok(self.payload_manifests.list_files()?.contains(&file))
    }

    /// Whether `file` is one of the tag manifests this generator writes
    pub fn is_tag_manifest(&self, file: &Path) -> BagResult<bool> {
        let file = self.bag.resolve(file);
        Ok(self.is_directly_in_root(&file) && self.tag_manifests.algorithm_token(&file)?.is_some())
    }

    fn digest(&self, file: &Path) -> BagResult<(String, Vec<String>)> {
        let file = self.bag.resolve(file);
        let record_path = codec::record_path(self.bag.bag_root(), &file)?;
        let digests = digest_file_all(ManifestKind::Tag.algorithms(), &file)?;
        Ok((record_path, digests))
    }

    fn write(&self, record_path: &str, digests: &[String]) -> BagResult<()> {
        for (algorithm, digest) in ManifestKind::Tag.algorithms().iter().zip(digests) {
            self.tag_manifests.append(*algorithm, record_path, digest)?;
        }
        Ok(())
    }

    /// `tags` in order, then any payload manifest not yet listed, then
    /// bag-info and the bagit declaration. Compared by exact path.
    fn working_set(&self, tags: Vec<PathBuf>) -> BagResult<Vec<PathBuf>> {
        let manifests = self.payload_manifests.list_files()?;
        let mut seen = HashSet::new();
        let mut working_set = Vec::new();

        for tag in tags {
            let tag = self.bag.resolve(&tag);
            if self.is_tag_manifest(&tag)? || self.is_stale_manifest(&tag, &manifests)? {
                tracing::debug!(path = %tag.display(), "dropping tag file candidate");
                continue;
            }
            if seen.insert(tag.clone()) {
                working_set.push(tag);
            }
        }

        let declarations = [self.bag.bag_info_path(), self.bag.bagit_declaration_path()];
        for file in manifests.into_iter().chain(declarations) {
            if seen.insert(file.clone()) {
                working_set.push(file);
            }
        }

        Ok(working_set)
    }

    fn is_directly_in_root(&self, file: &Path) -> bool {
        file.parent() == Some(self.bag.bag_root())
    }

    /// A payload manifest that `manifest!` has since removed
    fn is_stale_manifest(&self, file: &Path, current: &[PathBuf]) -> BagResult<bool> {
        Ok(self.is_directly_in_root(file)
            && self.payload_manifests.algorithm_token(file)?.is_some()
            && !current.iter().any(|m| m == file))
    }
}
