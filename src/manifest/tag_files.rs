use crate::core::path::ensure_dir;
use crate::core::{Bag, BagError, BagResult};
use crate::manifest::tagmanifest::TagManifestGenerator;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

type ContentWriter<'s> = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + 's>;

/// Where the content of a tag file comes from when it is added
pub enum TagFileSource<'s> {
    /// The file is already in the bag and is tracked as is
    Existing,
    /// Copy this file into the bag
    CopyFrom(&'s Path),
    /// Produce the content with a callback
    Writer(ContentWriter<'s>),
}

impl<'s> TagFileSource<'s> {
    pub fn writer<F>(write: F) -> Self
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()> + 's,
    {
        TagFileSource::Writer(Box::new(write))
    }
}

/// Adds, removes and deletes individual tag files, keeping the tag
/// manifests in step after every change.
pub struct TagFileManager<'a> {
    bag: &'a dyn Bag,
    tag_manifests: TagManifestGenerator<'a>,
}

impl<'a> TagFileManager<'a> {
    pub fn new(bag: &'a dyn Bag) -> Self {
        Self {
            bag,
            tag_manifests: TagManifestGenerator::new(bag),
        }
    }

    /// Track a tag file, creating it first from `source` when it is not on disk.
    ///
    /// Returns the tracked tag-file set including `path`.
    pub fn add_tag_file(&self, path: impl AsRef<Path>, source: TagFileSource<'_>) -> BagResult<Vec<PathBuf>> {
        let target = self.bag.resolve(path.as_ref());
        if self.tag_manifests.is_tag_manifest(&target)? {
            return Err(BagError::Path(format!(
                "{} is a tag manifest and cannot be tracked as a tag file",
                target.display()
            )));
        }

        let tracked = self.tracked()?;
        if tracked.contains(&target) {
            return Err(BagError::DuplicateTagFile(target));
        }

        let mut current = tracked;
        if !target.exists() {
            self.materialize(&target, source)?;

            // A new file may be one of the files every tag manifest folds in,
            // in which case the refresh below has recorded it already.
            current = self.tag_manifests.generate(current)?;
            if current.contains(&target) {
                return Ok(current);
            }
        } else if !matches!(source, TagFileSource::Existing) {
            return Err(BagError::TagFileConflict(target));
        } else if self.tag_manifests.is_folded_in(&target)? {
            // Recorded by every refresh already, so a refresh is all it takes
            return self.tag_manifests.generate(current);
        }

        self.tag_manifests.record(&target)?;
        tracing::info!(path = %target.display(), "added tag file");

        current.push(target);
        Ok(current)
    }

    /// Stop tracking a tag file. The file stays on disk.
    pub fn remove_tag_file(&self, path: impl AsRef<Path>) -> BagResult<Vec<PathBuf>> {
        let target = self.bag.resolve(path.as_ref());
        let mut tracked = self.tracked()?;
        if !tracked.contains(&target) {
            return Err(BagError::UnknownTagFile(target));
        }

        tracked.retain(|tag| tag != &target);
        let tracked = self.tag_manifests.generate(tracked)?;
        tracing::info!(path = %target.display(), "removed tag file");
        Ok(tracked)
    }

    /// Stop tracking a tag file if it is tracked, then delete it from disk.
    pub fn delete_tag_file(&self, path: impl AsRef<Path>) -> BagResult<Vec<PathBuf>> {
        let target = self.bag.resolve(path.as_ref());
        if !target.exists() {
            return Err(BagError::FileNotFound(target));
        }

        let tracked = self.tracked()?;
        let tracked = if tracked.contains(&target) {
            self.remove_tag_file(&target)?
        } else {
            tracked
        };

        fs::remove_file(&target)?;
        tracing::info!(path = %target.display(), "deleted tag file");
        Ok(tracked)
    }

    fn tracked(&self) -> BagResult<Vec<PathBuf>> {
        Ok(self
            .bag
            .tag_files()?
            .iter()
            .map(|tag| self.bag.resolve(tag))
            .collect())
    }

    fn materialize(&self, target: &Path, source: TagFileSource<'_>) -> BagResult<()> {
        if let Some(parent) = target.parent() {
            ensure_dir(parent)?;
        }

        match source {
            TagFileSource::Existing => Err(BagError::FileNotFound(target.to_path_buf())),
            TagFileSource::CopyFrom(src) => {
                fs::copy(src, target).map_err(|e| BagError::from_io(e, src))?;
                Ok(())
            }
            TagFileSource::Writer(write) => {
                let result = File::create(target).and_then(|mut file| {
                    write(&mut file)?;
                    file.flush()
                });
                if let Err(e) = result {
                    // Never leave a half-written tag file behind
                    let _ = fs::remove_file(target);
                    return Err(BagError::Io(e));
                }
                Ok(())
            }
        }
    }
}
