//! The capability set a bag must expose to have its manifests maintained.
//!
//! Manifest generation and fixity checks never reach into a bag's own
//! bookkeeping. They only read the lists below, so any layout (an on-disk
//! directory bag, a bag being assembled in memory, a test fixture) can be
//! plugged in.

use crate::core::path::resolve_in;
use crate::core::BagResult;
use std::path::{Path, PathBuf};

/// A directory-based archival package.
pub trait Bag {
    /// Root directory of the bag. Every manifest lives directly below it.
    /// Expected to be absolute.
    fn bag_root(&self) -> &Path;

    /// Payload files in enumeration order, absolute or relative to the root.
    /// Order is preserved in the written manifests.
    fn payload_files(&self) -> BagResult<Vec<PathBuf>>;

    /// Tag files currently under management, absolute or relative to the root.
    fn tag_files(&self) -> BagResult<Vec<PathBuf>>;

    fn bag_info_path(&self) -> PathBuf {
        self.bag_root().join("bag-info.txt")
    }

    fn bagit_declaration_path(&self) -> PathBuf {
        self.bag_root().join("bagit.txt")
    }

    /// Absolute form of a path given relative to the bag root.
    fn resolve(&self, path: &Path) -> PathBuf {
        resolve_in(self.bag_root(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBag {
        root: PathBuf,
    }

    impl Bag for FixedBag {
        fn bag_root(&self) -> &Path {
            &self.root
        }

        fn payload_files(&self) -> BagResult<Vec<PathBuf>> {
            Ok(vec![self.root.join("data/a.txt")])
        }

        fn tag_files(&self) -> BagResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_declaration_paths() {
        let bag = FixedBag { root: PathBuf::from("/bags/one") };
        assert_eq!(bag.bag_info_path(), PathBuf::from("/bags/one/bag-info.txt"));
        assert_eq!(bag.bagit_declaration_path(), PathBuf::from("/bags/one/bagit.txt"));
        assert_eq!(bag.resolve(Path::new("notes.txt")), PathBuf::from("/bags/one/notes.txt"));
    }
}
