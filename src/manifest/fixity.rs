use crate::core::{Bag, BagError, BagResult};
use crate::manifest::digest::{digest_file, Algorithm};
use crate::manifest::store::ManifestStore;
use std::fmt;
use std::path::PathBuf;

/// Re-verifies every recorded digest against live file content
pub struct FixityChecker<'a> {
    bag: &'a dyn Bag,
    stores: [ManifestStore; 2],
}

impl<'a> FixityChecker<'a> {
    pub fn new(bag: &'a dyn Bag) -> Self {
        Self {
            bag,
            stores: [
                ManifestStore::payload(bag.bag_root()),
                ManifestStore::tag(bag.bag_root()),
            ],
        }
    }

    /// True when every record of every manifest and tag manifest matches.
    ///
    /// Never fails: missing or unreadable files count as not fixed, and
    /// manifests for unknown algorithms pass.
    pub fn is_fixed(&self) -> bool {
        match self.check() {
            Ok(report) => report.is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "fixity check could not list manifests");
                false
            }
        }
    }

    /// Verify everything and report each record's outcome
    pub fn check(&self) -> BagResult<FixityReport> {
        let mut report = FixityReport::new();

        for store in &self.stores {
            for manifest in store.list_files()? {
                let algorithm = store
                    .algorithm_token(&manifest)?
                    .and_then(|token| Algorithm::from_token(&token));
                match algorithm {
                    Some(algorithm) => self.check_manifest(store, manifest, algorithm, &mut report),
                    None => {
                        tracing::debug!(manifest = %manifest.display(), "skipping manifest with unknown algorithm");
                        report.skipped.push(manifest);
                    }
                }
            }
        }

        Ok(report)
    }

    fn check_manifest(
        &self,
        store: &ManifestStore,
        manifest: PathBuf,
        algorithm: Algorithm,
        report: &mut FixityReport,
    ) {
        let records = match store.read_records(&manifest) {
            Ok(records) => records,
            Err(e) => {
                let reason = match e {
                    BagError::MalformedManifest { line, .. } => FailureReason::Malformed(line),
                    other => FailureReason::Unreadable(other.to_string()),
                };
                report.add_failure(manifest, String::new(), reason);
                return;
            }
        };

        for record in records {
            let path = record.decoded_path();
            let file = self.bag.bag_root().join(&path);

            match digest_file(algorithm, &file) {
                Ok(actual) if actual == record.digest => report.add_success(manifest.clone(), path),
                Ok(actual) => report.add_failure(
                    manifest.clone(),
                    path,
                    FailureReason::Mismatch {
                        expected: record.digest,
                        actual,
                    },
                ),
                Err(BagError::FileNotFound(_)) => {
                    report.add_failure(manifest.clone(), path, FailureReason::Missing)
                }
                Err(e) => report.add_failure(manifest.clone(), path, FailureReason::Unreadable(e.to_string())),
            }
        }
    }
}

/// Why a record failed verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Mismatch { expected: String, actual: String },
    Missing,
    Unreadable(String),
    /// Line number of the first malformed line
    Malformed(usize),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Mismatch { expected, actual } => {
                write!(f, "checksum mismatch (expected {}, actual {})", expected, actual)
            }
            FailureReason::Missing => f.write_str("file is missing"),
            FailureReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            FailureReason::Malformed(line) => write!(f, "malformed manifest line {}", line),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FixityFailure {
    pub manifest: PathBuf,
    /// Decoded path of the record, empty when the manifest itself failed
    pub path: String,
    pub reason: FailureReason,
}

/// Result of a fixity check
#[derive(Debug, Clone)]
pub struct FixityReport {
    pub verified: Vec<(PathBuf, String)>,
    pub failed: Vec<FixityFailure>,
    /// Manifests whose algorithm is not recognised
    pub skipped: Vec<PathBuf>,
}

impl FixityReport {
    pub fn new() -> Self {
        Self {
            verified: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn add_success(&mut self, manifest: PathBuf, path: String) {
        self.verified.push((manifest, path));
    }

    pub fn add_failure(&mut self, manifest: PathBuf, path: String, reason: FailureReason) {
        tracing::warn!(manifest = %manifest.display(), path = %path, %reason, "fixity failure");
        self.failed.push(FixityFailure {
            manifest,
            path,
            reason,
        });
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_checked(&self) -> usize {
        self.verified.len() + self.failed.len()
    }
}

impl Default for FixityReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::DirectoryBag;
    use crate::manifest::generator::{AlgorithmSelector, ManifestGenerator};
    use std::fs;
    use tempfile::TempDir;

    fn manifested_bag(temp: &TempDir) -> DirectoryBag {
        let root = temp.path();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data").join("a.txt"), b"hello world").unwrap();
        fs::write(root.join("data").join("b.bin"), [0u8, 1, 2, 3]).unwrap();
        fs::write(root.join("bagit.txt"), b"BagIt-Version: 0.97\n").unwrap();
        fs::write(root.join("bag-info.txt"), b"Bagging-Date: 2026-10-16\n").unwrap();
        let bag = DirectoryBag::new(root);
        ManifestGenerator::new(&bag).generate(AlgorithmSelector::Default).unwrap();
        bag
    }

    #[test]
    fn test_untouched_bag_is_fixed() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        let checker = FixityChecker::new(&bag);

        let report = checker.check().unwrap();
        assert!(report.is_success());
        // 2 payload files x 2 algorithms + 4 tag files x 2 algorithms
        assert_eq!(report.total_checked(), 12);
        assert!(checker.is_fixed());
    }

    #[test]
    fn test_changed_payload_is_not_fixed() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        fs::write(temp.path().join("data").join("a.txt"), b"hello worle").unwrap();

        let report = FixityChecker::new(&bag).check().unwrap();
        assert!(!report.is_success());
        assert_eq!(report.failed.len(), 2);
        assert!(report
            .failed
            .iter()
            .all(|f| f.path == "data/a.txt" && matches!(f.reason, FailureReason::Mismatch { .. })));
    }

    #[test]
    fn test_missing_payload_is_not_fixed() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        fs::remove_file(temp.path().join("data").join("b.bin")).unwrap();

        let checker = FixityChecker::new(&bag);
        assert!(!checker.is_fixed());
        let report = checker.check().unwrap();
        assert!(report.failed.iter().all(|f| f.reason == FailureReason::Missing));
    }

    #[test]
    fn test_digest_comparison_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        let manifest = temp.path().join("manifest-md5.txt");
        let shouted: String = fs::read_to_string(&manifest)
            .unwrap()
            .lines()
            .map(|line| {
                let (digest, path) = line.split_once(' ').unwrap();
                format!("{} {}\n", digest.to_uppercase(), path)
            })
            .collect();
        fs::write(&manifest, shouted).unwrap();

        let report = FixityChecker::new(&bag).check().unwrap();
        assert!(report.failed.iter().any(|f| f.manifest == manifest
            && f.path == "data/a.txt"
            && matches!(f.reason, FailureReason::Mismatch { .. })));
    }

    #[test]
    fn test_unknown_algorithm_passes() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        fs::write(temp.path().join("manifest-crc32.txt"), "deadbeef data/a.txt\n").unwrap();

        let report = FixityChecker::new(&bag).check().unwrap();
        assert!(report.is_success());
        assert_eq!(report.skipped, vec![temp.path().join("manifest-crc32.txt")]);
    }

    #[test]
    fn test_algorithm_token_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        fs::write(temp.path().join("manifest-SHA1.txt"), "0000 data/a.txt\n").unwrap();

        assert!(!FixityChecker::new(&bag).is_fixed());
    }

    #[test]
    fn test_malformed_manifest_is_not_fixed() {
        let temp = TempDir::new().unwrap();
        let bag = manifested_bag(&temp);
        fs::write(temp.path().join("manifest-sha1.txt"), "nopath\n").unwrap();

        let report = FixityChecker::new(&bag).check().unwrap();
        assert!(report
            .failed
            .iter()
            .any(|f| f.reason == FailureReason::Malformed(1)));
    }

    #[test]
    fn test_missing_bag_root_is_not_fixed() {
        let temp = TempDir::new().unwrap();
        let bag = DirectoryBag::new(temp.path().join("nowhere"));
        assert!(!FixityChecker::new(&bag).is_fixed());
    }
}
