use crate::core::{BagError, BagResult};
use crate::manifest::codec;
use crate::manifest::digest::Algorithm;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Which family of manifest files a store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// `manifest-<algorithm>.txt`, one record per payload file
    Payload,
    /// `tagmanifest-<algorithm>.txt`, one record per tag file
    Tag,
}

impl ManifestKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ManifestKind::Payload => "manifest",
            ManifestKind::Tag => "tagmanifest",
        }
    }

    /// Algorithms written for this kind. Tag manifests are always SHA-1 and MD5.
    pub fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            ManifestKind::Payload => &[
                Algorithm::Sha1,
                Algorithm::Md5,
                Algorithm::Sha256,
                Algorithm::Sha512,
            ],
            ManifestKind::Tag => &[Algorithm::Sha1, Algorithm::Md5],
        }
    }

    fn file_name_pattern(&self) -> BagResult<Regex> {
        Regex::new(&format!(r"^{}-(.+)\.txt$", self.prefix()))
            .map_err(|e| BagError::Path(format!("Invalid manifest name pattern: {}", e)))
    }
}

/// One `<digest> <path>` line of a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub digest: String,
    /// Path relative to the bag root, still escaped
    pub path: String,
}

impl ManifestRecord {
    pub fn decoded_path(&self) -> String {
        codec::decode(&self.path)
    }
}

/// Reads and writes the manifest files of one kind directly under a bag root
#[derive(Debug, Clone)]
pub struct ManifestStore {
    root: PathBuf,
    kind: ManifestKind,
}

impl ManifestStore {
    pub fn new(root: impl Into<PathBuf>, kind: ManifestKind) -> Self {
        Self {
            root: root.into(),
            kind,
        }
    }

    /// Store for `manifest-*.txt`
    pub fn payload(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ManifestKind::Payload)
    }

    /// Store for `tagmanifest-*.txt`
    pub fn tag(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ManifestKind::Tag)
    }

    pub fn kind(&self) -> ManifestKind {
        self.kind
    }

    /// Every manifest file of this kind directly under the bag root, sorted by name.
    /// Subdirectories are never searched.
    pub fn list_files(&self) -> BagResult<Vec<PathBuf>> {
        let pattern = self.kind.file_name_pattern()?;
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.is_match(name));
            if matches && path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Path of the manifest for `algorithm`, whether or not it exists yet
    pub fn path_for(&self, algorithm: Algorithm) -> PathBuf {
        self.root
            .join(format!("{}-{}.txt", self.kind.prefix(), algorithm.token()))
    }

    /// Algorithm token embedded in a manifest file name, if it is one of ours
    pub fn algorithm_token(&self, file: &Path) -> BagResult<Option<String>> {
        let pattern = self.kind.file_name_pattern()?;
        Ok(file
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| pattern.captures(name))
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string()))
    }

    /// Delete every manifest file of this kind
    pub fn clear(&self) -> BagResult<()> {
        for file in self.list_files()? {
            fs::remove_file(&file)?;
            tracing::debug!(path = %file.display(), "removed {} file", self.kind.prefix());
        }
        Ok(())
    }

    /// Append one record, creating the manifest if needed
    pub fn append(&self, algorithm: Algorithm, encoded_path: &str, digest: &str) -> BagResult<()> {
        let manifest = self.path_for(algorithm);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&manifest)?;
        writeln!(file, "{} {}", digest, encoded_path)?;

        tracing::debug!(
            manifest = %manifest.display(),
            path = encoded_path,
            digest,
            "recorded checksum"
        );
        Ok(())
    }

    /// Parse every record of a manifest file. Blank lines are skipped.
    pub fn read_records(&self, file: &Path) -> BagResult<Vec<ManifestRecord>> {
        let content = fs::read_to_string(file).map_err(|e| BagError::from_io(e, file))?;
        let mut records = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r').trim_start();
            if line.is_empty() {
                continue;
            }

            let malformed = || BagError::MalformedManifest {
                path: file.to_path_buf(),
                line: index + 1,
            };
            let (digest, path) = line.split_once(char::is_whitespace).ok_or_else(malformed)?;
            let path = path.trim_start();
            if path.is_empty() {
                return Err(malformed());
            }

            records.push(ManifestRecord {
                digest: digest.to_string(),
                path: path.to_string(),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_files_matches_only_own_kind() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("manifest-sha1.txt"), "").unwrap();
        fs::write(root.join("manifest-md5.txt"), "").unwrap();
        fs::write(root.join("tagmanifest-sha1.txt"), "").unwrap();
        fs::write(root.join("manifest-sha1.txt.bak"), "").unwrap();
        fs::write(root.join("bagit.txt"), "").unwrap();
        fs::create_dir_all(root.join("data")).unwrap();
        fs::write(root.join("data").join("manifest-sha256.txt"), "").unwrap();

        let payload = ManifestStore::payload(root).list_files().unwrap();
        assert_eq!(
            payload,
            vec![root.join("manifest-md5.txt"), root.join("manifest-sha1.txt")]
        );

        let tag = ManifestStore::tag(root).list_files().unwrap();
        assert_eq!(tag, vec![root.join("tagmanifest-sha1.txt")]);
    }

    #[test]
    fn test_append_and_read_records() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::payload(temp.path());

        store.append(Algorithm::Md5, "data/a.txt", "abc").unwrap();
        store.append(Algorithm::Md5, "data/b%0A.txt", "def").unwrap();

        let manifest = store.path_for(Algorithm::Md5);
        assert_eq!(
            fs::read_to_string(&manifest).unwrap(),
            "abc data/a.txt\ndef data/b%0A.txt\n"
        );

        let records = store.read_records(&manifest).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].digest, "def");
        assert_eq!(records[1].decoded_path(), "data/b\n.txt");
    }

    #[test]
    fn test_read_records_keeps_spaces_in_paths() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::tag(temp.path());
        let manifest = store.path_for(Algorithm::Sha1);
        fs::write(&manifest, "abc  data/with space.txt\n\n").unwrap();

        let records = store.read_records(&manifest).unwrap();
        assert_eq!(records, vec![ManifestRecord {
            digest: "abc".to_string(),
            path: "data/with space.txt".to_string(),
        }]);
    }

    #[test]
    fn test_read_records_rejects_missing_path() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::payload(temp.path());
        let manifest = store.path_for(Algorithm::Sha1);
        fs::write(&manifest, "abc data/a.txt\njustadigest\n").unwrap();

        let result = store.read_records(&manifest);
        assert!(matches!(result, Err(BagError::MalformedManifest { line: 2, .. })));
    }

    #[test]
    fn test_clear_and_algorithm_token() {
        let temp = TempDir::new().unwrap();
        let store = ManifestStore::tag(temp.path());
        store.append(Algorithm::Sha1, "bagit.txt", "abc").unwrap();
        store.append(Algorithm::Md5, "bagit.txt", "def").unwrap();
        fs::write(temp.path().join("manifest-sha1.txt"), "").unwrap();

        let token = store.algorithm_token(&store.path_for(Algorithm::Md5)).unwrap();
        assert_eq!(token.as_deref(), Some("md5"));

        store.clear().unwrap();
        assert!(store.list_files().unwrap().is_empty());
        assert!(temp.path().join("manifest-sha1.txt").exists());
    }
}
