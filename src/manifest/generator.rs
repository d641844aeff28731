use crate::core::{Bag, BagError, BagResult};
use crate::manifest::codec;
use crate::manifest::digest::{digest_file_all, Algorithm};
use crate::manifest::store::ManifestStore;
use crate::manifest::tagmanifest::TagManifestGenerator;
use std::fmt;
use std::str::FromStr;

/// Which payload manifests `manifest!` writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmSelector {
    Sha1,
    Md5,
    Sha256,
    Sha512,
    /// SHA-1 and MD5
    #[default]
    Default,
}

impl AlgorithmSelector {
    /// Algorithms written for this selector.
    ///
    /// `sha512` writes a SHA-256 manifest unless `sha512_writes_sha512` is set;
    /// existing bags were produced that way.
    pub fn algorithms(&self, sha512_writes_sha512: bool) -> Vec<Algorithm> {
        match self {
            AlgorithmSelector::Sha1 => vec![Algorithm::Sha1],
            AlgorithmSelector::Md5 => vec![Algorithm::Md5],
            AlgorithmSelector::Sha256 => vec![Algorithm::Sha256],
            AlgorithmSelector::Sha512 if sha512_writes_sha512 => vec![Algorithm::Sha512],
            AlgorithmSelector::Sha512 => vec![Algorithm::Sha256],
            AlgorithmSelector::Default => vec![Algorithm::Sha1, Algorithm::Md5],
        }
    }
}

impl fmt::Display for AlgorithmSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlgorithmSelector::Sha1 => "sha1",
            AlgorithmSelector::Md5 => "md5",
            AlgorithmSelector::Sha256 => "sha256",
            AlgorithmSelector::Sha512 => "sha512",
            AlgorithmSelector::Default => "default",
        };
        f.write_str(name)
    }
}

impl FromStr for AlgorithmSelector {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(AlgorithmSelector::Sha1),
            "md5" => Ok(AlgorithmSelector::Md5),
            "sha256" => Ok(AlgorithmSelector::Sha256),
            "sha512" => Ok(AlgorithmSelector::Sha512),
            "default" => Ok(AlgorithmSelector::Default),
            _ => Err(BagError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Rebuilds every payload manifest from the bag's current payload files
pub struct ManifestGenerator<'a> {
    bag: &'a dyn Bag,
    store: ManifestStore,
    sha512_writes_sha512: bool,
}

impl<'a> ManifestGenerator<'a> {
    pub fn new(bag: &'a dyn Bag) -> Self {
        Self {
            bag,
            store: ManifestStore::payload(bag.bag_root()),
            sha512_writes_sha512: false,
        }
    }

    /// Make the `sha512` selector write a real SHA-512 manifest
    pub fn sha512_writes_sha512(mut self, enabled: bool) -> Self {
        self.sha512_writes_sha512 = enabled;
        self
    }

    /// Delete all payload manifests and write them again from scratch, then
    /// regenerate the tag manifests so they list the new files.
    pub fn generate(&self, selector: AlgorithmSelector) -> BagResult<()> {
        let algorithms = selector.algorithms(self.sha512_writes_sha512);
        if selector == AlgorithmSelector::Sha512 && !self.sha512_writes_sha512 {
            tracing::warn!("the sha512 selector writes manifest-sha256.txt for compatibility");
        }

        let root = self.bag.bag_root();
        let payload = self.bag.payload_files()?;
        let mut records = Vec::with_capacity(payload.len());
        for file in &payload {
            let file = self.bag.resolve(file);
            let record_path = codec::record_path(root, &file)?;
            records.push((record_path, digest_file_all(&algorithms, &file)?));
        }

        // Old manifests stay in place until every payload file has been read
        self.store.clear()?;
        for (record_path, digests) in &records {
            for (algorithm, digest) in algorithms.iter().zip(digests) {
                self.store.append(*algorithm, record_path, digest)?;
            }
        }

        tracing::info!(
            bag = %root.display(),
            files = payload.len(),
            algorithms = %selector,
            "wrote payload manifests"
        );

        TagManifestGenerator::new(self.bag).generate_current()?;
        Ok(())
    }
}
