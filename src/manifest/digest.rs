use crate::core::{BagError, BagResult};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::str::FromStr;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Checksum algorithms a manifest can be written or verified with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Md5,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Token used in manifest file names (`manifest-<token>.txt`)
    pub fn token(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Md5 => "md5",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Match a manifest file name token, ignoring case
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "sha1" => Some(Algorithm::Sha1),
            "md5" => Some(Algorithm::Md5),
            "sha256" => Some(Algorithm::Sha256),
            "sha512" => Some(Algorithm::Sha512),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Algorithm {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| BagError::UnsupportedAlgorithm(s.to_string()))
    }
}

enum Hasher {
    Sha1(Sha1),
    Md5(md5::Context),
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Hasher {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            Algorithm::Md5 => Hasher::Md5(md5::Context::new()),
            Algorithm::Sha256 => Hasher::Sha256(Sha256::new()),
            Algorithm::Sha512 => Hasher::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(data),
            Hasher::Md5(h) => h.consume(data),
            Hasher::Sha256(h) => h.update(data),
            Hasher::Sha512(h) => h.update(data),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Md5(h) => format!("{:x}", h.compute()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
            Hasher::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// Lowercase hex digest of an in-memory buffer
pub fn digest_bytes(algorithm: Algorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_hex()
}

/// Lowercase hex digest of a file's full contents
pub fn digest_file(algorithm: Algorithm, path: &Path) -> BagResult<String> {
    let mut digests = digest_file_all(&[algorithm], path)?;
    Ok(digests.remove(0))
}

/// Digest a file with several algorithms while reading it only once.
///
/// The result holds one hex digest per requested algorithm, in order.
pub fn digest_file_all(algorithms: &[Algorithm], path: &Path) -> BagResult<Vec<String>> {
    let mut file = File::open(path).map_err(|e| BagError::from_io(e, path))?;
    let mut hashers: Vec<Hasher> = algorithms.iter().map(|a| Hasher::new(*a)).collect();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(BagError::Io(e)),
        };
        for hasher in hashers.iter_mut() {
            hasher.update(&buffer[..read]);
        }
    }

    Ok(hashers.into_iter().map(Hasher::finalize_hex).collect())
}
