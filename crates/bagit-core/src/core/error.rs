use std::path::PathBuf;
use thiserror::Error;

pub type BagResult<T> = Result<T, BagError>;

#[derive(Error, Debug)]
pub enum BagError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Tag file already in manifest: {}", .0.display())]
    DuplicateTagFile(PathBuf),

    #[error("Tag file already exists, will not overwrite: {}", .0.display())]
    TagFileConflict(PathBuf),

    #[error("Tag file is not in manifest: {}", .0.display())]
    UnknownTagFile(PathBuf),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported checksum algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Malformed manifest line in {}:{line}", .path.display())]
    MalformedManifest { path: PathBuf, line: usize },

    #[error("Fixity check failed for {0} record(s)")]
    NotFixed(usize),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

impl BagError {
    /// Map an IO error on `path` to `FileNotFound` when the file is absent,
    /// keeping every other failure as `Io`.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            BagError::FileNotFound(path.into())
        } else {
            BagError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let mapped = BagError::from_io(err, "bag/data/a.txt");
        assert!(matches!(mapped, BagError::FileNotFound(p) if p == PathBuf::from("bag/data/a.txt")));
    }

    #[test]
    fn test_from_io_other_kind() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(BagError::from_io(err, "x"), BagError::Io(_)));
    }

    #[test]
    fn test_display_includes_path() {
        let err = BagError::DuplicateTagFile(PathBuf::from("bag/notes.txt"));
        assert_eq!(err.to_string(), "Tag file already in manifest: bag/notes.txt");
    }
}
