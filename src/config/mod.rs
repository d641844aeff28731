use crate::bag::DEFAULT_PAYLOAD_DIR;
use crate::core::path::{config_file, ensure_dir};
use crate::core::{BagError, BagResult};
use crate::manifest::AlgorithmSelector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selector used by `bagit manifest` when `--algorithm` is not given
    /// (`default`, `sha1`, `md5`, `sha256` or `sha512`)
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,

    /// Payload directory below the bag root
    #[serde(default = "default_payload_dir")]
    pub payload_dir: String,

    /// Write a real SHA-512 manifest for the `sha512` selector.
    ///
    /// Off by default: bags written so far carry `manifest-sha256.txt` for
    /// that selector.
    #[serde(default)]
    pub sha512_writes_sha512: bool,
}

fn default_algorithm() -> String {
    "default".to_string()
}

fn default_payload_dir() -> String {
    DEFAULT_PAYLOAD_DIR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_algorithm: default_algorithm(),
            payload_dir: default_payload_dir(),
            sha512_writes_sha512: false,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, falling back
    /// to defaults when there is none
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\bagit\config.yaml
    /// - Linux: ~/.config/bagit/config.yaml
    /// - macOS: ~/Library/Application Support/bagit/config.yaml
    pub fn load() -> BagResult<Self> {
        let config_path = config_file()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> BagResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| BagError::from_io(e, path))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BagError::Config(format!("Failed to parse config: {}", e)))?;

        config.selector()?;
        Ok(config)
    }

    /// Save config to the platform-specific config directory
    pub fn save(&self) -> BagResult<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> BagResult<()> {
        if let Some(config_dir) = path.parent() {
            ensure_dir(config_dir)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| BagError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Parsed `default_algorithm`
    pub fn selector(&self) -> BagResult<AlgorithmSelector> {
        self.default_algorithm.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_algorithm, "default");
        assert_eq!(config.payload_dir, "data");
        assert!(!config.sha512_writes_sha512);
        assert_eq!(config.selector().unwrap(), AlgorithmSelector::Default);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("bagit").join("config.yaml");

        let config = Config {
            default_algorithm: "sha256".to_string(),
            payload_dir: "content".to_string(),
            sha512_writes_sha512: true,
        };
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.selector().unwrap(), AlgorithmSelector::Sha256);
        assert_eq!(loaded.payload_dir, "content");
        assert!(loaded.sha512_writes_sha512);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        fs::write(&config_path, "default_algorithm: md5\n").unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded.selector().unwrap(), AlgorithmSelector::Md5);
        assert_eq!(loaded.payload_dir, "data");
    }

    #[test]
    fn test_config_rejects_unknown_algorithm() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        fs::write(&config_path, "default_algorithm: crc32\n").unwrap();

        assert!(matches!(
            Config::load_from(&config_path),
            Err(BagError::UnsupportedAlgorithm(_))
        ));
    }
}
