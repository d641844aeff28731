pub mod manifest;
pub mod tag;
pub mod tagmanifest;
pub mod verify;

use bagit::config::Config;
use bagit::core::{BagError, BagResult};
use bagit::DirectoryBag;
use std::path::{Path, PathBuf};

/// Bag and configuration shared by every command
pub struct Context {
    pub bag: DirectoryBag,
    pub config: Config,
}

impl Context {
    pub fn open(bag_dir: &Path, config_path: Option<&Path>) -> BagResult<Self> {
        if !bag_dir.is_dir() {
            return Err(BagError::Path(format!(
                "Bag directory not found: {}",
                bag_dir.display()
            )));
        }

        let config = match config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let bag = DirectoryBag::new(bag_dir).with_payload_dir(config.payload_dir.clone());

        Ok(Self { bag, config })
    }
}

/// Print a tracked tag-file set relative to the bag root
pub fn print_tracked(root: &Path, tracked: &[PathBuf]) {
    println!("  {} tag file(s) tracked", tracked.len());
    for tag in tracked {
        let shown = tag.strip_prefix(root).unwrap_or(tag);
        println!("    {}", shown.display());
    }
}
