//! bagit: manifest and fixity maintenance for BagIt bags
//!
//! This crate re-exports the core types from `bagit-core` and organizes the
//! manifest machinery, the on-disk bag layout and configuration.

pub use bagit_core::{format_error_with_help, Bag, BagError, BagResult, ErrorHelp};

/// Core module re-exported from bagit-core.
pub mod core {
    pub use bagit_core::bag::Bag;
    pub use bagit_core::core::*;
}

/// On-disk bag layout.
pub mod bag;

/// Configuration management.
pub mod config;

/// Payload manifests, tag manifests and fixity checks.
pub mod manifest;

pub use bag::DirectoryBag;
pub use manifest::{AlgorithmSelector, Manifests, TagFileSource};
