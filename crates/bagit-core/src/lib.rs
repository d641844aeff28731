// Core functionality
pub mod core;

// Bag capability interface
pub mod bag;

// Re-export commonly used types
pub use bag::Bag;
pub use crate::core::{format_error_with_help, BagError, BagResult, ErrorHelp};
