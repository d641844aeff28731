use crate::core::BagError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for BagError {
    fn help(&self) -> Option<String> {
        match self {
            BagError::DuplicateTagFile(_) => Some(
                "💡 Suggestion: Choose a different path, or run 'bagit remove-tag' on the existing entry first"
                    .to_string(),
            ),
            BagError::TagFileConflict(_) => Some(
                "💡 Suggestion: The file is already in the bag. Run 'bagit add-tag <path>' without --from to track it as is"
                    .to_string(),
            ),
            BagError::UnknownTagFile(_) => Some(
                "💡 Suggestion: Only tracked tag files can be removed. Check the path against tagmanifest-sha1.txt"
                    .to_string(),
            ),
            BagError::FileNotFound(_) => Some(
                "💡 Suggestion: The file may have been moved or deleted. Check the path relative to the bag root"
                    .to_string(),
            ),
            BagError::UnsupportedAlgorithm(_) => Some(
                "💡 Suggestion: Use one of 'default', 'sha1', 'md5', 'sha256' or 'sha512'".to_string(),
            ),
            BagError::NotFixed(_) => Some(
                "💡 Suggestion: Restore the changed files from a good copy. Only run 'bagit manifest' if the changes are intended"
                    .to_string(),
            ),
            BagError::MalformedManifest { .. } => Some(
                "💡 Suggestion: Each manifest line must be '<digest> <path>'. Run 'bagit manifest' to regenerate"
                    .to_string(),
            ),
            BagError::Yaml(e) => Some(format!(
                "💡 Suggestion: Check your YAML syntax. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - Unclosed quotes\n\nError details: {}",
                e
            )),
            BagError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions on the bag directory, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &BagError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
