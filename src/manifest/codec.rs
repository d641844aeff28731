//! Escaping of recorded paths.
//!
//! A manifest holds one record per line, so a path may never carry a raw
//! carriage return or line feed. Only those two bytes are escaped.

use crate::core::path::bag_relative;
use crate::core::BagResult;
use std::path::Path;

const CR_ESCAPE: &str = "%0D";
const LF_ESCAPE: &str = "%0A";

/// Replace CR with `%0D` and LF with `%0A`, leaving every other byte alone.
pub fn encode(path: &str) -> String {
    path.replace('\r', CR_ESCAPE).replace('\n', LF_ESCAPE)
}

/// Inverse of [`encode`]. A single left-to-right pass, so a decoded CR or LF
/// is never looked at again.
pub fn decode(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with(CR_ESCAPE) {
            out.push('\r');
            rest = &tail[CR_ESCAPE.len()..];
        } else if tail.starts_with(LF_ESCAPE) {
            out.push('\n');
            rest = &tail[LF_ESCAPE.len()..];
        } else {
            out.push('%');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Encoded path of `file` relative to `root`, as written into a manifest.
pub fn record_path(root: &Path, file: &Path) -> BagResult<String> {
    Ok(encode(&bag_relative(root, file)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_breaks() {
        assert_eq!(encode("data/a\r\nb.txt"), "data/a%0D%0Ab.txt");
        assert_eq!(encode("data/plain name.txt"), "data/plain name.txt");
    }

    #[test]
    fn test_encode_leaves_percent_alone() {
        assert_eq!(encode("data/100%.txt"), "data/100%.txt");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("data/a%0D%0Ab.txt"), "data/a\r\nb.txt");
        assert_eq!(decode("data/100%.txt"), "data/100%.txt");
        assert_eq!(decode("%"), "%");
        assert_eq!(decode("%0"), "%0");
    }

    #[test]
    fn test_decode_does_not_rescan_output() {
        assert_eq!(decode("%%0A"), "%\n");
        assert_eq!(decode("%250A"), "%250A");
    }

    #[test]
    fn test_record_path() {
        let root = Path::new("/bags/one");
        let file = root.join("data").join("line\nbreak.txt");
        assert_eq!(record_path(root, &file).unwrap(), "data/line%0Abreak.txt");
    }
}
