//! Style-block offset lookup.
//!
//! Positions reported for an embedded style block are relative to the block,
//! so the 0-based index of the first line opening it is subtracted later.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default opening marker for an embedded style block.
pub const DEFAULT_MARKER: &str = "<style";

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// What to do when no line contains the marker.
pub enum MissingBlock {
    /// Use offset 0 (plain stylesheets).
    #[default]
    Zero,
    /// Abort the lint pass with `Error::MissingStyleBlock`.
    Fail,
}

/// Index of the first line containing `marker`, if any.
pub fn first_marker_line(text: &str, marker: &str) -> Option<usize> {
    text.split('\n').position(|line| line.contains(marker))
}

/// Read `path` once and return the first marker line.
pub fn locate_in_file(path: &Path, marker: &str) -> Result<Option<usize>> {
    let text = fs::read_to_string(path)?;
    Ok(first_marker_line(&text, marker))
}

/// Apply the missing-marker policy to a lookup result.
pub fn resolve_offset(
    found: Option<usize>,
    policy: MissingBlock,
    path: &Path,
    marker: &str,
) -> Result<usize> {
    match (found, policy) {
        (Some(n), _) => Ok(n),
        (None, MissingBlock::Zero) => Ok(0),
        (None, MissingBlock::Fail) => Err(Error::MissingStyleBlock {
            path: path.to_path_buf(),
            marker: marker.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_marker_line_takes_first_match() {
        let text = "<template>\n  <p/>\n</template>\n<style scoped>\na{}\n</style>\n<style>";
        assert_eq!(first_marker_line(text, DEFAULT_MARKER), Some(3));
        assert_eq!(first_marker_line("a { color: red; }\n", DEFAULT_MARKER), None);
        assert_eq!(first_marker_line("", DEFAULT_MARKER), None);
    }

    #[test]
    fn test_resolve_offset_policies() {
        let p = Path::new("x.css");
        assert_eq!(resolve_offset(Some(4), MissingBlock::Fail, p, "<style").unwrap(), 4);
        assert_eq!(resolve_offset(None, MissingBlock::Zero, p, "<style").unwrap(), 0);
        let err = resolve_offset(None, MissingBlock::Fail, p, "<style").unwrap_err();
        assert!(matches!(err, Error::MissingStyleBlock { .. }));
    }

    #[test]
    fn test_locate_in_file_reads_disk() {
        let dir = tempdir().unwrap();
        let f = dir.path().join("page.html");
        std::fs::write(&f, "<html>\n<head>\n<style>\nbody{}\n</style>").unwrap();
        assert_eq!(locate_in_file(&f, DEFAULT_MARKER).unwrap(), Some(2));
        assert!(matches!(
            locate_in_file(&dir.path().join("missing.html"), DEFAULT_MARKER),
            Err(Error::Io(_))
        ));
    }
}
