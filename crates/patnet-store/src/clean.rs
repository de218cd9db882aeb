//! Post-processing of serialized graph files
//!
//! The serializer appends ` 0.0 0.0 ellipse` (coordinates and shape) to every
//! vertex line. The cleaned copy drops that literal substring everywhere and is
//! the file that gets reloaded and shown to users. Matching is exact and
//! byte-oriented so files produced by earlier tools clean the same way.

use crate::{ensure_parent, temp_sibling, StoreError};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Rendering artifact removed from every line
pub const RENDER_ARTIFACT: &str = " 0.0 0.0 ellipse";

/// Remove the rendering artifact from one line
pub fn clean_line(line: &str) -> String {
    line.replace(RENDER_ARTIFACT, "")
}

/// Copy `raw` to `cleaned` line by line without the rendering artifact
///
/// Line endings are preserved as read. The copy is written to a temporary
/// sibling and renamed over `cleaned` once complete, so an interrupted clean
/// leaves the previous cleaned file in place. Returns the number of lines
/// written.
pub fn clean_file(raw: &Path, cleaned: &Path) -> Result<usize, StoreError> {
    let (tmp, count) = write_cleaned_copy(raw, cleaned)?;
    fs::rename(&tmp, cleaned)?;
    Ok(count)
}

/// Write the cleaned copy of `raw` next to `cleaned`; returns its path
fn write_cleaned_copy(raw: &Path, cleaned: &Path) -> Result<(PathBuf, usize), StoreError> {
    ensure_parent(cleaned)?;
    let tmp = temp_sibling(cleaned);

    let mut reader = BufReader::new(File::open(raw)?);
    let mut writer = BufWriter::new(File::create(&tmp)?);
    let mut line = String::new();
    let mut count = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        writer.write_all(clean_line(&line).as_bytes())?;
        count += 1;
    }

    writer.flush()?;
    Ok((tmp, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("1 \"Acme Co.\" 0.0 0.0 ellipse\n"), "1 \"Acme Co.\"\n");
        assert_eq!(clean_line("1 2 1.0 label \"G\""), "1 2 1.0 label \"G\"");
        // Near misses are left alone
        assert_eq!(clean_line("1 A 0.0 0.0 box"), "1 A 0.0 0.0 box");
        assert_eq!(clean_line("1 A  0.0 0.0 ellipse"), "1 A ");
    }

    #[test]
    fn test_clean_file_preserves_endings() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("raw.net");
        let cleaned = dir.path().join("nested").join("clean.net");
        std::fs::write(&raw, "*vertices 1\r\n1 A 0.0 0.0 ellipse\r\n*edges\n1 1 1.0").unwrap();

        let lines = clean_file(&raw, &cleaned).unwrap();

        assert_eq!(lines, 4);
        assert_eq!(
            std::fs::read_to_string(&cleaned).unwrap(),
            "*vertices 1\r\n1 A\r\n*edges\n1 1 1.0"
        );
    }

    #[test]
    fn test_unfinished_clean_keeps_previous_copy() {
        let dir = tempdir().unwrap();
        let raw = dir.path().join("raw.net");
        let cleaned = dir.path().join("clean.net");

        std::fs::write(&raw, "*vertices 2\n1 A 0.0 0.0 ellipse\n2 B 0.0 0.0 ellipse\n*edges\n1 2 1.0\n").unwrap();
        clean_file(&raw, &cleaned).unwrap();
        let previous = std::fs::read_to_string(&cleaned).unwrap();

        // New content written but never renamed into place
        std::fs::write(&raw, "*vertices 1\n1 C 0.0 0.0 ellipse\n*edges\n").unwrap();
        let (tmp, _) = write_cleaned_copy(&raw, &cleaned).unwrap();

        assert_eq!(std::fs::read_to_string(&cleaned).unwrap(), previous);
        assert_eq!(std::fs::read_to_string(&tmp).unwrap(), "*vertices 1\n1 C\n*edges\n");

        clean_file(&raw, &cleaned).unwrap();
        assert_eq!(std::fs::read_to_string(&cleaned).unwrap(), "*vertices 1\n1 C\n*edges\n");
        assert!(!tmp.exists());
    }

    #[test]
    fn test_clean_missing_raw_file() {
        let dir = tempdir().unwrap();
        let result = clean_file(&dir.path().join("missing.net"), &dir.path().join("out.net"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
