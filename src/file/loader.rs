//! Seed document loading.
//!
//! This module reads a JSON document from a file (plain or gzip-compressed)
//! or from stdin and imports it into a `FieldTree`, so a session can start
//! from existing data instead of an empty form.

use super::convert::import_value;
use crate::document::tree::FieldTree;
use crate::editor::ids::IdSource;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Loads a JSON file from disk and imports it as a field tree.
///
/// Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use fieldquill::editor::ids::SequentialIds;
/// use fieldquill::file::loader::load_json_file;
///
/// let tree = load_json_file("config.json", &mut SequentialIds::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - The file is not valid gzip (for `.gz` files)
/// - The contents are not valid JSON
/// - The JSON cannot be represented as fields (not an object, or contains null)
pub fn load_json_file<P: AsRef<Path>>(path: P, ids: &mut dyn IdSource) -> Result<FieldTree> {
    let value = read_json_file(path)?;
    import_value(&value, ids).context("Failed to import JSON document")
}

/// Reads and parses a JSON file without importing it.
pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file `{}`", path_ref.display()))?
    };

    serde_json::from_str(&content).context("Failed to parse JSON")
}

/// Loads JSON from standard input and imports it as a field tree.
///
/// Gzip-compressed input is detected by its magic bytes.
pub fn load_json_from_stdin(ids: &mut dyn IdSource) -> Result<FieldTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let value = parse_json_bytes(buffer)?;
    import_value(&value, ids).context("Failed to import JSON from stdin")
}

/// Parses raw bytes as JSON, decompressing them first when they start with
/// the gzip magic bytes (0x1f 0x8b).
pub fn parse_json_bytes(buffer: Vec<u8>) -> Result<Value> {
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };
    serde_json::from_str(&content).context("Failed to parse JSON")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_parse_plain_bytes() {
        let value = parse_json_bytes(br#"{"a": 1}"#.to_vec()).unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_parse_gzipped_bytes() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"{"a": [true]}"#).unwrap();
        let compressed = encoder.finish().unwrap();

        let value = parse_json_bytes(compressed).unwrap();
        assert_eq!(value, serde_json::json!({"a": [true]}));
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        assert!(parse_json_bytes(vec![0xff, 0xfe, 0x00]).is_err());
    }
}
