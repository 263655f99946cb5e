//! File-based data source.
//!
//! Reads a local `simulation_data.json` once.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::error;

use super::{decode_payload, DataSource, RawPayload};
use crate::error::LoadError;

/// A data source that reads the record payload from a JSON file.
///
/// The file is read on the first poll; later polls return `None`.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    delivered: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            delivered: false,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<RawPayload, LoadError> {
        let bytes = fs::read(&self.path)?;
        decode_payload(&bytes)
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<RawPayload> {
        if self.delivered {
            return None;
        }
        self.delivered = true;

        match self.read_file() {
            Ok(payload) => {
                self.last_error = None;
                Some(payload)
            }
            Err(e) => {
                error!(path = %self.path.display(), "Error loading data: {}", e);
                self.last_error = Some(e.to_string());
                Some(Vec::new())
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/simulation_data.json");
        assert_eq!(source.path(), Path::new("/tmp/simulation_data.json"));
        assert_eq!(source.description(), "file: /tmp/simulation_data.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_reads_once() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"[{{"id": "sim001"}}, {{"id": "sim002"}}]"#).unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.poll().map(|p| p.len()), Some(2));
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/simulation_data.json");

        assert_eq!(source.poll(), Some(Vec::new()));
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_not_an_array() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": "sim001"}}"#).unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.poll(), Some(Vec::new()));
        assert_eq!(source.error(), Some("Data is not an array"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.poll(), Some(Vec::new()));
        assert!(source.error().unwrap().contains("Failed to decode"));
    }
}
