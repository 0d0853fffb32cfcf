//! Document metadata from an external extractor
//!
//! Metadata extraction is delegated to an outside program, typically Apache
//! Tika (`java -jar tika-app.jar --json`). The program is run once per file
//! with the file path as its last argument and must print a JSON object, or
//! an array whose first element is one.

use std::path::Path;
use std::process::Command;

use crate::error::{InventoryError, Result};
use crate::report::Metadata;

/// Something that can describe a file as key/value metadata.
///
/// Implementations may be slow and may fail per file; callers log
/// failures and move on to the next file.
pub trait MetadataExtractor {
    fn extract(&self, path: &Path) -> Result<Metadata>;
}

/// Runs an external command and parses its JSON output.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
}

impl CommandExtractor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a whitespace-separated command line such as
    /// `"java -jar tika-app.jar --json"`. Returns `None` for a blank string.
    pub fn from_command_line(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MetadataExtractor for CommandExtractor {
    fn extract(&self, path: &Path) -> Result<Metadata> {
        let failure = |message: String| InventoryError::MetadataExtraction {
            path: path.to_path_buf(),
            message,
        };

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| failure(format!("cannot run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_metadata(&output.stdout).map_err(failure)
    }
}

/// Parse extractor output into a metadata map.
fn parse_metadata(stdout: &[u8]) -> std::result::Result<Metadata, String> {
    let value: serde_json::Value =
        serde_json::from_slice(stdout).map_err(|e| format!("invalid JSON output: {}", e))?;

    let object = match value {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    match object {
        Some(serde_json::Value::Object(map)) => Ok(map.into_iter().collect()),
        _ => Err("expected a JSON object".to_string()),
    }
}
