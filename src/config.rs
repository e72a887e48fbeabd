use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::{Error, Result};

/// Options that adjust which spans the classifier protects.
///
/// The defaults reproduce the standard policy: floating string literals are
/// commentary, documentation comments are kept, and the whole file is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Remove statement-level string literals that are not docstrings.
    #[serde(default = "default_true")]
    pub remove_floating_strings: bool,

    /// Keep comments that open with a documentation marker such as `/**` or `///`.
    #[serde(default = "default_true")]
    pub keep_doc_comments: bool,

    /// Only remove spans that start inside this range of lines.
    #[serde(default)]
    pub line_range: Option<LineRange>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            remove_floating_strings: default_true(),
            keep_doc_comments: default_true(),
            line_range: None,
        }
    }
}

/// An inclusive, 1-based range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| Error::config(format!("Failed to open options file: {}", e)))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::config(format!("Failed to parse options file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::config(format!("Failed to parse options: {}", e)))?;
    Ok(config)
}

fn default_true() -> bool {
    true
}
