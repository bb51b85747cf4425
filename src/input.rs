// File: src/input.rs
// Fragment input boundary: loads the positioned-text records produced
// by the external extraction step.
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Fragment;

/// Anything that can hand the pipeline a page's fragments. Kept as a
/// trait so tests and future extractors can feed synthetic sequences.
pub trait FragmentSource {
    fn read_fragments(&mut self) -> Result<Vec<Fragment>>;
}

/// Reads fragments from a JSON array of `{text, x, y}` records.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl FragmentSource for JsonFile {
    fn read_fragments(&mut self) -> Result<Vec<Fragment>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read fragment file {}", self.path.display()))?;
        let fragments: Vec<Fragment> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse fragment file {}", self.path.display()))?;
        if fragments.is_empty() {
            bail!("Fragment file {} contains no fragments", self.path.display());
        }
        Ok(fragments)
    }
}

/// In-memory source for tests and embedding callers.
pub struct StaticSource {
    fragments: Vec<Fragment>,
}

impl StaticSource {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}

impl FragmentSource for StaticSource {
    fn read_fragments(&mut self) -> Result<Vec<Fragment>> {
        if self.fragments.is_empty() {
            bail!("Fragment source contains no fragments");
        }
        Ok(std::mem::take(&mut self.fragments))
    }
}
