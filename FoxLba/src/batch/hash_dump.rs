//! Unique hash lists for dictionary research
//!
//! Each category present in a file's locator type is written as
//! duplicate-free decimal values, one per line, sorted as text so `100`
//! comes before `7`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::formats::lba::LbaFile;

/// Unique hashes of one locator file, by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashDump {
    pub locator_names: BTreeSet<u32>,
    pub data_sets: BTreeSet<u32>,
    /// The four auxiliary hashes of extended locators, pooled.
    pub unknowns: BTreeSet<u32>,
}

impl HashDump {
    /// Gather the hashes of every locator.
    #[must_use]
    pub fn collect(file: &LbaFile) -> Self {
        let mut dump = Self::default();
        for locator in file.locators() {
            if let Some(name) = locator.locator_name() {
                dump.locator_names.insert(name.value());
            }
            if let Some(data_set) = locator.data_set() {
                dump.data_sets.insert(data_set.value());
            }
            if let Some(unknowns) = locator.unknowns() {
                dump.unknowns.extend(unknowns.iter().map(|u| u.value()));
            }
        }
        dump
    }

    /// Write one list per non-empty category next to `input`, named
    /// `<input file name>_<category>Hashes.txt`.
    ///
    /// # Errors
    /// Returns an error if a list cannot be written.
    pub fn write(&self, input: &Path) -> Result<Vec<PathBuf>> {
        let file_name = input.file_name().unwrap_or_default().to_string_lossy();
        let mut outputs = Vec::new();

        for (suffix, hashes) in [
            ("locatorNameHashes", &self.locator_names),
            ("dataSetHashes", &self.data_sets),
            ("unknownNameHashes", &self.unknowns),
        ] {
            if hashes.is_empty() {
                continue;
            }
            let output = input.with_file_name(format!("{file_name}_{suffix}.txt"));
            std::fs::write(&output, render(hashes))?;
            outputs.push(output);
        }

        Ok(outputs)
    }
}

fn render(hashes: &BTreeSet<u32>) -> String {
    let mut lines: Vec<String> = hashes.iter().map(u32::to_string).collect();
    lines.sort_unstable();

    let mut text = String::new();
    for line in &lines {
        // Writing to a String cannot fail
        let _ = writeln!(text, "{line}");
    }
    text
}
