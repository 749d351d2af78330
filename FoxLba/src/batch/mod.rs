//! Batch processing of locator files
//!
//! Inputs are expanded (directories recursively, in file-name order), then
//! processed one at a time in argument order. Each file is classified by
//! extension alone:
//!
//! - `.lba` → decoded and written as `<name>.lba.xml`, or dumped as hash lists
//! - `.xml` → parsed and written as `<name>.lba`
//!
//! Outputs land next to their input.

mod hash_dump;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::converter::lba::{lba_from_xml, lba_to_xml_string};
use crate::dictionary::HashDictionary;
use crate::error::{Error, Result};
use crate::formats::lba;

pub use hash_dump::HashDump;

/// What to do when one input fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole batch at the first failure. Outputs already written stay.
    #[default]
    Abort,
    /// Log the failure and continue with the next input.
    Isolate,
}

/// How an input is handled, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `.lba` binary locators
    Lba,
    /// `.xml` mirror
    Xml,
}

impl InputKind {
    /// Classify a path by extension (case-insensitive).
    ///
    /// # Errors
    /// Returns [`Error::UnrecognizedExtension`] for any other extension.
    pub fn classify(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("lba") => Ok(InputKind::Lba),
            Some("xml") => Ok(InputKind::Xml),
            _ => Err(Error::UnrecognizedExtension {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Options for [`process_file`] and [`process_batch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Write hash dumps for `.lba` inputs instead of XML.
    pub output_hashes: bool,
    pub failure: FailurePolicy,
}

/// Progress information during batch processing
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Current input number (1-indexed)
    pub current: usize,
    /// Total number of inputs
    pub total: usize,
    /// The input being processed
    pub path: PathBuf,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Outputs written, in order.
    pub outputs: Vec<PathBuf>,
    /// Inputs processed without error.
    pub success_count: usize,
    /// Failed inputs, only populated under [`FailurePolicy::Isolate`].
    pub failures: Vec<(PathBuf, Error)>,
}

/// Expand files and directories into the list of files to process.
///
/// Files are kept in argument order; a directory contributes every file
/// beneath it regardless of extension, sorted by file name at each level.
/// Paths that do not exist are skipped with a warning.
///
/// # Errors
/// Returns [`Error::WalkDirError`] if a directory cannot be traversed.
pub fn expand_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            tracing::warn!("Skipping {:?}: not a file or directory", path);
        }
    }
    Ok(files)
}

/// Where the XML mirror of an `.lba` input goes: `a.lba` → `a.lba.xml`.
#[must_use]
pub fn xml_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}.lba.xml"))
}

/// Where the binary of an `.xml` input goes: `a.lba.xml` → `a.lba`.
#[must_use]
pub fn lba_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default();
    let stem = Path::new(stem).file_stem().unwrap_or(stem).to_string_lossy();
    input.with_file_name(format!("{stem}.lba"))
}

/// Process one input and return the outputs written.
///
/// # Errors
/// Returns [`Error::UnrecognizedExtension`] for unsupported inputs and any
/// decode, encode or IO error of the conversion.
pub fn process_file(
    path: &Path,
    dictionary: &HashDictionary,
    options: &BatchOptions,
) -> Result<Vec<PathBuf>> {
    match InputKind::classify(path)? {
        InputKind::Xml => {
            let content = std::fs::read_to_string(path)?;
            let file = lba_from_xml(&content)?;
            let output = lba_output_path(path);
            lba::write_lba(&output, &file)?;
            tracing::info!("{:?} → {:?} ({} locators)", path, output, file.len());
            Ok(vec![output])
        }
        InputKind::Lba => {
            let file = lba::read_lba(path, dictionary)?;
            if options.output_hashes {
                let outputs = HashDump::collect(&file).write(path)?;
                tracing::info!("{:?} → {} hash lists", path, outputs.len());
                Ok(outputs)
            } else {
                let output = xml_output_path(path);
                std::fs::write(&output, lba_to_xml_string(&file)?)?;
                tracing::info!("{:?} → {:?} ({} locators)", path, output, file.len());
                Ok(vec![output])
            }
        }
    }
}

/// Process inputs sequentially, in order.
///
/// # Errors
/// Under [`FailurePolicy::Abort`], returns [`Error::Batch`] naming the first
/// input that failed; nothing after it is processed.
pub fn process_batch<F>(
    inputs: &[PathBuf],
    dictionary: &HashDictionary,
    options: &BatchOptions,
    mut progress: F,
) -> Result<BatchResult>
where
    F: FnMut(&BatchProgress),
{
    let mut result = BatchResult::default();
    let total = inputs.len();

    for (index, path) in inputs.iter().enumerate() {
        progress(&BatchProgress {
            current: index + 1,
            total,
            path: path.clone(),
        });

        match process_file(path, dictionary, options) {
            Ok(outputs) => {
                result.outputs.extend(outputs);
                result.success_count += 1;
            }
            Err(err) => match options.failure {
                FailurePolicy::Abort => {
                    return Err(Error::Batch {
                        path: path.clone(),
                        source: Box::new(err),
                    });
                }
                FailurePolicy::Isolate => {
                    tracing::error!("Failed {:?}: {}", path, err);
                    result.failures.push((path.clone(), err));
                }
            },
        }
    }

    Ok(result)
}
