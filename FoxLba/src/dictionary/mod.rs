//! Hash dictionaries
//!
//! A dictionary is an offline word list, one literal per line. Every line is
//! hashed under its domain and the `(hash, literal)` pair is recorded, so a
//! hash read from a locator file can be turned back into its literal.
//!
//! Construction fans the lines out over the rayon pool into a shared table,
//! which is then frozen into a [`HashDictionary`] and only read afterwards.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::HashDomain;

/// How two different literals with the same hash are settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Whichever worker inserts last wins. Not reproducible across runs.
    #[default]
    Unordered,
    /// The lexicographically smallest literal wins.
    Lexicographic,
}

/// Frozen hash → literal tables, one per domain.
#[derive(Debug, Clone, Default)]
pub struct HashDictionary {
    names: HashMap<u32, String>,
    paths: HashMap<u32, String>,
}

impl HashDictionary {
    /// A dictionary where every lookup misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load both word lists.
    ///
    /// A list that is not given, or does not exist, leaves its domain empty
    /// and logs a warning; it is not an error.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if a word list exists but cannot be read.
    ///
    /// [`Error::Io`]: crate::Error::Io
    pub fn load(
        name_list: Option<&Path>,
        path_list: Option<&Path>,
        policy: CollisionPolicy,
    ) -> Result<Self> {
        Ok(Self {
            names: load_or_empty(HashDomain::Name, name_list, policy)?,
            paths: load_or_empty(HashDomain::Path, path_list, policy)?,
        })
    }

    /// Build a dictionary from in-memory literals.
    #[must_use]
    pub fn from_literals(names: &[&str], paths: &[&str]) -> Self {
        let owned = |literals: &[&str]| -> Vec<String> {
            literals.iter().map(|&l| l.to_owned()).collect()
        };
        Self {
            names: build_table(HashDomain::Name, owned(names), CollisionPolicy::Unordered),
            paths: build_table(HashDomain::Path, owned(paths), CollisionPolicy::Unordered),
        }
    }

    /// Assemble a dictionary from prebuilt tables.
    ///
    /// Entries are not rehashed here; [`HashValue::resolve`] skips any whose
    /// literal does not hash to its key.
    ///
    /// [`HashValue::resolve`]: crate::hash::HashValue::resolve
    #[must_use]
    pub fn from_tables(names: HashMap<u32, String>, paths: HashMap<u32, String>) -> Self {
        Self { names, paths }
    }

    /// Look up the literal for `hash` in `domain`.
    #[must_use]
    pub fn lookup(&self, domain: HashDomain, hash: u32) -> Option<&str> {
        self.table(domain).get(&hash).map(String::as_str)
    }

    /// The frozen table for `domain`.
    #[must_use]
    pub fn table(&self, domain: HashDomain) -> &HashMap<u32, String> {
        match domain {
            HashDomain::Name => &self.names,
            HashDomain::Path => &self.paths,
        }
    }

    /// Number of entries for `domain`.
    #[must_use]
    pub fn len(&self, domain: HashDomain) -> usize {
        self.table(domain).len()
    }

    /// Whether both domains are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.paths.is_empty()
    }
}

/// Read a word list and hash every line under `domain`.
///
/// Lines end at `\n` or `\r\n`; blank lines are skipped.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read or is not UTF-8.
///
/// [`Error::Io`]: crate::Error::Io
pub fn build<P: AsRef<Path>>(
    domain: HashDomain,
    word_list: P,
    policy: CollisionPolicy,
) -> Result<HashMap<u32, String>> {
    let content = fs::read_to_string(word_list.as_ref())?;
    let literals: Vec<String> = content.lines().map(str::to_owned).collect();
    let table = build_table(domain, literals, policy);

    tracing::info!(
        "Loaded {} {} hashes from {:?}",
        table.len(),
        domain,
        word_list.as_ref()
    );
    Ok(table)
}

/// Hash `literals` in parallel into a table for `domain`.
#[must_use]
pub fn build_table(
    domain: HashDomain,
    literals: Vec<String>,
    policy: CollisionPolicy,
) -> HashMap<u32, String> {
    let table = Mutex::new(HashMap::with_capacity(literals.len()));
    let collisions = AtomicUsize::new(0);

    literals
        .into_par_iter()
        .filter(|literal| !literal.is_empty())
        .for_each(|literal| {
            let hash = domain.hash(&literal);
            let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
            match table.entry(hash) {
                Entry::Vacant(slot) => {
                    slot.insert(literal);
                }
                Entry::Occupied(mut slot) => {
                    if *slot.get() == literal {
                        return;
                    }
                    collisions.fetch_add(1, Ordering::Relaxed);
                    let replace = match policy {
                        CollisionPolicy::Unordered => true,
                        CollisionPolicy::Lexicographic => literal < *slot.get(),
                    };
                    if replace {
                        slot.insert(literal);
                    }
                }
            }
        });

    let collisions = collisions.load(Ordering::Relaxed);
    if collisions > 0 {
        tracing::debug!("{collisions} {domain} hash collisions settled by {policy:?}");
    }

    table.into_inner().unwrap_or_else(PoisonError::into_inner)
}

fn load_or_empty(
    domain: HashDomain,
    word_list: Option<&Path>,
    policy: CollisionPolicy,
) -> Result<HashMap<u32, String>> {
    let Some(word_list) = word_list else {
        return Ok(HashMap::new());
    };

    match build(domain, word_list, policy) {
        Ok(table) => Ok(table),
        Err(crate::Error::Io(err)) if err.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                "{} dictionary not found: {:?}; {} hashes stay numeric",
                domain,
                word_list,
                domain
            );
            Ok(HashMap::new())
        }
        Err(err) => Err(err),
    }
}
