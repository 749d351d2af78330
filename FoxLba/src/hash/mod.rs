//! Hash domains and hash values
//!
//! Locator files never store strings, only 32-bit string codes. Two disjoint
//! code domains are in use:
//!
//! - [`NameHash`] - `StrCode32` of the literal as-is (locator names)
//! - [`PathHash`] - `PathFileNameCode32` of a normalized path (data sets)
//!
//! A [`HashValue`] carries the code plus, once known, the literal that
//! produces it.

mod cityhash;
mod strcode;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::dictionary::HashDictionary;

pub use cityhash::{city_hash_64, city_hash_64_with_seeds};
pub use strcode::{normalize_path, path_file_name_code_32, str_code_32, str_code_64};

/// Runtime tag for a hash domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashDomain {
    /// `StrCode32` names.
    Name,
    /// `PathFileNameCode32` paths.
    Path,
}

impl HashDomain {
    /// Hash a literal under this domain.
    #[must_use]
    pub fn hash(self, literal: &str) -> u32 {
        match self {
            HashDomain::Name => str_code_32(literal),
            HashDomain::Path => path_file_name_code_32(literal),
        }
    }

    /// Short lowercase label, used in logs and config.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HashDomain::Name => "name",
            HashDomain::Path => "path",
        }
    }
}

impl fmt::Display for HashDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compile-time hash domain marker.
pub trait Domain: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// The runtime tag of this domain.
    const DOMAIN: HashDomain;
}

/// Marker for the `StrCode32` domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NameHash;

impl Domain for NameHash {
    const DOMAIN: HashDomain = HashDomain::Name;
}

/// Marker for the `PathFileNameCode32` domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PathHash;

impl Domain for PathHash {
    const DOMAIN: HashDomain = HashDomain::Path;
}

/// A 32-bit hash in domain `D`, optionally resolved to its literal.
///
/// `value` is the identity: equality, hashing and binary output use it alone.
/// A resolved literal always hashes to `value`, because every way of
/// attaching one either derives `value` from it or checks it against the
/// domain's hash function.
pub struct HashValue<D: Domain> {
    value: u32,
    resolved: Option<String>,
    _domain: PhantomData<D>,
}

impl<D: Domain> HashValue<D> {
    /// An unresolved hash, as read from binary data.
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        Self {
            value,
            resolved: None,
            _domain: PhantomData,
        }
    }

    /// A resolved hash, deriving the value from the literal.
    #[must_use]
    pub fn from_literal(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        Self {
            value: D::DOMAIN.hash(&literal),
            resolved: Some(literal),
            _domain: PhantomData,
        }
    }

    /// The runtime domain tag.
    #[must_use]
    pub fn domain(&self) -> HashDomain {
        D::DOMAIN
    }

    /// The hash value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The resolved literal, if any.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.resolved.as_deref()
    }

    /// Whether a literal is attached.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Replace the literal and re-derive the value from it.
    pub fn set_literal(&mut self, literal: impl Into<String>) {
        *self = Self::from_literal(literal);
    }

    /// Replace the value. The literal is kept only if it still hashes to it.
    pub fn set_value(&mut self, value: u32) {
        self.value = value;
        self.resolved = self
            .resolved
            .take()
            .filter(|literal| D::DOMAIN.hash(literal) == value);
    }

    /// Attach a literal from the dictionary when it knows this value.
    ///
    /// An entry whose literal does not hash back to this value is ignored.
    /// Returns `true` if the hash is resolved afterwards.
    pub fn resolve(&mut self, dictionary: &HashDictionary) -> bool {
        if self.resolved.is_none()
            && let Some(literal) = dictionary.lookup(D::DOMAIN, self.value)
            && D::DOMAIN.hash(literal) == self.value
        {
            self.resolved = Some(literal.to_owned());
        }
        self.resolved.is_some()
    }
}

impl<D: Domain> Clone for HashValue<D> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            resolved: self.resolved.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> fmt::Debug for HashValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashValue")
            .field("domain", &D::DOMAIN)
            .field("value", &self.value)
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl<D: Domain> fmt::Display for HashValue<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resolved {
            Some(literal) => f.write_str(literal),
            None => write!(f, "{}", self.value),
        }
    }
}

impl<D: Domain> PartialEq for HashValue<D> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<D: Domain> Eq for HashValue<D> {}

impl<D: Domain> Hash for HashValue<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<D: Domain> From<u32> for HashValue<D> {
    fn from(value: u32) -> Self {
        Self::from_value(value)
    }
}
