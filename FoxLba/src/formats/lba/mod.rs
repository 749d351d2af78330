//! .lba locator array format
//!
//! Binary format for Fox Engine locator arrays: a header naming the record
//! count and the locator type, followed by fixed-size sections. Can be
//! converted to/from XML format.
//!
//! Layout (little-endian):
//!
//! | Section     | Present for   | Size                  |
//! |-------------|---------------|-----------------------|
//! | Header      | all           | 16                    |
//! | Transforms  | all           | count × 32            |
//! | Names       | Named, Ext.   | count × 4             |
//! | Data sets   | Named, Ext.   | count × 4             |
//! | Unknowns    | Extended      | count × 16            |
//!
//! Bytes after the last section are kept as an opaque trailer.

mod reader;
mod writer;

use std::fmt;

use crate::dictionary::HashDictionary;
use crate::error::{Error, Result};
use crate::hash::{HashValue, NameHash, PathHash};

pub use reader::{parse_lba_bytes, read_lba};
pub use writer::{serialize_lba, write_lba, write_lba_to};

/// Header size in bytes (count, type, 8 reserved bytes)
pub const HEADER_SIZE: usize = 16;

/// Size of one transform (translation + rotation, eight `f32`)
pub const TRANSFORM_SIZE: usize = 32;

/// Size of one hash field
pub const HASH_SIZE: usize = 4;

/// Number of auxiliary hashes on an extended locator
pub const UNKNOWN_HASH_COUNT: usize = 4;

/// File-level locator type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorType {
    /// Transform only.
    Minimal,
    /// Transform, locator name and data set.
    Named,
    /// Named plus four auxiliary name hashes.
    Extended,
}

impl LocatorType {
    /// All known types.
    pub const ALL: [LocatorType; 3] = [
        LocatorType::Minimal,
        LocatorType::Named,
        LocatorType::Extended,
    ];

    /// Decode the header discriminator.
    ///
    /// # Errors
    /// Returns [`Error::UnknownLocatorType`] for anything but 0, 2 and 3.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(LocatorType::Minimal),
            2 => Ok(LocatorType::Named),
            3 => Ok(LocatorType::Extended),
            other => Err(Error::UnknownLocatorType(other.to_string())),
        }
    }

    /// The header discriminator.
    #[must_use]
    pub fn raw(self) -> u32 {
        match self {
            LocatorType::Minimal => 0,
            LocatorType::Named => 2,
            LocatorType::Extended => 3,
        }
    }

    /// Name used in the XML mirror.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LocatorType::Minimal => "Minimal",
            LocatorType::Named => "Named",
            LocatorType::Extended => "Extended",
        }
    }

    /// Parse an XML type name.
    ///
    /// Accepts `Named`, `Type2` and `2` spellings (case-insensitive).
    ///
    /// # Errors
    /// Returns [`Error::UnknownLocatorType`] if nothing matches.
    pub fn from_name(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if let Ok(raw) = trimmed.parse::<u32>() {
            return Self::from_raw(raw);
        }
        let lower = trimmed.to_ascii_lowercase();
        if let Some(raw) = lower.strip_prefix("type").and_then(|n| n.parse::<u32>().ok()) {
            return Self::from_raw(raw);
        }
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownLocatorType(name.to_owned()))
    }

    /// Bytes per locator across all sections.
    #[must_use]
    pub fn record_size(self) -> usize {
        match self {
            LocatorType::Minimal => TRANSFORM_SIZE,
            LocatorType::Named => TRANSFORM_SIZE + 2 * HASH_SIZE,
            LocatorType::Extended => TRANSFORM_SIZE + (2 + UNKNOWN_HASH_COUNT) * HASH_SIZE,
        }
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Locator placement: translation `Vector4` and rotation quaternion.
///
/// Kept as raw `f32` so binary round-trips preserve every bit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    /// x, y, z, w
    pub translation: [f32; 4],
    /// x, y, z, w
    pub rotation: [f32; 4],
}

/// Locator with no hash fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MinimalLocator {
    pub transform: Transform,
}

/// Locator with a name and a data set.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedLocator {
    pub transform: Transform,
    pub locator_name: HashValue<NameHash>,
    pub data_set: HashValue<PathHash>,
}

/// Named locator with four auxiliary name hashes.
///
/// What the engine does with the auxiliary hashes is not known; they are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedLocator {
    pub transform: Transform,
    pub locator_name: HashValue<NameHash>,
    pub data_set: HashValue<PathHash>,
    pub unknowns: [HashValue<NameHash>; UNKNOWN_HASH_COUNT],
}

/// One record of a locator file.
#[derive(Debug, Clone, PartialEq)]
pub enum Locator {
    Minimal(MinimalLocator),
    Named(NamedLocator),
    Extended(ExtendedLocator),
}

impl Locator {
    /// The type this locator belongs to.
    #[must_use]
    pub fn locator_type(&self) -> LocatorType {
        match self {
            Locator::Minimal(_) => LocatorType::Minimal,
            Locator::Named(_) => LocatorType::Named,
            Locator::Extended(_) => LocatorType::Extended,
        }
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        match self {
            Locator::Minimal(l) => &l.transform,
            Locator::Named(l) => &l.transform,
            Locator::Extended(l) => &l.transform,
        }
    }

    /// Locator name, for types that have one.
    #[must_use]
    pub fn locator_name(&self) -> Option<&HashValue<NameHash>> {
        match self {
            Locator::Minimal(_) => None,
            Locator::Named(l) => Some(&l.locator_name),
            Locator::Extended(l) => Some(&l.locator_name),
        }
    }

    /// Data set, for types that have one.
    #[must_use]
    pub fn data_set(&self) -> Option<&HashValue<PathHash>> {
        match self {
            Locator::Minimal(_) => None,
            Locator::Named(l) => Some(&l.data_set),
            Locator::Extended(l) => Some(&l.data_set),
        }
    }

    /// Auxiliary hashes, for extended locators.
    #[must_use]
    pub fn unknowns(&self) -> Option<&[HashValue<NameHash>; UNKNOWN_HASH_COUNT]> {
        match self {
            Locator::Extended(l) => Some(&l.unknowns),
            _ => None,
        }
    }

    /// Attach dictionary literals to every hash field.
    ///
    /// Returns the number of hash fields that are resolved afterwards.
    pub fn resolve(&mut self, dictionary: &HashDictionary) -> usize {
        match self {
            Locator::Minimal(_) => 0,
            Locator::Named(l) => {
                usize::from(l.locator_name.resolve(dictionary))
                    + usize::from(l.data_set.resolve(dictionary))
            }
            Locator::Extended(l) => {
                let unknowns = l
                    .unknowns
                    .iter_mut()
                    .map(|u| usize::from(u.resolve(dictionary)))
                    .sum::<usize>();
                usize::from(l.locator_name.resolve(dictionary))
                    + usize::from(l.data_set.resolve(dictionary))
                    + unknowns
            }
        }
    }
}

/// A whole locator file: one type and an ordered list of locators.
#[derive(Debug, Clone, PartialEq)]
pub struct LbaFile {
    locator_type: LocatorType,
    locators: Vec<Locator>,
    /// Reserved header bytes, normally zero.
    pub header_padding: [u8; 8],
    /// Bytes after the last section, normally empty.
    pub trailer: Vec<u8>,
}

impl LbaFile {
    /// An empty file of the given type.
    #[must_use]
    pub fn new(locator_type: LocatorType) -> Self {
        Self {
            locator_type,
            locators: Vec::new(),
            header_padding: [0; 8],
            trailer: Vec::new(),
        }
    }

    /// Decode binary data, resolving hashes through `dictionary`.
    ///
    /// # Errors
    /// See [`parse_lba_bytes`].
    pub fn decode(data: &[u8], dictionary: &HashDictionary) -> Result<Self> {
        parse_lba_bytes(data, dictionary)
    }

    /// Encode to binary data.
    ///
    /// # Errors
    /// See [`serialize_lba`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        serialize_lba(self)
    }

    #[must_use]
    pub fn locator_type(&self) -> LocatorType {
        self.locator_type
    }

    #[must_use]
    pub fn locators(&self) -> &[Locator] {
        &self.locators
    }

    /// Mutable access to the locators, for editing hash fields in place.
    ///
    /// The encoder rejects locators whose variant no longer matches the file.
    pub fn locators_mut(&mut self) -> &mut [Locator] {
        &mut self.locators
    }

    /// Append a locator.
    ///
    /// # Errors
    /// Returns [`Error::LocatorTypeMismatch`] if its variant differs from the file's.
    pub fn push(&mut self, locator: Locator) -> Result<()> {
        check_type(self.locator_type, &locator)?;
        self.locators.push(locator);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Resolve every hash field through `dictionary`.
    ///
    /// Returns the number of resolved hash fields.
    pub fn resolve(&mut self, dictionary: &HashDictionary) -> usize {
        self.locators
            .iter_mut()
            .map(|locator| locator.resolve(dictionary))
            .sum()
    }
}

pub(crate) fn check_type(expected: LocatorType, locator: &Locator) -> Result<()> {
    let found = locator.locator_type();
    if found == expected {
        Ok(())
    } else {
        Err(Error::LocatorTypeMismatch {
            expected: expected.name(),
            found: found.name(),
        })
    }
}
