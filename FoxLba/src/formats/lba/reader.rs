//! `.lba` file reading and parsing

use super::{
    ExtendedLocator, HEADER_SIZE, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator,
    Transform, UNKNOWN_HASH_COUNT,
};
use crate::dictionary::HashDictionary;
use crate::error::{Error, Result};
use crate::hash::{Domain, HashValue};
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

/// Read a .lba file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, and the
/// errors of [`parse_lba_bytes`] for malformed content.
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_lba<P: AsRef<Path>>(path: P, dictionary: &HashDictionary) -> Result<LbaFile> {
    let data = fs::read(path)?;
    parse_lba_bytes(&data, dictionary)
}

/// Parse .lba data from bytes
///
/// Hash fields are read raw, then resolved through `dictionary`.
///
/// # Errors
///
/// Returns [`Error::UnknownLocatorType`] if the header type is not 0, 2 or 3.
/// Returns [`Error::TruncatedLocatorData`] if the data is shorter than the
/// header's count requires.
///
/// [`Error::UnknownLocatorType`]: crate::Error::UnknownLocatorType
/// [`Error::TruncatedLocatorData`]: crate::Error::TruncatedLocatorData
pub fn parse_lba_bytes(data: &[u8], dictionary: &HashDictionary) -> Result<LbaFile> {
    if data.len() < HEADER_SIZE {
        return Err(Error::TruncatedLocatorData {
            expected: HEADER_SIZE,
            actual: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);

    // Read header (16 bytes)
    let count = cursor.read_u32::<LittleEndian>()? as usize;
    let locator_type = LocatorType::from_raw(cursor.read_u32::<LittleEndian>()?)?;
    let mut header_padding = [0u8; 8];
    cursor.read_exact(&mut header_padding)?;

    let expected = count
        .checked_mul(locator_type.record_size())
        .and_then(|body| body.checked_add(HEADER_SIZE))
        .unwrap_or(usize::MAX);
    if data.len() < expected {
        return Err(Error::TruncatedLocatorData {
            expected,
            actual: data.len(),
        });
    }

    let transforms = (0..count)
        .map(|_| read_transform(&mut cursor))
        .collect::<Result<Vec<_>>>()?;

    let locators = match locator_type {
        LocatorType::Minimal => transforms
            .into_iter()
            .map(|transform| Locator::Minimal(MinimalLocator { transform }))
            .collect(),
        LocatorType::Named => {
            let names = read_hashes(&mut cursor, count)?;
            let data_sets = read_hashes(&mut cursor, count)?;
            transforms
                .into_iter()
                .zip(names)
                .zip(data_sets)
                .map(|((transform, locator_name), data_set)| {
                    Locator::Named(NamedLocator {
                        transform,
                        locator_name,
                        data_set,
                    })
                })
                .collect()
        }
        LocatorType::Extended => {
            let names = read_hashes(&mut cursor, count)?;
            let data_sets = read_hashes(&mut cursor, count)?;
            let mut unknowns = Vec::with_capacity(count);
            for _ in 0..count {
                let mut group = [0u32; UNKNOWN_HASH_COUNT];
                cursor.read_u32_into::<LittleEndian>(&mut group)?;
                unknowns.push(group.map(HashValue::from_value));
            }
            transforms
                .into_iter()
                .zip(names)
                .zip(data_sets)
                .zip(unknowns)
                .map(|(((transform, locator_name), data_set), unknowns)| {
                    Locator::Extended(ExtendedLocator {
                        transform,
                        locator_name,
                        data_set,
                        unknowns,
                    })
                })
                .collect()
        }
    };

    let mut trailer = Vec::new();
    cursor.read_to_end(&mut trailer)?;

    let mut file = LbaFile {
        locator_type,
        locators,
        header_padding,
        trailer,
    };
    let resolved = file.resolve(dictionary);
    tracing::debug!(
        "Parsed {} {} locators, {} hashes resolved",
        file.len(),
        locator_type,
        resolved
    );

    Ok(file)
}

fn read_transform(cursor: &mut Cursor<&[u8]>) -> Result<Transform> {
    let mut transform = Transform::default();
    cursor.read_f32_into::<LittleEndian>(&mut transform.translation)?;
    cursor.read_f32_into::<LittleEndian>(&mut transform.rotation)?;
    Ok(transform)
}

fn read_hashes<D: Domain>(cursor: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<HashValue<D>>> {
    let mut hashes = Vec::with_capacity(count);
    for _ in 0..count {
        hashes.push(HashValue::from_value(cursor.read_u32::<LittleEndian>()?));
    }
    Ok(hashes)
}
