//! `.lba` file writing

use super::{LbaFile, Locator, Transform, check_type};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a .lba file to disk
///
/// # Errors
/// Returns an error if file writing fails or the file is inconsistent
/// (see [`write_lba_to`]).
pub fn write_lba<P: AsRef<Path>>(path: P, file: &LbaFile) -> Result<()> {
    // Encode first so a bad file never truncates an existing one
    let bytes = serialize_lba(file)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Encode a locator file into a byte vector
///
/// # Errors
/// See [`write_lba_to`].
pub fn serialize_lba(file: &LbaFile) -> Result<Vec<u8>> {
    let size = super::HEADER_SIZE + file.len() * file.locator_type().record_size() + file.trailer.len();
    let mut bytes = Vec::with_capacity(size);
    write_lba_to(&mut bytes, file)?;
    Ok(bytes)
}

/// Encode a locator file into any writer
///
/// Hash fields are written from their values; a literal edited in memory has
/// already re-derived its value.
///
/// # Errors
/// Returns [`Error::LocatorTypeMismatch`] if a locator's variant differs from
/// the file's type, [`Error::TooManyLocators`] if the count overflows the
/// header, and [`Error::Io`] on write failure.
pub fn write_lba_to<W: Write>(writer: &mut W, file: &LbaFile) -> Result<()> {
    let locator_type = file.locator_type();
    for locator in file.locators() {
        check_type(locator_type, locator)?;
    }
    let count = u32::try_from(file.len()).map_err(|_| Error::TooManyLocators { count: file.len() })?;

    // Write header
    writer.write_u32::<LittleEndian>(count)?;
    writer.write_u32::<LittleEndian>(locator_type.raw())?;
    writer.write_all(&file.header_padding)?;

    for locator in file.locators() {
        write_transform(writer, locator.transform())?;
    }

    // Name and data set sections
    for locator in file.locators() {
        if let Some(name) = locator.locator_name() {
            writer.write_u32::<LittleEndian>(name.value())?;
        }
    }
    for locator in file.locators() {
        if let Some(data_set) = locator.data_set() {
            writer.write_u32::<LittleEndian>(data_set.value())?;
        }
    }

    // Auxiliary section
    for locator in file.locators() {
        if let Locator::Extended(extended) = locator {
            for unknown in &extended.unknowns {
                writer.write_u32::<LittleEndian>(unknown.value())?;
            }
        }
    }

    writer.write_all(&file.trailer)?;
    Ok(())
}

fn write_transform<W: Write>(writer: &mut W, transform: &Transform) -> Result<()> {
    for value in transform.translation.iter().chain(&transform.rotation) {
        writer.write_f32::<LittleEndian>(*value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{
        ExtendedLocator, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator, Transform,
        parse_lba_bytes,
    };
    use crate::dictionary::HashDictionary;
    use crate::error::Error;
    use crate::hash::{HashValue, str_code_32};

    fn transform(seed: f32) -> Transform {
        Transform {
            translation: [seed, seed + 1.5, -seed, 1.0],
            rotation: [0.0, 0.707_106_8, 0.0, 0.707_106_8],
        }
    }

    fn sample(locator_type: LocatorType, count: u32) -> LbaFile {
        let mut file = LbaFile::new(locator_type);
        for i in 0..count {
            let t = transform(f32::from(u16::try_from(i).unwrap()));
            let locator = match locator_type {
                LocatorType::Minimal => Locator::Minimal(MinimalLocator { transform: t }),
                LocatorType::Named => Locator::Named(NamedLocator {
                    transform: t,
                    locator_name: HashValue::from_value(0x1000 + i),
                    data_set: HashValue::from_value(0x2000 + i),
                }),
                LocatorType::Extended => Locator::Extended(ExtendedLocator {
                    transform: t,
                    locator_name: HashValue::from_value(0x1000 + i),
                    data_set: HashValue::from_value(0x2000 + i),
                    unknowns: [
                        HashValue::from_value(0x3000 + i),
                        HashValue::from_value(0x4000 + i),
                        HashValue::from_value(0x5000 + i),
                        HashValue::from_value(0x6000 + i),
                    ],
                }),
            };
            file.push(locator).unwrap();
        }
        file
    }

    #[test]
    fn test_round_trip_every_type() {
        let dictionary = HashDictionary::new();
        for locator_type in LocatorType::ALL {
            let bytes = sample(locator_type, 3).encode().unwrap();
            assert_eq!(bytes.len(), 16 + 3 * locator_type.record_size());

            let decoded = parse_lba_bytes(&bytes, &dictionary).unwrap();
            assert_eq!(decoded.locator_type(), locator_type);
            assert_eq!(decoded.encode().unwrap(), bytes);
        }
    }

    #[test]
    fn test_section_layout() {
        let bytes = sample(LocatorType::Named, 2).encode().unwrap();
        assert_eq!(&bytes[0..4], &2u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
        // Names follow both transforms, then data sets
        assert_eq!(&bytes[80..84], &0x1000u32.to_le_bytes());
        assert_eq!(&bytes[84..88], &0x1001u32.to_le_bytes());
        assert_eq!(&bytes[88..92], &0x2000u32.to_le_bytes());
        assert_eq!(&bytes[92..96], &0x2001u32.to_le_bytes());
    }

    #[test]
    fn test_padding_and_trailer_survive() {
        let mut file = sample(LocatorType::Extended, 1);
        file.header_padding = [1, 2, 3, 4, 5, 6, 7, 8];
        file.trailer = vec![0xAA, 0xBB];
        let bytes = file.encode().unwrap();

        let decoded = parse_lba_bytes(&bytes, &HashDictionary::new()).unwrap();
        assert_eq!(decoded.header_padding, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(decoded.trailer, vec![0xAA, 0xBB]);
        assert_eq!(decoded.encode().unwrap(), bytes);
    }

    #[test]
    fn test_nan_bits_survive() {
        let mut file = LbaFile::new(LocatorType::Minimal);
        let odd_nan = f32::from_bits(0x7FC0_1234);
        file.push(Locator::Minimal(MinimalLocator {
            transform: Transform {
                translation: [odd_nan, -0.0, 0.0, 1.0],
                rotation: [0.0; 4],
            },
        }))
        .unwrap();
        let bytes = file.encode().unwrap();
        let decoded = parse_lba_bytes(&bytes, &HashDictionary::new()).unwrap();
        assert_eq!(decoded.encode().unwrap(), bytes);
    }

    #[test]
    fn test_literal_edit_changes_only_its_field() {
        let original = sample(LocatorType::Named, 3).encode().unwrap();
        let mut file = parse_lba_bytes(&original, &HashDictionary::new()).unwrap();

        if let Locator::Named(named) = &mut file.locators_mut()[1] {
            named.locator_name.set_literal("weapon_02");
        }
        let edited = file.encode().unwrap();

        let name_offset = 16 + 3 * 32 + 4;
        assert_eq!(
            &edited[name_offset..name_offset + 4],
            &str_code_32("weapon_02").to_le_bytes()
        );
        assert_eq!(&edited[..name_offset], &original[..name_offset]);
        assert_eq!(&edited[name_offset + 4..], &original[name_offset + 4..]);
    }

    #[test]
    fn test_truncated_input() {
        let bytes = sample(LocatorType::Extended, 2).encode().unwrap();
        let err = parse_lba_bytes(&bytes[..bytes.len() - 1], &HashDictionary::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedLocatorData { expected: 128, actual: 127 }
        ));

        let err = parse_lba_bytes(&bytes[..10], &HashDictionary::new()).unwrap_err();
        assert!(matches!(err, Error::TruncatedLocatorData { .. }));
    }

    #[test]
    fn test_unknown_type() {
        let mut bytes = sample(LocatorType::Minimal, 0).encode().unwrap();
        bytes[4] = 1;
        let err = parse_lba_bytes(&bytes, &HashDictionary::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownLocatorType(_)));
    }

    #[test]
    fn test_mismatched_locator_rejected() {
        let mut file = sample(LocatorType::Named, 1);
        file.locators_mut()[0] = Locator::Minimal(MinimalLocator::default());
        assert!(matches!(
            file.encode().unwrap_err(),
            Error::LocatorTypeMismatch { .. }
        ));
    }
}
