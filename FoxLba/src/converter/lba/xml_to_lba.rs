//! XML to LBA conversion

use crate::error::{Error, Result};
use crate::formats::lba::{
    self, ExtendedLocator, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator, Transform,
};
use crate::hash::{Domain, HashValue};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;

use super::{DATA_SET, LOCATOR, LOCATOR_NAME, ROOT, UNKNOWN_FIELDS, hash_attribute};

/// Convert XML file to .lba format
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_xml_to_lba<P: AsRef<Path>>(source: P, dest: P) -> Result<()> {
    tracing::info!(
        "Converting XML→LBA: {:?} → {:?}",
        source.as_ref(),
        dest.as_ref()
    );

    let content = fs::read_to_string(&source)?;
    let file = from_xml(&content)?;
    lba::write_lba(dest, &file)?;

    tracing::info!("Conversion complete ({} locators)", file.len());
    Ok(())
}

/// Parse XML string to `LbaFile`
///
/// # Errors
/// Returns [`Error::MissingXmlAttribute`] when the locator type requires an
/// attribute that is absent, [`Error::AmbiguousHash`] when a literal and its
/// numeric attribute disagree, [`Error::UnknownLocatorType`] for an unknown
/// `type`, [`Error::InvalidXmlValue`] for a second root or a locator outside
/// it, and XML errors for malformed documents.
pub fn from_xml(content: &str) -> Result<LbaFile> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut file: Option<LbaFile> = None;
    // Set once the root element has been closed
    let mut root_closed = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => start_element(&e, false, &mut file, &mut root_closed)?,
            Ok(Event::Empty(e)) => start_element(&e, true, &mut file, &mut root_closed)?,
            Ok(Event::End(e)) if e.name().as_ref() == ROOT.as_bytes() => {
                root_closed = true;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    file.ok_or(Error::MissingXmlAttribute {
        element: ROOT,
        attribute: "type",
    })
}

fn start_element(
    element: &BytesStart<'_>,
    empty: bool,
    file: &mut Option<LbaFile>,
    root_closed: &mut bool,
) -> Result<()> {
    match element.name().as_ref() {
        name if name == ROOT.as_bytes() => {
            if file.is_some() {
                return Err(invalid(ROOT, "second root element"));
            }
            *file = Some(parse_root(element)?);
            *root_closed = empty;
        }
        name if name == LOCATOR.as_bytes() => {
            if *root_closed {
                return Err(invalid(LOCATOR, "locator outside the root element"));
            }
            let file = file.as_mut().ok_or(Error::MissingXmlAttribute {
                element: ROOT,
                attribute: "type",
            })?;
            let attributes = Attributes::collect(element)?;
            let locator = parse_locator(file.locator_type(), &attributes)?;
            file.push(locator)?;
        }
        _ => {}
    }
    Ok(())
}

/// Attribute name/value pairs of one element, unescaped.
struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn collect(element: &BytesStart<'_>) -> Result<Self> {
        let mut pairs = Vec::new();
        for attr in element.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            pairs.push((key, value));
        }
        Ok(Self(pairs))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, element: &'static str, key: &'static str) -> Result<&str> {
        self.get(key).ok_or(Error::MissingXmlAttribute {
            element,
            attribute: key,
        })
    }
}

fn parse_root(element: &BytesStart<'_>) -> Result<LbaFile> {
    let attributes = Attributes::collect(element)?;
    let mut file = LbaFile::new(LocatorType::from_name(attributes.require(ROOT, "type")?)?);

    if let Some(encoded) = attributes.get("headerPadding") {
        let bytes = decode_base64("headerPadding", encoded)?;
        file.header_padding = bytes.try_into().map_err(|_| Error::InvalidXmlValue {
            attribute: "headerPadding".to_owned(),
            value: encoded.to_owned(),
        })?;
    }
    if let Some(encoded) = attributes.get("trailer") {
        file.trailer = decode_base64("trailer", encoded)?;
    }
    Ok(file)
}

fn parse_locator(locator_type: LocatorType, attributes: &Attributes) -> Result<Locator> {
    let transform = Transform {
        translation: parse_floats(attributes, "translation")?,
        rotation: parse_floats(attributes, "rotation")?,
    };

    Ok(match locator_type {
        LocatorType::Minimal => Locator::Minimal(MinimalLocator { transform }),
        LocatorType::Named => Locator::Named(NamedLocator {
            transform,
            locator_name: parse_hash(attributes, LOCATOR_NAME)?,
            data_set: parse_hash(attributes, DATA_SET)?,
        }),
        LocatorType::Extended => Locator::Extended(ExtendedLocator {
            transform,
            locator_name: parse_hash(attributes, LOCATOR_NAME)?,
            data_set: parse_hash(attributes, DATA_SET)?,
            unknowns: [
                parse_hash(attributes, UNKNOWN_FIELDS[0])?,
                parse_hash(attributes, UNKNOWN_FIELDS[1])?,
                parse_hash(attributes, UNKNOWN_FIELDS[2])?,
                parse_hash(attributes, UNKNOWN_FIELDS[3])?,
            ],
        }),
    })
}

/// Rebuild a hash field from its literal and/or numeric attribute.
fn parse_hash<D: Domain>(attributes: &Attributes, field: &'static str) -> Result<HashValue<D>> {
    let numeric_key = hash_attribute(field);
    let literal = attributes.get(field);
    let value = attributes
        .get(&numeric_key)
        .map(|raw| parse_u32(&numeric_key, raw))
        .transpose()?;

    match (literal, value) {
        (Some(literal), Some(value)) => {
            let hash = HashValue::<D>::from_literal(literal);
            if hash.value() == value {
                Ok(hash)
            } else {
                Err(Error::AmbiguousHash {
                    field,
                    literal: literal.to_owned(),
                    value,
                    expected: hash.value(),
                })
            }
        }
        (Some(literal), None) => Ok(HashValue::from_literal(literal)),
        (None, Some(value)) => Ok(HashValue::from_value(value)),
        (None, None) => Err(Error::MissingXmlAttribute {
            element: LOCATOR,
            attribute: numeric_attribute_name(field),
        }),
    }
}

/// Static name of a field's numeric attribute, for error reporting.
fn numeric_attribute_name(field: &'static str) -> &'static str {
    match field {
        LOCATOR_NAME => "locatorNameHash",
        DATA_SET => "dataSetHash",
        "unknown30" => "unknown30Hash",
        "unknown31" => "unknown31Hash",
        "unknown32" => "unknown32Hash",
        "unknown33" => "unknown33Hash",
        other => other,
    }
}

/// Decimal, or hexadecimal with a `0x` prefix.
fn parse_u32(attribute: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| invalid(attribute, raw))
}

fn parse_floats(attributes: &Attributes, key: &'static str) -> Result<[f32; 4]> {
    let raw = attributes.require(LOCATOR, key)?;
    let mut values = [0.0f32; 4];
    let mut parts = raw.split_whitespace();
    for value in &mut values {
        *value = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(|| invalid(key, raw))?;
    }
    if parts.next().is_some() {
        return Err(invalid(key, raw));
    }
    Ok(values)
}

fn decode_base64(attribute: &str, encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded.trim())
        .map_err(|_| invalid(attribute, encoded))
}

fn invalid(attribute: &str, value: &str) -> Error {
    Error::InvalidXmlValue {
        attribute: attribute.to_owned(),
        value: value.to_owned(),
    }
}
