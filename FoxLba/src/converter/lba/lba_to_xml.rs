//! LBA to XML conversion

use crate::dictionary::HashDictionary;
use crate::error::Result;
use crate::formats::lba::{self, LbaFile, Locator, Transform};
use crate::hash::{Domain, HashValue};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::path::Path;

use super::{DATA_SET, LOCATOR, LOCATOR_NAME, ROOT, UNKNOWN_FIELDS, hash_attribute};

/// Convert .lba file to XML format
///
/// # Errors
/// Returns an error if reading or conversion fails.
pub fn convert_lba_to_xml<P: AsRef<Path>>(
    source: P,
    dest: P,
    dictionary: &HashDictionary,
) -> Result<()> {
    tracing::info!(
        "Converting LBA→XML: {:?} → {:?}",
        source.as_ref(),
        dest.as_ref()
    );

    let file = lba::read_lba(&source, dictionary)?;
    let xml = to_xml(&file)?;
    std::fs::write(dest, xml)?;

    tracing::info!("Conversion complete ({} locators)", file.len());
    Ok(())
}

/// Convert `LbaFile` to XML string
///
/// Every hash field is written as a numeric `*Hash` attribute; its literal
/// follows only when resolved.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn to_xml(file: &LbaFile) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);

    // XML declaration
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    // <lba type="...">
    let mut root = BytesStart::new(ROOT);
    root.push_attribute(("type", file.locator_type().name()));
    if file.header_padding.iter().any(|&b| b != 0) {
        root.push_attribute(("headerPadding", STANDARD.encode(file.header_padding).as_str()));
    }
    if !file.trailer.is_empty() {
        root.push_attribute(("trailer", STANDARD.encode(&file.trailer).as_str()));
    }
    writer.write_event(Event::Start(root))?;

    for locator in file.locators() {
        writer.write_event(Event::Empty(locator_element(locator)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;

    let mut xml = String::from_utf8(output)?;
    // Add trailing newline
    xml.push('\n');
    Ok(xml)
}

fn locator_element(locator: &Locator) -> BytesStart<'static> {
    let mut element = BytesStart::new(LOCATOR);
    push_transform(&mut element, locator.transform());

    match locator {
        Locator::Minimal(_) => {}
        Locator::Named(named) => {
            push_hash(&mut element, LOCATOR_NAME, &named.locator_name);
            push_hash(&mut element, DATA_SET, &named.data_set);
        }
        Locator::Extended(extended) => {
            push_hash(&mut element, LOCATOR_NAME, &extended.locator_name);
            push_hash(&mut element, DATA_SET, &extended.data_set);
            for (field, unknown) in UNKNOWN_FIELDS.iter().zip(&extended.unknowns) {
                push_hash(&mut element, field, unknown);
            }
        }
    }
    element
}

fn push_transform(element: &mut BytesStart<'_>, transform: &Transform) {
    element.push_attribute(("translation", join_floats(&transform.translation).as_str()));
    element.push_attribute(("rotation", join_floats(&transform.rotation).as_str()));
}

fn push_hash<D: Domain>(element: &mut BytesStart<'_>, field: &str, hash: &HashValue<D>) {
    element.push_attribute((hash_attribute(field).as_str(), hash.value().to_string().as_str()));
    if let Some(literal) = hash.literal() {
        element.push_attribute((field, literal));
    }
}

/// Shortest text that parses back to the same `f32`.
fn join_floats(values: &[f32; 4]) -> String {
    values
        .iter()
        .map(f32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
