//! LBA and XML locator format conversions
//!
//! Handles conversions between the two locator representations:
//! - LBA (binary) - Compact locator arrays read by the engine
//! - XML - Human-readable mirror for editing, one `<locator>` per record

mod lba_to_xml;
mod xml_to_lba;

pub use lba_to_xml::{convert_lba_to_xml, to_xml as lba_to_xml_string};
pub use xml_to_lba::{convert_xml_to_lba, from_xml as lba_from_xml};

const ROOT: &str = "lba";
const LOCATOR: &str = "locator";
const LOCATOR_NAME: &str = "locatorName";
const DATA_SET: &str = "dataSet";
const UNKNOWN_FIELDS: [&str; 4] = ["unknown30", "unknown31", "unknown32", "unknown33"];

/// Numeric attribute paired with a literal attribute (`dataSet` → `dataSetHash`).
fn hash_attribute(field: &str) -> String {
    format!("{field}Hash")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::HashDictionary;
    use crate::error::Error;
    use crate::formats::lba::{
        ExtendedLocator, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator, Transform,
    };
    use crate::hash::{HashValue, path_file_name_code_32, str_code_32};
    use pretty_assertions::assert_eq;

    fn named_file(name: HashValue<crate::hash::NameHash>) -> LbaFile {
        let mut file = LbaFile::new(LocatorType::Named);
        file.push(Locator::Named(NamedLocator {
            transform: Transform {
                translation: [1.0, -2.5, 3.25, 1.0],
                rotation: [0.0, 0.0, 0.0, 1.0],
            },
            locator_name: name,
            data_set: HashValue::from_value(17),
        }))
        .unwrap();
        file
    }

    #[test]
    fn test_unresolved_hash_is_numeric_only() {
        let xml = lba_to_xml_string(&named_file(HashValue::from_value(0xDEADBEEF))).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <lba type=\"Named\">\n\
             \t<locator translation=\"1 -2.5 3.25 1\" rotation=\"0 0 0 1\" locatorNameHash=\"3735928559\" dataSetHash=\"17\"/>\n\
             </lba>\n"
        );
    }

    #[test]
    fn test_resolved_hash_carries_literal() {
        let bytes = named_file(HashValue::from_value(str_code_32("weapon_01")))
            .encode()
            .unwrap();
        let dictionary = HashDictionary::from_literals(&["weapon_01"], &[]);
        let file = LbaFile::decode(&bytes, &dictionary).unwrap();

        let xml = lba_to_xml_string(&file).unwrap();
        assert!(xml.contains(&format!(
            "locatorNameHash=\"{}\" locatorName=\"weapon_01\"",
            str_code_32("weapon_01")
        )));
    }

    #[test]
    fn test_edited_literal_rehashes() {
        let xml = "<lba type=\"Named\"><locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\" \
                   locatorName=\"weapon_02\" dataSetHash=\"5\"/></lba>";
        let file = lba_from_xml(xml).unwrap();
        let name = file.locators()[0].locator_name().unwrap();
        assert_eq!(name.value(), str_code_32("weapon_02"));
        assert_eq!(file.locators()[0].data_set().unwrap().literal(), None);
    }

    #[test]
    fn test_conflicting_literal_and_value() {
        let xml = "<lba type=\"Named\"><locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\" \
                   locatorNameHash=\"1\" locatorName=\"weapon_02\" dataSetHash=\"5\"/></lba>";
        let err = lba_from_xml(xml).unwrap_err();
        assert!(matches!(err, Error::AmbiguousHash { field: "locatorName", value: 1, .. }));
    }

    #[test]
    fn test_missing_hash_attribute() {
        let xml = "<lba type=\"Named\"><locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\" \
                   locatorNameHash=\"1\"/></lba>";
        let err = lba_from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingXmlAttribute { attribute: "dataSetHash", .. }
        ));
    }

    #[test]
    fn test_missing_transform() {
        let xml = "<lba type=\"Minimal\"><locator rotation=\"0 0 0 1\"/></lba>";
        let err = lba_from_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingXmlAttribute { attribute: "translation", .. }
        ));
    }

    #[test]
    fn test_unknown_root_type() {
        let err = lba_from_xml("<lba type=\"Type1\"/>").unwrap_err();
        assert!(matches!(err, Error::UnknownLocatorType(_)));
    }

    #[test]
    fn test_extended_round_trip_through_xml() {
        let mut file = LbaFile::new(LocatorType::Extended);
        file.header_padding = [0, 0, 0, 0, 9, 0, 0, 0];
        file.trailer = vec![1, 2, 3];
        file.push(Locator::Extended(ExtendedLocator {
            transform: Transform {
                translation: [0.1, 1e-7, -0.0, 123456.79],
                rotation: [0.70710677, 0.0, 0.0, 0.70710677],
            },
            locator_name: HashValue::from_literal("gate <A> & \"B\""),
            data_set: HashValue::from_literal("/Assets/tpp/a.fox2"),
            unknowns: [
                HashValue::from_value(0),
                HashValue::from_literal("aux"),
                HashValue::from_value(u32::MAX),
                HashValue::from_value(42),
            ],
        }))
        .unwrap();

        let xml = lba_to_xml_string(&file).unwrap();
        let parsed = lba_from_xml(&xml).unwrap();
        assert_eq!(parsed.encode().unwrap(), file.encode().unwrap());
        assert_eq!(
            parsed.locators()[0].locator_name().unwrap().literal(),
            Some("gate <A> & \"B\"")
        );
        assert_eq!(
            parsed.locators()[0].data_set().unwrap().value(),
            path_file_name_code_32("/Assets/tpp/a")
        );
    }

    #[test]
    fn test_minimal_has_no_hash_attributes() {
        let mut file = LbaFile::new(LocatorType::Minimal);
        file.push(Locator::Minimal(MinimalLocator::default())).unwrap();
        let xml = lba_to_xml_string(&file).unwrap();
        assert!(!xml.contains("Hash"));
        assert_eq!(lba_from_xml(&xml).unwrap(), file);
    }

    #[test]
    fn test_empty_file() {
        let file = LbaFile::new(LocatorType::Named);
        let xml = lba_to_xml_string(&file).unwrap();
        let parsed = lba_from_xml(&xml).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.locator_type(), LocatorType::Named);
    }

    #[test]
    fn test_second_root_rejected() {
        let xml = "<lba type=\"Minimal\"><locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\"/></lba>\
                   <lba type=\"Named\"/>";
        let err = lba_from_xml(xml).unwrap_err();
        assert!(matches!(err, Error::InvalidXmlValue { ref attribute, .. } if attribute == "lba"));
    }

    #[test]
    fn test_locator_after_root_rejected() {
        let xml = "<lba type=\"Minimal\"></lba>\
                   <locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\"/>";
        let err = lba_from_xml(xml).unwrap_err();
        assert!(matches!(err, Error::InvalidXmlValue { ref attribute, .. } if attribute == "locator"));

        let xml = "<lba type=\"Minimal\"/><locator translation=\"0 0 0 1\" rotation=\"0 0 0 1\"/>";
        assert!(lba_from_xml(xml).is_err());
    }
}
