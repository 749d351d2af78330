//! Format conversion utilities
//!
//! This module handles conversions between the locator representations:
//! - LBA (binary) ↔ XML - Locator arrays and their editable mirror

pub mod lba;

// LBA conversion exports
pub use lba::{convert_lba_to_xml, convert_xml_to_lba, lba_from_xml, lba_to_xml_string};
