//! File format handlers for Fox Engine locator data

pub mod lba;

// Re-export main document types
pub use lba::{
    ExtendedLocator, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator, Transform,
    read_lba, write_lba,
};
