//! Error types for `FoxLba`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `FoxLba` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== LBA Format Errors ====================
    /// The header names a locator type this library does not know.
    #[error("unknown locator type: {0}")]
    UnknownLocatorType(String),

    /// The byte stream ends before every section the header promises.
    #[error("truncated locator data: header promises {expected} bytes, found {actual}")]
    TruncatedLocatorData {
        /// Bytes required by the header's count and type.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// A locator does not match the file-level locator type.
    #[error("locator type mismatch: file is {expected}, locator is {found}")]
    LocatorTypeMismatch {
        /// The file's locator type.
        expected: &'static str,
        /// The offending locator's type.
        found: &'static str,
    },

    /// The locator count does not fit the 32-bit header field.
    #[error("too many locators: {count}")]
    TooManyLocators {
        /// The number of locators in the file.
        count: usize,
    },

    // ==================== XML Mirror Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingXmlAttribute {
        /// The element being parsed.
        element: &'static str,
        /// The missing attribute name.
        attribute: &'static str,
    },

    /// An attribute value could not be parsed.
    #[error("invalid value for '{attribute}': {value:?}")]
    InvalidXmlValue {
        /// The attribute name.
        attribute: String,
        /// The raw attribute text.
        value: String,
    },

    /// Both a literal and a numeric hash were given and they disagree.
    #[error(
        "ambiguous hash for '{field}': literal {literal:?} hashes to {expected}, but the numeric attribute says {value}"
    )]
    AmbiguousHash {
        /// The hash field name.
        field: &'static str,
        /// The literal attribute.
        literal: String,
        /// The numeric attribute.
        value: u32,
        /// The hash of the literal.
        expected: u32,
    },

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Batch / Config Errors ====================
    /// An input whose extension is neither `.lba` nor `.xml`.
    #[error("unrecognized input type: {}", path.display())]
    UnrecognizedExtension {
        /// The offending input.
        path: PathBuf,
    },

    /// Processing one input of a batch failed.
    #[error("failed on {}: {source}", path.display())]
    Batch {
        /// The input being processed.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: Box<Error>,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

// Add conversion from walkdir::Error
impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `FoxLba` operations.
pub type Result<T> = std::result::Result<T, Error>;
