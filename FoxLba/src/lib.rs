#![allow(non_snake_case)]
//! # FoxLba
//!
//! A pure-Rust library for Fox Engine locator arrays (`.lba`), the binary
//! files that place named transforms in Metal Gear Solid V levels.
//!
//! ## Features
//!
//! - **Binary codec** - decode and encode all three locator layouts
//!   (minimal, named, extended), preserving reserved and trailing bytes
//! - **XML mirror** - an editable text form with resolved hash literals
//! - **Hash resolution** - StrCode32 name hashes and path hashes, looked up
//!   in word-list dictionaries
//! - **Batch driver** - directory expansion, extension dispatch and hash dumps
//!
//! ## Quick Start
//!
//! ### Converting Locator Files
//!
//! ```no_run
//! use foxlba::converter::{convert_lba_to_xml, convert_xml_to_lba};
//! use foxlba::dictionary::{CollisionPolicy, HashDictionary};
//! use std::path::Path;
//!
//! let dictionary = HashDictionary::load(
//!     Some(Path::new("lba_name_dictionary.txt")),
//!     Some(Path::new("lba_path_dictionary.txt")),
//!     CollisionPolicy::Unordered,
//! )?;
//!
//! convert_lba_to_xml("mission.lba", "mission.lba.xml", &dictionary)?;
//! convert_xml_to_lba("mission.lba.xml", "mission.lba")?;
//! # Ok::<(), foxlba::Error>(())
//! ```
//!
//! ### Hashing Literals
//!
//! ```
//! use foxlba::prelude::*;
//!
//! let mut name = HashValue::<NameHash>::from_literal("weapon_01");
//! assert_eq!(name.value(), str_code_32("weapon_01"));
//!
//! name.set_literal("weapon_02");
//! assert_eq!(name.value(), str_code_32("weapon_02"));
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `foxlba` command-line binary

pub mod batch;
pub mod config;
pub mod converter;
pub mod dictionary;
pub mod error;
pub mod formats;
pub mod hash;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::hash::{
        HashDomain, HashValue, NameHash, PathHash, path_file_name_code_32, str_code_32,
    };
    pub use crate::dictionary::{CollisionPolicy, HashDictionary};
    pub use crate::formats::lba::{
        ExtendedLocator, LbaFile, Locator, LocatorType, MinimalLocator, NamedLocator, Transform,
    };
    pub use crate::converter::{lba_from_xml, lba_to_xml_string};
    pub use crate::batch::{BatchOptions, FailurePolicy, HashDump, process_batch};
    pub use crate::config::Config;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
