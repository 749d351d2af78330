//! Fox Engine string codes
//!
//! `StrCode32` names locators, `PathFileNameCode32` names data set files.
//! Both are the low bits of a seeded `CityHash64` over the literal plus its
//! NUL terminator.

#![allow(clippy::cast_possible_truncation)]

use std::borrow::Cow;

use super::cityhash::{STR_CODE_SEED0, city_hash_64_with_seeds};

/// Mask applied by the engine to every 64-bit string code.
const STR_CODE_64_MASK: u64 = 0xFFFF_FFFF_FFFF;

/// 48-bit `StrCode64` of a literal, hashed as-is.
#[must_use]
pub fn str_code_64(literal: &str) -> u64 {
    let bytes = literal.as_bytes();
    let seed1 = match bytes.first() {
        Some(&first) => (u64::from(first) << 16).wrapping_add(bytes.len() as u64),
        None => 0,
    };

    let mut terminated = Vec::with_capacity(bytes.len() + 1);
    terminated.extend_from_slice(bytes);
    terminated.push(0);

    city_hash_64_with_seeds(&terminated, STR_CODE_SEED0, seed1) & STR_CODE_64_MASK
}

/// `StrCode32`: the name-hash domain.
#[must_use]
pub fn str_code_32(literal: &str) -> u32 {
    str_code_64(literal) as u32
}

/// `PathFileNameCode32`: the path-hash domain.
///
/// The literal is normalized with [`normalize_path`] first.
#[must_use]
pub fn path_file_name_code_32(literal: &str) -> u32 {
    str_code_32(&normalize_path(literal))
}

/// Normalize a file path the way the engine does before hashing it.
///
/// Backslashes become forward slashes and the extension is dropped, starting
/// at the first `.` of the final path component (`a.fox2`, `a.lba.xml` both
/// become `a`). Case is preserved.
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let path: Cow<'_, str> = if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    };

    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].find('.') {
        Some(dot) => {
            let end = name_start + dot;
            match path {
                Cow::Borrowed(p) => Cow::Borrowed(&p[..end]),
                Cow::Owned(mut p) => {
                    p.truncate(end);
                    Cow::Owned(p)
                }
            }
        }
        None => path,
    }
}
