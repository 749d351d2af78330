//! `CityHash64` (v1.0 series), the primitive under every Fox Engine string code
//!
//! Only the 64-bit entry points the engine uses are provided. All arithmetic
//! is modulo 2^64.

#![allow(clippy::cast_possible_truncation)]

use byteorder::{ByteOrder, LittleEndian};

const K0: u64 = 0xc3a5c85c97cb3127;
const K1: u64 = 0xb492b66be98c7c2f;
const K2: u64 = 0x9ae16a3b2f90404f;
const K3: u64 = 0xc949d7c7509e6557;
const K_MUL: u64 = 0x9ddfea08eb382d69;

#[inline]
fn fetch64(s: &[u8], offset: usize) -> u64 {
    LittleEndian::read_u64(&s[offset..offset + 8])
}

#[inline]
fn fetch32(s: &[u8], offset: usize) -> u64 {
    u64::from(LittleEndian::read_u32(&s[offset..offset + 4]))
}

#[inline]
fn shift_mix(val: u64) -> u64 {
    val ^ (val >> 47)
}

/// Murmur-inspired 128 → 64 bit fold.
#[inline]
fn hash_len_16(u: u64, v: u64) -> u64 {
    let mut a = (u ^ v).wrapping_mul(K_MUL);
    a ^= a >> 47;
    let mut b = (v ^ a).wrapping_mul(K_MUL);
    b ^= b >> 47;
    b.wrapping_mul(K_MUL)
}

fn hash_len_0_to_16(s: &[u8]) -> u64 {
    let len = s.len();
    if len > 8 {
        let a = fetch64(s, 0);
        let b = fetch64(s, len - 8);
        return hash_len_16(a, b.wrapping_add(len as u64).rotate_right(len as u32)) ^ b;
    }
    if len >= 4 {
        let a = fetch32(s, 0);
        return hash_len_16((len as u64).wrapping_add(a << 3), fetch32(s, len - 4));
    }
    if len > 0 {
        let a = u32::from(s[0]);
        let b = u32::from(s[len >> 1]);
        let c = u32::from(s[len - 1]);
        let y = a.wrapping_add(b << 8);
        let z = (len as u32).wrapping_add(c << 2);
        return shift_mix(u64::from(y).wrapping_mul(K2) ^ u64::from(z).wrapping_mul(K3))
            .wrapping_mul(K2);
    }
    K2
}

fn hash_len_17_to_32(s: &[u8]) -> u64 {
    let len = s.len();
    let a = fetch64(s, 0).wrapping_mul(K1);
    let b = fetch64(s, 8);
    let c = fetch64(s, len - 8).wrapping_mul(K2);
    let d = fetch64(s, len - 16).wrapping_mul(K0);
    hash_len_16(
        a.wrapping_sub(b)
            .rotate_right(43)
            .wrapping_add(c.rotate_right(30))
            .wrapping_add(d),
        a.wrapping_add((b ^ K3).rotate_right(20))
            .wrapping_sub(c)
            .wrapping_add(len as u64),
    )
}

/// Returns a 16-byte hash for 48 bytes of state.
#[inline]
fn weak_hash_len_32_with_seeds_raw(w: u64, x: u64, y: u64, z: u64, a: u64, b: u64) -> (u64, u64) {
    let mut a = a.wrapping_add(w);
    let mut b = b.wrapping_add(a).wrapping_add(z).rotate_right(21);
    let c = a;
    a = a.wrapping_add(x);
    a = a.wrapping_add(y);
    b = b.wrapping_add(a.rotate_right(44));
    (a.wrapping_add(z), b.wrapping_add(c))
}

#[inline]
fn weak_hash_len_32_with_seeds(s: &[u8], offset: usize, a: u64, b: u64) -> (u64, u64) {
    weak_hash_len_32_with_seeds_raw(
        fetch64(s, offset),
        fetch64(s, offset + 8),
        fetch64(s, offset + 16),
        fetch64(s, offset + 24),
        a,
        b,
    )
}

fn hash_len_33_to_64(s: &[u8]) -> u64 {
    let len = s.len();
    let mut z = fetch64(s, 24);
    let mut a = fetch64(s, 0).wrapping_add(
        (len as u64)
            .wrapping_add(fetch64(s, len - 16))
            .wrapping_mul(K0),
    );
    let mut b = a.wrapping_add(z).rotate_right(52);
    let mut c = a.rotate_right(37);
    a = a.wrapping_add(fetch64(s, 8));
    c = c.wrapping_add(a.rotate_right(7));
    a = a.wrapping_add(fetch64(s, 16));
    let vf = a.wrapping_add(z);
    let vs = b.wrapping_add(a.rotate_right(31)).wrapping_add(c);

    a = fetch64(s, 16).wrapping_add(fetch64(s, len - 32));
    z = fetch64(s, len - 8);
    b = a.wrapping_add(z).rotate_right(52);
    c = a.rotate_right(37);
    a = a.wrapping_add(fetch64(s, len - 24));
    c = c.wrapping_add(a.rotate_right(7));
    a = a.wrapping_add(fetch64(s, len - 16));
    let wf = a.wrapping_add(z);
    let ws = b.wrapping_add(a.rotate_right(31)).wrapping_add(c);

    let r = shift_mix(
        vf.wrapping_add(ws)
            .wrapping_mul(K2)
            .wrapping_add(wf.wrapping_add(vs).wrapping_mul(K0)),
    );
    shift_mix(r.wrapping_mul(K0).wrapping_add(vs)).wrapping_mul(K2)
}

/// `CityHash64` of `s`.
#[must_use]
pub fn city_hash_64(s: &[u8]) -> u64 {
    let len = s.len();
    if len <= 32 {
        if len <= 16 {
            return hash_len_0_to_16(s);
        }
        return hash_len_17_to_32(s);
    } else if len <= 64 {
        return hash_len_33_to_64(s);
    }

    // For strings over 64 bytes we hash the end first, then loop over
    // 64-byte chunks keeping 56 bytes of state: v, w, x, y and z.
    let mut x = fetch64(s, len - 40);
    let mut y = fetch64(s, len - 16).wrapping_add(fetch64(s, len - 56));
    let mut z = hash_len_16(
        fetch64(s, len - 48).wrapping_add(len as u64),
        fetch64(s, len - 24),
    );
    let mut v = weak_hash_len_32_with_seeds(s, len - 64, len as u64, z);
    let mut w = weak_hash_len_32_with_seeds(s, len - 32, y.wrapping_add(K1), x);
    x = x.wrapping_mul(K1).wrapping_add(fetch64(s, 0));

    let mut remaining = (len - 1) & !63;
    let mut offset = 0;
    loop {
        x = x
            .wrapping_add(y)
            .wrapping_add(v.0)
            .wrapping_add(fetch64(s, offset + 8))
            .rotate_right(37)
            .wrapping_mul(K1);
        y = y
            .wrapping_add(v.1)
            .wrapping_add(fetch64(s, offset + 48))
            .rotate_right(42)
            .wrapping_mul(K1);
        x ^= w.1;
        y ^= v.0;
        z = (z ^ w.0).rotate_right(33);
        v = weak_hash_len_32_with_seeds(s, offset, v.1.wrapping_mul(K1), x.wrapping_add(w.0));
        w = weak_hash_len_32_with_seeds(s, offset + 32, z.wrapping_add(w.1), y);
        std::mem::swap(&mut z, &mut x);
        offset += 64;
        remaining -= 64;
        if remaining == 0 {
            break;
        }
    }

    hash_len_16(
        hash_len_16(v.0, w.0)
            .wrapping_add(shift_mix(y).wrapping_mul(K1))
            .wrapping_add(z),
        hash_len_16(v.1, w.1).wrapping_add(x),
    )
}

/// `CityHash64WithSeeds` of `s`.
#[must_use]
pub fn city_hash_64_with_seeds(s: &[u8], seed0: u64, seed1: u64) -> u64 {
    hash_len_16(city_hash_64(s).wrapping_sub(seed0), seed1)
}

/// The first seed every Fox Engine string code uses.
pub(crate) const STR_CODE_SEED0: u64 = K2;

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn test_empty_input_is_k2() {
        assert_eq!(city_hash_64(&[]), K2);
    }

    // Regression pins, cross-checked against a separate script port of
    // CityHash v1.0.3, not against Google's published table.
    #[test]
    fn test_every_length_branch() {
        let expected: [(usize, u64); 14] = [
            (1, 0x5068a5b3d87a0284),
            (3, 0xf6aa543ca4b8bf14),
            (4, 0x9dd33b80b9fa6393),
            (7, 0x0e1bc1022a1b992c),
            (8, 0x37fed2dba3a300e3),
            (9, 0x29b1ff616f22d6f6),
            (16, 0xbdf5bcbc9b4603a4),
            (17, 0x0b6fa30ba1cd0a9c),
            (32, 0x5e75abd87864928b),
            (33, 0xef04fa08e8e5b8fb),
            (64, 0xc1515868c51fc399),
            (65, 0x233b40ebb9b0d5c5),
            (128, 0x526a9223b17329df),
            (200, 0x657e1910ca23825b),
        ];
        for (len, hash) in expected {
            assert_eq!(city_hash_64(&pattern(len)), hash, "length {len}");
        }
    }

    #[test]
    fn test_seeds_change_result() {
        let data = pattern(20);
        assert_ne!(
            city_hash_64_with_seeds(&data, STR_CODE_SEED0, 1),
            city_hash_64_with_seeds(&data, STR_CODE_SEED0, 2)
        );
    }
}
