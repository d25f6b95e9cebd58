//! Deterministic resume identifiers.
//!
//! The id is `resume_` + base36 of a 32-bit rolling hash over
//! `"{file_name}_{first 100 UTF-16 units of content}"`. Uploads sharing a file name
//! and content prefix get the same id; the id is not unique and not a digest.

const CONTENT_PREFIX_UNITS: usize = 100;

/// `hash = hash * 31 + unit`, wrapped to a signed 32-bit integer, over UTF-16 units.
fn rolling_hash(units: impl Iterator<Item = u16>) -> i32 {
    units.fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Base36 of the absolute rolling hash.
fn stable_id(units: impl Iterator<Item = u16>) -> String {
    to_base36(i64::from(rolling_hash(units)).unsigned_abs())
}

pub fn generate_resume_id(file_name: &str, content: &str) -> String {
    let units = file_name
        .encode_utf16()
        .chain("_".encode_utf16())
        .chain(content.encode_utf16().take(CONTENT_PREFIX_UNITS));
    format!("resume_{}", stable_id(units))
}
