//! Compact class-name codec.
//!
//! Class tokens are concatenations of *units*. A unit is either an ordinal
//! or a hash:
//!
//! | Unit | Shape | Example |
//! |------|-------|---------|
//! | ordinal `n < 62` | one alphabet symbol | `a`, `Z`, `7` |
//! | ordinal `n >= 62` | `n / 62` escapes, then `n % 62` | `_a` (62), `__g` (130) |
//! | hash | `-` marker, base-62 digits, `-` marker | `-b3Xq1-` |
//!
//! Every unit is prefix-decodable, so a token can be split back into its
//! parts without a side table. A token is laid out as
//! `[property][conditions...][value]`; the property unit always comes first
//! and acts as the merge key.

use xxhash_rust::xxh3::xxh3_64;

/// Symbols used for ordinal units, in ordinal order.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Prefix extending an ordinal unit by another 62 values.
pub const ESCAPE: u8 = b'_';

/// Marker opening and closing a hashed unit.
pub const HASH_MARKER: u8 = b'-';

const RADIX: usize = ALPHABET.len();

/// Appends the unit for `ordinal` to `out`.
pub fn push_ordinal(out: &mut String, ordinal: usize) {
    for _ in 0..ordinal / RADIX {
        out.push(ESCAPE as char);
    }
    out.push(ALPHABET[ordinal % RADIX] as char);
}

/// Encodes an ordinal as a single unit.
///
/// # Example
///
/// ```rust
/// use stylemacro::codec::encode_ordinal;
///
/// assert_eq!(encode_ordinal(0), "a");
/// assert_eq!(encode_ordinal(61), "9");
/// assert_eq!(encode_ordinal(62), "_a");
/// ```
pub fn encode_ordinal(ordinal: usize) -> String {
    let mut out = String::with_capacity(ordinal / RADIX + 1);
    push_ordinal(&mut out, ordinal);
    out
}

/// Decodes a complete ordinal unit. Returns `None` for hashed or malformed units.
pub fn decode_ordinal(unit: &str) -> Option<usize> {
    let bytes = unit.as_bytes();
    let (last, escapes) = bytes.split_last()?;
    if escapes.iter().any(|&b| b != ESCAPE) {
        return None;
    }
    let digit = symbol_index(*last)?;
    Some(escapes.len() * RADIX + digit)
}

fn symbol_index(b: u8) -> Option<usize> {
    match b {
        b'a'..=b'z' => Some((b - b'a') as usize),
        b'A'..=b'Z' => Some((b - b'A') as usize + 26),
        b'0'..=b'9' => Some((b - b'0') as usize + 52),
        _ => None,
    }
}

/// Stable 32-bit hash of `input`.
///
/// The same input always produces the same value, across processes and
/// independent compilations.
pub fn hash32(input: &str) -> u32 {
    let h = xxh3_64(input.as_bytes());
    (h ^ (h >> 32)) as u32
}

/// Appends the hashed unit for a precomputed hash to `out`.
pub fn push_hash(out: &mut String, mut hash: u32) {
    // u32::MAX needs six base-62 digits.
    let mut digits = [0u8; 6];
    let mut len = 0;
    loop {
        digits[len] = ALPHABET[(hash % RADIX as u32) as usize];
        len += 1;
        hash /= RADIX as u32;
        if hash == 0 {
            break;
        }
    }
    out.push(HASH_MARKER as char);
    out.extend(digits[..len].iter().rev().map(|&b| b as char));
    out.push(HASH_MARKER as char);
}

/// Encodes the hashed unit for `input`.
///
/// # Example
///
/// ```rust
/// use stylemacro::codec::{hash_unit, is_hashed};
///
/// let unit = hash_unit("[3px]");
/// assert!(is_hashed(&unit));
/// assert_eq!(unit, hash_unit("[3px]"));
/// ```
pub fn hash_unit(input: &str) -> String {
    let mut out = String::with_capacity(8);
    push_hash(&mut out, hash32(input));
    out
}

/// Returns `true` if `unit` is a hashed unit.
pub fn is_hashed(unit: &str) -> bool {
    unit.len() >= 3 && unit.as_bytes()[0] == HASH_MARKER && unit.ends_with(HASH_MARKER as char)
}

/// The fragment contributed by a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// Position of the value in the property's enumerated value set.
    Indexed(usize),
    /// Hash of an open-ended value.
    Hashed(u32),
}

impl Fragment {
    /// Fragment for an open-ended value.
    pub fn hashed(input: &str) -> Self {
        Fragment::Hashed(hash32(input))
    }

    /// Appends this fragment's unit to `out`.
    pub fn push_to(&self, out: &mut String) {
        match *self {
            Fragment::Indexed(ordinal) => push_ordinal(out, ordinal),
            Fragment::Hashed(hash) => push_hash(out, hash),
        }
    }
}

/// Returns the byte offset just past the unit starting at `start`.
///
/// Returns `None` if no well-formed unit starts there.
pub fn read_unit(token: &str, start: usize) -> Option<usize> {
    let bytes = token.as_bytes();
    let first = *bytes.get(start)?;

    if first == HASH_MARKER {
        let body = &bytes[start + 1..];
        let close = body.iter().position(|&b| b == HASH_MARKER)?;
        if close == 0 || body[..close].iter().any(|&b| symbol_index(b).is_none()) {
            return None;
        }
        return Some(start + 1 + close + 1);
    }

    let mut i = start;
    while bytes.get(i) == Some(&ESCAPE) {
        i += 1;
    }
    symbol_index(*bytes.get(i)?)?;
    Some(i + 1)
}

/// A class token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    /// The property unit; the merge key.
    pub property: &'a str,
    /// Zero or more theme-condition units.
    pub conditions: &'a str,
    /// The value unit.
    pub value: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Property and condition identity, everything but the value.
    pub fn identity(&self, token: &'a str) -> &'a str {
        &token[..self.property.len() + self.conditions.len()]
    }
}

/// Splits a token into property, conditions, and value units.
///
/// Returns `None` if the token is not a sequence of at least two well-formed
/// units.
///
/// # Example
///
/// ```rust
/// use stylemacro::codec::parse_token;
///
/// let parts = parse_token("cab").unwrap();
/// assert_eq!(parts.property, "c");
/// assert_eq!(parts.conditions, "a");
/// assert_eq!(parts.value, "b");
/// ```
pub fn parse_token(token: &str) -> Option<TokenParts<'_>> {
    let property_end = read_unit(token, 0)?;
    let mut value_start = property_end;
    let mut end = property_end;
    while end < token.len() {
        value_start = end;
        end = read_unit(token, end)?;
    }
    if end == property_end {
        return None;
    }
    Some(TokenParts {
        property: &token[..property_end],
        conditions: &token[property_end..value_start],
        value: &token[value_start..end],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_symbol_range() {
        assert_eq!(encode_ordinal(0), "a");
        assert_eq!(encode_ordinal(25), "z");
        assert_eq!(encode_ordinal(26), "A");
        assert_eq!(encode_ordinal(51), "Z");
        assert_eq!(encode_ordinal(52), "0");
        assert_eq!(encode_ordinal(61), "9");
    }

    #[test]
    fn test_encode_escaped_range() {
        assert_eq!(encode_ordinal(62), "_a");
        assert_eq!(encode_ordinal(123), "_9");
        assert_eq!(encode_ordinal(130), "__g");
    }

    #[test]
    fn test_decode_rejects_hash_and_garbage() {
        assert_eq!(decode_ordinal("__g"), Some(130));
        assert_eq!(decode_ordinal("-abc-"), None);
        assert_eq!(decode_ordinal("a_"), None);
        assert_eq!(decode_ordinal(""), None);
    }

    #[test]
    fn test_hash_unit_is_stable_and_marked() {
        let a = hash_unit("[1px]");
        let b = hash_unit("[1px]");
        let c = hash_unit("[2px]");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with('-') && a.ends_with('-'));
        assert!(decode_ordinal(&a).is_none());
    }

    #[test]
    fn test_hash_zero_still_has_a_digit() {
        let mut out = String::new();
        push_hash(&mut out, 0);
        assert_eq!(out, "-a-");
    }

    #[test]
    fn test_read_unit_handles_escape_and_hash() {
        assert_eq!(read_unit("__gb", 0), Some(3));
        assert_eq!(read_unit("a-xY-", 1), Some(5));
        assert_eq!(read_unit("a-xY", 1), None);
        assert_eq!(read_unit("a--", 1), None);
        assert_eq!(read_unit("_", 0), None);
    }

    #[test]
    fn test_parse_token_without_conditions() {
        let parts = parse_token("_ab").unwrap();
        assert_eq!(parts.property, "_a");
        assert_eq!(parts.conditions, "");
        assert_eq!(parts.value, "b");
        assert_eq!(parts.identity("_ab"), "_a");
    }

    #[test]
    fn test_parse_token_hash_value_with_alphabet_collisions() {
        // Hash digits are alphabet symbols; the marker keeps them together.
        let token = "cb-abc-";
        let parts = parse_token(token).unwrap();
        assert_eq!(parts.property, "c");
        assert_eq!(parts.conditions, "b");
        assert_eq!(parts.value, "-abc-");
    }

    #[test]
    fn test_parse_token_hashed_property() {
        let token = "-Qz1-ac";
        let parts = parse_token(token).unwrap();
        assert_eq!(parts.property, "-Qz1-");
        assert_eq!(parts.conditions, "a");
        assert_eq!(parts.value, "c");
    }

    #[test]
    fn test_parse_token_rejects_single_unit() {
        assert!(parse_token("a").is_none());
        assert!(parse_token("").is_none());
        assert!(parse_token("a$").is_none());
    }
}
