//! Token obfuscation
//!
//! GitHub revokes personal access tokens that show up in public code. Shipping
//! the token as a run of decimal byte codes keeps it from matching a plain
//! text search. This is obfuscation only; anyone reading the source can
//! recover the token.

/// Decode an obfuscated token
///
/// The input is split into two-character chunks (the last chunk may be a
/// single character). Each chunk's leading digits are read as a decimal
/// number, 0 when there are none, and written out as unpadded lowercase hex.
///
/// ```
/// assert_eq!(ghsponsors::token::decode("6568"), "4144");
/// ```
pub fn decode(encoded: &str) -> String {
    let chars: Vec<char> = encoded.chars().collect();
    chars
        .chunks(2)
        .map(|chunk| format!("{:x}", leading_integer(chunk)))
        .collect()
}

/// Read leading ASCII digits as an integer, ignoring anything after them
fn leading_integer(chunk: &[char]) -> u32 {
    chunk
        .iter()
        .map_while(|c| c.to_digit(10))
        .fold(0, |acc, digit| acc * 10 + digit)
}
