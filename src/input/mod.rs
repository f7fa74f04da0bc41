//! Bytecode input - normalization and validation of hex text
//!
//! Turns user-supplied text into raw bytes before anything reaches the
//! disassembler. Checks run in a fixed order and stop at the first failure:
//! - not empty
//! - `0x` prefix (only under [`PrefixPolicy::Required`])
//! - something after the prefix
//! - hexadecimal characters only
//! - even digit count

use thiserror::Error;

/// Input rejection reasons
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Bytecode cannot be empty")]
    Empty,

    #[error("Bytecode must start with '0x' prefix")]
    MissingPrefix,

    #[error("Bytecode cannot be empty (only '0x' provided)")]
    PrefixOnly,

    /// `position` is the character index in the text as given
    #[error("Bytecode contains invalid characters (must be hexadecimal: 0-9, a-f, A-F): {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Bytecode must have even length (each byte = 2 hex characters)")]
    OddLength { digits: usize },
}

/// Whether the `0x` prefix is mandatory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixPolicy {
    #[default]
    Optional,
    Required,
}

/// Strip all whitespace and lowercase
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split off a `0x`/`0X` prefix, reporting whether one was present
fn split_prefix(s: &str) -> (bool, &str) {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(rest) => (true, rest),
        None => (false, s),
    }
}

/// First non-hex character in `raw`, skipping whitespace and the prefix
fn find_invalid_character(raw: &str, has_prefix: bool) -> Option<(usize, char)> {
    let mut prefix_left = if has_prefix { 2 } else { 0 };
    raw.chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .find(|(_, c)| {
            if prefix_left > 0 {
                prefix_left -= 1;
                return false;
            }
            !c.is_ascii_hexdigit()
        })
}

/// Validate raw text and return its hex digits without prefix
pub fn validate(raw: &str, policy: PrefixPolicy) -> Result<String, InputError> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(InputError::Empty);
    }

    let (has_prefix, digits) = split_prefix(&cleaned);
    if !has_prefix && policy == PrefixPolicy::Required {
        return Err(InputError::MissingPrefix);
    }
    if digits.is_empty() {
        return Err(InputError::PrefixOnly);
    }

    if let Some((position, character)) = find_invalid_character(raw, has_prefix) {
        return Err(InputError::InvalidCharacter {
            character,
            position,
        });
    }

    if digits.len() % 2 != 0 {
        return Err(InputError::OddLength {
            digits: digits.len(),
        });
    }

    Ok(digits.to_string())
}

/// Validate and decode hex text into bytes
pub fn decode(raw: &str, policy: PrefixPolicy) -> Result<Vec<u8>, InputError> {
    let digits = validate(raw, policy)?;
    hex::decode(&digits).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => InputError::InvalidCharacter {
            character: c,
            position: index,
        },
        _ => InputError::OddLength {
            digits: digits.len(),
        },
    })
}
