//! GS1 mod-10 check digits and mod-1021 check character pairs

use super::character_set::AI82_CREATOR;
use super::error::{Result, ToolkitError};

/// Prime weights of the check character pair, right-aligned to the
/// characters being checked
const CHECK_CHARACTER_WEIGHTS: [u32; 28] = [
    107, 103, 101, 97, 89, 83, 79, 73, 71, 67, 61, 59, 53, 47, 43, 41, 37, 31, 29, 23, 19, 17, 13,
    11, 7, 5, 3, 2,
];

/// Characters a check character pair is drawn from
const CHECK_CHARACTERS: &[u8; 32] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Compute the check digit for a string of decimal digits
///
/// Weights alternate 3, 1, 3, … starting from the rightmost digit.
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `digits` contains a non-digit.
pub fn check_digit(digits: &str) -> Result<char> {
    let mut sum = 0u32;

    for (index, c) in digits.chars().rev().enumerate() {
        let digit = c.to_digit(10).ok_or_else(|| {
            ToolkitError::range(format!("Invalid character '{c}' in numeric string {digits}"))
        })?;

        sum += if index % 2 == 0 { digit * 3 } else { digit };
    }

    Ok(char::from(b'0' + u8::try_from((10 - sum % 10) % 10).unwrap_or(0)))
}

/// Verify that the last character of `key` is its check digit
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `key` is empty, non-numeric or the
/// check digit doesn't match.
pub fn verify_check_digit(key: &str) -> Result<()> {
    require_numeric(key)?;

    let Some((body, check)) = key.len().checked_sub(1).map(|split| key.split_at(split)) else {
        return Err(ToolkitError::range("Numeric string must not be empty"));
    };

    if check_digit(body)?.to_string() == check {
        Ok(())
    } else {
        Err(ToolkitError::range(format!("Invalid check digit in {key}")))
    }
}

/// Compute the check character pair for a string over the AI 82 set
///
/// The weighted sum of character values is taken mod 1021 and split into
/// two base-32 characters.
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `s` is longer than 28 characters or
/// contains a character outside the AI 82 set.
pub fn check_character_pair(s: &str) -> Result<String> {
    let length = s.chars().count();
    let start = CHECK_CHARACTER_WEIGHTS.len().checked_sub(length).ok_or_else(|| {
        ToolkitError::range(format!(
            "Length {length} must be less than or equal to {}",
            CHECK_CHARACTER_WEIGHTS.len()
        ))
    })?;

    let characters = AI82_CREATOR.characters();
    let mut sum = 0u32;

    for (c, weight) in s.chars().zip(&CHECK_CHARACTER_WEIGHTS[start..]) {
        let value = characters
            .find(c)
            .and_then(|index| u32::try_from(index).ok())
            .ok_or_else(|| ToolkitError::range(format!("Invalid character '{c}' in {s}")))?;

        sum += value * weight;
    }

    let sum = usize::try_from(sum % 1021).unwrap_or(0);

    Ok([CHECK_CHARACTERS[sum / 32], CHECK_CHARACTERS[sum % 32]]
        .into_iter()
        .map(char::from)
        .collect())
}

/// Verify that the last two characters of `key` are its check character pair
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `key` is too short, contains an invalid
/// character or the pair doesn't match.
pub fn verify_check_character_pair(key: &str) -> Result<()> {
    let split = key
        .char_indices()
        .rev()
        .nth(1)
        .map(|(index, _)| index)
        .filter(|&index| index > 0)
        .ok_or_else(|| ToolkitError::range(format!("{key} is too short for a check character pair")))?;
    let (body, pair) = key.split_at(split);

    if check_character_pair(body)? == pair {
        Ok(())
    } else {
        Err(ToolkitError::range(format!("Invalid check character pair in {key}")))
    }
}

/// Require `s` to be made only of decimal digits
///
/// # Errors
///
/// Returns `ToolkitError::Range` naming the first non-digit.
pub fn require_numeric(s: &str) -> Result<()> {
    match s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        Some((position, c)) => Err(ToolkitError::range(format!(
            "Invalid character '{c}' at position {}",
            position + 1
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit_known_values() {
        assert_eq!(check_digit("061414100001").unwrap(), '2');
        assert_eq!(check_digit("950110153000").unwrap(), '3');
        assert_eq!(check_digit("0").unwrap(), '0');
    }

    #[test]
    fn test_verify_check_digit() {
        assert!(verify_check_digit("0614141000012").is_ok());
        assert!(verify_check_digit("0614141000013").is_err());
        assert!(verify_check_digit("").is_err());
    }

    #[test]
    fn test_check_character_pair_known_value() {
        assert_eq!(check_character_pair("1987654Ad4X4bL5ttr2310c").unwrap(), "2K");
    }

    #[test]
    fn test_verify_check_character_pair() {
        assert!(verify_check_character_pair("1987654Ad4X4bL5ttr2310c2K").is_ok());
        assert!(verify_check_character_pair("1987654Ad4X4bL5ttr2310c2L").is_err());
        assert!(verify_check_character_pair("2K").is_err());
    }

    #[test]
    fn test_check_character_pair_limits() {
        assert!(check_character_pair(&"1".repeat(28)).is_ok());
        assert!(check_character_pair(&"1".repeat(29)).is_err());
        assert!(check_character_pair("12 4").is_err());
    }

    #[test]
    fn test_require_numeric() {
        assert!(require_numeric("0123").is_ok());
        let err = require_numeric("01A3").unwrap_err();
        assert_eq!(err.to_string(), "Invalid character 'A' at position 3");
    }
}
