//! Character-set string creation and validation
//!
//! A creator maps a numeric value to a fixed-length string over its
//! character set and back. Creation supports an exclusion policy (strings
//! starting with the zero character can be skipped) and an optional tweak
//! that shifts the value before it is encoded.

use super::error::{Result, ToolkitError};

/// Maximum length of a created or validated string
pub const MAXIMUM_STRING_LENGTH: usize = 40;

/// Largest number of strings or keys created in one call
pub const MAXIMUM_SEQUENCE_COUNT: u64 = 1_000_000;

pub(crate) fn check_sequence_count(count: u64) -> Result<()> {
    if count > MAXIMUM_SEQUENCE_COUNT {
        return Err(ToolkitError::range(format!(
            "Count {count} must be less than or equal to {MAXIMUM_SEQUENCE_COUNT}"
        )));
    }

    Ok(())
}

/// Strings excluded from creation or validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Exclusion {
    /// Nothing excluded
    #[default]
    None,
    /// Strings starting with the zero character
    FirstZero,
    /// Strings made only of decimal digits
    AllNumeric,
}

impl Exclusion {
    /// All exclusions in enumeration order
    pub const ALL: [Self; 3] = [Self::None, Self::FirstZero, Self::AllNumeric];

    /// Enumeration value used by form inputs
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::None => 0,
            Self::FirstZero => 1,
            Self::AllNumeric => 2,
        }
    }

    /// Locale resource name of the exclusion label
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::None => "String.exclusionNoneLabel",
            Self::FirstZero => "String.exclusionFirstZeroLabel",
            Self::AllNumeric => "String.exclusionAllNumericLabel",
        }
    }
}

impl TryFrom<u64> for Exclusion {
    type Error = ToolkitError;

    fn try_from(value: u64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|exclusion| exclusion.value() == value)
            .ok_or_else(|| ToolkitError::range(format!("Exclusion {value} is not recognized")))
    }
}

/// Validation constraints for [`CharacterSetCreator::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringValidation {
    /// Minimum length, if any
    pub minimum_length: Option<usize>,
    /// Maximum length, defaults to [`MAXIMUM_STRING_LENGTH`]
    pub maximum_length: Option<usize>,
    /// Strings to reject
    pub exclusion: Exclusion,
}

impl StringValidation {
    /// Validation that only applies an exclusion
    #[must_use]
    pub const fn with_exclusion(exclusion: Exclusion) -> Self {
        Self {
            minimum_length: None,
            maximum_length: None,
            exclusion,
        }
    }
}

/// Creator for strings over a fixed character set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSetCreator {
    characters: &'static [u8],
    exclusion_support: &'static [Exclusion],
}

/// Decimal digits
pub const NUMERIC_CREATOR: CharacterSetCreator =
    CharacterSetCreator::new(b"0123456789", &[Exclusion::FirstZero]);

/// Upper-case hexadecimal digits
pub const HEXADECIMAL_CREATOR: CharacterSetCreator =
    CharacterSetCreator::new(b"0123456789ABCDEF", &[Exclusion::FirstZero]);

/// Upper-case letters
pub const ALPHABETIC_CREATOR: CharacterSetCreator =
    CharacterSetCreator::new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ", &[]);

/// Decimal digits and upper-case letters
pub const ALPHANUMERIC_CREATOR: CharacterSetCreator = CharacterSetCreator::new(
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    &[Exclusion::FirstZero],
);

/// GS1 AI encodable character set 82
pub const AI82_CREATOR: CharacterSetCreator = CharacterSetCreator::new(
    b"!\"%&'()*+,-./0123456789:;<=>?ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz",
    &[],
);

/// GS1 AI encodable character set 39
pub const AI39_CREATOR: CharacterSetCreator =
    CharacterSetCreator::new(b"#-/0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ", &[]);

impl CharacterSetCreator {
    const fn new(characters: &'static [u8], exclusion_support: &'static [Exclusion]) -> Self {
        Self {
            characters,
            exclusion_support,
        }
    }

    /// Characters of the set, in value order
    #[must_use]
    pub fn characters(&self) -> &'static str {
        std::str::from_utf8(self.characters).unwrap_or_default()
    }

    /// Exclusions supported for creation (besides [`Exclusion::None`])
    #[must_use]
    pub const fn exclusion_support(&self) -> &'static [Exclusion] {
        self.exclusion_support
    }

    fn base(&self) -> u128 {
        self.characters.len() as u128
    }

    fn index_of(&self, c: char) -> Option<u128> {
        u8::try_from(c)
            .ok()
            .and_then(|b| self.characters.iter().position(|&x| x == b))
            .map(|i| i as u128)
    }

    fn char_at(&self, index: u128) -> u8 {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.characters.get(index).copied())
            .unwrap_or(self.characters[0])
    }

    fn power(&self, exponent: usize) -> Option<u128> {
        u32::try_from(exponent)
            .ok()
            .and_then(|exponent| self.base().checked_pow(exponent))
    }

    /// Number of strings of `length` not excluded by `exclusion`; saturates
    /// at `u128::MAX`
    fn domain(&self, length: usize, exclusion: Exclusion) -> u128 {
        match exclusion {
            Exclusion::FirstZero => self
                .power(length - 1)
                .map_or(u128::MAX, |p| p.saturating_mul(self.base() - 1)),
            _ => self.power(length).unwrap_or(u128::MAX),
        }
    }

    fn check_create(&self, length: usize, exclusion: Exclusion) -> Result<()> {
        if length == 0 || length > MAXIMUM_STRING_LENGTH {
            return Err(ToolkitError::range(format!(
                "Length {length} must be from 1 to {MAXIMUM_STRING_LENGTH}"
            )));
        }

        if exclusion != Exclusion::None && !self.exclusion_support.contains(&exclusion) {
            return Err(ToolkitError::unsupported(format!(
                "exclusion {exclusion:?} is not supported by character set {}",
                self.characters()
            )));
        }

        Ok(())
    }

    fn encode(&self, length: usize, value: u128, exclusion: Exclusion) -> String {
        let base = self.base();
        let mut bytes = vec![self.characters[0]; length];

        let (mut low, low_length) = if exclusion == Exclusion::FirstZero {
            let (high, low) = self
                .power(length - 1)
                .map_or((0, value), |p| (value / p, value % p));
            bytes[0] = self.char_at(high + 1);
            (low, length - 1)
        } else {
            (value, length)
        };

        for position in (length - low_length..length).rev() {
            bytes[position] = self.char_at(low % base);
            low /= base;
        }

        String::from_utf8(bytes).unwrap_or_default()
    }

    /// Create a string of `length` characters representing `value`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the length is out of bounds or the
    /// value doesn't fit, `ToolkitError::Unsupported` if the exclusion isn't
    /// supported by this character set.
    pub fn create(
        &self,
        length: usize,
        value: u64,
        exclusion: Exclusion,
        tweak: Option<u64>,
    ) -> Result<String> {
        self.check_create(length, exclusion)?;
        self.create_value(length, u128::from(value), exclusion, tweak)
    }

    fn create_value(
        &self,
        length: usize,
        value: u128,
        exclusion: Exclusion,
        tweak: Option<u64>,
    ) -> Result<String> {
        let domain = self.domain(length, exclusion);

        if value >= domain {
            return Err(ToolkitError::range(format!(
                "Value {value} must be less than {domain}"
            )));
        }

        let mapped = tweak.map_or(value, |tweak| (value + u128::from(tweak) % domain) % domain);

        Ok(self.encode(length, mapped, exclusion))
    }

    /// Create `count` strings for consecutive values starting at `start_value`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the last value doesn't fit, otherwise
    /// the same errors as [`Self::create`].
    pub fn create_sequence(
        &self,
        length: usize,
        start_value: u64,
        count: u64,
        exclusion: Exclusion,
        tweak: Option<u64>,
    ) -> Result<Vec<String>> {
        self.check_create(length, exclusion)?;
        check_sequence_count(count)?;

        let domain = self.domain(length, exclusion);
        let end = u128::from(start_value) + u128::from(count);

        if end > domain {
            return Err(ToolkitError::range(format!(
                "Value {} must be less than {domain}",
                end - 1
            )));
        }

        (u128::from(start_value)..end)
            .map(|value| self.create_value(length, value, exclusion, tweak))
            .collect()
    }

    /// Convert a string back to the value it was created from
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the string is invalid for this
    /// character set or its value exceeds `u64`.
    pub fn value(&self, s: &str, exclusion: Exclusion, tweak: Option<u64>) -> Result<u64> {
        let length = s.chars().count();

        self.check_create(length, exclusion)?;
        self.validate(s, &StringValidation::with_exclusion(exclusion))?;

        let base = self.base();
        let overflow = || ToolkitError::range(format!("Value of string {s} is too large"));

        let mut value = s.chars().try_fold(0u128, |value, c| {
            value
                .checked_mul(base)
                .and_then(|value| value.checked_add(self.index_of(c).unwrap_or(0)))
        }).ok_or_else(overflow)?;

        if exclusion == Exclusion::FirstZero {
            value -= self.power(length - 1).ok_or_else(overflow)?;
        }

        if let Some(tweak) = tweak {
            let domain = self.domain(length, exclusion);
            let tweak = u128::from(tweak) % domain;

            value = if value >= tweak {
                value - tweak
            } else {
                domain - (tweak - value)
            };
        }

        u64::try_from(value).map_err(|_| overflow())
    }

    /// Validate a string against this character set
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` describing the first problem found.
    pub fn validate(&self, s: &str, validation: &StringValidation) -> Result<()> {
        let length = s.chars().count();

        if let Some(minimum_length) = validation.minimum_length
            && length < minimum_length
        {
            return Err(ToolkitError::range(format!(
                "Length {length} of string must be greater than or equal to {minimum_length}"
            )));
        }

        let maximum_length = validation.maximum_length.unwrap_or(MAXIMUM_STRING_LENGTH);
        if length > maximum_length {
            return Err(ToolkitError::range(format!(
                "Length {length} of string must be less than or equal to {maximum_length}"
            )));
        }

        if let Some((position, c)) = s
            .chars()
            .enumerate()
            .find(|(_, c)| self.index_of(*c).is_none())
        {
            return Err(ToolkitError::range(format!(
                "Invalid character '{c}' at position {}",
                position + 1
            )));
        }

        match validation.exclusion {
            Exclusion::FirstZero if s.starts_with(char::from(self.characters[0])) => {
                Err(ToolkitError::range(format!(
                    "Invalid character '{}' at position 1",
                    char::from(self.characters[0])
                )))
            }
            Exclusion::AllNumeric if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
                Err(ToolkitError::range("String must not be all numeric"))
            }
            _ => Ok(()),
        }
    }
}
