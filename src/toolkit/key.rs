//! Identification key validation and creation

use std::fmt;

use super::character_set::{
    AI39_CREATOR, AI82_CREATOR, CharacterSetCreator, Exclusion, NUMERIC_CREATOR, StringValidation,
    check_sequence_count,
};
use super::check::{
    check_character_pair, check_digit, require_numeric, verify_check_character_pair,
    verify_check_digit,
};
use super::error::{Result, ToolkitError};
use super::prefix::{PrefixManager, PrefixType};

/// Multiplier for sparse value mapping; coprime with every power of ten
const SPARSE_MULTIPLIER: u128 = 7_919;
const SPARSE_OFFSET: u128 = 4_231;

/// Maximum length of a non-numeric key including its prefix
const NON_NUMERIC_MAXIMUM_LENGTH: usize = 30;

/// Maximum length of a GMN including its check character pair
const GMN_MAXIMUM_LENGTH: usize = 25;

/// Structural family of an identification key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Global Trade Item Number
    Gtin,
    /// Fixed-length numeric key other than GTIN
    NonGtinNumeric,
    /// Numeric key optionally followed by a serial component
    SerializableNumeric,
    /// Prefix followed by a free-form reference
    NonNumeric,
}

impl KeyCategory {
    /// True if the reference portion is numeric
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::NonNumeric)
    }
}

/// Identification key types supported by the toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentificationKeyType {
    Gtin,
    Gln,
    Sscc,
    Grai,
    Giai,
    Gsrn,
    Gdti,
    Ginc,
    Gsin,
    Gcn,
    Cpid,
    Gmn,
}

/// Serial component constraints of a serializable key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialComponent {
    pub creator: CharacterSetCreator,
    pub maximum_length: usize,
}

impl IdentificationKeyType {
    /// All key types in menu order
    pub const ALL: [Self; 12] = [
        Self::Gtin,
        Self::Gln,
        Self::Sscc,
        Self::Grai,
        Self::Giai,
        Self::Gsrn,
        Self::Gdti,
        Self::Ginc,
        Self::Gsin,
        Self::Gcn,
        Self::Cpid,
        Self::Gmn,
    ];

    /// Short name, e.g. "GTIN"
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gtin => "GTIN",
            Self::Gln => "GLN",
            Self::Sscc => "SSCC",
            Self::Grai => "GRAI",
            Self::Giai => "GIAI",
            Self::Gsrn => "GSRN",
            Self::Gdti => "GDTI",
            Self::Ginc => "GINC",
            Self::Gsin => "GSIN",
            Self::Gcn => "GCN",
            Self::Cpid => "CPID",
            Self::Gmn => "GMN",
        }
    }

    #[must_use]
    pub const fn category(self) -> KeyCategory {
        match self {
            Self::Gtin => KeyCategory::Gtin,
            Self::Gln | Self::Sscc | Self::Gsrn | Self::Gsin => KeyCategory::NonGtinNumeric,
            Self::Grai | Self::Gdti | Self::Gcn => KeyCategory::SerializableNumeric,
            Self::Giai | Self::Ginc | Self::Cpid | Self::Gmn => KeyCategory::NonNumeric,
        }
    }

    /// Character set of the reference portion
    #[must_use]
    pub const fn reference_creator(self) -> CharacterSetCreator {
        match self {
            Self::Giai | Self::Ginc | Self::Gmn => AI82_CREATOR,
            Self::Cpid => AI39_CREATOR,
            _ => NUMERIC_CREATOR,
        }
    }

    /// Serial component, for serializable keys
    #[must_use]
    pub const fn serial_component(self) -> Option<SerialComponent> {
        match self {
            Self::Grai => Some(SerialComponent {
                creator: AI82_CREATOR,
                maximum_length: 16,
            }),
            Self::Gdti => Some(SerialComponent {
                creator: AI82_CREATOR,
                maximum_length: 17,
            }),
            Self::Gcn => Some(SerialComponent {
                creator: NUMERIC_CREATOR,
                maximum_length: 12,
            }),
            _ => None,
        }
    }

    /// Length of the numeric portion including check digit
    const fn numeric_length(self, prefix_type: PrefixType) -> usize {
        match (self, prefix_type) {
            (Self::Gtin, PrefixType::UpcCompanyPrefix) => 12,
            (Self::Gtin, PrefixType::Gs18Prefix) => 8,
            (Self::Sscc | Self::Gsrn, _) => 18,
            (Self::Gsin, _) => 17,
            (Self::Grai, _) => 14,
            _ => 13,
        }
    }

    /// Maximum length of a non-numeric key including any check characters
    const fn maximum_length(self) -> usize {
        match self {
            Self::Gmn => GMN_MAXIMUM_LENGTH,
            _ => NON_NUMERIC_MAXIMUM_LENGTH,
        }
    }

    /// True if the key ends with a check character pair
    #[must_use]
    pub const fn has_check_character_pair(self) -> bool {
        matches!(self, Self::Gmn)
    }

    const fn leader(self) -> &'static str {
        match self {
            Self::Grai => "0",
            _ => "",
        }
    }

    /// Validate `key` as an identification key of this type
    ///
    /// The prefix type only matters for GTIN, where it selects between
    /// GTIN-13, GTIN-12 and GTIN-8. The exclusion only applies to
    /// non-numeric keys.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` describing the first problem found.
    pub fn validate(self, prefix_type: PrefixType, key: &str, exclusion: Exclusion) -> Result<()> {
        match self.category() {
            KeyCategory::Gtin | KeyCategory::NonGtinNumeric => {
                self.validate_numeric(prefix_type, key)
            }
            KeyCategory::SerializableNumeric => {
                let length = self.numeric_length(prefix_type);
                let split = key
                    .char_indices()
                    .nth(length)
                    .map_or(key.len(), |(index, _)| index);
                let (base, serial) = key.split_at(split);

                self.validate_numeric(prefix_type, base)?;
                self.validate_serial(serial)
            }
            KeyCategory::NonNumeric => {
                let length = key.chars().count();
                let maximum = self.maximum_length();
                if length > maximum {
                    return Err(ToolkitError::range(format!(
                        "Length {length} of {self} must be less than or equal to {maximum}"
                    )));
                }

                if key.chars().take(4).filter(char::is_ascii_digit).count() < 4 {
                    return Err(ToolkitError::range(format!(
                        "{self} must start with a GS1 Company Prefix"
                    )));
                }

                self.reference_creator().validate(
                    key,
                    &StringValidation {
                        minimum_length: None,
                        maximum_length: Some(maximum),
                        exclusion,
                    },
                )?;

                if self.has_check_character_pair() {
                    verify_check_character_pair(key)?;
                }

                Ok(())
            }
        }
    }

    fn validate_numeric(self, prefix_type: PrefixType, key: &str) -> Result<()> {
        let expected = self.numeric_length(prefix_type);
        let length = key.chars().count();

        if length != expected {
            return Err(ToolkitError::range(format!(
                "Length {length} of {self} must be {expected}"
            )));
        }

        require_numeric(key)?;

        if !key.starts_with(self.leader()) {
            return Err(ToolkitError::range(format!(
                "{self} must start with {}",
                self.leader()
            )));
        }

        verify_check_digit(key)
    }

    fn validate_serial(self, serial: &str) -> Result<()> {
        let Some(component) = self.serial_component() else {
            return Err(ToolkitError::unsupported(format!(
                "{self} has no serial component"
            )));
        };

        component
            .creator
            .validate(
                serial,
                &StringValidation {
                    minimum_length: None,
                    maximum_length: Some(component.maximum_length),
                    exclusion: Exclusion::None,
                },
            )
            .map_err(|e| ToolkitError::range(format!("Serial component: {e}")))
    }

    /// Append `serial_component` to an existing base key of this type
    ///
    /// The base is validated as if issued under a GS1 Company Prefix.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if either part is invalid,
    /// `ToolkitError::Unsupported` for keys without a serial component.
    pub fn concatenate(self, base_identification_key: &str, serial_component: &str) -> Result<String> {
        if self.serial_component().is_none() {
            return Err(ToolkitError::unsupported(format!(
                "{self} has no serial component"
            )));
        }

        self.validate_numeric(PrefixType::Gs1CompanyPrefix, base_identification_key)?;
        self.validate_serial(serial_component)?;

        Ok(format!("{base_identification_key}{serial_component}"))
    }
}

impl fmt::Display for IdentificationKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Creator for identification keys of one type under one prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentificationKeyCreator {
    key_type: IdentificationKeyType,
    prefix_manager: PrefixManager,
}

impl IdentificationKeyCreator {
    pub(crate) fn new(key_type: IdentificationKeyType, prefix_manager: PrefixManager) -> Result<Self> {
        if key_type != IdentificationKeyType::Gtin
            && prefix_manager.prefix_type() == PrefixType::Gs18Prefix
        {
            return Err(ToolkitError::unsupported(format!(
                "GS1-8 Prefix can't be used to create a {key_type}"
            )));
        }

        Ok(Self {
            key_type,
            prefix_manager,
        })
    }

    #[must_use]
    pub const fn key_type(&self) -> IdentificationKeyType {
        self.key_type
    }

    /// Prefix digits embedded in created keys
    fn embedded_prefix(&self) -> &str {
        if self.key_type == IdentificationKeyType::Gtin {
            self.prefix_manager.prefix()
        } else {
            self.prefix_manager.gs1_company_prefix()
        }
    }

    fn require_numeric_key(&self) -> Result<()> {
        if self.key_type.category().is_numeric() {
            Ok(())
        } else {
            Err(ToolkitError::unsupported(format!(
                "{} is not a numeric identification key",
                self.key_type
            )))
        }
    }

    fn require_serializable_key(&self) -> Result<()> {
        if self.key_type.serial_component().is_some() {
            Ok(())
        } else {
            Err(ToolkitError::unsupported(format!(
                "{} has no serial component",
                self.key_type
            )))
        }
    }

    /// Number of reference digits available under this prefix
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the prefix leaves no room for the
    /// check digit.
    pub fn reference_length(&self) -> Result<usize> {
        self.require_numeric_key()?;

        let length = self
            .key_type
            .numeric_length(self.prefix_manager.prefix_type());
        let used = self.key_type.leader().len() + self.embedded_prefix().len() + 1;

        length.checked_sub(used).ok_or_else(|| {
            ToolkitError::range(format!(
                "Prefix {} is too long for {}",
                self.prefix_manager.prefix(),
                self.key_type
            ))
        })
    }

    /// Number of distinct keys this creator can produce
    ///
    /// # Errors
    ///
    /// Same as [`Self::reference_length`].
    pub fn capacity(&self) -> Result<u64> {
        let reference_length = u32::try_from(self.reference_length()?)
            .map_err(|_| ToolkitError::range("Reference length is too large"))?;

        10u64
            .checked_pow(reference_length)
            .ok_or_else(|| ToolkitError::range("Capacity is too large"))
    }

    fn assemble(&self, reference: &str) -> Result<String> {
        let prefix = self.embedded_prefix();

        let body = if self.key_type == IdentificationKeyType::Sscc && !reference.is_empty() {
            // Extension digit leads the key
            let (extension, rest) = reference.split_at(1);
            format!("{extension}{prefix}{rest}")
        } else {
            format!("{}{prefix}{reference}", self.key_type.leader())
        };

        let check = check_digit(&body)?;
        Ok(format!("{body}{check}"))
    }

    /// Create a key for `value`; if `sparse`, the value is first mapped to a
    /// non-sequential reference
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the value exceeds the capacity,
    /// `ToolkitError::Unsupported` for non-numeric keys.
    pub fn create(&self, value: u64, sparse: bool) -> Result<String> {
        let capacity = self.capacity()?;

        if value >= capacity {
            return Err(ToolkitError::range(format!(
                "Value {value} must be less than {capacity}"
            )));
        }

        let mapped = if sparse {
            (u128::from(value) * SPARSE_MULTIPLIER + SPARSE_OFFSET) % u128::from(capacity)
        } else {
            u128::from(value)
        };

        let reference_length = self.reference_length()?;
        let reference = if reference_length == 0 {
            String::new()
        } else {
            format!("{mapped:0reference_length$}")
        };

        self.assemble(&reference)
    }

    /// Create keys for `count` consecutive values starting at `start_value`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the last value exceeds the capacity
    /// or `count` exceeds [`MAXIMUM_SEQUENCE_COUNT`].
    pub fn create_sequence(&self, start_value: u64, count: u64, sparse: bool) -> Result<Vec<String>> {
        let capacity = self.capacity()?;
        check_sequence_count(count)?;

        if u128::from(start_value) + u128::from(count) > u128::from(capacity) {
            return Err(ToolkitError::range(format!(
                "Value {} must be less than {capacity}",
                u128::from(start_value) + u128::from(count) - 1
            )));
        }

        (start_value..start_value + count)
            .map(|value| self.create(value, sparse))
            .collect()
    }

    /// Create every key available under this prefix
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the capacity exceeds
    /// [`MAXIMUM_SEQUENCE_COUNT`], otherwise as [`Self::capacity`].
    pub fn create_all(&self) -> Result<Vec<String>> {
        let capacity = self.capacity()?;
        check_sequence_count(capacity)?;

        (0..capacity).map(|value| self.create(value, false)).collect()
    }

    /// Create a key for `value` and append `serial_component`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the serial component is invalid,
    /// `ToolkitError::Unsupported` for keys without a serial component.
    pub fn create_serialized(&self, value: u64, serial_component: &str, sparse: bool) -> Result<String> {
        self.require_serializable_key()?;
        self.key_type.validate_serial(serial_component)?;

        Ok(format!("{}{serial_component}", self.create(value, sparse)?))
    }

    /// Append `serial_component` to an existing base key
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if either part is invalid.
    pub fn concatenate(&self, base_identification_key: &str, serial_component: &str) -> Result<String> {
        self.key_type
            .concatenate(base_identification_key, serial_component)
    }

    /// Create a non-numeric key from a free-form reference
    ///
    /// A GMN gets its check character pair appended.
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the reference is empty, contains
    /// characters outside the key's character set or makes the key too long,
    /// `ToolkitError::Unsupported` for numeric keys.
    pub fn create_from_reference(&self, reference: &str) -> Result<String> {
        if self.key_type.category().is_numeric() {
            return Err(ToolkitError::unsupported(format!(
                "{} requires a numeric value",
                self.key_type
            )));
        }

        if reference.is_empty() {
            return Err(ToolkitError::range("Reference must not be empty"));
        }

        let mut key = format!("{}{reference}", self.embedded_prefix());
        let maximum = self.key_type.maximum_length();

        self.key_type
            .reference_creator()
            .validate(reference, &StringValidation::default())?;

        let pair_length = if self.key_type.has_check_character_pair() { 2 } else { 0 };
        let length = key.chars().count() + pair_length;

        if length > maximum {
            return Err(ToolkitError::range(format!(
                "Length {length} of {} must be less than or equal to {maximum}",
                self.key_type
            )));
        }

        if self.key_type.has_check_character_pair() {
            key.push_str(&check_character_pair(&key)?);
        }

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::MAXIMUM_SEQUENCE_COUNT;

    fn creator(key_type: IdentificationKeyType, prefix_type: PrefixType, prefix: &str) -> IdentificationKeyCreator {
        PrefixManager::get(prefix_type, prefix)
            .unwrap()
            .creator(key_type)
            .unwrap()
    }

    #[test]
    fn test_gtin13_create() {
        let creator = creator(IdentificationKeyType::Gtin, PrefixType::Gs1CompanyPrefix, "0614141");
        assert_eq!(creator.reference_length().unwrap(), 5);
        assert_eq!(creator.capacity().unwrap(), 100_000);
        assert_eq!(creator.create(1, false).unwrap(), "0614141000012");
    }

    #[test]
    fn test_gtin12_from_upc_prefix() {
        let creator = creator(IdentificationKeyType::Gtin, PrefixType::UpcCompanyPrefix, "614141");
        let key = creator.create(1, false).unwrap();
        assert_eq!(key, "614141000012");
        assert!(
            IdentificationKeyType::Gtin
                .validate(PrefixType::UpcCompanyPrefix, &key, Exclusion::None)
                .is_ok()
        );
    }

    #[test]
    fn test_gtin8_from_gs1_8_prefix() {
        let creator = creator(IdentificationKeyType::Gtin, PrefixType::Gs18Prefix, "952");
        let key = creator.create(0, false).unwrap();
        assert_eq!(key.len(), 8);
        assert!(key.starts_with("9520000"));
    }

    #[test]
    fn test_gs1_8_prefix_rejected_for_gln() {
        let manager = PrefixManager::get(PrefixType::Gs18Prefix, "952").unwrap();
        assert!(matches!(
            manager.creator(IdentificationKeyType::Gln),
            Err(ToolkitError::Unsupported(_))
        ));
    }

    #[test]
    fn test_sscc_extension_digit_leads() {
        let creator = creator(IdentificationKeyType::Sscc, PrefixType::Gs1CompanyPrefix, "9521234");
        let key = creator.create(3_123_456_789, false).unwrap();
        assert_eq!(key.len(), 18);
        assert!(key.starts_with("39521234"));
        assert!(
            IdentificationKeyType::Sscc
                .validate(PrefixType::Gs1CompanyPrefix, &key, Exclusion::None)
                .is_ok()
        );
    }

    #[test]
    fn test_grai_leader_and_serial() {
        let creator = creator(IdentificationKeyType::Grai, PrefixType::Gs1CompanyPrefix, "9521234");
        let key = creator.create_serialized(5, "ABC-1", false).unwrap();
        assert!(key.starts_with("09521234"));
        assert!(key.ends_with("ABC-1"));
        assert!(
            IdentificationKeyType::Grai
                .validate(PrefixType::Gs1CompanyPrefix, &key, Exclusion::None)
                .is_ok()
        );
    }

    #[test]
    fn test_concatenate_validates_base() {
        let creator = creator(IdentificationKeyType::Gdti, PrefixType::Gs1CompanyPrefix, "9521234");
        let base = creator.create(7, false).unwrap();
        assert_eq!(creator.concatenate(&base, "XYZ").unwrap(), format!("{base}XYZ"));
        assert!(creator.concatenate("9521234000071", "XYZ").is_err());
        assert_eq!(
            IdentificationKeyType::Gdti.concatenate(&base, "XYZ").unwrap(),
            format!("{base}XYZ")
        );
        assert!(matches!(
            IdentificationKeyType::Gln.concatenate(&base, "1"),
            Err(ToolkitError::Unsupported(_))
        ));
    }

    #[test]
    fn test_create_all_refuses_huge_capacity() {
        let creator = creator(IdentificationKeyType::Sscc, PrefixType::Gs1CompanyPrefix, "9521");
        assert!(creator.capacity().unwrap() > MAXIMUM_SEQUENCE_COUNT);
        assert!(matches!(creator.create_all(), Err(ToolkitError::Range(_))));
    }

    #[test]
    fn test_gcn_serial_must_be_numeric() {
        let creator = creator(IdentificationKeyType::Gcn, PrefixType::Gs1CompanyPrefix, "9521234");
        assert!(creator.create_serialized(1, "12AB", false).is_err());
        assert!(creator.create_serialized(1, "1234", false).is_ok());
    }

    #[test]
    fn test_sparse_is_a_permutation() {
        let creator = creator(IdentificationKeyType::Gtin, PrefixType::Gs1CompanyPrefix, "95212345678");
        let mut keys: Vec<String> = (0..10).map(|v| creator.create(v, true).unwrap()).collect();
        assert_ne!(keys, creator.create_sequence(0, 10, false).unwrap());
        keys.sort();
        assert_eq!(keys, creator.create_all().unwrap());
    }

    #[test]
    fn test_create_value_out_of_range() {
        let creator = creator(IdentificationKeyType::Gln, PrefixType::Gs1CompanyPrefix, "952123456789");
        assert_eq!(creator.capacity().unwrap(), 1);
        assert!(matches!(creator.create(1, false), Err(ToolkitError::Range(_))));
    }

    #[test]
    fn test_non_numeric_create_and_validate() {
        let creator = creator(IdentificationKeyType::Giai, PrefixType::Gs1CompanyPrefix, "9521234");
        let key = creator.create_from_reference("ASSET-42").unwrap();
        assert_eq!(key, "9521234ASSET-42");
        assert!(
            IdentificationKeyType::Giai
                .validate(PrefixType::Gs1CompanyPrefix, &key, Exclusion::AllNumeric)
                .is_ok()
        );
        assert!(
            IdentificationKeyType::Giai
                .validate(PrefixType::Gs1CompanyPrefix, "95212341234", Exclusion::AllNumeric)
                .is_err()
        );
    }

    #[test]
    fn test_gmn_appends_check_character_pair() {
        let creator = creator(IdentificationKeyType::Gmn, PrefixType::Gs1CompanyPrefix, "1987654");
        let key = creator.create_from_reference("Ad4X4bL5ttr2310c").unwrap();
        assert_eq!(key, "1987654Ad4X4bL5ttr2310c2K");
        assert!(
            IdentificationKeyType::Gmn
                .validate(PrefixType::Gs1CompanyPrefix, &key, Exclusion::None)
                .is_ok()
        );
    }

    #[test]
    fn test_gmn_validation() {
        let validate = |key: &str| {
            IdentificationKeyType::Gmn.validate(PrefixType::Gs1CompanyPrefix, key, Exclusion::None)
        };

        assert!(validate("1987654Ad4X4bL5ttr2310c2L").is_err());
        assert!(validate("1987654Ad4X4bL5ttr2310c").is_err());
        assert_eq!(
            validate("1987654Ad4X4bL5ttr2310cXY2K").unwrap_err().to_string(),
            "Length 27 of GMN must be less than or equal to 25"
        );
    }

    #[test]
    fn test_gmn_reference_too_long() {
        let creator = creator(IdentificationKeyType::Gmn, PrefixType::Gs1CompanyPrefix, "1987654");
        assert!(matches!(
            creator.create_from_reference("Ad4X4bL5ttr2310cXY"),
            Err(ToolkitError::Range(_))
        ));
        assert_eq!(IdentificationKeyType::Gmn.category(), KeyCategory::NonNumeric);
    }

    #[test]
    fn test_cpid_rejects_characters_outside_ai39() {
        let creator = creator(IdentificationKeyType::Cpid, PrefixType::Gs1CompanyPrefix, "9521234");
        assert!(creator.create_from_reference("abc").is_err());
        assert!(creator.create_from_reference("ABC-1/2").is_ok());
    }

    #[test]
    fn test_numeric_creator_refuses_reference() {
        let creator = creator(IdentificationKeyType::Gln, PrefixType::Gs1CompanyPrefix, "9521234");
        assert!(matches!(
            creator.create_from_reference("12"),
            Err(ToolkitError::Unsupported(_))
        ));
    }

    #[test]
    fn test_validate_wrong_length() {
        let err = IdentificationKeyType::Gln
            .validate(PrefixType::Gs1CompanyPrefix, "952123400001", Exclusion::None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Length 12 of GLN must be 13");
    }
}
