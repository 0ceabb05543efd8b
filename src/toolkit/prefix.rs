//! Allocation-authority prefixes

use super::check::require_numeric;
use super::error::{Result, ToolkitError};
use super::key::{IdentificationKeyCreator, IdentificationKeyType};

/// Kind of prefix an identification key is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixType {
    /// GS1 Company Prefix, 4 to 12 digits
    Gs1CompanyPrefix,
    /// U.P.C. Company Prefix, 6 to 11 digits
    UpcCompanyPrefix,
    /// GS1-8 Prefix, 3 digits (GTIN-8 only)
    Gs18Prefix,
}

impl PrefixType {
    /// All prefix types in enumeration order
    pub const ALL: [Self; 3] = [
        Self::Gs1CompanyPrefix,
        Self::UpcCompanyPrefix,
        Self::Gs18Prefix,
    ];

    /// Enumeration value used by form inputs
    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::Gs1CompanyPrefix => 0,
            Self::UpcCompanyPrefix => 1,
            Self::Gs18Prefix => 2,
        }
    }

    /// Locale resource name of the prefix type label
    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Gs1CompanyPrefix => "Prefix.gs1CompanyPrefix",
            Self::UpcCompanyPrefix => "Prefix.upcCompanyPrefix",
            Self::Gs18Prefix => "Prefix.gs18Prefix",
        }
    }

    const fn length_bounds(self) -> (usize, usize) {
        match self {
            Self::Gs1CompanyPrefix => (4, 12),
            Self::UpcCompanyPrefix => (6, 11),
            Self::Gs18Prefix => (3, 3),
        }
    }
}

impl TryFrom<u64> for PrefixType {
    type Error = ToolkitError;

    fn try_from(value: u64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|prefix_type| prefix_type.value() == value)
            .ok_or_else(|| ToolkitError::range(format!("Prefix type {value} is not recognized")))
    }
}

/// Validated prefix from which identification keys are derived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixManager {
    prefix_type: PrefixType,
    prefix: String,
    gs1_company_prefix: String,
}

impl PrefixManager {
    /// Validate `prefix` as a prefix of `prefix_type`
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Range` if the prefix is not numeric or its
    /// length is outside the bounds for its type.
    pub fn get(prefix_type: PrefixType, prefix: &str) -> Result<Self> {
        require_numeric(prefix)?;

        let (minimum, maximum) = prefix_type.length_bounds();
        let length = prefix.len();

        if length < minimum || length > maximum {
            return Err(ToolkitError::range(if minimum == maximum {
                format!("Length {length} of prefix must be {minimum}")
            } else {
                format!("Length {length} of prefix must be from {minimum} to {maximum}")
            }));
        }

        let gs1_company_prefix = match prefix_type {
            PrefixType::Gs1CompanyPrefix => prefix.to_string(),
            PrefixType::UpcCompanyPrefix => format!("0{prefix}"),
            PrefixType::Gs18Prefix => format!("00000{prefix}"),
        };

        Ok(Self {
            prefix_type,
            prefix: prefix.to_string(),
            gs1_company_prefix,
        })
    }

    /// Prefix type
    #[must_use]
    pub const fn prefix_type(&self) -> PrefixType {
        self.prefix_type
    }

    /// Prefix as entered
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix expressed as a GS1 Company Prefix
    #[must_use]
    pub fn gs1_company_prefix(&self) -> &str {
        &self.gs1_company_prefix
    }

    /// Creator for identification keys of `key_type` under this prefix
    ///
    /// # Errors
    ///
    /// Returns `ToolkitError::Unsupported` if a GS1-8 Prefix is used for a
    /// key type other than GTIN.
    pub fn creator(&self, key_type: IdentificationKeyType) -> Result<IdentificationKeyCreator> {
        IdentificationKeyCreator::new(key_type, self.clone())
    }
}
