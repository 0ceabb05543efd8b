//! GTIN-specific operations

use super::check::{check_digit, require_numeric, verify_check_digit};
use super::error::{Result, ToolkitError};

/// Level at which a GTIN is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GtinLevel {
    #[default]
    Any,
    RetailConsumer,
    OtherThanRetailConsumer,
}

impl GtinLevel {
    pub const ALL: [Self; 3] = [Self::Any, Self::RetailConsumer, Self::OtherThanRetailConsumer];

    #[must_use]
    pub const fn value(self) -> u64 {
        match self {
            Self::Any => 0,
            Self::RetailConsumer => 1,
            Self::OtherThanRetailConsumer => 2,
        }
    }

    #[must_use]
    pub const fn resource_name(self) -> &'static str {
        match self {
            Self::Any => "GS1.levelAnyLabel",
            Self::RetailConsumer => "GS1.levelRetailConsumerLabel",
            Self::OtherThanRetailConsumer => "GS1.levelOtherThanRetailConsumerLabel",
        }
    }
}

impl TryFrom<u64> for GtinLevel {
    type Error = ToolkitError;

    fn try_from(value: u64) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.value() == value)
            .ok_or_else(|| ToolkitError::range(format!("GTIN level {value} is not recognized")))
    }
}

fn digit_at(s: &str, index: usize) -> u8 {
    s.as_bytes().get(index).copied().unwrap_or(b'0')
}

/// Suppress zeros in a GTIN-12 to produce a zero-suppressed GTIN-12 (8 digits)
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `gtin12` is not a valid GTIN-12 starting
/// with 0 or its digits don't allow suppression.
pub fn zero_suppress(gtin12: &str) -> Result<String> {
    if gtin12.len() != 12 {
        return Err(ToolkitError::range(format!(
            "Length {} of GTIN-12 must be 12",
            gtin12.chars().count()
        )));
    }

    verify_check_digit(gtin12)?;

    if !gtin12.starts_with('0') {
        return Err(ToolkitError::range(format!(
            "GTIN-12 {gtin12} must start with 0 to be zero-suppressed"
        )));
    }

    // Manufacturer digits 1..6, product digits 6..11
    let manufacturer = &gtin12[1..6];
    let product = &gtin12[6..11];
    let check = &gtin12[11..];
    let m = |i: usize| char::from(digit_at(manufacturer, i));
    let p = |i: usize| char::from(digit_at(product, i));

    let body: String = if manufacturer.ends_with("00")
        && matches!(m(2), '0'..='2')
        && product.starts_with("00")
    {
        [m(0), m(1), p(2), p(3), p(4), m(2)].iter().collect()
    } else if manufacturer.ends_with("00") && product.starts_with("000") {
        [m(0), m(1), m(2), p(3), p(4), '3'].iter().collect()
    } else if manufacturer.ends_with('0') && product.starts_with("0000") {
        [m(0), m(1), m(2), m(3), p(4), '4'].iter().collect()
    } else if product.starts_with("0000") && matches!(p(4), '5'..='9') {
        format!("{manufacturer}{}", p(4))
    } else {
        return Err(ToolkitError::range(format!(
            "GTIN-12 {gtin12} is not zero-suppressible"
        )));
    };

    Ok(format!("0{body}{check}"))
}

/// Expand a zero-suppressed GTIN-12 back to a GTIN-12
///
/// # Errors
///
/// Returns `ToolkitError::Range` if `zero_suppressed` is not 8 digits
/// starting with 0 or the expanded check digit is invalid.
pub fn zero_expand(zero_suppressed: &str) -> Result<String> {
    if zero_suppressed.chars().count() != 8 {
        return Err(ToolkitError::range(format!(
            "Length {} of zero-suppressed GTIN-12 must be 8",
            zero_suppressed.chars().count()
        )));
    }

    require_numeric(zero_suppressed)?;

    if !zero_suppressed.starts_with('0') {
        return Err(ToolkitError::range(format!(
            "Zero-suppressed GTIN-12 {zero_suppressed} must start with 0"
        )));
    }

    let body = &zero_suppressed[1..7];
    let check = &zero_suppressed[7..];
    let b = |i: usize| char::from(digit_at(body, i));

    let (manufacturer, product): (String, String) = match b(5) {
        '0'..='2' => (
            [b(0), b(1), b(5), '0', '0'].iter().collect(),
            ['0', '0', b(2), b(3), b(4)].iter().collect(),
        ),
        '3' => (
            [b(0), b(1), b(2), '0', '0'].iter().collect(),
            ['0', '0', '0', b(3), b(4)].iter().collect(),
        ),
        '4' => (
            [b(0), b(1), b(2), b(3), '0'].iter().collect(),
            ['0', '0', '0', '0', b(4)].iter().collect(),
        ),
        _ => (body[..5].to_string(), format!("0000{}", b(5))),
    };

    let gtin12 = format!("0{manufacturer}{product}{check}");
    verify_check_digit(&gtin12)?;

    Ok(gtin12)
}

/// Validate a GTIN of any length at the given level
///
/// An 8-digit GTIN starting with 0 is treated as a zero-suppressed GTIN-12.
///
/// # Errors
///
/// Returns `ToolkitError::Range` describing the first problem found.
pub fn validate_any(gtin: &str, level: GtinLevel) -> Result<()> {
    require_numeric(gtin)?;

    match (gtin.len(), level) {
        (14, GtinLevel::RetailConsumer) => Err(ToolkitError::range(
            "GTIN-14 not supported at retail consumer level",
        )),
        (8, GtinLevel::OtherThanRetailConsumer) => Err(ToolkitError::range(
            "GTIN-8 not supported at other than retail consumer level",
        )),
        (8, _) if gtin.starts_with('0') => zero_expand(gtin).map(|_| ()),
        (8 | 12 | 13 | 14, _) => verify_check_digit(gtin),
        (length, _) => Err(ToolkitError::range(format!(
            "Length {length} of GTIN must be 8, 12, 13 or 14"
        ))),
    }
}

/// Validate a GTIN-14
///
/// # Errors
///
/// Returns `ToolkitError::Range` if the length, characters or check digit
/// are invalid.
pub fn validate_gtin14(gtin14: &str) -> Result<()> {
    let length = gtin14.chars().count();
    if length != 14 {
        return Err(ToolkitError::range(format!(
            "Length {length} of GTIN-14 must be 14"
        )));
    }

    verify_check_digit(gtin14)
}

/// Convert a GTIN of any length to a GTIN-14 with the given indicator digit
///
/// # Errors
///
/// Returns `ToolkitError::Range` if the indicator digit is not a single digit
/// or the GTIN is invalid.
pub fn convert_to_gtin14(indicator_digit: &str, gtin: &str) -> Result<String> {
    if indicator_digit.len() != 1 || !indicator_digit.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ToolkitError::range(format!(
            "Indicator digit {indicator_digit} must be a single digit"
        )));
    }

    validate_any(gtin, GtinLevel::Any)?;

    let gtin = if gtin.len() == 8 && gtin.starts_with('0') {
        zero_expand(gtin)?
    } else {
        gtin.to_string()
    };

    let padded = format!("{gtin:0>14}");
    let body = format!("{indicator_digit}{}", &padded[1..13]);
    let check = check_digit(&body)?;

    Ok(format!("{body}{check}"))
}

/// Normalize a GTIN to its shortest form
///
/// # Errors
///
/// Returns `ToolkitError::Range` if the GTIN is invalid.
pub fn normalize(gtin: &str) -> Result<String> {
    validate_any(gtin, GtinLevel::Any)?;

    let normalized = match gtin.len() {
        14 if gtin.starts_with("000000") => gtin[6..].to_string(),
        14 if gtin.starts_with("00") => gtin[2..].to_string(),
        14 if gtin.starts_with('0') => gtin[1..].to_string(),
        13 if gtin.starts_with('0') => gtin[1..].to_string(),
        8 if gtin.starts_with('0') => zero_expand(gtin)?,
        _ => gtin.to_string(),
    };

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_suppress_product_rule() {
        assert_eq!(zero_suppress("012345000058").unwrap(), "01234558");
        assert_eq!(zero_expand("01234558").unwrap(), "012345000058");
    }

    #[test]
    fn test_zero_suppress_manufacturer_rule() {
        assert_eq!(zero_suppress("042100005264").unwrap(), "04252614");
        assert_eq!(zero_expand("04252614").unwrap(), "042100005264");
    }

    #[test]
    fn test_zero_suppress_not_suppressible() {
        assert!(zero_suppress("614141000012").is_err());
        assert!(zero_suppress("061414100001").is_err());
    }

    #[test]
    fn test_zero_expand_bad_check_digit() {
        assert!(zero_expand("01234559").is_err());
    }

    #[test]
    fn test_validate_any_levels() {
        assert!(validate_any("0614141000012", GtinLevel::Any).is_ok());
        assert!(validate_any("614141000012", GtinLevel::RetailConsumer).is_ok());
        assert!(validate_any("00614141000012", GtinLevel::RetailConsumer).is_err());
        assert!(validate_any("01234558", GtinLevel::OtherThanRetailConsumer).is_err());
        assert!(validate_any("123456", GtinLevel::Any).is_err());
    }

    #[test]
    fn test_convert_and_normalize() {
        let gtin14 = convert_to_gtin14("0", "614141000012").unwrap();
        assert_eq!(gtin14, "00614141000012");
        assert!(validate_gtin14(&gtin14).is_ok());
        assert_eq!(normalize(&gtin14).unwrap(), "614141000012");
        assert_eq!(normalize("0614141000012").unwrap(), "614141000012");
    }

    #[test]
    fn test_convert_with_indicator_digit() {
        let gtin14 = convert_to_gtin14("1", "0614141000012").unwrap();
        assert!(gtin14.starts_with("1061414100001"));
        assert!(validate_gtin14(&gtin14).is_ok());
        assert!(convert_to_gtin14("12", "0614141000012").is_err());
    }

    #[test]
    fn test_normalize_zero_suppressed() {
        assert_eq!(normalize("01234558").unwrap(), "012345000058");
    }

    #[test]
    fn test_level_from_value() {
        assert_eq!(GtinLevel::try_from(1).unwrap(), GtinLevel::RetailConsumer);
    }
}
