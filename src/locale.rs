//! Display strings resolved from symbolic keys
//!
//! Forms never hold display text directly: they hold a [`LocaleText`] (a key
//! plus interpolation parameters) that is resolved when rendered. Parameters
//! are interpolated with `{{name}}`; `{{name, toLowerCase}}` lower-cases the
//! parameter value. Unknown keys resolve to the key itself.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static CATALOG: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENGLISH.iter().copied().collect());

const ENGLISH: &[(&str, &str)] = &[
    ("App.title", "AIDC Toolkit"),
    ("App.titleVersion", "AIDC Toolkit v{{version}}"),
    ("App.reset", "Reset"),
    ("App.quit", "Quit"),
    ("App.back", "Back"),
    ("App.edit", "Edit {{label}}"),
    ("App.selectMenu", "Select a menu"),
    ("App.selectForm", "Select a form"),
    ("App.selectAction", "Select an action"),
    ("App.resetDone", "Cached values cleared"),
    ("Demo.valueIsRequired", "Value is required."),
    ("Demo.valueIsNotANumber", "Value is not a number."),
    ("Demo.confirmCreateStrings", "This will create {{count}} strings.\nAre you sure?"),
    ("String.stringTitle", "String"),
    ("String.characterSetTitle", "{{name}} String"),
    ("String.sLabel", "String"),
    ("String.lengthLabel", "Length"),
    ("String.lengthText", "Length must be from 0-{{maximumLength}}."),
    ("String.exclusionLabel", "Exclusion"),
    ("String.exclusionNoneLabel", "None"),
    ("String.exclusionFirstZeroLabel", "First zero"),
    ("String.exclusionAllNumericLabel", "All numeric"),
    ("String.exclusionText", "Type of string to be excluded from creation."),
    ("String.tweakLabel", "Tweak"),
    (
        "String.tweakText",
        "If provided, the numerical value of the string \"tweaked\" by this value using an encryption transformer.",
    ),
    ("String.validateSubtitle", "Validate"),
    ("String.stringToValidate", "{{name}} string to validate."),
    ("String.minimumLengthLabel", "Minimum length"),
    (
        "String.minimumLengthText",
        "If provided, the minimum length of the {{name, toLowerCase}} string.",
    ),
    ("String.maximumLengthLabel", "Maximum length"),
    (
        "String.maximumLengthText",
        "If provided, the maximum length of the {{name, toLowerCase}} string.",
    ),
    ("String.createSubtitle", "Create"),
    ("String.valueLabel", "Value"),
    (
        "String.valueText",
        "Numeric value to be converted to {{name, toLowerCase}} string.",
    ),
    ("String.createSequenceSubtitle", "Create sequence"),
    ("String.startValueLabel", "Start value"),
    (
        "String.startValueText",
        "Start of numeric values to be converted to {{name, toLowerCase}} strings.",
    ),
    ("String.countLabel", "Count"),
    (
        "String.countText",
        "Count of numeric values to be converted to {{name, toLowerCase}} strings.",
    ),
    ("String.valueSubtitle", "Value"),
    ("String.stringToConvert", "{{name}} string to convert back to numeric value."),
    ("String.numericCharacterSet", "Numeric"),
    ("String.hexadecimalCharacterSet", "Hexadecimal"),
    ("String.alphabeticCharacterSet", "Alphabetic"),
    ("String.alphanumericCharacterSet", "Alphanumeric"),
    ("String.gs1AI82CharacterSet", "GS1 AI 82"),
    ("String.gs1AI39CharacterSet", "GS1 AI 39"),
    ("GS1.gs1IDKeyTitle", "GS1 ID Key"),
    ("GS1.prefixTypeLabel", "Prefix type"),
    ("GS1.prefixTypeText", "Prefix type underlying the identification key."),
    ("GS1.prefixLabel", "Prefix"),
    ("GS1.prefixText", "Prefix underlying the identification key."),
    ("GS1.identificationKeyLabel", "{{identificationKeyType}}"),
    ("GS1.identificationKeyText", "{{identificationKeyType}} to be validated."),
    ("GS1.valueText", "Numeric value to be converted to reference."),
    ("GS1.exclusionText", "Type of reference to be excluded from creation."),
    ("GS1.sparseLabel", "Sparse"),
    (
        "GS1.sparseText",
        "If true, the value is mapped to a sparse sequence resistant to discovery.",
    ),
    ("GS1.startValueText", "Start of numeric values to be converted to references."),
    ("GS1.countText", "Count of numeric values to be converted to references."),
    ("GS1.createAllSubtitle", "Create all"),
    ("GS1.zeroExpandGTIN12Subtitle", "Zero expand GTIN-12"),
    ("GS1.zeroSuppressedGTIN12Label", "Zero suppressed GTIN-12"),
    ("GS1.zeroSuppressedGTIN12Text", "Zero-suppressed GTIN-12 to be expanded."),
    ("GS1.zeroSuppressGTIN12Subtitle", "Zero suppress GTIN-12"),
    ("GS1.gtin12Label", "GTIN-12"),
    ("GS1.gtin12ToBeZeroSuppressedText", "GTIN-12 to be zero-suppressed."),
    ("GS1.validateAnySubtitle", "Validate any"),
    ("GS1.levelLabel", "Level"),
    ("GS1.levelAnyLabel", "Any"),
    ("GS1.levelRetailConsumerLabel", "Retail consumer"),
    ("GS1.levelOtherThanRetailConsumerLabel", "Other than retail consumer"),
    ("GS1.levelText", "Level at which the GTIN is applied."),
    ("GS1.validateGTIN14Subtitle", "Validate GTIN-14"),
    ("GS1.gtin14Label", "GTIN-14"),
    ("GS1.gtin14ToBeValidatedText", "GTIN-14 to be validated."),
    ("GS1.convertToGTIN14Subtitle", "Convert to GTIN-14"),
    ("GS1.indicatorDigitLabel", "Indicator digit"),
    ("GS1.indicatorDigitText", "If provided, indicator digit to apply to GTIN-14."),
    ("GS1.gtinLabel", "GTIN"),
    ("GS1.gtinToBeConvertedToGTIN14Text", "GTIN to be converted to GTIN-14."),
    ("GS1.normalizeGTINSubtitle", "Normalize"),
    ("GS1.gtinToBeNormalizedText", "GTIN to be normalized."),
    ("GS1.serialComponentLabel", "Serial component"),
    ("GS1.serialComponentText", "Serial component of the identification key."),
    ("GS1.createSerializedSubtitle", "Create serialized"),
    ("GS1.concatenateSubtitle", "Concatenate"),
    ("GS1.baseIdentificationKeyLabel", "Base {{identificationKeyType}}"),
    (
        "GS1.baseIdentificationKeyText",
        "Base {{identificationKeyType}} to which to concatenate serial component.",
    ),
    ("GS1.referenceLabel", "Reference"),
    ("GS1.referenceText", "Reference to be appended to prefix."),
    ("Prefix.gs1CompanyPrefix", "GS1 Company Prefix"),
    ("Prefix.upcCompanyPrefix", "U.P.C. Company Prefix"),
    ("Prefix.gs18Prefix", "GS1-8 Prefix"),
];

/// Resolve `key` with no parameters
#[must_use]
pub fn t(key: &str) -> String {
    t_with(key, &[])
}

/// Resolve `key` and interpolate `params`
///
/// Placeholders without a matching parameter are left as-is.
#[must_use]
pub fn t_with(key: &str, params: &[(&str, &str)]) -> String {
    let Some(template) = CATALOG.get(key) else {
        return key.to_string();
    };

    interpolate(template, params)
}

fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };

        let placeholder = &after[..end];
        let (name, format) = placeholder
            .split_once(',')
            .map_or((placeholder.trim(), None), |(name, format)| {
                (name.trim(), Some(format.trim()))
            });

        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) if format == Some("toLowerCase") => {
                output.push_str(&value.to_lowercase());
            }
            Some((_, value)) => output.push_str(value),
            None => {
                output.push_str("{{");
                output.push_str(placeholder);
                output.push_str("}}");
            }
        }

        rest = &after[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Display text that is resolved when rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleText {
    /// Symbolic key with interpolation parameters
    Key {
        key: &'static str,
        params: Vec<(&'static str, String)>,
    },
    /// Text shown verbatim
    Literal(String),
}

impl LocaleText {
    #[must_use]
    pub const fn key(key: &'static str) -> Self {
        Self::Key {
            key,
            params: Vec::new(),
        }
    }

    /// Add an interpolation parameter
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Self::Key { params, .. } = &mut self {
            params.push((name, value.into()));
        }
        self
    }

    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Resolve to display text
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::Key { key, params } => {
                let params: Vec<(&str, &str)> = params
                    .iter()
                    .map(|(name, value)| (*name, value.as_str()))
                    .collect();
                t_with(key, &params)
            }
            Self::Literal(text) => text.clone(),
        }
    }
}

impl fmt::Display for LocaleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_key() {
        assert_eq!(t("Demo.valueIsRequired"), "Value is required.");
    }

    #[test]
    fn test_unknown_key_resolves_to_itself() {
        assert_eq!(t("Nope.missing"), "Nope.missing");
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(
            t_with("String.characterSetTitle", &[("name", "Numeric")]),
            "Numeric String"
        );
        assert_eq!(
            t_with("Demo.confirmCreateStrings", &[("count", "1500")]),
            "This will create 1500 strings.\nAre you sure?"
        );
    }

    #[test]
    fn test_to_lower_case_format() {
        assert_eq!(
            t_with("String.valueText", &[("name", "GS1 AI 82")]),
            "Numeric value to be converted to gs1 ai 82 string."
        );
    }

    #[test]
    fn test_missing_parameter_left_in_place() {
        assert_eq!(t("String.characterSetTitle"), "{{name}} String");
    }

    #[test]
    fn test_locale_text_resolve() {
        let text = LocaleText::key("GS1.baseIdentificationKeyLabel").with("identificationKeyType", "GRAI");
        assert_eq!(text.to_string(), "Base GRAI");
        assert_eq!(LocaleText::literal("GTIN").resolve(), "GTIN");
    }

    #[test]
    fn test_catalog_keys_unique() {
        assert_eq!(CATALOG.len(), ENGLISH.len());
    }
}
