//! GS1 identification key forms

use super::base::{DemoForm, FormBuilder};
use super::confirm::confirmed;
use super::error::ProcessError;
use super::menu::{Entries, FormDescriptor, Menu, SubMenu};
use super::string::{count_input, exclusion_input, start_value_input, value_input};
use crate::context::CachedValues;
use crate::form::{
    BooleanInputConfig, EnumInputConfig, FormError, FormOutput, TextInputConfig, ValidatedInputs,
};
use crate::locale::{LocaleText, t};
use crate::toolkit::gtin;
use crate::toolkit::{
    Exclusion, GtinLevel, IdentificationKeyCreator, IdentificationKeyType, KeyCategory,
    PrefixManager, PrefixType,
};

type Descriptor = FormDescriptor<IdentificationKeyType>;

const VALIDATE: Descriptor = FormDescriptor::new("String.validateSubtitle", validate_form);
const CREATE: Descriptor = FormDescriptor::new("String.createSubtitle", create_form);
const CREATE_SEQUENCE: Descriptor =
    FormDescriptor::new("String.createSequenceSubtitle", create_sequence_form);
const CREATE_ALL: Descriptor = FormDescriptor::new("GS1.createAllSubtitle", create_all_form);
const ZERO_EXPAND: Descriptor =
    FormDescriptor::new("GS1.zeroExpandGTIN12Subtitle", zero_expand_form);
const ZERO_SUPPRESS: Descriptor =
    FormDescriptor::new("GS1.zeroSuppressGTIN12Subtitle", zero_suppress_form);
const VALIDATE_ANY: Descriptor = FormDescriptor::new("GS1.validateAnySubtitle", validate_any_form);
const VALIDATE_GTIN14: Descriptor =
    FormDescriptor::new("GS1.validateGTIN14Subtitle", validate_gtin14_form);
const CONVERT_TO_GTIN14: Descriptor =
    FormDescriptor::new("GS1.convertToGTIN14Subtitle", convert_to_gtin14_form);
const NORMALIZE: Descriptor = FormDescriptor::new("GS1.normalizeGTINSubtitle", normalize_form);
const CREATE_SERIALIZED: Descriptor =
    FormDescriptor::new("GS1.createSerializedSubtitle", create_serialized_form);
const CONCATENATE: Descriptor = FormDescriptor::new("GS1.concatenateSubtitle", concatenate_form);
const CREATE_NON_NUMERIC: Descriptor =
    FormDescriptor::new("String.createSubtitle", create_non_numeric_form);

/// Forms offered for a key type; `None` is a divider
fn entries(key_type: IdentificationKeyType) -> Entries<IdentificationKeyType> {
    let numeric = [Some(VALIDATE), Some(CREATE), Some(CREATE_SEQUENCE), Some(CREATE_ALL)];

    match key_type.category() {
        KeyCategory::Gtin => numeric
            .into_iter()
            .chain([
                None,
                Some(ZERO_EXPAND),
                Some(ZERO_SUPPRESS),
                None,
                Some(VALIDATE_ANY),
                Some(VALIDATE_GTIN14),
                None,
                Some(CONVERT_TO_GTIN14),
                Some(NORMALIZE),
            ])
            .collect(),
        KeyCategory::NonGtinNumeric => numeric.to_vec(),
        KeyCategory::SerializableNumeric => numeric
            .into_iter()
            .chain([None, Some(CREATE_SERIALIZED), Some(CONCATENATE)])
            .collect(),
        KeyCategory::NonNumeric => vec![Some(VALIDATE), Some(CREATE_NON_NUMERIC)],
    }
}

/// The GS1 ID Key menu: one sub-menu per identification key type
#[must_use]
pub fn menu() -> Menu<IdentificationKeyType> {
    Menu {
        title: LocaleText::key("GS1.gs1IDKeyTitle"),
        sub_menus: IdentificationKeyType::ALL
            .into_iter()
            .map(|key_type| SubMenu {
                title: LocaleText::literal(key_type.name()),
                properties: key_type,
                entries: entries(key_type),
            })
            .collect(),
    }
}

fn builder(key_type: IdentificationKeyType, descriptor: &Descriptor) -> FormBuilder {
    FormBuilder::new(
        LocaleText::literal(key_type.name()),
        LocaleText::key(descriptor.resource_name),
    )
}

/// Prefix types offered: GS1-8 only for GTIN, and only GS1 Company Prefix
/// when validating other keys
fn prefix_type_input(key_type: IdentificationKeyType, validate: bool) -> EnumInputConfig {
    let prefix_types: &[PrefixType] = match key_type {
        IdentificationKeyType::Gtin => &PrefixType::ALL,
        _ if validate => &[PrefixType::Gs1CompanyPrefix],
        _ => &[PrefixType::Gs1CompanyPrefix, PrefixType::UpcCompanyPrefix],
    };

    EnumInputConfig::new(
        "prefixType",
        prefix_types.iter().map(|prefix_type| prefix_type.value()).collect(),
        PrefixType::ALL
            .into_iter()
            .map(|prefix_type| LocaleText::key(prefix_type.resource_name()))
            .collect(),
    )
    .label(LocaleText::key("GS1.prefixTypeLabel"))
    .hint(LocaleText::key("GS1.prefixTypeText"))
}

fn prefix_input() -> TextInputConfig {
    TextInputConfig::string("prefix")
        .required(true)
        .label(LocaleText::key("GS1.prefixLabel"))
        .hint(LocaleText::key("GS1.prefixText"))
}

fn identification_key_input(key_type: IdentificationKeyType) -> TextInputConfig {
    TextInputConfig::string("identificationKey")
        .required(true)
        .label(LocaleText::literal(key_type.name()))
        .hint(LocaleText::key("GS1.identificationKeyText").with("identificationKeyType", key_type.name()))
}

fn gtin_input(label: &'static str, hint: &'static str) -> TextInputConfig {
    TextInputConfig::string("identificationKey")
        .required(true)
        .label(LocaleText::key(label))
        .hint(LocaleText::key(hint))
}

fn sparse_input() -> BooleanInputConfig {
    BooleanInputConfig::new("sparse")
        .label(LocaleText::key("GS1.sparseLabel"))
        .hint(LocaleText::key("GS1.sparseText"))
}

fn serial_component_input() -> TextInputConfig {
    TextInputConfig::string("serialComponent")
        .required(true)
        .label(LocaleText::key("GS1.serialComponentLabel"))
        .hint(LocaleText::key("GS1.serialComponentText"))
}

/// Creator for the prefix type and prefix entered in the form
fn creator(
    key_type: IdentificationKeyType,
    inputs: &ValidatedInputs,
) -> Result<IdentificationKeyCreator, ProcessError> {
    let prefix_type: PrefixType = inputs.enumeration("prefixType")?;
    let prefix = PrefixManager::get(prefix_type, inputs.text("prefix")?)?;

    Ok(prefix.creator(key_type)?)
}

fn validate_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let key_type = *key_type;
    let exclusion_support: &[Exclusion] = if key_type.category().is_numeric() {
        &[]
    } else {
        &[Exclusion::AllNumeric]
    };

    builder(key_type, &VALIDATE)
        .enumeration(prefix_type_input(key_type, true))
        .text(identification_key_input(key_type))
        .enumeration(exclusion_input(
            exclusion_support,
            LocaleText::key("GS1.exclusionText"),
        ))
        .build(cached, move |inputs, _| {
            let identification_key = inputs.text("identificationKey")?;

            key_type.validate(
                inputs.enumeration("prefixType")?,
                identification_key,
                inputs.enumeration("exclusion")?,
            )?;

            Ok(Some(FormOutput::Single(format!("✓ {identification_key}"))))
        })
}

fn create_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CREATE)
        .result_name("identificationKey")
        .enumeration(prefix_type_input(key_type, false))
        .text(prefix_input())
        .text(value_input(LocaleText::key("GS1.valueText")))
        .boolean(sparse_input())
        .build(cached, move |inputs, _| {
            let key = creator(key_type, inputs)?
                .create(inputs.number("value")?, inputs.boolean("sparse")?)?;

            Ok(Some(FormOutput::Single(key)))
        })
}

fn create_sequence_form(
    key_type: &IdentificationKeyType,
    cached: &CachedValues,
) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CREATE_SEQUENCE)
        .enumeration(prefix_type_input(key_type, false))
        .text(prefix_input())
        .text(start_value_input(LocaleText::key("GS1.startValueText")))
        .text(count_input(LocaleText::key("GS1.countText")))
        .boolean(sparse_input())
        .build(cached, move |inputs, env| {
            let count = inputs.number("count")?;

            confirmed(env, count, || {
                let keys = creator(key_type, inputs)?.create_sequence(
                    inputs.number("startValue")?,
                    count,
                    inputs.boolean("sparse")?,
                )?;

                Ok(FormOutput::Sequence(keys))
            })
        })
}

fn create_all_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CREATE_ALL)
        .result_name("identificationKey")
        .enumeration(prefix_type_input(key_type, false))
        .text(prefix_input())
        .build(cached, move |inputs, env| {
            let creator = creator(key_type, inputs)?;

            confirmed(env, creator.capacity()?, || {
                Ok(FormOutput::Sequence(creator.create_all()?))
            })
        })
}

fn zero_expand_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    builder(*key_type, &ZERO_EXPAND)
        .result_name("identificationKey")
        .text(
            TextInputConfig::string("zeroSuppressedGTIN12")
                .required(true)
                .label(LocaleText::key("GS1.zeroSuppressedGTIN12Label"))
                .hint(LocaleText::key("GS1.zeroSuppressedGTIN12Text")),
        )
        .build(cached, |inputs, _| {
            let gtin12 = gtin::zero_expand(inputs.text("zeroSuppressedGTIN12")?)?;

            Ok(Some(FormOutput::Single(gtin12)))
        })
}

fn zero_suppress_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    builder(*key_type, &ZERO_SUPPRESS)
        .result_name("zeroSuppressedGTIN12")
        .text(gtin_input("GS1.gtin12Label", "GS1.gtin12ToBeZeroSuppressedText"))
        .build(cached, |inputs, _| {
            let zero_suppressed = gtin::zero_suppress(inputs.text("identificationKey")?)?;

            Ok(Some(FormOutput::Single(zero_suppressed)))
        })
}

fn validate_any_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let level_names: Vec<LocaleText> = GtinLevel::ALL
        .into_iter()
        .map(|level| LocaleText::key(level.resource_name()))
        .collect();

    builder(*key_type, &VALIDATE_ANY)
        .text(identification_key_input(*key_type))
        .enumeration(
            EnumInputConfig::new(
                "gtinLevel",
                GtinLevel::ALL.into_iter().map(GtinLevel::value).collect(),
                level_names,
            )
            .label(LocaleText::key("GS1.levelLabel"))
            .hint(LocaleText::key("GS1.levelText")),
        )
        .build(cached, |inputs, _| {
            let identification_key = inputs.text("identificationKey")?;
            let level: GtinLevel = inputs.enumeration("gtinLevel")?;

            gtin::validate_any(identification_key, level)?;

            Ok(Some(FormOutput::Single(format!(
                "✓ {identification_key} ({})",
                t(level.resource_name())
            ))))
        })
}

fn validate_gtin14_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    builder(*key_type, &VALIDATE_GTIN14)
        .text(gtin_input("GS1.gtin14Label", "GS1.gtin14ToBeValidatedText"))
        .build(cached, |inputs, _| {
            let identification_key = inputs.text("identificationKey")?;

            gtin::validate_gtin14(identification_key)?;

            Ok(Some(FormOutput::Single(format!("✓ {identification_key}"))))
        })
}

fn convert_to_gtin14_form(
    key_type: &IdentificationKeyType,
    cached: &CachedValues,
) -> Result<DemoForm, FormError> {
    builder(*key_type, &CONVERT_TO_GTIN14)
        .result_name("identificationKey")
        .text(
            TextInputConfig::string("indicatorDigit")
                .required(true)
                .label(LocaleText::key("GS1.indicatorDigitLabel"))
                .hint(LocaleText::key("GS1.indicatorDigitText")),
        )
        .text(gtin_input("GS1.gtinLabel", "GS1.gtinToBeConvertedToGTIN14Text"))
        .build(cached, |inputs, _| {
            let gtin14 = gtin::convert_to_gtin14(
                inputs.text("indicatorDigit")?,
                inputs.text("identificationKey")?,
            )?;

            Ok(Some(FormOutput::Single(gtin14)))
        })
}

fn normalize_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    builder(*key_type, &NORMALIZE)
        .result_name("identificationKey")
        .text(gtin_input("GS1.gtinLabel", "GS1.gtinToBeNormalizedText"))
        .build(cached, |inputs, _| {
            let normalized = gtin::normalize(inputs.text("identificationKey")?)?;

            Ok(Some(FormOutput::Single(normalized)))
        })
}

fn create_serialized_form(
    key_type: &IdentificationKeyType,
    cached: &CachedValues,
) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CREATE_SERIALIZED)
        .result_name("identificationKey")
        .enumeration(prefix_type_input(key_type, false))
        .text(prefix_input())
        .text(value_input(LocaleText::key("GS1.valueText")))
        .boolean(sparse_input())
        .text(serial_component_input())
        .build(cached, move |inputs, _| {
            let key = creator(key_type, inputs)?.create_serialized(
                inputs.number("value")?,
                inputs.text("serialComponent")?,
                inputs.boolean("sparse")?,
            )?;

            Ok(Some(FormOutput::Single(key)))
        })
}

fn concatenate_form(key_type: &IdentificationKeyType, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CONCATENATE)
        .result_name("identificationKey")
        .text(
            TextInputConfig::string("identificationKey")
                .required(true)
                .label(
                    LocaleText::key("GS1.baseIdentificationKeyLabel")
                        .with("identificationKeyType", key_type.name()),
                )
                .hint(
                    LocaleText::key("GS1.baseIdentificationKeyText")
                        .with("identificationKeyType", key_type.name()),
                ),
        )
        .text(serial_component_input())
        .build(cached, move |inputs, _| {
            let key = key_type.concatenate(
                inputs.text("identificationKey")?,
                inputs.text("serialComponent")?,
            )?;

            Ok(Some(FormOutput::Single(key)))
        })
}

fn create_non_numeric_form(
    key_type: &IdentificationKeyType,
    cached: &CachedValues,
) -> Result<DemoForm, FormError> {
    let key_type = *key_type;

    builder(key_type, &CREATE_NON_NUMERIC)
        .result_name("identificationKey")
        .enumeration(prefix_type_input(key_type, false))
        .text(prefix_input())
        .text(
            TextInputConfig::string("reference")
                .required(true)
                .label(LocaleText::key("GS1.referenceLabel"))
                .hint(LocaleText::key("GS1.referenceText")),
        )
        .build(cached, move |inputs, _| {
            let key = creator(key_type, inputs)?.create_from_reference(inputs.text("reference")?)?;

            Ok(Some(FormOutput::Single(key)))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::FormEnv;
    use crate::form::{Control, InputView};
    use crate::testing::{cached, mount, submit_declining as submit};
    use crate::ui::input::AssumeYes;
    use crate::ui::mock::{MockInput, Response};

    fn field<'a>(views: &'a [InputView], name: &str) -> &'a InputView {
        views.iter().find(|view| view.name == name).unwrap()
    }

    #[test]
    fn test_menu_sub_menus() {
        let menu = menu();
        let titles: Vec<String> = menu.sub_menus.iter().map(|s| s.title.resolve()).collect();
        assert_eq!(
            titles,
            vec![
                "GTIN", "GLN", "SSCC", "GRAI", "GIAI", "GSRN", "GDTI", "GINC", "GSIN", "GCN", "CPID",
                "GMN"
            ]
        );
        assert_eq!(menu.sub_menus[1].entries.len(), 4);
        assert_eq!(menu.sub_menus[3].entries.len(), 7);
        assert_eq!(menu.sub_menus[4].entries.len(), 2);
        assert_eq!(menu.sub_menus[11].entries.len(), 2);
    }

    #[test]
    fn test_create_gtin_caches_identification_key() {
        let mut cached: CachedValues = [("prefix", "0614141")].into_iter().collect();
        let mut form = create_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        form.set_value("value", "1").unwrap();

        let state = submit(&mut form, &mut cached);

        assert_eq!(state.result, Some(FormOutput::Single("0614141000012".into())));
        assert_eq!(cached.get("identificationKey"), Some("0614141000012"));
        assert_eq!(form.view().title, "GTIN");
    }

    #[test]
    fn test_created_key_prefills_validate() {
        let mut cached: CachedValues = [("prefix", "0614141"), ("value", "1")].into_iter().collect();
        let mut create = create_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        submit(&mut create, &mut cached);
        drop(create);

        let mut validate = validate_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        assert_eq!(
            validate.manager().raw_value("identificationKey").as_deref(),
            Some("0614141000012")
        );

        let state = submit(&mut validate, &mut cached);
        assert_eq!(state.result, Some(FormOutput::Single("✓ 0614141000012".into())));
    }

    #[test]
    fn test_prefix_types_offered() {
        let cached = CachedValues::default();

        let gtin = create_form(&IdentificationKeyType::Gtin, &cached).unwrap().view();
        assert!(matches!(&field(&gtin.fields, "prefixType").control, Control::Choice { options, .. } if options.len() == 3));

        let gln = create_form(&IdentificationKeyType::Gln, &cached).unwrap().view();
        assert!(matches!(&field(&gln.fields, "prefixType").control, Control::Choice { options, .. } if options.len() == 2));

        let validate = validate_form(&IdentificationKeyType::Gln, &cached).unwrap().view();
        assert!(!field(&validate.fields, "prefixType").is_visible());
        assert!(!field(&validate.fields, "exclusion").is_visible());

        let giai = validate_form(&IdentificationKeyType::Giai, &cached).unwrap().view();
        assert!(field(&giai.fields, "exclusion").is_visible());
    }

    #[test]
    fn test_cached_gs1_8_prefix_type_clamped_for_gln() {
        let cached: CachedValues = [("prefixType", "2")].into_iter().collect();
        let form = create_form(&IdentificationKeyType::Gln, &cached).unwrap();
        assert_eq!(form.manager().raw_value("prefixType").as_deref(), Some("0"));
    }

    #[test]
    fn test_bad_prefix_is_range_error() {
        let mut cached: CachedValues = [("prefix", "12"), ("value", "1")].into_iter().collect();
        let mut form = create_form(&IdentificationKeyType::Gln, &cached).unwrap();

        let state = submit(&mut form, &mut cached);

        assert!(state.result.is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_create_sequence_gate() {
        let mut cached: CachedValues = [("prefix", "0614141"), ("startValue", "0"), ("count", "1500")]
            .into_iter()
            .collect();
        let mut form = create_sequence_form(&IdentificationKeyType::Gtin, &cached).unwrap();

        let input = MockInput::new([Response::Confirm(false)]);
        let state = form.submit(&mut cached, &FormEnv::new(&input, 1000));
        assert!(state.is_empty());

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeYes, 1000));
        assert!(matches!(&state.result, Some(FormOutput::Sequence(keys)) if keys.len() == 1500));
    }

    #[test]
    fn test_create_all_removes_stale_result() {
        let mut cached: CachedValues = [("prefix", "06141411234"), ("identificationKey", "stale")]
            .into_iter()
            .collect();
        let mut form = create_all_form(&IdentificationKeyType::Gtin, &cached).unwrap();

        let state = submit(&mut form, &mut cached);

        assert!(matches!(&state.result, Some(FormOutput::Sequence(keys)) if keys.len() == 10));
        assert_eq!(cached.get("identificationKey"), None);
    }

    #[test]
    fn test_zero_suppress_chains_into_zero_expand() {
        let mut cached: CachedValues = [("identificationKey", "012345000058")].into_iter().collect();
        let mut suppress = zero_suppress_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        submit(&mut suppress, &mut cached);
        drop(suppress);

        let mut expand = zero_expand_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        let state = submit(&mut expand, &mut cached);

        assert_eq!(state.result, Some(FormOutput::Single("012345000058".into())));
    }

    #[test]
    fn test_validate_any_names_level() {
        let mut cached: CachedValues = [("identificationKey", "614141000012"), ("gtinLevel", "1")]
            .into_iter()
            .collect();
        let mut form = validate_any_form(&IdentificationKeyType::Gtin, &cached).unwrap();

        let state = submit(&mut form, &mut cached);

        assert_eq!(
            state.result,
            Some(FormOutput::Single("✓ 614141000012 (Retail consumer)".into()))
        );
    }

    #[test]
    fn test_convert_then_normalize() {
        let mut cached: CachedValues = [("indicatorDigit", "0"), ("identificationKey", "614141000012")]
            .into_iter()
            .collect();
        let mut convert = convert_to_gtin14_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        submit(&mut convert, &mut cached);
        drop(convert);
        assert_eq!(cached.get("identificationKey"), Some("00614141000012"));

        let mut normalize = normalize_form(&IdentificationKeyType::Gtin, &cached).unwrap();
        let state = submit(&mut normalize, &mut cached);
        assert_eq!(state.result, Some(FormOutput::Single("614141000012".into())));
    }

    #[test]
    fn test_serialized_and_concatenate() {
        let mut cached: CachedValues = [("prefix", "9521234"), ("value", "5"), ("serialComponent", "ABC")]
            .into_iter()
            .collect();
        let mut create = create_serialized_form(&IdentificationKeyType::Grai, &cached).unwrap();
        let serialized = submit(&mut create, &mut cached).result.unwrap();
        drop(create);

        let base = serialized.as_single().unwrap().trim_end_matches("ABC").to_string();
        cached.insert("identificationKey", base.clone());
        let mut concatenate = concatenate_form(&IdentificationKeyType::Grai, &cached).unwrap();
        let state = submit(&mut concatenate, &mut cached);

        assert_eq!(state.result, Some(serialized));
        assert_eq!(
            concatenate.view().fields[0].label.as_deref(),
            Some("Base GRAI")
        );
    }

    #[test]
    fn test_mounted_from_menu_matches_direct() {
        let seeded = cached(&[("identificationKey", "9521234000013")]);
        let form = mount("gs1-id-key", "gln", "validate", &seeded);

        assert_eq!(form.view().subtitle, "Validate");
        assert_eq!(
            form.manager().raw_value("identificationKey").as_deref(),
            Some("9521234000013")
        );
    }

    #[test]
    fn test_create_non_numeric() {
        let mut cached: CachedValues = [("prefix", "9521234"), ("reference", "ASSET-1")]
            .into_iter()
            .collect();
        let mut form = create_non_numeric_form(&IdentificationKeyType::Giai, &cached).unwrap();

        let state = submit(&mut form, &mut cached);

        assert_eq!(state.result, Some(FormOutput::Single("9521234ASSET-1".into())));
    }

    #[test]
    fn test_create_gmn_with_check_character_pair() {
        let mut cached: CachedValues = [("prefix", "1987654"), ("reference", "Ad4X4bL5ttr2310c")]
            .into_iter()
            .collect();
        let mut form = mount("gs1-id-key", "gmn", "create", &cached);

        let state = submit(&mut form, &mut cached);

        assert_eq!(
            state.result,
            Some(FormOutput::Single("1987654Ad4X4bL5ttr2310c2K".into()))
        );
        assert_eq!(cached.get("identificationKey"), Some("1987654Ad4X4bL5ttr2310c2K"));
    }

    #[test]
    fn test_validate_gmn_check_character_pair() {
        let mut cached = cached(&[("identificationKey", "1987654Ad4X4bL5ttr2310c2K")]);
        let mut form = mount("gs1-id-key", "gmn", "validate", &cached);
        let state = submit(&mut form, &mut cached);
        assert_eq!(
            state.result,
            Some(FormOutput::Single("✓ 1987654Ad4X4bL5ttr2310c2K".into()))
        );

        form.set_value("identificationKey", "1987654Ad4X4bL5ttr2310c2L").unwrap();
        let state = submit(&mut form, &mut cached);
        assert_eq!(
            state.error.as_deref(),
            Some("Invalid check character pair in 1987654Ad4X4bL5ttr2310c2L")
        );
    }
}
