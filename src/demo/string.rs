//! Character-set string forms

use super::base::{DemoForm, FormBuilder};
use super::confirm::confirmed;
use super::error::ProcessError;
use super::menu::{FormDescriptor, Menu, SubMenu};
use crate::context::CachedValues;
use crate::form::{EnumInputConfig, FormError, FormOutput, TextInputConfig, ValidatedInputs};
use crate::locale::{LocaleText, t};
use crate::toolkit::{
    AI39_CREATOR, AI82_CREATOR, ALPHABETIC_CREATOR, ALPHANUMERIC_CREATOR, CharacterSetCreator,
    Exclusion, HEXADECIMAL_CREATOR, MAXIMUM_STRING_LENGTH, NUMERIC_CREATOR, StringValidation,
};

/// Properties shared by the forms of one character set
#[derive(Debug, Clone, Copy)]
pub struct StringProperties {
    /// Locale key of the character set name
    pub resource_name: &'static str,
    pub creator: CharacterSetCreator,
}

impl StringProperties {
    fn name(&self) -> String {
        t(self.resource_name)
    }

    fn title(&self) -> LocaleText {
        LocaleText::key("String.characterSetTitle").with("name", self.name())
    }
}

const STRING_PROPERTIES: [StringProperties; 6] = [
    StringProperties {
        resource_name: "String.numericCharacterSet",
        creator: NUMERIC_CREATOR,
    },
    StringProperties {
        resource_name: "String.hexadecimalCharacterSet",
        creator: HEXADECIMAL_CREATOR,
    },
    StringProperties {
        resource_name: "String.alphabeticCharacterSet",
        creator: ALPHABETIC_CREATOR,
    },
    StringProperties {
        resource_name: "String.alphanumericCharacterSet",
        creator: ALPHANUMERIC_CREATOR,
    },
    StringProperties {
        resource_name: "String.gs1AI82CharacterSet",
        creator: AI82_CREATOR,
    },
    StringProperties {
        resource_name: "String.gs1AI39CharacterSet",
        creator: AI39_CREATOR,
    },
];

const VALIDATE: FormDescriptor<StringProperties> =
    FormDescriptor::new("String.validateSubtitle", validate_form);
const CREATE: FormDescriptor<StringProperties> =
    FormDescriptor::new("String.createSubtitle", create_form);
const CREATE_SEQUENCE: FormDescriptor<StringProperties> =
    FormDescriptor::new("String.createSequenceSubtitle", create_sequence_form);
const VALUE: FormDescriptor<StringProperties> =
    FormDescriptor::new("String.valueSubtitle", value_form);

/// The String menu: one sub-menu per character set
#[must_use]
pub fn menu() -> Menu<StringProperties> {
    Menu {
        title: LocaleText::key("String.stringTitle"),
        sub_menus: STRING_PROPERTIES
            .into_iter()
            .map(|properties| SubMenu {
                title: LocaleText::key(properties.resource_name),
                properties,
                entries: vec![Some(VALIDATE), Some(CREATE), Some(CREATE_SEQUENCE), Some(VALUE)],
            })
            .collect(),
    }
}

/// Exclusion choice: None plus whatever the creator supports
pub(crate) fn exclusion_input(support: &[Exclusion], hint: LocaleText) -> EnumInputConfig {
    let mut values = vec![Exclusion::None.value()];
    values.extend(
        support
            .iter()
            .filter(|exclusion| **exclusion != Exclusion::None)
            .map(|exclusion| exclusion.value()),
    );

    EnumInputConfig::new(
        "exclusion",
        values,
        Exclusion::ALL
            .into_iter()
            .map(|exclusion| LocaleText::key(exclusion.resource_name()))
            .collect(),
    )
    .label(LocaleText::key("String.exclusionLabel"))
    .hint(hint)
}

fn string_input(properties: &StringProperties, hint: &'static str) -> TextInputConfig {
    TextInputConfig::string("s")
        .label(LocaleText::key("String.sLabel"))
        .hint(LocaleText::key(hint).with("name", properties.name()))
}

fn length_input() -> TextInputConfig {
    TextInputConfig::number("length")
        .required(true)
        .label(LocaleText::key("String.lengthLabel"))
        .hint(
            LocaleText::key("String.lengthText")
                .with("maximumLength", MAXIMUM_STRING_LENGTH.to_string()),
        )
}

fn tweak_input() -> TextInputConfig {
    TextInputConfig::number("tweak")
        .label(LocaleText::key("String.tweakLabel"))
        .hint(LocaleText::key("String.tweakText"))
}

pub(crate) fn start_value_input(hint: LocaleText) -> TextInputConfig {
    TextInputConfig::number("startValue")
        .required(true)
        .label(LocaleText::key("String.startValueLabel"))
        .hint(hint)
}

pub(crate) fn count_input(hint: LocaleText) -> TextInputConfig {
    TextInputConfig::number("count")
        .required(true)
        .label(LocaleText::key("String.countLabel"))
        .hint(hint)
}

pub(crate) fn value_input(hint: LocaleText) -> TextInputConfig {
    TextInputConfig::number("value")
        .required(true)
        .label(LocaleText::key("String.valueLabel"))
        .hint(hint)
}

fn length(inputs: &ValidatedInputs, name: &str) -> Result<Option<usize>, ProcessError> {
    inputs
        .optional_number(name)?
        .map(|value| {
            usize::try_from(value)
                .map_err(|_| ProcessError::Range(format!("Length {value} is too large")))
        })
        .transpose()
}

fn required_length(inputs: &ValidatedInputs, name: &str) -> Result<usize, ProcessError> {
    length(inputs, name)?.ok_or_else(|| FormError::ValueUnavailable(name.to_string()).into())
}

fn validate_form(properties: &StringProperties, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let creator = properties.creator;

    FormBuilder::new(properties.title(), LocaleText::key(VALIDATE.resource_name))
        .text(string_input(properties, "String.stringToValidate"))
        .text(
            TextInputConfig::number("minimumLength")
                .label(LocaleText::key("String.minimumLengthLabel"))
                .hint(LocaleText::key("String.minimumLengthText").with("name", properties.name())),
        )
        .text(
            TextInputConfig::number("maximumLength")
                .label(LocaleText::key("String.maximumLengthLabel"))
                .hint(LocaleText::key("String.maximumLengthText").with("name", properties.name())),
        )
        .enumeration(exclusion_input(
            creator.exclusion_support(),
            LocaleText::key("String.exclusionText"),
        ))
        .build(cached, move |inputs, _| {
            let s = inputs.text("s")?;
            let validation = StringValidation {
                minimum_length: length(inputs, "minimumLength")?,
                maximum_length: length(inputs, "maximumLength")?,
                exclusion: inputs.enumeration("exclusion")?,
            };

            creator.validate(s, &validation)?;

            Ok(Some(FormOutput::Single(format!("✓ {s}"))))
        })
}

fn create_form(properties: &StringProperties, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let creator = properties.creator;

    FormBuilder::new(properties.title(), LocaleText::key(CREATE.resource_name))
        .result_name("s")
        .text(length_input())
        .text(value_input(
            LocaleText::key("String.valueText").with("name", properties.name()),
        ))
        .enumeration(exclusion_input(
            creator.exclusion_support(),
            LocaleText::key("String.exclusionText"),
        ))
        .text(tweak_input())
        .build(cached, move |inputs, _| {
            let s = creator.create(
                required_length(inputs, "length")?,
                inputs.number("value")?,
                inputs.enumeration("exclusion")?,
                inputs.optional_number("tweak")?,
            )?;

            Ok(Some(FormOutput::Single(s)))
        })
}

fn create_sequence_form(
    properties: &StringProperties,
    cached: &CachedValues,
) -> Result<DemoForm, FormError> {
    let creator = properties.creator;

    FormBuilder::new(properties.title(), LocaleText::key(CREATE_SEQUENCE.resource_name))
        .text(length_input())
        .text(start_value_input(
            LocaleText::key("String.startValueText").with("name", properties.name()),
        ))
        .text(count_input(
            LocaleText::key("String.countText").with("name", properties.name()),
        ))
        .enumeration(exclusion_input(
            creator.exclusion_support(),
            LocaleText::key("String.exclusionText"),
        ))
        .text(tweak_input())
        .build(cached, move |inputs, env| {
            let count = inputs.number("count")?;

            confirmed(env, count, || {
                let strings = creator.create_sequence(
                    required_length(inputs, "length")?,
                    inputs.number("startValue")?,
                    count,
                    inputs.enumeration("exclusion")?,
                    inputs.optional_number("tweak")?,
                )?;

                Ok(FormOutput::Sequence(strings))
            })
        })
}

fn value_form(properties: &StringProperties, cached: &CachedValues) -> Result<DemoForm, FormError> {
    let creator = properties.creator;

    FormBuilder::new(properties.title(), LocaleText::key(VALUE.resource_name))
        .result_name("value")
        .text(string_input(properties, "String.stringToConvert"))
        .enumeration(exclusion_input(
            creator.exclusion_support(),
            LocaleText::key("String.exclusionText"),
        ))
        .text(tweak_input())
        .build(cached, move |inputs, _| {
            let value = creator.value(
                inputs.text("s")?,
                inputs.enumeration("exclusion")?,
                inputs.optional_number("tweak")?,
            )?;

            Ok(Some(FormOutput::Single(value.to_string())))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::FormEnv;
    use crate::form::Control;
    use crate::ui::input::AssumeNo;
    use crate::ui::mock::{MockInput, Response};

    fn numeric() -> StringProperties {
        STRING_PROPERTIES[0]
    }

    #[test]
    fn test_menu_layout() {
        let menu = menu();
        assert_eq!(menu.title.resolve(), "String");
        assert_eq!(menu.sub_menus.len(), 6);
        assert_eq!(menu.sub_menus[4].title.resolve(), "GS1 AI 82");
        assert!(menu.sub_menus.iter().all(|sub_menu| sub_menu.entries.len() == 4));
    }

    #[test]
    fn test_create_numeric_string() {
        let mut cached = CachedValues::default();
        let mut form = create_form(&numeric(), &cached).unwrap();
        form.set_value("length", "6").unwrap();
        form.set_value("value", "123").unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000)).clone();

        assert_eq!(state.result, Some(FormOutput::Single("000123".into())));
        assert_eq!(cached.get("s"), Some("000123"));
        assert_eq!(form.view().title, "Numeric String");
    }

    #[test]
    fn test_created_string_feeds_value_form() {
        let mut cached = CachedValues::default();
        let env = FormEnv::new(&AssumeNo, 1000);

        let mut create = create_form(&numeric(), &cached).unwrap();
        create.set_value("length", "4").unwrap();
        create.set_value("value", "42").unwrap();
        create.submit(&mut cached, &env);
        drop(create);

        let mut value = value_form(&numeric(), &cached).unwrap();
        assert_eq!(value.manager().raw_value("s").as_deref(), Some("0042"));

        let state = value.submit(&mut cached, &env);
        assert_eq!(state.result, Some(FormOutput::Single("42".into())));
        assert_eq!(cached.get("value"), Some("42"));
    }

    #[test]
    fn test_value_of_empty_string_is_a_range_error() {
        let mut cached = CachedValues::default();
        let mut form = value_form(&numeric(), &cached).unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000)).clone();

        assert_eq!(form.manager().error("s"), None);
        assert_eq!(state.error.as_deref(), Some("Length 0 must be from 1 to 40"));
        assert!(state.result.is_none());
    }

    #[test]
    fn test_validate_reports_range_error() {
        let mut cached = CachedValues::default();
        let mut form = validate_form(&numeric(), &cached).unwrap();
        form.set_value("s", "12A").unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000));

        assert!(state.result.is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn test_validate_empty_optional_string() {
        let mut cached = CachedValues::default();
        let mut form = validate_form(&numeric(), &cached).unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000));
        assert_eq!(state.result, Some(FormOutput::Single("✓ ".into())));
    }

    #[test]
    fn test_exclusion_hidden_without_support() {
        let cached = CachedValues::default();
        let alphabetic = STRING_PROPERTIES[2];
        let form = create_form(&alphabetic, &cached).unwrap();
        let view = form.view();
        let exclusion = view.fields.iter().find(|field| field.name == "exclusion").unwrap();

        assert!(!exclusion.is_visible());

        let numeric_form = create_form(&numeric(), &cached).unwrap();
        let view = numeric_form.view();
        let exclusion = view.fields.iter().find(|field| field.name == "exclusion").unwrap();
        assert!(matches!(&exclusion.control, Control::Choice { options, .. } if options.len() == 2));
    }

    #[test]
    fn test_create_sequence_declined_is_not_an_error() {
        let input = MockInput::new([Response::Confirm(false)]);
        let env = FormEnv::new(&input, 1000);
        let mut cached = CachedValues::default();
        let mut form = create_sequence_form(&numeric(), &cached).unwrap();
        form.set_value("length", "6").unwrap();
        form.set_value("startValue", "0").unwrap();
        form.set_value("count", "1500").unwrap();

        let state = form.submit(&mut cached, &env);

        assert!(state.is_empty());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_create_sequence_beyond_largest_start_value() {
        let mut cached = CachedValues::default();
        let mut form = create_sequence_form(&numeric(), &cached).unwrap();
        form.set_value("length", "40").unwrap();
        form.set_value("startValue", &u64::MAX.to_string()).unwrap();
        form.set_value("count", "1").unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000));

        assert_eq!(state.error, None);
        assert_eq!(
            state.result,
            Some(FormOutput::Sequence(vec![format!("{:0>40}", u64::MAX)]))
        );
    }

    #[test]
    fn test_create_sequence_small_count() {
        let mut cached = CachedValues::default();
        let mut form = create_sequence_form(&STRING_PROPERTIES[1], &cached).unwrap();
        form.set_value("length", "2").unwrap();
        form.set_value("startValue", "254").unwrap();
        form.set_value("count", "2").unwrap();

        let state = form.submit(&mut cached, &FormEnv::new(&AssumeNo, 1000));

        assert_eq!(
            state.result,
            Some(FormOutput::Sequence(vec!["FE".into(), "FF".into()]))
        );
    }
}
