//! Plain-text rendering of forms and their results

use crate::demo::FormView;
use crate::form::{Control, FormOutput, InputView};

use super::output::OutputWriter;

/// One-line value display of a field
#[must_use]
pub fn field_value(view: &InputView) -> String {
    match &view.control {
        Control::Text { value, .. } | Control::Hidden { value } => value.clone(),
        Control::Choice { options, selected } => options
            .iter()
            .find(|option| option.value == *selected)
            .map_or_else(|| selected.to_string(), |option| option.name.clone()),
        Control::Toggle { checked } => (if *checked { "☑" } else { "☐" }).to_string(),
    }
}

/// Label of a field, falling back to its name
#[must_use]
pub fn field_label(view: &InputView) -> &str {
    view.label.as_deref().unwrap_or(&view.name)
}

/// Write a form: heading, visible fields with their errors, then the state
/// of the last submit
pub fn render(view: &FormView, out: &dyn OutputWriter) {
    out.heading(&format!("{} / {}", view.title, view.subtitle));

    for field in view.fields.iter().filter(|field| field.is_visible()) {
        out.write(&format!("  {}: {}", field_label(field), field_value(field)));

        if let Some(hint) = &field.hint {
            out.info(&format!("    {hint}"));
        }
        if let Some(error) = &field.error {
            out.error(&format!("    {error}"));
        }
    }

    out.info(&format!("[{}] [{}]", view.submit_label, view.reset_label));
    render_state(view.error.as_deref(), view.result.as_ref(), out);
}

/// Write the error banner or the result of a submit
pub fn render_state(error: Option<&str>, result: Option<&FormOutput>, out: &dyn OutputWriter) {
    if let Some(error) = error {
        out.error(error);
    }

    match result {
        Some(FormOutput::Single(s)) => out.success(s),
        Some(FormOutput::Sequence(strings)) => {
            let width = strings.len().to_string().len();
            for (index, s) in strings.iter().enumerate() {
                out.write(&format!("{:>width$}. {s}", index + 1));
            }
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ChoiceOption;
    use crate::ui::output::{BufferWriter, MessageLevel};

    fn text_field(name: &str, value: &str, error: Option<&str>) -> InputView {
        InputView {
            name: name.to_string(),
            label: None,
            hint: None,
            control: Control::Text {
                value: value.to_string(),
                number: false,
                required: true,
            },
            error: error.map(ToString::to_string),
        }
    }

    fn view(fields: Vec<InputView>) -> FormView {
        FormView {
            title: "Numeric".into(),
            subtitle: "Create".into(),
            fields,
            submit_label: "Create".into(),
            reset_label: "Reset".into(),
            error: None,
            result: None,
        }
    }

    #[test]
    fn test_field_value_choice_uses_name() {
        let field = InputView {
            name: "exclusion".into(),
            label: Some("Exclusion".into()),
            hint: None,
            control: Control::Choice {
                options: vec![
                    ChoiceOption { value: 0, name: "None".into() },
                    ChoiceOption { value: 2, name: "All numeric".into() },
                ],
                selected: 2,
            },
            error: None,
        };

        assert_eq!(field_value(&field), "All numeric");
        assert_eq!(field_label(&field), "Exclusion");
    }

    #[test]
    fn test_render_skips_hidden_fields() {
        let out = BufferWriter::new();
        let hidden = InputView {
            name: "prefixType".into(),
            label: None,
            hint: None,
            control: Control::Hidden { value: "0".into() },
            error: None,
        };

        render(&view(vec![text_field("length", "6", None), hidden]), &out);

        assert_eq!(
            out.lines(),
            vec!["Numeric / Create", "  length: 6", "[Create] [Reset]"]
        );
    }

    #[test]
    fn test_render_field_error_and_banner() {
        let out = BufferWriter::new();
        let mut form = view(vec![text_field("length", "", Some("Value is required."))]);
        form.error = Some("Length 50 must be less than or equal to 40".into());

        render(&form, &out);

        let errors: Vec<String> = out
            .messages()
            .into_iter()
            .filter(|(level, _)| *level == MessageLevel::Error)
            .map(|(_, message)| message)
            .collect();
        assert_eq!(
            errors,
            vec!["    Value is required.", "Length 50 must be less than or equal to 40"]
        );
    }

    #[test]
    fn test_render_sequence_numbered() {
        let out = BufferWriter::new();
        let strings: Vec<String> = (0..10).map(|i| format!("{i:02}")).collect();

        render_state(None, Some(&FormOutput::Sequence(strings)), &out);

        let lines = out.lines();
        assert_eq!(lines[0], " 1. 00");
        assert_eq!(lines[9], "10. 09");
    }
}
