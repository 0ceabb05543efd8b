//! Run command - fill in one form from the command line and submit it

use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::RunArgs;
use crate::config::KeyformsConfig;
use crate::context::AppContext;
use crate::demo::{FormEnv, FormState, Menus};
use crate::form::{FormOutput, InputView};
use crate::ui::input::AssumeYes;
use crate::ui::render::{field_label, render_state};
use crate::ui::{OutputWriter, UserInput};
use crate::KeyformsError;

type Result<T> = std::result::Result<T, KeyformsError>;

/// State of the submitted form as printed by `--json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub form: String,
    pub result: Option<FormOutput>,
    pub error: Option<String>,
    pub fields: Vec<InputView>,
}

impl RunReport {
    /// False if a field is invalid or processing failed
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.fields.iter().all(|field| field.error.is_none())
    }
}

/// Mount the form named by `args`, apply the `--set` values and submit once
///
/// Values are seeded into the cached values before mounting, so fields pick
/// them up the same way they pick up values left by other forms. `--yes`
/// answers confirmation prompts with yes instead of asking `input`.
///
/// # Errors
///
/// Returns `KeyformsError::InvalidInput` for a malformed `--set`,
/// `KeyformsError::UnknownForm` if no form matches, and
/// `KeyformsError::Form` if a value is not allowed for its field.
pub fn submit(
    menus: &Menus,
    config: &KeyformsConfig,
    args: &RunArgs,
    input: &dyn UserInput,
) -> Result<RunReport> {
    let values = args.values()?;

    let path = menus
        .find(&args.menu, &args.sub_menu, &args.form)
        .ok_or_else(|| {
            KeyformsError::UnknownForm(format!("{} / {} / {}", args.menu, args.sub_menu, args.form))
        })?;

    let mut context = AppContext::new(config.initial_cached_values());
    for (name, value) in &values {
        context.cached_values_mut().insert(name.as_str(), value.as_str());
    }

    let current = context.select(menus, path)?;
    for (name, value) in &values {
        if current.form.field(name).is_some() {
            current.form.set_value(name, value)?;
        } else {
            warn!(name = %name, "value is not a field of this form");
        }
    }

    let form = menus.describe(path);
    debug!(form = %form, "submitting");

    let env = if args.yes {
        FormEnv::new(&AssumeYes, config.confirm_threshold)
    } else {
        FormEnv::new(input, config.confirm_threshold)
    };
    let FormState { result, error } = context.submit(&env).cloned().unwrap_or_default();

    let fields = context
        .current()
        .map(|current| current.form.view().fields)
        .unwrap_or_default();

    Ok(RunReport {
        form,
        result,
        error,
        fields,
    })
}

/// Execute the run command
///
/// Returns whether the form produced no error.
///
/// # Errors
///
/// As [`submit`], plus `KeyformsError::Json` if the report cannot be
/// serialized.
pub fn execute(
    menus: &Menus,
    config: &KeyformsConfig,
    args: &RunArgs,
    input: &dyn UserInput,
    output: &dyn OutputWriter,
    quiet: bool,
) -> Result<bool> {
    let report = submit(menus, config, args, input)?;

    if args.json {
        output.write(&serde_json::to_string_pretty(&report)?);
        return Ok(report.succeeded());
    }

    if !quiet {
        output.heading(&report.form);
    }

    for field in &report.fields {
        if let Some(error) = &field.error {
            output.error(&format!("{}: {error}", field_label(field)));
        }
    }
    render_state(report.error.as_deref(), report.result.as_ref(), output);

    Ok(report.succeeded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::input::AssumeNo;
    use crate::ui::output::BufferWriter;

    fn args(menu: &str, sub_menu: &str, form: &str, set: &[&str]) -> RunArgs {
        RunArgs {
            menu: menu.to_string(),
            sub_menu: sub_menu.to_string(),
            form: form.to_string(),
            set: set.iter().map(ToString::to_string).collect(),
            yes: false,
            json: false,
        }
    }

    #[test]
    fn test_run_creates_gtin() {
        let report = submit(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args("gs1-id-key", "gtin", "create", &["prefix=0614141", "value=1"]),
            &AssumeNo,
        )
        .unwrap();

        assert!(report.succeeded());
        assert_eq!(report.result, Some(FormOutput::Single("0614141000012".into())));
        assert_eq!(report.form, "GS1 ID Key / GTIN / Create");
    }

    #[test]
    fn test_config_initial_values_seed_fields() {
        let mut config = KeyformsConfig::default();
        config
            .initial_values
            .insert("prefix".to_string(), "0614141".to_string());

        let report = submit(
            &Menus::standard(),
            &config,
            &args("GS1 ID Key", "GTIN", "Create", &["value=1"]),
            &AssumeNo,
        )
        .unwrap();

        assert_eq!(report.result, Some(FormOutput::Single("0614141000012".into())));
    }

    #[test]
    fn test_run_reports_field_errors() {
        let output = BufferWriter::new();
        let ok = execute(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args("string", "numeric", "create", &["length=x"]),
            &AssumeNo,
            &output,
            true,
        )
        .unwrap();

        assert!(!ok);
        assert!(output.contains("Value is not a number."));
        assert!(output.contains("Value is required."));
    }

    #[test]
    fn test_run_range_error_fails() {
        let output = BufferWriter::new();
        let ok = execute(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args("string", "numeric", "create", &["length=50", "value=0"]),
            &AssumeNo,
            &output,
            true,
        )
        .unwrap();

        assert!(!ok);
        assert!(output.contains("40"));
    }

    #[test]
    fn test_run_declined_sequence_succeeds_without_result() {
        let report = submit(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args(
                "string",
                "numeric",
                "create-sequence",
                &["length=4", "startValue=0", "count=2000"],
            ),
            &AssumeNo,
        )
        .unwrap();

        assert!(report.succeeded());
        assert!(report.result.is_none());
    }

    #[test]
    fn test_run_yes_skips_prompt() {
        let mut run = args(
            "string",
            "numeric",
            "create-sequence",
            &["length=4", "startValue=0", "count=2000"],
        );
        run.yes = true;

        let report = submit(&Menus::standard(), &KeyformsConfig::default(), &run, &AssumeNo).unwrap();

        assert!(matches!(report.result, Some(FormOutput::Sequence(ref strings)) if strings.len() == 2000));
    }

    #[test]
    fn test_run_json() {
        let output = BufferWriter::new();
        let mut run = args("string", "hexadecimal", "value", &["s=FF"]);
        run.json = true;

        let ok = execute(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &run,
            &AssumeNo,
            &output,
            false,
        )
        .unwrap();

        assert!(ok);
        let json: serde_json::Value = serde_json::from_str(&output.lines()[0]).unwrap();
        assert_eq!(json["result"], "255");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_unknown_form() {
        let result = submit(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args("string", "numeric", "zero-expand-gtin-12", &[]),
            &AssumeNo,
        );
        assert!(matches!(result, Err(KeyformsError::UnknownForm(_))));
    }

    #[test]
    fn test_enum_value_not_allowed() {
        let result = submit(
            &Menus::standard(),
            &KeyformsConfig::default(),
            &args("gs1-id-key", "gln", "create", &["prefixType=2"]),
            &AssumeNo,
        );
        assert!(matches!(result, Err(KeyformsError::Form(_))));
    }
}
