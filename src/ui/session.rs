//! Interactive menu session
//!
//! # Workflow
//!
//! ```text
//! Main menu ── Reset → clear cached values
//!     │      └─ Quit / ESC → done
//!     ▼
//! Sub-menu (character set or key type)
//!     ▼
//! Form list (dividers are not selectable)
//!     ▼
//! ┌─→ Form: render, then pick an action
//! │   ├─ Edit <field> → prompt, set value
//! │   ├─ <Submit>     → process, render result
//! │   ├─ Reset        → restore defaults
//! │   └─ Back / ESC   → form list
//! └───┘
//! ```
//!
//! Every prompt goes through [`UserInput`] and every message through
//! [`OutputWriter`], so a whole session can be scripted.

use tracing::{debug, warn};

use super::input::UserInput;
use super::output::OutputWriter;
use super::render::{field_label, field_value, render, render_state};
use crate::KeyformsError;
use crate::context::AppContext;
use crate::demo::{EntryView, FormEnv, FormPath, Menus};
use crate::form::{Control, InputView};
use crate::locale::{t, t_with};

type Result<T> = std::result::Result<T, KeyformsError>;

/// What the user picked on a form
enum FormAction {
    Edit(InputView),
    Submit,
    Reset,
    Back,
}

/// Interactive session over a set of menus
pub struct Session<'a> {
    menus: &'a Menus,
    context: AppContext,
    input: &'a dyn UserInput,
    output: &'a dyn OutputWriter,
    confirm_threshold: u64,
}

impl<'a> Session<'a> {
    #[must_use]
    pub const fn new(
        menus: &'a Menus,
        context: AppContext,
        input: &'a dyn UserInput,
        output: &'a dyn OutputWriter,
        confirm_threshold: u64,
    ) -> Self {
        Self {
            menus,
            context,
            input,
            output,
            confirm_threshold,
        }
    }

    #[must_use]
    pub const fn context(&self) -> &AppContext {
        &self.context
    }

    /// Consume the session, returning its context
    #[must_use]
    pub fn into_context(self) -> AppContext {
        self.context
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns `KeyformsError::Input` if a prompt fails.
    pub fn run(&mut self) -> Result<()> {
        self.output.heading(&t_with(
            "App.titleVersion",
            &[("version", env!("CARGO_PKG_VERSION"))],
        ));

        loop {
            let mut items: Vec<String> = self.menus.iter().map(|menu| menu.title()).collect();
            let reset = items.len();
            items.push(t("App.reset"));
            items.push(t("App.quit"));

            match self.input.prompt_select(&t("App.selectMenu"), &items, Some(0))? {
                Some(index) if index < reset => self.run_menu(index)?,
                Some(index) if index == reset => {
                    self.context.reset();
                    self.output.success(&t("App.resetDone"));
                }
                _ => break,
            }
        }

        debug!("session ended");
        Ok(())
    }

    fn run_menu(&mut self, menu: usize) -> Result<()> {
        let menus = self.menus;
        let Some(tree) = menus.get(menu) else {
            return Ok(());
        };
        let mut items = tree.sub_menu_titles();
        let back = items.len();
        items.push(t("App.back"));

        loop {
            match self.input.prompt_select(&tree.title(), &items, Some(0))? {
                Some(sub_menu) if sub_menu < back => self.run_sub_menu(menu, sub_menu)?,
                _ => return Ok(()),
            }
        }
    }

    fn run_sub_menu(&mut self, menu: usize, sub_menu: usize) -> Result<()> {
        let menus = self.menus;
        let Some(tree) = menus.get(menu) else {
            return Ok(());
        };

        let forms: Vec<(usize, String)> = tree
            .entries(sub_menu)
            .into_iter()
            .enumerate()
            .filter_map(|(entry, view)| match view {
                EntryView::Form { name, .. } => Some((entry, name)),
                EntryView::Divider => None,
            })
            .collect();

        let mut items: Vec<String> = forms.iter().map(|(_, name)| name.clone()).collect();
        items.push(t("App.back"));

        loop {
            match self.input.prompt_select(&t("App.selectForm"), &items, Some(0))? {
                Some(index) if index < forms.len() => {
                    let path = FormPath {
                        menu,
                        sub_menu,
                        entry: forms[index].0,
                    };
                    self.run_form(path)?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Mount the form at `path` and loop over its actions
    ///
    /// # Errors
    ///
    /// Returns `KeyformsError::Input` if a prompt fails. Mount failures are
    /// reported and return to the form list.
    pub fn run_form(&mut self, path: FormPath) -> Result<()> {
        if let Err(e) = self.context.select(self.menus, path) {
            warn!(error = %e, "form failed to mount");
            self.output.error(&e.to_string());
            return Ok(());
        }

        loop {
            let Some(current) = self.context.current() else {
                return Ok(());
            };
            let view = current.form.view();
            render(&view, self.output);

            let mut actions: Vec<FormAction> = view
                .fields
                .iter()
                .filter(|field| field.is_visible())
                .cloned()
                .map(FormAction::Edit)
                .collect();
            actions.extend([FormAction::Submit, FormAction::Reset, FormAction::Back]);

            let items: Vec<String> = actions
                .iter()
                .map(|action| match action {
                    FormAction::Edit(field) => {
                        t_with("App.edit", &[("label", field_label(field))])
                    }
                    FormAction::Submit => view.submit_label.clone(),
                    FormAction::Reset => view.reset_label.clone(),
                    FormAction::Back => t("App.back"),
                })
                .collect();

            let default = actions
                .iter()
                .position(|action| matches!(action, FormAction::Submit));
            let Some(index) = self.input.prompt_select(&t("App.selectAction"), &items, default)? else {
                return Ok(());
            };

            match actions.into_iter().nth(index) {
                Some(FormAction::Edit(field)) => self.edit_field(&field)?,
                Some(FormAction::Submit) => self.submit(),
                Some(FormAction::Reset) => self.context.reset_current(),
                Some(FormAction::Back) | None => return Ok(()),
            }
        }
    }

    fn edit_field(&mut self, field: &InputView) -> Result<()> {
        let label = field_label(field);

        let raw = match &field.control {
            Control::Text { value, required, .. } => {
                self.input.prompt_text(label, Some(value.as_str()), !required)?
            }
            Control::Choice { options, selected } => {
                let names: Vec<String> = options.iter().map(|option| option.name.clone()).collect();
                let default = options.iter().position(|option| option.value == *selected);
                self.input
                    .prompt_select(label, &names, default)?
                    .and_then(|index| options.get(index))
                    .map(|option| option.value.to_string())
            }
            Control::Toggle { checked } => self
                .input
                .prompt_confirm(label, *checked)?
                .map(|checked| checked.to_string()),
            Control::Hidden { .. } => None,
        };

        let (Some(raw), Some(current)) = (raw, self.context.current()) else {
            return Ok(());
        };

        if let Err(e) = current.form.set_value(&field.name, &raw) {
            debug!(field = %field.name, value = %field_value(field), error = %e, "edit rejected");
            self.output.error(&e.to_string());
        }

        Ok(())
    }

    fn submit(&mut self) {
        let env = FormEnv::new(self.input, self.confirm_threshold);

        // Field errors show on the next render
        if let Some(state) = self.context.submit(&env) {
            render_state(state.error.as_deref(), state.result.as_ref(), self.output);
        }
    }
}
