//! Scripted user input for testing

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::input::{InputError, Result, UserInput};

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Text(String),
    Confirm(bool),
    Select(usize),
    /// User pressed ESC
    Cancel,
}

/// Mock input that replays predetermined responses in order
///
/// Useful for testing without requiring user interaction. Every prompt is
/// recorded and can be inspected with [`MockInput::prompts`].
#[derive(Debug, Default)]
pub struct MockInput {
    responses: Mutex<VecDeque<Response>>,
    prompts: Mutex<Vec<String>>,
}

impl MockInput {
    /// Create a mock that answers with `responses`
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::default(),
        }
    }

    /// Prompts shown so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of unused responses
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn next(&self, prompt: &str) -> Result<Response> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| InputError::Invalid(format!("no scripted response for '{prompt}'")))
    }

    fn unexpected(prompt: &str, response: &Response) -> InputError {
        InputError::Invalid(format!("unexpected response {response:?} for '{prompt}'"))
    }
}

impl UserInput for MockInput {
    fn prompt_text(
        &self,
        prompt: &str,
        _default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>> {
        match self.next(prompt)? {
            Response::Text(text) => Ok(Some(text)),
            Response::Cancel => Ok(None),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(prompt)? {
            Response::Confirm(answer) => Ok(Some(answer)),
            Response::Cancel => Ok(None),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        match self.next(prompt)? {
            Response::Select(index) if index < items.len() => Ok(Some(index)),
            Response::Cancel => Ok(None),
            other => Err(Self::unexpected(prompt, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_replays_in_order() {
        let input = MockInput::new([
            Response::Text("952123".into()),
            Response::Confirm(false),
            Response::Select(1),
        ]);

        assert_eq!(
            input.prompt_text("Prefix", None, false).unwrap(),
            Some("952123".to_string())
        );
        assert_eq!(input.prompt_confirm("Sure?", true).unwrap(), Some(false));
        assert_eq!(
            input
                .prompt_select("Pick", &["a".into(), "b".into()], None)
                .unwrap(),
            Some(1)
        );
        assert_eq!(input.prompts(), vec!["Prefix", "Sure?", "Pick"]);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_mock_cancel() {
        let input = MockInput::new([Response::Cancel]);
        assert_eq!(input.prompt_confirm("Sure?", true).unwrap(), None);
    }

    #[test]
    fn test_mock_exhausted() {
        let input = MockInput::default();
        assert!(matches!(
            input.prompt_confirm("Sure?", true),
            Err(InputError::Invalid(_))
        ));
    }

    #[test]
    fn test_mock_mismatched_response() {
        let input = MockInput::new([Response::Select(5)]);
        assert!(input.prompt_select("Pick", &["a".into()], None).is_err());
    }
}
