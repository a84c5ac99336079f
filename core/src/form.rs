//! Local state of the add-todo form.

use crate::types::Title;

pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a todo title";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add todo. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct AddForm {
    input: String,
    error: Option<String>,
}

impl AddForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the input text. Any inline error goes away.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, adding: bool) -> bool {
        !adding && !self.input.trim().is_empty()
    }

    /// Validate the input. `None` means the submission is blocked and no
    /// request may be made.
    pub fn submit(&mut self) -> Option<Title> {
        self.error = None;
        match Title::parse(&self.input) {
            Ok(title) => Some(title),
            Err(_) => {
                self.error = Some(EMPTY_TITLE_MESSAGE.to_string());
                None
            }
        }
    }

    pub fn succeeded(&mut self) {
        self.input.clear();
    }

    pub fn failed(&mut self) {
        self.error = Some(ADD_FAILED_MESSAGE.to_string());
    }
}
