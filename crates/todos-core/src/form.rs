//! Validation for the task creation form.
//!
//! The form has two required text fields, `id` and `title`. A field
//! holding only whitespace counts as missing. Accepted values are used
//! as submitted, without trimming.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Message attached to a required field that was left empty.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Raw form submission.
///
/// Missing fields deserialize as empty strings so that validation, not
/// decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskForm {
    pub id: String,
    pub title: String,
}

/// Validation errors for a [`TaskForm`], grouped by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub id: Vec<String>,
    pub title: Vec<String>,
    /// Errors not tied to a single field (e.g. anti-forgery token).
    pub form: Vec<String>,
}

impl FormErrors {
    /// Returns true if no field or form-level error was recorded.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.title.is_empty() && self.form.is_empty()
    }

    /// Adds a form-level error.
    pub fn push_form_error(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }
}

impl TaskForm {
    /// Creates a form from raw field values.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Checks the required fields.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if is_blank(&self.id) {
            errors.id.push(REQUIRED_MESSAGE.to_string());
        }
        if is_blank(&self.title) {
            errors.title.push(REQUIRED_MESSAGE.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the form and builds the task to persist.
    pub fn into_task(self) -> Result<Task, FormErrors> {
        self.validate()?;
        Ok(Task::new(self.id, self.title))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
