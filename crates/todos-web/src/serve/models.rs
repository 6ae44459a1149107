//! Form payloads and view models for the task page.

use serde::Deserialize;

use todos_core::{FormErrors, TaskForm};

/// Body of `POST /`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub id: String,
    pub title: String,
    pub csrf_token: Option<String>,
}

impl CreateTaskRequest {
    /// The task fields, without the anti-forgery token.
    pub fn task_form(&self) -> TaskForm {
        TaskForm::new(self.id.clone(), self.title.clone())
    }
}

/// State of the creation form as rendered on the page.
#[derive(Debug, Default)]
pub struct FormView {
    pub form: TaskForm,
    pub errors: FormErrors,
    pub csrf_token: String,
}

impl FormView {
    /// A blank form.
    pub fn empty(csrf_token: impl Into<String>) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            ..Self::default()
        }
    }

    /// A form echoing rejected input together with its errors.
    pub fn rejected(form: TaskForm, errors: FormErrors, csrf_token: impl Into<String>) -> Self {
        Self {
            form,
            errors,
            csrf_token: csrf_token.into(),
        }
    }
}
