//! HTML template rendering for the task page.
//!
//! Templates are stored as separate files for maintainability:
//! - `templates/index.html` - HTML structure
//! - `templates/styles.css` - CSS styles
//!
//! Files are embedded at compile time using `include_str!`.

use todos_core::{Task, TaskStatus};

use super::models::FormView;

const HTML_TEMPLATE: &str = include_str!("templates/index.html");
const STYLES: &str = include_str!("templates/styles.css");

/// Render the task page.
///
/// Substitutes the placeholders in the template:
/// - `{{STYLES}}` - CSS styles
/// - `{{CSRF_TOKEN}}` - anti-forgery token for the hidden field
/// - `{{FORM_ERRORS}}`, `{{ID_ERRORS}}`, `{{TITLE_ERRORS}}` - validation messages
/// - `{{ID_VALUE}}`, `{{TITLE_VALUE}}` - submitted values, echoed on error
/// - `{{TASK_ROWS}}` - one table row per task
pub fn render_index(tasks: &[Task], view: &FormView) -> String {
    fill(
        HTML_TEMPLATE,
        &[
            ("STYLES", STYLES.to_string()),
            ("CSRF_TOKEN", html_escape(&view.csrf_token)),
            ("FORM_ERRORS", render_errors(&view.errors.form)),
            ("ID_ERRORS", render_errors(&view.errors.id)),
            ("TITLE_ERRORS", render_errors(&view.errors.title)),
            ("ID_VALUE", html_escape(&view.form.id)),
            ("TITLE_VALUE", html_escape(&view.form.title)),
            ("TASK_ROWS", render_rows(tasks)),
        ],
    )
}

/// Replace `{{NAME}}` placeholders in a single pass, so substituted text
/// is never scanned for further placeholders.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match values.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", html_escape(e)))
        .collect();
    format!("        <ul class=\"errors\">{}</ul>", items)
}

fn render_rows(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "        <tr><td colspan=\"4\" class=\"empty\">No tasks yet</td></tr>".to_string();
    }

    tasks.iter().map(render_row).collect::<Vec<_>>().join("\n")
}

fn render_row(task: &Task) -> String {
    let (class, action) = match task.status {
        TaskStatus::Open => ("status-open", "Close"),
        TaskStatus::Close => ("status-close", "Reopen"),
    };

    format!(
        "        <tr class=\"{class}\"><td>{id}</td><td>{title}</td><td>{status}</td><td><a href=\"{href}\">{action}</a></td></tr>",
        class = class,
        id = html_escape(&task.id),
        title = html_escape(&task.title),
        status = task.status,
        href = html_escape(&toggle_href(task)),
        action = action,
    )
}

/// Link that flips `task`'s status, carrying the status shown on the page.
pub fn toggle_href(task: &Task) -> String {
    format!(
        "/changes_status/{}/{}",
        urlencoding::encode(&task.id),
        task.status.as_str()
    )
}

/// Escape HTML special characters to prevent XSS.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
