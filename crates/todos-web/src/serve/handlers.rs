//! HTTP route handlers for the task list.
//!
//! Handlers are kept thin, delegating to [`TaskManager`](todos_core::TaskManager)
//! and the template module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use super::csrf;
use super::error::AppError;
use super::models::{CreateTaskRequest, FormView};
use super::templates;
use super::AppState;

/// GET `/` - Task list with an empty creation form.
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = csrf::token_from_headers(&headers).unwrap_or_else(csrf::new_token);
    render_page(&state, FormView::empty(token)).await
}

/// POST `/` - Create or replace a task.
///
/// A valid submission redirects back to `/`; an invalid one re-renders
/// the page with the submitted values and their errors.
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(request): Form<CreateTaskRequest>,
) -> Result<Response, AppError> {
    let form = request.task_form();
    let mut errors = form.validate().err().unwrap_or_default();

    if state.csrf {
        if let Err(message) = csrf::verify(&headers, request.csrf_token.as_deref()) {
            errors.push_form_error(message);
        }
    }

    if errors.is_empty() {
        state.manager.create_task(&form.id, &form.title).await?;
        return Ok(Redirect::to("/").into_response());
    }

    tracing::debug!(?errors, "Task form rejected");
    let token = csrf::token_from_headers(&headers).unwrap_or_else(csrf::new_token);
    render_page(&state, FormView::rejected(form, errors, token)).await
}

/// GET `/changes_status/{id}/{status}` - Flip a task's status.
///
/// `status` is the value the page displayed; `Close` reopens the task,
/// anything else closes it.
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path((id, status)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    state.manager.toggle_status(&id, &status).await?;
    Ok(Redirect::to("/"))
}

async fn render_page(state: &AppState, view: FormView) -> Result<Response, AppError> {
    let tasks = state.manager.list_tasks().await?;
    let page = templates::render_index(&tasks, &view);

    let mut response = Html(page).into_response();
    csrf::attach_cookie(&mut response, &view.csrf_token);
    Ok(response)
}
