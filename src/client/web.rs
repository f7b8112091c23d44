//! Form-driven web routes serving the task page.
//!
//! Each POST performs one mutation through a fresh [`TaskBoard`]. When the
//! action leaves no message the browser is redirected back to `/`;
//! otherwise the page is rendered directly with the message shown.

use super::{
    api::{HttpTaskApi, TaskApi},
    board::TaskBoard,
    render::BoardRenderer,
};
use crate::{config::ClientConfig, server::shutdown_signal};
use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors raised by the web client.
#[derive(Debug, Error)]
pub enum WebError {
    /// The page template failed to load or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    /// The listener could not bind or the server stopped abnormally.
    #[error("web server I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "web client failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

/// Shared state for the web routes.
struct WebState<A: TaskApi> {
    api: Arc<A>,
    renderer: Arc<BoardRenderer>,
}

impl<A: TaskApi> Clone for WebState<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

/// Create form fields; missing inputs read as empty.
#[derive(Debug, Deserialize)]
struct TaskForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Toggle form: the completion state shown when the page was rendered.
#[derive(Debug, Deserialize)]
struct ToggleForm {
    #[serde(default)]
    completed: bool,
}

/// Builds the web router over `api`.
pub fn create_web_router<A>(api: Arc<A>, renderer: Arc<BoardRenderer>) -> Router
where
    A: TaskApi + 'static,
{
    Router::new()
        .route("/", get(show_board::<A>).post(add_task::<A>))
        .route("/tasks/{id}/toggle", post(toggle_task::<A>))
        .route("/tasks/{id}/delete", post(delete_task::<A>))
        .with_state(WebState { api, renderer })
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Serves the web client until Ctrl-C.
///
/// # Errors
///
/// Returns [`WebError`] when the template cannot be loaded or the listener
/// fails.
pub async fn serve_web(config: ClientConfig) -> Result<(), WebError> {
    let renderer = Arc::new(BoardRenderer::new()?);
    let api = Arc::new(HttpTaskApi::new(config.api_url.clone()));
    let app = create_web_router(api, renderer);

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(
        address = %bind_address,
        api = %config.api_url,
        "taskboard web client listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("taskboard web client stopped");
    Ok(())
}

async fn show_board<A: TaskApi + 'static>(
    State(state): State<WebState<A>>,
) -> Result<Html<String>, WebError> {
    let mut board = TaskBoard::new(Arc::clone(&state.api));
    board.mount().await;
    Ok(Html(state.renderer.render(&board)?))
}

async fn add_task<A: TaskApi + 'static>(
    State(state): State<WebState<A>>,
    Form(form): Form<TaskForm>,
) -> Result<Response, WebError> {
    let mut board = TaskBoard::new(Arc::clone(&state.api));
    board.submit(&form.title, &form.description).await;
    if board.form_error().is_some() {
        board.mount().await;
    }
    finish(&state, &board)
}

async fn toggle_task<A: TaskApi + 'static>(
    State(state): State<WebState<A>>,
    Path(id): Path<i64>,
    Form(form): Form<ToggleForm>,
) -> Result<Response, WebError> {
    let mut board = TaskBoard::new(Arc::clone(&state.api));
    board.toggle(id, form.completed).await;
    finish(&state, &board)
}

async fn delete_task<A: TaskApi + 'static>(
    State(state): State<WebState<A>>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let mut board = TaskBoard::new(Arc::clone(&state.api));
    board.delete(id).await;
    finish(&state, &board)
}

fn finish<A: TaskApi>(state: &WebState<A>, board: &TaskBoard<A>) -> Result<Response, WebError> {
    if board.has_messages() {
        Ok(Html(state.renderer.render(board)?).into_response())
    } else {
        Ok(Redirect::to("/").into_response())
    }
}
