//! Form-driven browser client for the REST API.
//!
//! The client keeps no state between page loads: every request builds a
//! [`TaskBoard`], fetches the full list from the API, applies at most one
//! mutation and re-fetches before rendering.

pub mod api;
pub mod board;
pub mod render;
pub mod web;

pub use api::{HttpTaskApi, TaskApi, TaskApiError, TaskDraft, TaskView};
pub use board::TaskBoard;
pub use render::BoardRenderer;
pub use web::{WebError, create_web_router, serve_web};

#[cfg(test)]
mod tests;
