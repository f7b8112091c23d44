//! REST surface for the task resource.
//!
//! The router is built from an already-constructed [`TaskService`], so the
//! storage adapter behind it is chosen by the caller.
//!
//! [`TaskService`]: crate::task::services::TaskService

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::{SECURITY_HEADERS, create_router};
