//! Application services for task operations.

mod service;
mod validation;

pub use service::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
pub use validation::{
    FieldViolation, ValidationErrors, combine, title_violation, validate_create, validate_update,
};
