//! Domain model for task tracking.
//!
//! The domain covers the single `Task` record, its validated scalar values,
//! and the insert and patch values handed to the record store. Infrastructure
//! concerns stay outside of this boundary.

mod error;
mod ids;
mod patch;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use patch::{NewTask, TaskPatch};
pub use task::{PersistedTaskData, Task};
