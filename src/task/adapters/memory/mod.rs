//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit testing and local runs without a database.

mod task;

pub use task::InMemoryTaskRepository;
