//! Task tracking: the single resource managed by taskboard.
//!
//! A task is created with a title and optional description, toggled between
//! open and completed, edited field by field, and deleted permanently. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Validation and orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
