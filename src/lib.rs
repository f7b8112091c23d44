//! Taskboard: a minimal task-tracking REST service and browser client.
//!
//! The service exposes list, create, update and delete operations over a
//! single `PostgreSQL` table. The client is a server-rendered page that
//! talks to the service over HTTP.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: task values and invariants with no infrastructure
//!   dependencies
//! - **Ports**: the record store contract ([`task::ports::TaskRepository`])
//!   and the client's view of the API ([`client::TaskApi`])
//! - **Adapters**: `PostgreSQL` and in-memory stores, the reqwest API client
//!
//! # Modules
//!
//! - [`task`]: domain, record store and validation service
//! - [`http`]: axum router, handlers and error mapping
//! - [`client`]: view model, page rendering and form routes
//! - [`config`]: environment configuration for both processes
//! - [`server`]: API process bootstrap
//! - [`telemetry`]: tracing subscriber setup

pub mod client;
pub mod config;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;
