//! # entityhub-api
//!
//! HTTP API layer for EntityHub built on Axum.
//!
//! Each entity collection is served through an [`EntityAdapter`], which
//! maps view-models onto entities, validates them, calls the service and
//! reports a structured [`Outcome`]. Handlers only turn outcomes into
//! HTTP responses.

pub mod adapter;
pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod mapping;
pub mod middleware;
pub mod router;
pub mod state;

pub use adapter::{EntityAdapter, Outcome, RuleViolation};
pub use app::{build_app, run_server};
pub use mapping::ViewMapper;
pub use state::AppState;
