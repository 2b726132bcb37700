//! HTTP API module for the Timecard Processing & Compliance Engine.
//!
//! This module provides the REST endpoint that wraps the pure batch
//! computation for hosts that want an RPC surface.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ProcessRequest;
pub use response::{ApiError, BatchError, ProcessResponse};
pub use state::AppState;
