//! Report API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Report router; scope is enforced inside the handlers
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/reports/balance", get(handler::balance))
}
