//! Time Record API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_leader_or_admin;
use crate::core::ServerState;

/// Time record router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/records", routes())
}

fn routes() -> Router<ServerState> {
    // Read routes: scope is enforced inside the handlers
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/options/{flow}", get(handler::options))
        .route("/{id}", get(handler::get_by_id));

    // Write routes: leaders and admins only
    let write_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_leader_or_admin));

    read_routes.merge(write_routes)
}
