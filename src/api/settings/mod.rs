//! Settings API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Settings router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    // Read routes: any authenticated user needs the picklists for forms
    let read_routes = Router::new().route("/{kind}", get(handler::list));

    // Manage routes: admin only
    let manage_routes = Router::new()
        .route("/{kind}", axum::routing::post(handler::create))
        .route(
            "/{kind}/{id}",
            axum::routing::put(handler::rename).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
