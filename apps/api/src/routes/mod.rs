pub mod documents;
pub mod health;
pub mod options;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/style-options", get(options::handle_style_options))
        .route("/api/v1/paginate", post(documents::handle_paginate))
        // Document sessions
        .route("/api/v1/documents", post(documents::handle_open_document))
        .route(
            "/api/v1/documents/:id",
            get(documents::handle_get_document).delete(documents::handle_close_document),
        )
        .route(
            "/api/v1/documents/:id/layout",
            put(documents::handle_relayout),
        )
        .route("/api/v1/documents/:id/print", get(documents::handle_print))
        .with_state(state)
}
