use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    database::client::Database,
    middleware::{error::AppResult, mw_ctx::CtxState},
    routes::{replies, reviews},
};

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    database.run_migrations().await
}

pub fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(reviews::routes())
        .merge(replies::routes())
        .with_state(ctx_state.clone())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
