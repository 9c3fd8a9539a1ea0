use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use crate::entities::review::Review;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::ListQuery;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::review::ReviewView;
use crate::services::review_service::{ReviewInput, ReviewService};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/reviews", post(create_review))
        .route("/api/reviews", get(get_reviews))
        .route("/api/reviews/:review_id", get(get_review))
        .route("/api/reviews/:review_id", put(edit_review))
        .route("/api/reviews/:review_id", delete(delete_review))
}

async fn create_review(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReviewInput>,
) -> CtxResult<Json<Review>> {
    let review = ReviewService::new(&state.db.reviews, &state.db.replies, &auth_data.ctx)
        .create(input)
        .await?;
    Ok(Json(review))
}

async fn get_reviews(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Query(query): Query<ListQuery>,
) -> CtxResult<Json<Vec<Review>>> {
    let reviews = ReviewService::new(&state.db.reviews, &state.db.replies, &ctx)
        .get_list(query.into())
        .await?;
    Ok(Json(reviews))
}

async fn get_review(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
) -> CtxResult<Json<ReviewView>> {
    let view = ReviewService::new(&state.db.reviews, &state.db.replies, &ctx)
        .get_view(&review_id)
        .await?;
    Ok(Json(view))
}

async fn edit_review(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReviewInput>,
) -> CtxResult<Json<Review>> {
    let review = ReviewService::new(&state.db.reviews, &state.db.replies, &auth_data.ctx)
        .edit(&review_id, input)
        .await?;
    Ok(Json(review))
}

async fn delete_review(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
) -> CtxResult<()> {
    ReviewService::new(&state.db.reviews, &state.db.replies, &auth_data.ctx)
        .delete(&review_id)
        .await
}
