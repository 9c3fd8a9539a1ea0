use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use crate::database::repositories::reply::RepliesRepository;
use crate::database::repositories::review::ReviewsRepository;
use crate::entities::reply::Reply;
use crate::middleware::bearer_auth::BearerAuth;
use crate::middleware::ctx::Ctx;
use crate::middleware::error::CtxResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::db_utils::ListQuery;
use crate::middleware::utils::extractor_utils::JsonOrFormValidated;
use crate::models::view::thread::ReplyNode;
use crate::services::reply_service::{ReplyInput, ReplyService};
use crate::services::thread_audit::ThreadIssue;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/reviews/:review_id/replies", post(create_outer_reply))
        .route("/api/reviews/:review_id/replies", get(get_outer_replies))
        .route(
            "/api/reviews/:review_id/replies/:reply_id/replies",
            post(create_nested_reply),
        )
        .route("/api/reviews/:review_id/thread", get(get_thread))
        .route("/api/reviews/:review_id/audit", get(audit_thread))
        .route("/api/replies/:reply_id", get(get_reply))
        .route("/api/replies/:reply_id", put(edit_reply))
        .route("/api/replies/:reply_id", delete(delete_reply))
        .route("/api/replies/:reply_id/replies", get(get_children))
}

fn reply_service<'a>(
    state: &'a CtxState,
    ctx: &'a Ctx,
) -> ReplyService<'a, ReviewsRepository, RepliesRepository> {
    ReplyService::new(
        &state.db.reviews,
        &state.db.replies,
        ctx,
        state.reply_delete_policy,
    )
}

async fn create_outer_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReplyInput>,
) -> CtxResult<Json<Reply>> {
    let reply = reply_service(&state, &auth_data.ctx)
        .create_outer(&review_id, input)
        .await?;
    Ok(Json(reply))
}

async fn create_nested_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path((review_id, reply_id)): Path<(String, String)>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReplyInput>,
) -> CtxResult<Json<Reply>> {
    let reply = reply_service(&state, &auth_data.ctx)
        .create_nested(&review_id, &reply_id, input)
        .await?;
    Ok(Json(reply))
}

async fn get_outer_replies(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> CtxResult<Json<Vec<Reply>>> {
    let replies = reply_service(&state, &ctx)
        .get_outer(&review_id, query.into())
        .await?;
    Ok(Json(replies))
}

async fn get_thread(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
) -> CtxResult<Json<Vec<ReplyNode>>> {
    let thread = reply_service(&state, &ctx).get_thread(&review_id).await?;
    Ok(Json(thread))
}

async fn audit_thread(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(review_id): Path<String>,
) -> CtxResult<Json<Vec<ThreadIssue>>> {
    let issues = reply_service(&state, &ctx).audit(&review_id).await?;
    Ok(Json(issues))
}

async fn get_reply(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
) -> CtxResult<Json<Reply>> {
    let reply = reply_service(&state, &ctx).get(&reply_id).await?;
    Ok(Json(reply))
}

async fn get_children(
    ctx: Ctx,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
) -> CtxResult<Json<Vec<Reply>>> {
    let replies = reply_service(&state, &ctx).get_children(&reply_id).await?;
    Ok(Json(replies))
}

async fn edit_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
    JsonOrFormValidated(input): JsonOrFormValidated<ReplyInput>,
) -> CtxResult<Json<Reply>> {
    let reply = reply_service(&state, &auth_data.ctx)
        .edit(&reply_id, input)
        .await?;
    Ok(Json(reply))
}

async fn delete_reply(
    auth_data: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(reply_id): Path<String>,
) -> CtxResult<()> {
    reply_service(&state, &auth_data.ctx)
        .delete(&reply_id)
        .await
}
