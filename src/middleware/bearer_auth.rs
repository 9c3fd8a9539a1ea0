use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tracing::debug;
use uuid::Uuid;

use crate::{
    middleware::{ctx::Ctx, mw_ctx::CtxState},
    utils::jwt::TokenType,
};

/// Extractor for routes that require a logged in user.
pub struct BearerAuth {
    pub ctx: Ctx,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for BearerAuth {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => match app_state
                .jwt
                .decode_by_type(token.token(), TokenType::Login)
            {
                Ok(claims) => Ok(BearerAuth {
                    ctx: Ctx::new(Ok(claims.auth), Uuid::new_v4()),
                }),
                Err(err) => {
                    debug!("rejected bearer token: {err}");
                    Err(StatusCode::UNAUTHORIZED)
                }
            },
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }
}
