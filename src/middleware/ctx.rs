use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use surrealdb::sql::Thing;
use uuid::Uuid;

use super::error::{AppError, AppResult, CtxError, CtxResult};
use crate::database::table_names::USER_TABLE_NAME;
use crate::middleware::mw_ctx::CtxState;
use crate::utils::jwt::TokenType;

#[derive(Clone, Debug)]
pub struct Ctx {
    result_user_id: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_user_id: AppResult<String>, req_id: Uuid) -> Self {
        Self {
            result_user_id,
            req_id,
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn user_id(&self) -> CtxResult<String> {
        self.result_user_id
            .clone()
            .map_err(|error| self.to_ctx_error(error))
    }

    /// Record key of the user, without the `table:` prefix.
    pub fn user_thing_id(&self) -> CtxResult<String> {
        let id = self.user_id()?;
        match id.find(':') {
            None => Ok(id),
            Some(ind) => Ok(id[ind + 1..].to_string()),
        }
    }

    pub fn user_thing(&self) -> CtxResult<Thing> {
        Ok(Thing::from((USER_TABLE_NAME, self.user_thing_id()?.as_str())))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError::new(error, self.req_id)
    }
}

// Anonymous requests get a Ctx too; user_id() fails for them.
#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state): State<Arc<CtxState>> = State::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let user_id = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => app_state
                .jwt
                .decode_by_type(token.token(), TokenType::Login)
                .map(|claims| claims.auth)
                .map_err(|_| AppError::AuthFailNoToken),
            None => Err(AppError::AuthFailNoToken),
        };

        Ok(Ctx::new(user_id, Uuid::new_v4()))
    }
}
