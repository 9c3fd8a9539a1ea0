use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;

use crate::config::AppConfig;
use crate::database::client::Database;
use crate::entities::reply::ReplyDeletePolicy;
use crate::utils::jwt::JWT;

pub struct CtxState {
    pub db: Database,
    pub jwt: JWT,
    pub reply_delete_policy: ReplyDeletePolicy,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("reply_delete_policy", &self.reply_delete_policy)
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    let ctx_state = CtxState {
        db,
        jwt: JWT::new(
            config.jwt_secret.clone(),
            Duration::days(config.jwt_duration_days),
        ),
        reply_delete_policy: config.reply_delete_policy,
    };
    Arc::new(ctx_state)
}
