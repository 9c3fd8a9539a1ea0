use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    database::table_names::{REPLY_TABLE_NAME, REVIEW_TABLE_NAME},
    entities::{
        reply::{collect_descendants, Reply, ReplyDeletePolicy},
        review::Review,
    },
    interfaces::repositories::{reply::RepliesRepositoryInterface, review::ReviewsRepositoryInterface},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        utils::{db_utils::Pagination, string_utils::get_table_thing},
    },
    models::view::thread::{build_thread, ReplyNode},
    services::thread_audit::{audit_thread, ThreadIssue},
    utils::validate_utils::trim_string,
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReplyInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Reply cannot be empty"))]
    pub text: String,
}

pub struct ReplyService<'a, V, R>
where
    V: ReviewsRepositoryInterface,
    R: RepliesRepositoryInterface,
{
    reviews_repository: &'a V,
    replies_repository: &'a R,
    ctx: &'a Ctx,
    delete_policy: ReplyDeletePolicy,
}

impl<'a, V, R> ReplyService<'a, V, R>
where
    V: ReviewsRepositoryInterface + Send + Sync,
    R: RepliesRepositoryInterface + Send + Sync,
{
    pub fn new(
        reviews_repository: &'a V,
        replies_repository: &'a R,
        ctx: &'a Ctx,
        delete_policy: ReplyDeletePolicy,
    ) -> Self {
        Self {
            reviews_repository,
            replies_repository,
            ctx,
            delete_policy,
        }
    }

    pub async fn create_outer(&self, review_id: &str, input: ReplyInput) -> CtxResult<Reply> {
        input.validate().map_err(CtxError::from(self.ctx))?;
        let author = self.ctx.user_thing()?;
        let review = self.get_review(review_id).await?;

        let reply = self
            .replies_repository
            .create_outer(&review.id, &author, &review.name, &input.text)
            .await
            .map_err(CtxError::from(self.ctx))?;

        info!(reply = %reply.id, review = %review.id, "outer reply created");
        Ok(reply)
    }

    pub async fn create_nested(
        &self,
        review_id: &str,
        parent_id: &str,
        input: ReplyInput,
    ) -> CtxResult<Reply> {
        input.validate().map_err(CtxError::from(self.ctx))?;
        let author = self.ctx.user_thing()?;
        let review = self.get_review(review_id).await?;
        let parent = self.get(parent_id).await?;

        if parent.review != review.id {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: format!(
                    "reply {} does not belong to review {}",
                    parent.id, review.id
                ),
            }));
        }

        let reply = self
            .replies_repository
            .create_nested(&parent, &author, &review.name, &input.text)
            .await
            .map_err(CtxError::from(self.ctx))?;

        info!(reply = %reply.id, parent = %parent.id, depth = reply.depth, "nested reply created");
        Ok(reply)
    }

    pub async fn edit(&self, reply_id: &str, input: ReplyInput) -> CtxResult<Reply> {
        input.validate().map_err(CtxError::from(self.ctx))?;
        let user = self.ctx.user_thing()?;
        let reply = self.get(reply_id).await?;

        if !reply.is_author(&user) {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        self.replies_repository
            .update_text(&reply.id, &input.text)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn delete(&self, reply_id: &str) -> CtxResult<()> {
        let user = self.ctx.user_thing()?;
        let reply = self.get(reply_id).await?;

        if !reply.is_author(&user) {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        let affected = match self.delete_policy {
            ReplyDeletePolicy::Detach => {
                self.replies_repository
                    .delete_detached(&reply)
                    .await
                    .map_err(CtxError::from(self.ctx))?;
                0
            }
            ReplyDeletePolicy::Cascade => {
                let descendants = self.get_descendants(&reply).await?;
                let count = descendants.len();
                self.replies_repository
                    .delete_subtree(&reply, descendants)
                    .await
                    .map_err(CtxError::from(self.ctx))?;
                count
            }
            ReplyDeletePolicy::Reparent => {
                let descendants = self.get_descendants(&reply).await?;
                let count = descendants.len();
                self.replies_repository
                    .delete_reparented(&reply, descendants)
                    .await
                    .map_err(CtxError::from(self.ctx))?;
                count
            }
        };

        info!(
            reply = %reply.id,
            policy = %self.delete_policy,
            descendants = affected,
            "reply deleted"
        );
        Ok(())
    }

    pub async fn get(&self, reply_id: &str) -> CtxResult<Reply> {
        let id = get_table_thing(REPLY_TABLE_NAME, reply_id).map_err(CtxError::from(self.ctx))?;
        self.replies_repository
            .get_by_id(&id)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn get_outer(&self, review_id: &str, pagination: Pagination) -> CtxResult<Vec<Reply>> {
        let review = self.get_review(review_id).await?;
        self.replies_repository
            .get_outer(&review.id, pagination)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn get_children(&self, reply_id: &str) -> CtxResult<Vec<Reply>> {
        let reply = self.get(reply_id).await?;
        self.replies_repository
            .get_children(&reply.id)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn get_thread(&self, review_id: &str) -> CtxResult<Vec<ReplyNode>> {
        let review = self.get_review(review_id).await?;
        let all = self.get_all(&review.id).await?;
        let mut outer: Vec<Reply> = all
            .iter()
            .filter(|r| r.outer && r.depth == 0)
            .cloned()
            .collect();
        outer.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(build_thread(&outer, all))
    }

    pub async fn audit(&self, review_id: &str) -> CtxResult<Vec<ThreadIssue>> {
        let review = self.get_review(review_id).await?;
        let all = self.get_all(&review.id).await?;
        let issues = audit_thread(&all);
        if !issues.is_empty() {
            warn!(review = %review.id, issues = issues.len(), "reply thread is inconsistent");
        }
        Ok(issues)
    }

    async fn get_review(&self, review_id: &str) -> CtxResult<Review> {
        let id =
            get_table_thing(REVIEW_TABLE_NAME, review_id).map_err(CtxError::from(self.ctx))?;
        self.reviews_repository
            .get_by_id(&id)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    async fn get_all(&self, review: &Thing) -> CtxResult<Vec<Reply>> {
        self.replies_repository
            .get_by_review(review)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    async fn get_descendants(&self, reply: &Reply) -> CtxResult<Vec<Thing>> {
        let all = self.get_all(&reply.review).await?;
        Ok(collect_descendants(&all, &reply.id))
    }
}
