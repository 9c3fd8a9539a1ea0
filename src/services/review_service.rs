use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    database::table_names::REVIEW_TABLE_NAME,
    entities::review::Review,
    interfaces::repositories::{
        reply::RepliesRepositoryInterface,
        review::{ReviewFields, ReviewsRepositoryInterface},
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        utils::{db_utils::Pagination, string_utils::get_table_thing},
    },
    models::view::review::ReviewView,
    utils::validate_utils::{trim_string, validate_experience, validate_hospital},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct ReviewInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_hospital))]
    pub name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(custom(function = validate_experience))]
    pub subject: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Review text is required"))]
    pub text: String,
    #[validate(range(max = 10, message = "Enter a number between 0 and 10."))]
    pub rating: u8,
}

impl From<ReviewInput> for ReviewFields {
    fn from(value: ReviewInput) -> Self {
        ReviewFields {
            name: value.name,
            subject: value.subject,
            text: value.text,
            rating: value.rating,
        }
    }
}

pub struct ReviewService<'a, V, R>
where
    V: ReviewsRepositoryInterface,
    R: RepliesRepositoryInterface,
{
    reviews_repository: &'a V,
    replies_repository: &'a R,
    ctx: &'a Ctx,
}

impl<'a, V, R> ReviewService<'a, V, R>
where
    V: ReviewsRepositoryInterface + Send + Sync,
    R: RepliesRepositoryInterface + Send + Sync,
{
    pub fn new(reviews_repository: &'a V, replies_repository: &'a R, ctx: &'a Ctx) -> Self {
        Self {
            reviews_repository,
            replies_repository,
            ctx,
        }
    }

    pub async fn create(&self, input: ReviewInput) -> CtxResult<Review> {
        input.validate().map_err(CtxError::from(self.ctx))?;
        let author = self.ctx.user_thing()?;
        let review = self
            .reviews_repository
            .create(&author, input.into())
            .await
            .map_err(CtxError::from(self.ctx))?;
        info!(review = %review.id, "review created");
        Ok(review)
    }

    pub async fn get_list(&self, pagination: Pagination) -> CtxResult<Vec<Review>> {
        self.reviews_repository
            .get_list(pagination)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    /// The review with its outer replies, newest first.
    pub async fn get_view(&self, review_id: &str) -> CtxResult<ReviewView> {
        let review = self.get(review_id).await?;
        let replies = self
            .replies_repository
            .get_outer(&review.id, Pagination::default())
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(ReviewView { review, replies })
    }

    pub async fn get(&self, review_id: &str) -> CtxResult<Review> {
        let id =
            get_table_thing(REVIEW_TABLE_NAME, review_id).map_err(CtxError::from(self.ctx))?;
        self.reviews_repository
            .get_by_id(&id)
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn edit(&self, review_id: &str, input: ReviewInput) -> CtxResult<Review> {
        input.validate().map_err(CtxError::from(self.ctx))?;
        let review = self.get_owned(review_id).await?;
        self.reviews_repository
            .update(&review.id, input.into())
            .await
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn delete(&self, review_id: &str) -> CtxResult<()> {
        let review = self.get_owned(review_id).await?;
        self.reviews_repository
            .delete_with_replies(&review.id)
            .await
            .map_err(CtxError::from(self.ctx))?;
        info!(review = %review.id, "review deleted with its replies");
        Ok(())
    }

    async fn get_owned(&self, review_id: &str) -> CtxResult<Review> {
        let user = self.ctx.user_thing()?;
        let review = self.get(review_id).await?;
        if !review.is_author(&user) {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }
        Ok(review)
    }
}
