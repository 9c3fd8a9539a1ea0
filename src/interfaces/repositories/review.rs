use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::review::Review;
use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;

#[derive(Debug, Clone)]
pub struct ReviewFields {
    pub name: String,
    pub subject: String,
    pub text: String,
    pub rating: u8,
}

#[async_trait]
pub trait ReviewsRepositoryInterface {
    async fn create(&self, author: &Thing, fields: ReviewFields) -> AppResult<Review>;
    async fn get_by_id(&self, id: &Thing) -> AppResult<Review>;
    async fn get_list(&self, pagination: Pagination) -> AppResult<Vec<Review>>;
    async fn update(&self, id: &Thing, fields: ReviewFields) -> AppResult<Review>;
    /// Deletes the review together with every reply attached to it.
    async fn delete_with_replies(&self, id: &Thing) -> AppResult<()>;
}
