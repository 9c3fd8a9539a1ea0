use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::entities::reply::Reply;
use crate::middleware::error::AppResult;
use crate::middleware::utils::db_utils::Pagination;

#[async_trait]
pub trait RepliesRepositoryInterface {
    async fn create_outer(
        &self,
        review: &Thing,
        author: &Thing,
        name: &str,
        text: &str,
    ) -> AppResult<Reply>;
    /// Creates the child and appends it to the parent's `replies` in one transaction.
    async fn create_nested(
        &self,
        parent: &Reply,
        author: &Thing,
        name: &str,
        text: &str,
    ) -> AppResult<Reply>;
    async fn get_by_id(&self, id: &Thing) -> AppResult<Reply>;
    async fn get_outer(&self, review: &Thing, pagination: Pagination) -> AppResult<Vec<Reply>>;
    async fn get_children(&self, parent: &Thing) -> AppResult<Vec<Reply>>;
    async fn get_by_review(&self, review: &Thing) -> AppResult<Vec<Reply>>;
    async fn update_text(&self, id: &Thing, text: &str) -> AppResult<Reply>;
    /// Deletes the reply, leaving its descendants unreachable.
    async fn delete_detached(&self, reply: &Reply) -> AppResult<()>;
    /// Deletes the reply and the given descendants.
    async fn delete_subtree(&self, reply: &Reply, descendants: Vec<Thing>) -> AppResult<()>;
    /// Deletes the reply and moves its children one level up.
    async fn delete_reparented(&self, reply: &Reply, descendants: Vec<Thing>) -> AppResult<()>;
}
