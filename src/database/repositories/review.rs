use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::database::table_names::{REPLY_TABLE_NAME, REVIEW_TABLE_NAME, USER_TABLE_NAME};
use crate::entities::review::Review;
use crate::interfaces::repositories::review::{ReviewFields, ReviewsRepositoryInterface};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder};

#[derive(Debug)]
pub struct ReviewsRepository {
    client: Arc<Db>,
}

impl ReviewsRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {REVIEW_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS author ON TABLE {REVIEW_TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS author_idx ON TABLE {REVIEW_TABLE_NAME} COLUMNS author;
    DEFINE FIELD IF NOT EXISTS name ON TABLE {REVIEW_TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS subject ON TABLE {REVIEW_TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS text ON TABLE {REVIEW_TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS rating ON TABLE {REVIEW_TABLE_NAME} TYPE int ASSERT $value>=0 AND $value<=10;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {REVIEW_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {REVIEW_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    ");
        let mutation = self.client.query(sql).await?;

        mutation.check()?;

        Ok(())
    }
}

#[async_trait]
impl ReviewsRepositoryInterface for ReviewsRepository {
    async fn create(&self, author: &Thing, fields: ReviewFields) -> AppResult<Review> {
        let mut res = self
            .client
            .query(format!(
                "CREATE {REVIEW_TABLE_NAME} SET author=$author_id, name=$name, subject=$subject, \
                text=$text, rating=$rating;"
            ))
            .bind(("author_id", author.clone()))
            .bind(("name", fields.name))
            .bind(("subject", fields.subject))
            .bind(("text", fields.text))
            .bind(("rating", fields.rating))
            .await?
            .check()?;

        let record = res.take::<Option<Review>>(0)?;
        record.ok_or(AppError::SurrealDb {
            source: "review not created".to_string(),
        })
    }

    async fn get_by_id(&self, id: &Thing) -> AppResult<Review> {
        let data: Option<Review> = self
            .client
            .select((REVIEW_TABLE_NAME, id.id.to_raw()))
            .await?;
        data.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }

    async fn get_list(&self, pagination: Pagination) -> AppResult<Vec<Review>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let data = self
            .client
            .query(format!(
                "SELECT * FROM {REVIEW_TABLE_NAME} ORDER BY created_at {order_dir} LIMIT $limit START $start;"
            ))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?
            .take::<Vec<Review>>(0)?;

        Ok(data)
    }

    async fn update(&self, id: &Thing, fields: ReviewFields) -> AppResult<Review> {
        let mut res = self
            .client
            .query("UPDATE $review_id SET name=$name, subject=$subject, text=$text, rating=$rating;")
            .bind(("review_id", id.clone()))
            .bind(("name", fields.name))
            .bind(("subject", fields.subject))
            .bind(("text", fields.text))
            .bind(("rating", fields.rating))
            .await?
            .check()?;

        let record = res.take::<Option<Review>>(0)?;
        record.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }

    async fn delete_with_replies(&self, id: &Thing) -> AppResult<()> {
        self.client
            .query(format!(
                "BEGIN TRANSACTION; \
                DELETE {REPLY_TABLE_NAME} WHERE review=$review_id; \
                DELETE $review_id; \
                COMMIT TRANSACTION;"
            ))
            .bind(("review_id", id.clone()))
            .await?
            .check()?;
        Ok(())
    }
}
