use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::sql::Thing;

use crate::database::client::Db;
use crate::database::table_names::{REPLY_TABLE_NAME, REVIEW_TABLE_NAME, USER_TABLE_NAME};
use crate::entities::reply::Reply;
use crate::interfaces::repositories::reply::RepliesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::utils::db_utils::{Pagination, QryOrder};

#[derive(Debug)]
pub struct RepliesRepository {
    client: Arc<Db>,
}

impl RepliesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {REPLY_TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS author ON TABLE {REPLY_TABLE_NAME} TYPE record<{USER_TABLE_NAME}>;
    DEFINE FIELD IF NOT EXISTS review ON TABLE {REPLY_TABLE_NAME} TYPE record<{REVIEW_TABLE_NAME}>;
    DEFINE INDEX IF NOT EXISTS review_idx ON TABLE {REPLY_TABLE_NAME} COLUMNS review;
    DEFINE FIELD IF NOT EXISTS parent ON TABLE {REPLY_TABLE_NAME} TYPE option<record<{REPLY_TABLE_NAME}>>;
    DEFINE INDEX IF NOT EXISTS parent_idx ON TABLE {REPLY_TABLE_NAME} COLUMNS parent;
    DEFINE FIELD IF NOT EXISTS name ON TABLE {REPLY_TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS text ON TABLE {REPLY_TABLE_NAME} TYPE string ASSERT string::len(string::trim($value))>0;
    DEFINE FIELD IF NOT EXISTS outer ON TABLE {REPLY_TABLE_NAME} TYPE bool;
    DEFINE FIELD IF NOT EXISTS depth ON TABLE {REPLY_TABLE_NAME} TYPE int ASSERT $value>=0;
    DEFINE FIELD IF NOT EXISTS replies ON TABLE {REPLY_TABLE_NAME} TYPE array<record<{REPLY_TABLE_NAME}>> DEFAULT [];
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {REPLY_TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {REPLY_TABLE_NAME} TYPE datetime DEFAULT time::now();
    ");
        let mutation = self.client.query(sql).await?;

        mutation.check()?;

        Ok(())
    }
}

#[async_trait]
impl RepliesRepositoryInterface for RepliesRepository {
    async fn create_outer(
        &self,
        review: &Thing,
        author: &Thing,
        name: &str,
        text: &str,
    ) -> AppResult<Reply> {
        let mut res = self
            .client
            .query(format!(
                "CREATE {REPLY_TABLE_NAME} SET review=$review_id, author=$author_id, name=$name, \
                text=$text, outer=true, depth=0, replies=[];"
            ))
            .bind(("review_id", review.clone()))
            .bind(("author_id", author.clone()))
            .bind(("name", name.to_string()))
            .bind(("text", text.to_string()))
            .await?
            .check()?;

        let record = res.take::<Option<Reply>>(0)?;
        record.ok_or(AppError::SurrealDb {
            source: "reply not created".to_string(),
        })
    }

    async fn create_nested(
        &self,
        parent: &Reply,
        author: &Thing,
        name: &str,
        text: &str,
    ) -> AppResult<Reply> {
        // depth is read inside the transaction so a vanished parent aborts the whole write
        let mut res = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $p = (SELECT id, review, depth FROM ONLY $parent_id); \
                IF !$p OR $p.review != $review_id {{ THROW 'parent reply not found in review' }}; \
                LET $reply = (CREATE ONLY {REPLY_TABLE_NAME} SET review=$review_id, author=$author_id, \
                    name=$name, text=$text, outer=false, depth=$p.depth + 1, parent=$parent_id, replies=[]); \
                UPDATE $parent_id SET replies += $reply.id; \
                COMMIT TRANSACTION; \
                RETURN $reply;"
            ))
            .bind(("parent_id", parent.id.clone()))
            .bind(("review_id", parent.review.clone()))
            .bind(("author_id", author.clone()))
            .bind(("name", name.to_string()))
            .bind(("text", text.to_string()))
            .await?
            .check()?;

        let record = res.take::<Option<Reply>>(res.num_statements() - 1)?;
        record.ok_or(AppError::SurrealDb {
            source: "reply not created".to_string(),
        })
    }

    async fn get_by_id(&self, id: &Thing) -> AppResult<Reply> {
        let data: Option<Reply> = self
            .client
            .select((REPLY_TABLE_NAME, id.id.to_raw()))
            .await?;
        data.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }

    async fn get_outer(&self, review: &Thing, pagination: Pagination) -> AppResult<Vec<Reply>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC).to_string();
        let data = self
            .client
            .query(format!(
                "SELECT * FROM {REPLY_TABLE_NAME} WHERE review=$review_id AND outer=true AND depth=0 \
                ORDER BY created_at {order_dir} LIMIT $limit START $start;"
            ))
            .bind(("review_id", review.clone()))
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await?
            .take::<Vec<Reply>>(0)?;

        Ok(data)
    }

    async fn get_children(&self, parent: &Thing) -> AppResult<Vec<Reply>> {
        let data = self
            .client
            .query(format!(
                "SELECT * FROM {REPLY_TABLE_NAME} WHERE parent=$parent_id ORDER BY created_at ASC;"
            ))
            .bind(("parent_id", parent.clone()))
            .await?
            .take::<Vec<Reply>>(0)?;

        Ok(data)
    }

    async fn get_by_review(&self, review: &Thing) -> AppResult<Vec<Reply>> {
        let data = self
            .client
            .query(format!(
                "SELECT * FROM {REPLY_TABLE_NAME} WHERE review=$review_id ORDER BY created_at ASC;"
            ))
            .bind(("review_id", review.clone()))
            .await?
            .take::<Vec<Reply>>(0)?;

        Ok(data)
    }

    async fn update_text(&self, id: &Thing, text: &str) -> AppResult<Reply> {
        let mut res = self
            .client
            .query("UPDATE $reply_id SET text=$text, updated_at=time::now();")
            .bind(("reply_id", id.clone()))
            .bind(("text", text.to_string()))
            .await?
            .check()?;

        let record = res.take::<Option<Reply>>(0)?;
        record.ok_or(AppError::EntityFailIdNotFound { ident: id.to_raw() })
    }

    async fn delete_detached(&self, reply: &Reply) -> AppResult<()> {
        self.client
            .query(format!(
                "BEGIN TRANSACTION; \
                UPDATE {REPLY_TABLE_NAME} SET replies -= $reply_id WHERE review=$review_id AND replies CONTAINS $reply_id; \
                UPDATE {REPLY_TABLE_NAME} SET parent=NONE WHERE parent=$reply_id; \
                DELETE $reply_id; \
                COMMIT TRANSACTION;"
            ))
            .bind(("reply_id", reply.id.clone()))
            .bind(("review_id", reply.review.clone()))
            .await?
            .check()?;
        Ok(())
    }

    async fn delete_subtree(&self, reply: &Reply, descendants: Vec<Thing>) -> AppResult<()> {
        let mut gone = Vec::with_capacity(descendants.len() + 1);
        gone.push(reply.id.clone());
        gone.extend(descendants);

        // children created after the subtree snapshot are caught by the parent sweep
        self.client
            .query(format!(
                "BEGIN TRANSACTION; \
                UPDATE {REPLY_TABLE_NAME} SET replies = array::complement(replies, $gone) \
                    WHERE review=$review_id AND array::len(array::intersect(replies, $gone)) > 0; \
                DELETE {REPLY_TABLE_NAME} WHERE parent IN $gone; \
                DELETE $gone; \
                COMMIT TRANSACTION;"
            ))
            .bind(("gone", gone))
            .bind(("review_id", reply.review.clone()))
            .await?
            .check()?;
        Ok(())
    }

    async fn delete_reparented(&self, reply: &Reply, descendants: Vec<Thing>) -> AppResult<()> {
        let move_children = match &reply.parent {
            Some(_) => format!(
                "UPDATE {REPLY_TABLE_NAME} SET parent=$new_parent_id WHERE parent=$reply_id; \
                UPDATE $new_parent_id SET replies = array::concat(replies, $children);"
            ),
            None => format!(
                "UPDATE {REPLY_TABLE_NAME} SET parent=NONE, outer=true WHERE parent=$reply_id;"
            ),
        };

        let mut qry = self
            .client
            .query(format!(
                "BEGIN TRANSACTION; \
                LET $children = (SELECT id, created_at FROM {REPLY_TABLE_NAME} WHERE parent=$reply_id ORDER BY created_at ASC).id; \
                UPDATE {REPLY_TABLE_NAME} SET replies -= $reply_id WHERE review=$review_id AND replies CONTAINS $reply_id; \
                UPDATE {REPLY_TABLE_NAME} SET depth -= 1 WHERE id IN $descendants AND depth > 0; \
                {move_children} \
                DELETE $reply_id; \
                COMMIT TRANSACTION;"
            ))
            .bind(("reply_id", reply.id.clone()))
            .bind(("review_id", reply.review.clone()))
            .bind(("descendants", descendants));

        if let Some(new_parent) = &reply.parent {
            qry = qry.bind(("new_parent_id", new_parent.clone()));
        }

        qry.await?.check()?;
        Ok(())
    }
}
