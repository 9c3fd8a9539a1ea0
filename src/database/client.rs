use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::reply::RepliesRepository;
use crate::database::repositories::review::ReviewsRepository;
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub reviews: ReviewsRepository,
    pub replies: RepliesRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> Self {
        info!("->> connecting DB url={} ns={} db={}", config.url, config.namespace, config.database);
        let conn = connect(config.url)
            .await
            .expect("Failed to connect to SurrealDB");

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password })
                .await
                .expect("Failed to sign in to SurrealDB");
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await
            .expect("Failed to select namespace and database");

        let version = conn
            .version()
            .await
            .expect("Failed to get SurrealDB version");

        info!("->> connected DB version: {version}");
        let client = Arc::new(conn);
        Self {
            reviews: ReviewsRepository::new(client.clone()),
            replies: RepliesRepository::new(client.clone()),
            client,
        }
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.reviews.mutate_db().await?;
        self.replies.mutate_db().await?;
        Ok(())
    }
}
