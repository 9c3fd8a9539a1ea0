#[macro_export]
macro_rules! test_with_server {
    ($name:ident, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {
        $crate::test_with_server!(
            $name,
            review_threads::entities::reply::ReplyDeletePolicy::default(),
            |$server, $ctx_state, $config| $body
        );
    };
    ($name:ident, $policy:expr, |$server:ident, $ctx_state:ident, $config:ident| $body:block) => {
        #[tokio::test(flavor = "multi_thread")]
        #[serial_test::serial]
        async fn $name() {
            use axum_test::{TestServer, TestServerConfig};
            use futures::FutureExt;
            use review_threads::config::AppConfig;
            use review_threads::database::client::{Database, DbConfig};
            use review_threads::middleware::mw_ctx::create_ctx_state;
            use std::panic::resume_unwind;

            let $config = AppConfig {
                db_namespace: "test".to_string(),
                db_database: "test".to_string(),
                db_password: None,
                db_username: None,
                db_url: "mem://".to_string(),
                jwt_secret: "secret".to_string(),
                jwt_duration_days: 1,
                reply_delete_policy: $policy,
                server_port: 0,
            };

            let $ctx_state = {
                let db = Database::connect(DbConfig {
                    url: &$config.db_url,
                    database: &$config.db_database,
                    namespace: &$config.db_namespace,
                    password: $config.db_password.as_deref(),
                    username: $config.db_username.as_deref(),
                })
                .await;

                review_threads::init::run_migrations(&db).await.unwrap();
                create_ctx_state(db, &$config)
            };

            let routes_all = review_threads::init::main_router(&$ctx_state);

            let $server = TestServer::new_with_config(
                routes_all,
                TestServerConfig {
                    transport: None,
                    save_cookies: false,
                    expect_success_by_default: false,
                    restrict_requests_with_http_schema: false,
                    default_content_type: None,
                    default_scheme: None,
                },
            )
            .expect("Failed to create test server");

            let test_result = std::panic::AssertUnwindSafe(async {
                (|| async $body)().await;
            })
            .catch_unwind()
            .await;

            $ctx_state
                .db
                .client
                .query(format!("REMOVE DATABASE {};", $config.db_database))
                .await
                .expect("failed to remove database");

            if let Err(panic) = test_result {
                resume_unwind(panic);
            }
        }
    };
}
