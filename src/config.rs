use dotenvy;

use crate::entities::reply::ReplyDeletePolicy;

#[derive(Debug)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub jwt_duration_days: i64,
    pub reply_delete_policy: ReplyDeletePolicy,
    pub server_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let jwt_duration_days = std::env::var("JWT_DURATION_DAYS").map_or(7, |t| {
            t.parse::<i64>()
                .expect("JWT_DURATION_DAYS must be number")
        });

        let reply_delete_policy = std::env::var("REPLY_DELETE_POLICY").map_or(
            ReplyDeletePolicy::default(),
            |v| {
                v.parse::<ReplyDeletePolicy>()
                    .expect("REPLY_DELETE_POLICY must be one of cascade, reparent, detach")
            },
        );

        let server_port = std::env::var("SERVER_PORT").map_or(8080, |t| {
            t.parse::<u16>().expect("SERVER_PORT must be number")
        });

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            jwt_duration_days,
            reply_delete_policy,
            server_port,
        }
    }
}
