pub mod reply_helpers;
pub mod review_helpers;
pub mod test_with_server;

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use fake::{faker, Fake};
use review_threads::middleware::mw_ctx::CtxState;
use review_threads::middleware::utils::string_utils::get_str_thing;
use surrealdb::sql::Thing;

/// A logged in test user: the `local_user` id and a bearer token for it.
#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub token: String,
}

impl TestUser {
    #[allow(dead_code)]
    pub fn auth(&self) -> (HeaderName, HeaderValue) {
        bearer(&self.token)
    }

    #[allow(dead_code)]
    pub fn thing(&self) -> Thing {
        get_str_thing(&self.id).expect("user id")
    }
}

#[allow(dead_code)]
pub fn create_login_test_user(ctx_state: &CtxState) -> TestUser {
    let username = faker::internet::en::Username()
        .fake::<String>()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "");
    let id = format!("local_user:{username}{}", (1000..9999).fake::<u16>());
    let token = ctx_state
        .jwt
        .create_by_login(&id)
        .expect("login token");
    TestUser { id, token }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header value"),
    )
}
