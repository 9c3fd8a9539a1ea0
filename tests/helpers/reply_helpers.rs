use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use review_threads::entities::reply::Reply;
use review_threads::models::view::thread::ReplyNode;
use review_threads::services::reply_service::ReplyInput;
use review_threads::services::thread_audit::ThreadIssue;
use surrealdb::sql::Thing;

use super::TestUser;

#[allow(dead_code)]
pub fn fake_reply_input() -> ReplyInput {
    ReplyInput {
        text: faker::lorem::en::Sentence(3..8).fake::<String>(),
    }
}

#[allow(dead_code)]
pub async fn post_outer_reply(
    server: &TestServer,
    user: &TestUser,
    review: &Thing,
    input: &ReplyInput,
) -> TestResponse {
    let (name, value) = user.auth();
    server
        .post(&format!("/api/reviews/{}/replies", review.id.to_raw()))
        .add_header(name, value)
        .json(input)
        .await
}

#[allow(dead_code)]
pub async fn post_nested_reply(
    server: &TestServer,
    user: &TestUser,
    review: &Thing,
    parent: &Thing,
    input: &ReplyInput,
) -> TestResponse {
    let (name, value) = user.auth();
    server
        .post(&format!(
            "/api/reviews/{}/replies/{}/replies",
            review.id.to_raw(),
            parent.id.to_raw()
        ))
        .add_header(name, value)
        .json(input)
        .await
}

#[allow(dead_code)]
pub async fn create_outer_reply(server: &TestServer, user: &TestUser, review: &Thing) -> Reply {
    let res = post_outer_reply(server, user, review, &fake_reply_input()).await;
    res.assert_status_success();
    res.json::<Reply>()
}

#[allow(dead_code)]
pub async fn create_nested_reply(
    server: &TestServer,
    user: &TestUser,
    review: &Thing,
    parent: &Thing,
) -> Reply {
    let res = post_nested_reply(server, user, review, parent, &fake_reply_input()).await;
    res.assert_status_success();
    res.json::<Reply>()
}

#[allow(dead_code)]
pub async fn get_reply(server: &TestServer, reply: &Thing) -> TestResponse {
    server
        .get(&format!("/api/replies/{}", reply.id.to_raw()))
        .await
}

#[allow(dead_code)]
pub async fn get_outer_replies(server: &TestServer, review: &Thing) -> Vec<Reply> {
    let res = server
        .get(&format!("/api/reviews/{}/replies", review.id.to_raw()))
        .await;
    res.assert_status_success();
    res.json::<Vec<Reply>>()
}

#[allow(dead_code)]
pub async fn get_children(server: &TestServer, reply: &Thing) -> Vec<Reply> {
    let res = server
        .get(&format!("/api/replies/{}/replies", reply.id.to_raw()))
        .await;
    res.assert_status_success();
    res.json::<Vec<Reply>>()
}

#[allow(dead_code)]
pub async fn get_thread(server: &TestServer, review: &Thing) -> Vec<ReplyNode> {
    let res = server
        .get(&format!("/api/reviews/{}/thread", review.id.to_raw()))
        .await;
    res.assert_status_success();
    res.json::<Vec<ReplyNode>>()
}

#[allow(dead_code)]
pub async fn get_audit(server: &TestServer, review: &Thing) -> Vec<ThreadIssue> {
    let res = server
        .get(&format!("/api/reviews/{}/audit", review.id.to_raw()))
        .await;
    res.assert_status_success();
    res.json::<Vec<ThreadIssue>>()
}

#[allow(dead_code)]
pub async fn delete_reply(server: &TestServer, user: &TestUser, reply: &Thing) -> TestResponse {
    let (name, value) = user.auth();
    server
        .delete(&format!("/api/replies/{}", reply.id.to_raw()))
        .add_header(name, value)
        .await
}
