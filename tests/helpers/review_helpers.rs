use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use review_threads::entities::review::{Review, EXPERIENCES, HOSPITALS};
use review_threads::services::review_service::ReviewInput;

use super::TestUser;

#[allow(dead_code)]
pub fn fake_review_input() -> ReviewInput {
    ReviewInput {
        name: HOSPITALS[(0..HOSPITALS.len()).fake::<usize>()].to_string(),
        subject: EXPERIENCES[(0..EXPERIENCES.len()).fake::<usize>()].to_string(),
        text: faker::lorem::en::Paragraph(1..3).fake::<String>(),
        rating: (0..=10).fake::<u8>(),
    }
}

#[allow(dead_code)]
pub async fn post_review(server: &TestServer, user: &TestUser, input: &ReviewInput) -> TestResponse {
    let (name, value) = user.auth();
    server
        .post("/api/reviews")
        .add_header(name, value)
        .json(input)
        .await
}

#[allow(dead_code)]
pub async fn create_fake_review(server: &TestServer, user: &TestUser) -> Review {
    let res = post_review(server, user, &fake_review_input()).await;
    res.assert_status_success();
    res.json::<Review>()
}
