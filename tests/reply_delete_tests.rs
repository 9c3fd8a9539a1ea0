mod helpers;

use axum::http::StatusCode;
use axum_test::TestServer;
use helpers::reply_helpers::{
    create_nested_reply, create_outer_reply, delete_reply, get_audit, get_children,
    get_outer_replies, get_reply, get_thread,
};
use helpers::review_helpers::create_fake_review;
use helpers::{create_login_test_user, TestUser};
use review_threads::entities::reply::{Reply, ReplyDeletePolicy};
use review_threads::interfaces::repositories::reply::RepliesRepositoryInterface;
use review_threads::middleware::mw_ctx::CtxState;
use review_threads::services::thread_audit::ThreadIssue;
use surrealdb::sql::Thing;

/// Review with the chain a -> b -> c, a being the outer reply.
struct Chain {
    review: Thing,
    a: Reply,
    b: Reply,
    c: Reply,
}

async fn create_chain(server: &TestServer, user: &TestUser) -> Chain {
    let review = create_fake_review(server, user).await.id;
    let a = create_outer_reply(server, user, &review).await;
    let b = create_nested_reply(server, user, &review, &a.id).await;
    let c = create_nested_reply(server, user, &review, &b.id).await;
    Chain { review, a, b, c }
}

/// Ids of every reply still stored for the review.
async fn stored_ids(ctx_state: &CtxState, review: &Thing) -> Vec<Thing> {
    ctx_state
        .db
        .replies
        .get_by_review(review)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect()
}

test_with_server!(
    cascade_removes_the_subtree,
    ReplyDeletePolicy::Cascade,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);
        let chain = create_chain(&server, &user).await;

        delete_reply(&server, &user, &chain.b.id)
            .await
            .assert_status_success();

        get_reply(&server, &chain.b.id)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        get_reply(&server, &chain.c.id)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        assert_eq!(stored_ids(&ctx_state, &chain.review).await, vec![chain.a.id.clone()]);
        let a = get_reply(&server, &chain.a.id).await.json::<Reply>();
        assert!(a.replies.is_empty());
        assert!(get_children(&server, &a.id).await.is_empty());
        assert!(get_audit(&server, &chain.review).await.is_empty());
    }
);

test_with_server!(
    cascade_on_outer_reply_clears_the_thread,
    ReplyDeletePolicy::Cascade,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);
        let chain = create_chain(&server, &user).await;
        let sibling = create_outer_reply(&server, &user, &chain.review).await;

        delete_reply(&server, &user, &chain.a.id)
            .await
            .assert_status_success();

        assert_eq!(stored_ids(&ctx_state, &chain.review).await, vec![sibling.id.clone()]);
        let outer: Vec<Thing> = get_outer_replies(&server, &chain.review)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(outer, vec![sibling.id.clone()]);

        let thread = get_thread(&server, &chain.review).await;
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].size(), 1);
        assert!(get_audit(&server, &chain.review).await.is_empty());
    }
);

test_with_server!(
    cascade_never_leaves_the_target_behind,
    ReplyDeletePolicy::Cascade,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);

        for round in 0..40 {
            let chain = create_chain(&server, &user).await;
            let target = if round % 2 == 0 { &chain.a } else { &chain.b };

            delete_reply(&server, &user, &target.id)
                .await
                .assert_status_success();

            let left = stored_ids(&ctx_state, &chain.review).await;
            assert!(!left.contains(&target.id), "round {round}: target still stored");
            assert!(!left.contains(&chain.c.id), "round {round}: leaf still stored");
            get_reply(&server, &target.id)
                .await
                .assert_status(StatusCode::NOT_FOUND);
            assert!(get_audit(&server, &chain.review).await.is_empty());
        }
    }
);

test_with_server!(
    reparent_moves_children_up,
    ReplyDeletePolicy::Reparent,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);
        let chain = create_chain(&server, &user).await;
        let d = create_nested_reply(&server, &user, &chain.review, &chain.c.id).await;

        delete_reply(&server, &user, &chain.b.id)
            .await
            .assert_status_success();

        get_reply(&server, &chain.b.id)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let c = get_reply(&server, &chain.c.id).await.json::<Reply>();
        assert_eq!(c.parent, Some(chain.a.id.clone()));
        assert_eq!(c.depth, 1);
        assert!(!c.outer);
        let d = get_reply(&server, &d.id).await.json::<Reply>();
        assert_eq!(d.depth, 2);
        assert_eq!(d.parent, Some(c.id.clone()));

        let a = get_reply(&server, &chain.a.id).await.json::<Reply>();
        assert_eq!(a.replies, vec![c.id.clone()]);
        assert!(get_audit(&server, &chain.review).await.is_empty());
    }
);

test_with_server!(
    reparent_of_outer_reply_promotes_children,
    ReplyDeletePolicy::Reparent,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);
        let chain = create_chain(&server, &user).await;

        delete_reply(&server, &user, &chain.a.id)
            .await
            .assert_status_success();

        let b = get_reply(&server, &chain.b.id).await.json::<Reply>();
        assert!(b.outer);
        assert_eq!(b.depth, 0);
        assert!(b.parent.is_none());
        assert_eq!(b.replies, vec![chain.c.id.clone()]);

        let c = get_reply(&server, &chain.c.id).await.json::<Reply>();
        assert_eq!(c.depth, 1);

        let outer: Vec<Thing> = get_outer_replies(&server, &chain.review)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(outer, vec![b.id.clone()]);
        assert!(get_audit(&server, &chain.review).await.is_empty());
    }
);

test_with_server!(
    detach_leaves_descendants_unreachable,
    ReplyDeletePolicy::Detach,
    |server, ctx_state, config| {
        let user = create_login_test_user(&ctx_state);
        let chain = create_chain(&server, &user).await;

        delete_reply(&server, &user, &chain.b.id)
            .await
            .assert_status_success();

        let a = get_reply(&server, &chain.a.id).await.json::<Reply>();
        assert!(a.replies.is_empty());

        let c = get_reply(&server, &chain.c.id).await.json::<Reply>();
        assert_eq!(c.depth, 2);
        assert!(c.parent.is_none());

        let thread = get_thread(&server, &chain.review).await;
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].size(), 1);

        let issues = get_audit(&server, &chain.review).await;
        assert!(issues.contains(&ThreadIssue::Orphan {
            reply: chain.c.id.clone()
        }));
        assert!(!issues
            .iter()
            .any(|issue| matches!(issue, ThreadIssue::DanglingReference { .. })));
    }
);

test_with_server!(only_author_deletes_reply, |server, ctx_state, config| {
    let user = create_login_test_user(&ctx_state);
    let other = create_login_test_user(&ctx_state);
    let chain = create_chain(&server, &user).await;

    delete_reply(&server, &other, &chain.b.id)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    get_reply(&server, &chain.b.id).await.assert_status_success();

    server
        .delete(&format!("/api/replies/{}", chain.b.id.id.to_raw()))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    delete_reply(&server, &user, &chain.b.id)
        .await
        .assert_status_success();
    assert_eq!(stored_ids(&ctx_state, &chain.review).await, vec![chain.a.id.clone()]);
    delete_reply(&server, &user, &chain.b.id)
        .await
        .assert_status(StatusCode::NOT_FOUND);
});
