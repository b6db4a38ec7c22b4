//! Leaderboard integration tests
//!
//! The leaderboard is recomputed from approved requests on every call, so
//! these tests drive the request lifecycle and assert on the derived totals.

mod helpers;

use helpers::{skip_notice, TestContext};
use serial_test::serial;

use BoostBuddy::models::{Category, Decision, User, UserRole};

async fn submit_and_resolve(
    ctx: &TestContext,
    requester: &User,
    resolver: &User,
    points: i32,
    decision: Decision,
) {
    let request = ctx
        .services
        .challenge_service
        .create_request(
            requester.id,
            format!("task worth {}", points),
            Category::Other,
            "a task".to_string(),
            points,
        )
        .await
        .unwrap();

    ctx.services
        .challenge_service
        .resolve_request(request.id, resolver.id, decision)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn test_totals_sum_approved_requests_only() {
    let Some(ctx) = TestContext::new().await else {
        skip_notice("test_totals_sum_approved_requests_only");
        return;
    };

    let ivan = ctx
        .services
        .user_service
        .ensure_user(111, "Ivan")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .ensure_user(222, "Boris")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .set_role(boris.id, UserRole::Manager)
        .await
        .unwrap();

    submit_and_resolve(&ctx, &ivan, &boris, 50, Decision::Approved).await;
    submit_and_resolve(&ctx, &ivan, &boris, 30, Decision::Approved).await;
    submit_and_resolve(&ctx, &ivan, &boris, 100, Decision::Rejected).await;

    // A still-pending request carries no points either
    ctx.services
        .challenge_service
        .create_request(
            ivan.id,
            "pending task".to_string(),
            Category::It,
            "a task".to_string(),
            25,
        )
        .await
        .unwrap();

    let leaderboard = ctx
        .services
        .leaderboard_service
        .compute_leaderboard()
        .await
        .unwrap();

    assert_eq!(leaderboard[0].username, "Ivan");
    assert_eq!(leaderboard[0].total_points, 80);
}

#[tokio::test]
#[serial]
async fn test_every_user_is_listed_even_without_points() {
    let Some(ctx) = TestContext::new().await else {
        skip_notice("test_every_user_is_listed_even_without_points");
        return;
    };

    ctx.services
        .user_service
        .ensure_user(111, "Ivan")
        .await
        .unwrap();
    ctx.services
        .user_service
        .ensure_user(222, "Boris")
        .await
        .unwrap();

    let leaderboard = ctx
        .services
        .leaderboard_service
        .compute_leaderboard()
        .await
        .unwrap();

    assert_eq!(leaderboard.len(), 2);
    assert!(leaderboard.iter().all(|entry| entry.total_points == 0));
}

#[tokio::test]
#[serial]
async fn test_ties_rank_by_user_creation_order() {
    let Some(ctx) = TestContext::new().await else {
        skip_notice("test_ties_rank_by_user_creation_order");
        return;
    };

    let ivan = ctx
        .services
        .user_service
        .ensure_user(111, "Ivan")
        .await
        .unwrap();
    let olga = ctx
        .services
        .user_service
        .ensure_user(333, "Olga")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .ensure_user(222, "Boris")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .set_role(boris.id, UserRole::Manager)
        .await
        .unwrap();

    // Olga overtakes on points; Ivan and Boris tie and keep creation order
    submit_and_resolve(&ctx, &olga, &boris, 70, Decision::Approved).await;
    submit_and_resolve(&ctx, &ivan, &boris, 40, Decision::Approved).await;
    submit_and_resolve(&ctx, &boris, &boris, 40, Decision::Approved).await;

    let leaderboard = ctx
        .services
        .leaderboard_service
        .compute_leaderboard()
        .await
        .unwrap();

    let ranking: Vec<(&str, i64)> = leaderboard
        .iter()
        .map(|entry| (entry.username.as_str(), entry.total_points))
        .collect();
    assert_eq!(ranking, [("Olga", 70), ("Ivan", 40), ("Boris", 40)]);
}

#[tokio::test]
#[serial]
async fn test_recomputation_is_stable_across_calls() {
    let Some(ctx) = TestContext::new().await else {
        skip_notice("test_recomputation_is_stable_across_calls");
        return;
    };

    let ivan = ctx
        .services
        .user_service
        .ensure_user(111, "Ivan")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .ensure_user(222, "Boris")
        .await
        .unwrap();
    let boris = ctx
        .services
        .user_service
        .set_role(boris.id, UserRole::Manager)
        .await
        .unwrap();

    submit_and_resolve(&ctx, &ivan, &boris, 50, Decision::Approved).await;

    let first = ctx
        .services
        .leaderboard_service
        .compute_leaderboard()
        .await
        .unwrap();
    let second = ctx
        .services
        .leaderboard_service
        .compute_leaderboard()
        .await
        .unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.username, b.username);
        assert_eq!(a.total_points, b.total_points);
    }
}
