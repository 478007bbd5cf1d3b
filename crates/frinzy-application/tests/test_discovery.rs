mod common;

use common::{context, seed};
use frinzy_core::discovery::QueueState;
use frinzy_core::profile::City;

#[tokio::test]
async fn test_delhi_viewer_sees_only_delhi_overlap() {
    let ctx = context();
    seed(&ctx, "viewer", City::Delhi, &[("1", "Gaming"), ("2", "Reading")]).await;
    seed(&ctx, "delhi", City::Delhi, &[("1", "Gaming"), ("3", "Hiking")]).await;
    seed(&ctx, "mumbai", City::Mumbai, &[("1", "Gaming"), ("2", "Reading")]).await;

    let session = ctx.discovery.open("viewer").await.unwrap();

    let ids: Vec<&str> = session.queue().profiles().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["delhi"]);
    assert_eq!(session.current().map(|c| c.score), Some(10));
}

#[tokio::test]
async fn test_decisions_advance_until_exhausted() {
    let ctx = context();
    seed(&ctx, "viewer", City::Delhi, &[("1", "Gaming"), ("2", "Reading")]).await;
    seed(&ctx, "best", City::Delhi, &[("1", "Gaming"), ("2", "Reading")]).await;
    seed(&ctx, "good", City::Delhi, &[("2", "Reading")]).await;

    let mut session = ctx.discovery.open("viewer").await.unwrap();
    assert_eq!(session.state(), QueueState::Active);
    assert_eq!(session.current().map(|c| c.profile.id.as_str()), Some("best"));

    session.like().await.unwrap();
    assert_eq!(session.current().map(|c| c.profile.id.as_str()), Some("good"));
    session.pass().await.unwrap();

    assert_eq!(session.state(), QueueState::Exhausted);
    assert!(!session.queue().is_initial_empty());
    assert!(session.like().await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_failed_decision_keeps_cursor() {
    let ctx = context();
    seed(&ctx, "viewer", City::Delhi, &[("1", "Gaming")]).await;
    seed(&ctx, "other", City::Delhi, &[("1", "Gaming")]).await;
    let mut session = ctx.discovery.open("viewer").await.unwrap();

    ctx.store.fail_next_writes(1);
    assert!(session.like().await.unwrap_err().is_transient());
    assert_eq!(session.queue().position(), 0);
    assert_eq!(session.current().map(|c| c.profile.id.as_str()), Some("other"));

    session.like().await.unwrap();
    assert_eq!(session.queue().position(), 1);
}

#[tokio::test]
async fn test_liking_back_from_queue_forms_match() {
    let ctx = context();
    seed(&ctx, "viewer", City::Bangalore, &[("1", "Gaming")]).await;
    seed(&ctx, "fan", City::Bangalore, &[("1", "Gaming")]).await;
    ctx.recorder.record_decision("fan", "viewer", true).await.unwrap();

    let mut session = ctx.discovery.open("viewer").await.unwrap();
    let outcome = session.like().await.unwrap();

    assert!(outcome.match_created);
}

#[tokio::test]
async fn test_empty_pool_is_initial_empty() {
    let ctx = context();
    seed(&ctx, "viewer", City::Gurugram, &[("1", "Gaming")]).await;
    seed(&ctx, "elsewhere", City::Delhi, &[("1", "Gaming")]).await;

    let session = ctx.discovery.open("viewer").await.unwrap();
    assert_eq!(session.state(), QueueState::InitialEmpty);
}

#[tokio::test]
async fn test_unknown_viewer() {
    let ctx = context();
    assert!(ctx.discovery.open("nobody").await.err().unwrap().is_not_found());
}
