mod common;

use chrono::{Duration, Utc};
use common::{context, seed};
use frinzy_core::events::EventRepository;
use frinzy_core::profile::City;

#[tokio::test]
async fn test_create_lists_in_organizer_city() {
    let ctx = context();
    seed(&ctx, "ana", City::Mumbai, &[("1", "Gaming")]).await;
    seed(&ctx, "ravi", City::Delhi, &[("1", "Gaming")]).await;
    let now = Utc::now();

    let later = ctx
        .events
        .create("ana", "Open Mic Night", "Poetry and music", now + Duration::days(3), now)
        .await
        .unwrap();
    let sooner = ctx
        .events
        .create("ana", "Board Games", "", now + Duration::days(1), now)
        .await
        .unwrap();

    assert_eq!(later.city, City::Mumbai);
    assert!(later.is_attending("ana"));

    let mumbai: Vec<String> = ctx
        .events
        .upcoming_for("ana", now)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(mumbai, vec![sooner.id, later.id]);
    assert!(ctx.events.upcoming_for("ravi", now).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_started_events_are_not_upcoming() {
    let ctx = context();
    seed(&ctx, "ana", City::Bangalore, &[("1", "Gaming")]).await;
    let now = Utc::now();
    let event = ctx
        .events
        .create("ana", "Food Walk", "", now + Duration::hours(1), now)
        .await
        .unwrap();

    let after_start = now + Duration::hours(2);
    assert!(ctx.events.upcoming(City::Bangalore, after_start).await.unwrap().is_empty());
    assert_eq!(ctx.events.upcoming(City::Bangalore, now).await.unwrap(), vec![event]);
}

#[tokio::test]
async fn test_create_validation() {
    let ctx = context();
    seed(&ctx, "ana", City::Delhi, &[("1", "Gaming")]).await;
    let now = Utc::now();

    let past = ctx.events.create("ana", "Too late", "", now - Duration::hours(1), now).await;
    assert!(past.unwrap_err().is_validation());

    let blank = ctx.events.create("ana", "  ", "", now + Duration::hours(1), now).await;
    assert!(blank.unwrap_err().is_validation());

    let stranger = ctx.events.create("ghost", "Meetup", "", now + Duration::hours(1), now).await;
    assert!(stranger.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_attend_and_unattend_are_idempotent() {
    let ctx = context();
    seed(&ctx, "ana", City::Delhi, &[("1", "Gaming")]).await;
    seed(&ctx, "ravi", City::Delhi, &[("1", "Gaming")]).await;
    let now = Utc::now();
    let event = ctx
        .events
        .create("ana", "Trivia", "", now + Duration::days(2), now)
        .await
        .unwrap();

    ctx.events.attend(&event.id, "ravi").await.unwrap();
    let twice = ctx.events.attend(&event.id, "ravi").await.unwrap();
    assert_eq!(twice.attendees(), ["ana", "ravi"]);

    ctx.events.unattend(&event.id, "ravi").await.unwrap();
    let gone = ctx.events.unattend(&event.id, "ravi").await.unwrap();
    assert_eq!(gone.attendees(), ["ana"]);

    let stored = ctx.store.find_event(&event.id).await.unwrap().unwrap();
    assert_eq!(stored, gone);
}

#[tokio::test]
async fn test_attend_unknown_event_or_member() {
    let ctx = context();
    seed(&ctx, "ana", City::Delhi, &[("1", "Gaming")]).await;
    let now = Utc::now();
    let event = ctx
        .events
        .create("ana", "Trivia", "", now + Duration::days(2), now)
        .await
        .unwrap();

    assert!(ctx.events.attend("event_nope", "ana").await.unwrap_err().is_not_found());
    assert!(ctx.events.attend(&event.id, "ghost").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_unavailable_store_keeps_attendance() {
    let ctx = context();
    seed(&ctx, "ana", City::Delhi, &[("1", "Gaming")]).await;
    seed(&ctx, "ravi", City::Delhi, &[("1", "Gaming")]).await;
    let now = Utc::now();
    let event = ctx
        .events
        .create("ana", "Trivia", "", now + Duration::days(2), now)
        .await
        .unwrap();

    ctx.store.fail_next_writes(1);
    assert!(ctx.events.attend(&event.id, "ravi").await.unwrap_err().is_transient());
    let stored = ctx.store.find_event(&event.id).await.unwrap().unwrap();
    assert!(!stored.is_attending("ravi"));
}
