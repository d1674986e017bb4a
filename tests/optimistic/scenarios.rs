//! End-to-end flows from the list screen's point of view.

use std::time::Duration;

use showcase::client::{ClientError, IntentState, NoticeLevel, QueryKey};

use crate::support::{form, ids, likes_of, setup, world, world_with_timeout};

const HELD: Duration = Duration::from_millis(100);
const PEEK: Duration = Duration::from_millis(10);

#[tokio::test(start_paused = true)]
async fn like_shows_immediately_and_survives_refetch() {
    let w = world(vec![setup("1", 5)]);
    w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");
    w.transport.delay("setup.like", HELD);

    let (settlement, seen) = tokio::join!(w.feed.like("1"), async {
        tokio::time::sleep(PEEK).await;
        likes_of(&w.feed.setups(), "1")
    });

    assert_eq!(seen, Some(6));
    assert_eq!(settlement.state(), IntentState::SettledSuccess);
    assert_eq!(likes_of(&w.feed.setups(), "1"), Some(6));
    assert!(w.feed.cache().is_stale(&QueryKey::all()));

    let refetched = w.feed.load().await.unwrap();
    assert_eq!(likes_of(&refetched, "1"), Some(6));
    assert_eq!(w.store.find_by_id("1").unwrap().unwrap().likes, 6);
    assert!(w.feed.drain_notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unauthenticated_delete_is_restored_with_login_notice() {
    let w = world(vec![setup("1", 5), setup("2", 3)]);
    let before = w.feed.load().await.unwrap();
    w.transport.delay("setup.delete", HELD);

    let (settlement, seen) = tokio::join!(w.feed.delete("2"), async {
        tokio::time::sleep(PEEK).await;
        w.feed.setups()
    });

    assert_eq!(ids(&seen), vec!["1"]);
    assert_eq!(settlement.state(), IntentState::SettledRollback);
    assert!(matches!(
        settlement.error(),
        Some(ClientError::Unauthorized(_))
    ));

    let after = w.feed.setups();
    assert_eq!(&*after, &*before);
    assert_eq!(likes_of(&after, "2"), Some(3));

    let notices = w.feed.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "You must be logged in to delete a setup");
    assert_eq!(w.store.len().unwrap(), 2);
}

#[tokio::test]
async fn create_with_empty_title_fails_before_any_call() {
    let w = world(vec![setup("1", 5)]);

    let err = w.feed.create(form("")).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Validation {
            field: Some("title".into()),
            message: "Title is required".into()
        }
    );
    assert_eq!(w.transport.calls("setup.create"), 0);
    assert_eq!(w.store.len().unwrap(), 1);
    assert!(w.feed.drain_notices().is_empty());
}

#[tokio::test]
async fn sequential_likes_settle_in_issue_order() {
    let w = world(vec![setup("1", 0)]);
    w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");

    let first = w.feed.like("1").await;
    let second = w.feed.like("1").await;

    assert!(first.is_committed());
    assert!(second.is_committed());
    assert_eq!(w.store.find_by_id("1").unwrap().unwrap().likes, 2);
    assert_eq!(likes_of(&w.feed.load().await.unwrap(), "1"), Some(2));
}

#[tokio::test]
async fn create_invalidates_the_list() {
    let w = world(vec![setup("1", 5)]);
    w.feed.load().await.unwrap();

    let created = w.feed.create(form("Attic")).await.unwrap();
    assert!(w.feed.cache().is_stale(&QueryKey::all()));

    let listed = w.feed.load().await.unwrap();
    assert_eq!(ids(&listed), vec!["1", created.id.as_str()]);
    assert_eq!(w.feed.drain_notices()[0].message, "Setup created");
}

#[tokio::test]
async fn transport_failure_rolls_back_with_generic_notice() {
    let w = world(vec![setup("1", 5)]);
    let before = w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");
    w.transport
        .fail("setup.like", ClientError::Transport("connection reset".into()));

    let settlement = w.feed.like("1").await;

    assert_eq!(settlement.state(), IntentState::SettledRollback);
    assert!(settlement.error().unwrap().is_retryable());
    assert_eq!(&*w.feed.setups(), &*before);
    assert_eq!(w.feed.drain_notices()[0].message, "Failed to like setup");

    w.transport.heal("setup.like");
    assert!(w.feed.like("1").await.is_committed());
    assert_eq!(w.store.find_by_id("1").unwrap().unwrap().likes, 6);
}

#[tokio::test(start_paused = true)]
async fn timeout_rolls_back_without_reaching_the_store() {
    let w = world_with_timeout(vec![setup("1", 5)], Duration::from_secs(1));
    w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");
    w.transport.delay("setup.like", Duration::from_secs(5));

    let settlement = w.feed.like("1").await;

    assert_eq!(
        settlement.error(),
        Some(&ClientError::Timeout(Duration::from_secs(1)))
    );
    assert_eq!(likes_of(&w.feed.setups(), "1"), Some(5));
    assert_eq!(w.store.find_by_id("1").unwrap().unwrap().likes, 5);
    assert_eq!(w.feed.drain_notices()[0].message, "Failed to like setup");
}

#[tokio::test]
async fn deleting_an_already_deleted_setup_commits() {
    let w = world(vec![setup("1", 5), setup("2", 3)]);
    w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");
    w.store.remove("2").unwrap();

    let settlement = w.feed.delete("2").await;

    assert!(settlement.is_committed());
    assert_eq!(ids(&w.feed.setups()), vec!["1"]);
    assert!(w.feed.drain_notices().is_empty());
}

#[tokio::test]
async fn mutation_before_first_load_patches_nothing() {
    let w = world(vec![setup("1", 5)]);
    w.feed.sign_in("user-1");

    let settlement = w.feed.like("1").await;

    assert!(settlement.is_committed());
    assert!(w.feed.cache().read(&QueryKey::all()).is_none());
    assert_eq!(likes_of(&w.feed.load().await.unwrap(), "1"), Some(6));
}

#[tokio::test]
async fn like_at_the_ceiling_rolls_back() {
    let w = world(vec![setup("1", u32::MAX)]);
    let before = w.feed.load().await.unwrap();
    w.feed.sign_in("user-1");

    let settlement = w.feed.like("1").await;

    assert!(matches!(
        settlement.error(),
        Some(ClientError::Validation { .. })
    ));
    assert_eq!(&*w.feed.setups(), &*before);
    assert_eq!(w.feed.drain_notices()[0].message, "Failed to like setup");
}
