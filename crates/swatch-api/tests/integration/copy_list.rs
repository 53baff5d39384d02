//! Integration tests for the copy-list flow.

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use swatch_core::PersonId;
use swatch_storage::MemoryStore;

use crate::common::{FlakyStore, TestBrowser, body_text, list_path, redirect_target};

#[tokio::test]
async fn test_copy_flow_end_to_end() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red", "Green", "Blue"]).await;

    let resp = browser
        .post_form("/addPerson", "person=Alice+Again&action=copy")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Alice Again"));
    assert!(html.contains(&alice.id.to_string()));
    assert_eq!(browser.persons().await.len(), 1, "copy intent must not create yet");

    let resp = browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;
    let target = redirect_target(&resp);

    let persons = browser.persons().await;
    assert_eq!(persons.len(), 2);
    let copy = persons.iter().find(|p| p.name == "Alice Again").unwrap();
    assert_eq!(target, list_path(copy.id));

    let source_items = browser.items(alice.id).await;
    let copied = browser.items(copy.id).await;
    let values: Vec<&str> = copied.iter().map(|i| i.value.as_str()).collect();
    assert_eq!(values, vec!["Red", "Green", "Blue"]);
    assert!(copied.iter().all(|i| i.owner_id == copy.id));

    let source_ids: HashSet<_> = source_items.iter().map(|i| i.id).collect();
    assert!(copied.iter().all(|i| !source_ids.contains(&i.id)));
    assert_eq!(source_items.len(), 3, "source list is untouched");
}

#[tokio::test]
async fn test_copy_clones_at_most_ten_items() {
    let mut browser = TestBrowser::new();
    let colours: Vec<String> = (0..12).map(|n| format!("Shade{n:02}")).collect();
    let refs: Vec<&str> = colours.iter().map(String::as_str).collect();
    let source = browser.seed_person("Source", &refs).await;

    browser
        .post_form("/addPerson", "person=Target&action=copy")
        .await;
    browser
        .post_form("/copyList", &format!("person={}", source.id))
        .await;

    let target = browser
        .persons()
        .await
        .into_iter()
        .find(|p| p.name == "Target")
        .unwrap();
    let copied = browser.items(target.id).await;
    assert_eq!(copied.len(), 10);
    assert_eq!(copied[9].value, "Shade09");
}

#[tokio::test]
async fn test_pending_name_is_used_once() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;

    browser
        .post_form("/addPerson", "person=Copy&action=copy")
        .await;
    browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;

    let resp = browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;
    assert_eq!(redirect_target(&resp), "/");
    assert_eq!(browser.persons().await.len(), 2);
}

#[tokio::test]
async fn test_copy_without_pending_name_creates_nothing() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;

    let resp = browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;
    assert_eq!(redirect_target(&resp), "/");
    assert_eq!(browser.persons().await.len(), 1);
}

#[tokio::test]
async fn test_copy_without_source_returns_to_picker() {
    let mut browser = TestBrowser::new();
    browser
        .post_form("/addPerson", "person=Copy&action=copy")
        .await;

    let resp = browser.post_form("/copyList", "").await;
    assert_eq!(redirect_target(&resp), "/pickCopyList");
    assert!(browser.persons().await.is_empty());

    let html = body_text(browser.get("/pickCopyList").await).await;
    assert!(html.contains("<strong>Copy</strong>"), "pending name survives a missing source");
}

#[tokio::test]
async fn test_copy_from_unknown_source_creates_empty_list() {
    let mut browser = TestBrowser::new();
    browser
        .post_form("/addPerson", "person=Fresh&action=copy")
        .await;

    let resp = browser
        .post_form("/copyList", &format!("person={}", PersonId::generate()))
        .await;
    let target = redirect_target(&resp);

    let persons = browser.persons().await;
    assert_eq!(persons.len(), 1);
    assert_eq!(target, list_path(persons[0].id));
    assert!(browser.items(persons[0].id).await.is_empty());
}

#[tokio::test]
async fn test_pick_copy_list_renders_persons() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;

    let resp = browser.get("/pickCopyList").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Alice"));
    assert!(html.contains(&format!("value=\"{}\"", alice.id)));
}

#[tokio::test]
async fn test_copy_with_malformed_source_is_bad_request() {
    let mut browser = TestBrowser::new();
    browser
        .post_form("/addPerson", "person=Copy&action=copy")
        .await;
    let resp = browser.post_form("/copyList", "person=abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_copy_keeps_pending_name_for_retry() {
    let backing = Arc::new(MemoryStore::new());
    let flaky = Arc::new(FlakyStore::new(backing.clone()));
    let mut browser = TestBrowser::serving(flaky.clone(), backing);
    let alice = browser.seed_person("Alice", &["Red", "Green"]).await;

    browser
        .post_form("/addPerson", "person=Copy&action=copy")
        .await;

    flaky.set_failing(true);
    let resp = browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(browser.persons().await.len(), 1);

    flaky.set_failing(false);
    let resp = browser
        .post_form("/copyList", &format!("person={}", alice.id))
        .await;
    let target = redirect_target(&resp);

    let copy = browser
        .persons()
        .await
        .into_iter()
        .find(|p| p.name == "Copy")
        .unwrap();
    assert_eq!(target, list_path(copy.id));
    assert_eq!(browser.items(copy.id).await.len(), 2);
}
