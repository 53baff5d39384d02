//! Integration tests for the item list and item mutation routes.

use axum::http::StatusCode;
use swatch_core::{ItemId, PersonId};

use crate::common::{TestBrowser, body_text, list_path, redirect_target};

#[tokio::test]
async fn test_view_list_then_add_colour_via_session() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;

    let resp = browser.get(&list_path(alice.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = browser.post_form("/addColour", "colour=Red").await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));

    let items = browser.items(alice.id).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].value, "Red");
    assert_eq!(items[0].owner_id, alice.id);

    let html = body_text(browser.get(&list_path(alice.id)).await).await;
    assert!(html.contains("value=\"Red\""));
}

#[tokio::test]
async fn test_add_colour_with_explicit_owner_needs_no_session() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;

    let resp = browser
        .post_form("/addColour", &format!("colour=Blue&owner={}", alice.id))
        .await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));
    assert_eq!(browser.items(alice.id).await.len(), 1);
}

#[tokio::test]
async fn test_explicit_owner_wins_over_session() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;
    let bob = browser.seed_person("Bob", &[]).await;

    browser.get(&list_path(alice.id)).await;
    browser
        .post_form("/addColour", &format!("colour=Blue&owner={}", bob.id))
        .await;

    assert!(browser.items(alice.id).await.is_empty());
    assert_eq!(browser.items(bob.id).await.len(), 1);
}

#[tokio::test]
async fn test_add_colour_without_selected_person_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;

    let resp = browser.post_form("/addColour", "colour=Red").await;
    assert_eq!(redirect_target(&resp), "/");
    assert!(browser.items(alice.id).await.is_empty());
}

#[tokio::test]
async fn test_add_colour_without_value_redirects_back() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &[]).await;
    browser.get(&list_path(alice.id)).await;

    let resp = browser.post_form("/addColour", "colour=").await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));
    assert!(browser.items(alice.id).await.is_empty());
}

#[tokio::test]
async fn test_add_colour_for_person_deleted_elsewhere_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let mut elsewhere = browser.other_browser();
    let alice = browser.seed_person("Alice", &[]).await;

    browser.get(&list_path(alice.id)).await;
    elsewhere
        .get(&format!("/deletePerson?id={}", alice.id))
        .await;

    let resp = browser.post_form("/addColour", "colour=Red").await;
    assert_eq!(redirect_target(&resp), "/");
    assert!(browser.items(alice.id).await.is_empty());
}

#[tokio::test]
async fn test_sessions_do_not_leak_between_browsers() {
    let mut browser = TestBrowser::new();
    let mut other = browser.other_browser();
    let alice = browser.seed_person("Alice", &[]).await;

    browser.get(&list_path(alice.id)).await;
    let resp = other.post_form("/addColour", "colour=Red").await;
    assert_eq!(redirect_target(&resp), "/");
    assert!(browser.items(alice.id).await.is_empty());
}

#[tokio::test]
async fn test_list_shows_at_most_fifty_items() {
    let mut browser = TestBrowser::new();
    let colours: Vec<String> = (0..55).map(|n| format!("Shade{n:02}")).collect();
    let refs: Vec<&str> = colours.iter().map(String::as_str).collect();
    let alice = browser.seed_person("Alice", &refs).await;

    let html = body_text(browser.get(&list_path(alice.id)).await).await;
    assert!(html.contains("Shade49"));
    assert!(!html.contains("Shade50"));
}

#[tokio::test]
async fn test_list_without_id_redirects_to_dashboard() {
    let mut browser = TestBrowser::new();
    let resp = browser.get("/personsColours").await;
    assert_eq!(redirect_target(&resp), "/");
}

#[tokio::test]
async fn test_list_for_unknown_person_redirects_to_dashboard() {
    let mut browser = TestBrowser::new();
    let resp = browser.get(&list_path(PersonId::generate())).await;
    assert_eq!(redirect_target(&resp), "/");
}

#[tokio::test]
async fn test_list_with_malformed_id_is_bad_request() {
    let mut browser = TestBrowser::new();
    let resp = browser.get("/personsColours?id=xyz").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_colour_changes_only_value() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;
    let red = browser.items(alice.id).await.remove(0);

    let resp = browser
        .post_form("/editColour", &format!("id={}&colourField=Crimson", red.id))
        .await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));

    let items = browser.items(alice.id).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, red.id);
    assert_eq!(items[0].owner_id, alice.id);
    assert_eq!(items[0].value, "Crimson");
}

#[tokio::test]
async fn test_edit_colour_without_id_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;
    browser.get(&list_path(alice.id)).await;

    let resp = browser.post_form("/editColour", "colourField=Blue").await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));
    assert_eq!(browser.items(alice.id).await[0].value, "Red");
}

#[tokio::test]
async fn test_edit_missing_colour_redirects() {
    let mut browser = TestBrowser::new();
    let resp = browser
        .post_form(
            "/editColour",
            &format!("id={}&colourField=Blue", ItemId::generate()),
        )
        .await;
    assert_eq!(redirect_target(&resp), "/");
}

#[tokio::test]
async fn test_delete_colour_is_idempotent() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red", "Green"]).await;
    let red = browser.items(alice.id).await.remove(0);
    browser.get(&list_path(alice.id)).await;

    let uri = format!("/deleteColour?id={}", red.id);
    let resp = browser.get(&uri).await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));

    let resp = browser.get(&uri).await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));

    let items = browser.items(alice.id).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].value, "Green");
}

#[tokio::test]
async fn test_delete_colour_with_explicit_owner() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;
    let red = browser.items(alice.id).await.remove(0);

    let resp = browser
        .get(&format!("/deleteColour?id={}&owner={}", red.id, alice.id))
        .await;
    assert_eq!(redirect_target(&resp), list_path(alice.id));
    assert!(browser.items(alice.id).await.is_empty());
}

#[tokio::test]
async fn test_delete_colour_without_id_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;

    let resp = browser.get("/deleteColour").await;
    assert_eq!(redirect_target(&resp), "/");
    assert_eq!(browser.items(alice.id).await.len(), 1);
}

#[tokio::test]
async fn test_delete_colour_without_selected_person_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let alice = browser.seed_person("Alice", &["Red"]).await;
    let red = browser.items(alice.id).await.remove(0);

    let resp = browser.get(&format!("/deleteColour?id={}", red.id)).await;
    assert_eq!(redirect_target(&resp), "/");
    assert_eq!(browser.items(alice.id).await, vec![red]);
}

#[tokio::test]
async fn test_delete_colour_for_person_deleted_elsewhere_is_a_no_op() {
    let mut browser = TestBrowser::new();
    let mut elsewhere = browser.other_browser();
    let alice = browser.seed_person("Alice", &[]).await;
    let bob = browser.seed_person("Bob", &["Blue"]).await;
    let blue = browser.items(bob.id).await.remove(0);

    browser.get(&list_path(alice.id)).await;
    elsewhere
        .get(&format!("/deletePerson?id={}", alice.id))
        .await;

    let resp = browser.get(&format!("/deleteColour?id={}", blue.id)).await;
    assert_eq!(redirect_target(&resp), "/");
    assert_eq!(browser.items(bob.id).await, vec![blue]);
}

#[tokio::test]
async fn test_delete_colour_with_malformed_id_is_bad_request() {
    let mut browser = TestBrowser::new();
    let resp = browser.get("/deleteColour?id=42").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
