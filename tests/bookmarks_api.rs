mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use bookmark_api::application::ports::bookmark_repository::BookmarkRepository;
use bookmark_api::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use bookmark_api::infrastructure::memory::MemoryBookmarkRepository;
use serde_json::json;
use uuid::Uuid;

use common::{app, app_with_bookmarks, send, signup};

#[tokio::test]
async fn bookmark_lifecycle_for_one_user() {
    let app = app();
    let token = signup(&app, "email@email.com").await;

    let empty = send(&app, "GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body, json!([]));

    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&token),
        Some(json!({ "title": "First Bookmark", "link": "https://example.com/x" })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_str().expect("id").to_string();
    assert_eq!(created.body["title"], "First Bookmark");
    assert!(created.body["createdAt"].is_string());

    let listed = send(&app, "GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));

    let fetched = send(&app, "GET", &format!("/bookmarks/{id}"), Some(&token), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["id"], id.as_str());

    let edited = send(
        &app,
        "PATCH",
        &format!("/bookmarks/{id}"),
        Some(&token),
        Some(json!({ "title": "T2", "description": "D" })),
    )
    .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["title"], "T2");
    assert_eq!(edited.body["description"], "D");
    assert_eq!(edited.body["link"], "https://example.com/x");

    let deleted = send(&app, "DELETE", &format!("/bookmarks/{id}"), Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let after = send(&app, "GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(after.body, json!([]));
}

#[tokio::test]
async fn other_users_cannot_see_or_touch_a_bookmark() {
    let app = app();
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;

    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&alice),
        Some(json!({ "title": "secret", "link": "https://example.com/s", "description": "mine" })),
    )
    .await;
    let id = created.body["id"].as_str().expect("id").to_string();
    let uri = format!("/bookmarks/{id}");

    // Reads report absence, mutations report 403: the asymmetry is intentional
    let peek = send(&app, "GET", &uri, Some(&bob), None).await;
    assert_eq!(peek.status, StatusCode::OK);
    assert_eq!(peek.body, serde_json::Value::Null);

    let edit = send(&app, "PATCH", &uri, Some(&bob), Some(json!({ "title": "pwned" }))).await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);
    assert_eq!(edit.body["message"], "Access to resources denied");

    let delete = send(&app, "DELETE", &uri, Some(&bob), None).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let bobs = send(&app, "GET", "/bookmarks", Some(&bob), None).await;
    assert_eq!(bobs.body, json!([]));

    let still_there = send(&app, "GET", &uri, Some(&alice), None).await;
    assert_eq!(still_there.body["title"], "secret");
    assert_eq!(still_there.body["description"], "mine");
}

#[tokio::test]
async fn missing_and_foreign_bookmarks_fail_identically() {
    let app = app();
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;
    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&alice),
        Some(json!({ "title": "a", "link": "https://example.com/a" })),
    )
    .await;
    let foreign = format!("/bookmarks/{}", created.body["id"].as_str().expect("id"));
    let missing = format!("/bookmarks/{}", uuid::Uuid::new_v4());

    let a = send(&app, "DELETE", &foreign, Some(&bob), None).await;
    let b = send(&app, "DELETE", &missing, Some(&bob), None).await;
    assert_eq!(a.status, b.status);
    assert_eq!(a.body, b.body);
}

#[tokio::test]
async fn supplied_owner_in_body_is_ignored() {
    let app = app();
    let alice = signup(&app, "alice@example.com").await;
    let bob = signup(&app, "bob@example.com").await;
    let bob_me = send(&app, "GET", "/users/me", Some(&bob), None).await;
    let bob_id = bob_me.body["id"].as_str().expect("id").to_string();

    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&alice),
        Some(json!({ "title": "t", "link": "https://example.com", "userId": &bob_id })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_ne!(created.body["userId"], bob_id.as_str());

    let bobs = send(&app, "GET", "/bookmarks", Some(&bob), None).await;
    assert_eq!(bobs.body, json!([]));
}

#[tokio::test]
async fn deleting_twice_fails_the_second_time() {
    let app = app();
    let token = signup(&app, "email@email.com").await;
    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&token),
        Some(json!({ "title": "t", "link": "https://example.com" })),
    )
    .await;
    let uri = format!("/bookmarks/{}", created.body["id"].as_str().expect("id"));

    let first = send(&app, "DELETE", &uri, Some(&token), None).await;
    let second = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(second.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn description_null_clears_and_absent_keeps() {
    let app = app();
    let token = signup(&app, "email@email.com").await;
    let created = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&token),
        Some(json!({ "title": "t", "link": "https://example.com", "description": "d" })),
    )
    .await;
    let uri = format!("/bookmarks/{}", created.body["id"].as_str().expect("id"));

    let kept = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "link": "https://rust-lang.org" }))).await;
    assert_eq!(kept.body["description"], "d");
    assert_eq!(kept.body["title"], "t");

    let cleared = send(&app, "PATCH", &uri, Some(&token), Some(json!({ "description": null }))).await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["description"].is_null());
    assert_eq!(cleared.body["link"], "https://rust-lang.org");
}

#[tokio::test]
async fn invalid_requests_are_rejected_with_400() {
    let app = app();
    let token = signup(&app, "email@email.com").await;

    let no_title = send(
        &app,
        "POST",
        "/bookmarks",
        Some(&token),
        Some(json!({ "link": "https://example.com" })),
    )
    .await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);

    let no_link = send(&app, "POST", "/bookmarks", Some(&token), Some(json!({ "title": "t" }))).await;
    assert_eq!(no_link.status, StatusCode::BAD_REQUEST);

    let no_body = send(&app, "POST", "/bookmarks", Some(&token), None).await;
    assert_eq!(no_body.status, StatusCode::BAD_REQUEST);

    let bad_id = send(&app, "GET", "/bookmarks/not-a-uuid", Some(&token), None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let listed = send(&app, "GET", "/bookmarks", Some(&token), None).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn bookmarks_require_a_valid_token() {
    let app = app();
    let none = send(&app, "GET", "/bookmarks", None, None).await;
    assert_eq!(none.status, StatusCode::UNAUTHORIZED);

    let garbage = send(&app, "GET", "/bookmarks", Some("not-a-jwt"), None).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

// Removes the row just before each write, as a concurrent delete would.
struct VanishingBookmarks(MemoryBookmarkRepository);

#[async_trait]
impl BookmarkRepository for VanishingBookmarks {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>> {
        self.0.list_for_user(user_id).await
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        self.0.find_for_user(id, user_id).await
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        self.0.find_by_id(id).await
    }

    async fn create_for_user(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> anyhow::Result<Bookmark> {
        self.0.create_for_user(user_id, bookmark).await
    }

    async fn update(&self, id: Uuid, changes: &BookmarkChanges) -> anyhow::Result<Option<Bookmark>> {
        self.0.delete(id).await?;
        self.0.update(id, changes).await
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        self.0.delete(id).await?;
        self.0.delete(id).await
    }
}

#[tokio::test]
async fn bookmark_removed_mid_request_is_not_found() {
    let app = app_with_bookmarks(Arc::new(VanishingBookmarks(MemoryBookmarkRepository::new())));
    let token = signup(&app, "email@email.com").await;

    let mut ids = Vec::new();
    for title in ["edit me", "delete me"] {
        let created = send(
            &app,
            "POST",
            "/bookmarks",
            Some(&token),
            Some(json!({ "title": title, "link": "https://example.com" })),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
        ids.push(created.body["id"].as_str().expect("id").to_string());
    }

    let edited = send(
        &app,
        "PATCH",
        &format!("/bookmarks/{}", ids[0]),
        Some(&token),
        Some(json!({ "title": "late" })),
    )
    .await;
    assert_eq!(edited.status, StatusCode::NOT_FOUND);
    assert!(edited.body["message"].is_string());

    let deleted = send(&app, "DELETE", &format!("/bookmarks/{}", ids[1]), Some(&token), None).await;
    assert_eq!(deleted.status, StatusCode::NOT_FOUND);
}
