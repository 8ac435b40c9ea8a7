//! API integration tests
//!
//! These run against a live server with a clean database:
//! `RUN_MODE=development cargo run` then `cargo test -- --ignored`.
//! Tokens are minted locally with the development secret, standing in for
//! the external identity provider.

use reqwest::Client;
use serde_json::{json, Value};

use locallibrary_server::models::user::{UserClaims, UserPermissions};

const BASE_URL: &str = "http://localhost:8000/api/v1";
const DEV_SECRET: &str = "change-this-secret-in-production";

/// Mint a token for the given account, as the identity provider would
fn make_token(user_id: i32, can_mark_returned: bool, manage_catalog: bool) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = UserClaims {
        sub: format!("user-{}", user_id),
        user_id,
        permissions: UserPermissions {
            can_mark_returned,
            manage_catalog,
        },
        iat: now,
        exp: now + 3600,
    };
    claims
        .create_token(DEV_SECRET)
        .expect("Failed to mint test token")
}

/// A token with full catalog rights (the user id does not need to exist
/// for catalog management, only for borrowing)
fn staff_token() -> String {
    make_token(1, true, true)
}

/// Create a user account and return its id
async fn create_user(client: &Client, username: &str) -> i32 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff_token()))
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No user ID") as i32
}

/// Create a book with no author and return its id
async fn create_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff_token()))
        .json(&json!({ "title": title }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

/// Create a copy of a book and return its UUID
async fn create_instance(client: &Client, body: Value) -> String {
    let response = client
        .post(format!("{}/instances", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff_token()))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No instance ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_probes_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_write_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "first_name": "Jane", "last_name": "Doe" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_author_death_before_birth_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff_token()))
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date_of_birth": "1815-12-10",
            "date_of_death": "1814-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_authors_ordered_by_last_name() {
    let client = Client::new();
    let token = staff_token();

    for (first, last) in [("Zadie", "Abbott"), ("Alice", "Zimmer")] {
        let response = client
            .post(format!("{}/authors", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "first_name": first, "last_name": last }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let authors = body.as_array().expect("Expected an array");
    let last_names: Vec<&str> = authors
        .iter()
        .map(|a| a["last_name"].as_str().unwrap())
        .collect();

    let mut sorted = last_names.clone();
    sorted.sort();
    assert_eq!(last_names, sorted);
}

#[tokio::test]
#[ignore]
async fn test_list_books_is_paginated() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?page=1&per_page=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 5);
    assert!(body["items"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
#[ignore]
async fn test_page_zero_is_clamped_in_envelope() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?page=0&per_page=0", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // The envelope reports the page actually queried, not the raw input
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 1);
}

#[tokio::test]
#[ignore]
async fn test_book_title_filter() {
    let client = Client::new();
    let marker = "Xylophone Repair Quarterly";
    create_book(&client, marker).await;
    create_book(&client, "Completely Unrelated").await;

    let response = client
        .get(format!("{}/books?title=xylophone", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("Expected items");
    assert!(!items.is_empty());
    for item in items {
        assert!(item["title"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("xylophone"));
    }
}

#[tokio::test]
#[ignore]
async fn test_title_filter_wildcards_are_literal() {
    let client = Client::new();
    create_book(&client, "100% Cotton Weaving").await;
    create_book(&client, "100x Cotton Weaving").await;

    let response = client
        .get(format!("{}/books?title=100%25%20Cotton", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // "100% Cotton" matches only the literal title, not "100x Cotton"
    let body: Value = response.json().await.expect("Failed to parse response");
    let items = body["items"].as_array().expect("Expected items");
    assert!(!items.is_empty());
    for item in items {
        assert!(item["title"].as_str().unwrap().contains("100% Cotton"));
    }
}

#[tokio::test]
#[ignore]
async fn test_deleting_author_keeps_books() {
    let client = Client::new();
    let token = staff_token();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "first_name": "Brief", "last_name": "Tenure" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let author: Value = response.json().await.expect("Failed to parse response");
    let author_id = author["id"].as_i64().expect("No author ID");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "title": "Orphaned Soon", "author_id": author_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The book survives with its author reference cleared
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["author_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_deleting_book_keeps_instances() {
    let client = Client::new();
    let token = staff_token();

    let book_id = create_book(&client, "Ephemeral Edition").await;
    let instance_id = create_instance(
        &client,
        json!({ "book_id": book_id, "imprint": "First edition, 2020" }),
    )
    .await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["book_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_new_instance_defaults_to_maintenance() {
    let client = Client::new();

    let book_id = create_book(&client, "Fresh Arrival").await;
    let instance_id = create_instance(
        &client,
        json!({ "book_id": book_id, "imprint": "Hardcover, 2024" }),
    )
    .await;

    let response = client
        .get(format!("{}/instances/{}", BASE_URL, instance_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "m");
}

#[tokio::test]
#[ignore]
async fn test_return_requires_permission() {
    let client = Client::new();

    let borrower_id = create_user(&client, "perm_test_borrower").await;
    let book_id = create_book(&client, "Guarded Return").await;
    let instance_id = create_instance(
        &client,
        json!({
            "book_id": book_id,
            "imprint": "Paperback, 2019",
            "status": "o",
            "borrower_id": borrower_id
        }),
    )
    .await;

    // Borrower without the permission cannot return their own loan
    let token = make_token(borrower_id, false, false);
    let response = client
        .post(format!("{}/instances/{}/return", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_return_rejects_non_borrower() {
    let client = Client::new();

    let borrower_id = create_user(&client, "actual_borrower").await;
    let other_id = create_user(&client, "other_reader").await;
    let book_id = create_book(&client, "Someone Else's Loan").await;
    let instance_id = create_instance(
        &client,
        json!({
            "book_id": book_id,
            "imprint": "Paperback, 2018",
            "status": "o",
            "borrower_id": borrower_id
        }),
    )
    .await;

    // A different user with the permission still cannot return it
    let token = make_token(other_id, true, false);
    let response = client
        .post(format!("{}/instances/{}/return", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_return_by_borrower_succeeds() {
    let client = Client::new();

    let borrower_id = create_user(&client, "returning_reader").await;
    let book_id = create_book(&client, "Due Back Today").await;
    let instance_id = create_instance(
        &client,
        json!({
            "book_id": book_id,
            "imprint": "Paperback, 2021",
            "status": "o",
            "due_back": "2026-09-15",
            "borrower_id": borrower_id
        }),
    )
    .await;

    let token = make_token(borrower_id, true, false);
    let response = client
        .post(format!("{}/instances/{}/return", BASE_URL, instance_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "returned");
    assert_eq!(body["instance"]["status"], "a");
    assert!(body["instance"]["borrower_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_return_nonexistent_instance() {
    let client = Client::new();
    let token = make_token(1, true, true);

    let response = client
        .post(format!(
            "{}/instances/00000000-0000-0000-0000-000000000000/return",
            BASE_URL
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_my_loans_only_lists_own_on_loan_copies() {
    let client = Client::new();

    let reader_id = create_user(&client, "loan_list_reader").await;
    let other_id = create_user(&client, "loan_list_other").await;
    let book_id = create_book(&client, "Borrowed Stories").await;

    // One on loan to the reader, one to someone else, one merely available
    let mine = create_instance(
        &client,
        json!({
            "book_id": book_id,
            "imprint": "Copy 1",
            "status": "o",
            "borrower_id": reader_id
        }),
    )
    .await;
    create_instance(
        &client,
        json!({
            "book_id": book_id,
            "imprint": "Copy 2",
            "status": "o",
            "borrower_id": other_id
        }),
    )
    .await;
    create_instance(
        &client,
        json!({ "book_id": book_id, "imprint": "Copy 3", "status": "a" }),
    )
    .await;

    let token = make_token(reader_id, false, false);
    let response = client
        .get(format!("{}/my/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let loans = body.as_array().expect("Expected an array");

    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["id"], mine.as_str());
    assert_eq!(loans[0]["status"], "o");
}

#[tokio::test]
#[ignore]
async fn test_my_loans_ordered_by_due_date() {
    let client = Client::new();

    let reader_id = create_user(&client, "loan_order_reader").await;
    let book_id = create_book(&client, "Serialized Saga").await;

    // Created out of due-date order on purpose
    for (imprint, due_back) in [
        ("Volume 2", "2026-10-01"),
        ("Volume 3", "2026-11-15"),
        ("Volume 1", "2026-09-05"),
    ] {
        create_instance(
            &client,
            json!({
                "book_id": book_id,
                "imprint": imprint,
                "status": "o",
                "due_back": due_back,
                "borrower_id": reader_id
            }),
        )
        .await;
    }

    let token = make_token(reader_id, false, false);
    let response = client
        .get(format!("{}/my/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let loans = body.as_array().expect("Expected an array");

    assert_eq!(loans.len(), 3);
    let due_dates: Vec<&str> = loans
        .iter()
        .map(|l| l["due_back"].as_str().unwrap())
        .collect();
    assert_eq!(due_dates, vec!["2026-09-05", "2026-10-01", "2026-11-15"]);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["books"].is_number());
    assert!(body["instances"].is_number());
    assert!(body["instances_available"].is_number());
    assert!(body["authors"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_visit_counter_increments() {
    let client = Client::new();
    let session = format!("test-session-{}", chrono::Utc::now().timestamp_micros());

    for expected in 1..=3 {
        let response = client
            .post(format!("{}/visits", BASE_URL))
            .json(&json!({ "session_id": session }))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["count"], expected);
    }

    let response = client
        .get(format!("{}/visits/{}", BASE_URL, session))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["count"], 3);
}
