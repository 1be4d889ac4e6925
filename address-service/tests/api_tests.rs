mod common;

use auth::Claims;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "pw123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "pw123").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Other Alice",
            "email": "alice@example.com",
            "password": "pw456"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "pw123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_returns_token_usable_on_protected_routes() {
    let app = TestApp::spawn().await;
    let user = app.register("Alice", "alice@example.com", "pw123").await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "email": "alice@example.com",
            "password": "pw123"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["token"].as_str().unwrap();
    assert_eq!(body["data"]["user"]["id"], user["id"]);
    assert!(body["data"]["expires_at"].as_i64().unwrap() > Utc::now().timestamp());

    let response = app
        .get_authenticated("/api/users/me", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], user["id"]);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", "alice@example.com", "pw123").await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_email = app
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "pw123" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.unwrap();
    let unknown_email: Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_protected_route_without_header() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/addresses")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "missing_credential");
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;

    let response = app
        .get("/api/addresses")
        .header("Authorization", format!("Basic {}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "malformed_credential");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get_authenticated("/api/addresses", "not.a.jwt")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "invalid_credential");
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;
    let (user_id, _) = app.register_and_login("Alice", "alice@example.com").await;

    let now = Utc::now().timestamp();
    let expired = app
        .jwt_handler
        .encode(&Claims::new(user_id, now - 60).with_issued_at(now - 3660))
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "expired_credential");
    assert_eq!(body["data"]["message"], "Token has expired");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::spawn().await;
    let (user_id, _) = app.register_and_login("Alice", "alice@example.com").await;

    let forged = auth::JwtHandler::new(b"some-other-secret-at-least-32-bytes!!")
        .encode(&Claims::new(user_id, Utc::now().timestamp() + 3600))
        .unwrap();

    let response = app
        .get_authenticated("/api/users/me", &forged)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "invalid_credential");
}

#[tokio::test]
async fn test_create_address_ignores_owner_in_body() {
    let app = TestApp::spawn().await;
    let (alice_id, alice_token) = app.register_and_login("Alice", "alice@example.com").await;
    let (bob_id, _) = app.register_and_login("Bob", "bob@example.com").await;

    let response = app
        .post_authenticated("/api/addresses", &alice_token)
        .json(&json!({
            "owner_id": bob_id,
            "street": "Rua Augusta",
            "number": "10",
            "city": "Lisbon",
            "country": "PT"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["owner_id"], alice_id);
    assert_eq!(body["data"]["street"], "Rua Augusta");
}

#[tokio::test]
async fn test_create_address_requires_street() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;

    let response = app
        .post_authenticated("/api/addresses", &token)
        .json(&json!({
            "street": "  ",
            "city": "Lisbon",
            "country": "PT"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_list_addresses_is_scoped_to_caller() {
    let app = TestApp::spawn().await;
    let (_, alice_token) = app.register_and_login("Alice", "alice@example.com").await;
    let (_, bob_token) = app.register_and_login("Bob", "bob@example.com").await;

    let alice_address = app.create_address(&alice_token, "Rua Augusta").await;
    app.create_address(&bob_token, "Rua do Ouro").await;
    app.create_address(&bob_token, "Rua da Prata").await;

    let response = app
        .get_authenticated("/api/addresses", &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let addresses = body["data"].as_array().unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0]["id"], alice_address.as_str());

    let response = app
        .get_authenticated("/api/addresses", &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_foreign_address_is_not_found() {
    let app = TestApp::spawn().await;
    let (_, alice_token) = app.register_and_login("Alice", "alice@example.com").await;
    let (_, bob_token) = app.register_and_login("Bob", "bob@example.com").await;
    let address_id = app.create_address(&alice_token, "Rua Augusta").await;
    let path = format!("/api/addresses/{}", address_id);

    let response = app
        .get_authenticated(&path, &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let foreign: Value = response.json().await.unwrap();

    // Indistinguishable from an id that does not exist at all
    let response = app
        .get_authenticated(
            &format!("/api/addresses/{}", uuid::Uuid::new_v4()),
            &bob_token,
        )
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let missing: Value = response.json().await.unwrap();
    assert_eq!(foreign, missing);

    let response = app
        .patch_authenticated(&path, &bob_token)
        .json(&json!({ "street": "Hijacked" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .delete_authenticated(&path, &bob_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Alice's record is untouched
    let response = app
        .get_authenticated(&path, &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["street"], "Rua Augusta");
}

#[tokio::test]
async fn test_update_and_delete_own_address() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;
    let address_id = app.create_address(&token, "Rua Augusta").await;
    let path = format!("/api/addresses/{}", address_id);

    let response = app
        .patch_authenticated(&path, &token)
        .json(&json!({ "number": "99", "complement": "3rd floor" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["number"], "99");
    assert_eq!(body["data"]["complement"], "3rd floor");
    assert_eq!(body["data"]["street"], "Rua Augusta");

    let response = app
        .delete_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .get_authenticated(&path, &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_address_id_is_bad_request() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;

    let response = app
        .get_authenticated("/api/addresses/not-a-uuid", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_me_changes_password() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;

    let response = app
        .patch_authenticated("/api/users/me", &token)
        .json(&json!({ "name": "Alice Liddell", "password": "new_pass!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Alice Liddell");

    let response = app
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    app.login("alice@example.com", "new_pass!").await;
}

#[tokio::test]
async fn test_delete_me_removes_account_and_addresses() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;
    app.create_address(&token, "Rua Augusta").await;

    let response = app
        .delete_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // The token is still well-formed, but its subject is gone
    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get_authenticated("/api/addresses", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_me_includes_own_addresses_only() {
    let app = TestApp::spawn().await;
    let (alice_id, alice_token) = app.register_and_login("Alice", "alice@example.com").await;
    let (_, bob_token) = app.register_and_login("Bob", "bob@example.com").await;

    let first = app.create_address(&alice_token, "Rua Augusta").await;
    let second = app.create_address(&alice_token, "Rua do Carmo").await;
    app.create_address(&bob_token, "Rua do Ouro").await;

    let response = app
        .get_authenticated("/api/users/me", &alice_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], alice_id.as_str());
    assert_eq!(body["data"]["email"], "alice@example.com");

    let addresses = body["data"]["addresses"].as_array().unwrap();
    let ids: Vec<&str> = addresses.iter().map(|a| a["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.as_str()));
    assert!(ids.contains(&second.as_str()));
    assert!(addresses.iter().all(|a| a["owner_id"] == alice_id.as_str()));
}

#[tokio::test]
async fn test_token_of_deleted_account_cannot_create_addresses() {
    let app = TestApp::spawn().await;
    let (_, token) = app.register_and_login("Alice", "alice@example.com").await;

    let response = app
        .delete_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_authenticated("/api/addresses", &token)
        .json(&json!({
            "street": "Ghost St",
            "city": "Lisbon",
            "country": "PT"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["reason"], "invalid_credential");

    let response = app
        .get_authenticated("/api/addresses", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}
