mod common;

use common::TestApp;
use common::LAWYER_ROLE;
use common::PASSWORD;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_register_login_and_profile() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "admin").await;
    let admin = app.login("admin").await;

    let response = admin
        .post(app.url("/api/users"))
        .json(&json!({
            "username": "nicola",
            "national_id": "NID-4711",
            "email": "nicola@example.com",
            "first_name": "Nicola",
            "last_name": "Rossi",
            "password": PASSWORD,
            "role_id": LAWYER_ROLE
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["account_id"], tenant.account_id);
    assert!(body["data"].get("password_hash").is_none());

    let user_id = body["data"]["id"].as_i64().expect("User id missing");
    let nicola = app.login("nicola").await;

    let response = nicola
        .get(app.url("/api/users/me"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["id"], user_id);
    assert_eq!(body["data"]["role_name"], "lawyer");
    assert_eq!(body["data"]["subscription_plan"], "basic");
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "jdoe").await;
    app.seed_user(tenant.account_id, "other").await;
    let jdoe = app.login("jdoe").await;

    let response = jdoe
        .patch(app.url("/api/users/me"))
        .json(&json!({ "phone": "+56 9 1234 5678", "city": "Santiago" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["phone"], "+56 9 1234 5678");
    assert_eq!(body["data"]["city"], "Santiago");
    assert_eq!(body["data"]["username"], "jdoe");

    // Email owned by another user
    let response = jdoe
        .patch(app.url("/api/users/me"))
        .json(&json!({ "email": "other@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = jdoe
        .patch(app.url("/api/users/me"))
        .json(&json!({ "role_id": 1 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = jdoe
        .patch(app.url("/api/users/me"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = jdoe
        .get(app.url("/api/users/me"))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["email"], "jdoe@example.com");
    assert_eq!(body["data"]["user"]["city"], "Santiago");
}

#[tokio::test]
async fn test_stale_cookie_does_not_shadow_bearer_token() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "jdoe").await;
    let jdoe = app.login("jdoe").await;

    let response = jdoe
        .get(app.url("/api/users/me"))
        .header(reqwest::header::COOKIE, "accessToken=expired.or.forged")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = reqwest::Client::new()
        .get(app.url("/api/users/me"))
        .header(reqwest::header::COOKIE, "accessToken=expired.or.forged")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "admin").await;
    let admin = app.login("admin").await;

    let response = admin
        .post(app.url("/api/users"))
        .json(&json!({
            "username": "admin",
            "national_id": "NID-other",
            "email": "other@example.com",
            "first_name": "Other",
            "last_name": "Person",
            "password": PASSWORD,
            "role_id": LAWYER_ROLE
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "jdoe").await;
    let client = reqwest::Client::new();

    let wrong_password = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": "jdoe", "password": "not-the-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    let unknown_user = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": "nobody", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json().await.expect("Failed to parse response");
    let unknown_user: Value = unknown_user.json().await.expect("Failed to parse response");
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::spawn().await;

    let response = reqwest::Client::new()
        .get(app.url("/api/cases"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = reqwest::Client::new()
        .get(app.url("/api/cases"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_case_visibility() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    let other_tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "owner").await;
    app.seed_user(tenant.account_id, "colleague").await;
    app.seed_user(other_tenant.account_id, "outsider").await;

    let owner = app.login("owner").await;
    let colleague = app.login("colleague").await;
    let outsider = app.login("outsider").await;

    let case_id = app.create_case(&owner, tenant.client_id, "Rossi v. Bianchi").await;
    let path = format!("/api/cases/{}", case_id);

    let response = owner
        .get(app.url(&path))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Rossi v. Bianchi");

    // Existing case the caller is not a member of.
    for client in [&colleague, &outsider] {
        let response = client
            .get(app.url(&path))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    let response = owner
        .get(app.url("/api/cases/999999"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = owner
        .get(app.url("/api/cases/not-a-number"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = colleague
        .get(app.url("/api/cases"))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_case_with_new_client_and_client_lookup() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    let other_tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "owner").await;
    app.seed_user(other_tenant.account_id, "outsider").await;
    let owner = app.login("owner").await;
    let outsider = app.login("outsider").await;

    let new_client = json!({
        "first_name": "Ana",
        "last_name": "Soto",
        "email": "ana.soto@example.com",
        "national_id": "15555555-5",
        "phone": "+56 2 2345 6789",
        "address": "Av. Providencia 100"
    });

    let response = owner
        .post(app.url("/api/cases"))
        .json(&json!({ "title": "Soto estate", "client": new_client }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let client_id = body["data"]["client_id"].as_i64().expect("Client id missing");

    let response = owner
        .get(app.url("/api/clients?national_id=15555555-5"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], client_id);
    assert_eq!(body["data"]["email"], "ana.soto@example.com");
    assert_eq!(body["data"]["address"], "Av. Providencia 100");

    // The new client is now linked and usable by id.
    let response = owner
        .post(app.url("/api/cases"))
        .json(&json!({ "title": "Soto appeal", "client_id": client_id }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same national id again.
    let response = owner
        .post(app.url("/api/cases"))
        .json(&json!({ "title": "Duplicate", "client": new_client }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Clients are only visible to the accounts they are linked to.
    let response = outsider
        .get(app.url("/api/clients?national_id=15555555-5"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = owner
        .get(app.url("/api/clients?national_id=99999999-9"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = owner
        .post(app.url("/api/cases"))
        .json(&json!({ "title": "Nobody" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_case_with_foreign_client_rejected() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    let other_tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "owner").await;
    let owner = app.login("owner").await;

    let response = owner
        .post(app.url("/api/cases"))
        .json(&json!({ "title": "Poaching", "client_id": other_tenant.client_id }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_case_files_lifecycle() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(100).await;
    app.seed_user(tenant.account_id, "owner").await;
    let owner = app.login("owner").await;
    let case_id = app.create_case(&owner, tenant.client_id, "Estate").await;
    let files_path = format!("/api/cases/{}/files", case_id);

    let response = owner
        .post(app.url(&format!("{}?name=will.pdf", files_path)))
        .body(vec![7u8; 60])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let file_id = body["data"]["id"].as_i64().expect("File id missing");
    assert_eq!(body["data"]["size_bytes"], 60);

    // Same name in the same case.
    let response = owner
        .post(app.url(&format!("{}?name=will.pdf", files_path)))
        .body(vec![1u8; 10])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 60 + 60 exceeds the 100 byte subscription limit.
    let response = owner
        .post(app.url(&format!("{}?name=deed.pdf", files_path)))
        .body(vec![1u8; 60])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = owner
        .get(app.url(&format!("{}/{}", files_path, file_id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("will.pdf")));
    assert_eq!(response.bytes().await.expect("Failed to read body").len(), 60);

    // Cases holding files cannot be deleted.
    let response = owner
        .delete(app.url(&format!("/api/cases/{}", case_id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = owner
        .delete(app.url(&format!("{}/{}", files_path, file_id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = owner
        .delete(app.url(&format!("/api/cases/{}", case_id)))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_quota_counts_shared_file_once() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(100).await;
    app.seed_user(tenant.account_id, "owner").await;
    let owner = app.login("owner").await;
    let first_case = app.create_case(&owner, tenant.client_id, "Estate").await;
    let second_case = app.create_case(&owner, tenant.client_id, "Probate").await;

    let response = owner
        .post(app.url(&format!("/api/cases/{}/files?name=will.pdf", first_case)))
        .body(vec![7u8; 60])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let file_id = body["data"]["id"].as_i64().expect("File id missing");

    sqlx::query("INSERT INTO legal_case_x_files (legal_case_id, file_id) VALUES ($1, $2)")
        .bind(second_case)
        .bind(file_id)
        .execute(&app.db.pool)
        .await
        .expect("Failed to link file");

    // 60 stored bytes plus 30 new ones fit in the 100 byte limit.
    let response = owner
        .post(app.url(&format!("/api/cases/{}/files?name=note.txt", second_case)))
        .body(vec![1u8; 30])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_concurrent_invoices_get_distinct_numbers() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "billing").await;
    let billing = app.login("billing").await;

    let requests = (0..8).map(|i| {
        billing
            .post(app.url("/api/invoices"))
            .json(&json!({
                "client_id": tenant.client_id,
                "due_date": "2099-01-31T00:00:00Z",
                "items": [
                    { "description": format!("Consultation {}", i), "hours_worked": 2, "hourly_rate_cents": 12_500 }
                ]
            }))
            .send()
    });

    let mut numbers = Vec::new();
    for response in futures::future::join_all(requests).await {
        let response = response.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["data"]["total_cents"], 25_000);
        numbers.push(body["data"]["invoice_number"].as_i64().expect("Number missing"));
    }

    numbers.sort_unstable();
    assert_eq!(numbers, (1000..1008).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_invoices_are_private_to_their_issuer() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "issuer").await;
    app.seed_user(tenant.account_id, "colleague").await;
    let issuer = app.login("issuer").await;
    let colleague = app.login("colleague").await;

    let response = issuer
        .post(app.url("/api/invoices"))
        .json(&json!({
            "client_id": tenant.client_id,
            "due_date": "2099-01-31T00:00:00Z",
            "items": [{ "description": "Filing", "hourly_rate_cents": 5_000 }]
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let invoice_path = format!("/api/invoices/{}", body["data"]["id"]);

    let response = colleague
        .get(app.url(&invoice_path))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = issuer
        .put(app.url(&format!("{}/status", invoice_path)))
        .json(&json!({ "status": "paid" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "paid");
}

#[tokio::test]
async fn test_agenda_filters() {
    let app = TestApp::spawn().await;
    let tenant = app.seed_account(1_000_000).await;
    app.seed_user(tenant.account_id, "planner").await;
    app.seed_user(tenant.account_id, "colleague").await;
    let planner = app.login("planner").await;
    let colleague = app.login("colleague").await;

    for (name, tags) in [
        ("Hearing", json!(["court", "urgent"])),
        ("Client call", json!(["client"])),
        ("Appeal deadline", json!(["court"])),
    ] {
        let response = planner
            .post(app.url("/api/agenda"))
            .json(&json!({
                "event_name": name,
                "description": format!("{} notes", name),
                "due_date": "2099-03-01T09:00:00Z",
                "tags": tags
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = planner
        .get(app.url("/api/agenda?tags=court"))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let response = planner
        .get(app.url("/api/agenda?tags=court,urgent&q=hear"))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"][0]["event_name"], "Hearing");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let response = colleague
        .get(app.url("/api/agenda"))
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!([]));
}
