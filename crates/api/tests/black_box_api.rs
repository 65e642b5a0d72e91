use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use oficina_api::config::Config;
use oficina_auth::Claims;
use oficina_core::UserId;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    // Dropped (and deleted) together with the server.
    _data_dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("failed to create temp data dir");
        let config = Config {
            bind: "127.0.0.1:0".to_string(),
            data_dir: data_dir.path().to_path_buf(),
            jwt_secret: JWT_SECRET.to_string(),
        };

        // Same router as prod, bound to an ephemeral port.
        let app = oficina_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _data_dir: data_dir,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> Value {
    let res = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn login(client: &reqwest::Client, base_url: &str, email: &str, password: &str) -> Value {
    let res = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/data", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/auth/me", srv.base_url))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_document_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let registered = register(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let user_id = registered["userId"].as_str().unwrap().to_string();
    assert_eq!(registered["email"], "alice@example.com");
    assert!(registered.get("passwordHash").is_none());

    let logged_in = login(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let token = logged_in["token"].as_str().unwrap().to_string();
    assert_eq!(logged_in["userId"], user_id.as_str());
    assert_eq!(logged_in["expiresInSeconds"], 7 * 24 * 60 * 60);

    // The token resolves back to alice.
    let res = client
        .get(format!("{}/api/auth/verify", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["userId"], user_id.as_str());

    let res = client
        .get(format!("{}/api/auth/me", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["email"], "alice@example.com");

    // Append one sale.
    let res = client
        .post(format!("{}/api/data/sales/add", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({"item": "widget", "amount": 10}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["count"], 1);

    // The document now holds that sale and nothing else.
    let res = client
        .get(format!("{}/api/data", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let document: Value = res.json().await.unwrap();
    assert_eq!(document["userId"], user_id.as_str());
    assert_eq!(document["sales"][0]["item"], "widget");
    assert_eq!(document["sales"].as_array().unwrap().len(), 1);
    assert!(document["orders"].as_array().unwrap().is_empty());
    assert!(document["catalogItems"].as_array().unwrap().is_empty());

    let res = client
        .get(format!("{}/api/data/sales", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let sales: Value = res.json().await.unwrap();
    assert_eq!(sales.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "alice@example.com", "secret1").await;

    let wrong_password = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({"email": "alice@example.com", "password": "wrong"}))
        .send()
        .await
        .unwrap();
    let unknown_email = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({"email": "bob@nowhere.com", "password": "x"}))
        .send()
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a["message"], "email ou senha incorretos");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "alice@example.com", "secret1").await;

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({"email": "alice@example.com", "password": "completely-different"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn registration_validates_input() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for body in [
        json!({"password": "secret1"}),
        json!({"email": "alice@example.com"}),
        json!({"email": "no-at-sign", "password": "secret1"}),
        json!({"email": "alice@example.com", "password": "short"}),
    ] {
        let res = client
            .post(format!("{}/api/auth/register", srv.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn replace_sync_and_collection_reads() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let logged_in = login(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let token = logged_in["token"].as_str().unwrap().to_string();

    // Replace the catalog wholesale.
    let res = client
        .post(format!("{}/api/data/catalog-items", srv.base_url))
        .bearer_auth(&token)
        .json(&json!([{"sku": "a"}, {"sku": "b"}]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["count"], 2);

    // Sync pushes a full client-reconciled state over everything.
    let res = client
        .post(format!("{}/api/data/sync", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "orders": [{"service": "brake check", "status": "completed"}],
            "sales": [],
            "catalogItems": [{"sku": "c"}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/data", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let document: Value = res.json().await.unwrap();
    assert_eq!(document["orders"].as_array().unwrap().len(), 1);
    assert!(document["sales"].as_array().unwrap().is_empty());
    assert_eq!(document["catalogItems"][0]["sku"], "c");

    // Empty sync payloads are rejected.
    let res = client
        .post(format!("{}/api/data/sync", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown collections are a validation error, not a 404.
    let res = client
        .get(format!("{}/api/data/invoices", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn billing_summary_reflects_the_document() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    register(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let logged_in = login(&client, &srv.base_url, "alice@example.com", "secret1").await;
    let token = logged_in["token"].as_str().unwrap().to_string();

    for (collection, record) in [
        ("orders", json!({"status": "completed", "repairCost": 100, "month": 5, "year": 2026})),
        ("orders", json!({"status": "open", "repairCost": 999, "month": 5, "year": 2026})),
        ("sales", json!({"amount": 40, "month": 5, "year": 2026})),
    ] {
        let res = client
            .post(format!("{}/api/data/{collection}/add", srv.base_url))
            .bearer_auth(&token)
            .json(&record)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/api/billing/summary?month=5&year=2026", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let summary: Value = res.json().await.unwrap();
    assert_eq!(summary["ordersTotal"], 100.0);
    assert_eq!(summary["salesTotal"], 40.0);
    assert_eq!(summary["total"], 140.0);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: UserId::new(),
        email: "alice@example.com".to_string(),
        iat: now - 120,
        exp: now - 60,
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let res = client
        .get(format!("{}/api/data", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
