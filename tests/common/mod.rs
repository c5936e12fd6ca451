use actix_web::{http::Method, test, web, App};
use secrecy::Secret;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use fintrack_be::auth::{create_access_token, NewUser, UserService};
use fintrack_be::db::run_migrations;
use fintrack_be::entry::{EntryKind, EntryService};
use fintrack_be::routes;

pub static JWT_SECRET: &str = "test_jwt_secret_for_integration_tests";

pub struct TestApp {
    pub pool: SqlitePool,
}

pub struct TestResponse {
    status: u16,
    body: bytes::Bytes,
}

impl TestResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }
}

impl TestApp {
    /// Fresh in-memory database with the schema applied
    pub async fn new() -> Self {
        // One connection that is never recycled, so the in-memory database outlives each request
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");

        run_migrations(&pool).await.expect("Failed to run migrations");

        TestApp { pool }
    }

    pub fn token_for(&self, username: &str) -> String {
        create_access_token(username, &secret()).expect("Failed to create token")
    }

    pub async fn create_user(&self, username: &str, password: &str) {
        let mut conn = self.pool.acquire().await.expect("Failed to acquire connection");
        let user = NewUser::new(username, password).expect("Failed to hash password");
        UserService::insert(&mut conn, &user)
            .await
            .expect("Failed to insert user");
    }

    pub async fn count(&self, kind: EntryKind) -> i64 {
        let mut conn = self.pool.acquire().await.expect("Failed to acquire connection");
        EntryService::count(&mut conn, kind)
            .await
            .expect("Failed to count entries")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::GET, path, token, None).await
    }

    pub async fn post(&self, path: &str, token: Option<&str>, payload: &Value) -> TestResponse {
        self.send(Method::POST, path, token, Some(payload)).await
    }

    /// POST without any body or content type
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.send(Method::POST, path, token, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        payload: Option<&Value>,
    ) -> TestResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(self.pool.clone()))
                .app_data(web::Data::new(secret()))
                .configure(routes::configure),
        )
        .await;

        let mut req = test::TestRequest::default().method(method).uri(path);
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {token}")));
        }
        if let Some(payload) = payload {
            req = req.set_json(payload);
        }

        let resp = test::call_service(&app, req.to_request()).await;

        let status = resp.status().as_u16();
        let body = test::read_body(resp).await;

        TestResponse { status, body }
    }
}

fn secret() -> Secret<String> {
    Secret::new(JWT_SECRET.to_string())
}
