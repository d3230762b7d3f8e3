//! Router harness shared by handler tests.
//!
//! Each harness owns its own in-memory database, so tests never see each
//! other's accounts or records.

use anyhow::{Context, Result};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Method, Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};
use secrecy::SecretString;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use super::auth::{AuthConfig, AuthState};
use crate::{api, db};

pub(crate) const TEST_SECRET: &str = "reckon-test-secret-0123456789abcdef";
pub(crate) const TEST_PASSWORD: &str = "password123";

pub(crate) struct TestApp {
    pub(crate) router: Router,
    pub(crate) auth_state: Arc<AuthState>,
}

impl TestApp {
    pub(crate) async fn new() -> Result<Self> {
        let pool = db::init(db::MEMORY_DSN).await?;
        let auth_state = Arc::new(AuthState::new(
            AuthConfig::new(),
            &SecretString::from(TEST_SECRET),
        ));
        Ok(Self {
            router: api::app(pool, auth_state.clone()),
            auth_state,
        })
    }

    /// Send a request and return the status with the JSON body (`Null` when empty).
    pub(crate) async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };
        Ok((status, value))
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
    ) -> Result<(StatusCode, Value)> {
        self.send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": username,
                "email": email,
                "password": TEST_PASSWORD,
                "confirm_password": TEST_PASSWORD,
            })),
        )
        .await
    }

    pub(crate) async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<(StatusCode, Value)> {
        self.send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username_or_email": username_or_email, "password": password })),
        )
        .await
    }

    /// Register an account and return a bearer token for it.
    pub(crate) async fn signed_in(&self, username: &str) -> Result<String> {
        let (status, _) = self
            .register(username, &format!("{username}@example.com"))
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "register {username} failed: {status}");

        let (status, body) = self.login(username, TEST_PASSWORD).await?;
        anyhow::ensure!(status == StatusCode::OK, "login {username} failed: {status}");
        body["access_token"]
            .as_str()
            .map(str::to_string)
            .context("missing access_token")
    }
}
