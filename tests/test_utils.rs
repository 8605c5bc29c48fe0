#![allow(dead_code)]

use actix_web::{
    middleware::{Condition, NormalizePath},
    web, App, HttpServer,
};
use portfolio_api::{
    middlewares::{auth::AuthMiddleware, error_detail::expose_internal_errors},
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, StorageBackend},
    shared_repos::SharedRepositories,
    AppState,
};
use reqwest::{Client, Response};
use serde_json::Value;
use std::{net::TcpListener, time::Duration};

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
    pub state: web::Data<AppState>,
}

impl TestApp {
    /// Serves the full application on an ephemeral port with in-memory storage.
    pub async fn spawn() -> Self {
        let config = test_config();
        let state = web::Data::new(AppState::new(&config, SharedRepositories::in_memory()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test listener");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let expose_errors = !config.is_production();
        let server_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(server_state.clone())
                .wrap(Condition::new(expose_errors, expose_internal_errors()))
                .wrap(AuthMiddleware)
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(1)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(format!("{}/health", address)).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        TestApp { address, client, config, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub fn admin_token(&self) -> String {
        self.state
            .jwt_service
            .issue_token("portfolio-owner", true)
            .expect("Failed to issue admin token")
    }

    pub fn visitor_token(&self) -> String {
        self.state
            .jwt_service
            .issue_token("visitor", false)
            .expect("Failed to issue visitor token")
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .bearer_auth(self.admin_token())
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .bearer_auth(self.admin_token())
            .json(body)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(self.admin_token())
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// Creates a document and returns its `data` member.
    pub async fn create(&self, path: &str, body: &Value) -> Value {
        let response = self.post_json(path, body).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED, "create failed for {}", body);
        let mut envelope: Value = response.json().await.expect("Create response was not JSON");
        envelope["data"].take()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio API Test".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        worker_count: 1,
        storage: StorageBackend::Memory,
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 5,
        ..AppConfig::default()
    }
}

pub fn detail_fields(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
