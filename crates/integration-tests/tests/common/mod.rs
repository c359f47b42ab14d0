//! Shared helpers: spawn a server on a free port and talk to it over HTTP

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use scoring_api_rpc::server::RpcServerConfig;
use scoring_api_rpc::{RpcServer, ServerHandle};
use scoring_core::application::{admin_token, regular_token, Dispatcher, Settings};
use scoring_core::port::id_provider::UuidProvider;
use scoring_core::port::time_provider::FixedTimeProvider;
use scoring_core::port::Scoring;
use scoring_infra::BasicScorer;
use serde_json::{json, Value};
use std::sync::Arc;

pub const ACCOUNT: &str = "horns&hoofs";
pub const LOGIN: &str = "h&f";

pub fn frozen_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(13, 45, 0)
        .unwrap()
}

pub struct TestServer {
    pub handle: ServerHandle,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::with_scoring(Arc::new(BasicScorer::new())).await
    }

    pub async fn with_scoring(scoring: Arc<dyn Scoring>) -> Self {
        let dispatcher = Dispatcher::new(
            Arc::new(Settings::default()),
            scoring,
            Arc::new(FixedTimeProvider(frozen_now())),
        );
        let config = RpcServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        let handle = RpcServer::new(config, Arc::new(dispatcher), Arc::new(UuidProvider))
            .start()
            .await
            .unwrap();

        Self {
            handle,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.handle.local_addr(), path)
    }

    /// POST a JSON body to `/method`, returning status and decoded reply
    pub async fn call(&self, body: &Value) -> (u16, Value) {
        let response = self
            .client
            .post(self.url("/method"))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    pub async fn stop(mut self) {
        self.handle.stop().unwrap();
        self.handle.stopped().await.unwrap();
    }
}

/// Envelope for the regular user with a valid token
pub fn user_request(method: &str, arguments: Value) -> Value {
    json!({
        "account": ACCOUNT,
        "login": LOGIN,
        "method": method,
        "token": regular_token(Some(ACCOUNT), LOGIN, "Otus"),
        "arguments": arguments,
    })
}

/// Envelope for the admin with a token valid at `frozen_now()`
pub fn admin_request(method: &str, arguments: Value) -> Value {
    let stamp = frozen_now().format("%Y%m%d%H").to_string();
    json!({
        "account": ACCOUNT,
        "login": "admin",
        "method": method,
        "token": admin_token(&stamp, "42"),
        "arguments": arguments,
    })
}
