//! End-to-end tests over HTTP
//!
//! Each test starts its own server on a free port with a frozen clock.

mod common;

use common::{admin_request, user_request, TestServer, ACCOUNT, LOGIN};
use scoring_core::application::regular_token;
use scoring_infra::basic_scorer::INTEREST_CATALOGUE;
use serde_json::{json, Value};

#[tokio::test]
async fn test_online_score_ok() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&user_request(
            "online_score",
            json!({"phone": "79175002040", "email": "stupnikov@otus.ru"}),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"response": {"score": 3.0}, "code": 200}));
    server.stop().await;
}

#[tokio::test]
async fn test_online_score_all_fields() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&user_request(
            "online_score",
            json!({
                "phone": 79175002040u64,
                "email": "stupnikov@otus.ru",
                "first_name": "Stanislav",
                "last_name": "Stupnikov",
                "birthday": "01.01.1990",
                "gender": 1
            }),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["response"]["score"], json!(5.0));
    server.stop().await;
}

#[tokio::test]
async fn test_admin_gets_fixed_score() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&admin_request(
            "online_score",
            json!({"first_name": "a", "last_name": "b"}),
        ))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"response": {"score": 42}, "code": 200}));
    server.stop().await;
}

#[tokio::test]
async fn test_bad_token_is_forbidden() {
    let server = TestServer::start().await;

    let mut request = user_request("online_score", json!({"phone": "79175002040"}));
    request["token"] = json!("sdd");
    let (status, body) = server.call(&request).await;

    assert_eq!(status, 403);
    assert_eq!(body, json!({"error": "Forbidden", "code": 403}));
    server.stop().await;
}

#[tokio::test]
async fn test_missing_envelope_field_is_invalid() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&json!({"account": ACCOUNT, "login": LOGIN, "method": "online_score"}))
        .await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], 422);
    assert!(body["error"].as_str().unwrap().contains("token"));
    server.stop().await;
}

#[tokio::test]
async fn test_incomplete_pairs_are_invalid() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&user_request(
            "online_score",
            json!({"phone": "79175002040", "birthday": "01.01.2000", "first_name": "s"}),
        ))
        .await;

    assert_eq!(status, 422);
    assert!(body["error"].is_string());
    server.stop().await;
}

#[tokio::test]
async fn test_unknown_method_is_invalid() {
    let server = TestServer::start().await;

    let (status, body) = server.call(&user_request("get_rating", json!({}))).await;

    assert_eq!(status, 422);
    assert!(body["error"].as_str().unwrap().contains("get_rating"));
    server.stop().await;
}

#[tokio::test]
async fn test_clients_interests_keep_request_order() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&user_request(
            "clients_interests",
            json!({"client_ids": [5, 1, 3], "date": "19.07.2017"}),
        ))
        .await;

    assert_eq!(status, 200);
    let clients = body["response"].as_object().unwrap();
    let keys: Vec<&str> = clients.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["5", "1", "3"]);

    for interests in clients.values() {
        let items = interests.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_ne!(items[0], items[1]);
        for item in items {
            assert!(INTEREST_CATALOGUE.contains(&item.as_str().unwrap()));
        }
    }
    server.stop().await;
}

#[tokio::test]
async fn test_clients_interests_idempotent() {
    let server = TestServer::start().await;
    let request = user_request("clients_interests", json!({"client_ids": [1, 2]}));

    let (_, first) = server.call(&request).await;
    let (_, second) = server.call(&request).await;

    assert_eq!(first, second);
    server.stop().await;
}

#[tokio::test]
async fn test_empty_client_ids_is_invalid() {
    let server = TestServer::start().await;

    let (status, _) = server
        .call(&user_request("clients_interests", json!({"client_ids": []})))
        .await;

    assert_eq!(status, 422);
    server.stop().await;
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/method"))
        .header("content-type", "application/json")
        .body("{\"login\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Bad Request", "code": 400}));
    server.stop().await;
}

#[tokio::test]
async fn test_non_object_json_is_invalid_request() {
    let server = TestServer::start().await;

    let (status, body) = server.call(&json!([1, 2, 3])).await;

    assert_eq!(status, 422);
    assert_eq!(body["code"], 422);
    server.stop().await;
}

#[tokio::test]
async fn test_missing_account_signed_as_none() {
    let server = TestServer::start().await;

    let (status, body) = server
        .call(&json!({
            "login": LOGIN,
            "method": "online_score",
            "token": regular_token(Some("None"), LOGIN, "Otus"),
            "arguments": {"phone": "79175002040", "email": "a@b"},
        }))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["response"]["score"], json!(3.0));
    server.stop().await;
}

#[tokio::test]
async fn test_empty_value_of_wrong_type_is_invalid() {
    let server = TestServer::start().await;

    let (status, _) = server
        .call(&user_request(
            "online_score",
            json!({"first_name": "A", "last_name": "B", "email": [], "gender": ""}),
        ))
        .await;
    assert_eq!(status, 422);

    let mut request = user_request("online_score", json!({}));
    request["arguments"] = json!([]);
    let (status, _) = server.call(&request).await;
    assert_eq!(status, 422);
    server.stop().await;
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/score"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Not Found", "code": 404}));
    server.stop().await;
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    server.stop().await;
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = TestServer::start().await;

    let response = server
        .client
        .post(server.url("/method"))
        .header("x-request-id", "trace-me")
        .json(&user_request("online_score", json!({"phone": "79175002040", "email": "a@b"})))
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
    server.stop().await;
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let server = TestServer::start().await;

    let response = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();

    let id = response.headers()["x-request-id"].to_str().unwrap();
    assert!(!id.is_empty());
    server.stop().await;
}
