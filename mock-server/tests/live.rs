//! End-to-end checks over real sockets.
//!
//! # Design
//! Two servers are started on random ports: a stand-in weather provider and
//! the mock server itself. The mock server is configured to reach the
//! provider through the reqwest fetcher. Requests are then driven with ureq,
//! so the HTTP framing, query encoding and timeouts are all real.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use mock_server::{router, AppState, ServerConfig};
use serde_json::{json, Value};

const API_KEY: &str = "live-key";

async fn provider(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if params.get("appid").map(String::as_str) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"cod": 401})));
    }
    match params.get("q").map(String::as_str) {
        Some("San Francisco") => (
            StatusCode::OK,
            Json(json!({
                "coord": {"lon": -122.4194, "lat": 37.7749},
                "weather": [{"description": "fog", "icon": "50d"}],
                "main": {"temp": 15.0, "feels_like": 14.1, "pressure": 1015, "humidity": 90},
                "visibility": 2000,
                "wind": {"speed": 3.2, "deg": 270},
                "sys": {"country": "US"},
                "name": "San Francisco"
            })),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"cod": "404", "message": "city not found"})),
        ),
    }
}

fn bind() -> (std::net::TcpListener, SocketAddr) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();
    (listener, addr)
}

/// Start the provider and the mock server; return the mock server address.
fn start() -> SocketAddr {
    let (provider_listener, provider_addr) = bind();
    let (server_listener, server_addr) = bind();

    let config = ServerConfig {
        weather_api_key: API_KEY.to_string(),
        weather_base_url: format!("http://{provider_addr}/data/2.5"),
        weather_timeout_secs: 5,
        ..ServerConfig::default()
    };

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let provider_listener = tokio::net::TcpListener::from_std(provider_listener).unwrap();
            let provider_app = Router::new().route("/data/2.5/weather", get(provider));
            tokio::spawn(async move {
                axum::serve(provider_listener, provider_app).await.unwrap();
            });

            let server_listener = tokio::net::TcpListener::from_std(server_listener).unwrap();
            let state = AppState::from_config(&config).unwrap();
            mock_server::run(server_listener, router(state), std::future::pending())
                .await
                .unwrap();
        });
    });

    server_addr
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn read(mut response: ureq::http::Response<ureq::Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    (status, serde_json::from_str(&body).unwrap())
}

#[test]
fn data_lifecycle_over_http() {
    let base = format!("http://{}", start());
    let agent = agent();

    // Step 1: fixtures are visible.
    let (status, body) = read(agent.get(&format!("{base}/data?type=posts")).call().unwrap());
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Step 2: create a post.
    let (status, body) = read(
        agent
            .post(&format!("{base}/data"))
            .content_type("application/json")
            .send(r#"{"type":"post","data":{"userId":2,"title":"Live","body":"over tcp"}}"#.as_bytes())
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(body["data"]["id"], 3);

    // Step 3: update with a string id.
    let (status, body) = read(
        agent
            .put(&format!("{base}/data"))
            .content_type("application/json")
            .send(r#"{"type":"post","id":"3","data":{"title":"Edited"}}"#.as_bytes())
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Edited");
    assert_eq!(body["data"]["body"], "over tcp");

    // Step 4: filter by user.
    let (_, body) = read(
        agent
            .get(&format!("{base}/data?type=posts-by-user&userId=2"))
            .call()
            .unwrap(),
    );
    let ids: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);

    // Step 5: delete, then delete again.
    let (status, _) = read(agent.delete(&format!("{base}/data?type=post&id=3")).call().unwrap());
    assert_eq!(status, 200);
    let (status, body) = read(agent.delete(&format!("{base}/data?type=post&id=3")).call().unwrap());
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Post not found");
}

#[test]
fn weather_through_reqwest_fetcher() {
    let base = format!("http://{}", start());
    let agent = agent();

    // City names with spaces must survive query encoding.
    let (status, body) = read(
        agent
            .get(&format!("{base}/weather"))
            .query("city", "San Francisco")
            .call()
            .unwrap(),
    );
    assert_eq!(status, 200);
    assert_eq!(body["location"]["country"], "US");
    assert_eq!(body["current"]["visibility"], 2.0);

    let (status, body) = read(
        agent
            .post(&format!("{base}/weather"))
            .content_type("application/json")
            .send(r#"{"cities":["San Francisco","Nowhere"]}"#.as_bytes())
            .unwrap(),
    );
    assert_eq!(status, 200);
    let entries = body["weatherData"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries.iter().filter(|e| e["success"] == true).count(), 1);
    assert_eq!(entries[1]["error"], "Failed to fetch weather for Nowhere");
}
