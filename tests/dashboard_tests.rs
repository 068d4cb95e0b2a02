//! Dashboard routes exercised through the real router

#![cfg(feature = "dashboard")]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use nifty_rsi::dashboard;
use nifty_rsi::notify::NoopNotifier;
use nifty_rsi::service::BotService;
use nifty_rsi::utils::config::Config;

fn chart_payload(n: usize) -> Value {
    let start = Utc.with_ymd_and_hms(2024, 9, 2, 3, 45, 0).unwrap();
    let ts: Vec<i64> = (0..n)
        .map(|i| (start + Duration::days(i as i64)).timestamp())
        .collect();
    let closes: Vec<f64> = (0..n).map(|i| 24000.0 - i as f64 * 10.0).collect();
    json!({
        "chart": {
            "result": [{
                "timestamp": ts,
                "indicators": {"quote": [{
                    "open": closes,
                    "high": closes,
                    "low": closes,
                    "close": closes,
                    "volume": vec![500; n]
                }]}
            }],
            "error": null
        }
    })
}

async fn create_test_app(name: &str, yahoo: &wiremock::MockServer) -> (Router, PathBuf) {
    let output_dir =
        std::env::temp_dir().join(format!("nifty_rsi_dashboard_{}_{}", name, std::process::id()));
    let config = Config {
        yahoo_base_url: yahoo.uri(),
        output_dir: output_dir.clone(),
        ..Config::default()
    };
    let service = Arc::new(BotService::new(config, Box::new(NoopNotifier)).unwrap());
    (dashboard::router(service), output_dir)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_index_before_first_update() {
    let yahoo = wiremock::MockServer::start().await;
    let (app, _) = create_test_app("index", &yahoo).await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("Not updated yet"));
    assert!(html.contains("Waiting for first analysis"));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn test_update_error_without_data() {
    let yahoo = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&yahoo)
        .await;
    let (app, _) = create_test_app("update_error", &yahoo).await;

    let (status, body) = get(&app, "/update").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"status": "error"}));
}

#[tokio::test]
async fn test_update_then_snapshot_and_charts() {
    let yahoo = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(chart_payload(80)))
        .mount(&yahoo)
        .await;
    let (app, output_dir) = create_test_app("update_ok", &yahoo).await;

    let (_, body) = get(&app, "/update").await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "success");

    let (status, body) = get(&app, "/api/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    let snapshot: Value = serde_json::from_slice(&body).unwrap();
    // steadily falling closes: every timeframe oversold
    assert_eq!(snapshot["daily"]["signal"], "Buy");
    assert_eq!(snapshot["overall_signal"], "Strong Buy");

    let (status, body) = get(&app, "/static/rsi_chart.png").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..4], b"\x89PNG");

    let _ = std::fs::remove_dir_all(&output_dir);
}

#[tokio::test]
async fn test_static_rejects_unknown_files() {
    let yahoo = wiremock::MockServer::start().await;
    let (app, _) = create_test_app("static", &yahoo).await;

    let (status, _) = get(&app, "/static/analysis.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/static/price_chart.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
