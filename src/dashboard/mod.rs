//! Web dashboard: latest analysis, on-demand refresh and chart images

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::MarketSnapshot;
use crate::charts::{PRICE_CHART_FILE, RSI_CHART_FILE};
use crate::service::BotService;

const EMBEDDED_TEMPLATE: &str = include_str!("../../templates/index.html");

#[derive(Serialize)]
struct UpdateStatus {
    status: &'static str,
}

pub fn router(service: Arc<BotService>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/update", get(force_update))
        .route("/api/snapshot", get(get_snapshot))
        .route("/static/:name", get(static_file))
        .with_state(service)
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Substitute `{{ key }}` placeholders
pub fn render_template(template: &str, values: &HashMap<&'static str, String>) -> String {
    let mut html = template.to_string();
    for (key, value) in values {
        html = html.replace(&format!("{{{{ {} }}}}", key), &escape_html(value));
    }
    html
}

fn load_template() -> String {
    std::fs::read_to_string("templates/index.html").unwrap_or_else(|_| EMBEDDED_TEMPLATE.to_string())
}

async fn index(State(service): State<Arc<BotService>>) -> Html<String> {
    let snapshot = service.snapshot().await;
    Html(render_template(&load_template(), &snapshot.template_values()))
}

async fn force_update(State(service): State<Arc<BotService>>) -> Json<UpdateStatus> {
    let ok = service.update_data().await;
    Json(UpdateStatus {
        status: if ok { "success" } else { "error" },
    })
}

async fn get_snapshot(State(service): State<Arc<BotService>>) -> Json<MarketSnapshot> {
    Json(service.snapshot().await)
}

async fn static_file(
    State(service): State<Arc<BotService>>,
    Path(name): Path<String>,
) -> Response {
    if name != PRICE_CHART_FILE && name != RSI_CHART_FILE {
        return StatusCode::NOT_FOUND.into_response();
    }
    let path = service.config().output_dir.join(&name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(e) => {
            log::debug!("Chart {} not available: {}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template() {
        let mut values = HashMap::new();
        values.insert("daily_rsi", "28.50".to_string());
        values.insert("recommendation_reason", "a < b".to_string());
        let html = render_template("<h3>{{ daily_rsi }}</h3><p>{{ recommendation_reason }}</p>", &values);
        assert_eq!(html, "<h3>28.50</h3><p>a &lt; b</p>");
    }

    #[test]
    fn test_embedded_template_has_all_placeholders() {
        let values = MarketSnapshot::default().template_values();
        let html = render_template(EMBEDDED_TEMPLATE, &values);
        assert!(!html.contains("{{"));
        assert!(html.contains("Waiting for first analysis"));
    }
}
