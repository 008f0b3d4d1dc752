use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::api::models::AnalyzeRequest;
use crate::api::response;
use crate::assets;
use crate::{analyzer, AppState};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/js/main.js", get(main_js_handler))
        .route("/static/css/style.css", get(style_css_handler))
        .route("/status", get(status_handler))
        .route("/analyze", post(analyze_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler() -> Html<&'static str> {
    Html(assets::INDEX_HTML)
}

async fn main_js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        assets::MAIN_JS,
    )
}

async fn style_css_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        assets::STYLE_CSS,
    )
}

async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Application is running",
    }))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Form(req): Form<AnalyzeRequest>,
) -> Response {
    let url = match req.url {
        Some(url) if !url.is_empty() => url,
        _ => {
            return response::error(StatusCode::BAD_REQUEST, "URL is required".to_string())
                .into_response();
        }
    };

    log::info!("Starting analysis for URL: {}", url);

    match analyzer::analyze_site(&state.client, &url).await {
        Ok(report) => match serde_json::to_value(&report) {
            Ok(data) => response::success(data).into_response(),
            Err(err) => {
                log::error!("Failed to serialize report: {}", err);
                response::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                    .into_response()
            }
        },
        Err(err) => {
            log::error!("Error during analysis: {}", err);
            err.into_response()
        }
    }
}
