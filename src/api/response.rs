use axum::http::StatusCode;
use axum::Json;

use crate::api::models::AnalysisResponse;

pub fn success(data: serde_json::Value) -> (StatusCode, Json<AnalysisResponse>) {
    (StatusCode::OK, Json(AnalysisResponse::Success { data }))
}

pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<AnalysisResponse>) {
    (status, Json(AnalysisResponse::Error { message }))
}
