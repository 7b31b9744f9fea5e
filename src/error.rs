// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::completion::CompletionError;

/// Errors a chat request can end in. Both render as `500 {"detail": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OPENAI_API_KEY not configured")]
    Configuration,

    #[error("Error calling OpenAI API: {0}")]
    Upstream(#[from] CompletionError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Configuration => tracing::warn!("chat request rejected: {}", self),
            AppError::Upstream(e) => tracing::error!("upstream completion failed: {e}"),
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn configuration_error_renders_fixed_detail() {
        let (status, body) = render(AppError::Configuration).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "OPENAI_API_KEY not configured" }));
    }

    #[tokio::test]
    async fn upstream_error_embeds_cause() {
        let err = AppError::from(CompletionError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.starts_with("Error calling OpenAI API: "));
        assert!(detail.contains("Incorrect API key provided"));
    }
}
