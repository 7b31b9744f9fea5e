use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::{ChatReply, ChatRequest, StatusResponse},
    state::SharedState,
};

pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok".to_string() })
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state.proxy.handle_chat(&payload).await?;
    Ok(Json(reply))
}
