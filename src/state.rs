// src/state.rs
use std::sync::Arc;

use crate::services::chat_proxy::ChatProxy;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub proxy: ChatProxy,
}

impl AppState {
    pub fn new(proxy: ChatProxy) -> Self {
        Self { proxy }
    }
}
