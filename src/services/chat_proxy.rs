// src/services/chat_proxy.rs
use std::sync::Arc;

use tracing::debug;

use crate::{
    config::Config,
    error::AppError,
    message::{ChatReply, ChatRequest},
    services::completion::{ChatMessage, CompletionClient, CompletionRequest},
};

/// Turns a job description and resume into one completion call.
#[derive(Clone)]
pub struct ChatProxy {
    api_key: Option<String>,
    model: String,
    system_prompt: String,
    client: Arc<dyn CompletionClient>,
}

impl ChatProxy {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            system_prompt: system_prompt.into(),
            client,
        }
    }

    pub fn from_config(config: &Config, client: Arc<dyn CompletionClient>) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.model.clone(),
            config.system_prompt.clone(),
            client,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn handle_chat(&self, request: &ChatRequest) -> Result<ChatReply, AppError> {
        let api_key = self.api_key.as_deref().ok_or(AppError::Configuration)?;

        let completion = self.build_request(request);
        debug!(
            model = %self.model,
            job_description_len = request.job_description.len(),
            resume_len = request.resume.len(),
            "sending completion request"
        );

        let reply = self.client.complete(api_key, &completion).await?;
        Ok(ChatReply { reply })
    }

    fn build_request(&self, request: &ChatRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(compose_user_message(&request.job_description, &request.resume)),
            ],
        }
    }
}

pub fn compose_user_message(job_description: &str, resume: &str) -> String {
    format!("Job Description:\n{job_description}\n\nResume:\n{resume}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::completion::{CompletionError, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        seen: Mutex<Vec<(String, CompletionRequest)>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(
            &self,
            api_key: &str,
            request: &CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.seen
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            Ok("  **Match Score: 72/100**\n".to_string())
        }
    }

    fn request() -> ChatRequest {
        ChatRequest {
            job_description: "Need Python dev".to_string(),
            resume: "5 years Python".to_string(),
        }
    }

    #[test]
    fn user_message_layout() {
        assert_eq!(
            compose_user_message("Need Python dev", "5 years Python"),
            "Job Description:\nNeed Python dev\n\nResume:\n5 years Python"
        );
    }

    #[tokio::test]
    async fn sends_system_then_user_with_configured_model() {
        let client = Arc::new(RecordingClient::default());
        let proxy = ChatProxy::new(Some("sk-test".into()), "gpt-4o-mini", "judge it", client.clone());

        let reply = proxy.handle_chat(&request()).await.unwrap();
        assert_eq!(reply.reply, "  **Match Score: 72/100**\n");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (key, sent) = &seen[0];
        assert_eq!(key, "sk-test");
        assert_eq!(sent.model, "gpt-4o-mini");
        assert_eq!(sent.messages.len(), 2);
        assert_eq!(sent.messages[0].role, Role::System);
        assert_eq!(sent.messages[0].content, "judge it");
        assert_eq!(sent.messages[1].role, Role::User);
        assert_eq!(
            sent.messages[1].content,
            "Job Description:\nNeed Python dev\n\nResume:\n5 years Python"
        );
    }

    #[tokio::test]
    async fn missing_key_never_calls_upstream() {
        let client = Arc::new(RecordingClient::default());
        let proxy = ChatProxy::new(Some(String::new()), "m", "s", client.clone());
        assert!(!proxy.is_configured());

        let err = proxy.handle_chat(&request()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration));
        assert!(client.seen.lock().unwrap().is_empty());
    }
}
