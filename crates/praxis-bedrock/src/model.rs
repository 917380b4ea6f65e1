//! The language model seam.
//!
//! Handlers talk to a `CompletionModel`; deployment plugs in
//! [`BedrockModel`], tests plug in a canned reply.

use std::future::Future;
use std::pin::Pin;

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, InferenceConfiguration, Message, SystemContentBlock,
};
use tracing::info;

use crate::error::BedrockError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single-turn text completion.
pub trait CompletionModel: Send + Sync {
    /// Identifier recorded alongside anything generated with this model.
    fn model_id(&self) -> &str;

    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>>;
}

/// Claude on Bedrock through the Converse API.
pub struct BedrockModel {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    max_tokens: i32,
}

impl BedrockModel {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.into(),
            max_tokens: 1024,
        }
    }

    async fn converse(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(user_prompt.to_string()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;

        info!(model_id = %self.model_id, "invoking model");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(message)
            .inference_config(
                InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .temperature(0.0)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(t) = block {
                    Some(t.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        info!(model_id = %self.model_id, text_len = text.len(), "model invocation complete");

        Ok(text)
    }
}

impl CompletionModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn complete<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(self.converse(system_prompt, user_prompt))
    }
}
