//! OpenAI chat-completion script generator.

use super::{Script, ScriptGenerator, ScriptRequest};
use crate::config::Prompts;
use crate::error::{Result, StoryreelError};
use crate::openai::create_client;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Script generator backed by an OpenAI chat model.
pub struct OpenAIScriptGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    prompts: Prompts,
    max_content_chars: usize,
}

impl OpenAIScriptGenerator {
    /// Create a generator with default prompts.
    pub fn new(model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            prompts: Prompts::default(),
            max_content_chars: 5000,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Limit how much article text is sent to the model.
    pub fn with_max_content_chars(mut self, max_content_chars: usize) -> Self {
        self.max_content_chars = max_content_chars;
        self
    }

    fn build_messages(&self, request: &ScriptRequest) -> Result<Vec<ChatCompletionRequestMessage>> {
        let content: String = request.content.chars().take(self.max_content_chars).collect();

        let mut vars = HashMap::new();
        vars.insert("duration".to_string(), request.duration.to_string());
        vars.insert("word_target".to_string(), request.word_target().to_string());
        vars.insert(
            "style_instruction".to_string(),
            request.style.instruction().to_string(),
        );
        vars.insert("title".to_string(), request.title.clone());
        vars.insert("content".to_string(), content);

        let system_prompt = self.prompts.render_with_custom(&self.prompts.script.system, &vars);
        let user_prompt = self.prompts.render_with_custom(&self.prompts.script.user, &vars);

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| StoryreelError::ScriptGeneration(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| StoryreelError::ScriptGeneration(e.to_string()))?
                .into(),
        ])
    }
}

#[async_trait]
impl ScriptGenerator for OpenAIScriptGenerator {
    #[instrument(skip(self, request), fields(title = %request.title, duration = request.duration, style = %request.style))]
    async fn generate(&self, request: &ScriptRequest) -> Result<Script> {
        if request.content.trim().is_empty() {
            return Err(StoryreelError::InvalidInput("Content is required".to_string()));
        }

        info!("Generating script for: {}", request.title);

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(self.build_messages(request)?)
            .response_format(ResponseFormat::JsonObject)
            .build()
            .map_err(|e| StoryreelError::ScriptGeneration(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(classify_openai_error)?;

        let reply = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| StoryreelError::ScriptGeneration("Empty response from model".to_string()))?;

        let script = parse_script_reply(reply)?;

        info!(
            "Script generated: {} words, {} scenes, {:.1}s",
            script.word_count,
            script.scenes.len(),
            script.estimated_duration
        );

        Ok(script)
    }
}

/// Parse a model reply into a [`Script`], filling in missing aggregates.
///
/// Tolerates replies wrapped in a Markdown code fence.
pub fn parse_script_reply(reply: &str) -> Result<Script> {
    let trimmed = reply.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    let mut script: Script = serde_json::from_str(json).map_err(|e| {
        debug!("Unparseable script reply: {}", reply);
        StoryreelError::ScriptGeneration(format!("Model returned an invalid script: {}", e))
    })?;

    if script.scenes.is_empty() {
        warn!("Model returned a script without scenes");
    }

    script.fill_missing();
    Ok(script)
}

/// Map upstream failures onto distinct rate-limit and quota errors.
fn classify_openai_error(error: OpenAIError) -> StoryreelError {
    match &error {
        OpenAIError::ApiError(api) => classify_api_error(api.r#type.as_deref(), &api.message),
        _ => StoryreelError::OpenAI(format!("Failed to generate script: {}", error)),
    }
}

fn classify_api_error(kind: Option<&str>, message: &str) -> StoryreelError {
    let kind = kind.unwrap_or_default();
    let lower = message.to_lowercase();

    if kind == "insufficient_quota" || lower.contains("exceeded your current quota") {
        warn!("Upstream quota exhausted: {}", message);
        StoryreelError::QuotaExhausted
    } else if kind == "requests" || kind == "tokens" || lower.contains("rate limit") {
        warn!("Upstream rate limit hit: {}", message);
        StoryreelError::RateLimited
    } else {
        StoryreelError::OpenAI(format!("Failed to generate script: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptStyle;

    #[test]
    fn test_parse_reply() {
        let reply = r#"{
            "script": "The Eiffel Tower [pause] rises over Paris.",
            "estimatedDuration": 12,
            "wordCount": 6,
            "scenes": [
                {"text": "The Eiffel Tower", "duration": 5, "visualSuggestion": "Wide shot of the tower"},
                {"text": "rises over Paris.", "duration": 7, "visualSuggestion": "Aerial view"}
            ]
        }"#;

        let script = parse_script_reply(reply).unwrap();
        assert_eq!(script.word_count, 6);
        assert_eq!(script.estimated_duration, 12.0);
        assert_eq!(script.scenes.len(), 2);
        assert_eq!(script.scenes.scenes()[1].visual_suggestion, "Aerial view");
    }

    #[test]
    fn test_parse_fenced_reply_fills_missing() {
        let reply = "```json\n{\"script\": \"a b c d\", \"scenes\": [{\"text\": \"a b\", \"duration\": 2.5}, {\"text\": \"c d\", \"duration\": 3}]}\n```";
        let script = parse_script_reply(reply).unwrap();
        assert_eq!(script.word_count, 4);
        assert_eq!(script.estimated_duration, 5.5);
    }

    #[test]
    fn test_parse_rejects_zero_duration_scene() {
        let reply = r#"{"script": "x", "scenes": [{"text": "x", "duration": 0}]}"#;
        assert!(matches!(
            parse_script_reply(reply),
            Err(StoryreelError::ScriptGeneration(_))
        ));
    }

    #[test]
    fn test_classify_api_errors() {
        assert!(matches!(
            classify_api_error(Some("insufficient_quota"), "You exceeded your current quota"),
            StoryreelError::QuotaExhausted
        ));
        assert!(matches!(
            classify_api_error(Some("requests"), "Rate limit reached for gpt-4o-mini"),
            StoryreelError::RateLimited
        ));
        assert!(matches!(
            classify_api_error(None, "model not found"),
            StoryreelError::OpenAI(_)
        ));
    }

    #[test]
    fn test_prompt_contains_request_details() {
        let generator = OpenAIScriptGenerator::new("gpt-4o-mini").with_max_content_chars(10);
        let request = ScriptRequest::new("abcdefghijklmnopqrstuvwxyz", "Alphabet")
            .with_duration(30)
            .with_style(ScriptStyle::Casual);

        let messages = generator.build_messages(&request).unwrap();
        let rendered = format!("{:?}", messages);
        assert!(rendered.contains("approximately 30 seconds (roughly 12 words)"));
        assert!(rendered.contains("casual, conversational"));
        assert!(rendered.contains("abcdefghij"));
        assert!(!rendered.contains("abcdefghijk"));
    }

    #[tokio::test]
    async fn test_empty_content_rejected() {
        let generator = OpenAIScriptGenerator::new("gpt-4o-mini");
        let result = generator.generate(&ScriptRequest::new("   ", "Empty")).await;
        assert!(matches!(result, Err(StoryreelError::InvalidInput(_))));
    }
}
