//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the transcript
//! and dispatches chat completion requests. The transcript invariant is
//! that the first entry is always the system message; everything after it
//! is append-only until a reset.

use crate::chat::config::{ChatConfig, DEFAULT_SYSTEM_PROMPT};
use crate::chat::render::Renderer;
use crate::client::Groq;
use crate::error::{Error, Result};
use crate::observability::{CHAT_RESETS, CHAT_TURN_ERRORS, CHAT_TURNS};
use crate::types::{ChatCompletionParams, ChatMessage, MessageRole, Model};

/// Shown when a message is submitted before an API key has been supplied.
pub const MISSING_KEY_PROMPT: &str = "Please add your Groq API key to continue.";

/// A chat session that manages conversation state and API interactions.
///
/// The session holds the ordered transcript, the resolved configuration,
/// and the client used to reach the completion endpoint. No client exists
/// until an API key has been supplied, so a key-less session cannot issue
/// a request.
pub struct ChatSession {
    client: Option<Groq>,
    config: ChatConfig,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Creates a new chat session from a configuration.
    ///
    /// The transcript starts as exactly the system message. A client is
    /// built only if the configuration carries an API key.
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = match &config.api_key {
            Some(key) => Some(Groq::new(Some(key.clone()))?),
            None => None,
        };
        let messages = vec![ChatMessage::system(config.system_prompt.clone())];
        Ok(Self {
            client,
            config,
            messages,
        })
    }

    /// Creates a new chat session around an existing client.
    ///
    /// Useful when the client needs custom options, such as a different
    /// base URL or timeout.
    pub fn with_client(client: Groq, config: ChatConfig) -> Self {
        let messages = vec![ChatMessage::system(config.system_prompt.clone())];
        Self {
            client: Some(client),
            config,
            messages,
        }
    }

    /// Sends a user message and renders the reply.
    ///
    /// This method:
    /// 1. Halts (with an informational prompt) if no API key is present
    /// 2. Appends the user message to the transcript
    /// 3. Sends the full transcript plus parameters to the endpoint
    /// 4. On success appends the assistant reply and renders it
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response carries
    /// no completion choice. The user message appended in step 2 is left
    /// in place either way, so a failed turn reads as an unanswered
    /// question in the transcript.
    pub async fn send(&mut self, user_input: &str, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(client) = &self.client else {
            renderer.print_info(MISSING_KEY_PROMPT);
            return Ok(());
        };

        CHAT_TURNS.click();
        self.messages.push(ChatMessage::user(user_input));

        let params = ChatCompletionParams::new(self.config.model.clone(), self.messages.clone())
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .with_top_p(self.config.top_p)
            .with_frequency_penalty(self.config.frequency_penalty);

        let completion = match client.chat_completion(params).await {
            Ok(completion) => completion,
            Err(err) => {
                CHAT_TURN_ERRORS.click();
                return Err(err);
            }
        };

        let Some(content) = completion.first_content() else {
            CHAT_TURN_ERRORS.click();
            return Err(Error::serialization(
                "response contained no completion choices",
                None,
            ));
        };

        let content = content.to_string();
        self.messages.push(ChatMessage::assistant(content.clone()));
        renderer.print_text(&content);
        renderer.finish_response();
        Ok(())
    }

    /// Resets the transcript back to the single system message.
    pub fn reset(&mut self) {
        CHAT_RESETS.click();
        self.messages.clear();
        self.messages
            .push(ChatMessage::system(self.config.system_prompt.clone()));
    }

    /// Returns the transcript, system message first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages in the transcript.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Returns true once an API key has been supplied.
    pub fn has_api_key(&self) -> bool {
        self.client.is_some()
    }

    /// Supplies or replaces the API key, rebuilding the client.
    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        let client = Groq::new(Some(key.clone()))?;
        self.config.api_key = Some(key);
        self.client = Some(client);
        Ok(())
    }

    /// Changes the model used for responses.
    pub fn set_model(&mut self, model: Model) {
        self.config.model = model;
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Sets or restores the system prompt.
    ///
    /// `None` restores the default persona. The transcript's first entry
    /// is rewritten in place so the invariant holds.
    pub fn set_system_prompt(&mut self, prompt: Option<String>) {
        let prompt = prompt.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        self.config.system_prompt = prompt.clone();
        self.messages[0] = ChatMessage::system(prompt);
    }

    /// Sets the sampling temperature. Ranges are enforced at the command
    /// layer; library callers get the clamping `ChatConfig` builder.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.config.temperature = temperature;
    }

    /// Sets the maximum tokens per response.
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.config.max_tokens = max_tokens;
    }

    /// Sets the top-p value.
    pub fn set_top_p(&mut self, top_p: f64) {
        self.config.top_p = top_p;
    }

    /// Sets the frequency penalty.
    pub fn set_frequency_penalty(&mut self, frequency_penalty: f64) {
        self.config.frequency_penalty = frequency_penalty;
    }

    /// Reports whether the transcript still opens with the system message.
    pub fn system_message_first(&self) -> bool {
        self.messages
            .first()
            .map(|message| message.role == MessageRole::System)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::render::Renderer;
    use crate::types::KnownModel;

    #[derive(Default)]
    struct RecordingRenderer {
        text: Vec<String>,
        errors: Vec<String>,
        info: Vec<String>,
    }

    impl Renderer for RecordingRenderer {
        fn print_text(&mut self, text: &str) {
            self.text.push(text.to_string());
        }

        fn print_error(&mut self, error: &str) {
            self.errors.push(error.to_string());
        }

        fn print_info(&mut self, info: &str) {
            self.info.push(info.to_string());
        }

        fn finish_response(&mut self) {}
    }

    #[test]
    fn new_session_holds_only_system_message() {
        let session = ChatSession::new(ChatConfig::default()).unwrap();
        assert_eq!(session.message_count(), 1);
        assert!(session.system_message_first());
        assert_eq!(session.messages()[0].content, DEFAULT_SYSTEM_PROMPT);
        assert!(!session.has_api_key());
    }

    #[test]
    fn reset_restores_single_system_message() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();

        // Grow the transcript directly for the test
        session.messages.push(ChatMessage::user("q1"));
        session.messages.push(ChatMessage::assistant("a1"));
        session.messages.push(ChatMessage::user("q2"));
        assert_eq!(session.message_count(), 4);

        session.reset();
        assert_eq!(session.message_count(), 1);
        assert!(session.system_message_first());
    }

    #[tokio::test]
    async fn send_without_key_is_a_no_op() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();
        let mut renderer = RecordingRenderer::default();

        let result = session.send("hello?", &mut renderer).await;
        assert!(result.is_ok());
        assert_eq!(session.message_count(), 1);
        assert_eq!(renderer.info, vec![MISSING_KEY_PROMPT.to_string()]);
        assert!(renderer.text.is_empty());
    }

    #[test]
    fn set_api_key_builds_client() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();
        assert!(!session.has_api_key());

        session.set_api_key("gsk-test".to_string()).unwrap();
        assert!(session.has_api_key());
        assert_eq!(session.config().api_key.as_deref(), Some("gsk-test"));
    }

    #[test]
    fn set_system_prompt_rewrites_first_message() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();
        session.messages.push(ChatMessage::user("q"));

        session.set_system_prompt(Some("Be brief.".to_string()));
        assert!(session.system_message_first());
        assert_eq!(session.messages()[0].content, "Be brief.");
        assert_eq!(session.message_count(), 2);

        session.set_system_prompt(None);
        assert_eq!(session.messages()[0].content, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn set_model() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();
        assert_eq!(
            session.model(),
            &Model::Known(KnownModel::Llama33_70bVersatile)
        );

        session.set_model(Model::Known(KnownModel::Llama31_8bInstant));
        assert_eq!(
            session.model(),
            &Model::Known(KnownModel::Llama31_8bInstant)
        );
    }

    #[test]
    fn parameter_setters() {
        let mut session = ChatSession::new(ChatConfig::default()).unwrap();
        session.set_temperature(1.1);
        session.set_max_tokens(900);
        session.set_top_p(0.5);
        session.set_frequency_penalty(1.5);

        let config = session.config();
        assert_eq!(config.temperature, 1.1);
        assert_eq!(config.max_tokens, 900);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.frequency_penalty, 1.5);
    }
}
