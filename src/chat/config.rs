//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::ops::RangeInclusive;

use arrrg_derive::CommandLine;

use crate::types::{KnownModel, Model};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Permitted temperature range.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=1.5;

/// Default maximum tokens per response.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Permitted max_tokens range.
pub const MAX_TOKENS_RANGE: RangeInclusive<u32> = 50..=1000;

/// Default top-p nucleus sampling value.
pub const DEFAULT_TOP_P: f64 = 1.0;

/// Permitted top-p range.
pub const TOP_P_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Default frequency penalty.
pub const DEFAULT_FREQUENCY_PENALTY: f64 = 0.0;

/// Permitted frequency penalty range.
pub const FREQUENCY_PENALTY_RANGE: RangeInclusive<f64> = 0.0..=2.0;

/// The fixed persona instruction that opens every transcript.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an AI agriculture assistant, offering expert \
support in farming, crop management, soil health, irrigation, pest control, and sustainable \
agriculture techniques. Your responses should be practical, science-based, and tailored to \
specific agricultural contexts (crop type, climate, region, etc.). You should use agronomic \
principles, weather considerations, and soil data when advising.\n\n\
Behavior guidelines:\n\
- Maintain a helpful, knowledgeable, and neutral tone.\n\
- Provide precise recommendations for different types of crops and conditions.\n\
- Reference best practices in sustainable agriculture.\n\
- Explain reasoning clearly (e.g., why a certain fertilizer or pesticide is advised).\n\
- Suggest tools, methods, or schedules when relevant.\n\n\
Example interactions:\n\n\
Crop advice:\n\
User: What is the best fertilizer for wheat during early growth?\n\
AI: During the tillering stage of wheat, nitrogen-rich fertilizers such as urea or DAP are \
recommended to promote leaf development and root strength. Apply around 40-50 kg/ha depending \
on soil nitrogen levels. Always check with a soil test before application.\n\n\
Pest management:\n\
User: How to protect tomatoes from whiteflies?\n\
AI: Whiteflies are best controlled through integrated pest management: use yellow sticky \
traps, introduce natural predators like Encarsia formosa, and apply neem oil spray every 7-10 \
days. Avoid overuse of chemical insecticides to prevent resistance.\n\n\
Irrigation tips:\n\
User: How often should I water my maize crops in sandy soil?\n\
AI: Sandy soils have low water retention, so maize should be watered more frequently, \
typically every 2-3 days during dry spells. Use drip irrigation if possible to reduce water \
loss and improve efficiency.";

/// Command-line arguments for the verdant-chat tool.
///
/// The sampling knobs arrive as strings and are parsed and clamped when
/// the arguments resolve into a [`ChatConfig`]; values that fail to parse
/// fall back to the defaults.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Groq API key; falls back to the GROQ_API_KEY environment variable.
    #[arrrg(optional, "Groq API key (default: GROQ_API_KEY env var)", "KEY")]
    pub api_key: Option<String>,

    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: llama-3.3-70b-versatile)", "MODEL")]
    pub model: Option<String>,

    /// System prompt that opens the transcript.
    #[arrrg(optional, "System prompt for the conversation", "PROMPT")]
    pub system: Option<String>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature 0.0-1.5 (default: 0.7)", "TEMP")]
    pub temperature: Option<String>,

    /// Maximum tokens per response.
    #[arrrg(optional, "Max tokens per response 50-1000 (default: 500)", "TOKENS")]
    pub max_tokens: Option<u32>,

    /// Top-p nucleus sampling value.
    #[arrrg(optional, "Top-p nucleus sampling 0.0-1.0 (default: 1.0)", "TOPP")]
    pub top_p: Option<String>,

    /// Frequency penalty.
    #[arrrg(optional, "Frequency penalty 0.0-2.0 (default: 0.0)", "PENALTY")]
    pub frequency_penalty: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The API key used to authenticate requests. `None` means the key has
    /// not been supplied yet; no request is sent until it is.
    pub api_key: Option<String>,

    /// The model to use for generating responses.
    pub model: Model,

    /// The persona instruction pinned at the start of the transcript.
    pub system_prompt: String,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum tokens per response.
    pub max_tokens: u32,

    /// Top-p nucleus sampling value.
    pub top_p: f64,

    /// Frequency penalty.
    pub frequency_penalty: f64,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: llama-3.3-70b-versatile
    /// - Temperature: 0.7
    /// - Max tokens: 500
    /// - Top-p: 1.0
    /// - Frequency penalty: 0.0
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            api_key: None,
            model: Model::Known(KnownModel::Llama33_70bVersatile),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
            use_color: true,
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.is_empty());
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the system prompt.
    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    /// Sets the sampling temperature, clamped to the permitted range.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = clamp_f64(temperature, TEMPERATURE_RANGE);
        self
    }

    /// Sets the maximum tokens per response, clamped to the permitted range.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens.clamp(*MAX_TOKENS_RANGE.start(), *MAX_TOKENS_RANGE.end());
        self
    }

    /// Sets the top-p value, clamped to the permitted range.
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = clamp_f64(top_p, TOP_P_RANGE);
        self
    }

    /// Sets the frequency penalty, clamped to the permitted range.
    pub fn with_frequency_penalty(mut self, frequency_penalty: f64) -> Self {
        self.frequency_penalty = clamp_f64(frequency_penalty, FREQUENCY_PENALTY_RANGE);
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let mut config = ChatConfig::new().with_api_key(args.api_key);
        if let Some(model) = args.model {
            config.model = model.parse().unwrap_or(Model::Custom(model));
        }
        if let Some(system) = args.system {
            config.system_prompt = system;
        }
        if let Some(temperature) = args.temperature.as_deref().and_then(parse_flag) {
            config = config.with_temperature(temperature);
        }
        if let Some(max_tokens) = args.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        if let Some(top_p) = args.top_p.as_deref().and_then(parse_flag) {
            config = config.with_top_p(top_p);
        }
        if let Some(frequency_penalty) = args.frequency_penalty.as_deref().and_then(parse_flag) {
            config = config.with_frequency_penalty(frequency_penalty);
        }
        if args.no_color {
            config = config.without_color();
        }
        config
    }
}

fn parse_flag(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

fn clamp_f64(value: f64, range: RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, Model::Known(KnownModel::Llama33_70bVersatile));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.frequency_penalty, 0.0);
        assert!(config.use_color);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Llama33_70bVersatile));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.frequency_penalty, 0.0);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            api_key: Some("gsk-test".to_string()),
            model: Some("llama-3.1-8b-instant".to_string()),
            system: Some("You are terse.".to_string()),
            temperature: Some("1.2".to_string()),
            max_tokens: Some(750),
            top_p: Some("0.9".to_string()),
            frequency_penalty: Some("0.5".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.api_key, Some("gsk-test".to_string()));
        assert_eq!(config.model, Model::Known(KnownModel::Llama31_8bInstant));
        assert_eq!(config.system_prompt, "You are terse.");
        assert_eq!(config.temperature, 1.2);
        assert_eq!(config.max_tokens, 750);
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.frequency_penalty, 0.5);
        assert!(!config.use_color);
    }

    #[test]
    fn unparseable_sampling_flags_fall_back_to_defaults() {
        let args = ChatArgs {
            temperature: Some("warm".to_string()),
            top_p: Some(String::new()),
            frequency_penalty: Some("0..5".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.top_p, DEFAULT_TOP_P);
        assert_eq!(config.frequency_penalty, DEFAULT_FREQUENCY_PENALTY);
    }

    #[test]
    fn sampling_flags_tolerate_whitespace_and_clamp() {
        let args = ChatArgs {
            temperature: Some(" 9.0 ".to_string()),
            top_p: Some("-1.0".to_string()),
            ..ChatArgs::default()
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.temperature, 1.5);
        assert_eq!(config.top_p, 0.0);
    }

    #[test]
    fn out_of_range_args_are_clamped() {
        let config = ChatConfig::new()
            .with_temperature(9.0)
            .with_max_tokens(10)
            .with_top_p(-1.0)
            .with_frequency_penalty(5.0);
        assert_eq!(config.temperature, 1.5);
        assert_eq!(config.max_tokens, 50);
        assert_eq!(config.top_p, 0.0);
        assert_eq!(config.frequency_penalty, 2.0);
    }

    #[test]
    fn empty_api_key_treated_as_missing() {
        let config = ChatConfig::new().with_api_key(Some(String::new()));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_api_key(Some("gsk-abc".to_string()))
            .with_model(Model::Known(KnownModel::Gemma2_9bIt))
            .with_system_prompt("Test prompt".to_string())
            .with_temperature(0.3)
            .with_max_tokens(200)
            .with_top_p(0.8)
            .with_frequency_penalty(1.0)
            .without_color();

        assert_eq!(config.api_key, Some("gsk-abc".to_string()));
        assert_eq!(config.model, Model::Known(KnownModel::Gemma2_9bIt));
        assert_eq!(config.system_prompt, "Test prompt");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.top_p, 0.8);
        assert_eq!(config.frequency_penalty, 1.0);
        assert!(!config.use_color);
    }
}
