use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Model};

/// Token accounting reported by the endpoint for one completion.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    /// Tokens consumed by the submitted transcript.
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens generated for the reply.
    #[serde(default)]
    pub completion_tokens: u32,

    /// Sum of prompt and completion tokens.
    #[serde(default)]
    pub total_tokens: u32,
}

/// One completion choice returned by the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatChoice {
    /// Position of this choice in the returned list.
    #[serde(default)]
    pub index: u32,

    /// The generated assistant message.
    pub message: ChatMessage,

    /// Why generation stopped, when the endpoint reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Response body from the chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Identifier assigned to this completion.
    #[serde(default)]
    pub id: String,

    /// The model that produced the completion.
    pub model: Model,

    /// Completion choices; the first one carries the reply.
    pub choices: Vec<ChatChoice>,

    /// Token accounting, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Returns the text of the first completion choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{KnownModel, MessageRole};
    use serde_json::json;

    #[test]
    fn completion_deserialization() {
        let json = json!({
            "id": "chatcmpl-0df9f4c8",
            "object": "chat.completion",
            "created": 1_735_000_000,
            "model": "llama-3.3-70b-versatile",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": "Use urea or DAP during tillering."
                    },
                    "finish_reason": "stop"
                }
            ],
            "usage": {
                "prompt_tokens": 120,
                "completion_tokens": 42,
                "total_tokens": 162
            }
        });

        let completion: ChatCompletion = serde_json::from_value(json).unwrap();
        assert_eq!(
            completion.model,
            Model::Known(KnownModel::Llama33_70bVersatile)
        );
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].message.role, MessageRole::Assistant);
        assert_eq!(
            completion.first_content(),
            Some("Use urea or DAP during tillering.")
        );
        assert_eq!(completion.usage.unwrap().total_tokens, 162);
    }

    #[test]
    fn first_content_empty_choices() {
        let json = json!({
            "id": "chatcmpl-empty",
            "model": "llama-3.3-70b-versatile",
            "choices": []
        });

        let completion: ChatCompletion = serde_json::from_value(json).unwrap();
        assert_eq!(completion.first_content(), None);
        assert!(completion.usage.is_none());
    }

    #[test]
    fn unknown_model_deserializes_as_custom() {
        let json = json!({
            "id": "chatcmpl-x",
            "model": "llama-99-experimental",
            "choices": []
        });

        let completion: ChatCompletion = serde_json::from_value(json).unwrap();
        assert_eq!(
            completion.model,
            Model::Custom("llama-99-experimental".to_string())
        );
    }
}
