use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a Groq model identifier.
///
/// This can be a predefined model version or a custom string value
/// for models that may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or private deployments)
    Custom(String),
}

/// Known Groq-hosted model versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// LLaMA 3.3 70B (versatile)
    #[serde(rename = "llama-3.3-70b-versatile")]
    Llama33_70bVersatile,

    /// LLaMA 3.1 8B (instant)
    #[serde(rename = "llama-3.1-8b-instant")]
    Llama31_8bInstant,

    /// Gemma 2 9B (instruction tuned)
    #[serde(rename = "gemma2-9b-it")]
    Gemma2_9bIt,

    /// Mixtral 8x7B (32k context)
    #[serde(rename = "mixtral-8x7b-32768")]
    Mixtral8x7b32768,

    /// DeepSeek R1 distilled onto LLaMA 70B
    #[serde(rename = "deepseek-r1-distill-llama-70b")]
    DeepseekR1DistillLlama70b,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Llama33_70bVersatile => write!(f, "llama-3.3-70b-versatile"),
            KnownModel::Llama31_8bInstant => write!(f, "llama-3.1-8b-instant"),
            KnownModel::Gemma2_9bIt => write!(f, "gemma2-9b-it"),
            KnownModel::Mixtral8x7b32768 => write!(f, "mixtral-8x7b-32768"),
            KnownModel::DeepseekR1DistillLlama70b => write!(f, "deepseek-r1-distill-llama-70b"),
        }
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = match s {
            "llama-3.3-70b-versatile" => KnownModel::Llama33_70bVersatile,
            "llama-3.1-8b-instant" => KnownModel::Llama31_8bInstant,
            "gemma2-9b-it" => KnownModel::Gemma2_9bIt,
            "mixtral-8x7b-32768" => KnownModel::Mixtral8x7b32768,
            "deepseek-r1-distill-llama-70b" => KnownModel::DeepseekR1DistillLlama70b,
            _ => return Err(format!("unknown model: {s}")),
        };
        Ok(Model::Known(known))
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::Custom(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::Custom(model.to_string())
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::Llama33_70bVersatile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_serialization() {
        let model = Model::Known(KnownModel::Llama33_70bVersatile);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""llama-3.3-70b-versatile""#);

        let model = Model::Known(KnownModel::Gemma2_9bIt);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""gemma2-9b-it""#);
    }

    #[test]
    fn custom_model_serialization() {
        let model = Model::Custom("my-private-model".to_string());
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""my-private-model""#);
    }

    #[test]
    fn known_model_deserialization() {
        let model: Model = serde_json::from_str(r#""llama-3.1-8b-instant""#).unwrap();
        assert_eq!(model, Model::Known(KnownModel::Llama31_8bInstant));
    }

    #[test]
    fn parse_round_trip() {
        let model: Model = "llama-3.3-70b-versatile".parse().unwrap();
        assert_eq!(model, Model::Known(KnownModel::Llama33_70bVersatile));
        assert_eq!(model.to_string(), "llama-3.3-70b-versatile");

        assert!("not-a-groq-model".parse::<Model>().is_err());
    }

    #[test]
    fn default_model() {
        assert_eq!(
            Model::default(),
            Model::Known(KnownModel::Llama33_70bVersatile)
        );
    }
}
