// Public modules
pub mod chat_completion;
pub mod chat_completion_params;
pub mod message;
pub mod model;

// Re-exports
pub use chat_completion::{ChatChoice, ChatCompletion, Usage};
pub use chat_completion_params::ChatCompletionParams;
pub use message::{ChatMessage, MessageRole};
pub use model::{KnownModel, Model};
