// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod types;

// Re-exports
pub use client::Groq;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use types::*;
