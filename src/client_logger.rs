//! Logging trait for Groq client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log API interactions passing through the [`Groq`](crate::Groq) client.

use crate::types::{ChatCompletion, ChatCompletionParams};

/// A trait for logging Groq client operations.
///
/// Implement this trait to capture and record API interactions. Attach an
/// implementation with [`Groq::with_logger`](crate::Groq::with_logger).
///
/// # Example
///
/// ```rust,ignore
/// use verdant::{ChatCompletion, ChatCompletionParams, ClientLogger};
/// use std::io::Write;
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_request(&self, params: &ChatCompletionParams) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Request: {}", serde_json::to_string(params).unwrap()).unwrap();
///     }
///
///     fn log_response(&self, completion: &ChatCompletion) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Response: {}", serde_json::to_string(completion).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log the request body of a chat completion call before it is sent.
    fn log_request(&self, params: &ChatCompletionParams);

    /// Log a complete response from a successful chat completion call.
    fn log_response(&self, completion: &ChatCompletion);
}
