//! Chat application module for interactive conversations over the Groq API.
//!
//! This module provides the REPL chat layer built on top of the verdant
//! client library. It supports:
//!
//! - A transcript whose first entry is always the system message
//! - Slash commands standing in for the original sidebar controls
//! - Configurable model, system prompt, and sampling parameters
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Transcript state and request dispatch
//! - [`commands`]: Slash command parsing and handling
//! - [`render`]: Output rendering

mod commands;
pub mod config;
mod render;
mod session;

pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use render::{PlainTextRenderer, Renderer};
pub use session::{ChatSession, MISSING_KEY_PROMPT};
