//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the API. The commands stand in for the sidebar controls of the
//! original page: the key field, the four sliders, and the reset button.

use std::ops::RangeInclusive;

use crate::chat::config::{
    FREQUENCY_PENALTY_RANGE, MAX_TOKENS_RANGE, TEMPERATURE_RANGE, TOP_P_RANGE,
};

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Reset the transcript back to the single system message.
    Reset,

    /// Supply or replace the API key.
    Key(String),

    /// Change the model.
    Model(String),

    /// Set or restore the system prompt.
    /// `None` restores the default persona.
    System(Option<String>),

    /// Set the sampling temperature.
    Temperature(f64),

    /// Set the maximum tokens per response.
    MaxTokens(u32),

    /// Set the top-p value.
    TopP(f64),

    /// Set the frequency penalty.
    FrequencyPenalty(f64),

    /// Re-render the whole transcript.
    History,

    /// Show the current configuration.
    ShowConfig,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use verdant::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/temperature 0.9").is_some());
/// assert!(parse_command("How do I rotate crops?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "reset" => ChatCommand::Reset,
        "key" => match argument {
            Some(key) => ChatCommand::Key(key.to_string()),
            None => ChatCommand::Invalid("/key requires an API key".to_string()),
        },
        "model" => match argument {
            Some(model) => ChatCommand::Model(model.to_string()),
            None => ChatCommand::Invalid("/model requires a model name".to_string()),
        },
        "system" => ChatCommand::System(argument.map(|s| s.to_string())),
        "temperature" => {
            parse_f64_command(argument, TEMPERATURE_RANGE, ChatCommand::Temperature, "/temperature")
        }
        "max_tokens" => parse_max_tokens(argument),
        "top_p" => parse_f64_command(argument, TOP_P_RANGE, ChatCommand::TopP, "/top_p"),
        "frequency_penalty" => parse_f64_command(
            argument,
            FREQUENCY_PENALTY_RANGE,
            ChatCommand::FrequencyPenalty,
            "/frequency_penalty",
        ),
        "history" => ChatCommand::History,
        "config" => ChatCommand::ShowConfig,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_max_tokens(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("/max_tokens requires a value".to_string());
    };
    let min = *MAX_TOKENS_RANGE.start();
    let max = *MAX_TOKENS_RANGE.end();
    match arg.parse::<u32>() {
        Ok(value) if MAX_TOKENS_RANGE.contains(&value) => ChatCommand::MaxTokens(value),
        _ => ChatCommand::Invalid(format!(
            "/max_tokens expects an integer between {min} and {max}"
        )),
    }
}

fn parse_f64_command<F>(
    argument: Option<&str>,
    range: RangeInclusive<f64>,
    constructor: F,
    name: &str,
) -> ChatCommand
where
    F: Fn(f64) -> ChatCommand,
{
    let Some(arg) = argument else {
        return ChatCommand::Invalid(format!("{name} requires a value"));
    };
    match parse_f64_in_range(arg, range) {
        Ok(value) => constructor(value),
        Err(err) => ChatCommand::Invalid(format!("{name} {err}")),
    }
}

fn parse_f64_in_range(value: &str, range: RangeInclusive<f64>) -> Result<f64, String> {
    let min = *range.start();
    let max = *range.end();
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("expects a value between {min} and {max}"))?;
    if parsed.is_finite() && range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("expects a value between {min} and {max}"))
    }
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /reset                 Reset the conversation to the system message
  /key <key>             Supply or replace the Groq API key
  /model <name>          Change the model (e.g., /model llama-3.1-8b-instant)
  /system [prompt]       Set system prompt (no argument restores the default)
  /temperature <v>       Set temperature 0.0-1.5
  /max_tokens <n>        Set maximum response tokens 50-1000
  /top_p <v>             Set top-p 0.0-1.0
  /frequency_penalty <v> Set frequency penalty 0.0-2.0
  /history               Re-display the conversation so far
  /config                Show current configuration
  /help                  Show this help message
  /quit                  Exit the chat"#
}
