//! Interactive chat application backed by the Groq chat completions API.
//!
//! This binary provides a REPL interface for conversing with Groq-hosted
//! models, with an agriculture-assistant persona pinned as the system
//! message.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; reads GROQ_API_KEY from the environment
//! verdant-chat
//!
//! # Supply a key and a model explicitly
//! verdant-chat --api-key gsk-... --model llama-3.1-8b-instant
//!
//! # Adjust sampling
//! verdant-chat --temperature 0.4 --max-tokens 800
//!
//! # Disable colors (useful for piping output)
//! verdant-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/reset` - Reset the conversation to the system message
//! - `/key <k>` - Supply or replace the API key
//! - `/model <name>` - Change the model
//! - `/history` - Re-display the conversation
//! - `/quit` - Exit the application

use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use verdant::Model;
use verdant::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, MISSING_KEY_PROMPT, PlainTextRenderer,
    Renderer, help_text, parse_command,
};
use verdant::types::MessageRole;

/// Main entry point for the verdant-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("verdant-chat [OPTIONS]");
    let mut config = ChatConfig::from(args);
    if config.api_key.is_none() {
        config = config.with_api_key(env::var("GROQ_API_KEY").ok());
    }
    let use_color = config.use_color;

    let mut session = ChatSession::new(config)?;
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupt handling during a pending request
    let interrupted = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Verdant Chat (model: {})", session.model());
    println!("Type /help for commands, /quit to exit\n");
    if !session.has_api_key() {
        renderer.print_info(MISSING_KEY_PROMPT);
        renderer.print_info("Use /key <key> or set GROQ_API_KEY.\n");
    }

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Keep the API key out of the readline history.
                if !line.starts_with("/key") {
                    let _ = rl.add_history_entry(line);
                }

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Reset => {
                            session.reset();
                            renderer.print_info("Conversation reset.");
                        }
                        ChatCommand::Key(key) => match session.set_api_key(key) {
                            Ok(()) => renderer.print_info("API key set."),
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Model(model_name) => {
                            let model = model_name
                                .parse()
                                .unwrap_or_else(|_| Model::Custom(model_name.clone()));
                            session.set_model(model);
                            renderer.print_info(&format!("Model changed to: {model_name}"));
                        }
                        ChatCommand::System(prompt) => {
                            let restored = prompt.is_none();
                            session.set_system_prompt(prompt);
                            if restored {
                                renderer.print_info("System prompt restored to default.");
                            } else {
                                renderer.print_info("System prompt set.");
                            }
                        }
                        ChatCommand::Temperature(value) => {
                            session.set_temperature(value);
                            renderer.print_info(&format!("temperature set to {value}"));
                        }
                        ChatCommand::MaxTokens(value) => {
                            session.set_max_tokens(value);
                            renderer.print_info(&format!("max_tokens set to {value}"));
                        }
                        ChatCommand::TopP(value) => {
                            session.set_top_p(value);
                            renderer.print_info(&format!("top_p set to {value}"));
                        }
                        ChatCommand::FrequencyPenalty(value) => {
                            session.set_frequency_penalty(value);
                            renderer.print_info(&format!("frequency_penalty set to {value}"));
                        }
                        ChatCommand::History => {
                            print_history(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to API
                if let Err(e) = session.send(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
                if interrupted.swap(false, Ordering::Relaxed) {
                    renderer.print_info("[interrupted]");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_history(session: &ChatSession) {
    for message in session.messages() {
        match message.role {
            MessageRole::User => println!("You: {}", message.content),
            MessageRole::Assistant => println!("AI: {}", message.content),
            // The persona instruction is not part of the visible dialogue.
            MessageRole::System => {}
        }
    }
}

fn print_config(session: &ChatSession) {
    let config = session.config();
    println!("    Current Configuration:");
    println!("      Model: {}", config.model);
    println!("      Temperature: {:.2}", config.temperature);
    println!("      Max tokens: {}", config.max_tokens);
    println!("      Top-p: {:.2}", config.top_p);
    println!("      Frequency penalty: {:.2}", config.frequency_penalty);
    println!(
        "      API key: {}",
        if session.has_api_key() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("      Messages: {}", session.message_count());
    let first_line = config.system_prompt.lines().next().unwrap_or("");
    let mut prompt_preview: String = first_line.chars().take(60).collect();
    if prompt_preview.len() < first_line.len() {
        prompt_preview.push_str("...");
    }
    println!("      System prompt: {}", prompt_preview);
}
