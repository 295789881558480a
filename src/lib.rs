/*!
 * # tutorbot - Conversational English-Exercise Bot
 *
 * A Rust library implementing a Telegram tutor bot that generates
 * multiple-choice grammar exercises with an LLM and grades the answers.
 *
 * ## Features
 *
 * - Three-phase conversation: choose level, send topic, submit answers
 * - Exercise generation and grading delegated to an LLM provider (Groq)
 * - Answers accepted as one formatted line or as inline-button taps
 * - Strict input validation with canned corrective messages
 * - Per-user session isolation with serialized event handling
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `conversation`: The conversation core:
 *   - `conversation::input`: Inbound event shapes and input classification
 *   - `conversation::machine`: Table-driven state machine
 *   - `conversation::replies`: Canned outbound texts and markup descriptors
 * - `session`: Per-user session data and the in-memory store
 * - `prompts`: Exercise and grading prompt templates
 * - `generation`: Generation service over the provider clients
 * - `response_cleaner`: Post-processing of raw model output
 * - `providers`: Client implementations for LLM providers:
 *   - `providers::groq`: Groq OpenAI-compatible API client
 *   - `providers::mock`: Scripted provider for tests
 * - `telegram`: Thin Telegram Bot API delivery client
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod conversation;
pub mod errors;
pub mod generation;
pub mod prompts;
pub mod providers;
pub mod response_cleaner;
pub mod session;
pub mod telegram;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use conversation::{ClassifiedInput, ConversationState, InboundEvent, Outgoing, Payload, Step};
pub use errors::{AppError, ProviderError, TelegramError};
pub use generation::{GENERATION_ERROR_TEXT, GenerationService};
pub use session::{Level, Session, SessionStore};
