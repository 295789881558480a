/*!
 * Error types for the tutorbot application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the language-model provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured deadline
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur when talking to the Telegram Bot API
#[derive(Error, Debug)]
pub enum TelegramError {
    /// Error when making an API request fails
    #[error("Telegram request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse Telegram response: {0}")]
    ParseError(String),

    /// The Bot API answered with ok=false
    #[error("Telegram API error: {description}")]
    ApiError {
        /// Error description from the API
        description: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error in the application configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the language-model provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the Telegram delivery client
    #[error("Telegram error: {0}")]
    Telegram(#[from] TelegramError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
