// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error, 503 Unavailable

    #[error("Generation API rejected the credentials ({0})")]
    Auth(reqwest::StatusCode),

    #[error("Generation API rate limit exceeded")]
    RateLimited,

    #[error("Generation API returned no text")]
    EmptyResponse,

    #[error("Missing configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to pack .docx archive: {0}")]
    Pack(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Output path has no file name: {0}")]
    InvalidPath(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Text generation failed: {0}")]
    Llm(#[from] LlmError), // Automatically convert generation errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
