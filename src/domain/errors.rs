//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("AI extraction failed: {0}")]
    Ai(String),

    #[error("Tracker error: {0}")]
    Tracker(String),

    #[error("Image attachment error: {0}")]
    Image(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),
}
