//! Error types for range-picker operations.
//!
//! None of these reach the end user: the picker normalizes bad input instead
//! of rejecting it. They exist so parsing layers can report what went wrong
//! before the value is normalized away.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
