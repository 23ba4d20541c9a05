//! Core error types for UML model construction
//!
//! This module defines the error type shared by the model, the declaration feed
//! and the configuration enums.

use thiserror::Error;

/// Core error type for building and rendering UML models
#[derive(Error, Debug)]
pub enum UmlError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Type name error: {message} in '{input}'")]
    TypeNameParse { input: String, message: String },

    #[error("Unknown relationship arrow: {arrow}")]
    UnknownRelationship { arrow: String },

    #[error("Unknown classification: {value}")]
    UnknownClassification { value: String },

    #[error("Unknown type display: {value}")]
    UnknownTypeDisplay { value: String },

    #[error("Unknown visibility: {value}")]
    UnknownVisibility { value: String },

    #[error("Feed error: {message}")]
    Feed { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl UmlError {
    /// Create a new invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new type name parse error
    pub fn type_name_parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeNameParse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a new feed error
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed {
            message: message.into(),
        }
    }
}
