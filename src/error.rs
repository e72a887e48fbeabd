use serde::Serialize;
use thiserror::Error;

use crate::tokenizer::token::TokenizerError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),
    #[error("Unsupported language: {id}")]
    UnsupportedLanguage { id: String },
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Tokenizer(TokenizerError::UnterminatedLiteral { .. }) => {
                FailureKind::UnterminatedLiteral
            }
            Error::UnsupportedLanguage { .. } => FailureKind::UnsupportedLanguage,
            Error::Config(_) => FailureKind::Config,
        }
    }

    /// Byte offset in the source the failure points at, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Tokenizer(TokenizerError::UnterminatedLiteral { position, .. }) => {
                Some(position.offset)
            }
            Error::UnsupportedLanguage { .. } | Error::Config(_) => None,
        }
    }

    pub fn failure(&self) -> Failure {
        Failure::from(self)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    UnterminatedLiteral,
    UnsupportedLanguage,
    Config,
}

/// Structured view of an [`Error`] for callers that report failures as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    pub message: String,
}

impl From<&Error> for Failure {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            offset: error.offset(),
            message: error.to_string(),
        }
    }
}
