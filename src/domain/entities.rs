//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/IO types here; adapters map into these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque credential entered by the user or recovered from storage.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} chars>)", self.0.len())
    }
}

/// Error classification of a remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ServerNotResponding,
    ConnectionError,
    Unauthorized,
    Other,
}

/// Result of a remote operation. Adapters never raise; they classify.
#[derive(Debug)]
pub enum RequestResult<T> {
    Success(T),
    Error {
        kind: ErrorKind,
        message: Option<String>,
        cause: Option<anyhow::Error>,
    },
}

impl<T> RequestResult<T> {
    /// Error without message or cause.
    pub fn error(kind: ErrorKind) -> Self {
        Self::Error {
            kind,
            message: None,
            cause: None,
        }
    }

    /// Error carrying a human-readable reason.
    pub fn error_with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: Some(message.into()),
            cause: None,
        }
    }

    /// Transform the success value; errors pass through untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestResult<U> {
        match self {
            Self::Success(value) => RequestResult::Success(f(value)),
            Self::Error {
                kind,
                message,
                cause,
            } => RequestResult::Error {
                kind,
                message,
                cause,
            },
        }
    }
}

/// A repository as shown in the listing screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub owner: String,
    pub description: String,
    pub language: String,
    /// ARGB display color for the language, if known.
    pub color: Option<u32>,
}

/// License record of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    #[serde(rename = "spdx_id")]
    pub name: Option<String>,
}

/// UI language of the message catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Self::En),
            "ru" | "ru-ru" | "ru_ru" => Ok(Self::Ru),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}
