//! Error types for the Prism GLSL library
//!
//! This module defines the error types used throughout the library,
//! covering shader compilation, program linking, and backend failures.

use std::fmt;

use crate::device::ShaderStage;

/// Result type for Prism GLSL operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism GLSL errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A shader stage failed to compile; carries the driver info log
    CompileFailed { stage: ShaderStage, log: String },

    /// The program failed to link; carries the driver info log
    LinkFailed(String),

    /// Invalid resource (missing sources, bad configuration, etc.)
    InvalidResource(String),

    /// Backend-specific error (GL object creation, etc.)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CompileFailed { stage, log } => {
                write!(f, "{} shader failed to compile: {}", stage.name(), log)
            }
            Error::LinkFailed(log) => write!(f, "Program failed to link: {}", log),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
