//! Shader source preprocessing seam
//!
//! `#include`-style source rewriting is delegated to implementations of
//! [`ShaderPreprocessor`] supplied through the Format; this crate never
//! resolves includes itself. The default [`DirectivePreprocessor`] only
//! injects the configured `#version` and `#define` directives.

use std::path::PathBuf;

use crate::device::ShaderStage;
use crate::error::Result;

/// A `#define` directive, with or without a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    /// Macro name
    pub name: String,
    /// Macro value, when given
    pub value: Option<String>,
}

impl Define {
    fn directive(&self) -> String {
        match &self.value {
            Some(value) => format!("#define {} {}", self.name, value),
            None => format!("#define {}", self.name),
        }
    }
}

/// Result of preprocessing one stage source
#[derive(Debug, Clone)]
pub struct ProcessedSource {
    /// Rewritten source handed to the driver
    pub source: String,
    /// Files the preprocessor pulled in (empty unless an including
    /// implementation is supplied)
    pub included_files: Vec<PathBuf>,
}

/// Source-rewriting collaborator invoked before compilation
pub trait ShaderPreprocessor {
    /// Rewrite `source` for `stage`
    fn process(&self, source: &str, stage: ShaderStage) -> Result<ProcessedSource>;
}

/// Default preprocessor: directive injection only
///
/// Emits the configured `#version` as the first line when the source does
/// not already carry one, and inserts the `#define` directives immediately
/// after the `#version` line (existing or injected).
#[derive(Debug, Clone, Default)]
pub struct DirectivePreprocessor {
    version: Option<u32>,
    defines: Vec<Define>,
}

impl DirectivePreprocessor {
    /// Create a preprocessor for the given version/defines configuration
    pub fn new(version: Option<u32>, defines: &[Define]) -> Self {
        Self { version, defines: defines.to_vec() }
    }
}

impl ShaderPreprocessor for DirectivePreprocessor {
    fn process(&self, source: &str, _stage: ShaderStage) -> Result<ProcessedSource> {
        let has_version = source.lines().any(|line| line.trim_start().starts_with("#version"));
        if self.defines.is_empty() && (self.version.is_none() || has_version) {
            return Ok(ProcessedSource {
                source: source.to_string(),
                included_files: Vec::new(),
            });
        }

        let directives: Vec<String> = self.defines.iter().map(Define::directive).collect();
        let mut out = String::with_capacity(source.len() + 64);

        if has_version {
            let mut injected = false;
            for line in source.lines() {
                out.push_str(line);
                out.push('\n');
                if !injected && line.trim_start().starts_with("#version") {
                    for directive in &directives {
                        out.push_str(directive);
                        out.push('\n');
                    }
                    injected = true;
                }
            }
        } else {
            if let Some(version) = self.version {
                out.push_str(&format!("#version {}\n", version));
            }
            for directive in &directives {
                out.push_str(directive);
                out.push('\n');
            }
            out.push_str(source);
        }

        Ok(ProcessedSource { source: out, included_files: Vec::new() })
    }
}

#[cfg(test)]
#[path = "preprocessor_tests.rs"]
mod tests;
