#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Lua configuration bindings.
//!
//! Two layers:
//! - **Model**: [`LuaConfig`] and the types it is built from, resolved once per build
//! - **Probe**: [`header`], a small C preprocessor that resolves `luaconf.h`/`lua.h` macros
//!
//! The probe runs inside build scripts; the model travels from there to the
//! generator as JSON.

pub mod config;
pub mod header;
pub mod layout;
pub mod template;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod layout_tests;
#[cfg(test)]
mod template_tests;

pub use config::{IntegerType, LuaConfig, NumberType};
pub use header::{Preprocessor, feed_dir, probe, probe_dir};
pub use layout::TargetLayout;
pub use template::{Segment, Template};

/// Errors raised while resolving the Lua configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}: unterminated comment")]
    UnterminatedComment { file: String, line: usize },

    #[error("{file}:{line}: malformed directive: {message}")]
    Directive {
        file: String,
        line: usize,
        message: String,
    },

    #[error("{file}: unbalanced conditional ({open} open at end of input)")]
    UnbalancedConditional { file: String, open: usize },

    #[error("macro `{0}` is not defined by the headers")]
    MissingMacro(String),

    #[error("macro `{name}` does not expand to {expected}")]
    Shape {
        name: String,
        expected: &'static str,
    },

    #[error("constant expression error: {0}")]
    Expression(String),

    #[error("unsupported C type `{0}` for this target layout")]
    UnsupportedType(String),

    #[error("value of `{name}` out of range: {value}")]
    OutOfRange { name: String, value: i64 },

    #[error("invalid resolved configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration resolution.
pub type Result<T> = std::result::Result<T, Error>;
