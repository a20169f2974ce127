//! Name of the native library the generated module links against.

use std::fmt;
use std::str::FromStr;

/// Library linked when none is given.
pub const DEFAULT_LIBRARY: &str = "lua";

/// Why a library name was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LibraryNameError {
    #[error("library name is empty")]
    Empty,

    #[error("library name contains {0:?}; use ASCII letters, digits, `_`, `-`, `.` or `+`")]
    InvalidChar(char),

    #[error("library name must not start with `-`")]
    LeadingDash,
}

/// A library name that can be embedded verbatim in `#[link(name = "...")]`.
///
/// Accepts the names native Lua builds actually ship under (`lua`,
/// `lua5.1`, `lua-5.4`, `luajit-5.1`, `lua54`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LibraryName(String);

impl LibraryName {
    pub fn parse(name: &str) -> Result<Self, LibraryNameError> {
        if name.is_empty() {
            return Err(LibraryNameError::Empty);
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')))
        {
            return Err(LibraryNameError::InvalidChar(c));
        }
        if name.starts_with('-') {
            return Err(LibraryNameError::LeadingDash);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LibraryName {
    fn default() -> Self {
        Self(DEFAULT_LIBRARY.to_string())
    }
}

impl FromStr for LibraryName {
    type Err = LibraryNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LibraryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
