#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Renders the Rust module that mirrors Lua's `luaconf.h`.
//!
//! The input is a [`LuaConfig`](luaconf_core::LuaConfig) resolved at build
//! time; the output is module source text ready to be written to a file and
//! pulled in with `mod` or `include!`.
//!
//! ```ignore
//! use luaconf_core::{LuaConfig, TargetLayout};
//! use luaconf_gen::{Config, Variant, emit_module};
//!
//! let lua = LuaConfig::reference(&TargetLayout::LP64)?;
//! let source = emit_module(&lua, Config::for_variant(Variant::Versioned));
//! ```

pub mod emit;
mod library;

#[cfg(test)]
mod library_tests;

pub use emit::{Binding, Config, Emitter, Interop, Variant, emit, emit_module};
pub use library::{DEFAULT_LIBRARY, LibraryName, LibraryNameError};
