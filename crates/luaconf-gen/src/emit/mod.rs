//! Rust module emission.
//!
//! One [`Emitter`] covers every variant; [`Config`] flags pick the sections.

mod config;
mod emitter;


pub use config::{Binding, Config, Interop, Variant};
pub use emitter::Emitter;

use luaconf_core::LuaConfig;

/// Emit the default (`full`) module.
pub fn emit(lua: &LuaConfig) -> String {
    Emitter::new(lua, Config::default()).emit()
}

/// Emit the module with custom config.
pub fn emit_module(lua: &LuaConfig, config: Config) -> String {
    Emitter::new(lua, config).emit()
}
