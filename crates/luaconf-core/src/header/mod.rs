//! Header probe: resolves Lua's configuration macros from `luaconf.h` and
//! `lua.h` without invoking a C compiler.
//!
//! Pipeline:
//! - `lexer` - preprocessing tokens (logos)
//! - `scan` - comments, continuations, `#define`/`#undef`, conditional groups
//! - `expand` - object-like and function-like macro expansion
//! - `expr` - `#if` and integer constant expressions
//! - `resolve` - the `LuaConfig` fields

mod expand;
mod expr;
mod lexer;
mod resolve;
mod scan;

#[cfg(test)]
mod expr_tests;

use std::fs;
use std::path::{Path, PathBuf};

pub use resolve::probe;
pub use scan::Preprocessor;

use crate::config::LuaConfig;
use crate::layout::TargetLayout;
use crate::{Error, Result};

/// Headers read by [`probe_dir`], in order.
pub const HEADER_FILES: [&str; 2] = ["luaconf.h", "lua.h"];

/// Paths of the headers [`probe_dir`] reads from `dir`.
pub fn header_paths(dir: &Path) -> Vec<PathBuf> {
    HEADER_FILES.iter().map(|name| dir.join(name)).collect()
}

/// Feed `luaconf.h` then `lua.h` from `dir` into `pp`.
pub fn feed_dir(pp: &mut Preprocessor, dir: &Path) -> Result<()> {
    for path in header_paths(dir) {
        let text = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        pp.feed(&path.display().to_string(), &text)?;
    }
    Ok(())
}

/// Resolve the configuration of the Lua headers installed in `dir`.
pub fn probe_dir(dir: &Path, layout: TargetLayout) -> Result<LuaConfig> {
    let mut pp = Preprocessor::new(layout);
    feed_dir(&mut pp, dir)?;
    probe(&pp)
}
