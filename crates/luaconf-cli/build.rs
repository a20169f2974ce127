//! Resolves Lua's configuration for the build target and hands it to the
//! binary as `LUACONF_RESOLVED` (compact JSON).
//!
//! Headers are read from `LUA_INCLUDE_DIR`, or from `DEP_LUA_INCLUDE` when a
//! `links = "lua"` dependency exports one. With neither set, the stock
//! Lua 5.1.5 configuration for the target is used.

use std::env;
use std::path::{Path, PathBuf};

use luaconf_core::header::header_paths;
use luaconf_core::{LuaConfig, Preprocessor, TargetLayout, feed_dir, probe};

const INCLUDE_VARS: [&str; 2] = ["LUA_INCLUDE_DIR", "DEP_LUA_INCLUDE"];

fn main() {
    for var in INCLUDE_VARS {
        println!("cargo::rerun-if-env-changed={var}");
    }

    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let layout = target_layout(&os);

    let config = match include_dir() {
        Some(dir) => probe_headers(&dir, layout, &os),
        None => {
            println!(
                "cargo::warning=no Lua headers configured (set LUA_INCLUDE_DIR); \
                 using the Lua 5.1.5 reference configuration"
            );
            LuaConfig::reference(&layout)
                .unwrap_or_else(|e| panic!("reference configuration: {e}"))
        }
    };

    let json = config
        .to_json()
        .unwrap_or_else(|e| panic!("serializing configuration: {e}"));
    println!("cargo::rustc-env=LUACONF_RESOLVED={json}");
}

fn target_layout(os: &str) -> TargetLayout {
    let pointer_bits = env::var("CARGO_CFG_TARGET_POINTER_WIDTH")
        .ok()
        .and_then(|bits| bits.parse().ok())
        .unwrap_or(64);
    TargetLayout::for_target(pointer_bits, os)
}

fn include_dir() -> Option<PathBuf> {
    INCLUDE_VARS
        .iter()
        .filter_map(env::var_os)
        .find(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

fn probe_headers(dir: &Path, layout: TargetLayout, os: &str) -> LuaConfig {
    for path in header_paths(dir) {
        println!("cargo::rerun-if-changed={}", path.display());
    }

    let mut pp = Preprocessor::new(layout);
    if os == "windows" {
        pp.define("_WIN32", "1");
    }

    feed_dir(&mut pp, dir)
        .and_then(|()| probe(&pp))
        .unwrap_or_else(|e| panic!("probing Lua headers in {}: {e}", dir.display()))
}
