//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("luaconf-gen")
        .about("Generate a Rust module mirroring Lua's luaconf.h")
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(
            r#"EXAMPLES:
  luaconf-gen > src/luaconf.rs                 # full module, links `lua`
  luaconf-gen lua5.1 -o src/luaconf.rs         # link against liblua5.1
  luaconf-gen --variant legacy --no-inner-attrs
  luaconf-gen --json                           # show the resolved values

The values are resolved when this binary is built: set LUA_INCLUDE_DIR to the
directory holding luaconf.h and lua.h before building."#,
        )
        .arg(library_arg())
        .arg(variant_arg())
        .arg(interop_arg())
        .arg(no_link_arg())
        .arg(no_inner_attrs_arg())
        .arg(output_file_arg())
        .arg(json_arg())
}
