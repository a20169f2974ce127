//! Argument builders for the CLI.
//!
//! Each function returns a `clap::Arg`; `commands.rs` composes them.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use luaconf_gen::{Interop, LibraryName, Variant};

/// Native library to link (positional).
pub fn library_arg() -> Arg {
    Arg::new("library")
        .value_name("LIBRARY")
        .value_parser(LibraryName::parse)
        .help("Native library named in #[link] (default: lua)")
}

/// Emitted subset (--variant).
pub fn variant_arg() -> Arg {
    Arg::new("variant")
        .long("variant")
        .value_name("VARIANT")
        .default_value("full")
        .value_parser(Variant::NAMES)
        .help("Which items to emit")
}

/// FFI type source (--interop).
pub fn interop_arg() -> Arg {
    Arg::new("interop")
        .long("interop")
        .value_name("CRATE")
        .default_value("core")
        .value_parser(Interop::NAMES)
        .help("Where c_int and the size type come from")
}

/// Omit the linkage directive (--no-link).
pub fn no_link_arg() -> Arg {
    Arg::new("no_link")
        .long("no-link")
        .action(ArgAction::SetTrue)
        .help("Don't emit the #[link] block")
}

/// Omit inner attributes (--no-inner-attrs).
pub fn no_inner_attrs_arg() -> Arg {
    Arg::new("no_inner_attrs")
        .long("no-inner-attrs")
        .action(ArgAction::SetTrue)
        .help("Don't emit inner attributes or inner doc comments, for use with include!")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}

/// Print the resolved configuration (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the resolved configuration as JSON instead of the module")
}
