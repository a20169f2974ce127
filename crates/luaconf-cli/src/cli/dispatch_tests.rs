//! Tests for CLI dispatch logic: argument parsing and conversion into the
//! emission config.

use std::path::PathBuf;

use clap::error::ErrorKind;
use luaconf_gen::{Config, Interop, LibraryName, Variant};

use super::*;
use crate::commands::generate::GenerateArgs;

fn parse(args: &[&str]) -> GenerateParams {
    let argv = std::iter::once("luaconf-gen").chain(args.iter().copied());
    let m = build_cli()
        .try_get_matches_from(argv)
        .unwrap_or_else(|e| panic!("{args:?} should parse: {e}"));
    GenerateParams::from_matches(&m)
}

fn parse_err(args: &[&str]) -> ErrorKind {
    let argv = std::iter::once("luaconf-gen").chain(args.iter().copied());
    match build_cli().try_get_matches_from(argv) {
        Ok(_) => panic!("{args:?} should be rejected"),
        Err(e) => e.kind(),
    }
}

#[test]
fn cli_is_well_formed() {
    build_cli().debug_assert();
}

#[test]
fn defaults() {
    let params = parse(&[]);
    assert_eq!(params.library, None);
    assert_eq!(params.variant, Variant::Full);
    assert_eq!(params.interop, Interop::Core);
    assert!(!params.no_link);
    assert!(!params.json);
    assert_eq!(params.output, None);

    let args: GenerateArgs = params.into();
    assert_eq!(args.config, Config::new());
}

#[test]
fn library_positional() {
    let params = parse(&["lua5.1"]);
    assert_eq!(params.library, Some(LibraryName::parse("lua5.1").unwrap()));

    let args: GenerateArgs = params.into();
    assert_eq!(
        args.config,
        Config::new().library(LibraryName::parse("lua5.1").unwrap())
    );
}

#[test]
fn invalid_library_is_an_argument_error() {
    assert_eq!(parse_err(&["lua\"; evil"]), ErrorKind::ValueValidation);
    assert_eq!(parse_err(&[""]), ErrorKind::ValueValidation);
}

#[test]
fn at_most_one_library() {
    assert_eq!(parse_err(&["lua", "luajit"]), ErrorKind::UnknownArgument);
}

#[test]
fn all_flags() {
    let params = parse(&[
        "lua54",
        "--variant",
        "legacy",
        "--interop",
        "libc",
        "--no-link",
        "--no-inner-attrs",
        "-o",
        "src/luaconf.rs",
        "--json",
    ]);
    assert_eq!(params.variant, Variant::Legacy);
    assert_eq!(params.interop, Interop::Libc);
    assert!(params.no_inner_attrs);
    assert_eq!(params.output, Some(PathBuf::from("src/luaconf.rs")));

    let args: GenerateArgs = params.into();
    assert!(args.json);
    assert_eq!(
        args.config,
        Config::for_variant(Variant::Legacy)
            .interop(Interop::Libc)
            .inner_attributes(false)
            .library(LibraryName::parse("lua54").unwrap())
    );
}

#[test]
fn no_link_overrides_variant() {
    let args: GenerateArgs = parse(&["--no-link"]).into();
    assert_eq!(args.config, Config::new().linkage(false));

    let args: GenerateArgs = parse(&["--variant", "versioned"]).into();
    assert_eq!(args.config, Config::for_variant(Variant::Versioned));
}

#[test]
fn unknown_variant_is_rejected() {
    assert_eq!(parse_err(&["--variant", "modern"]), ErrorKind::InvalidValue);
    assert_eq!(parse_err(&["--interop", "std"]), ErrorKind::InvalidValue);
}
