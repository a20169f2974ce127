//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use luaconf_gen::{Config, Interop, LibraryName, Variant};

use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub library: Option<LibraryName>,
    pub variant: Variant,
    pub interop: Interop,
    pub no_link: bool,
    pub no_inner_attrs: bool,
    pub output: Option<PathBuf>,
    pub json: bool,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            library: m.get_one::<LibraryName>("library").cloned(),
            variant: m
                .get_one::<String>("variant")
                .and_then(|name| Variant::from_name(name))
                .unwrap_or_default(),
            interop: m
                .get_one::<String>("interop")
                .and_then(|name| Interop::from_name(name))
                .unwrap_or_default(),
            no_link: m.get_flag("no_link"),
            no_inner_attrs: m.get_flag("no_inner_attrs"),
            output: m.get_one::<PathBuf>("output").cloned(),
            json: m.get_flag("json"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        let mut config = Config::for_variant(p.variant)
            .interop(p.interop)
            .inner_attributes(!p.no_inner_attrs)
            .library(p.library.unwrap_or_default());
        if p.no_link {
            config = config.linkage(false);
        }

        Self {
            config,
            output: p.output,
            json: p.json,
        }
    }
}
