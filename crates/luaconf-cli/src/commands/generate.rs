use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use luaconf_core::LuaConfig;
use luaconf_gen::{Config, emit_module};
use tracing::debug;

/// Configuration resolved by `build.rs` for the target this binary was built for.
pub(crate) const RESOLVED: &str = env!("LUACONF_RESOLVED");

pub struct GenerateArgs {
    pub config: Config,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn run(args: GenerateArgs) {
    let lua = LuaConfig::from_json(RESOLVED).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });
    debug!(release = %lua.release, "loaded build-time configuration");

    let output = render(&lua, &args).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = write_output(args.output.as_deref(), &output) {
        match args.output {
            Some(ref path) => eprintln!("error: failed to write {}: {}", path.display(), e),
            None => eprintln!("error: failed to write output: {}", e),
        }
        std::process::exit(1);
    }
}

/// The module text, or the pretty configuration for `--json`.
pub(crate) fn render(lua: &LuaConfig, args: &GenerateArgs) -> luaconf_core::Result<String> {
    if args.json {
        let mut json = lua.to_json_pretty()?;
        json.push('\n');
        return Ok(json);
    }
    Ok(emit_module(lua, args.config.clone()))
}

fn write_output(path: Option<&Path>, output: &str) -> io::Result<()> {
    match path {
        Some(path) => fs::write(path, output),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()
        }
    }
}
