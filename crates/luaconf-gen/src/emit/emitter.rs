//! Core emitter struct and main emit logic.

use luaconf_core::LuaConfig;

use super::config::Config;

/// Module emitter for a resolved configuration.
pub struct Emitter<'a> {
    lua: &'a LuaConfig,
    config: Config,
    /// Output buffer
    output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(lua: &'a LuaConfig, config: Config) -> Self {
        Self {
            lua,
            config,
            output: String::new(),
        }
    }

    /// Emit the whole module.
    pub fn emit(mut self) -> String {
        self.emit_preamble();
        self.emit_imports();
        if self.config.linkage {
            self.emit_linkage();
        }
        if self.config.version_block {
            self.emit_version();
        }
        self.emit_types();
        self.emit_quoting();
        self.emit_limits();

        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }

    /// `include!` rejects inner doc comments, so the header degrades to `//`.
    fn emit_preamble(&mut self) {
        if self.config.inner_attributes {
            self.output
                .push_str("//! Module for configuration based on luaconf.h\n\n");
            self.output.push_str("#![allow(non_camel_case_types)]\n\n");
        } else {
            self.output
                .push_str("// Module for configuration based on luaconf.h\n\n");
        }
    }

    /// Only the FFI names the module refers to.
    fn emit_imports(&mut self) {
        let interop = self.config.interop;
        let mut names = Vec::new();
        if self.config.version_block {
            names.push("c_int");
        }
        let (size_type, size_import) = interop.size_type();
        if size_import {
            names.push(size_type);
        }

        match names.as_slice() {
            [] => return,
            [name] => self
                .output
                .push_str(&format!("use {}::{};\n", interop.path(), name)),
            _ => self.output.push_str(&format!(
                "use {}::{{{}}};\n",
                interop.path(),
                names.join(", ")
            )),
        }
        self.output.push('\n');
    }

    fn emit_linkage(&mut self) {
        self.output.push_str(&format!(
            "#[link(name = {:?})]\nunsafe extern \"C\" {{}}\n\n",
            self.config.library.as_str()
        ));
    }

    fn emit_version(&mut self) {
        let lua = self.lua;
        self.emit_item(
            "Human-readable major version string",
            "LUA_VERSION",
            "&str",
            &format!("{:?}", lua.version),
        );
        self.emit_item(
            "Human-readable release version string",
            "LUA_RELEASE",
            "&str",
            &format!("{:?}", lua.release),
        );
        self.emit_item(
            "Machine-readable Lua version number",
            "LUA_VERSION_NUM",
            "c_int",
            &lua.version_num.to_string(),
        );
        self.output.push('\n');
    }

    fn emit_types(&mut self) {
        self.output.push_str(&format!(
            "/// The integral type used by lua_pushinteger/lua_tointeger.\n\
             pub type LUA_INTEGER = {};\n\
             /// The type of numbers in Lua.\n\
             pub type LUA_NUMBER = {};\n\n",
            self.lua.integer.rust_name(),
            self.lua.number.rust_name(),
        ));
    }

    /// `LUA_QL` rendered around a `{}` format slot.
    fn emit_quoting(&mut self) {
        let quoted = self.lua.quote.render("{}");
        self.emit_item(
            "LUA_QL describes how error messages quote program elements.",
            "LUA_QL",
            "&str",
            &format!("{quoted:?}"),
        );
        self.output.push('\n');
    }

    fn emit_limits(&mut self) {
        let mut limits = vec![(
            "The buffer size used by the lauxlib buffer system.",
            "LUAL_BUFFERSIZE",
            self.lua.buffer_size,
        )];
        if self.config.limits {
            limits.push((
                "The maximum size for the description of the source of a function in debug information.",
                "LUA_IDSIZE",
                self.lua.id_size,
            ));
            limits.push((
                "The minimum Lua stack available to a C function.",
                "LUA_MINSTACK",
                self.lua.min_stack,
            ));
        }

        let (size_type, _) = self.config.interop.size_type();
        for (doc, name, value) in limits {
            self.emit_item(doc, name, size_type, &value.to_string());
            self.output.push('\n');
        }
    }

    fn emit_item(&mut self, doc: &str, name: &str, ty: &str, value: &str) {
        self.output.push_str(&format!(
            "/// {doc}\npub {} {name}: {ty} = {value};\n",
            self.config.binding.keyword()
        ));
    }
}
