//! Configuration types for module emission.

use std::fmt;

use crate::library::LibraryName;

/// Declaration keyword for the generated values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Binding {
    /// `pub const`
    #[default]
    Const,
    /// `pub static`, as the oldest bindings declared them
    Static,
}

impl Binding {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Static => "static",
        }
    }
}

/// Where the C FFI type names come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interop {
    /// `core::ffi::c_int`, sizes as `usize`
    #[default]
    Core,
    /// `libc::c_int` and `libc::size_t`
    Libc,
}

impl Interop {
    pub const NAMES: [&'static str; 2] = ["core", "libc"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "core" => Some(Self::Core),
            "libc" => Some(Self::Libc),
            _ => None,
        }
    }

    /// Crate path the FFI names are imported from.
    pub fn path(self) -> &'static str {
        match self {
            Self::Core => "core::ffi",
            Self::Libc => "libc",
        }
    }

    /// Rust type for C `size_t`, and whether it needs an import.
    pub fn size_type(self) -> (&'static str, bool) {
        match self {
            Self::Core => ("usize", false),
            Self::Libc => ("size_t", true),
        }
    }
}

/// Preset section selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Types, quoting and buffer size as `static` items. No version block, no linkage.
    Legacy,
    /// Adds the version block and the debug/stack limits.
    Versioned,
    /// Everything, including the linkage directive.
    #[default]
    Full,
}

impl Variant {
    pub const NAMES: [&'static str; 3] = ["legacy", "versioned", "full"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "legacy" => Some(Self::Legacy),
            "versioned" => Some(Self::Versioned),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Versioned => "versioned",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration for module emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// `const` or `static` items
    pub(crate) binding: Binding,
    /// Source of `c_int`/`size_t`
    pub(crate) interop: Interop,
    /// `LUA_VERSION`, `LUA_RELEASE`, `LUA_VERSION_NUM`
    pub(crate) version_block: bool,
    /// `#[link(name = ...)]` block
    pub(crate) linkage: bool,
    /// `LUA_IDSIZE`, `LUA_MINSTACK`
    pub(crate) limits: bool,
    /// `#![allow(non_camel_case_types)]`
    pub(crate) inner_attributes: bool,
    pub(crate) library: LibraryName,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// The section selection of a preset.
    pub fn for_variant(variant: Variant) -> Self {
        let modern = variant != Variant::Legacy;
        Self {
            binding: if modern { Binding::Const } else { Binding::Static },
            interop: Interop::default(),
            version_block: modern,
            linkage: variant == Variant::Full,
            limits: modern,
            inner_attributes: true,
            library: LibraryName::default(),
        }
    }

    /// Set the declaration keyword.
    pub fn binding(mut self, value: Binding) -> Self {
        self.binding = value;
        self
    }

    /// Set where FFI type names come from.
    pub fn interop(mut self, value: Interop) -> Self {
        self.interop = value;
        self
    }

    /// Set whether to emit the version constants.
    pub fn version_block(mut self, value: bool) -> Self {
        self.version_block = value;
        self
    }

    /// Set whether to emit the linkage directive.
    pub fn linkage(mut self, value: bool) -> Self {
        self.linkage = value;
        self
    }

    /// Set whether to emit `LUA_IDSIZE` and `LUA_MINSTACK`.
    pub fn limits(mut self, value: bool) -> Self {
        self.limits = value;
        self
    }

    /// Set whether to emit inner attributes (off for `include!` consumers).
    pub fn inner_attributes(mut self, value: bool) -> Self {
        self.inner_attributes = value;
        self
    }

    /// Set the linked library.
    pub fn library(mut self, value: LibraryName) -> Self {
        self.library = value;
        self
    }
}
