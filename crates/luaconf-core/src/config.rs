//! The resolved Lua configuration.

use serde::{Deserialize, Serialize};

use crate::layout::TargetLayout;
use crate::template::Template;
use crate::{Error, Result};

/// Host integer primitive backing `LUA_INTEGER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerType {
    I16,
    I32,
    I64,
}

impl IntegerType {
    /// Host type for a C integer of `width` bytes.
    pub fn from_width(width: u8) -> Option<Self> {
        match width {
            2 => Some(Self::I16),
            4 => Some(Self::I32),
            8 => Some(Self::I64),
            _ => None,
        }
    }

    /// Rust spelling of the primitive.
    pub fn rust_name(self) -> &'static str {
        match self {
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }
}

/// Host float primitive backing `LUA_NUMBER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    F32,
    F64,
}

impl NumberType {
    pub fn from_width(width: u8) -> Option<Self> {
        match width {
            4 => Some(Self::F32),
            8 => Some(Self::F64),
            _ => None,
        }
    }

    pub fn rust_name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}

/// Every value the generator emits, resolved from the Lua headers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuaConfig {
    /// `LUA_VERSION`, e.g. `Lua 5.1`.
    pub version: String,
    /// `LUA_RELEASE`, e.g. `Lua 5.1.5`.
    pub release: String,
    /// `LUA_VERSION_NUM`, e.g. `501`.
    pub version_num: i32,
    /// `LUA_INTEGER`.
    pub integer: IntegerType,
    /// `LUA_NUMBER`.
    pub number: NumberType,
    /// `LUA_QL(x)`.
    pub quote: Template,
    /// `LUAL_BUFFERSIZE`.
    pub buffer_size: u64,
    /// `LUA_IDSIZE`.
    pub id_size: u64,
    /// `LUA_MINSTACK`.
    pub min_stack: u64,
}

impl LuaConfig {
    /// Stock Lua 5.1.5 configuration (`LUA_INTEGER` is `ptrdiff_t`,
    /// `LUAL_BUFFERSIZE` is `BUFSIZ`) for the given target.
    pub fn reference(layout: &TargetLayout) -> Result<Self> {
        let integer = IntegerType::from_width(layout.pointer_width)
            .ok_or_else(|| Error::UnsupportedType("ptrdiff_t".to_string()))?;

        Ok(Self {
            version: "Lua 5.1".to_string(),
            release: "Lua 5.1.5".to_string(),
            version_num: 501,
            integer,
            number: NumberType::F64,
            quote: Template::single_quoted(),
            buffer_size: u64::from(layout.bufsiz),
            id_size: 60,
            min_stack: 20,
        })
    }

    /// Compact JSON, single line, suitable for a `cargo::rustc-env` value.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
