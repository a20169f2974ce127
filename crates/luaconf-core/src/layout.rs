//! C scalar layout of the build target.
//!
//! The probe never runs a C compiler, so every `sizeof`, `<limits.h>` and
//! `<stdio.h>` fact it needs comes from here.

use serde::{Deserialize, Serialize};

/// Byte widths of the C scalar types on a target, plus the few host
/// constants Lua headers reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLayout {
    pub pointer_width: u8,
    pub short_width: u8,
    pub int_width: u8,
    pub long_width: u8,
    pub long_long_width: u8,
    /// `BUFSIZ` from `<stdio.h>`.
    pub bufsiz: u32,
}

impl Default for TargetLayout {
    fn default() -> Self {
        Self::LP64
    }
}

impl TargetLayout {
    /// 64-bit Unix (Linux, macOS, BSDs).
    pub const LP64: Self = Self {
        pointer_width: 8,
        short_width: 2,
        int_width: 4,
        long_width: 8,
        long_long_width: 8,
        bufsiz: 8192,
    };

    /// 64-bit Windows.
    pub const LLP64: Self = Self {
        pointer_width: 8,
        short_width: 2,
        int_width: 4,
        long_width: 4,
        long_long_width: 8,
        bufsiz: 512,
    };

    /// 32-bit targets.
    pub const ILP32: Self = Self {
        pointer_width: 4,
        short_width: 2,
        int_width: 4,
        long_width: 4,
        long_long_width: 8,
        bufsiz: 8192,
    };

    /// Layout for a Cargo target, from `CARGO_CFG_TARGET_POINTER_WIDTH`
    /// (in bits) and `CARGO_CFG_TARGET_OS`.
    pub fn for_target(pointer_bits: u32, os: &str) -> Self {
        let mut layout = match (pointer_bits, os) {
            (64, "windows") => Self::LLP64,
            (64, _) => Self::LP64,
            _ => Self::ILP32,
        };
        layout.bufsiz = match os {
            "windows" => 512,
            "macos" | "ios" | "freebsd" | "netbsd" | "openbsd" | "dragonfly" => 1024,
            _ => 8192,
        };
        layout
    }

    /// Width of an integer type spelling such as `long long` or `ptrdiff_t`.
    pub fn integer_width(&self, spelling: &str) -> Option<u8> {
        let words = normalize(spelling);
        let len = words.len();
        let words: Vec<&str> = words
            .into_iter()
            .filter(|w| *w != "int" || len == 1)
            .collect();

        let width = match words.as_slice() {
            ["char"] => 1,
            ["short"] => self.short_width,
            ["int"] => self.int_width,
            ["long"] => self.long_width,
            ["long", "long"] | ["__int64"] => self.long_long_width,
            ["ptrdiff_t"] | ["size_t"] | ["ssize_t"] | ["intptr_t"] | ["uintptr_t"] => {
                self.pointer_width
            }
            [fixed] => fixed_width(fixed)?,
            _ => return None,
        };
        Some(width)
    }

    /// Width of a floating-point type spelling. `long double` has no
    /// host primitive and yields `None`.
    pub fn float_width(&self, spelling: &str) -> Option<u8> {
        match normalize(spelling).as_slice() {
            ["float"] => Some(4),
            ["double"] => Some(8),
            _ => None,
        }
    }

    /// `sizeof` for any scalar or pointer spelling.
    pub fn size_of(&self, spelling: &str) -> Option<u8> {
        if spelling.trim_end().ends_with('*') {
            return Some(self.pointer_width);
        }
        self.integer_width(spelling)
            .or_else(|| self.float_width(spelling))
    }

    /// Value of a `<limits.h>`/`<stdio.h>` symbol, if known.
    pub fn symbol(&self, name: &str) -> Option<i64> {
        let value = match name {
            "BUFSIZ" => i64::from(self.bufsiz),
            "CHAR_BIT" => 8,
            "SHRT_MAX" => signed_max(self.short_width),
            "INT_MAX" => signed_max(self.int_width),
            "UINT_MAX" => unsigned_max(self.int_width)?,
            "LONG_MAX" => signed_max(self.long_width),
            "LLONG_MAX" => signed_max(self.long_long_width),
            "PTRDIFF_MAX" => signed_max(self.pointer_width),
            _ => return None,
        };
        Some(value)
    }
}

fn normalize(spelling: &str) -> Vec<&str> {
    let words: Vec<&str> = spelling
        .split_whitespace()
        .filter(|w| !matches!(*w, "signed" | "const" | "volatile"))
        .collect();
    match words.as_slice() {
        ["unsigned"] => vec!["int"],
        _ => words.into_iter().filter(|w| *w != "unsigned").collect(),
    }
}

fn fixed_width(name: &str) -> Option<u8> {
    let bits = name
        .strip_prefix("uint")
        .or_else(|| name.strip_prefix("int"))?
        .strip_suffix("_t")?;
    match bits {
        "8" => Some(1),
        "16" => Some(2),
        "32" => Some(4),
        "64" => Some(8),
        _ => None,
    }
}

fn signed_max(width: u8) -> i64 {
    if width >= 8 {
        i64::MAX
    } else {
        (1i64 << (u32::from(width) * 8 - 1)) - 1
    }
}

fn unsigned_max(width: u8) -> Option<i64> {
    if width >= 8 {
        None
    } else {
        Some((1i64 << (u32::from(width) * 8)) - 1)
    }
}
