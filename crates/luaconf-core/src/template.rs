//! One-placeholder string templates.
//!
//! `LUA_QL(x)` is a function-like macro whose body interleaves string
//! literals with its parameter. It is kept as an ordered list of segments
//! and rendered once, instead of being spliced through a format string.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// A piece of a [`Template`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Literal(String),
    Placeholder,
}

/// Ordered literal/placeholder segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Build from segments, merging adjacent literals.
    pub fn new(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut template = Self::default();
        for segment in segments {
            template.push(segment);
        }
        template
    }

    /// The quoting every Lua release that defines `LUA_QL` uses: `'` x `'`.
    pub fn single_quoted() -> Self {
        Self::new([
            Segment::Literal("'".to_string()),
            Segment::Placeholder,
            Segment::Literal("'".to_string()),
        ])
    }

    pub fn push(&mut self, segment: Segment) {
        if let Segment::Literal(text) = &segment {
            if text.is_empty() {
                return;
            }
            if let Some(Segment::Literal(last)) = self.segments.last_mut() {
                last.push_str(text);
                return;
            }
        }
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder))
            .count()
    }

    /// Substitute `arg` for every placeholder.
    pub fn render(&self, arg: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder => out.push_str(arg),
            }
        }
        out
    }

    /// Debug form with the placeholder shown as `<x>`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    let _ = write!(out, "{text:?}");
                }
                Segment::Placeholder => out.push_str("<x>"),
            }
        }
        out
    }
}
