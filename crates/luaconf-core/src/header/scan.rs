//! Directive scanning: comments, line continuations, `#define`, and the
//! conditional stack.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::expr;
use super::lexer::{Lexed, lex, tokenize};
use crate::layout::TargetLayout;
use crate::{Error, Result};

/// A recorded `#define`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Macro {
    /// `None` for object-like macros.
    pub params: Option<Vec<String>>,
    pub variadic: bool,
    /// Bodies that do not tokenize are kept as the error and only reported
    /// if the macro is ever expanded.
    pub body: std::result::Result<Vec<Lexed>, String>,
}

/// One open `#if` group.
#[derive(Clone, Copy, Debug)]
struct Group {
    /// Whether the branch being read is live.
    taking: bool,
    /// Whether some branch of this group has already been taken (or the
    /// whole group sits inside a dead branch).
    done: bool,
    seen_else: bool,
}

/// Accumulates macro definitions from header text the way a C
/// preprocessor would, without emitting any output.
#[derive(Clone, Debug)]
pub struct Preprocessor {
    layout: TargetLayout,
    macros: HashMap<String, Macro>,
}

impl Preprocessor {
    pub fn new(layout: TargetLayout) -> Self {
        Self {
            layout,
            macros: HashMap::new(),
        }
    }

    pub fn layout(&self) -> &TargetLayout {
        &self.layout
    }

    /// Predefine an object-like macro, like `-DNAME=body`.
    pub fn define(&mut self, name: &str, body: &str) {
        self.macros.insert(
            name.to_string(),
            Macro {
                params: None,
                variadic: false,
                body: lex(body),
            },
        );
    }

    /// `defined(name)`: a macro, or a symbol the target's system headers provide.
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name) || self.layout.symbol(name).is_some()
    }

    /// Names of all macros currently defined, sorted.
    #[cfg(test)]
    pub(crate) fn macro_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.macros.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    /// Read one header. `file` only labels errors.
    pub fn feed(&mut self, file: &str, text: &str) -> Result<()> {
        let text = strip_comments(file, text)?;
        let mut groups: Vec<Group> = Vec::new();

        for (line_no, line) in logical_lines(&text) {
            let Some(directive) = line.trim_start().strip_prefix('#') else {
                continue;
            };
            let directive = directive.trim_start();
            let split = directive
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(directive.len());
            let (name, rest) = directive.split_at(split);
            let rest = rest.trim();
            let live = groups.iter().all(|g| g.taking);

            let fail = |message: String| Error::Directive {
                file: file.to_string(),
                line: line_no,
                message,
            };

            match name {
                "if" | "ifdef" | "ifndef" => {
                    let taking = live && self.condition(name, rest).map_err(fail)?;
                    groups.push(Group {
                        taking,
                        done: taking || !live,
                        seen_else: false,
                    });
                }
                "elif" => {
                    let depth = groups.len();
                    let Some(group) = groups.last() else {
                        return Err(fail("#elif without #if".to_string()));
                    };
                    if group.seen_else {
                        return Err(fail("#elif after #else".to_string()));
                    }
                    let parent_live = groups[..depth - 1].iter().all(|g| g.taking);
                    let taking =
                        !group.done && parent_live && self.condition("if", rest).map_err(fail)?;
                    let group = &mut groups[depth - 1];
                    group.taking = taking;
                    group.done |= taking;
                }
                "else" => {
                    let Some(group) = groups.last_mut() else {
                        return Err(fail("#else without #if".to_string()));
                    };
                    if group.seen_else {
                        return Err(fail("duplicate #else".to_string()));
                    }
                    group.taking = !group.done;
                    group.done = true;
                    group.seen_else = true;
                }
                "endif" => {
                    if groups.pop().is_none() {
                        return Err(fail("#endif without #if".to_string()));
                    }
                }
                _ if !live => {}
                "define" => self.record_define(rest).map_err(fail)?,
                "undef" => {
                    self.macros.remove(first_word(rest).map_err(fail)?);
                }
                "error" => return Err(fail(format!("#error {rest}"))),
                "" | "include" | "include_next" | "pragma" | "line" | "warning" | "ident" => {}
                other => trace!(directive = other, file, line = line_no, "ignored directive"),
            }
        }

        if !groups.is_empty() {
            return Err(Error::UnbalancedConditional {
                file: file.to_string(),
                open: groups.len(),
            });
        }

        debug!(file, macros = self.macros.len(), "header scanned");
        Ok(())
    }

    fn condition(&self, kind: &str, rest: &str) -> std::result::Result<bool, String> {
        match kind {
            "ifdef" => Ok(self.is_defined(first_word(rest)?)),
            "ifndef" => Ok(!self.is_defined(first_word(rest)?)),
            _ => {
                let tokens = tokenize(rest)?;
                if tokens.is_empty() {
                    return Err("#if with no expression".to_string());
                }
                Ok(expr::evaluate(self, &tokens)? != 0)
            }
        }
    }

    fn record_define(&mut self, rest: &str) -> std::result::Result<(), String> {
        let name_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (name, tail) = rest.split_at(name_len);
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(format!("invalid macro name in `#define {rest}`"));
        }

        // A parameter list must follow the name with no space in between.
        let (params, variadic, body) = match tail.strip_prefix('(') {
            Some(after) => {
                let close = after
                    .find(')')
                    .ok_or_else(|| format!("unterminated parameter list for `{name}`"))?;
                let (params, variadic) = parse_params(&after[..close])?;
                (Some(params), variadic, &after[close + 1..])
            }
            None => (None, false, tail),
        };

        trace!(name, body = body.trim(), "define");
        self.macros.insert(
            name.to_string(),
            Macro {
                params,
                variadic,
                body: lex(body),
            },
        );
        Ok(())
    }
}

fn first_word(rest: &str) -> std::result::Result<&str, String> {
    rest.split_whitespace()
        .next()
        .ok_or_else(|| "missing macro name".to_string())
}

fn parse_params(list: &str) -> std::result::Result<(Vec<String>, bool), String> {
    let mut params = Vec::new();
    let mut variadic = false;

    for raw in list.split(',').map(str::trim) {
        if raw.is_empty() && params.is_empty() && !list.contains(',') {
            break;
        }
        if variadic {
            return Err("`...` must be the last parameter".to_string());
        }
        if raw == "..." {
            variadic = true;
            params.push("__VA_ARGS__".to_string());
            continue;
        }
        let valid = raw.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
            && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(format!("invalid parameter `{raw}`"));
        }
        params.push(raw.to_string());
    }

    Ok((params, variadic))
}

/// Replace comments with whitespace, keeping newlines so line numbers hold.
fn strip_comments(file: &str, text: &str) -> Result<String> {
    #[derive(PartialEq)]
    enum State {
        Code,
        Str(char),
        LineComment,
        BlockComment(usize),
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            line += 1;
        }
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                    out.push(' ');
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment(line);
                    out.push(' ');
                }
                '"' | '\'' => {
                    state = State::Str(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::Str(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        if next == '\n' {
                            line += 1;
                        }
                        out.push(next);
                    }
                } else if c == quote || c == '\n' {
                    state = State::Code;
                }
            }
            State::LineComment => {
                // A trailing backslash splices the next line into the comment.
                if c == '\\' {
                    if chars.peek() == Some(&'\r') {
                        chars.next();
                    }
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        line += 1;
                        out.push('\n');
                    }
                } else if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment(_) => {
                if c == '\n' {
                    out.push('\n');
                } else if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
        }
    }

    if let State::BlockComment(start) = state {
        return Err(Error::UnterminatedComment {
            file: file.to_string(),
            line: start,
        });
    }
    Ok(out)
}

/// Physical lines joined across trailing backslashes, with the number of
/// the first physical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (i, raw) in text.lines().enumerate() {
        if current.is_empty() {
            start = i + 1;
        }
        match raw.strip_suffix('\\') {
            Some(head) => {
                current.push_str(head);
                current.push(' ');
            }
            None => {
                current.push_str(raw);
                lines.push((start, std::mem::take(&mut current)));
            }
        }
    }
    if !current.is_empty() {
        lines.push((start, current));
    }

    lines
}
