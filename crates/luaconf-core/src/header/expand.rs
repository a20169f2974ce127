//! Macro expansion with hide sets.
//!
//! Every token carries the names of the macros it was produced by; a name in
//! its own hide set is never expanded again. Replacements are pushed back in
//! front of the remaining input, so a replacement ending in a function-like
//! macro name picks up arguments that follow the original invocation.

use std::collections::VecDeque;

use super::lexer::{Lexed, Token, lex, quote};
use super::scan::{Macro, Preprocessor};

#[derive(Clone, Debug)]
struct Item {
    lexed: Lexed,
    hide: Vec<String>,
}

impl Item {
    fn new(lexed: Lexed) -> Self {
        Self {
            lexed,
            hide: Vec::new(),
        }
    }

    fn token(&self) -> &Token {
        &self.lexed.token
    }
}

/// How `defined` is treated while expanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Plain text: `defined` is an ordinary identifier.
    Text,
    /// `#if` expression: the operand of `defined` is left unexpanded.
    Condition,
}

/// Fully macro-expand `tokens`.
pub(crate) fn expand(
    pp: &Preprocessor,
    tokens: &[Token],
    mode: Mode,
) -> Result<Vec<Token>, String> {
    let input = tokens.iter().cloned().map(Lexed::from).collect();
    Ok(expand_spelled(pp, input, mode)?
        .into_iter()
        .map(|lexed| lexed.token)
        .collect())
}

/// Fully macro-expand `tokens`, keeping source spellings.
pub(crate) fn expand_spelled(
    pp: &Preprocessor,
    tokens: Vec<Lexed>,
    mode: Mode,
) -> Result<Vec<Lexed>, String> {
    let input = tokens.into_iter().map(Item::new).collect();
    Ok(expand_items(pp, input, mode)?
        .into_iter()
        .map(|item| item.lexed)
        .collect())
}

fn expand_items(
    pp: &Preprocessor,
    mut input: VecDeque<Item>,
    mode: Mode,
) -> Result<Vec<Item>, String> {
    let mut out = Vec::new();

    while let Some(item) = input.pop_front() {
        let Some(name) = item.token().ident() else {
            out.push(item);
            continue;
        };

        if mode == Mode::Condition && name == "defined" {
            out.push(item);
            copy_defined_operand(&mut input, &mut out);
            continue;
        }

        if item.hide.iter().any(|h| h == name) {
            out.push(item);
            continue;
        }

        let Some(mac) = pp.get(name) else {
            out.push(item);
            continue;
        };

        let name = name.to_string();
        let mut hide = item.hide.clone();
        hide.push(name.clone());

        let mut replacement = match &mac.params {
            None => body(&name, mac)?.to_vec(),
            Some(_) => {
                if !input.front().is_some_and(|next| next.token().is_punct("(")) {
                    out.push(item);
                    continue;
                }
                input.pop_front();
                let args = collect_args(&mut input, &name)?;
                substitute(pp, &name, mac, args, mode)?
            }
        };

        // The replacement sits where the invocation was written.
        if let Some(first) = replacement.first_mut() {
            first.space = item.lexed.space;
        }
        for lexed in replacement.into_iter().rev() {
            input.push_front(Item {
                lexed,
                hide: hide.clone(),
            });
        }
    }

    Ok(out)
}

fn body<'m>(name: &str, mac: &'m Macro) -> Result<&'m [Lexed], String> {
    mac.body
        .as_deref()
        .map_err(|e| format!("body of `{name}`: {e}"))
}

fn copy_defined_operand(input: &mut VecDeque<Item>, out: &mut Vec<Item>) {
    let parenthesized = input.front().is_some_and(|t| t.token().is_punct("("));
    let count = if parenthesized { 3 } else { 1 };
    for _ in 0..count {
        match input.pop_front() {
            Some(item) => out.push(item),
            None => break,
        }
    }
}

/// Arguments of an invocation whose `(` was already consumed, split on
/// top-level commas. Consumes the closing `)`.
fn collect_args(input: &mut VecDeque<Item>, name: &str) -> Result<Vec<Vec<Lexed>>, String> {
    let mut args = vec![Vec::new()];
    let mut depth = 0usize;

    loop {
        let Some(item) = input.pop_front() else {
            return Err(format!("unterminated invocation of `{name}`"));
        };
        let token = item.token();
        if token.is_punct("(") {
            depth += 1;
        } else if token.is_punct(")") {
            if depth == 0 {
                break;
            }
            depth -= 1;
        } else if token.is_punct(",") && depth == 0 {
            args.push(Vec::new());
            continue;
        }
        if let Some(last) = args.last_mut() {
            last.push(item.lexed);
        }
    }

    Ok(args)
}

fn substitute(
    pp: &Preprocessor,
    name: &str,
    mac: &Macro,
    mut args: Vec<Vec<Lexed>>,
    mode: Mode,
) -> Result<Vec<Lexed>, String> {
    let params = mac.params.as_deref().unwrap_or_default();
    let body = body(name, mac)?;

    if params.is_empty() && args.len() == 1 && args[0].is_empty() {
        args.clear();
    }
    if mac.variadic && args.len() > params.len() {
        let rest = args.split_off(params.len() - 1);
        let mut joined = Vec::new();
        for (i, arg) in rest.into_iter().enumerate() {
            if i > 0 {
                joined.push(Lexed {
                    space: false,
                    ..Lexed::from(Token::Punct(",".to_string()))
                });
            }
            joined.extend(arg);
        }
        args.push(joined);
    }
    if mac.variadic && args.len() + 1 == params.len() {
        args.push(Vec::new());
    }
    if args.len() != params.len() {
        return Err(format!(
            "`{name}` expects {} argument(s), got {}",
            params.len(),
            args.len()
        ));
    }

    let param_index = |lexed: &Lexed| {
        lexed
            .token
            .ident()
            .and_then(|id| params.iter().position(|p| p == id))
    };

    let mut out: Vec<Lexed> = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let lexed = &body[i];

        if lexed.token == Token::Hash {
            let Some(index) = body.get(i + 1).and_then(param_index) else {
                return Err(format!("`#` in `{name}` is not followed by a parameter"));
            };
            out.push(stringify(&args[index], lexed.space));
            i += 2;
            continue;
        }

        if lexed.token == Token::Paste {
            let Some(rhs) = body.get(i + 1) else {
                return Err(format!("`##` at the end of `{name}`"));
            };
            let mut rhs_tokens = match param_index(rhs) {
                Some(index) => args[index].clone(),
                None => vec![rhs.clone()],
            };
            let lhs = out.pop();
            let first = if rhs_tokens.is_empty() {
                None
            } else {
                Some(rhs_tokens.remove(0))
            };
            out.extend(paste(lhs, first)?);
            out.extend(rhs_tokens);
            i += 2;
            continue;
        }

        match param_index(lexed) {
            Some(index) => {
                let pasted_next = body.get(i + 1).is_some_and(|next| next.token == Token::Paste);
                let mut arg = if pasted_next {
                    args[index].clone()
                } else {
                    expand_spelled(pp, args[index].clone(), mode)?
                };
                if let Some(first) = arg.first_mut() {
                    first.space = lexed.space;
                }
                out.extend(arg);
            }
            None => out.push(lexed.clone()),
        }
        i += 1;
    }

    Ok(out)
}

/// `#arg`: the argument's spelling, one space wherever it had whitespace.
/// Quotes and backslashes only need escaping in the literal's own spelling.
fn stringify(arg: &[Lexed], space: bool) -> Lexed {
    let mut value = String::new();
    for (i, lexed) in arg.iter().enumerate() {
        if i > 0 && lexed.space {
            value.push(' ');
        }
        value.push_str(&lexed.text);
    }
    Lexed {
        text: quote(&value),
        token: Token::Str(value),
        space,
    }
}

fn paste(lhs: Option<Lexed>, rhs: Option<Lexed>) -> Result<Vec<Lexed>, String> {
    match (lhs, rhs) {
        (None, None) => Ok(Vec::new()),
        (Some(t), None) | (None, Some(t)) => Ok(vec![t]),
        (Some(l), Some(r)) => {
            let text = format!("{}{}", l.text, r.text);
            let mut tokens = lex(&text)?;
            if tokens.len() != 1 {
                return Err(format!(
                    "pasting `{}` and `{}` does not give a valid token",
                    l.text, r.text
                ));
            }
            if let Some(pasted) = tokens.first_mut() {
                pasted.space = l.space;
            }
            Ok(tokens)
        }
    }
}
