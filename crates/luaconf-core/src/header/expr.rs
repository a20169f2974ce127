//! C constant-expression evaluation for `#if` lines and integer macros.
//!
//! Arithmetic is done in `i64` with wrapping semantics; the unsigned
//! distinction C makes is not modelled.

use super::expand::{Mode, expand};
use super::lexer::Token;
use super::scan::Preprocessor;

/// Typedef names Lua headers take `sizeof` of, and the macro each one aliases.
const TYPEDEFS: &[(&str, &str)] = &[
    ("lua_Integer", "LUA_INTEGER"),
    ("lua_Number", "LUA_NUMBER"),
    ("lua_Unsigned", "LUA_UNSIGNED"),
    ("LUAI_UACINT", "LUA_INTEGER"),
    ("LUAI_UACNUMBER", "LUA_NUMBER"),
];

/// Expand and evaluate `tokens` as an `#if` expression.
pub(crate) fn evaluate(pp: &Preprocessor, tokens: &[Token]) -> Result<i64, String> {
    let tokens = expand(pp, tokens, Mode::Condition)?;
    let mut parser = Parser {
        pp,
        tokens: &tokens,
        pos: 0,
        dead: false,
    };
    let value = parser.ternary()?;
    match parser.peek() {
        None => Ok(value),
        Some(token) => Err(format!("unexpected `{token}` after expression")),
    }
}

/// `sizeof` of a type spelled by `tokens` (identifiers and `*`).
pub(crate) fn size_of(pp: &Preprocessor, tokens: &[Token]) -> Option<u8> {
    let spelling = spell_type(pp, tokens)?;
    pp.layout().size_of(&spelling)
}

/// Join a type's tokens into a spelling, resolving Lua typedef names.
pub(crate) fn spell_type(pp: &Preprocessor, tokens: &[Token]) -> Option<String> {
    let mut words: Vec<String> = Vec::new();
    for token in tokens {
        match token {
            Token::Ident(name) => match TYPEDEFS.iter().find(|(alias, _)| *alias == name.as_str()) {
                Some((_, target)) => {
                    let expanded = expand(pp, &[Token::Ident((*target).to_string())], Mode::Text)
                        .ok()?;
                    if expanded.len() == 1 && expanded[0].ident() == Some(*target) {
                        return None;
                    }
                    words.push(spell_type(pp, &expanded)?);
                }
                None => words.push(name.clone()),
            },
            Token::Punct(p) if p == "*" => words.push("*".to_string()),
            _ => return None,
        }
    }
    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

struct Parser<'a> {
    pp: &'a Preprocessor,
    tokens: &'a [Token],
    pos: usize,
    /// Inside an operand that short-circuiting discards; arithmetic errors are ignored.
    dead: bool,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn at(&self, punct: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(punct))
    }

    fn eat(&mut self, punct: &str) -> bool {
        if self.at(punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: &str) -> Result<(), String> {
        if self.eat(punct) {
            return Ok(());
        }
        match self.peek() {
            Some(token) => Err(format!("expected `{punct}`, found `{token}`")),
            None => Err(format!("expected `{punct}` at end of expression")),
        }
    }

    fn ternary(&mut self) -> Result<i64, String> {
        let cond = self.binary(0)?;
        if !self.eat("?") {
            return Ok(cond);
        }
        let then = self.operand(cond == 0, Self::ternary)?;
        self.expect(":")?;
        let otherwise = self.operand(cond != 0, Self::ternary)?;
        Ok(if cond != 0 { then } else { otherwise })
    }

    /// Parse an operand with `dead` set when its value is discarded.
    fn operand(
        &mut self,
        discarded: bool,
        parse: impl FnOnce(&mut Self) -> Result<i64, String>,
    ) -> Result<i64, String> {
        let outer = self.dead;
        self.dead |= discarded;
        let value = parse(self);
        self.dead = outer;
        value
    }

    /// Precedence climbing over the binary operators, loosest first.
    fn binary(&mut self, level: usize) -> Result<i64, String> {
        const LEVELS: &[&[&str]] = &[
            &["||"],
            &["&&"],
            &["|"],
            &["^"],
            &["&"],
            &["==", "!="],
            &["<", "<=", ">", ">="],
            &["<<", ">>"],
            &["+", "-"],
            &["*", "/", "%"],
        ];

        if level == LEVELS.len() {
            return self.unary();
        }

        let mut lhs = self.binary(level + 1)?;
        loop {
            let Some(op) = LEVELS[level].iter().find(|op| self.at(op)).copied() else {
                return Ok(lhs);
            };
            self.pos += 1;
            let short = (op == "&&" && lhs == 0) || (op == "||" && lhs != 0);
            let rhs = self.operand(short, |p| p.binary(level + 1))?;
            lhs = match apply(op, lhs, rhs) {
                Err(_) if self.dead => 0,
                value => value?,
            };
        }
    }

    fn unary(&mut self) -> Result<i64, String> {
        if self.eat("!") {
            return Ok(i64::from(self.unary()? == 0));
        }
        if self.eat("~") {
            return Ok(!self.unary()?);
        }
        if self.eat("-") {
            return Ok(self.unary()?.wrapping_neg());
        }
        if self.eat("+") {
            return self.unary();
        }
        if self.at("(") {
            if let Some(end) = self.cast_end() {
                self.pos = end;
                return self.unary();
            }
        }
        self.primary()
    }

    /// If a parenthesized type name starts here, the position after its `)`.
    fn cast_end(&self) -> Option<usize> {
        let close = self.tokens[self.pos..]
            .iter()
            .position(|t| t.is_punct(")"))?
            + self.pos;
        let inner = &self.tokens[self.pos + 1..close];
        let is_type = inner.first().is_some_and(|t| t.ident().is_some())
            && (size_of(self.pp, inner).is_some()
                || inner.iter().all(|t| t.ident() == Some("void")));
        is_type.then_some(close + 1)
    }

    fn primary(&mut self) -> Result<i64, String> {
        let Some(token) = self.peek().cloned() else {
            return Err("unexpected end of expression".to_string());
        };
        self.pos += 1;

        match token {
            Token::Int(v) | Token::Char(v) => Ok(v),
            Token::Punct(p) if p == "(" => {
                let value = self.ternary()?;
                self.expect(")")?;
                Ok(value)
            }
            Token::Ident(name) if name == "defined" => {
                let parenthesized = self.eat("(");
                let Some(operand) = self.peek().and_then(Token::ident).map(str::to_string)
                else {
                    return Err("`defined` needs a macro name".to_string());
                };
                self.pos += 1;
                if parenthesized {
                    self.expect(")")?;
                }
                Ok(i64::from(self.pp.is_defined(&operand)))
            }
            Token::Ident(name) if name == "sizeof" => {
                self.expect("(")?;
                let start = self.pos;
                while !self.at(")") {
                    if self.peek().is_none() {
                        return Err("unterminated `sizeof`".to_string());
                    }
                    self.pos += 1;
                }
                let inner = &self.tokens[start..self.pos];
                self.pos += 1;
                size_of(self.pp, inner)
                    .map(i64::from)
                    .ok_or_else(|| format!("unknown size of `{}`", join(inner)))
            }
            // Identifiers left after expansion are 0, except host symbols.
            Token::Ident(name) => Ok(self.pp.layout().symbol(&name).unwrap_or(0)),
            Token::Float(text) => Err(format!("floating constant `{text}` in integer expression")),
            Token::Str(_) => Err("string literal in integer expression".to_string()),
            other => Err(format!("unexpected `{other}`")),
        }
    }
}

fn apply(op: &str, lhs: i64, rhs: i64) -> Result<i64, String> {
    let value = match op {
        "||" => i64::from(lhs != 0 || rhs != 0),
        "&&" => i64::from(lhs != 0 && rhs != 0),
        "|" => lhs | rhs,
        "^" => lhs ^ rhs,
        "&" => lhs & rhs,
        "==" => i64::from(lhs == rhs),
        "!=" => i64::from(lhs != rhs),
        "<" => i64::from(lhs < rhs),
        "<=" => i64::from(lhs <= rhs),
        ">" => i64::from(lhs > rhs),
        ">=" => i64::from(lhs >= rhs),
        "<<" => lhs.wrapping_shl((rhs & 63) as u32),
        ">>" => lhs.wrapping_shr((rhs & 63) as u32),
        "+" => lhs.wrapping_add(rhs),
        "-" => lhs.wrapping_sub(rhs),
        "*" => lhs.wrapping_mul(rhs),
        "/" | "%" if rhs == 0 => return Err("division by zero".to_string()),
        "/" => lhs.wrapping_div(rhs),
        "%" => lhs.wrapping_rem(rhs),
        _ => return Err(format!("unknown operator `{op}`")),
    };
    Ok(value)
}

fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
