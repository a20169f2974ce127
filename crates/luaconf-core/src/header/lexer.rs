//! Tokenizer for directive lines and macro bodies.

use std::fmt;

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\f\r\n]+")]
enum Lexeme {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*", |lex| parse_int(lex.slice()))]
    #[regex(r"[0-9]+[uUlL]*", |lex| parse_int(lex.slice()))]
    Int(i64),

    #[regex(r"[0-9]*\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+\.([eE][+-]?[0-9]+)?[fFlL]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFlL]?", |lex| lex.slice().to_string())]
    Float(String),

    #[regex(r#""(?:[^"\\\n]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),

    #[regex(r"'(?:[^'\\\n]|\\.)+'", |lex| char_value(lex.slice()))]
    Char(i64),

    #[token("##")]
    Paste,

    #[token("#")]
    Hash,

    #[regex(r"<<|>>|<=|>=|==|!=|&&|\|\||->|\+\+|--|\.\.\.", |lex| lex.slice().to_string())]
    #[regex(r"[-+*/%<>=!~&|^?:,;.(){}\[\]]", |lex| lex.slice().to_string())]
    Punct(String),
}

/// Preprocessing token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    Int(i64),
    Float(String),
    Str(String),
    Char(i64),
    Punct(String),
    Hash,
    Paste,
    /// Stand-in argument used to recover a function-like macro's template.
    Placeholder,
}

impl Token {
    pub(crate) fn is_punct(&self, p: &str) -> bool {
        matches!(self, Token::Punct(s) if s == p)
    }

    pub(crate) fn ident(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Float(s) | Token::Punct(s) => f.write_str(s),
            Token::Int(v) | Token::Char(v) => write!(f, "{v}"),
            Token::Str(s) => f.write_str(&quote(s)),
            Token::Hash => f.write_str("#"),
            Token::Paste => f.write_str("##"),
            Token::Placeholder => f.write_str("{}"),
        }
    }
}

/// A token with the text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Lexed {
    pub token: Token,
    /// Source spelling, reproduced by `#` stringification.
    pub text: String,
    /// Whitespace separated this token from the previous one.
    pub space: bool,
}

impl From<Token> for Lexed {
    /// Tokens made outside the lexer are spelled by their display form.
    fn from(token: Token) -> Self {
        Self {
            text: token.to_string(),
            token,
            space: true,
        }
    }
}

fn token(lexeme: Lexeme) -> Token {
    match lexeme {
        Lexeme::Ident(s) => Token::Ident(s),
        Lexeme::Int(v) => Token::Int(v),
        Lexeme::Float(s) => Token::Float(s),
        Lexeme::Str(s) => Token::Str(s),
        Lexeme::Char(v) => Token::Char(v),
        Lexeme::Paste => Token::Paste,
        Lexeme::Hash => Token::Hash,
        Lexeme::Punct(s) => Token::Punct(s),
    }
}

/// Splits text into spelled tokens. Fails on the first character that starts no token.
pub(crate) fn lex(text: &str) -> Result<Vec<Lexed>, String> {
    let mut lexer = Lexeme::lexer(text);
    let mut tokens = Vec::new();
    let mut end = 0;

    while let Some(lexeme) = lexer.next() {
        let Ok(lexeme) = lexeme else {
            return Err(format!("unexpected input `{}`", lexer.slice()));
        };
        let span = lexer.span();
        tokens.push(Lexed {
            token: token(lexeme),
            text: lexer.slice().to_string(),
            space: span.start > end,
        });
        end = span.end;
    }

    Ok(tokens)
}

/// Like [`lex`], keeping only the tokens.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    Ok(lex(text)?.into_iter().map(|lexed| lexed.token).collect())
}

/// Spell `value` as a C string literal.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn parse_int(text: &str) -> Option<i64> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse::<u64>().ok()?
    };
    // C wraps unsigned constants; keep the bit pattern.
    Some(value as i64)
}

fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            'x' => {
                let mut value = 0u32;
                while let Some(d) = chars.peek().and_then(|d| d.to_digit(16)) {
                    value = value * 16 + d;
                    chars.next();
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            '0'..='7' => {
                let mut value = escaped.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value).unwrap_or('\u{fffd}'));
            }
            other => out.push(other),
        }
    }

    out
}

fn char_value(literal: &str) -> i64 {
    let text = unescape(literal);
    text.chars().next().map_or(0, |c| i64::from(u32::from(c)))
}
