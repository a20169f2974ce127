//! Turning macro definitions into a [`LuaConfig`].

use tracing::{debug, warn};

use super::expand::{Mode, expand};
use super::expr;
use super::lexer::Token;
use super::scan::Preprocessor;
use crate::config::{IntegerType, LuaConfig, NumberType};
use crate::template::{Segment, Template};
use crate::{Error, Result};

/// Resolve every value the generator needs from the headers fed so far.
pub fn probe(pp: &Preprocessor) -> Result<LuaConfig> {
    let version = string_macro(pp, "LUA_VERSION")?;
    let release = string_macro(pp, "LUA_RELEASE")?;
    let version_num = int_macro(pp, "LUA_VERSION_NUM")?;
    let version_num = i32::try_from(version_num).map_err(|_| Error::OutOfRange {
        name: "LUA_VERSION_NUM".to_string(),
        value: version_num,
    })?;

    let integer_spelling = type_macro(pp, "LUA_INTEGER")?;
    let integer = pp
        .layout()
        .integer_width(&integer_spelling)
        .and_then(IntegerType::from_width)
        .ok_or_else(|| Error::UnsupportedType(integer_spelling.clone()))?;

    let number_spelling = type_macro(pp, "LUA_NUMBER")?;
    let number = pp
        .layout()
        .float_width(&number_spelling)
        .and_then(NumberType::from_width)
        .ok_or_else(|| Error::UnsupportedType(number_spelling.clone()))?;

    let config = LuaConfig {
        version,
        release,
        version_num,
        integer,
        number,
        quote: quote_template(pp)?,
        buffer_size: size_macro(pp, "LUAL_BUFFERSIZE")?,
        id_size: size_macro(pp, "LUA_IDSIZE")?,
        min_stack: size_macro(pp, "LUA_MINSTACK")?,
    };

    debug!(
        version = %config.version,
        integer = %integer_spelling,
        number = %number_spelling,
        quote = %config.quote.describe(),
        "probed lua configuration"
    );
    Ok(config)
}

fn object_macro(pp: &Preprocessor, name: &str) -> Result<Vec<Token>> {
    let Some(mac) = pp.get(name) else {
        return Err(Error::MissingMacro(name.to_string()));
    };
    if mac.params.is_some() {
        return Err(Error::Shape {
            name: name.to_string(),
            expected: "an object-like macro",
        });
    }
    expand(pp, &[Token::Ident(name.to_string())], Mode::Text).map_err(|e| expression(name, e))
}

fn string_macro(pp: &Preprocessor, name: &str) -> Result<String> {
    let tokens = object_macro(pp, name)?;
    let mut value = String::new();
    for token in &tokens {
        let Token::Str(piece) = token else {
            return Err(Error::Shape {
                name: name.to_string(),
                expected: "string literals",
            });
        };
        value.push_str(piece);
    }
    if tokens.is_empty() {
        return Err(Error::Shape {
            name: name.to_string(),
            expected: "string literals",
        });
    }
    Ok(value)
}

fn int_macro(pp: &Preprocessor, name: &str) -> Result<i64> {
    if !pp.is_defined(name) {
        return Err(Error::MissingMacro(name.to_string()));
    }
    expr::evaluate(pp, &[Token::Ident(name.to_string())]).map_err(|e| expression(name, e))
}

fn size_macro(pp: &Preprocessor, name: &str) -> Result<u64> {
    let value = int_macro(pp, name)?;
    u64::try_from(value).map_err(|_| Error::OutOfRange {
        name: name.to_string(),
        value,
    })
}

fn type_macro(pp: &Preprocessor, name: &str) -> Result<String> {
    let tokens = object_macro(pp, name)?;
    expr::spell_type(pp, &tokens).ok_or_else(|| Error::Shape {
        name: name.to_string(),
        expected: "a C type name",
    })
}

/// `LUA_QL(x)`, recovered by invoking the macro on a placeholder token.
fn quote_template(pp: &Preprocessor) -> Result<Template> {
    const NAME: &str = "LUA_QL";

    let Some(mac) = pp.get(NAME) else {
        warn!("LUA_QL is not defined by these headers; using '<x>' quoting");
        return Ok(Template::single_quoted());
    };
    if mac.params.as_ref().is_none_or(|p| p.len() != 1) {
        return Err(Error::Shape {
            name: NAME.to_string(),
            expected: "a one-parameter function-like macro",
        });
    }

    let invocation = [
        Token::Ident(NAME.to_string()),
        Token::Punct("(".to_string()),
        Token::Placeholder,
        Token::Punct(")".to_string()),
    ];
    let tokens = expand(pp, &invocation, Mode::Text).map_err(|e| expression(NAME, e))?;

    let mut template = Template::default();
    for token in tokens {
        match token {
            Token::Str(text) => template.push(Segment::Literal(text)),
            Token::Placeholder => template.push(Segment::Placeholder),
            _ => {
                return Err(Error::Shape {
                    name: NAME.to_string(),
                    expected: "string literals around its parameter",
                });
            }
        }
    }
    if template.placeholder_count() != 1 {
        return Err(Error::Shape {
            name: NAME.to_string(),
            expected: "a single-placeholder template",
        });
    }
    Ok(template)
}

fn expression(name: &str, message: String) -> Error {
    Error::Expression(format!("{name}: {message}"))
}
