use indoc::indoc;

use super::expr::{evaluate, spell_type};
use super::lexer::tokenize;
use super::scan::Preprocessor;
use crate::layout::TargetLayout;

fn eval_in(pp: &Preprocessor, src: &str) -> Result<i64, String> {
    evaluate(pp, &tokenize(src)?)
}

fn eval(src: &str) -> Result<i64, String> {
    eval_in(&Preprocessor::new(TargetLayout::LP64), src)
}

fn with_headers(layout: TargetLayout, text: &str) -> Preprocessor {
    let mut pp = Preprocessor::new(layout);
    pp.feed("test.h", text).unwrap();
    pp
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval("1 + 2 * 3"), Ok(7));
    assert_eq!(eval("(1 + 2) * 3"), Ok(9));
    assert_eq!(eval("10 - 4 - 3"), Ok(3));
    assert_eq!(eval("1 << 4 + 1"), Ok(32));
    assert_eq!(eval("1 | 2 ^ 3 & 1"), Ok(3));
    assert_eq!(eval("5 > 3 && 2 < 1 || 1"), Ok(1));
}

#[test]
fn integer_literals() {
    assert_eq!(eval("0x80"), Ok(128));
    assert_eq!(eval("010"), Ok(8));
    assert_eq!(eval("0"), Ok(0));
    assert_eq!(eval("2147483640L"), Ok(2147483640));
    assert_eq!(eval("10UL"), Ok(10));
    assert_eq!(eval("'A'"), Ok(65));
}

#[test]
fn unary_operators() {
    assert_eq!(eval("!0"), Ok(1));
    assert_eq!(eval("!7"), Ok(0));
    assert_eq!(eval("~0"), Ok(-1));
    assert_eq!(eval("-(-3)"), Ok(3));
    assert_eq!(eval("+4"), Ok(4));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(eval("10 / 3"), Ok(3));
    assert_eq!(eval("-7 / 2"), Ok(-3));
    assert_eq!(eval("-5 % 3"), Ok(-2));
}

#[test]
fn division_by_zero() {
    assert_eq!(eval("1 / 0"), Err("division by zero".to_string()));
    assert_eq!(eval("1 % (2 - 2)"), Err("division by zero".to_string()));
}

#[test]
fn ternary() {
    assert_eq!(eval("1 ? 2 : 3"), Ok(2));
    assert_eq!(eval("0 ? 2 : 0 ? 3 : 4"), Ok(4));
}

#[test]
fn short_circuit_skips_discarded_operands() {
    assert_eq!(eval("0 && 1 / 0"), Ok(0));
    assert_eq!(eval("1 || (1 % 0)"), Ok(1));
    assert_eq!(eval("0 ? 1 / 0 : 7"), Ok(7));
    assert_eq!(eval("1 && 1 / 0"), Err("division by zero".to_string()));
}

#[test]
fn unknown_identifiers_are_zero() {
    assert_eq!(eval("LUA_USE_APICHECK"), Ok(0));
    assert_eq!(eval("LUA_USE_APICHECK + 1"), Ok(1));
}

#[test]
fn defined_forms() {
    let pp = with_headers(TargetLayout::LP64, "#define LUA_COMPAT_ALL\n#define ZERO 0\n");
    assert_eq!(eval_in(&pp, "defined(LUA_COMPAT_ALL)"), Ok(1));
    assert_eq!(eval_in(&pp, "defined LUA_COMPAT_ALL"), Ok(1));
    assert_eq!(eval_in(&pp, "defined(ZERO)"), Ok(1));
    assert_eq!(eval_in(&pp, "!defined(LUA_ANSI)"), Ok(1));
    assert_eq!(eval_in(&pp, "defined(INT_MAX)"), Ok(1));
}

#[test]
fn defined_operand_is_not_expanded() {
    let pp = with_headers(TargetLayout::LP64, "#define ALIAS MISSING\n");
    assert_eq!(eval_in(&pp, "defined(ALIAS)"), Ok(1));
    assert_eq!(eval_in(&pp, "defined(MISSING)"), Ok(0));
}

#[test]
fn limits_follow_layout() {
    let lp64 = Preprocessor::new(TargetLayout::LP64);
    assert_eq!(eval_in(&lp64, "INT_MAX-20 < 32760"), Ok(0));
    assert_eq!(eval_in(&lp64, "(UINT_MAX >> 30) >= 3"), Ok(1));
    assert_eq!(eval_in(&lp64, "LONG_MAX == LLONG_MAX"), Ok(1));

    let llp64 = Preprocessor::new(TargetLayout::LLP64);
    assert_eq!(eval_in(&llp64, "LONG_MAX == LLONG_MAX"), Ok(0));
    assert_eq!(eval_in(&llp64, "BUFSIZ"), Ok(512));
}

#[test]
fn sizeof_and_casts() {
    let text = "#define LUA_INTEGER long long\n#define LUA_NUMBER double\n";

    let pp = with_headers(TargetLayout::LP64, text);
    assert_eq!(eval_in(&pp, "sizeof(void*)"), Ok(8));
    assert_eq!(eval_in(&pp, "sizeof(int)"), Ok(4));
    assert_eq!(eval_in(&pp, "sizeof(lua_Integer)"), Ok(8));
    assert_eq!(
        eval_in(&pp, "((int)(16 * sizeof(void*) * sizeof(lua_Number)))"),
        Ok(1024)
    );
    assert_eq!(eval_in(&pp, "(long)(3) + (void)0"), Ok(3));

    let pp = with_headers(TargetLayout::ILP32, text);
    assert_eq!(eval_in(&pp, "sizeof(void *)"), Ok(4));
    assert_eq!(
        eval_in(&pp, "((int)(16 * sizeof(void*) * sizeof(lua_Number)))"),
        Ok(512)
    );
}

#[test]
fn sizeof_unknown_type() {
    let pp = Preprocessor::new(TargetLayout::LP64);
    assert_eq!(
        eval_in(&pp, "sizeof(struct lua_State)"),
        Err("unknown size of `struct lua_State`".to_string())
    );
    assert!(eval_in(&pp, "sizeof(lua_Integer)").is_err());
}

#[test]
fn expression_errors() {
    assert_eq!(
        eval("1.5 > 1"),
        Err("floating constant `1.5` in integer expression".to_string())
    );
    assert_eq!(
        eval("\"x\""),
        Err("string literal in integer expression".to_string())
    );
    assert_eq!(eval("(1 + 2"), Err("expected `)` at end of expression".to_string()));
    assert_eq!(eval("1 2"), Err("unexpected `2` after expression".to_string()));
    assert_eq!(eval("1 +"), Err("unexpected end of expression".to_string()));
}

#[test]
fn macros_expand_inside_expressions() {
    let pp = with_headers(
        TargetLayout::LP64,
        indoc! {"
            #define LUA_INT_INT		1
            #define LUA_INT_LONGLONG	3
            #define LUA_INT_DEFAULT		LUA_INT_LONGLONG
            #define LUA_INT_TYPE	LUA_INT_DEFAULT
            #define TWICE(x) ((x) * 2)
        "},
    );
    assert_eq!(eval_in(&pp, "LUA_INT_TYPE == LUA_INT_LONGLONG"), Ok(1));
    assert_eq!(eval_in(&pp, "LUA_INT_TYPE == LUA_INT_INT"), Ok(0));
    assert_eq!(eval_in(&pp, "TWICE(LUA_INT_TYPE + 1)"), Ok(8));
}

#[test]
fn spells_types_through_typedef_names() {
    let pp = with_headers(
        TargetLayout::LP64,
        "#define LUA_INTEGER ptrdiff_t\n#define LUA_NUMBER double\n",
    );
    let spell = |src: &str| spell_type(&pp, &tokenize(src).unwrap());
    assert_eq!(spell("unsigned long"), Some("unsigned long".to_string()));
    assert_eq!(spell("lua_Integer"), Some("ptrdiff_t".to_string()));
    assert_eq!(spell("lua_Number *"), Some("double *".to_string()));
    assert_eq!(spell("lua_Unsigned"), None);
    assert_eq!(spell("1"), None);
}
