use crate::library::{DEFAULT_LIBRARY, LibraryName, LibraryNameError};

#[test]
fn default_is_lua() {
    assert_eq!(LibraryName::default().as_str(), DEFAULT_LIBRARY);
    assert_eq!(LibraryName::default().to_string(), "lua");
}

#[test]
fn accepts_distribution_names() {
    for name in ["lua", "lua5.1", "lua-5.4", "luajit-5.1", "lua54", "lua_static", "lua++"] {
        assert_eq!(LibraryName::parse(name).unwrap().as_str(), name);
    }
}

#[test]
fn rejects_names_that_would_break_the_literal() {
    assert_eq!(LibraryName::parse(""), Err(LibraryNameError::Empty));
    assert_eq!(
        LibraryName::parse("lua\"x"),
        Err(LibraryNameError::InvalidChar('"'))
    );
    assert_eq!(
        LibraryName::parse("lua\\x"),
        Err(LibraryNameError::InvalidChar('\\'))
    );
    assert_eq!(
        LibraryName::parse("lua 5.1"),
        Err(LibraryNameError::InvalidChar(' '))
    );
    assert_eq!(
        LibraryName::parse("lua\n"),
        Err(LibraryNameError::InvalidChar('\n'))
    );
    assert_eq!(LibraryName::parse("-lua"), Err(LibraryNameError::LeadingDash));
}

#[test]
fn error_messages() {
    let err = "lua/5.1".parse::<LibraryName>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"library name contains '/'; use ASCII letters, digits, `_`, `-`, `.` or `+`");
}
