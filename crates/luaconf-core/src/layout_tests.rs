use crate::layout::TargetLayout;

#[test]
fn lp64_integer_widths() {
    let layout = TargetLayout::LP64;
    assert_eq!(layout.integer_width("int"), Some(4));
    assert_eq!(layout.integer_width("long"), Some(8));
    assert_eq!(layout.integer_width("long int"), Some(8));
    assert_eq!(layout.integer_width("long long"), Some(8));
    assert_eq!(layout.integer_width("unsigned long long int"), Some(8));
    assert_eq!(layout.integer_width("ptrdiff_t"), Some(8));
    assert_eq!(layout.integer_width("short"), Some(2));
    assert_eq!(layout.integer_width("unsigned"), Some(4));
    assert_eq!(layout.integer_width("int32_t"), Some(4));
}

#[test]
fn llp64_long_is_four_bytes() {
    let layout = TargetLayout::LLP64;
    assert_eq!(layout.integer_width("long"), Some(4));
    assert_eq!(layout.integer_width("__int64"), Some(8));
    assert_eq!(layout.integer_width("ptrdiff_t"), Some(8));
}

#[test]
fn ilp32_pointer_sized_types() {
    let layout = TargetLayout::ILP32;
    assert_eq!(layout.integer_width("ptrdiff_t"), Some(4));
    assert_eq!(layout.size_of("void *"), Some(4));
    assert_eq!(layout.integer_width("long long"), Some(8));
}

#[test]
fn unknown_spellings() {
    let layout = TargetLayout::LP64;
    assert_eq!(layout.integer_width("lua_Integer"), None);
    assert_eq!(layout.integer_width("double"), None);
    assert_eq!(layout.float_width("long double"), None);
    assert_eq!(layout.float_width("int"), None);
}

#[test]
fn float_widths() {
    let layout = TargetLayout::LP64;
    assert_eq!(layout.float_width("float"), Some(4));
    assert_eq!(layout.float_width("double"), Some(8));
    assert_eq!(layout.size_of("double"), Some(8));
}

#[test]
fn host_symbols() {
    let layout = TargetLayout::LP64;
    assert_eq!(layout.symbol("BUFSIZ"), Some(8192));
    assert_eq!(layout.symbol("INT_MAX"), Some(2147483647));
    assert_eq!(layout.symbol("UINT_MAX"), Some(4294967295));
    assert_eq!(layout.symbol("LLONG_MAX"), Some(i64::MAX));
    assert_eq!(layout.symbol("ULLONG_MAX"), None);
    assert_eq!(layout.symbol("LUA_INTEGER"), None);
}

#[test]
fn for_target_picks_model_and_bufsiz() {
    assert_eq!(TargetLayout::for_target(64, "linux"), TargetLayout::LP64);
    assert_eq!(TargetLayout::for_target(64, "windows"), TargetLayout::LLP64);
    assert_eq!(TargetLayout::for_target(32, "linux"), TargetLayout::ILP32);
    assert_eq!(TargetLayout::for_target(64, "macos").bufsiz, 1024);
    assert_eq!(TargetLayout::for_target(32, "windows").bufsiz, 512);
}

#[test]
fn native_target_matches_this_build() {
    let native = TargetLayout::for_target(usize::BITS, std::env::consts::OS);
    assert_eq!(u32::from(native.pointer_width) * 8, usize::BITS);
}
