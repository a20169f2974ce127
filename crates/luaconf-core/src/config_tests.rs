use crate::config::{IntegerType, LuaConfig, NumberType};
use crate::layout::TargetLayout;

#[test]
fn reference_follows_layout() {
    let lp64 = LuaConfig::reference(&TargetLayout::LP64).unwrap();
    assert_eq!(lp64.integer, IntegerType::I64);
    assert_eq!(lp64.buffer_size, 8192);

    let ilp32 = LuaConfig::reference(&TargetLayout::ILP32).unwrap();
    assert_eq!(ilp32.integer, IntegerType::I32);

    let windows = LuaConfig::reference(&TargetLayout::LLP64).unwrap();
    assert_eq!(windows.buffer_size, 512);
    assert_eq!(windows.number, NumberType::F64);
}

#[test]
fn width_mapping() {
    assert_eq!(IntegerType::from_width(8), Some(IntegerType::I64));
    assert_eq!(IntegerType::from_width(4).map(IntegerType::rust_name), Some("i32"));
    assert_eq!(IntegerType::from_width(1), None);
    assert_eq!(NumberType::from_width(4), Some(NumberType::F32));
    assert_eq!(NumberType::from_width(16), None);
    assert_eq!(NumberType::from_width(8).map(NumberType::rust_name), Some("f64"));
}

#[test]
fn json_shape() {
    let config = LuaConfig::reference(&TargetLayout::LP64).unwrap();
    insta::assert_snapshot!(config.to_json().unwrap(), @r#"{"version":"Lua 5.1","release":"Lua 5.1.5","version_num":501,"integer":"i64","number":"f64","quote":[{"literal":"'"},"placeholder",{"literal":"'"}],"buffer_size":8192,"id_size":60,"min_stack":20}"#);
}

#[test]
fn json_is_read_back() {
    let config = LuaConfig::reference(&TargetLayout::ILP32).unwrap();
    let json = config.to_json().unwrap();
    assert!(!json.contains('\n'));
    assert_eq!(LuaConfig::from_json(&json).unwrap(), config);
}

#[test]
fn malformed_json_is_an_error() {
    let err = LuaConfig::from_json(r#"{"version":"Lua 5.1"}"#).unwrap_err();
    assert!(err.to_string().starts_with("invalid resolved configuration"));
}
