//! Conformance cases for the array flattening primitive
//!
//! Each case is a named check transcribed from the host-engine fixture for
//! `Array.prototype.flat`: the descriptor assertions, the full matrix of
//! depth-argument shapes against the three-level input `[1, [2], [[3]]]`,
//! the TypeError scenarios, and the structural properties (hole elision,
//! idempotence, depth composition).

use vesper_core::builtin::{array, describe_method, lookup_builtin_method};
use vesper_core::object::{
    FunctionObject, NullProtoObject, PatternObject, PlainObject, ProxyObject,
};
use vesper_core::{flatten, CoercionError, Sequence, Value};

/// A single named conformance check
pub struct ConformanceCase {
    /// Stable case name, usable as a filter pattern
    pub name: &'static str,
    /// The check itself; a failure message on Err
    pub run: fn() -> Result<(), String>,
}

/// All conformance cases, in fixture order
pub fn cases() -> Vec<ConformanceCase> {
    vec![
        ConformanceCase { name: "descriptor-length", run: descriptor_length },
        ConformanceCase { name: "descriptor-name", run: descriptor_name },
        ConformanceCase { name: "depth-default", run: depth_default },
        ConformanceCase { name: "depth-one", run: depth_one },
        ConformanceCase { name: "depth-true", run: depth_true },
        ConformanceCase { name: "depth-undefined", run: depth_undefined },
        ConformanceCase { name: "depth-negative-infinity", run: depth_negative_infinity },
        ConformanceCase { name: "depth-negative-one", run: depth_negative_one },
        ConformanceCase { name: "depth-negative-zero", run: depth_negative_zero },
        ConformanceCase { name: "depth-zero", run: depth_zero },
        ConformanceCase { name: "depth-false", run: depth_false },
        ConformanceCase { name: "depth-null", run: depth_null },
        ConformanceCase { name: "depth-empty-string", run: depth_empty_string },
        ConformanceCase { name: "depth-string-foo", run: depth_string_foo },
        ConformanceCase { name: "depth-pattern", run: depth_pattern },
        ConformanceCase { name: "depth-empty-array", run: depth_empty_array },
        ConformanceCase { name: "depth-plain-object", run: depth_plain_object },
        ConformanceCase { name: "depth-trapless-proxy", run: depth_trapless_proxy },
        ConformanceCase { name: "depth-arrow-function", run: depth_arrow_function },
        ConformanceCase { name: "depth-constructor", run: depth_constructor },
        ConformanceCase { name: "depth-two", run: depth_two },
        ConformanceCase { name: "depth-infinity", run: depth_infinity },
        ConformanceCase { name: "depth-symbol-throws", run: depth_symbol_throws },
        ConformanceCase { name: "depth-null-proto-throws", run: depth_null_proto_throws },
        ConformanceCase { name: "holes-elided", run: holes_elided },
        ConformanceCase { name: "idempotent-at-full-depth", run: idempotent_at_full_depth },
        ConformanceCase { name: "depth-composition", run: depth_composition },
    ]
}

// [1, [2], [[3]]]
fn input() -> Sequence {
    Sequence::from_values(vec![
        Value::number(1.0),
        Value::sequence(Sequence::from_values(vec![Value::number(2.0)])),
        Value::sequence(Sequence::from_values(vec![Value::sequence(
            Sequence::from_values(vec![Value::number(3.0)]),
        )])),
    ])
}

// [1, 2, [3]]
fn one_level() -> Sequence {
    Sequence::from_values(vec![
        Value::number(1.0),
        Value::number(2.0),
        Value::sequence(Sequence::from_values(vec![Value::number(3.0)])),
    ])
}

// [1, 2, 3]
fn fully_flat() -> Sequence {
    Sequence::from_values(vec![
        Value::number(1.0),
        Value::number(2.0),
        Value::number(3.0),
    ])
}

fn expect_flat(depth: Option<Value>, expected: &Sequence) -> Result<(), String> {
    let actual = flatten(&input(), depth.as_ref())
        .map_err(|e| format!("unexpected coercion failure: {e}"))?;
    if actual.structurally_equals(expected) {
        Ok(())
    } else {
        Err(format!("got {actual}, expected {expected}"))
    }
}

fn expect_type_error(depth: Value) -> Result<(), String> {
    match flatten(&input(), Some(&depth)) {
        Err(CoercionError::SymbolToNumber) | Err(CoercionError::NoPrimitiveConversion) => Ok(()),
        Err(other) => Err(format!("wrong error kind: {other}")),
        Ok(result) => Err(format!("expected a TypeError, got {result}")),
    }
}

fn check(cond: bool, message: &str) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

fn descriptor_length() -> Result<(), String> {
    let desc = describe_method(array::FLAT).ok_or("flat descriptor missing")?;
    check(desc.length == 0, "flat.length must be 0")
}

fn descriptor_name() -> Result<(), String> {
    let desc = describe_method(array::FLAT).ok_or("flat descriptor missing")?;
    check(desc.name == "flat", "flat.name must be 'flat'")?;
    check(
        lookup_builtin_method("Array", "flat") == Some(array::FLAT),
        "name lookup must resolve flat",
    )
}

fn depth_default() -> Result<(), String> {
    expect_flat(None, &one_level())
}

fn depth_one() -> Result<(), String> {
    expect_flat(Some(Value::number(1.0)), &one_level())
}

fn depth_true() -> Result<(), String> {
    expect_flat(Some(Value::Bool(true)), &one_level())
}

fn depth_undefined() -> Result<(), String> {
    expect_flat(Some(Value::Undefined), &one_level())
}

fn depth_negative_infinity() -> Result<(), String> {
    expect_flat(Some(Value::number(f64::NEG_INFINITY)), &input())
}

fn depth_negative_one() -> Result<(), String> {
    expect_flat(Some(Value::number(-1.0)), &input())
}

fn depth_negative_zero() -> Result<(), String> {
    expect_flat(Some(Value::number(-0.0)), &input())
}

fn depth_zero() -> Result<(), String> {
    expect_flat(Some(Value::number(0.0)), &input())
}

fn depth_false() -> Result<(), String> {
    expect_flat(Some(Value::Bool(false)), &input())
}

fn depth_null() -> Result<(), String> {
    expect_flat(Some(Value::Null), &input())
}

fn depth_empty_string() -> Result<(), String> {
    expect_flat(Some(Value::string("")), &input())
}

fn depth_string_foo() -> Result<(), String> {
    expect_flat(Some(Value::string("foo")), &input())
}

fn depth_pattern() -> Result<(), String> {
    let pattern = PatternObject::new(".").map_err(|e| e.to_string())?;
    expect_flat(Some(Value::object(pattern)), &input())
}

fn depth_empty_array() -> Result<(), String> {
    expect_flat(Some(Value::sequence(Sequence::new())), &input())
}

fn depth_plain_object() -> Result<(), String> {
    expect_flat(Some(Value::object(PlainObject::new())), &input())
}

fn depth_trapless_proxy() -> Result<(), String> {
    let proxy = ProxyObject::new(PlainObject::new());
    expect_flat(Some(Value::object(proxy.clone())), &input())?;
    check(
        proxy.conversion_count() == 1,
        "proxy conversion hook must fire exactly once",
    )
}

fn depth_arrow_function() -> Result<(), String> {
    expect_flat(Some(Value::object(FunctionObject::arrow("(x) => x"))), &input())
}

fn depth_constructor() -> Result<(), String> {
    expect_flat(Some(Value::object(FunctionObject::new("String", 1))), &input())
}

fn depth_two() -> Result<(), String> {
    expect_flat(Some(Value::number(2.0)), &fully_flat())
}

fn depth_infinity() -> Result<(), String> {
    expect_flat(Some(Value::number(f64::INFINITY)), &fully_flat())
}

fn depth_symbol_throws() -> Result<(), String> {
    expect_type_error(Value::symbol(None))
}

fn depth_null_proto_throws() -> Result<(), String> {
    expect_type_error(Value::object(NullProtoObject::new()))
}

fn holes_elided() -> Result<(), String> {
    let mut inner = Sequence::new();
    inner.push_hole();
    inner.push(Value::number(2.0));

    let mut holey = Sequence::new();
    holey.push(Value::number(1.0));
    holey.push_hole();
    holey.push(Value::sequence(inner));

    let result = flatten(&holey, None).map_err(|e| e.to_string())?;
    let expected = Sequence::from_values(vec![Value::number(1.0), Value::number(2.0)]);
    check(
        result.structurally_equals(&expected),
        &format!("holes must vanish: got {result}"),
    )
}

fn idempotent_at_full_depth() -> Result<(), String> {
    let infinity = Value::number(f64::INFINITY);
    let once = flatten(&input(), Some(&infinity)).map_err(|e| e.to_string())?;
    let twice = flatten(&once, Some(&infinity)).map_err(|e| e.to_string())?;
    check(
        once.structurally_equals(&twice),
        "flat(Infinity) must be idempotent",
    )
}

fn depth_composition() -> Result<(), String> {
    for k in 0..4u32 {
        let partial =
            flatten(&input(), Some(&Value::number(k as f64))).map_err(|e| e.to_string())?;
        let composed =
            flatten(&partial, Some(&Value::number(1.0))).map_err(|e| e.to_string())?;
        let direct = flatten(&input(), Some(&Value::number((k + 1) as f64)))
            .map_err(|e| e.to_string())?;
        check(
            composed.structurally_equals(&direct),
            &format!("flat({k}) then flat(1) must equal flat({})", k + 1),
        )?;
    }
    Ok(())
}
