//! Checking raw parameter maps against a solver schema.
//!
//! Validation never fails fast: every declared field is examined and every
//! failure is recorded, followed by one [`Reason::Unexpected`] per undeclared
//! name. For a single field the checks run in a fixed order (presence, type,
//! physical constraint, minimum, maximum) and only the first failure for that
//! field is reported.

use std::collections::BTreeMap;
use serde_json::Value;
use crate::{
    error::{ Reason, Violation, Violations },
    schema::{ ParamKind, ParamValue, ParameterSpec, RawParams, SolveRequest },
};

/// Check `raw` against `schema`.
///
/// Returns a [`SolveRequest`] holding exactly the declared names when every
/// field passes, or all collected [`Violations`] otherwise. Pure; no logging.
pub fn validate(schema: &[ParameterSpec], raw: &RawParams)
    -> Result<SolveRequest, Violations>
{
    let mut values: BTreeMap<String, ParamValue> = BTreeMap::new();
    let mut violations: Vec<Violation> = Vec::new();

    for spec in schema.iter() {
        match check_field(spec, raw.get(spec.name)) {
            Ok(value) => { values.insert(spec.name.to_string(), value); },
            Err(reason) => { violations.push(Violation::new(spec.name, reason)); },
        }
    }
    for name in raw.keys() {
        if !schema.iter().any(|spec| spec.name == name.as_str()) {
            violations.push(Violation::new(name, Reason::Unexpected));
        }
    }

    match Violations::from_vec(violations) {
        Some(violations) => Err(violations),
        None => Ok(SolveRequest::new(values)),
    }
}

fn check_field(spec: &ParameterSpec, raw: Option<&Value>) -> Result<ParamValue, Reason> {
    let raw = raw.ok_or(Reason::Missing)?;
    let value = coerce(spec.kind, raw)?;
    if let Some(x) = value.as_f64() {
        if let Some(constraint) = spec.constraint {
            if !constraint.rule.holds(x) {
                return Err(Reason::Physical { message: constraint.message.to_string() });
            }
        }
        if let Some(min) = spec.min {
            if x < min { return Err(Reason::BelowMinimum { min, value: x }); }
        }
        if let Some(max) = spec.max {
            if x > max { return Err(Reason::AboveMaximum { max, value: x }); }
        }
    }
    Ok(value)
}

// integers are accepted for float parameters, and integral floats (e.g. `4.0`)
// for integer parameters; nothing else crosses kinds
fn coerce(kind: ParamKind, raw: &Value) -> Result<ParamValue, Reason> {
    let wrong = || Reason::WrongType {
        expected: kind.name().to_string(),
        found: json_type(raw).to_string(),
    };
    match kind {
        ParamKind::Float => raw.as_f64()
            .filter(|x| x.is_finite())
            .map(ParamValue::Float)
            .ok_or_else(wrong),
        ParamKind::Int => {
            if let Some(n) = raw.as_i64() {
                Ok(ParamValue::Int(n))
            } else {
                raw.as_f64()
                    .filter(|x| x.fract() == 0.0 && x.abs() < i64::MAX as f64)
                    .map(|x| ParamValue::Int(x as i64))
                    .ok_or_else(wrong)
            }
        },
        ParamKind::Bool => raw.as_bool()
            .map(ParamValue::Bool)
            .ok_or_else(wrong),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::float("V0", "Well depth", 10.0)
                .range(0.1, 100.0)
                .positive("well depth must be positive"),
            ParameterSpec::int("max_n", "Levels", 4)
                .range(1.0, 8.0)
                .at_least_one("principal quantum number must be at least 1"),
            ParameterSpec::flag("spin", "Spin", false),
        ]
    }

    fn raw(value: Value) -> RawParams {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn accepts_valid_map() {
        let req = validate(&schema(), &raw(json!({ "V0": 5, "max_n": 3.0, "spin": true })))
            .unwrap();
        assert_eq!(req.float("V0").unwrap(), 5.0);
        assert_eq!(req.int("max_n").unwrap(), 3);
        assert!(req.flag("spin").unwrap());
        assert_eq!(req.iter().count(), 3);
    }

    #[test]
    fn collects_every_failure() {
        let err = validate(
            &schema(),
            &raw(json!({ "V0": "deep", "max_n": 2.5, "color": "red" })),
        ).unwrap_err();
        assert_eq!(err.len(), 4);
        let fields: Vec<&str> = err.as_slice().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["V0", "max_n", "spin", "color"]);
        assert!(matches!(err.get("V0").unwrap().reason, Reason::WrongType { .. }));
        assert!(matches!(err.get("max_n").unwrap().reason, Reason::WrongType { .. }));
        assert_eq!(err.get("spin").unwrap().reason, Reason::Missing);
        assert_eq!(err.get("color").unwrap().reason, Reason::Unexpected);
    }

    #[test]
    fn physical_constraint_precedes_bounds() {
        let err = validate(&schema(), &raw(json!({ "V0": -1.0, "max_n": 0, "spin": false })))
            .unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(matches!(err.get("V0").unwrap().reason, Reason::Physical { .. }));
        assert!(matches!(err.get("max_n").unwrap().reason, Reason::Physical { .. }));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate(&schema(), &raw(json!({ "V0": 100.0, "max_n": 8, "spin": false })))
            .is_ok());
        let err = validate(&schema(), &raw(json!({ "V0": 100.5, "max_n": 9, "spin": false })))
            .unwrap_err();
        assert!(matches!(err.get("V0").unwrap().reason, Reason::AboveMaximum { .. }));
        assert!(matches!(err.get("max_n").unwrap().reason, Reason::AboveMaximum { .. }));
    }

    #[test]
    fn minimum_applies_after_physical_constraint() {
        let err = validate(&schema(), &raw(json!({ "V0": 0.05, "max_n": 1, "spin": false })))
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(
            err.get("V0").unwrap().reason,
            Reason::BelowMinimum { min: 0.1, value: 0.05 },
        );
    }

    #[test]
    fn null_and_bool_are_wrong_types_for_numbers() {
        let err = validate(&schema(), &raw(json!({ "V0": null, "max_n": true, "spin": 1 })))
            .unwrap_err();
        assert_eq!(err.len(), 3);
        assert!(err.as_slice().iter().all(|v| matches!(v.reason, Reason::WrongType { .. })));
    }
}
