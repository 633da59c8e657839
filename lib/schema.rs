//! Parameter declarations, accepted requests, and example presets.
//!
//! Every solver declares an ordered list of [`ParameterSpec`]s. A raw
//! parameter map (JSON-like, as supplied by a caller) is checked against that
//! list by [`validate`][crate::validate::validate], which produces a
//! [`SolveRequest`] holding exactly the declared names with typed values.

use std::collections::BTreeMap;
use serde::Serialize;
use serde_json::Value;
use crate::error::{ Reason, Violation };

/// Raw, unvalidated parameter map.
pub type RawParams = serde_json::Map<String, Value>;

/// The value type of a parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Float,
    Int,
    Bool,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "integer",
            Self::Bool => "boolean",
        }
    }
}

/// A typed parameter value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    /// Numeric view of the value; `None` for booleans.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(x),
            Self::Int(n) => Some(n as f64),
            Self::Bool(_) => None,
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            Self::Float(_) => ParamKind::Float,
            Self::Int(_) => ParamKind::Int,
            Self::Bool(_) => ParamKind::Bool,
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            Self::Float(x) => Value::from(x),
            Self::Int(n) => Value::from(n),
            Self::Bool(b) => Value::from(b),
        }
    }
}

/// A solver-specific physical requirement on a numeric parameter, checked
/// before the declared bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Strictly greater than zero.
    Positive,
    /// At least one (for quantum numbers and level counts).
    AtLeastOne,
}

impl Rule {
    pub fn holds(self, x: f64) -> bool {
        match self {
            Self::Positive => x > 0.0,
            Self::AtLeastOne => x >= 1.0,
        }
    }
}

/// A physical constraint together with the message reported when it fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub rule: Rule,
    pub message: &'static str,
}

/// Declaration of a single solver input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Key in the raw parameter map; unique per solver.
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    pub kind: ParamKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default: ParamValue,
    pub unit: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl ParameterSpec {
    fn new(name: &'static str, label: &'static str, default: ParamValue) -> Self {
        Self {
            name,
            label,
            kind: default.kind(),
            min: None,
            max: None,
            default,
            unit: "",
            description: "",
            constraint: None,
        }
    }

    /// A floating-point parameter.
    pub fn float(name: &'static str, label: &'static str, default: f64) -> Self {
        Self::new(name, label, ParamValue::Float(default))
    }

    /// An integer parameter.
    pub fn int(name: &'static str, label: &'static str, default: i64) -> Self {
        Self::new(name, label, ParamValue::Int(default))
    }

    /// A boolean switch.
    pub fn flag(name: &'static str, label: &'static str, default: bool) -> Self {
        Self::new(name, label, ParamValue::Bool(default))
    }

    /// Set inclusive bounds.
    ///
    /// *Panics in debug builds if `min >= max`*.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        debug_assert!(min < max, "{}: empty range [{min}, {max}]", self.name);
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Require the value to be strictly positive.
    pub fn positive(mut self, message: &'static str) -> Self {
        self.constraint = Some(Constraint { rule: Rule::Positive, message });
        self
    }

    /// Require the value to be at least one.
    pub fn at_least_one(mut self, message: &'static str) -> Self {
        self.constraint = Some(Constraint { rule: Rule::AtLeastOne, message });
        self
    }

    /// Return `true` if the declared bounds are consistent.
    pub fn is_well_formed(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min < max,
            _ => true,
        }
    }
}

/// Build a raw parameter map holding every declared default.
pub fn defaults(schema: &[ParameterSpec]) -> RawParams {
    schema.iter()
        .map(|spec| (spec.name.to_string(), spec.default.to_json()))
        .collect()
}

/// A validated request: exactly the names declared by one solver's schema,
/// each with a value of the declared kind inside the declared bounds.
///
/// Only produced by [`validate`][crate::validate::validate].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SolveRequest {
    values: BTreeMap<String, ParamValue>,
}

impl SolveRequest {
    pub(crate) fn new(values: BTreeMap<String, ParamValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.values.get(name).copied()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Fetch a numeric parameter.
    pub fn float(&self, name: &str) -> Result<f64, Violation> {
        self.get(name)
            .and_then(ParamValue::as_f64)
            .ok_or_else(|| self.absent(name, ParamKind::Float))
    }

    /// Fetch an integer parameter.
    pub fn int(&self, name: &str) -> Result<i64, Violation> {
        match self.get(name) {
            Some(ParamValue::Int(n)) => Ok(n),
            _ => Err(self.absent(name, ParamKind::Int)),
        }
    }

    /// Fetch a boolean parameter.
    pub fn flag(&self, name: &str) -> Result<bool, Violation> {
        match self.get(name) {
            Some(ParamValue::Bool(b)) => Ok(b),
            _ => Err(self.absent(name, ParamKind::Bool)),
        }
    }

    fn absent(&self, name: &str, expected: ParamKind) -> Violation {
        match self.get(name) {
            None => Violation::new(name, Reason::Missing),
            Some(found) => Violation::new(
                name,
                Reason::WrongType {
                    expected: expected.name().to_string(),
                    found: found.kind().name().to_string(),
                },
            ),
        }
    }
}

/// A named preset parameter set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Example {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: RawParams,
}

impl Example {
    /// Build a preset from a `serde_json::json!` object literal.
    ///
    /// Non-object values produce an empty parameter map.
    pub fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        parameters: Value,
    ) -> Self {
        let parameters = match parameters {
            Value::Object(map) => map,
            _ => RawParams::new(),
        };
        Self { id, name, description, parameters }
    }
}
