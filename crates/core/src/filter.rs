//! Payload filters
//!
//! A [`Filter`] is a boolean tree evaluated against a point's payload only;
//! it never looks at the vector. Evaluation is pure and never fails: a
//! missing field, or a non-numeric value under a range, makes the condition
//! false. Structural problems (unknown operator, empty field name, unbounded
//! range) are caught up front by [`Filter::validate`] or while parsing JSON.
//!
//! ## JSON form
//!
//! ```json
//! {"must": [{"field": "city", "eq": "London"}]}
//! {"must": [{"field": "year", "gte": 2000}]}
//! {"should": [{"field": "city", "any": ["Berlin", "Moscow"]}],
//!  "must_not": [{"field": "year", "lt": 1900}]}
//! ```
//!
//! An object may combine `must`, `should` and `must_not`; the clauses are
//! ANDed together. `key` is accepted as an alias for `field`.

use crate::error::{VectorError, VectorResult};
use crate::types::Payload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::convert::TryFrom;

/// Scalar value an equality condition compares against
///
/// Integers that fit in `i64` compare exactly against integral payload
/// values. Everything else numeric compares as `f64`, so `1` equals `1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integral value
    Integer(i64),
    /// Non-integral value, or an integer beyond `i64`
    Number(f64),
    /// String value
    String(String),
}

impl MatchValue {
    /// Check if this scalar equals a JSON value
    pub fn matches_json(&self, value: &Value) -> bool {
        match (self, value) {
            (MatchValue::Null, Value::Null) => true,
            (MatchValue::Bool(a), Value::Bool(b)) => a == b,
            (MatchValue::Integer(a), Value::Number(b)) => match b.as_i64() {
                Some(n) => *a == n,
                None => b.is_f64() && b.as_f64().is_some_and(|n| *a as f64 == n),
            },
            (MatchValue::Number(a), Value::Number(b)) => match b.as_i64() {
                Some(n) => float_equals_int(*a, n),
                None => b.as_f64().is_some_and(|n| *a == n),
            },
            (MatchValue::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    /// Build from a JSON scalar; arrays and objects are rejected
    pub fn from_json(value: &Value) -> VectorResult<Self> {
        match value {
            Value::Null => Ok(MatchValue::Null),
            Value::Bool(b) => Ok(MatchValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(MatchValue::Integer(i)),
                None => n.as_f64().map(MatchValue::Number).ok_or_else(|| {
                    VectorError::invalid_filter(format!("unrepresentable number {}", n))
                }),
            },
            Value::String(s) => Ok(MatchValue::String(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(VectorError::invalid_filter(
                "match value must be a scalar (string, number, bool or null)",
            )),
        }
    }

    /// Convert back to JSON, keeping integral numbers integral
    pub fn to_json(&self) -> Value {
        match self {
            MatchValue::Null => Value::Null,
            MatchValue::Bool(b) => Value::Bool(*b),
            MatchValue::Integer(n) => Value::from(*n),
            MatchValue::Number(n) => number_to_json(*n),
            MatchValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<bool> for MatchValue {
    fn from(v: bool) -> Self {
        MatchValue::Bool(v)
    }
}

impl From<i32> for MatchValue {
    fn from(v: i32) -> Self {
        MatchValue::Integer(i64::from(v))
    }
}

impl From<i64> for MatchValue {
    fn from(v: i64) -> Self {
        MatchValue::Integer(v)
    }
}

impl From<u64> for MatchValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(MatchValue::Number(v as f64), MatchValue::Integer)
    }
}

impl From<f64> for MatchValue {
    fn from(v: f64) -> Self {
        MatchValue::Number(v)
    }
}

impl From<String> for MatchValue {
    fn from(v: String) -> Self {
        MatchValue::String(v)
    }
}

impl From<&str> for MatchValue {
    fn from(v: &str) -> Self {
        MatchValue::String(v.to_string())
    }
}

/// Numeric range; every present bound must hold
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Exclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    /// Inclusive lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    /// Exclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

impl Range {
    /// Unbounded range; add at least one bound before use
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusive lower bound
    pub fn gt(mut self, v: f64) -> Self {
        self.gt = Some(v);
        self
    }

    /// Set the inclusive lower bound
    pub fn gte(mut self, v: f64) -> Self {
        self.gte = Some(v);
        self
    }

    /// Set the exclusive upper bound
    pub fn lt(mut self, v: f64) -> Self {
        self.lt = Some(v);
        self
    }

    /// Set the inclusive upper bound
    pub fn lte(mut self, v: f64) -> Self {
        self.lte = Some(v);
        self
    }

    /// Check a number against every present bound
    pub fn contains(&self, x: f64) -> bool {
        self.gt.map_or(true, |b| x > b)
            && self.gte.map_or(true, |b| x >= b)
            && self.lt.map_or(true, |b| x < b)
            && self.lte.map_or(true, |b| x <= b)
    }

    fn bounds(&self) -> [(&'static str, Option<f64>); 4] {
        [
            ("gt", self.gt),
            ("gte", self.gte),
            ("lt", self.lt),
            ("lte", self.lte),
        ]
    }

    fn validate(&self) -> VectorResult<()> {
        let mut any = false;
        for (name, bound) in self.bounds() {
            if let Some(b) = bound {
                if !b.is_finite() {
                    return Err(VectorError::invalid_filter(format!(
                        "range bound '{}' must be finite",
                        name
                    )));
                }
                any = true;
            }
        }
        if !any {
            return Err(VectorError::invalid_filter(
                "range needs at least one of gt, gte, lt, lte",
            ));
        }
        Ok(())
    }
}

/// Boolean filter tree over payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Filter {
    /// All children match (AND); empty matches everything
    Must(Vec<Filter>),
    /// At least one child matches (OR); empty imposes no constraint
    Should(Vec<Filter>),
    /// No child matches (NOR); empty matches everything
    MustNot(Vec<Filter>),
    /// Field equals a scalar (or an array field contains it)
    Match {
        /// Payload field (dotted path allowed)
        field: String,
        /// Expected value
        value: MatchValue,
    },
    /// Field equals any of the listed scalars
    MatchAny {
        /// Payload field (dotted path allowed)
        field: String,
        /// Accepted values
        values: Vec<MatchValue>,
    },
    /// Field is a number inside the range
    Range {
        /// Payload field (dotted path allowed)
        field: String,
        /// Bounds
        range: Range,
    },
}

impl Filter {
    /// AND of conditions
    pub fn must(children: Vec<Filter>) -> Self {
        Filter::Must(children)
    }

    /// OR of conditions
    pub fn should(children: Vec<Filter>) -> Self {
        Filter::Should(children)
    }

    /// None of the conditions
    pub fn must_not(children: Vec<Filter>) -> Self {
        Filter::MustNot(children)
    }

    /// Equality condition
    pub fn eq(field: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        Filter::Match {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership condition
    pub fn any<V: Into<MatchValue>>(field: impl Into<String>, values: Vec<V>) -> Self {
        Filter::MatchAny {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Numeric range condition
    pub fn range(field: impl Into<String>, range: Range) -> Self {
        Filter::Range {
            field: field.into(),
            range,
        }
    }

    /// Evaluate against a payload
    pub fn matches(&self, payload: &Payload) -> bool {
        match self {
            Filter::Must(children) => children.iter().all(|c| c.matches(payload)),
            Filter::Should(children) => {
                children.is_empty() || children.iter().any(|c| c.matches(payload))
            }
            Filter::MustNot(children) => !children.iter().any(|c| c.matches(payload)),
            Filter::Match { field, value } => {
                lookup(payload, field).is_some_and(|v| any_element(v, |e| value.matches_json(e)))
            }
            Filter::MatchAny { field, values } => lookup(payload, field).is_some_and(|v| {
                any_element(v, |e| values.iter().any(|expected| expected.matches_json(e)))
            }),
            Filter::Range { field, range } => lookup(payload, field).is_some_and(|v| {
                any_element(v, |e| e.as_f64().is_some_and(|x| range.contains(x)))
            }),
        }
    }

    /// Check the tree for structural errors
    pub fn validate(&self) -> VectorResult<()> {
        match self {
            Filter::Must(children) | Filter::Should(children) | Filter::MustNot(children) => {
                children.iter().try_for_each(Filter::validate)
            }
            Filter::Match { field, value } => {
                validate_field(field)?;
                validate_value(value)
            }
            Filter::MatchAny { field, values } => {
                validate_field(field)?;
                values.iter().try_for_each(validate_value)
            }
            Filter::Range { field, range } => {
                validate_field(field)?;
                range.validate()
            }
        }
    }

    /// Parse and validate a filter from its JSON form
    pub fn from_json(value: &Value) -> VectorResult<Self> {
        let filter = parse_node(value)?;
        filter.validate()?;
        Ok(filter)
    }

    /// Render the JSON form
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        match self {
            Filter::Must(children) => {
                obj.insert("must".into(), children_to_json(children));
            }
            Filter::Should(children) => {
                obj.insert("should".into(), children_to_json(children));
            }
            Filter::MustNot(children) => {
                obj.insert("must_not".into(), children_to_json(children));
            }
            Filter::Match { field, value } => {
                obj.insert("field".into(), Value::String(field.clone()));
                obj.insert("eq".into(), value.to_json());
            }
            Filter::MatchAny { field, values } => {
                obj.insert("field".into(), Value::String(field.clone()));
                obj.insert(
                    "any".into(),
                    Value::Array(values.iter().map(MatchValue::to_json).collect()),
                );
            }
            Filter::Range { field, range } => {
                obj.insert("field".into(), Value::String(field.clone()));
                for (name, bound) in range.bounds() {
                    if let Some(b) = bound {
                        obj.insert(name.into(), number_to_json(b));
                    }
                }
            }
        }
        Value::Object(obj)
    }
}

impl TryFrom<Value> for Filter {
    type Error = VectorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Filter::from_json(&value)
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        filter.to_json()
    }
}

const CLAUSE_KEYS: [&str; 3] = ["must", "should", "must_not"];
const RANGE_KEYS: [&str; 4] = ["gt", "gte", "lt", "lte"];

fn parse_node(value: &Value) -> VectorResult<Filter> {
    let obj = value
        .as_object()
        .ok_or_else(|| VectorError::invalid_filter("filter must be a JSON object"))?;

    if obj.keys().any(|k| CLAUSE_KEYS.contains(&k.as_str())) {
        parse_clauses(obj)
    } else {
        parse_condition(obj)
    }
}

fn parse_clauses(obj: &Map<String, Value>) -> VectorResult<Filter> {
    let mut clauses = Vec::new();
    for key in CLAUSE_KEYS {
        let Some(children) = obj.get(key) else {
            continue;
        };
        let children = children
            .as_array()
            .ok_or_else(|| VectorError::invalid_filter(format!("'{}' must be an array", key)))?
            .iter()
            .map(parse_node)
            .collect::<VectorResult<Vec<_>>>()?;
        clauses.push(match key {
            "must" => Filter::Must(children),
            "should" => Filter::Should(children),
            _ => Filter::MustNot(children),
        });
    }

    if let Some(unknown) = obj.keys().find(|k| !CLAUSE_KEYS.contains(&k.as_str())) {
        return Err(VectorError::invalid_filter(format!(
            "unknown key '{}' next to boolean clauses",
            unknown
        )));
    }

    if clauses.len() == 1 {
        Ok(clauses.remove(0))
    } else {
        Ok(Filter::Must(clauses))
    }
}

fn parse_condition(obj: &Map<String, Value>) -> VectorResult<Filter> {
    let field = match (obj.get("field"), obj.get("key")) {
        (Some(_), Some(_)) => {
            return Err(VectorError::invalid_filter(
                "condition has both 'field' and 'key'",
            ))
        }
        (Some(f), None) | (None, Some(f)) => f
            .as_str()
            .ok_or_else(|| VectorError::invalid_filter("condition field must be a string"))?
            .to_string(),
        (None, None) => {
            return Err(VectorError::invalid_filter(
                "condition needs a 'field' (or a must/should/must_not clause)",
            ))
        }
    };

    let mut eq = None;
    let mut any = None;
    let mut range = Range::new();
    let mut has_range = false;

    for (key, value) in obj {
        match key.as_str() {
            "field" | "key" => {}
            "eq" => eq = Some(MatchValue::from_json(value)?),
            "any" => {
                let items = value
                    .as_array()
                    .ok_or_else(|| VectorError::invalid_filter("'any' must be an array"))?;
                any = Some(
                    items
                        .iter()
                        .map(MatchValue::from_json)
                        .collect::<VectorResult<Vec<_>>>()?,
                );
            }
            op if RANGE_KEYS.contains(&op) => {
                let bound = value.as_f64().ok_or_else(|| {
                    VectorError::invalid_filter(format!("range bound '{}' must be a number", op))
                })?;
                match op {
                    "gt" => range.gt = Some(bound),
                    "gte" => range.gte = Some(bound),
                    "lt" => range.lt = Some(bound),
                    _ => range.lte = Some(bound),
                }
                has_range = true;
            }
            other => {
                return Err(VectorError::invalid_filter(format!(
                    "unknown operator '{}'",
                    other
                )))
            }
        }
    }

    match (eq, any, has_range) {
        (Some(value), None, false) => Ok(Filter::Match { field, value }),
        (None, Some(values), false) => Ok(Filter::MatchAny { field, values }),
        (None, None, true) => Ok(Filter::Range { field, range }),
        (None, None, false) => Err(VectorError::invalid_filter(format!(
            "condition on '{}' has no operator",
            field
        ))),
        _ => Err(VectorError::invalid_filter(format!(
            "condition on '{}' mixes eq, any and range operators",
            field
        ))),
    }
}

fn children_to_json(children: &[Filter]) -> Value {
    Value::Array(children.iter().map(Filter::to_json).collect())
}

fn validate_field(field: &str) -> VectorResult<()> {
    if field.is_empty() {
        return Err(VectorError::invalid_filter("field name is empty"));
    }
    Ok(())
}

fn validate_value(value: &MatchValue) -> VectorResult<()> {
    if let MatchValue::Number(n) = value {
        if !n.is_finite() {
            return Err(VectorError::invalid_filter("match value must be finite"));
        }
    }
    Ok(())
}

/// Exact comparison of a float filter value with an integral payload value
fn float_equals_int(a: f64, n: i64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    a.fract() == 0.0 && a >= i64::MIN as f64 && a < i64::MAX as f64 && a as i64 == n
}

fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Resolve a field in a payload
///
/// An exact top-level key wins; otherwise a dotted name descends into
/// nested objects.
fn lookup<'a>(payload: &'a Payload, field: &str) -> Option<&'a Value> {
    if let Some(v) = payload.get(field) {
        return Some(v);
    }
    let mut parts = field.split('.');
    let mut current = payload.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Apply `pred` to a value, or to each element if it is an array
fn any_element(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().any(&pred),
        other => pred(other),
    }
}
