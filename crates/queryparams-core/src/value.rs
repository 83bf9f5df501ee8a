//! Parameter values and the casting rule applied to raw query-string text.
//!
//! A query string carries no type information, so every raw value read from a
//! URL goes through [`cast`], which infers one of the [`ParamValue`] kinds.
//! Writing goes the other way through [`ParamValue::to_query_value`].
//!
//! # Casting precedence
//!
//! The checks run in a fixed order and later checks overwrite earlier ones:
//!
//! 1. `"true"` / `"false"` / `"null"` / `"undefined"` / `""` literals
//! 2. JSON parsing, kept only when the parsed value is truthy
//! 3. the numeric-string test (`Number(s)` is not NaN)
//!
//! so a numeric string always ends up a number, a JSON object or array always
//! ends up parsed, and anything that matched nothing stays a raw string.

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::config::UndefinedPolicy;

/// Ordered mapping from parameter name to value.
///
/// Iteration order is insertion order and is the order parameters are
/// written in.
pub type ParameterSet = IndexMap<String, ParamValue>;

/// A typed query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// No value. Never written by default.
    Undefined,
    /// JSON `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number (JavaScript semantics: always a double).
    Number(f64),
    /// A string.
    String(String),
    /// A JSON array.
    Array(Vec<Value>),
    /// A JSON object.
    Object(Map<String, Value>),
}

impl ParamValue {
    /// Returns true for [`ParamValue::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Converts to a JSON value. `Undefined` has no JSON form.
    ///
    /// Integral numbers in the safe integer range become JSON integers so
    /// that `1` compares equal to `json!(1)`; non-finite numbers become `null`.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Undefined => None,
            Self::Null => Some(Value::Null),
            Self::Bool(b) => Some(Value::Bool(*b)),
            Self::Number(n) => Some(number_to_json(*n)),
            Self::String(s) => Some(Value::String(s.clone())),
            Self::Array(items) => Some(Value::Array(items.clone())),
            Self::Object(map) => Some(Value::Object(map.clone())),
        }
    }

    /// Returns the text written into the query string for this value.
    ///
    /// `None` means the parameter is left out of the query string.
    #[must_use]
    pub fn to_query_value(&self, policy: UndefinedPolicy) -> Option<String> {
        match self {
            Self::Undefined => match policy {
                UndefinedPolicy::Skip => None,
                UndefinedPolicy::Literal => Some("undefined".to_string()),
            },
            Self::Null => Some("null".to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) => Some(format_js_number(*n)),
            Self::String(s) => Some(s.clone()),
            // Arrays and objects are written as JSON so they cast back intact.
            Self::Array(_) | Self::Object(_) => self.to_json().map(|json| json.to_string()),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items),
            Value::Object(map) => Self::Object(map),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Undefined, Into::into)
    }
}

/// Builds a [`ParameterSet`] from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use queryparams_core::{params, ParamValue};
///
/// let set = params! { "foo" => "hello", "bar" => 1 };
/// assert_eq!(set["bar"], ParamValue::Number(1.0));
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::ParameterSet::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut set = $crate::ParameterSet::new();
        $( set.insert(::std::string::String::from($key), $crate::ParamValue::from($value)); )+
        set
    }};
}

/// Casts a raw query-string value to a typed value.
///
/// See the module documentation for the precedence order.
#[must_use]
pub fn cast(raw: &str) -> ParamValue {
    let mut casted = match raw {
        "true" => Some(ParamValue::Bool(true)),
        "false" => Some(ParamValue::Bool(false)),
        "null" => Some(ParamValue::Null),
        "undefined" | "" => Some(ParamValue::Undefined),
        _ => None,
    };

    if let Ok(json) = serde_json::from_str::<Value>(raw) {
        if is_truthy(&json) {
            casted = Some(ParamValue::from(json));
        }
    }

    if let Some(number) = parse_js_number(raw) {
        casted = Some(ParamValue::Number(number));
    }

    let value = casted.unwrap_or_else(|| ParamValue::String(raw.to_string()));
    tracing::trace!(raw, ?value, "Cast query value");
    value
}

/// JavaScript truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parses a string the way JavaScript's `Number(s)` does.
///
/// Returns `None` where `Number(s)` would be `NaN`. Surrounding whitespace is
/// ignored and a blank string is `0`.
///
/// # Examples
///
/// ```
/// use queryparams_core::value::parse_js_number;
///
/// assert_eq!(parse_js_number(" 42 "), Some(42.0));
/// assert_eq!(parse_js_number("0x10"), Some(16.0));
/// assert_eq!(parse_js_number(""), Some(0.0));
/// assert_eq!(parse_js_number("1a"), None);
/// ```
#[must_use]
pub fn parse_js_number(raw: &str) -> Option<f64> {
    let s = raw.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(radix_literal) = parse_radix_literal(s) {
        return radix_literal;
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }

    unsigned.parse::<f64>().ok().map(|v| sign * v)
}

/// Formats a number the way JavaScript's `Number#toString` does.
///
/// Magnitudes of `1e21` and above or below `1e-6` use exponent form with an
/// explicit sign (`1e+21`, `1.5e-7`); everything else is plain decimal.
#[must_use]
pub fn format_js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // Covers -0, which JavaScript prints as "0".
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // `{:e}` already prints the shortest mantissa; only the sign differs.
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        n.to_string()
    }
}

/// Converts a parameter set into a JSON object, dropping `Undefined` entries.
#[must_use]
pub fn to_json_object(params: &ParameterSet) -> Map<String, Value> {
    params
        .iter()
        .filter_map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
        .collect()
}

/// Converts a JSON object into a parameter set, keeping its key order.
#[must_use]
pub fn from_json_object(object: Map<String, Value>) -> ParameterSet {
    object
        .into_iter()
        .map(|(key, value)| (key, ParamValue::from(value)))
        .collect()
}

// 2^53, the end of the range where every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

/// ECMAScript `StrWhiteSpaceChar`: WhiteSpace plus LineTerminator.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{b}'
            | '\u{c}'
            | ' '
            | '\u{a0}'
            | '\u{feff}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\n'
            | '\r'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// `0x` / `0o` / `0b` literals. Outer `None` means "not a radix literal";
/// inner `None` means "radix literal with invalid digits" (NaN).
fn parse_radix_literal(s: &str) -> Option<Option<f64>> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(None);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value)
}

/// `digits [. digits] [e [+-] digits]` with at least one mantissa digit.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
