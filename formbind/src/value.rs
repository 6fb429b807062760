//! Value enum for dynamic editor values

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A dynamic value held by an editor or produced by a form.
///
/// Editors store whatever their widget produces (text, a flag, a parsed
/// number or date, a selected option). A form's aggregate value is a
/// [`Value::Map`] keyed by editor name, in registration order.
///
/// # Example
///
/// ```
/// use formbind::Value;
///
/// let name = Value::from("Contoso");
/// let age = Value::from(42);
/// let empty = Value::Null;
///
/// assert!(name.is_present());
/// assert!(age.is_present());
/// assert!(empty.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value (cleared or never set).
    #[default]
    Null,
    /// Boolean value (checkboxes).
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    String(String),
    /// Calendar date (coerced date inputs).
    Date(NaiveDate),
    /// A selected option with its display text (coerced selects).
    Choice { value: String, text: String },
    /// Ordered list of values.
    List(Vec<Value>),
    /// Named values; used for aggregate form values.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int` and `Float`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Whether the value counts as filled in.
    ///
    /// Numbers are always present, including `0`. `Null`, the empty string
    /// and `false` are absent. Everything else is present.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => !s.is_empty(),
            Value::Date(_) | Value::Choice { .. } | Value::List(_) | Value::Map(_) => true,
        }
    }

    /// Negation of [`Value::is_present`].
    pub fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the map if this is a `Map`.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Numeric view of the value.
    ///
    /// Numbers convert directly; strings convert when they parse as a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) if !s.trim().is_empty() => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Looks up a key if this is a `Map`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Comparison used by match validators.
    ///
    /// When one side is a number and the other converts to one, the numbers
    /// are compared. Otherwise both sides are compared by their string
    /// rendering, so `Null` equals `""` and `Bool(true)` equals `"true"`.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        if self.is_number() || other.is_number() {
            if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
                return a == b;
            }
        }
        self.to_string() == other.to_string()
    }

    /// Converts this value into a user type through serde.
    ///
    /// ```
    /// use formbind::Value;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Login {
    ///     user: String,
    /// }
    ///
    /// let value = Value::from_iter([("user", Value::from("ada"))]);
    /// let login: Login = value.deserialize_into().unwrap();
    /// assert_eq!(login.user, "ada");
    /// ```
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Choice { .. } => "choice",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Choice { value, .. } => f.write_str(value),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
