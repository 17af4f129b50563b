//! Typed value representation for TOML data.
//!
//! This module provides the [`Value`] enum, the closed set of shapes a TOML
//! document can hold: scalars, arrays, tables, and the four date/time kinds.
//! It also carries `Nil`, the absent value, which exists in the model so that
//! host `nil` has somewhere to land but which TOML text cannot express.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use toml_bridge::{LocalDate, Value};
//!
//! let flag = Value::from(true);
//! let port = Value::from(8080);
//! let host = Value::from("localhost");
//! let day = Value::from(LocalDate::new(2024, 1, 2));
//! assert!(day.is_local_date());
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use toml_bridge::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_integer());
//! assert!(!value.is_string());
//! assert_eq!(value.type_str(), "integer");
//! ```

use crate::temporal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::Table;
use serde::{Serialize, Serializer};

/// Any value a TOML document can hold.
///
/// `Array` and `Table` nest to arbitrary depth. Values are always built
/// bottom-up, from parsed text or from a host value tree, so they never
/// contain cycles.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Table(Table),
    LocalDate(LocalDate),
    LocalTime(LocalTime),
    LocalDateTime(LocalDateTime),
    OffsetDateTime(OffsetDateTime),
}

impl Value {
    /// The name of this value's variant, as used in error messages.
    #[must_use]
    pub const fn type_str(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
            Value::LocalDate(_) => "local date",
            Value::LocalTime(_) => "local time",
            Value::LocalDateTime(_) => "local datetime",
            Value::OffsetDateTime(_) => "offset datetime",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local_date(&self) -> bool {
        matches!(self, Value::LocalDate(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local_time(&self) -> bool {
        matches!(self, Value::LocalTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_local_datetime(&self) -> bool {
        matches!(self, Value::LocalDateTime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_offset_datetime(&self) -> bool {
        matches!(self, Value::OffsetDateTime(_))
    }

    /// Returns `true` for any of the four date/time kinds.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(
            self,
            Value::LocalDate(_)
                | Value::LocalTime(_)
                | Value::LocalDateTime(_)
                | Value::OffsetDateTime(_)
        )
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload. Integers are not widened.
    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_date(&self) -> Option<&LocalDate> {
        match self {
            Value::LocalDate(d) => Some(d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_time(&self) -> Option<&LocalTime> {
        match self {
            Value::LocalTime(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_local_datetime(&self) -> Option<&LocalDateTime> {
        match self {
            Value::LocalDateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<&OffsetDateTime> {
        match self {
            Value::OffsetDateTime(odt) => Some(odt),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::parse;
    ///
    /// let doc = parse("[server]\nport = 8080").unwrap();
    /// let port = doc.root().get("server").and_then(|s| s.get("port"));
    /// assert_eq!(port.and_then(|p| p.as_integer()), Some(8080));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }
}

// Temporal variants go through toml's datetime wrapper so the TOML
// serializer writes them as bare datetime literals rather than strings.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Nil => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::LocalDate(d) => toml::value::Datetime::from(*d).serialize(serializer),
            Value::LocalTime(t) => toml::value::Datetime::from(*t).serialize(serializer),
            Value::LocalDateTime(dt) => toml::value::Datetime::from(*dt).serialize(serializer),
            Value::OffsetDateTime(odt) => {
                toml::value::Datetime::from(*odt).serialize(serializer)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

impl From<LocalDate> for Value {
    fn from(value: LocalDate) -> Self {
        Value::LocalDate(value)
    }
}

impl From<LocalTime> for Value {
    fn from(value: LocalTime) -> Self {
        Value::LocalTime(value)
    }
}

impl From<LocalDateTime> for Value {
    fn from(value: LocalDateTime) -> Self {
        Value::LocalDateTime(value)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::OffsetDateTime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_match_exactly_one_variant() {
        let samples = vec![
            Value::Nil,
            Value::from(true),
            Value::from(1),
            Value::from(1.5),
            Value::from("s"),
            Value::Array(vec![]),
            Value::Table(Table::new()),
            Value::from(LocalDate::new(2024, 1, 2)),
            Value::from(LocalTime::new(1, 2, 3)),
            Value::from(LocalDateTime::new(
                LocalDate::new(2024, 1, 2),
                LocalTime::new(1, 2, 3),
            )),
            Value::from(OffsetDateTime::new(
                LocalDate::new(2024, 1, 2),
                LocalTime::new(1, 2, 3),
                60,
            )),
        ];

        for v in &samples {
            let hits = [
                v.is_nil(),
                v.is_bool(),
                v.is_integer(),
                v.is_float(),
                v.is_string(),
                v.is_array(),
                v.is_table(),
                v.is_local_date(),
                v.is_local_time(),
                v.is_local_datetime(),
                v.is_offset_datetime(),
            ];
            assert_eq!(hits.iter().filter(|h| **h).count(), 1, "{:?}", v);
        }
        assert_eq!(samples.iter().filter(|v| v.is_datetime()).count(), 4);
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        assert_eq!(Value::from(1).as_float(), None);
        assert_eq!(Value::from(1.0).as_integer(), None);
        assert!(Value::from("x").as_table().is_none());
        assert!(Value::from(LocalDate::new(2024, 1, 2))
            .as_local_datetime()
            .is_none());
    }

    #[test]
    fn test_get_on_nested_tables() {
        let mut inner = Table::new();
        inner.insert("port".to_string(), Value::from(8080));
        let mut outer = Table::new();
        outer.insert("server".to_string(), Value::Table(inner));
        let root = Value::Table(outer);

        assert_eq!(
            root.get("server").and_then(|s| s.get("port")),
            Some(&Value::from(8080))
        );
        assert_eq!(Value::from(1).get("server"), None);
    }
}
