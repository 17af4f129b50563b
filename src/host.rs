//! Dynamically-typed host values.
//!
//! [`HostValue`] is the generic value representation of a scripting host:
//! nil, booleans, numbers, strings and symbols, arrays, insertion-ordered
//! hashes with scalar keys, a single absolute-instant time type, and opaque
//! objects the host knows only by class name. The converter in
//! [`crate::convert`] maps these onto the typed [`crate::Value`] model and
//! back.
//!
//! The host time type, [`HostTime`], cannot tell the four TOML date/time
//! kinds apart. Times produced by the codec are therefore carried as a
//! [`TaggedTime`], which pairs the instant with the provenance tag needed to
//! reverse the conversion.
//!
//! ## Examples
//!
//! ```rust
//! use toml_bridge::{host, HostKey, HostValue};
//!
//! let config = host!({
//!     "host": "localhost",
//!     "port": 8080,
//!     "tags": ["a", "b"]
//! });
//!
//! let hash = config.as_hash().unwrap();
//! assert_eq!(hash.get(&HostKey::from("port")), Some(&HostValue::Integer(8080)));
//! assert_eq!(config.type_name(), "hash");
//! ```

use crate::codec::Provenance;
use crate::options::LocalZone;
use crate::Result;
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDateTime, Offset, SecondsFormat, TimeZone, Timelike,
    Utc,
};
use indexmap::IndexMap;
use std::fmt;

/// A value in the host's dynamic representation.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Nil,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// An interned name, distinct from a string on the host side.
    Symbol(String),
    Array(Vec<HostValue>),
    Hash(HostHash),
    Time(TaggedTime),
    Object(HostObject),
}

/// A hash key. Only scalar host values can key a hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostKey {
    Nil,
    Bool(bool),
    Integer(i64),
    String(String),
    Symbol(String),
}

/// An insertion-ordered host hash. Inserting an existing key replaces its
/// value.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HostHash(IndexMap<HostKey, HostValue>);

/// A foreign object with no structure visible to this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostObject {
    class_name: String,
}

/// The host's absolute-instant time type.
///
/// A `HostTime` is an instant plus the UTC offset it is viewed in. Field
/// accessors report the wall-clock breakdown in that view. Sub-second
/// precision is microseconds; finer digits are dropped on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostTime {
    inner: DateTime<FixedOffset>,
}

/// A host time paired with the TOML kind that produced it.
///
/// `provenance` is `None` for times that did not come out of the codec,
/// such as those built by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaggedTime {
    pub time: HostTime,
    pub provenance: Option<Provenance>,
}

impl HostValue {
    /// The host-side type name, as reported in conversion errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::{HostObject, HostValue};
    ///
    /// assert_eq!(HostValue::Symbol("a".into()).type_name(), "symbol");
    /// assert_eq!(HostValue::Object(HostObject::new("Proc")).type_name(), "Proc");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            HostValue::Nil => "nil",
            HostValue::Bool(_) => "boolean",
            HostValue::Integer(_) => "integer",
            HostValue::Float(_) => "float",
            HostValue::String(_) => "string",
            HostValue::Symbol(_) => "symbol",
            HostValue::Array(_) => "array",
            HostValue::Hash(_) => "hash",
            HostValue::Time(_) => "time",
            HostValue::Object(obj) => obj.class_name(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, HostValue::Nil)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HostValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the text of a string or symbol.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) | HostValue::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<HostValue>> {
        match self {
            HostValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_hash(&self) -> Option<&HostHash> {
        match self {
            HostValue::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_time(&self) -> Option<&TaggedTime> {
        match self {
            HostValue::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Indexes into a hash by string key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.as_hash()
            .and_then(|hash| hash.get(&HostKey::String(key.to_string())))
    }
}

impl HostKey {
    /// Reinterprets a host value as a hash key, if it is a scalar that can
    /// key a hash.
    #[must_use]
    pub fn from_value(value: &HostValue) -> Option<Self> {
        match value {
            HostValue::Nil => Some(HostKey::Nil),
            HostValue::Bool(b) => Some(HostKey::Bool(*b)),
            HostValue::Integer(i) => Some(HostKey::Integer(*i)),
            HostValue::String(s) => Some(HostKey::String(s.clone())),
            HostValue::Symbol(s) => Some(HostKey::Symbol(s.clone())),
            _ => None,
        }
    }
}

// The host's generic to-string conversion.
impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostKey::Nil => Ok(()),
            HostKey::Bool(b) => write!(f, "{}", b),
            HostKey::Integer(i) => write!(f, "{}", i),
            HostKey::String(s) | HostKey::Symbol(s) => f.write_str(s),
        }
    }
}

impl HostHash {
    #[must_use]
    pub fn new() -> Self {
        HostHash(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        HostHash(IndexMap::with_capacity(capacity))
    }

    /// Inserts a pair; an existing key keeps its position and takes the new
    /// value.
    pub fn insert(&mut self, key: HostKey, value: HostValue) -> Option<HostValue> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &HostKey) -> Option<&HostValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, HostKey, HostValue> {
        self.0.iter()
    }
}

impl FromIterator<(HostKey, HostValue)> for HostHash {
    fn from_iter<T: IntoIterator<Item = (HostKey, HostValue)>>(iter: T) -> Self {
        HostHash(IndexMap::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a HostHash {
    type Item = (&'a HostKey, &'a HostValue);
    type IntoIter = indexmap::map::Iter<'a, HostKey, HostValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl HostObject {
    pub fn new(class_name: impl Into<String>) -> Self {
        HostObject {
            class_name: class_name.into(),
        }
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl HostTime {
    /// Builds a time from a local wall-clock breakdown in `zone`.
    ///
    /// `kind` names the conversion on whose behalf the time is built, for
    /// error reporting.
    pub fn local(zone: &LocalZone, naive: &NaiveDateTime, kind: Provenance) -> Result<Self> {
        zone.resolve(naive, kind).map(HostTime::from)
    }

    /// Builds a time from a UTC breakdown, viewed in UTC.
    #[must_use]
    pub fn utc(naive: &NaiveDateTime) -> Self {
        HostTime::from(Utc.from_utc_datetime(naive))
    }

    /// The same instant viewed at `offset`.
    #[must_use]
    pub fn getlocal(&self, offset: FixedOffset) -> Self {
        HostTime {
            inner: self.inner.with_timezone(&offset),
        }
    }

    /// The same instant viewed in UTC.
    #[must_use]
    pub fn getutc(&self) -> Self {
        self.getlocal(Utc.fix())
    }

    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.inner.offset().local_minus_utc() == 0
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    /// Month of the year, 1-based.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    /// Second of the minute; 60 during a leap second.
    #[must_use]
    pub fn second(&self) -> u32 {
        self.inner.second() + self.inner.nanosecond() / 1_000_000_000
    }

    /// Microseconds past the second.
    #[must_use]
    pub fn usec(&self) -> u32 {
        self.inner.nanosecond() % 1_000_000_000 / 1_000
    }

    /// Seconds to add to this time's wall clock to reach UTC (UTC − local).
    ///
    /// This is the negation of the usual "east of UTC" offset: a time viewed
    /// at UTC+09:00 reports `-32400`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::{FixedOffset, TimeZone};
    /// use toml_bridge::HostTime;
    ///
    /// let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    /// let t = HostTime::from(tokyo.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    /// assert_eq!(t.timezone_offset(), -32400);
    /// ```
    #[must_use]
    pub fn timezone_offset(&self) -> i32 {
        -self.inner.offset().local_minus_utc()
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.inner.timestamp()
    }

    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.inner.with_timezone(&Utc)
    }

    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.inner
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for HostTime {
    fn from(dt: DateTime<Tz>) -> Self {
        let dt = dt.fixed_offset();
        let micros = dt.nanosecond() / 1_000 * 1_000;
        HostTime {
            inner: dt.with_nanosecond(micros).unwrap_or(dt),
        }
    }
}

impl fmt::Display for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
}

impl From<HostTime> for TaggedTime {
    fn from(time: HostTime) -> Self {
        TaggedTime {
            time,
            provenance: None,
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        HostValue::Bool(value)
    }
}

impl From<i32> for HostValue {
    fn from(value: i32) -> Self {
        HostValue::Integer(i64::from(value))
    }
}

impl From<i64> for HostValue {
    fn from(value: i64) -> Self {
        HostValue::Integer(value)
    }
}

impl From<u32> for HostValue {
    fn from(value: u32) -> Self {
        HostValue::Integer(i64::from(value))
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        HostValue::Float(value)
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        HostValue::String(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        HostValue::String(value.to_string())
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::Array(value)
    }
}

impl From<HostHash> for HostValue {
    fn from(value: HostHash) -> Self {
        HostValue::Hash(value)
    }
}

impl From<HostTime> for HostValue {
    fn from(value: HostTime) -> Self {
        HostValue::Time(TaggedTime::from(value))
    }
}

impl From<TaggedTime> for HostValue {
    fn from(value: TaggedTime) -> Self {
        HostValue::Time(value)
    }
}

impl From<HostObject> for HostValue {
    fn from(value: HostObject) -> Self {
        HostValue::Object(value)
    }
}

impl From<&str> for HostKey {
    fn from(value: &str) -> Self {
        HostKey::String(value.to_string())
    }
}

impl From<String> for HostKey {
    fn from(value: String) -> Self {
        HostKey::String(value)
    }
}

impl From<i64> for HostKey {
    fn from(value: i64) -> Self {
        HostKey::Integer(value)
    }
}
