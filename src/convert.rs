//! Recursive conversion between [`Value`] and [`HostValue`].
//!
//! [`Converter::to_host`] is total: every value variant has exactly one host
//! shape. [`Converter::from_host`] is partial: host shapes with no TOML
//! counterpart fail with [`Error::TypeConversion`] naming the host type.
//!
//! | Value            | Host                                   |
//! |------------------|----------------------------------------|
//! | `Nil`            | `Nil`                                  |
//! | `Boolean`        | `Bool`                                 |
//! | `Integer`        | `Integer`                              |
//! | `Float`          | `Float`                                |
//! | `String`         | `String` (and `Symbol` on the way in)  |
//! | `Array`          | `Array`                                |
//! | `Table`          | `Hash` with string keys                |
//! | date/time kinds  | `Time` with a provenance tag           |
//!
//! ## Examples
//!
//! ```rust
//! use toml_bridge::{host, Converter, HostValue, Options, Value};
//!
//! let converter = Converter::new(&Options::new());
//! let value = converter.from_host(&host!({"port": 8080})).unwrap();
//! assert_eq!(value.get("port"), Some(&Value::Integer(8080)));
//!
//! let back = converter.to_host(&value).unwrap();
//! assert_eq!(back.get("port"), Some(&HostValue::Integer(8080)));
//! ```

use crate::host::{HostHash, HostKey, HostValue};
use crate::options::{LocalZone, Options};
use crate::{codec, Error, Result, Table, Value};

/// Converts values in both directions, resolving local wall-clock times in
/// its configured zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Converter {
    zone: LocalZone,
}

impl Converter {
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Converter {
            zone: options.local_zone.clone(),
        }
    }

    #[must_use]
    pub fn local_zone(&self) -> &LocalZone {
        &self.zone
    }

    /// Converts a value to its host representation.
    ///
    /// # Errors
    ///
    /// Fails only when a date/time value's fields cannot be composed into an
    /// instant.
    pub fn to_host(&self, value: &Value) -> Result<HostValue> {
        let host = match value {
            Value::Nil => HostValue::Nil,
            Value::Boolean(b) => HostValue::Bool(*b),
            Value::Integer(i) => HostValue::Integer(*i),
            Value::Float(f) => HostValue::Float(*f),
            Value::String(s) => HostValue::String(s.clone()),
            Value::Array(arr) => HostValue::Array(
                arr.iter()
                    .map(|v| self.to_host(v))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Table(table) => {
                let mut hash = HostHash::with_capacity(table.len());
                for (k, v) in table {
                    hash.insert(HostKey::String(k.clone()), self.to_host(v)?);
                }
                HostValue::Hash(hash)
            }
            Value::LocalDate(d) => HostValue::Time(codec::encode_local_date(d, &self.zone)?),
            Value::LocalTime(t) => HostValue::Time(codec::encode_local_time(t, &self.zone)?),
            Value::LocalDateTime(dt) => {
                HostValue::Time(codec::encode_local_datetime(dt, &self.zone)?)
            }
            Value::OffsetDateTime(odt) => HostValue::Time(codec::encode_offset_datetime(odt)?),
        };
        Ok(host)
    }

    /// Converts a host value into the value model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeConversion`] for host objects, and
    /// [`Error::TemporalConstruction`] for times outside TOML's range.
    pub fn from_host(&self, value: &HostValue) -> Result<Value> {
        let converted = match value {
            HostValue::Nil => Value::Nil,
            HostValue::Bool(b) => Value::Boolean(*b),
            HostValue::Integer(i) => Value::Integer(*i),
            HostValue::Float(f) => Value::Float(*f),
            HostValue::String(s) | HostValue::Symbol(s) => Value::String(s.clone()),
            HostValue::Array(arr) => Value::Array(
                arr.iter()
                    .map(|v| self.from_host(v))
                    .collect::<Result<Vec<_>>>()?,
            ),
            HostValue::Hash(hash) => Value::Table(self.table_from_host(hash)?),
            HostValue::Time(tagged) => codec::decode(tagged)?,
            HostValue::Object(_) => {
                log::trace!("no TOML mapping for host {}", value.type_name());
                return Err(Error::type_conversion(value.type_name()));
            }
        };
        Ok(converted)
    }

    /// Converts a host hash into a table, stringifying its keys.
    ///
    /// Keys that stringify to the same text collapse to one entry holding
    /// the value written last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::{Converter, HostHash, HostKey, HostValue, Options, Value};
    ///
    /// let mut hash = HostHash::new();
    /// hash.insert(HostKey::Symbol("a".into()), HostValue::from(1));
    /// hash.insert(HostKey::from("a"), HostValue::from(2));
    ///
    /// let table = Converter::new(&Options::new()).table_from_host(&hash).unwrap();
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get("a"), Some(&Value::Integer(2)));
    /// ```
    pub fn table_from_host(&self, hash: &HostHash) -> Result<Table> {
        let mut table = Table::with_capacity(hash.len());
        for (k, v) in hash {
            table.insert(k.to_string(), self.from_host(v)?);
        }
        Ok(table)
    }
}
