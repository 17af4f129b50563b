//! Parsing TOML text into the value model.
//!
//! The grammar itself is handled by the [`toml`] crate; this module turns its
//! output into [`Value`] and classifies failures. A document that parses is
//! always a table. Input that is not a document but is a single bare TOML
//! value, such as `42` or `"text"`, is reported as a structural error so it
//! can be told apart from text that is not TOML at all.
//!
//! ```rust
//! use toml_bridge::{parse, Error};
//!
//! assert!(matches!(parse("42"), Err(Error::Structural { .. })));
//! assert!(matches!(parse("a = = 1"), Err(Error::Parse(_))));
//! ```

use crate::temporal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::{Error, Result, Table, Value};

const PROBE_KEY: &str = "__toml_bridge_root__";

/// Parses a whole document into a root table.
pub(crate) fn parse_document(text: &str) -> Result<Table> {
    log::trace!("parsing {} bytes of TOML", text.len());
    match text.parse::<toml::Table>() {
        Ok(table) => table_from_toml(table),
        Err(err) => match parse_bare_value(text) {
            Some(value) => {
                log::debug!("rejecting TOML input with a bare {} at the root", value.type_str());
                Err(Error::structural(value.type_str()))
            }
            None => Err(Error::parse(err.to_string().trim_end())),
        },
    }
}

/// Tries to read `text` as a single TOML value by binding it to a key.
fn parse_bare_value(text: &str) -> Option<Value> {
    let wrapped = format!("{} = {}", PROBE_KEY, text.trim());
    let mut table = wrapped.parse::<toml::Table>().ok()?;
    table
        .remove(PROBE_KEY)
        .and_then(|value| value_from_toml(value).ok())
}

fn table_from_toml(table: toml::Table) -> Result<Table> {
    table
        .into_iter()
        .map(|(k, v)| Ok((k, value_from_toml(v)?)))
        .collect()
}

pub(crate) fn value_from_toml(value: toml::Value) -> Result<Value> {
    let value = match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Boolean(b),
        toml::Value::Datetime(dt) => datetime_from_toml(dt)?,
        toml::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(value_from_toml)
                .collect::<Result<Vec<_>>>()?,
        ),
        toml::Value::Table(table) => Value::Table(table_from_toml(table)?),
    };
    Ok(value)
}

fn datetime_from_toml(dt: toml::value::Datetime) -> Result<Value> {
    use toml::value::Offset;

    let value = match (dt.date, dt.time, dt.offset) {
        (Some(date), None, None) => Value::LocalDate(LocalDate::from(date)),
        (None, Some(time), None) => Value::LocalTime(LocalTime::from(time)),
        (Some(date), Some(time), None) => {
            Value::LocalDateTime(LocalDateTime::new(date.into(), time.into()))
        }
        (Some(date), Some(time), Some(offset)) => {
            let minutes = match offset {
                Offset::Z => 0,
                Offset::Custom { minutes } => minutes,
            };
            Value::OffsetDateTime(OffsetDateTime::new(date.into(), time.into(), minutes))
        }
        _ => return Err(Error::parse(format!("malformed datetime {}", dt))),
    };
    Ok(value)
}
