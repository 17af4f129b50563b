//! Rendering values as TOML text, and building host values from Rust data.
//!
//! ## Rendering
//!
//! Tables render as TOML documents through the [`toml`] serializer. Any
//! other value renders as a single inline TOML value (`42`, `[1, 2]`,
//! `1979-05-27`), which only [`crate::dump`] accepts at the top level.
//!
//! ## Host values from Rust data
//!
//! [`HostValueSerializer`] turns any `T: Serialize` into a [`HostValue`], so
//! native structs can be dumped or inserted into a document:
//!
//! ```rust
//! use serde::Serialize;
//! use toml_bridge::{to_host, HostValue};
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! let server = Server { host: "localhost".to_string(), port: 8080 };
//! let value = to_host(&server).unwrap();
//! assert_eq!(value.get("port"), Some(&HostValue::Integer(8080)));
//! ```

use crate::host::{HostHash, HostKey, HostValue};
use crate::{Error, Result, Value};
use serde::{ser, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders `value` as TOML text.
pub(crate) fn render(value: &Value, pretty: bool) -> Result<String> {
    match value {
        Value::Table(_) if pretty => toml::to_string_pretty(value).map_err(Error::serialize),
        Value::Table(_) => toml::to_string(value).map_err(Error::serialize),
        // Bare datetimes render as literals, not as toml's wrapper table.
        Value::LocalDate(d) => Ok(toml::value::Datetime::from(*d).to_string()),
        Value::LocalTime(t) => Ok(toml::value::Datetime::from(*t).to_string()),
        Value::LocalDateTime(dt) => Ok(toml::value::Datetime::from(*dt).to_string()),
        Value::OffsetDateTime(odt) => Ok(toml::value::Datetime::from(*odt).to_string()),
        _ => {
            let mut output = String::new();
            value
                .serialize(toml::ser::ValueSerializer::new(&mut output))
                .map_err(Error::serialize)?;
            Ok(output)
        }
    }
}

/// Writes already-rendered text to `path`, truncating it.
pub(crate) fn write_file(path: &Path, text: &str) -> Result<()> {
    log::debug!("writing {} bytes of TOML to {}", text.len(), path.display());
    let mut file = File::create(path).map_err(|e| Error::io("open", path, &e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| Error::io("write", path, &e))?;
    Ok(())
}

/// Serializer producing [`HostValue`]s.
///
/// Structs and maps become hashes, sequences and tuples become arrays, unit
/// enum variants become symbols, and `None` and `()` become nil. Bytes become
/// arrays of integers. Integers above `i64::MAX` become floats.
pub struct HostValueSerializer;

pub struct SerializeVec {
    vec: Vec<HostValue>,
}

pub struct SerializeHash {
    hash: HostHash,
    current_key: Option<HostKey>,
}

impl ser::Serializer for HostValueSerializer {
    type Ok = HostValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeHash;
    type SerializeStruct = SerializeHash;
    type SerializeStructVariant = SerializeHash;

    fn serialize_bool(self, v: bool) -> Result<HostValue> {
        Ok(HostValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<HostValue> {
        Ok(HostValue::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<HostValue> {
        Ok(HostValue::Integer(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<HostValue> {
        match i64::try_from(v) {
            Ok(i) => Ok(HostValue::Integer(i)),
            Err(_) => Ok(HostValue::Float(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<HostValue> {
        Ok(HostValue::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<HostValue> {
        Ok(HostValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<HostValue> {
        Ok(HostValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<HostValue> {
        Ok(HostValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<HostValue> {
        let vec = v.iter().map(|&b| HostValue::Integer(i64::from(b))).collect();
        Ok(HostValue::Array(vec))
    }

    fn serialize_none(self) -> Result<HostValue> {
        Ok(HostValue::Nil)
    }

    fn serialize_some<T>(self, value: &T) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<HostValue> {
        Ok(HostValue::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<HostValue> {
        Ok(HostValue::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<HostValue> {
        Ok(HostValue::Symbol(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::custom("newtype variants have no host representation"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::custom("tuple variants have no host representation"))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeHash> {
        Ok(SerializeHash::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeHash> {
        Ok(SerializeHash::new(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeHash> {
        Err(Error::custom("struct variants have no host representation"))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeHash {
    fn new(capacity: usize) -> Self {
        SerializeHash {
            hash: HostHash::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_host(value)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeHash {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = to_host(key)?;
        match HostKey::from_value(&key) {
            Some(k) => {
                self.current_key = Some(k);
                Ok(())
            }
            None => Err(Error::custom(format!(
                "a {} cannot be used as a hash key",
                key.type_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.hash.insert(key, to_host(value)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::Hash(self.hash))
    }
}

impl ser::SerializeStruct for SerializeHash {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.hash.insert(HostKey::from(key), to_host(value)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::Hash(self.hash))
    }
}

impl ser::SerializeStructVariant for SerializeHash {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(self, key, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeStruct::end(self)
    }
}

/// Converts any `T: Serialize` into a [`HostValue`].
///
/// # Errors
///
/// Fails for enum variants carrying data and for map keys that are not
/// host scalars.
pub fn to_host<T: Serialize + ?Sized>(value: &T) -> Result<HostValue> {
    value.serialize(HostValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{LocalDate, LocalTime, OffsetDateTime};
    use crate::Table;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_table_document() {
        let mut table = Table::new();
        table.insert("name".to_string(), Value::from("demo"));
        table.insert("port".to_string(), Value::from(8080));
        let text = render(&Value::Table(table), false).unwrap();
        assert_eq!(text, "name = \"demo\"\nport = 8080\n");
    }

    #[test]
    fn test_render_datetimes_as_literals() {
        let mut table = Table::new();
        table.insert(
            "when".to_string(),
            Value::from(OffsetDateTime::new(
                LocalDate::new(1979, 5, 27),
                LocalTime::new(0, 32, 0),
                -420,
            )),
        );
        let text = render(&Value::Table(table), false).unwrap();
        assert_eq!(text, "when = 1979-05-27T00:32:00-07:00\n");
    }

    #[test]
    fn test_render_inline_values() {
        assert_eq!(render(&Value::from(42), false).unwrap(), "42");
        assert_eq!(
            render(&Value::from(LocalDate::new(2024, 1, 2)), false).unwrap(),
            "2024-01-02"
        );
        assert_eq!(
            render(&Value::from(LocalTime::new(7, 32, 0)), false).unwrap(),
            "07:32:00"
        );
        assert_eq!(
            render(
                &Value::from(OffsetDateTime::new(
                    LocalDate::new(1979, 5, 27),
                    LocalTime::new(0, 32, 0),
                    -420
                )),
                false
            )
            .unwrap(),
            "1979-05-27T00:32:00-07:00"
        );
    }

    #[test]
    fn test_render_nil_root_fails() {
        assert!(matches!(
            render(&Value::Nil, false),
            Err(Error::Serialize(_))
        ));
    }

    #[derive(Serialize)]
    enum Mode {
        Fast,
    }

    #[derive(Serialize)]
    struct Settings {
        mode: Mode,
        retries: Option<u8>,
        limit: u64,
        tags: Vec<&'static str>,
    }

    #[test]
    fn test_to_host_struct() {
        let settings = Settings {
            mode: Mode::Fast,
            retries: None,
            limit: u64::MAX,
            tags: vec!["a"],
        };
        let host = to_host(&settings).unwrap();

        assert_eq!(host.get("mode"), Some(&HostValue::Symbol("Fast".into())));
        assert_eq!(host.get("retries"), Some(&HostValue::Nil));
        assert_eq!(host.get("limit"), Some(&HostValue::Float(u64::MAX as f64)));
        assert_eq!(
            host.get("tags"),
            Some(&HostValue::Array(vec![HostValue::from("a")]))
        );
    }

    #[test]
    fn test_to_host_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        let host = to_host(&map).unwrap();
        let keys: Vec<_> = host.as_hash().unwrap().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![HostKey::Integer(1), HostKey::Integer(2)]);

        let mut bad = BTreeMap::new();
        bad.insert(vec![1], 1);
        assert!(to_host(&bad).is_err());
    }
}
