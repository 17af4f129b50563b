//! An owned TOML document.
//!
//! A [`Document`] holds one root [`Value`] together with the [`Options`] it
//! was read with. A freshly created document's root is `Nil`; the first
//! [`Document::insert`] turns it into an empty table. Documents produced by
//! [`crate::parse`] and [`crate::load`] always have a table root.
//!
//! ```rust
//! use toml_bridge::{Document, Error, HostValue};
//!
//! let doc = toml_bridge::parse("title = \"example\"").unwrap();
//! assert_eq!(doc.get("title").unwrap(), HostValue::from("example"));
//! assert_eq!(doc.get("missing"), Err(Error::missing_key("missing")));
//!
//! let mut doc = Document::new();
//! doc.insert("port", &HostValue::from(8080)).unwrap();
//! assert_eq!(doc.to_toml_string().unwrap(), "port = 8080\n");
//! ```

use crate::convert::Converter;
use crate::host::HostValue;
use crate::options::Options;
use crate::{ser, Error, Result, Table, Value};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Value,
    options: Options,
}

impl Document {
    /// Creates an empty document with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Document {
            root: Value::Nil,
            options,
        }
    }

    /// Wraps an existing value as a document root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structural`] unless `root` is a table.
    pub fn from_value(root: Value, options: Options) -> Result<Self> {
        if !root.is_table() {
            return Err(Error::structural(root.type_str()));
        }
        Ok(Document { root, options })
    }

    pub(crate) fn from_table(table: Table, options: Options) -> Self {
        Document {
            root: Value::Table(table),
            options,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    #[must_use]
    pub fn into_root(self) -> Value {
        self.root
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn converter(&self) -> Converter {
        Converter::new(&self.options)
    }

    fn table(&self) -> Result<&Table> {
        self.root
            .as_table()
            .ok_or_else(|| Error::structural(self.root.type_str()))
    }

    /// Looks up a top-level key and converts its value to the host
    /// representation.
    ///
    /// # Errors
    ///
    /// - [`Error::Structural`] if the root is not a table
    /// - [`Error::MissingKey`] if the key is absent
    /// - [`Error::TemporalConstruction`] if a date/time entry cannot be
    ///   composed in the configured zone
    pub fn get(&self, key: &str) -> Result<HostValue> {
        let value = self.get_value(key)?;
        self.converter().to_host(value)
    }

    /// Looks up a top-level key without converting it.
    ///
    /// # Errors
    ///
    /// Same lookup failures as [`Document::get`].
    pub fn get_value(&self, key: &str) -> Result<&Value> {
        self.table()?
            .get(key)
            .ok_or_else(|| Error::missing_key(key))
    }

    /// Converts `value` and stores it under `key`, returning the entry it
    /// replaced.
    ///
    /// # Errors
    ///
    /// Fails if the root holds a non-table value, or if `value` has no TOML
    /// representation. The document is unchanged on failure.
    pub fn insert(&mut self, key: &str, value: &HostValue) -> Result<Option<Value>> {
        let converted = self.converter().from_host(value)?;
        if self.root.is_nil() {
            self.root = Value::Table(Table::new());
        }
        let found = self.root.type_str();
        let table = self
            .root
            .as_table_mut()
            .ok_or_else(|| Error::structural(found))?;
        Ok(table.insert(key.to_string(), converted))
    }

    /// Renders the document as TOML text.
    ///
    /// With no path the text is returned. With a path, the file is created
    /// or truncated and the text written to it; nothing is returned. The
    /// text is rendered before the file is opened, so a document that cannot
    /// be rendered never touches the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the root cannot be rendered, and
    /// [`Error::Io`] if the file cannot be opened or written.
    pub fn dump(&self, path: Option<&Path>) -> Result<Option<String>> {
        let text = ser::render(&self.root, self.options.pretty)?;
        match path {
            None => Ok(Some(text)),
            Some(path) => {
                ser::write_file(path, &text)?;
                Ok(None)
            }
        }
    }

    /// Renders the document as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the root cannot be rendered.
    pub fn to_toml_string(&self) -> Result<String> {
        ser::render(&self.root, self.options.pretty)
    }
}

/// What [`crate::dump`] can write: a whole document, or a host value tree.
#[derive(Clone, Copy, Debug)]
pub enum DumpSource<'a> {
    Document(&'a Document),
    Host(&'a HostValue),
}

impl<'a> From<&'a Document> for DumpSource<'a> {
    fn from(doc: &'a Document) -> Self {
        DumpSource::Document(doc)
    }
}

impl<'a> From<&'a HostValue> for DumpSource<'a> {
    fn from(value: &'a HostValue) -> Self {
        DumpSource::Host(value)
    }
}
