//! # toml_bridge
//!
//! A TOML document model with a two-way bridge to a dynamic host value
//! representation.
//!
//! ## What does it do?
//!
//! TOML text is parsed into a typed [`Value`] tree that keeps all four TOML
//! date/time kinds distinct. Scripting hosts usually have a single dynamic
//! value type with one "time" type, so the crate converts between [`Value`]
//! and [`HostValue`] and back without losing which date/time kind a host time
//! came from.
//!
//! ## Key Features
//!
//! - **Typed documents**: every TOML construct maps onto a closed [`Value`] enum
//! - **Date/time provenance**: host times carry a tag recording whether they
//!   were a local date, local time, local datetime or offset datetime
//! - **Offsets survive**: `1979-05-27T00:32:00-07:00` comes back with `-07:00`
//! - **Configurable local zone**: zone-less dates resolve in the system zone
//!   or a fixed offset ([`LocalZone`])
//! - **Serde bridge**: any `T: Serialize` becomes a [`HostValue`] via [`to_host`]
//!
//! ## Quick Start
//!
//! ```rust
//! use toml_bridge::{parse, HostValue};
//!
//! let doc = parse(
//!     r#"
//! title = "TOML Example"
//!
//! [database]
//! ports = [8000, 8001, 8002]
//! enabled = true
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(doc.get("title").unwrap(), HostValue::from("TOML Example"));
//! let database = doc.get("database").unwrap();
//! assert_eq!(database.get("enabled"), Some(&HostValue::Bool(true)));
//! ```
//!
//! ### Dumping host values
//!
//! ```rust
//! use toml_bridge::{dump, host};
//!
//! let config = host!({"name": "demo", "ports": [80, 443]});
//! let text = dump(&config, None).unwrap().unwrap();
//! assert_eq!(text, "name = \"demo\"\nports = [80, 443]\n");
//! ```
//!
//! ### Dates and times
//!
//! ```rust
//! use toml_bridge::{parse_with_options, Converter, LocalZone, Options, Provenance};
//!
//! let options = Options::new().with_local_zone(LocalZone::utc());
//! let doc = parse_with_options("odt = 2024-01-01T12:00:00+09:00", options).unwrap();
//!
//! let host = doc.get("odt").unwrap();
//! let tagged = host.as_time().unwrap();
//! assert_eq!(tagged.provenance, Some(Provenance::OffsetDateTime));
//! assert_eq!(tagged.time.to_utc().to_rfc3339(), "2024-01-01T03:00:00+00:00");
//!
//! let back = Converter::new(doc.options()).from_host(&host).unwrap();
//! assert_eq!(back.as_offset_datetime().unwrap().offset, 540);
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`]. Text that is not TOML is an
//! [`Error::Parse`]; TOML whose top level is not a table is an
//! [`Error::Structural`]; host values with no TOML form are an
//! [`Error::TypeConversion`]. Nothing partial is returned on failure.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and installs no logger.

pub mod codec;
pub mod convert;
pub mod de;
pub mod document;
pub mod error;
pub mod host;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod temporal;
pub mod value;

pub use codec::Provenance;
pub use convert::Converter;
pub use document::{Document, DumpSource};
pub use error::{Error, Result};
pub use host::{HostHash, HostKey, HostObject, HostTime, HostValue, TaggedTime};
pub use map::Table;
pub use options::{LocalZone, Options};
pub use ser::{to_host, HostValueSerializer};
pub use temporal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
pub use value::Value;

use std::fs;
use std::path::Path;

/// The TOML grammar version this crate reads and writes.
pub const TOML_VERSION: &str = "1.0.0";

/// Reads and parses a TOML file with default options.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    load_with_options(path, Options::default())
}

/// Reads and parses a TOML file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse_with_options`].
pub fn load_with_options<P: AsRef<Path>>(path: P, options: Options) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("loading TOML from {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| Error::io("read", path, &e))?;
    parse_with_options(&text, options)
}

/// Parses TOML text into a document with default options.
///
/// # Examples
///
/// ```rust
/// use toml_bridge::{parse, Value};
///
/// let doc = parse("x = 1").unwrap();
/// assert_eq!(doc.get_value("x").unwrap(), &Value::Integer(1));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for text that is not TOML, and
/// [`Error::Structural`] for a bare value at the top level.
pub fn parse(text: &str) -> Result<Document> {
    parse_with_options(text, Options::default())
}

/// Parses TOML text into a document.
///
/// # Errors
///
/// Returns [`Error::Parse`] for text that is not TOML, and
/// [`Error::Structural`] for a bare value at the top level.
pub fn parse_with_options(text: &str, options: Options) -> Result<Document> {
    let table = de::parse_document(text)?;
    Ok(Document::from_table(table, options))
}

/// Renders a document or host value as TOML with default options.
///
/// With `path` set the text is written to that file and `None` is returned;
/// otherwise the text is returned.
///
/// # Errors
///
/// See [`dump_with_options`].
pub fn dump<'a, S>(source: S, path: Option<&Path>) -> Result<Option<String>>
where
    S: Into<DumpSource<'a>>,
{
    dump_with_options(source, path, &Options::default())
}

/// Renders a document or host value as TOML.
///
/// Documents render with their own options. Host hashes render as TOML
/// documents; any other host value renders as a single inline TOML value.
/// The value is converted and rendered before the file is opened.
///
/// # Examples
///
/// ```rust
/// use toml_bridge::{dump_with_options, HostValue, Options};
///
/// let text = dump_with_options(&HostValue::from(42), None, &Options::new()).unwrap();
/// assert_eq!(text.as_deref(), Some("42"));
/// ```
///
/// # Errors
///
/// - [`Error::TypeConversion`] if a host value has no TOML form
/// - [`Error::Serialize`] if the converted value cannot be rendered
/// - [`Error::Io`] if the file cannot be opened or written
pub fn dump_with_options<'a, S>(
    source: S,
    path: Option<&Path>,
    options: &Options,
) -> Result<Option<String>>
where
    S: Into<DumpSource<'a>>,
{
    let value = match source.into() {
        DumpSource::Document(doc) => return doc.dump(path),
        DumpSource::Host(host) => {
            let converter = Converter::new(options);
            match host {
                HostValue::Hash(hash) => Value::Table(converter.table_from_host(hash)?),
                other => converter.from_host(other)?,
            }
        }
    };
    let text = ser::render(&value, options.pretty)?;
    match path {
        None => Ok(Some(text)),
        Some(path) => {
            ser::write_file(path, &text)?;
            Ok(None)
        }
    }
}
