//! Configuration for conversion and output.
//!
//! This module provides:
//!
//! - [`Options`]: the settings a [`crate::Document`] and the top-level
//!   functions carry around
//! - [`LocalZone`]: which UTC offset "local wall-clock time" means when a
//!   zone-less TOML date or time is turned into a host instant
//!
//! Only fixed offsets are supported. [`LocalZone::System`] asks the operating
//! system for the offset in effect at a given moment; it never looks zones up
//! by name.
//!
//! ## Examples
//!
//! ```rust
//! use toml_bridge::{parse_with_options, LocalZone, Options};
//!
//! let tokyo = LocalZone::east_minutes(9 * 60).unwrap();
//! let options = Options::new().with_local_zone(tokyo).with_pretty(true);
//! let doc = parse_with_options("d = 2024-01-02", options).unwrap();
//! ```

use crate::codec::Provenance;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

/// The zone used to interpret local wall-clock fields.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LocalZone {
    /// The operating system's local zone, via [`chrono::Local`].
    #[default]
    System,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl LocalZone {
    /// Local time is UTC.
    #[must_use]
    pub fn utc() -> Self {
        LocalZone::Fixed(Utc.fix())
    }

    /// A fixed zone `minutes` east of UTC, or `None` if out of range (±24h).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::LocalZone;
    ///
    /// assert!(LocalZone::east_minutes(-5 * 60).is_some());
    /// assert!(LocalZone::east_minutes(24 * 60).is_none());
    /// ```
    #[must_use]
    pub fn east_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(LocalZone::Fixed)
    }

    /// Pins a wall-clock breakdown to an instant in this zone.
    ///
    /// A wall-clock time that occurs twice (a DST fall-back) resolves to the
    /// earlier instant; one that never occurs (a DST gap) is an error.
    pub(crate) fn resolve(
        &self,
        naive: &NaiveDateTime,
        kind: Provenance,
    ) -> Result<DateTime<FixedOffset>> {
        let resolved = match self {
            LocalZone::System => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.fixed_offset()),
            LocalZone::Fixed(offset) => offset.from_local_datetime(naive).earliest(),
        };
        resolved.ok_or_else(|| Error::temporal(kind, naive))
    }
}

/// Settings for conversion and rendering.
///
/// # Examples
///
/// ```rust
/// use toml_bridge::{LocalZone, Options};
///
/// let options = Options::new();
/// assert_eq!(options.local_zone, LocalZone::System);
/// assert!(!options.pretty);
///
/// let options = Options::pretty().with_local_zone(LocalZone::utc());
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Options {
    pub local_zone: LocalZone,
    pub pretty: bool,
}

impl Options {
    /// Creates default options (system local zone, compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output.
    #[must_use]
    pub fn pretty() -> Self {
        Options {
            pretty: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_local_zone(mut self, zone: LocalZone) -> Self {
        self.local_zone = zone;
        self
    }

    /// Pretty output puts array elements on their own lines.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
