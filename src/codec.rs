//! Datetime codec: TOML date/time kinds to host instants and back.
//!
//! The host offers one time type, an absolute instant. TOML has four kinds
//! that differ in which fields they carry and in whether they are pinned to
//! an offset. The codec encodes each kind into a [`HostTime`] and records
//! which kind it came from in a [`Provenance`] tag; decoding reads the tag
//! to rebuild the same kind.
//!
//! ## Encoding
//!
//! | Kind              | Host instant built from                              | Tag               |
//! |-------------------|------------------------------------------------------|-------------------|
//! | `LocalDate`       | `y-m-d 00:00:00` as local wall clock                 | `local_date`      |
//! | `LocalTime`       | `1970-01-01 h:m:s.us` as local wall clock            | `local_time`      |
//! | `LocalDateTime`   | `y-m-d h:m:s.us` as local wall clock                 | `local_datetime`  |
//! | `OffsetDateTime`  | `y-m-d h:m:s.us` minus the offset, as UTC            | `offset_datetime` |
//!
//! An offset datetime's instant is the UTC instant; the host time is then
//! viewed at the original offset so that decoding can read it back.
//!
//! Sub-second values are floored to microseconds, the host's resolution.
//! `12:00:00.123456789` decodes as `12:00:00.123456`.
//!
//! ## Decoding
//!
//! Fields are read from the host time's own wall-clock view. A time with no
//! tag is treated as an offset datetime. The host reports its offset as
//! seconds to add to local time to reach UTC, so the TOML offset is the
//! negation of that, in minutes.
//!
//! ## Examples
//!
//! ```rust
//! use toml_bridge::codec::{self, Provenance};
//! use toml_bridge::{LocalDate, LocalTime, OffsetDateTime, Value};
//!
//! let odt = OffsetDateTime::new(LocalDate::new(2024, 1, 1), LocalTime::new(12, 0, 0), 540);
//! let tagged = codec::encode_offset_datetime(&odt).unwrap();
//! assert_eq!(tagged.provenance, Some(Provenance::OffsetDateTime));
//! assert_eq!(tagged.time.to_utc().to_rfc3339(), "2024-01-01T03:00:00+00:00");
//! assert_eq!(codec::decode(&tagged).unwrap(), Value::OffsetDateTime(odt));
//! ```

use crate::host::{HostTime, TaggedTime};
use crate::options::LocalZone;
use crate::temporal::{LocalDate, LocalDateTime, LocalTime, OffsetDateTime};
use crate::{Error, Result, Value};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

/// The anchor date for a time of day with no date: 1970-01-01.
const TIME_ANCHOR: LocalDate = LocalDate::new(1970, 1, 1);

/// Which TOML kind produced a host time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    LocalDate,
    LocalTime,
    LocalDateTime,
    OffsetDateTime,
}

impl Provenance {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Provenance::LocalDate => "local_date",
            Provenance::LocalTime => "local_time",
            Provenance::LocalDateTime => "local_datetime",
            Provenance::OffsetDateTime => "offset_datetime",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar breakdown shared by both directions.
///
/// Every mapping between TOML records and host fields goes through this
/// struct. Months are 1-based in all three representations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CivilFields {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
}

impl CivilFields {
    fn from_date(date: &LocalDate) -> Self {
        CivilFields {
            year: i32::from(date.year),
            month: u32::from(date.month),
            day: u32::from(date.day),
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
        }
    }

    fn with_time(self, time: &LocalTime) -> Self {
        if time.nanosecond != 0 {
            log::trace!(
                "dropping {}ns below host microsecond resolution",
                time.nanosecond
            );
        }
        CivilFields {
            hour: u32::from(time.hour),
            minute: u32::from(time.minute),
            second: u32::from(time.second),
            microsecond: time.subsec_micros(),
            ..self
        }
    }

    fn of(time: &HostTime) -> Self {
        CivilFields {
            year: time.year(),
            month: time.month(),
            day: time.day(),
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            microsecond: time.usec(),
        }
    }

    /// A leap second (`:60`) becomes chrono's leap form: second 59 with the
    /// fraction at or above one second.
    fn compose(&self, kind: Provenance) -> Result<NaiveDateTime> {
        let (second, microsecond) = if self.second == 60 {
            (59, self.microsecond + 1_000_000)
        } else {
            (self.second, self.microsecond)
        };
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|d| d.and_hms_micro_opt(self.hour, self.minute, second, microsecond))
            .ok_or_else(|| Error::temporal(kind, self))
    }

    fn date(&self, kind: Provenance) -> Result<LocalDate> {
        let year = u16::try_from(self.year)
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| Error::temporal(kind, self))?;
        Ok(LocalDate::new(year, self.month as u8, self.day as u8))
    }

    fn time(&self) -> LocalTime {
        LocalTime {
            millisecond: (self.microsecond / 1_000) as u16,
            microsecond: (self.microsecond % 1_000) as u16,
            nanosecond: 0,
            ..LocalTime::new(self.hour as u8, self.minute as u8, self.second as u8)
        }
    }
}

impl fmt::Display for CivilFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond
        )
    }
}

fn tagged(time: HostTime, kind: Provenance) -> TaggedTime {
    TaggedTime {
        time,
        provenance: Some(kind),
    }
}

/// Encodes a date as local midnight.
pub fn encode_local_date(date: &LocalDate, zone: &LocalZone) -> Result<TaggedTime> {
    let kind = Provenance::LocalDate;
    let naive = CivilFields::from_date(date).compose(kind)?;
    Ok(tagged(HostTime::local(zone, &naive, kind)?, kind))
}

/// Encodes a time of day on the anchor date, as local wall clock.
pub fn encode_local_time(time: &LocalTime, zone: &LocalZone) -> Result<TaggedTime> {
    let kind = Provenance::LocalTime;
    let naive = CivilFields::from_date(&TIME_ANCHOR)
        .with_time(time)
        .compose(kind)?;
    Ok(tagged(HostTime::local(zone, &naive, kind)?, kind))
}

pub fn encode_local_datetime(dt: &LocalDateTime, zone: &LocalZone) -> Result<TaggedTime> {
    let kind = Provenance::LocalDateTime;
    let naive = CivilFields::from_date(&dt.date)
        .with_time(&dt.time)
        .compose(kind)?;
    Ok(tagged(HostTime::local(zone, &naive, kind)?, kind))
}

/// Encodes an offset datetime as its UTC instant, viewed at its own offset.
pub fn encode_offset_datetime(odt: &OffsetDateTime) -> Result<TaggedTime> {
    let kind = Provenance::OffsetDateTime;
    let fields = CivilFields::from_date(&odt.date).with_time(&odt.time);
    let naive = fields.compose(kind)?;

    let offset_secs = i32::from(odt.offset) * 60;
    let view = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        Error::temporal(kind, format_args!("{} with offset {}min", fields, odt.offset))
    })?;
    let instant = view
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::temporal(kind, fields))?;

    Ok(tagged(HostTime::from(instant), kind))
}

/// Converts the host's UTC − local seconds into TOML minutes east of UTC.
///
/// Offsets with a seconds part have no TOML form.
fn offset_minutes_east(timezone_offset: i32) -> Option<i16> {
    if timezone_offset % 60 != 0 {
        return None;
    }
    i16::try_from(-timezone_offset / 60).ok()
}

/// Rebuilds the TOML value a host time stands for.
///
/// Untagged times decode as offset datetimes at the host time's own offset.
pub fn decode(tagged: &TaggedTime) -> Result<Value> {
    let kind = tagged.provenance.unwrap_or(Provenance::OffsetDateTime);
    let fields = CivilFields::of(&tagged.time);

    let value = match kind {
        Provenance::LocalDate => Value::LocalDate(fields.date(kind)?),
        Provenance::LocalTime => Value::LocalTime(fields.time()),
        Provenance::LocalDateTime => {
            Value::LocalDateTime(LocalDateTime::new(fields.date(kind)?, fields.time()))
        }
        Provenance::OffsetDateTime => {
            let tz = tagged.time.timezone_offset();
            let offset = offset_minutes_east(tz).ok_or_else(|| {
                Error::temporal(kind, format_args!("{} with timezone offset {}s", fields, tz))
            })?;
            Value::OffsetDateTime(OffsetDateTime::new(
                fields.date(kind)?,
                fields.time(),
                offset,
            ))
        }
    };
    Ok(value)
}
