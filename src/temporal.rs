//! The four TOML date/time kinds.
//!
//! TOML distinguishes a calendar date, a time of day, a wall-clock datetime
//! with no zone, and a datetime pinned to a UTC offset. Each kind is its own
//! record here; none of them is an instant on its own except
//! [`OffsetDateTime`].
//!
//! The records are plain data. Field ranges are checked by the TOML parser on
//! the way in and by calendar composition in [`crate::codec`] on the way out
//! to the host.

use std::fmt;

/// A calendar date with no time of day and no zone. Months are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// A time of day with no date and no zone.
///
/// The fractional second is split into three components which together give
/// nanosecond resolution: `millisecond * 10^6 + microsecond * 10^3 +
/// nanosecond`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
    pub microsecond: u16,
    pub nanosecond: u16,
}

/// A wall-clock moment with no zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
}

/// A datetime at a fixed UTC offset, in minutes east of UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
    pub offset: i16,
}

impl LocalDate {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        LocalDate { year, month, day }
    }
}

impl LocalTime {
    /// Creates a time of day with no fractional second.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        LocalTime {
            hour,
            minute,
            second,
            millisecond: 0,
            microsecond: 0,
            nanosecond: 0,
        }
    }

    /// Replaces the fractional second with `nanos` (values at or above one
    /// second are clamped to 999_999_999).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::LocalTime;
    ///
    /// let t = LocalTime::new(7, 32, 0).with_subsec_nanos(123_456_789);
    /// assert_eq!((t.millisecond, t.microsecond, t.nanosecond), (123, 456, 789));
    /// ```
    #[must_use]
    pub fn with_subsec_nanos(mut self, nanos: u32) -> Self {
        let nanos = nanos.min(999_999_999);
        self.millisecond = (nanos / 1_000_000) as u16;
        self.microsecond = (nanos / 1_000 % 1_000) as u16;
        self.nanosecond = (nanos % 1_000) as u16;
        self
    }

    /// The fractional second in nanoseconds.
    #[must_use]
    pub fn subsec_nanos(&self) -> u32 {
        u32::from(self.millisecond) * 1_000_000
            + u32::from(self.microsecond) * 1_000
            + u32::from(self.nanosecond)
    }

    /// The fractional second floored to whole microseconds.
    #[must_use]
    pub fn subsec_micros(&self) -> u32 {
        self.subsec_nanos() / 1_000
    }
}

impl LocalDateTime {
    #[must_use]
    pub const fn new(date: LocalDate, time: LocalTime) -> Self {
        LocalDateTime { date, time }
    }
}

impl OffsetDateTime {
    #[must_use]
    pub const fn new(date: LocalDate, time: LocalTime, offset: i16) -> Self {
        OffsetDateTime { date, time, offset }
    }
}

impl From<LocalDate> for toml::value::Date {
    fn from(d: LocalDate) -> Self {
        toml::value::Date {
            year: d.year,
            month: d.month,
            day: d.day,
        }
    }
}

impl From<toml::value::Date> for LocalDate {
    fn from(d: toml::value::Date) -> Self {
        LocalDate::new(d.year, d.month, d.day)
    }
}

impl From<LocalTime> for toml::value::Time {
    fn from(t: LocalTime) -> Self {
        toml::value::Time {
            hour: t.hour,
            minute: t.minute,
            second: t.second,
            nanosecond: t.subsec_nanos(),
        }
    }
}

impl From<toml::value::Time> for LocalTime {
    fn from(t: toml::value::Time) -> Self {
        LocalTime::new(t.hour, t.minute, t.second).with_subsec_nanos(t.nanosecond)
    }
}

impl From<LocalDate> for toml::value::Datetime {
    fn from(d: LocalDate) -> Self {
        toml::value::Datetime {
            date: Some(d.into()),
            time: None,
            offset: None,
        }
    }
}

impl From<LocalTime> for toml::value::Datetime {
    fn from(t: LocalTime) -> Self {
        toml::value::Datetime {
            date: None,
            time: Some(t.into()),
            offset: None,
        }
    }
}

impl From<LocalDateTime> for toml::value::Datetime {
    fn from(dt: LocalDateTime) -> Self {
        toml::value::Datetime {
            date: Some(dt.date.into()),
            time: Some(dt.time.into()),
            offset: None,
        }
    }
}

impl From<OffsetDateTime> for toml::value::Datetime {
    fn from(odt: OffsetDateTime) -> Self {
        let offset = match odt.offset {
            0 => toml::value::Offset::Z,
            minutes => toml::value::Offset::Custom { minutes },
        };
        toml::value::Datetime {
            date: Some(odt.date.into()),
            time: Some(odt.time.into()),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        toml::value::Date::from(*self).fmt(f)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        toml::value::Time::from(*self).fmt(f)
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        toml::value::Datetime::from(*self).fmt(f)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        toml::value::Datetime::from(*self).fmt(f)
    }
}
