//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{Datelike, FixedOffset, Utc};
use serde::{Serialize, Serializer};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not name a day of that
    /// month, or if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        let a = (m - 14) / 12;
        u32::try_from(
            (1461 * (y + 4800 + a)) / 4 + (367 * (m - 2 - 12 * a)) / 12
                - (3 * ((y + 4900 + a) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Represents the date in Gregorian calendar, in `(year, month, day)`
    /// format.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let jdn = i64::from(self.jdn);
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as u32, day as u32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        self.to_string()
    }

    /// Returns the day of week of the date, numbered `0..=6` for Sunday
    /// through Saturday, as laid out in a calendar grid.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.weekday_from_sunday()); // Saturday
    /// ```
    pub fn weekday_from_sunday(&self) -> u32 {
        (self.jdn + 1) % 7
    }
    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // 戊午
    /// ```
    pub fn sexagenary(&self) -> u32 {
        (self.jdn + 49) % 60 + 1
    }

    /// Returns the current civil date in the timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes, read from the system clock.
    ///
    /// Returns `None` if the offset is out of range (more than a day).
    pub fn today(tz_offset_minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(tz_offset_minutes.checked_mul(60)?)?;
        let now = Utc::now().with_timezone(&offset).date_naive();
        Self::from_gregorian(now.year(), now.month(), now.day())
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.wrapping_add_signed(rhs))
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        self + rhs.wrapping_neg()
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn.wrapping_sub(rhs.jdn) as i32
    }
}

/// ISO 8601 form, as [`Date::iso_gregorian`].
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` if `month` is not in `1..=12`.
///
/// ```
/// use wannianli::date::days_in_month;
///
/// assert_eq!(29, days_in_month(2024, 2));
/// assert_eq!(28, days_in_month(1900, 2));
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as u32,
        _ => 0,
    }
}
