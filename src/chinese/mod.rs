//! Chinese calendar
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 夏曆以「歲」為單位編排：先由曆表求得兩冬至間各月朔日，定冬至所在月為十一月，
//! 若兩冬至間有十三個月，則以其中首個不含中氣之月為閏月。曆表為推算所得，見
//! [`ephemeris`]；日期一律按北京時間（UTC+8）計。

use std::sync::Arc;

use thiserror::Error;

use crate::date::Date;
use crate::time_scales::{Tdb, Ut};

pub mod cycle;
pub mod ephemeris;
pub mod festival;
pub mod fmt;
pub mod holiday;
pub mod officer;

pub use cycle::{Branch, STEMS, UnknownZodiac, Zodiac};

/// 「歲」：自冬至所在月（十一月）起，至下一冬至所在月前一月止。
///
/// 「歲」與「年」不同，年以正月為首。歲的序號取其大部分時段所在的公元年，
/// 故歲首的十一、十二月屬上一年。
///
/// ```
/// use wannianli::Date;
/// use wannianli::chinese::{Annus, Month};
///
/// let date = Date::from_gregorian(2017, 7, 23).unwrap();
/// let annus = Annus::from_date(date).unwrap();
///
/// assert_eq!(2017, annus.annus);
/// assert_eq!(Ok((2017, Month::Leap(6), 1)), annus.ymd_for(date));
/// ```
#[derive(Debug, Clone)]
pub struct Annus {
    pub annus: i32,
    pub ephemeris: Arc<ephemeris::Annus>,
    /// 各月首日，末項為次歲十一月首日，僅用作本歲終界
    pub months: Vec<NewMoon>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    /// 朔日
    pub date: Date,
}

/// 月名，`Common` 為平月，`Leap` 為閏月，皆以月序號（1..=12）標記。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// 月序號，不分平閏
    pub fn num(&self) -> u32 {
        match *self {
            Month::Common(n) | Month::Leap(n) => n,
        }
    }
    pub fn is_leap(&self) -> bool {
        matches!(self, Month::Leap(_))
    }
    /// 如「正月」「闰六月」「腊月」，見 [`fmt::month`]。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 編排歲時出錯
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum CalendarError {
    #[error("no ephemeris data for annus {0}")]
    NoData(i32),
    /// 兩冬至間月數既非 12 亦非 13
    #[error("{count} months between winter solstices of annus {annus}")]
    MonthCount { annus: i32, count: usize },
    /// 有十三個月而每月皆含中氣
    #[error("annus {0} needs a leap month but every month has a major term")]
    NoLeapMonth(i32),
}

/// 給定日期不在該歲，在前或在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum OtherAnnus {
    #[error("date precedes the annus")]
    Before,
    #[error("date follows the annus")]
    After,
}

/// 節氣查詢失敗
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum SolarTermErr {
    #[error("no solar term data for the preceding annus")]
    NoData,
    #[error(transparent)]
    OtherAnnus(OtherAnnus),
}

/// 曆表時刻所在的北京時間日期
pub fn date_cst(tdb: Tdb) -> Date {
    Ut::convert(tdb).date_in_timezone(480)
}

/// 曆表節氣下標（0 為冬至，每 15° 一氣）轉為節氣序號（立春為 1）
fn term_number(idx: usize) -> u32 {
    (idx as u32 + 21) % 24 + 1
}

/// 為一歲各月定名。
fn name_months(annus: i32, eph: &ephemeris::Annus) -> Result<Vec<NewMoon>, CalendarError> {
    let starts: Vec<Date> = eph.new_moon.iter().map(|&t| date_cst(t)).collect();
    // 中氣：冬至起隔氣一取，首末皆冬至
    let majors: Vec<Date> = eph.solar_term.iter().step_by(2).map(|&t| date_cst(t)).collect();
    let containing = |day: Date| {
        starts
            .partition_point(|&start| start <= day)
            .checked_sub(1)
            .ok_or(CalendarError::NoData(annus))
    };
    let first = containing(majors[0])?;
    let last = containing(majors[majors.len() - 1])?;

    let leap = match last - first {
        12 => None,
        13 => {
            let has_major =
                |i: usize| majors.iter().any(|d| (starts[i]..starts[i + 1]).contains(d));
            let leap = (first..last).find(|&i| !has_major(i));
            Some(leap.ok_or(CalendarError::NoLeapMonth(annus))?)
        }
        count => return Err(CalendarError::MonthCount { annus, count }),
    };

    let mut num = 10;
    Ok((first..=last)
        .map(|i| {
            let month = if Some(i) == leap {
                Month::Leap(num)
            } else {
                num = num % 12 + 1;
                Month::Common(num)
            };
            NewMoon {
                month,
                date: starts[i],
            }
        })
        .collect())
}

impl Annus {
    /// 編排公元 `annus` 年所對應的歲。
    ///
    /// ```
    /// use wannianli::chinese::{Annus, Month};
    ///
    /// let annus = Annus::new(2034).unwrap();
    /// // 2033 年冬至後置閏十一月
    /// assert_eq!(Month::Leap(11), annus.months[1].month);
    /// ```
    pub fn new(annus: i32) -> Result<Self, CalendarError> {
        let ephemeris = ephemeris::Annus::get(annus).ok_or(CalendarError::NoData(annus))?;
        let months = name_months(annus, &ephemeris)?;
        Ok(Self {
            annus,
            ephemeris,
            months,
        })
    }

    /// 取得給定日期所在的歲。曆表首歲始於 1899 年冬月，亦可查得。
    pub fn from_date(date: Date) -> Result<Self, CalendarError> {
        let year = date.gregorian().0;
        let mut annus = Self::new(year.clamp(ephemeris::FIRST_ANNUS, ephemeris::LAST_ANNUS))?;
        loop {
            let next = match annus.locate(date) {
                Ok(()) => return Ok(annus),
                Err(OtherAnnus::Before) => annus.annus - 1,
                Err(OtherAnnus::After) => annus.annus + 1,
            };
            annus = Self::new(next)?;
        }
    }

    fn locate(&self, date: Date) -> Result<(), OtherAnnus> {
        let (Some(first), Some(end)) = (self.months.first(), self.months.last()) else {
            return Err(OtherAnnus::After);
        };
        if date < first.date {
            Err(OtherAnnus::Before)
        } else if date >= end.date {
            Err(OtherAnnus::After)
        } else {
            Ok(())
        }
    }

    /// 給定日期的 `(年, 月, 日)`；日期不在該歲則指出其在前或在後。
    ///
    /// ```
    /// use wannianli::Date;
    /// use wannianli::chinese::{Annus, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(Ok((1999, Common(11), 25)), annus.ymd_for(date));
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherAnnus> {
        self.locate(date)?;
        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let NewMoon { month, date: start } = self.months[idx];
        let year = if month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok((year, month, (date - start) as u32 + 1))
    }

    /// 給定日期所在節氣，返回 `(節氣所屬歲, 節氣序號, 交節後日數)`：
    ///
    /// - 節氣序號 1..=24 對應立春至大寒；
    /// - 交節後日數為 0 即當日交節。
    ///
    /// 支持自歲首至本歲終冬至前一日。歲首至冬至前屬上一歲的小雪、大雪，
    /// 須取上一歲曆表。
    ///
    /// ```
    /// use wannianli::Date;
    /// use wannianli::chinese::Annus;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let annus = Annus::from_date(date).unwrap();
    ///
    /// assert_eq!(Ok((2000, 22, 10)), annus.solar_term_for(date)); // 冬至後第 10 日
    /// ```
    pub fn solar_term_for(&self, date: Date) -> Result<(i32, u32, u32), SolarTermErr> {
        match self.locate(date) {
            Err(OtherAnnus::Before) => return Err(SolarTermErr::OtherAnnus(OtherAnnus::Before)),
            _ if date >= date_cst(self.ephemeris.solar_term[24]) => {
                return Err(SolarTermErr::OtherAnnus(OtherAnnus::After));
            }
            _ => {}
        }
        let (annus, eph) = if date < date_cst(self.ephemeris.solar_term[0]) {
            let prev = ephemeris::Annus::get(self.annus - 1).ok_or(SolarTermErr::NoData)?;
            (self.annus - 1, prev)
        } else {
            (self.annus, Arc::clone(&self.ephemeris))
        };
        let idx = eph.solar_term[..24]
            .partition_point(|&t| date_cst(t) <= date)
            .checked_sub(1)
            .ok_or(SolarTermErr::NoData)?;
        let since = date - date_cst(eph.solar_term[idx]);
        Ok((annus, term_number(idx), since as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    fn month_table(annus: i32) -> Vec<(String, String)> {
        Annus::new(annus)
            .unwrap()
            .months
            .iter()
            .map(|m| (m.month.name(), m.date.iso_gregorian()))
            .collect()
    }

    #[test]
    fn common_annus() {
        let std = [
            ("冬月", "1999-12-08"),
            ("腊月", "2000-01-07"),
            ("正月", "2000-02-05"),
            ("二月", "2000-03-06"),
            ("三月", "2000-04-05"),
            ("四月", "2000-05-04"),
            ("五月", "2000-06-02"),
            ("六月", "2000-07-02"),
            ("七月", "2000-07-31"),
            ("八月", "2000-08-29"),
            ("九月", "2000-09-28"),
            ("十月", "2000-10-27"),
            ("冬月", "2000-11-26"),
        ];
        let std: Vec<_> = std.iter().map(|&(m, d)| (m.to_owned(), d.to_owned())).collect();
        assert_eq!(std, month_table(2000));
    }

    #[test]
    fn leap_annus() {
        let months = month_table(2017);
        assert_eq!(14, months.len());
        assert_eq!(("冬月".into(), "2016-11-29".into()), months[0]);
        assert_eq!(("六月".into(), "2017-06-24".into()), months[7]);
        assert_eq!(("闰六月".into(), "2017-07-23".into()), months[8]);
        assert_eq!(("七月".into(), "2017-08-22".into()), months[9]);
        assert_eq!(("冬月".into(), "2017-12-18".into()), months[13]);
    }

    #[test]
    fn leap_placement() {
        for (annus, std) in [
            (2000, None),
            (2006, Some(7)),
            (2012, Some(4)),
            (2014, Some(9)),
            (2017, Some(6)),
            (2020, Some(4)),
            (2023, Some(2)),
            (2024, None),
            (2025, Some(6)),
            (2028, Some(5)),
            (2033, None),
            (2034, Some(11)),
        ] {
            let leap = Annus::new(annus)
                .unwrap()
                .months
                .iter()
                .find(|m| m.month.is_leap())
                .map(|m| m.month.num());
            assert_eq!(std, leap, "annus {annus}");
        }
    }

    #[test]
    fn annuses_are_contiguous() {
        let mut prev = Annus::new(ephemeris::FIRST_ANNUS).unwrap();
        for y in ephemeris::FIRST_ANNUS + 1..=ephemeris::LAST_ANNUS {
            let annus = Annus::new(y).unwrap();
            assert_eq!(prev.months.last().map(|m| m.date), Some(annus.months[0].date), "{y}");
            prev = annus;
        }
    }

    #[test]
    fn lunar_dates() {
        use Month::*;
        for ((y, m, d), std) in [
            ((2016, 11, 29), (2016, Common(11), 1)),
            ((2017, 1, 27), (2016, Common(12), 30)),
            ((2017, 1, 28), (2017, Common(1), 1)),
            ((2017, 7, 22), (2017, Common(6), 29)),
            ((2017, 12, 17), (2017, Common(10), 30)),
            ((2014, 10, 24), (2014, Leap(9), 1)),
            ((2014, 12, 1), (2014, Common(10), 10)),
            ((2020, 5, 23), (2020, Leap(4), 1)),
            ((2023, 3, 22), (2023, Leap(2), 1)),
            ((2024, 2, 9), (2023, Common(12), 30)),
            ((2024, 2, 10), (2024, Common(1), 1)),
            ((2025, 1, 29), (2025, Common(1), 1)),
            ((2025, 10, 6), (2025, Common(8), 15)),
            ((2033, 12, 22), (2033, Leap(11), 1)),
            ((1899, 12, 31), (1899, Common(11), 29)),
            ((2100, 11, 30), (2100, Common(10), 29)),
        ] {
            let date = date(y, m, d);
            let annus = Annus::from_date(date).unwrap();
            assert_eq!(Ok(std), annus.ymd_for(date), "{}", date.iso_gregorian());
        }
    }

    #[test]
    fn outside_annus() {
        let annus = Annus::new(2017).unwrap();
        assert_eq!(Err(OtherAnnus::Before), annus.ymd_for(date(2016, 11, 28)));
        assert_eq!(Err(OtherAnnus::After), annus.ymd_for(date(2017, 12, 18)));
        assert_eq!(
            Err(CalendarError::NoData(ephemeris::LAST_ANNUS + 1)),
            Annus::new(ephemeris::LAST_ANNUS + 1).map(|a| a.annus)
        );
        assert_eq!(
            Some(2018),
            Annus::from_date(date(2017, 12, 18)).ok().map(|a| a.annus)
        );
        let first = ephemeris::FIRST_ANNUS;
        let last = ephemeris::LAST_ANNUS;
        for (date, std) in [
            (date(1899, 12, 2), Err(CalendarError::NoData(first - 1))),
            (date(1899, 12, 3), Ok(first)),
            (date(2100, 11, 30), Ok(last)),
            (date(2100, 12, 1), Err(CalendarError::NoData(last + 1))),
            (date(1_000_000, 1, 1), Err(CalendarError::NoData(last + 1))),
        ] {
            assert_eq!(std, Annus::from_date(date).map(|a| a.annus), "{date}");
        }
    }

    #[test]
    fn solar_terms() {
        use OtherAnnus::*;
        use SolarTermErr::OtherAnnus as Outside;
        let annus = Annus::new(2017).unwrap();
        for ((y, m, d), std) in [
            ((2016, 11, 28), Err(Outside(Before))),
            ((2016, 11, 29), Ok((2016, 20, 7))),
            ((2016, 12, 7), Ok((2016, 21, 0))),
            ((2016, 12, 21), Ok((2017, 22, 0))),
            ((2016, 12, 22), Ok((2017, 22, 1))),
            ((2017, 1, 20), Ok((2017, 24, 0))),
            ((2017, 2, 3), Ok((2017, 1, 0))),
            ((2017, 12, 7), Ok((2017, 21, 0))),
            ((2017, 12, 21), Ok((2017, 21, 14))),
            ((2017, 12, 22), Err(Outside(After))),
        ] {
            assert_eq!(std, annus.solar_term_for(date(y, m, d)), "{y}-{m}-{d}");
        }
    }
}
