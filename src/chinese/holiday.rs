//! 法定節假日安排（放假與調休上班）
//!
//! 僅收錄已公布安排的年份；未收錄年份的日期一律為 [`HolidayStatus::Unknown`]。

use serde::Serialize;

use crate::date::Date;

/// 一日的法定節假日狀態。
///
/// 取代「是否放假」「是否調休上班」兩個各自可空的布爾值，避免兩者同真的無效狀態。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayStatus {
    /// 法定假日（休）
    Holiday,
    /// 調休上班（班）
    CompensatoryWorkday,
    /// 已知安排，當日無調整
    Ordinary,
    /// 無該年安排數據
    #[default]
    Unknown,
}

/// 「放假」與「調休上班」同時為真
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("day marked both holiday and compensatory workday")]
pub struct ConflictingFlags;

impl HolidayStatus {
    /// 由兩個可空布爾值構造，兩者皆空為 `Unknown`。
    ///
    /// ```
    /// use wannianli::HolidayStatus;
    ///
    /// assert_eq!(Ok(HolidayStatus::Holiday), HolidayStatus::from_flags(Some(true), None));
    /// assert_eq!(Ok(HolidayStatus::Unknown), HolidayStatus::from_flags(None, None));
    /// assert!(HolidayStatus::from_flags(Some(true), Some(true)).is_err());
    /// ```
    pub fn from_flags(
        is_holiday: Option<bool>,
        is_compensatory_workday: Option<bool>,
    ) -> Result<Self, ConflictingFlags> {
        match (is_holiday, is_compensatory_workday) {
            (Some(true), Some(true)) => Err(ConflictingFlags),
            (Some(true), _) => Ok(Self::Holiday),
            (_, Some(true)) => Ok(Self::CompensatoryWorkday),
            (None, None) => Ok(Self::Unknown),
            _ => Ok(Self::Ordinary),
        }
    }
    /// 是否放假，未知為 `None`
    pub fn is_holiday(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            s => Some(s == Self::Holiday),
        }
    }
    /// 是否調休上班，未知為 `None`
    pub fn is_compensatory_workday(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            s => Some(s == Self::CompensatoryWorkday),
        }
    }
}

/// 一項法定假日安排
#[derive(Debug)]
pub struct Observance {
    pub name: &'static str,
    /// 放假首日 (年, 月, 日)
    pub first: (i32, u32, u32),
    /// 連休天數
    pub days: u32,
    /// 調休上班日 (年, 月, 日)
    pub workdays: &'static [(i32, u32, u32)],
}

const fn obs(
    name: &'static str,
    first: (i32, u32, u32),
    days: u32,
    workdays: &'static [(i32, u32, u32)],
) -> Observance {
    Observance {
        name,
        first,
        days,
        workdays,
    }
}

/// 按年份排列的安排，年份以國務院通知所屬年份計
const SCHEDULES: &[(i32, &[Observance])] = &[
    (
        2024,
        &[
            obs("元旦", (2023, 12, 30), 3, &[]),
            obs("春节", (2024, 2, 10), 8, &[(2024, 2, 4), (2024, 2, 18)]),
            obs("清明节", (2024, 4, 4), 3, &[(2024, 4, 7)]),
            obs("劳动节", (2024, 5, 1), 5, &[(2024, 4, 28), (2024, 5, 11)]),
            obs("端午节", (2024, 6, 8), 3, &[]),
            obs("中秋节", (2024, 9, 15), 3, &[(2024, 9, 14)]),
            obs("国庆节", (2024, 10, 1), 7, &[(2024, 9, 29), (2024, 10, 12)]),
        ],
    ),
    (
        2025,
        &[
            obs("元旦", (2025, 1, 1), 1, &[]),
            obs("春节", (2025, 1, 28), 8, &[(2025, 1, 26), (2025, 2, 8)]),
            obs("清明节", (2025, 4, 4), 3, &[]),
            obs("劳动节", (2025, 5, 1), 5, &[(2025, 4, 27)]),
            obs("端午节", (2025, 5, 31), 3, &[]),
            obs("国庆节、中秋节", (2025, 10, 1), 8, &[(2025, 9, 28), (2025, 10, 11)]),
        ],
    ),
    (
        2026,
        &[
            obs("元旦", (2026, 1, 1), 3, &[(2026, 1, 4)]),
            obs("春节", (2026, 2, 15), 9, &[(2026, 2, 14), (2026, 2, 28)]),
            obs("清明节", (2026, 4, 4), 3, &[]),
            obs("劳动节", (2026, 5, 1), 5, &[(2026, 5, 9)]),
            obs("端午节", (2026, 6, 19), 3, &[]),
            obs("中秋节", (2026, 9, 25), 3, &[]),
            obs("国庆节", (2026, 10, 1), 7, &[(2026, 9, 20), (2026, 10, 10)]),
        ],
    ),
];

impl Observance {
    fn status_on(&self, date: Date) -> Option<HolidayStatus> {
        let (y, m, d) = self.first;
        let first = Date::from_gregorian(y, m, d)?;
        if (0..self.days as i32).contains(&(date - first)) {
            return Some(HolidayStatus::Holiday);
        }
        self.workdays
            .iter()
            .filter_map(|&(y, m, d)| Date::from_gregorian(y, m, d))
            .any(|w| w == date)
            .then_some(HolidayStatus::CompensatoryWorkday)
    }
}

/// 取得給定日期的法定節假日狀態及所屬安排。
///
/// ```
/// use wannianli::Date;
/// use wannianli::chinese::holiday::{self, HolidayStatus};
///
/// let status = |y, m, d| holiday::lookup(Date::from_gregorian(y, m, d).unwrap()).0;
/// assert_eq!(HolidayStatus::Holiday, status(2024, 10, 3));
/// assert_eq!(HolidayStatus::CompensatoryWorkday, status(2024, 10, 12));
/// assert_eq!(HolidayStatus::Ordinary, status(2024, 10, 14));
/// assert_eq!(HolidayStatus::Unknown, status(2019, 10, 1));
/// ```
pub fn lookup(date: Date) -> (HolidayStatus, Option<&'static Observance>) {
    for (_, observances) in SCHEDULES {
        for observance in *observances {
            if let Some(status) = observance.status_on(date) {
                return (status, Some(observance));
            }
        }
    }
    let year = date.gregorian().0;
    if SCHEDULES.iter().any(|&(y, _)| y == year) {
        (HolidayStatus::Ordinary, None)
    } else {
        (HolidayStatus::Unknown, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(y: i32, m: u32, d: u32) -> HolidayStatus {
        lookup(Date::from_gregorian(y, m, d).unwrap()).0
    }

    #[test]
    fn spring_festival_2025() {
        use HolidayStatus::*;
        for (std, (y, m, d)) in [
            (CompensatoryWorkday, (2025, 1, 26)),
            (Ordinary, (2025, 1, 27)),
            (Holiday, (2025, 1, 28)),
            (Holiday, (2025, 2, 4)),
            (Ordinary, (2025, 2, 5)),
            (CompensatoryWorkday, (2025, 2, 8)),
        ] {
            assert_eq!(std, status(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn span_crossing_year_boundary() {
        assert_eq!(HolidayStatus::Holiday, status(2023, 12, 30));
        assert_eq!(HolidayStatus::Unknown, status(2023, 12, 29));
        let (_, observance) = lookup(Date::from_gregorian(2024, 1, 1).unwrap());
        assert_eq!(Some("元旦"), observance.map(|o| o.name));
    }

    #[test]
    fn flags_round_trip() {
        for status in [
            HolidayStatus::Holiday,
            HolidayStatus::CompensatoryWorkday,
            HolidayStatus::Ordinary,
            HolidayStatus::Unknown,
        ] {
            assert_eq!(
                Ok(status),
                HolidayStatus::from_flags(status.is_holiday(), status.is_compensatory_workday())
            );
        }
        assert_eq!(
            Ok(HolidayStatus::Ordinary),
            HolidayStatus::from_flags(Some(false), None)
        );
    }

    #[test]
    fn schedules_are_consistent() {
        for (year, observances) in SCHEDULES {
            for o in *observances {
                let (y, m, d) = o.first;
                assert!(Date::from_gregorian(y, m, d).is_some(), "{year} {}", o.name);
                for &(y, m, d) in o.workdays {
                    let date = Date::from_gregorian(y, m, d).unwrap();
                    assert_eq!(Some(HolidayStatus::CompensatoryWorkday), o.status_on(date));
                }
            }
        }
    }
}
