//! 公曆節日與農曆傳統節日

use super::Month;

/// 公曆節日：(月, 日, 名稱)
const SOLAR: &[(u32, u32, &str)] = &[
    (1, 1, "元旦"),
    (3, 8, "三八妇女节"),
    (3, 12, "植树节"),
    (5, 1, "五一劳动节"),
    (5, 4, "五四青年节"),
    (6, 1, "六一儿童节"),
    (7, 1, "建党节"),
    (8, 1, "八一建军节"),
    (9, 10, "教师节"),
    (10, 1, "国庆节"),
];

/// 以農曆月日定的節日：(月, 日, 名稱)，閏月不計
const LUNAR: &[(u32, u32, &str)] = &[
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (2, 2, "龙头节"),
    (3, 3, "上巳节"),
    (5, 5, "端午节"),
    (7, 7, "七夕节"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (12, 8, "腊八节"),
];

/// 以節氣定的節日：(節氣序號, 名稱)，序號同 [`fmt::solar_term`](super::fmt::solar_term)
const TERM: &[(u32, &str)] = &[(5, "清明节"), (22, "冬至节")];

/// 公曆 `month` 月 `day` 日的節日
///
/// ```
/// use wannianli::chinese::festival;
///
/// assert_eq!(Some("国庆节"), festival::solar(10, 1));
/// assert_eq!(None, festival::solar(10, 2));
/// ```
pub fn solar(month: u32, day: u32) -> Option<&'static str> {
    SOLAR
        .iter()
        .find(|&&(m, d, _)| (m, d) == (month, day))
        .map(|&(_, _, name)| name)
}

/// 一日在農曆中的位置，供判定傳統節日
#[derive(Debug, Copy, Clone)]
pub struct LunarDay {
    pub month: Month,
    pub day: u32,
    /// 當日交節的節氣序號
    pub term: Option<u32>,
    /// 次日是否為正月初一
    pub eve: bool,
}

/// 農曆傳統節日，一日至多一個。除夕優先於其他節日判定。
///
/// ```
/// use wannianli::chinese::festival::{self, LunarDay};
/// use wannianli::chinese::Month;
///
/// let day = LunarDay { month: Month::Common(8), day: 15, term: None, eve: false };
/// assert_eq!(Some("中秋节"), festival::lunar(day));
/// ```
pub fn lunar(day: LunarDay) -> Option<&'static str> {
    if day.eve {
        return Some("除夕");
    }
    if let Some(term) = day.term
        && let Some(&(_, name)) = TERM.iter().find(|&&(t, _)| t == term)
    {
        return Some(name);
    }
    match day.month {
        Month::Leap(_) => None,
        Month::Common(m) => LUNAR
            .iter()
            .find(|&&(lm, ld, _)| (lm, ld) == (m, day.day))
            .map(|&(_, _, name)| name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Month::*;

    fn day(month: Month, day: u32) -> LunarDay {
        LunarDay {
            month,
            day,
            term: None,
            eve: false,
        }
    }

    #[test]
    fn lunar_festivals() {
        for (std, d) in [
            (Some("春节"), day(Common(1), 1)),
            (Some("端午节"), day(Common(5), 5)),
            (None, day(Leap(5), 5)),
            (Some("腊八节"), day(Common(12), 8)),
            (None, day(Common(12), 9)),
        ] {
            assert_eq!(std, lunar(d), "{d:?}");
        }
    }

    #[test]
    fn term_and_eve_festivals() {
        let qingming = LunarDay {
            term: Some(5),
            ..day(Common(2), 26)
        };
        assert_eq!(Some("清明节"), lunar(qingming));
        let grain_rain = LunarDay {
            term: Some(6),
            ..day(Common(3), 12)
        };
        assert_eq!(None, lunar(grain_rain));
        let eve = LunarDay {
            eve: true,
            ..day(Common(12), 29)
        };
        assert_eq!(Some("除夕"), lunar(eve));
    }

    #[test]
    fn solar_festivals() {
        assert_eq!(Some("元旦"), solar(1, 1));
        assert_eq!(Some("教师节"), solar(9, 10));
        assert_eq!(None, solar(12, 25));
    }
}
