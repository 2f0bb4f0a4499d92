//! 名稱格式化
//!
//! 輸出一律用簡體字，與宜忌、節日等文本的用字保持一致。

use super::Month;
use super::cycle::{Branch, STEMS};

const DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

const MONTHS: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
];

/// 立春起，至大寒止
const SOLAR_TERMS: [&str; 24] = [
    "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至", "小暑", "大暑",
    "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

/// 干支序號（`1..=60`，甲子至癸亥）的名稱。
///
/// ```
/// use wannianli::chinese;
///
/// assert_eq!("乙巳", chinese::fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    let n = (num as usize + 59) % 60;
    [STEMS[n % 10], Branch::from_index(n).symbol()].iter().collect()
}

/// 月名，十一、十二月稱「冬月」「腊月」，閏月冠以「闰」。
///
/// ```
/// use wannianli::chinese::{self, Month::*};
///
/// assert_eq!("冬月", chinese::fmt::month(Common(11)));
/// assert_eq!("闰正月", chinese::fmt::month(Leap(1)));
/// ```
pub fn month(m: Month) -> String {
    let name = MONTHS[(m.num() as usize + 11) % 12];
    if m.is_leap() {
        format!("闰{name}")
    } else {
        name.to_owned()
    }
}

/// 日名（`1..=30`）：初一至初十，十一至十九，二十，廿一至廿九，三十。
///
/// ```
/// use wannianli::chinese;
///
/// assert_eq!("初十", chinese::fmt::day(10));
/// assert_eq!("廿五", chinese::fmt::day(25));
/// ```
pub fn day(d: u32) -> String {
    let (tens, ones) = (d / 10, (d % 10) as usize);
    match (tens, ones) {
        (1, 0) => "初十".to_owned(),
        (t, 0) => format!("{}十", DIGITS[t as usize % 10]),
        (t, o) => format!("{}{}", ["初", "十", "廿", "卅"][t as usize % 4], DIGITS[o]),
    }
}

/// 節氣名，序號 `1..=24` 對應立春至大寒。
///
/// ```
/// use wannianli::chinese;
///
/// assert_eq!("谷雨", chinese::fmt::solar_term(6));
/// assert_eq!("冬至", chinese::fmt::solar_term(22));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    SOLAR_TERMS[(term as usize + 23) % 24]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chinese::Month::*;

    #[test]
    fn sexagenary_names() {
        for (std, num) in [("甲子", 1), ("庚寅", 27), ("戊午", 55), ("癸亥", 60)] {
            assert_eq!(std, sexagenary(num));
        }
    }

    #[test]
    fn month_names() {
        let names: Vec<_> = (1..=12).map(|m| month(Common(m))).collect();
        assert_eq!(
            "正月 二月 三月 四月 五月 六月 七月 八月 九月 十月 冬月 腊月",
            names.join(" ")
        );
        assert_eq!("闰六月", month(Leap(6)));
        assert_eq!("闰冬月", month(Leap(11)));
    }

    #[test]
    fn day_names() {
        let names: Vec<_> = (1..=30).map(day).collect();
        assert_eq!(
            "初一 初二 初三 初四 初五 初六 初七 初八 初九 初十 \
             十一 十二 十三 十四 十五 十六 十七 十八 十九 二十 \
             廿一 廿二 廿三 廿四 廿五 廿六 廿七 廿八 廿九 三十",
            names.join(" ")
        );
    }

    #[test]
    fn term_names() {
        assert_eq!("立春", solar_term(1));
        assert_eq!("清明", solar_term(5));
        assert_eq!("大寒", solar_term(24));
        assert_eq!(solar_term(24), solar_term(0));
    }
}
