//! 天干、地支與生肖

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// 十天干，自甲起
pub const STEMS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// 十二地支
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    /// 自子至亥
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];
    const SYMBOLS: [char; 12] = [
        '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
    ];

    /// 序號，子為 0，亥為 11
    pub fn index(self) -> usize {
        self as usize
    }
    /// 以序號取地支，序號按 12 取模。
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }
    /// 由地支字取得地支。
    ///
    /// ```
    /// use wannianli::chinese::{Branch, Zodiac};
    ///
    /// assert_eq!(Some(Branch::Wu), Branch::from_symbol('午'));
    /// assert_eq!(Zodiac::Horse, Branch::Wu.zodiac());
    /// assert_eq!(None, Branch::from_symbol('甲'));
    /// ```
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::SYMBOLS
            .iter()
            .position(|&s| s == symbol)
            .map(Self::from_index)
    }
    pub fn symbol(self) -> char {
        Self::SYMBOLS[self.index()]
    }
    /// 相隔 `steps` 位的地支，可為負。
    pub fn offset(self, steps: i32) -> Self {
        Self::from_index((self.index() as i32 + steps).rem_euclid(12) as usize)
    }
    pub fn zodiac(self) -> Zodiac {
        Zodiac::ALL[self.index()]
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 十二生肖，與地支一一對應。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    /// 自鼠至豬，與 [`Branch::ALL`] 同序
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];
    const NAMES: [&'static str; 12] = [
        "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
    pub fn branch(self) -> Branch {
        Branch::from_index(self as usize)
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 生肖名不在十二生肖之列
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("unknown zodiac sign {0:?}")]
pub struct UnknownZodiac(pub String);

impl FromStr for Zodiac {
    type Err = UnknownZodiac;

    /// ```
    /// use wannianli::chinese::Zodiac;
    ///
    /// assert_eq!(Ok(Zodiac::Dragon), "龙".parse());
    /// assert!("龍".parse::<Zodiac>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::NAMES
            .iter()
            .position(|&n| n == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| UnknownZodiac(s.to_owned()))
    }
}

/// 將干支名拆為天干序號（甲為 0）與地支。
///
/// 名稱須恰為兩字，首字為天干，次字為地支，否則返回 `None`。
pub fn split_sexagenary(name: &str) -> Option<(usize, Branch)> {
    let mut chars = name.chars();
    let (stem, branch, rest) = (chars.next()?, chars.next()?, chars.next());
    if rest.is_some() {
        return None;
    }
    let stem = STEMS.iter().position(|&s| s == stem)?;
    Some((stem, Branch::from_symbol(branch)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zodiac_branch_bijection() {
        for (branch, zodiac) in Branch::ALL.into_iter().zip(Zodiac::ALL) {
            assert_eq!(zodiac, branch.zodiac());
            assert_eq!(branch, zodiac.branch());
            assert_eq!(Ok(zodiac), zodiac.name().parse());
        }
        let pairs: String = Branch::ALL
            .iter()
            .map(|b| format!("{b}{}", b.zodiac()))
            .collect();
        assert_eq!("子鼠丑牛寅虎卯兔辰龙巳蛇午马未羊申猴酉鸡戌狗亥猪", pairs);
    }

    #[test]
    fn unknown_zodiac() {
        assert_eq!(Err(UnknownZodiac("猫".into())), "猫".parse::<Zodiac>());
        assert!("".parse::<Zodiac>().is_err());
    }

    #[test]
    fn offsets_wrap() {
        assert_eq!(Branch::Wu, Branch::Zi.offset(6));
        assert_eq!(Branch::Hai, Branch::Zi.offset(-1));
        assert_eq!(Branch::Zi, Branch::Hai.offset(13));
    }

    #[test]
    fn sexagenary_names() {
        assert_eq!(Some((0, Branch::Zi)), split_sexagenary("甲子"));
        assert_eq!(Some((9, Branch::Hai)), split_sexagenary("癸亥"));
        for bad in ["", "甲", "甲子子", "子甲", "甲X"] {
            assert_eq!(None, split_sexagenary(bad), "{bad:?}");
        }
    }
}
