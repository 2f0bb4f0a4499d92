//! 建除十二神與每日宜忌
//!
//! 月建取自當日所在節（立春起寅月），日支與月建之差定值神：
//! 日支等於月建為「建」，其後依次為除、滿、平、定、執、破、危、成、收、開、閉。

use super::cycle::Branch;

/// 建除十二神
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Officer {
    Establish,
    Remove,
    Full,
    Balance,
    Stable,
    Initiate,
    Destruction,
    Danger,
    Success,
    Receive,
    Open,
    Close,
}

impl Officer {
    const ALL: [Officer; 12] = [
        Officer::Establish,
        Officer::Remove,
        Officer::Full,
        Officer::Balance,
        Officer::Stable,
        Officer::Initiate,
        Officer::Destruction,
        Officer::Danger,
        Officer::Success,
        Officer::Receive,
        Officer::Open,
        Officer::Close,
    ];

    /// 由月建與日支定值神。
    ///
    /// ```
    /// use wannianli::chinese::Branch;
    /// use wannianli::chinese::officer::Officer;
    ///
    /// assert_eq!(Officer::Establish, Officer::of_day(Branch::Yin, Branch::Yin));
    /// assert_eq!(Officer::Close, Officer::of_day(Branch::Yin, Branch::Chou));
    /// ```
    pub fn of_day(month_branch: Branch, day_branch: Branch) -> Self {
        Self::ALL[(day_branch.index() + 12 - month_branch.index()) % 12]
    }

    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = ["建", "除", "满", "平", "定", "执", "破", "危", "成", "收", "开", "闭"];
        NAMES[self as usize]
    }

    /// 宜
    pub fn recommends(self) -> &'static [&'static str] {
        use Officer::*;
        match self {
            Establish => &["出行", "上任", "祈福", "会友"],
            Remove => &["祭祀", "祈福", "解除", "沐浴", "求医"],
            Full => &["祭祀", "祈福", "开市", "交易", "纳财"],
            Balance => &["祭祀", "修造", "涂泥"],
            Stable => &["嫁娶", "纳采", "订盟", "交易", "立券", "入宅", "安床"],
            Initiate => &["祭祀", "祈福", "纳采", "捕捉"],
            Destruction => &["求医", "破屋", "坏垣"],
            Danger => &["祭祀", "安床", "祈福"],
            Success => &["嫁娶", "开市", "入宅", "移徙", "出行", "交易", "纳财", "立券"],
            Receive => &["纳财", "纳采", "祈福", "捕捉"],
            Open => &["嫁娶", "开市", "出行", "入宅", "移徙", "修造", "动土"],
            Close => &["安葬", "启钻", "破土", "筑堤"],
        }
    }

    /// 忌
    pub fn avoids(self) -> &'static [&'static str] {
        use Officer::*;
        match self {
            Establish => &["动土", "开仓", "安葬", "破土"],
            Remove => &["嫁娶", "出行", "移徙"],
            Full => &["安葬", "破土", "动土"],
            Balance => &["嫁娶", "开市", "出行"],
            Stable => &["出行", "诉讼"],
            Initiate => &["开市", "移徙", "出行"],
            Destruction => &["嫁娶", "出行", "开市", "入宅", "安葬"],
            Danger => &["出行", "登高", "嫁娶"],
            Success => &["诉讼"],
            Receive => &["安葬", "出行"],
            Open => &["安葬", "破土"],
            Close => &["开市", "出行", "嫁娶"],
        }
    }
}

/// 由節氣序號（1..=24，立春為 1）取月建。交節前的中氣仍屬上一節所建之月。
///
/// ```
/// use wannianli::chinese::Branch;
/// use wannianli::chinese::officer::month_branch;
///
/// assert_eq!(Branch::Yin, month_branch(1)); // 立春
/// assert_eq!(Branch::Yin, month_branch(2)); // 雨水
/// assert_eq!(Branch::Chou, month_branch(24)); // 大寒
/// ```
pub fn month_branch(term: u32) -> Branch {
    let jie = (term.saturating_sub(1) / 2) as i32;
    Branch::Yin.offset(jie)
}
