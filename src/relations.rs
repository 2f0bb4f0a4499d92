//! Static relation data: branch relations (六合, 三合, 六冲, 六害) and the
//! activity keyword map used by the favorable-day finder.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::chinese::Branch;
use crate::error::{Error, Result};

/// A relation between two earthly branches.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// 六合
    Harmony,
    /// 三合
    Triad,
    /// 六冲
    Clash,
    /// 六害
    Harm,
}

impl Relation {
    pub fn name(self) -> &'static str {
        match self {
            Relation::Harmony => "六合",
            Relation::Triad => "三合",
            Relation::Clash => "六冲",
            Relation::Harm => "六害",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const HARMONY: [&str; 6] = ["子丑", "寅亥", "卯戌", "辰酉", "巳申", "午未"];
const TRIADS: [&str; 4] = ["申子辰", "亥卯未", "寅午戌", "巳酉丑"];
const CLASH: [&str; 6] = ["子午", "丑未", "寅申", "卯酉", "辰戌", "巳亥"];
const HARM: [&str; 6] = ["子未", "丑午", "寅巳", "卯辰", "申亥", "酉戌"];

/// Branch relation lookup, indexed by [`Branch::index`].
///
/// Every table is derived from an unordered list so both directions come
/// from the same entry.
#[derive(Debug, Clone)]
pub struct RelationTables {
    harmony: [Branch; 12],
    triad: [[Branch; 2]; 12],
    clash: [Branch; 12],
    harm: [Branch; 12],
}

fn branches(group: &str) -> Vec<Branch> {
    group
        .chars()
        .map(|c| Branch::from_symbol(c).unwrap_or_else(|| panic!("{c:?} in {group:?} is not a branch")))
        .collect()
}

/// Builds a symmetric partner table, each branch covered exactly once.
fn partners(relation: Relation, pairs: &[&str]) -> [Branch; 12] {
    let mut table = [None; 12];
    for pair in pairs {
        let &[a, b] = branches(pair).as_slice() else {
            panic!("{relation} entry {pair:?} is not a pair");
        };
        for (from, to) in [(a, b), (b, a)] {
            let slot = &mut table[from.index()];
            assert!(slot.is_none(), "{relation}: {from} listed twice");
            *slot = Some(to);
        }
    }
    table.map(|partner| partner.unwrap_or_else(|| panic!("{relation}: a branch has no partner")))
}

fn triads(groups: &[&str]) -> [[Branch; 2]; 12] {
    let mut table = [None; 12];
    for group in groups {
        let &[a, b, c] = branches(group).as_slice() else {
            panic!("三合 entry {group:?} is not a triad");
        };
        for (from, others) in [(a, [b, c]), (b, [a, c]), (c, [a, b])] {
            let slot = &mut table[from.index()];
            assert!(slot.is_none(), "三合: {from} listed twice");
            *slot = Some(others);
        }
    }
    table.map(|others| others.unwrap_or_else(|| panic!("三合: a branch has no triad")))
}

impl RelationTables {
    /// The fixed reference tables, built and validated on first use.
    ///
    /// Panics on first use if the built-in data is inconsistent.
    ///
    /// ```
    /// use wannianli::chinese::Branch;
    /// use wannianli::relations::{Relation, RelationTables};
    ///
    /// let tables = RelationTables::get();
    /// assert_eq!(Branch::Chou, tables.harmony(Branch::Zi));
    /// assert!(tables.relates(Relation::Clash, Branch::Wu, Branch::Zi));
    /// ```
    pub fn get() -> &'static Self {
        static TABLES: OnceLock<RelationTables> = OnceLock::new();
        TABLES.get_or_init(Self::build)
    }

    fn build() -> Self {
        let tables = Self {
            harmony: partners(Relation::Harmony, &HARMONY),
            triad: triads(&TRIADS),
            clash: partners(Relation::Clash, &CLASH),
            harm: partners(Relation::Harm, &HARM),
        };
        for branch in Branch::ALL {
            assert_ne!(
                tables.harmony(branch),
                tables.clash(branch),
                "{branch}: 六合 and 六冲 partners coincide"
            );
        }
        log::trace!("relation tables built");
        tables
    }

    pub fn harmony(&self, branch: Branch) -> Branch {
        self.harmony[branch.index()]
    }
    /// The two other members of `branch`'s triad.
    pub fn triad(&self, branch: Branch) -> [Branch; 2] {
        self.triad[branch.index()]
    }
    pub fn clash(&self, branch: Branch) -> Branch {
        self.clash[branch.index()]
    }
    pub fn harm(&self, branch: Branch) -> Branch {
        self.harm[branch.index()]
    }

    /// Whether `a` stands in `relation` to `b`. Every relation is symmetric.
    pub fn relates(&self, relation: Relation, a: Branch, b: Branch) -> bool {
        match relation {
            Relation::Harmony => self.harmony(a) == b,
            Relation::Triad => self.triad(a).contains(&b),
            Relation::Clash => self.clash(a) == b,
            Relation::Harm => self.harm(a) == b,
        }
    }
}

const ACTIVITIES: [&str; 20] = [
    "嫁娶", "出行", "搬家", "开业", "祭祀", "祈福", "安床", "修造", "动土", "交易", "立券", "纳财",
    "入宅", "移徙", "解除", "破土", "启钻", "安葬", "订盟", "纳采",
];
const KEYWORDS: [(&str, &[&str]); 3] = [
    ("搬家", &["移徙", "入宅"]),
    ("开业", &["开市", "开业"]),
    ("嫁娶", &["嫁娶", "结婚"]),
];

/// Selectable activities and the almanac terms that count as recommending
/// each of them.
///
/// An activity without an entry in `keywords` matches its own name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityKeywordMap {
    /// In presentation order.
    pub activities: Vec<String>,
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Default for ActivityKeywordMap {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl ActivityKeywordMap {
    /// The built-in map, built once per process.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<ActivityKeywordMap> = OnceLock::new();
        STANDARD.get_or_init(|| ActivityKeywordMap {
            activities: ACTIVITIES.iter().map(|&a| a.to_owned()).collect(),
            keywords: KEYWORDS
                .iter()
                .map(|&(activity, words)| {
                    let words = words.iter().map(|&w| w.to_owned()).collect();
                    (activity.to_owned(), words)
                })
                .collect(),
        })
    }

    /// Parses a map from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Keywords for `activity`, in order.
    ///
    /// ```
    /// use wannianli::relations::ActivityKeywordMap;
    ///
    /// let map = ActivityKeywordMap::standard();
    /// assert_eq!(["移徙", "入宅"], map.keywords_for("搬家").unwrap());
    /// assert_eq!(["祭祀"], map.keywords_for("祭祀").unwrap());
    /// assert!(map.keywords_for("钓鱼").is_err());
    /// ```
    pub fn keywords_for(&self, activity: &str) -> Result<&[String]> {
        let selectable = self
            .activities
            .iter()
            .find(|a| *a == activity)
            .ok_or_else(|| Error::UnknownActivity(activity.to_owned()))?;
        Ok(self
            .keywords
            .get(activity)
            .map_or(std::slice::from_ref(selectable), Vec::as_slice))
    }
}
