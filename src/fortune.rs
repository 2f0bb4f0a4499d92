//! Zodiac compatibility of the days in a grid.
//!
//! Each day's branch is compared with the branch of the user's zodiac
//! sign. The first matching rule of [`RULES`] decides the day's verdict;
//! days matching none are neutral and left out.

use serde::{Serialize, Serializer};

use crate::chinese::{Branch, Zodiac};
use crate::error::{Error, Result};
use crate::grid::{CalendarCell, MonthGrid};
use crate::relations::{Relation, RelationTables};

/// Strength of a verdict.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 大吉
    GreatLuck,
    /// 吉
    Luck,
    /// 冲
    Clash,
    /// 害
    Harm,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::GreatLuck => "大吉",
            Tier::Luck => "吉",
            Tier::Clash => "冲",
            Tier::Harm => "害",
        }
    }
    pub fn is_favorable(self) -> bool {
        matches!(self, Tier::GreatLuck | Tier::Luck)
    }
}

/// Checked in order; the first relation that holds wins.
pub const RULES: [(Relation, Tier); 4] = [
    (Relation::Harmony, Tier::GreatLuck),
    (Relation::Triad, Tier::Luck),
    (Relation::Clash, Tier::Clash),
    (Relation::Harm, Tier::Harm),
];

/// The verdict for a day of branch `day` to someone born under `user`,
/// or `None` if neutral.
///
/// ```
/// use wannianli::chinese::{Branch, Zodiac};
/// use wannianli::fortune::{Tier, classify_day};
/// use wannianli::relations::Relation;
///
/// assert_eq!(Some((Relation::Harmony, Tier::GreatLuck)), classify_day(Zodiac::Rat, Branch::Chou));
/// assert_eq!(None, classify_day(Zodiac::Rat, Branch::Zi));
/// ```
pub fn classify_day(user: Zodiac, day: Branch) -> Option<(Relation, Tier)> {
    let tables = RelationTables::get();
    RULES
        .into_iter()
        .find(|&(relation, _)| tables.relates(relation, user.branch(), day))
}

/// A non-neutral day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classified<'a> {
    #[serde(serialize_with = "serialize_cell_date")]
    pub cell: &'a CalendarCell,
    pub tier: Tier,
    pub relation: Relation,
    /// The zodiac of the day's branch.
    pub zodiac: Zodiac,
}

fn serialize_cell_date<S: Serializer>(
    cell: &&CalendarCell,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    cell.date.serialize(serializer)
}

impl Classified<'_> {
    /// e.g. `六合 (牛)`
    pub fn reason(&self) -> String {
        format!("{} ({})", self.relation, self.zodiac)
    }
}

/// Favorable and cautionary days of a grid, each in grid order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Forecast<'a> {
    pub favorable: Vec<Classified<'a>>,
    pub cautionary: Vec<Classified<'a>>,
}

/// Classifies every cell of `grid`, including those of adjacent months.
pub fn classify_month(grid: &MonthGrid, user: Zodiac) -> Result<Forecast<'_>> {
    let mut forecast = Forecast::default();
    for cell in grid {
        let branch = cell.facts.day_branch().map_err(|source| Error::Oracle {
            date: cell.date,
            source,
        })?;
        let Some((relation, tier)) = classify_day(user, branch) else {
            continue;
        };
        let entry = Classified {
            cell,
            tier,
            relation,
            zodiac: branch.zodiac(),
        };
        if tier.is_favorable() {
            forecast.favorable.push(entry);
        } else {
            forecast.cautionary.push(entry);
        }
    }
    log::debug!(
        "{user}: {} favorable, {} cautionary days in {:04}-{:02}",
        forecast.favorable.len(),
        forecast.cautionary.len(),
        grid.year(),
        grid.month()
    );
    Ok(forecast)
}

/// Parses `zodiac` by its Chinese name (e.g. `鼠`) and classifies `grid`.
///
/// ```
/// use wannianli::{Date, LunisolarOracle, build_month_grid};
/// use wannianli::fortune::forecast_for_name;
///
/// let today = Date::from_gregorian(2024, 2, 1).unwrap();
/// let grid = build_month_grid(2024, 2, today, &LunisolarOracle).unwrap();
/// let forecast = forecast_for_name(&grid, "龙").unwrap();
/// // Three favorable branches in every twelve days.
/// assert!(forecast.favorable.len() >= 9);
/// assert!(forecast_for_name(&grid, "龍").is_err());
/// ```
pub fn forecast_for_name<'g>(grid: &'g MonthGrid, zodiac: &str) -> Result<Forecast<'g>> {
    classify_month(grid, zodiac.parse()?)
}
