//! Favorable-day finder.

use crate::error::Result;
use crate::grid::{CalendarCell, MonthGrid};
use crate::relations::ActivityKeywordMap;

/// Cells of `grid` whose recommended activities name any keyword of
/// `activity`, in grid order. Cells outside the displayed month count too.
///
/// Keywords match whole entries only: `入宅` matches a recommended `入宅`
/// but not `入宅安香`.
///
/// ```
/// use wannianli::relations::ActivityKeywordMap;
/// use wannianli::{Date, LunisolarOracle, build_month_grid, find_favorable_days};
///
/// let today = Date::from_gregorian(2024, 2, 1).unwrap();
/// let grid = build_month_grid(2024, 2, today, &LunisolarOracle).unwrap();
/// let days = find_favorable_days(&grid, "搬家", ActivityKeywordMap::standard()).unwrap();
/// assert!(days.iter().all(|c| c.facts.recommends.iter().any(|r| r == "移徙" || r == "入宅")));
/// ```
pub fn find_favorable_days<'g>(
    grid: &'g MonthGrid,
    activity: &str,
    keywords: &ActivityKeywordMap,
) -> Result<Vec<&'g CalendarCell>> {
    let wanted = keywords.keywords_for(activity)?;
    let days: Vec<_> = grid
        .iter()
        .filter(|cell| {
            cell.facts
                .recommends
                .iter()
                .any(|recommended| wanted.contains(recommended))
        })
        .collect();
    log::debug!(
        "{} favorable days for {activity} in {:04}-{:02}",
        days.len(),
        grid.year(),
        grid.month()
    );
    Ok(days)
}
