//! Month grid construction.
//!
//! A grid is six Sunday-first weeks covering the requested month, each cell
//! carrying the oracle's [`DayFacts`] for its date.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::date::Date;
use crate::error::{Error, Result};
use crate::oracle::{DayFacts, DayOracle, OracleError};

/// Number of cells in every grid.
pub const GRID_LEN: usize = 42;

/// One day of a [`MonthGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: Date,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Whether the cell falls in the month the grid was built for.
    pub in_displayed_month: bool,
    /// Whether the cell is the "today" given at construction.
    pub is_today: bool,
    #[serde(flatten)]
    pub facts: DayFacts,
}

/// Six weeks of [`CalendarCell`]s, starting on the Sunday on or before the
/// first of the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }
    /// Always [`GRID_LEN`] cells in date order.
    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }
    pub fn iter(&self) -> std::slice::Iter<'_, CalendarCell> {
        self.cells.iter()
    }
    pub fn today(&self) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.is_today)
    }

    /// `(year, month)` of the month after this grid's, for paging forward.
    ///
    /// ```
    /// use wannianli::{Date, LunisolarOracle, build_month_grid};
    ///
    /// let today = Date::from_gregorian(2024, 12, 1).unwrap();
    /// let grid = build_month_grid(2024, 12, today, &LunisolarOracle).unwrap();
    /// assert_eq!((2025, 1), grid.next_month());
    /// assert_eq!((2024, 11), grid.prev_month());
    /// ```
    pub fn next_month(&self) -> (i32, u32) {
        match self.month {
            12 => (self.year + 1, 1),
            m => (self.year, m + 1),
        }
    }
    /// `(year, month)` of the month before this grid's.
    pub fn prev_month(&self) -> (i32, u32) {
        match self.month {
            1 => (self.year - 1, 12),
            m => (self.year, m - 1),
        }
    }
}

impl<'a> IntoIterator for &'a MonthGrid {
    type Item = &'a CalendarCell;
    type IntoIter = std::slice::Iter<'a, CalendarCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn oracle_failure(date: Date, source: OracleError) -> Error {
    log::warn!("day oracle failed for {date}: {source}");
    Error::Oracle { date, source }
}

/// Builds the grid for `month` of `year`, marking `today`.
///
/// The oracle is consulted once per cell, in date order. Any failure,
/// including a malformed sexagenary name, aborts the build.
///
/// ```
/// use wannianli::{Date, LunisolarOracle, build_month_grid};
///
/// let today = Date::from_gregorian(2024, 2, 10).unwrap();
/// let grid = build_month_grid(2024, 2, today, &LunisolarOracle).unwrap();
/// assert_eq!(42, grid.cells().len());
/// assert_eq!((2024, 1, 28), grid.cells()[0].date.gregorian());
/// assert_eq!("春节", grid.today().unwrap().facts.festival_names[0]);
/// ```
pub fn build_month_grid<O: DayOracle>(
    year: i32,
    month: u32,
    today: Date,
    oracle: O,
) -> Result<MonthGrid> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidMonth(month));
    }
    let first = Date::from_gregorian(year, month, 1)
        .ok_or(Error::UnrepresentableMonth { year, month })?;
    let start = first - first.weekday_from_sunday() as i32;
    log::debug!("building grid for {year:04}-{month:02} from {start}");

    let mut cells = Vec::with_capacity(GRID_LEN);
    for offset in 0..GRID_LEN as i32 {
        let date = start + offset;
        let facts = oracle
            .day_facts(date)
            .and_then(|facts| facts.day_branch().map(|_| facts))
            .map_err(|source| oracle_failure(date, source))?;
        let (y, m, d) = date.gregorian();
        cells.push(CalendarCell {
            date,
            year: y,
            month: m,
            day: d,
            in_displayed_month: m == month,
            is_today: date == today,
            facts,
        });
    }
    Ok(MonthGrid { year, month, cells })
}

/// A request number handed out by [`GridSlot::begin`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Ticket(u64);

/// Holds the grid on display. When builds overlap, only the most recently
/// begun one is installed, whatever order they finish in.
#[derive(Debug, Default)]
pub struct GridSlot {
    issued: AtomicU64,
    current: RwLock<Option<Arc<MonthGrid>>>,
}

impl GridSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request, superseding all earlier ones.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Installs `grid` if `ticket` is the latest issued. Returns whether it
    /// was installed.
    pub fn publish(&self, ticket: Ticket, grid: MonthGrid) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if ticket.0 != self.issued.load(Ordering::SeqCst) {
            log::debug!(
                "discarding grid {:04}-{:02} from superseded request",
                grid.year,
                grid.month
            );
            return false;
        }
        *current = Some(Arc::new(grid));
        true
    }

    /// Begins a request, builds the grid and publishes it. A failed build
    /// leaves the current grid in place.
    pub fn refresh<O: DayOracle>(
        &self,
        year: i32,
        month: u32,
        today: Date,
        oracle: O,
    ) -> Result<bool> {
        let ticket = self.begin();
        let grid = build_month_grid(year, month, today, oracle)?;
        Ok(self.publish(ticket, grid))
    }

    pub fn current(&self) -> Option<Arc<MonthGrid>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::HolidayStatus;
    use crate::chinese::fmt;

    /// Names each day after its real sexagenary number and records calls.
    #[derive(Default)]
    struct Stub {
        calls: RefCell<Vec<Date>>,
        fail_on: Option<Date>,
        bad_name_on: Option<Date>,
    }

    impl DayOracle for Stub {
        fn day_facts(&self, date: Date) -> std::result::Result<DayFacts, OracleError> {
            self.calls.borrow_mut().push(date);
            if Some(date) == self.fail_on {
                return Err(OracleError::OutOfRange);
            }
            let sexagenary_day_name = if Some(date) == self.bad_name_on {
                "甲".to_owned()
            } else {
                fmt::sexagenary(date.sexagenary())
            };
            Ok(DayFacts {
                lunar_day_name: "初一".into(),
                lunar_month_name: "正月".into(),
                sexagenary_day_name,
                term_name: None,
                festival_names: vec![],
                holiday: HolidayStatus::Unknown,
                holiday_name: None,
                recommends: vec![],
                avoids: vec![],
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn layout() {
        for (year, month, first_cell) in [
            (2018, 12, (2018, 11, 25)),
            (2024, 9, (2024, 9, 1)),
            (2021, 2, (2021, 1, 31)),
            (2000, 1, (1999, 12, 26)),
        ] {
            let grid = build_month_grid(year, month, date(1990, 1, 1), Stub::default()).unwrap();
            assert_eq!(GRID_LEN, grid.cells().len());
            let c = &grid.cells()[0];
            assert_eq!(first_cell, (c.year, c.month, c.day), "{year}-{month}");
            assert_eq!(0, c.date.weekday_from_sunday());
            assert_eq!(None, grid.today());
        }
    }

    #[test]
    fn calls_in_date_order() {
        let stub = Stub::default();
        let grid = build_month_grid(2024, 3, date(2024, 3, 5), &stub).unwrap();
        let calls = stub.calls.borrow();
        assert_eq!(GRID_LEN, calls.len());
        assert!(calls.windows(2).all(|w| w[1] - w[0] == 1));
        assert_eq!(
            calls.as_slice(),
            grid.iter().map(|c| c.date).collect::<Vec<_>>()
        );
        assert_eq!(Some(date(2024, 3, 5)), grid.today().map(|c| c.date));
    }

    #[test]
    fn invalid_month_before_oracle() {
        for month in [0, 13] {
            let stub = Stub::default();
            assert!(matches!(
                build_month_grid(2024, month, date(2024, 1, 1), &stub),
                Err(Error::InvalidMonth(m)) if m == month
            ));
            assert!(stub.calls.borrow().is_empty());
        }
    }

    #[test]
    fn oracle_failure_aborts() {
        let stub = Stub {
            fail_on: Some(date(2024, 3, 10)),
            ..Stub::default()
        };
        match build_month_grid(2024, 3, date(2024, 3, 1), &stub) {
            Err(Error::Oracle { date: failed, source }) => {
                assert_eq!(date(2024, 3, 10), failed);
                assert_eq!(OracleError::OutOfRange, source);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(date(2024, 3, 10), *stub.calls.borrow().last().unwrap());
    }

    #[test]
    fn unrepresentable_month_before_oracle() {
        for year in [i32::MAX, -4714] {
            let stub = Stub::default();
            assert!(matches!(
                build_month_grid(year, 1, date(2024, 1, 1), &stub),
                Err(Error::UnrepresentableMonth { year: y, month: 1 }) if y == year
            ));
            assert!(stub.calls.borrow().is_empty());
        }
    }

    #[test]
    fn paging_wraps_years() {
        let today = date(2024, 1, 1);
        let grid = |year, month| build_month_grid(year, month, today, Stub::default()).unwrap();
        assert_eq!((2019, 1), grid(2018, 12).next_month());
        assert_eq!((2018, 11), grid(2018, 12).prev_month());
        assert_eq!((2024, 2), grid(2024, 1).next_month());
        assert_eq!((2023, 12), grid(2024, 1).prev_month());

        let mut page = (2023, 11);
        for _ in 0..14 {
            page = grid(page.0, page.1).next_month();
        }
        assert_eq!((2025, 1), page);
        for _ in 0..14 {
            page = grid(page.0, page.1).prev_month();
        }
        assert_eq!((2023, 11), page);
    }

    #[test]
    fn malformed_sexagenary_aborts() {
        let stub = Stub {
            bad_name_on: Some(date(2024, 4, 2)),
            ..Stub::default()
        };
        assert!(matches!(
            build_month_grid(2024, 3, date(2024, 3, 1), &stub),
            Err(Error::Oracle { source: OracleError::MalformedSexagenary(_), .. })
        ));
    }

    #[test]
    fn latest_request_wins() {
        let slot = GridSlot::new();
        let today = date(2024, 1, 1);
        let grid = |month| build_month_grid(2024, month, today, Stub::default()).unwrap();

        let march = slot.begin();
        let april = slot.begin();
        assert!(slot.publish(april, grid(4)));
        assert!(!slot.publish(march, grid(3)));
        assert_eq!(Some(4), slot.current().map(|g| g.month()));

        let may = slot.begin();
        let june = slot.begin();
        assert!(!slot.publish(may, grid(5)));
        assert_eq!(Some(4), slot.current().map(|g| g.month()));
        assert!(slot.publish(june, grid(6)));
        assert_eq!(Some(6), slot.current().map(|g| g.month()));
    }

    #[test]
    fn failed_refresh_keeps_grid() {
        let slot = GridSlot::new();
        let today = date(2024, 1, 1);
        assert!(matches!(slot.refresh(2024, 7, today, Stub::default()), Ok(true)));
        assert!(slot.refresh(2024, 13, today, Stub::default()).is_err());
        assert_eq!(Some(7), slot.current().map(|g| g.month()));
    }
}
