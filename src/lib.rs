//! Perpetual calendar with Chinese lunisolar data.
//!
//! The central piece is [`build_month_grid`], which lays out six Sunday-first
//! weeks around a month and asks a [`DayOracle`] for each day's lunar date,
//! sexagenary name, solar term, festivals, legal holiday status and
//! recommended activities. Two matchers then work on a built grid:
//! [`find_favorable_days`] for an activity, and [`fortune::classify_month`]
//! for zodiac compatibility.
//!
//! [`LunisolarOracle`] computes the lunisolar data for 1900 through most of
//! 2100 from astronomical formulas, see [`chinese`].
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use wannianli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.weekday_from_sunday()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! A month grid:
//!
//! ```
//! use wannianli::{Date, LunisolarOracle, build_month_grid, find_favorable_days};
//! use wannianli::fortune::forecast_for_name;
//! use wannianli::relations::ActivityKeywordMap;
//!
//! let today = Date::from_gregorian(2024, 2, 10).unwrap();
//! let grid = build_month_grid(2024, 2, today, &LunisolarOracle).unwrap();
//!
//! let today = grid.today().unwrap();
//! assert_eq!(("正月", "初一"), (
//!     today.facts.lunar_month_name.as_str(),
//!     today.facts.lunar_day_name.as_str(),
//! ));
//!
//! let moving = find_favorable_days(&grid, "搬家", ActivityKeywordMap::standard()).unwrap();
//! let forecast = forecast_for_name(&grid, "鼠").unwrap();
//! assert!(!moving.is_empty() && !forecast.cautionary.is_empty());
//! ```

pub mod chinese;
pub mod config;
pub mod date;
pub mod error;
pub mod favorable;
pub mod fortune;
pub mod grid;
pub mod oracle;
pub mod relations;
pub mod time_scales;

pub use chinese::holiday::HolidayStatus;
pub use config::{Almanac, AlmanacConfig};
pub use date::{Date, YearType};
pub use error::{Error, Result};
pub use favorable::find_favorable_days;
pub use grid::{CalendarCell, GridSlot, MonthGrid, build_month_grid};
pub use oracle::{DayFacts, DayOracle, LunisolarOracle, OracleError};
