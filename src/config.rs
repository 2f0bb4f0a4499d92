//! Configuration and the [`Almanac`] facade.

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{Error, Result};
use crate::favorable::find_favorable_days;
use crate::fortune::{Forecast, forecast_for_name};
use crate::grid::{CalendarCell, MonthGrid, build_month_grid};
use crate::oracle::{DayOracle, LunisolarOracle};
use crate::relations::ActivityKeywordMap;

/// Beijing time.
pub const DEFAULT_TZ_OFFSET_MINUTES: i32 = 8 * 60;

/// User-adjustable settings.
///
/// Every field may be omitted from the JSON form:
///
/// ```
/// use wannianli::config::AlmanacConfig;
///
/// let config = AlmanacConfig::from_json(r#"{ "tz_offset_minutes": 0 }"#).unwrap();
/// assert_eq!(0, config.tz_offset_minutes);
/// assert_eq!(20, config.keywords.activities.len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlmanacConfig {
    /// Offset from UTC used to decide which date is "today".
    pub tz_offset_minutes: i32,
    pub keywords: ActivityKeywordMap,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            tz_offset_minutes: DEFAULT_TZ_OFFSET_MINUTES,
            keywords: ActivityKeywordMap::default(),
        }
    }
}

impl AlmanacConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A day oracle bundled with its configuration.
///
/// ```
/// use wannianli::config::AlmanacConfig;
/// use wannianli::{Almanac, Date};
///
/// let almanac = Almanac::from_config(AlmanacConfig::default());
/// let today = Date::from_gregorian(2025, 10, 6).unwrap();
/// let grid = almanac.grid_at(2025, 10, today).unwrap();
/// assert_eq!("八月", grid.today().unwrap().facts.lunar_month_name);
/// ```
#[derive(Debug, Clone)]
pub struct Almanac<O = LunisolarOracle> {
    oracle: O,
    config: AlmanacConfig,
}

impl Default for Almanac {
    fn default() -> Self {
        Self::from_config(AlmanacConfig::default())
    }
}

impl Almanac {
    pub fn from_config(config: AlmanacConfig) -> Self {
        Self::with_oracle(LunisolarOracle, config)
    }
}

impl<O: DayOracle> Almanac<O> {
    pub fn with_oracle(oracle: O, config: AlmanacConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &AlmanacConfig {
        &self.config
    }

    /// The grid for `month` of `year`, marking the current date in the
    /// configured timezone.
    pub fn grid(&self, year: i32, month: u32) -> Result<MonthGrid> {
        let offset = self.config.tz_offset_minutes;
        let today = Date::today(offset).ok_or(Error::InvalidTimezone(offset))?;
        self.grid_at(year, month, today)
    }

    /// The grid for `month` of `year` with an explicit `today`.
    pub fn grid_at(&self, year: i32, month: u32, today: Date) -> Result<MonthGrid> {
        build_month_grid(year, month, today, &self.oracle)
    }

    pub fn favorable_days<'g>(
        &self,
        grid: &'g MonthGrid,
        activity: &str,
    ) -> Result<Vec<&'g CalendarCell>> {
        find_favorable_days(grid, activity, &self.config.keywords)
    }

    pub fn zodiac_forecast<'g>(&self, grid: &'g MonthGrid, zodiac: &str) -> Result<Forecast<'g>> {
        forecast_for_name(grid, zodiac)
    }
}
