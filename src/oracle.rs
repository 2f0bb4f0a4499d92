//! Per-date lunisolar facts and the oracle that supplies them.

use serde::Serialize;
use thiserror::Error;

use crate::chinese::holiday::{self, ConflictingFlags, HolidayStatus};
use crate::chinese::officer::{self, Officer};
use crate::chinese::{self, Annus, Branch, CalendarError, Month, SolarTermErr, festival, fmt};
use crate::date::Date;

/// Everything the calendar knows about one date beyond its Gregorian
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayFacts {
    /// e.g. `初一`
    pub lunar_day_name: String,
    /// e.g. `正月`, `闰六月`
    pub lunar_month_name: String,
    /// Stem and branch of the day, e.g. `甲子`
    pub sexagenary_day_name: String,
    /// Present only on the day the term begins.
    pub term_name: Option<String>,
    /// Solar-calendar festival first, then lunar.
    pub festival_names: Vec<String>,
    pub holiday: HolidayStatus,
    /// The legal holiday arrangement a holiday or make-up workday belongs
    /// to, e.g. `春节`.
    pub holiday_name: Option<String>,
    /// Recommended activities (宜).
    pub recommends: Vec<String>,
    /// Avoided activities (忌).
    pub avoids: Vec<String>,
}

impl DayFacts {
    /// Branch of the day's sexagenary name, validating the name on the way.
    pub fn day_branch(&self) -> Result<Branch, OracleError> {
        chinese::cycle::split_sexagenary(&self.sexagenary_day_name)
            .map(|(_, branch)| branch)
            .ok_or_else(|| OracleError::MalformedSexagenary(self.sexagenary_day_name.clone()))
    }
}

/// Failure to produce facts for a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("date outside supported range")]
    OutOfRange,
    #[error("sexagenary name {0:?} is not a stem followed by a branch")]
    MalformedSexagenary(String),
    #[error(transparent)]
    ConflictingHolidayFlags(#[from] ConflictingFlags),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("solar term lookup failed: {0}")]
    SolarTerm(#[from] SolarTermErr),
    #[error("lunar date lookup failed: {0}")]
    LunarDate(#[from] chinese::OtherAnnus),
}

/// Source of [`DayFacts`]. Implementations must be pure: the same date
/// always yields the same facts.
pub trait DayOracle {
    fn day_facts(&self, date: Date) -> Result<DayFacts, OracleError>;
}

impl<O: DayOracle + ?Sized> DayOracle for &O {
    fn day_facts(&self, date: Date) -> Result<DayFacts, OracleError> {
        (**self).day_facts(date)
    }
}

/// Computes [`DayFacts`] from the built-in lunisolar reckoning, festival
/// and legal-holiday tables, and the day officers for recommended and
/// avoided activities.
///
/// Supports every date the computed ephemeris covers, at least 1900-01-01
/// through 2100-10-31. Other dates are [`OracleError::OutOfRange`].
///
/// ```
/// use wannianli::{Date, DayOracle, LunisolarOracle};
///
/// let facts = LunisolarOracle.day_facts(Date::from_gregorian(2024, 2, 10).unwrap()).unwrap();
/// assert_eq!("正月", facts.lunar_month_name);
/// assert_eq!("初一", facts.lunar_day_name);
/// assert_eq!("甲辰", facts.sexagenary_day_name);
/// assert_eq!(vec!["春节".to_owned()], facts.festival_names);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct LunisolarOracle;

fn lunar_ymd(date: Date) -> Result<(Annus, Month, u32), OracleError> {
    let annus = Annus::from_date(date).map_err(|err| match err {
        CalendarError::NoData(_) => OracleError::OutOfRange,
        err => err.into(),
    })?;
    let (_, month, day) = annus.ymd_for(date)?;
    Ok((annus, month, day))
}

impl DayOracle for LunisolarOracle {
    fn day_facts(&self, date: Date) -> Result<DayFacts, OracleError> {
        let (_, month, day) = date.gregorian();
        let (annus, lunar_month, lunar_day) = lunar_ymd(date)?;
        let (_, term, since_term) = annus.solar_term_for(date).map_err(|err| match err {
            SolarTermErr::NoData => OracleError::OutOfRange,
            err => err.into(),
        })?;
        let sexagenary = date.sexagenary();

        let eve = lunar_month == Month::Common(12) && lunar_day >= 29 && {
            let (_, next_month, next_day) = lunar_ymd(date + 1)?;
            (next_month, next_day) == (Month::Common(1), 1)
        };
        let festival_names = [
            festival::solar(month, day),
            festival::lunar(festival::LunarDay {
                month: lunar_month,
                day: lunar_day,
                term: (since_term == 0).then_some(term),
                eve,
            }),
        ]
        .into_iter()
        .flatten()
        .map(str::to_owned)
        .collect();

        let day_branch = Branch::from_index((sexagenary - 1) as usize);
        let officer = Officer::of_day(officer::month_branch(term), day_branch);
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|&s| s.to_owned()).collect() };
        let (holiday, observance) = holiday::lookup(date);

        Ok(DayFacts {
            lunar_day_name: fmt::day(lunar_day),
            lunar_month_name: lunar_month.name(),
            sexagenary_day_name: fmt::sexagenary(sexagenary),
            term_name: (since_term == 0).then(|| fmt::solar_term(term).to_owned()),
            festival_names,
            holiday,
            holiday_name: observance.map(|o| o.name.to_owned()),
            recommends: owned(officer.recommends()),
            avoids: owned(officer.avoids()),
        })
    }
}
