//! Deals with different time scales, specifically, conversion from TDB/TT into
//! UT.
//!
//! Only conversions necessary for the lunisolar computations in this crate
//! are included.

use crate::date::Date;

/// [Barycentric dynamic time](https://en.wikipedia.org/wiki/Barycentric_Dynamical_Time),
/// represented in Julian date (JD).
///
/// Ephemeris computations are carried out in this time scale, and results
/// should be converted to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tdb(pub f64);

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Note: Because TT differs no more than centisenconds from TDB during
/// thousands of years, they are treated numerically the same in this crate for
/// calendar calculation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl From<Tdb> for Tt {
    fn from(tdb: Tdb) -> Tt {
        Tt(tdb.0)
    }
}

impl Tt {
    /// Decimal Gregorian year of the instant, precise enough for ΔT lookup.
    pub fn decimal_year(&self) -> f64 {
        2000.0 + (self.0 - 2451544.5) / 365.2425
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// Computed from TT by subtracting ΔT, estimated with the polynomial
/// expressions of Espenak and Meeus. Leap seconds are not modelled, so this
/// is UT1 rather than UTC; the two never differ by more than a second.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TT (or TDB) instant into UT.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// ```
    pub fn convert<T>(time: T) -> Self
    where
        T: Into<Tt>,
    {
        let tt = time.into();
        Ut(tt.0 - delta_t(tt.decimal_year()) / 86400.0)
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Beijing time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use wannianli::time_scales::{Tdb, Ut};
    /// let tdb = Tdb(2451543.166666667);
    /// let ut = Ut::convert(tdb);
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

/// ΔT = TT − UT in seconds for a decimal year.
///
/// Piecewise polynomials fitted to historical observations up to 2005 and
/// extrapolated beyond; outside 1900..2150 the long-term parabola is used.
pub fn delta_t(year: f64) -> f64 {
    let y = year;
    let parabola = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    if y < 1900.0 {
        parabola(y)
    } else if y < 1920.0 {
        let t = y - 1900.0;
        -2.79 + t * (1.494119 + t * (-0.0598939 + t * (0.0061966 - 0.000197 * t)))
    } else if y < 1941.0 {
        let t = y - 1920.0;
        21.20 + t * (0.84493 + t * (-0.076100 + 0.0020936 * t))
    } else if y < 1961.0 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t * t * t / 2547.0
    } else if y < 1986.0 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t * t * t / 718.0
    } else if y < 2005.0 {
        let t = y - 2000.0;
        63.86
            + t * (0.3345
                + t * (-0.060374 + t * (0.0017275 + t * (0.000651814 + 0.00002373599 * t))))
    } else if y < 2050.0 {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if y < 2150.0 {
        parabola(y) - 0.5628 * (2150.0 - y)
    } else {
        parabola(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tdb_to_ut() {
        let tdb = Tdb(2451543.166666667);
        let ut = Ut::convert(tdb);
        assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
        assert_eq!((1999, 12, 30), ut.date_in_timezone(480).gregorian());
        let midnight_cst = 2451543.5 - 8.0 / 24.0;
        let ut_after_midnight = Ut(midnight_cst + 1.0 / 86400.0);
        let ut_before_midnight = Ut(midnight_cst - 1.0 / 86400.0);
        assert_eq!(
            (1999, 12, 30),
            ut_before_midnight.date_in_timezone(480).gregorian()
        );
        assert_eq!(
            (1999, 12, 31),
            ut_after_midnight.date_in_timezone(480).gregorian()
        );
    }

    #[test]
    fn delta_t_matches_observations() {
        // Observed values in seconds, rounded. The post-2005 branch is an
        // extrapolation and overshoots by about two seconds around 2020.
        for (year, observed) in [
            (1900.0, -2.8),
            (1950.0, 29.1),
            (1980.0, 50.5),
            (2000.0, 63.8),
            (2020.0, 69.4),
        ] {
            let dt = delta_t(year);
            assert!((dt - observed).abs() < 3.0, "{year}: {dt} vs {observed}");
        }
    }

    #[test]
    fn delta_t_is_continuous_enough() {
        for edge in [1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0, 2150.0] {
            let jump = (delta_t(edge) - delta_t(edge - 1e-6)).abs();
            assert!(jump < 2.0, "{edge}: {jump}");
        }
    }
}
