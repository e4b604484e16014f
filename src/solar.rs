// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Built-in sunrise/sunset backend
//!
//! [`NoaaSunTimes`] evaluates the NOAA low-precision solar equations
//! (Meeus, *Astronomical Algorithms*, ch. 25) at local solar noon and
//! derives apparent sunrise and sunset from the hour angle of a sun whose
//! centre sits 0.833° below the horizon (refraction plus semi-diameter).
//!
//! Everything is computed in UTC, so no timezone database is involved: the
//! calendar date of a place is its **local mean solar date**, i.e. the UTC
//! timestamp shifted by `longitude / 15` hours.
//!
//! Typical accuracy is about one minute for latitudes below ±60°,
//! degrading towards the polar circles where the sun grazes the horizon.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use qtty::{Day, Days, Seconds, Simplify};
use thiserror::Error;

use crate::route::Place;
use crate::sun::{SunTimeProvider, SunTimes, AVIATION_TWILIGHT_MARGIN};

/// Zenith angle of the sun's centre at apparent sunrise/sunset, in degrees.
const SUNRISE_ZENITH_DEG: f64 = 90.833;

const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);
const J2000: Days = Days::new(2_451_545.0);
const JULIAN_CENTURY: Days = Days::new(36_525.0);

/// Earth rotation: minutes of time per degree of longitude.
const MINUTES_PER_DEGREE: f64 = 4.0;

/// Reasons [`NoaaSunTimes`] cannot produce a daylight window.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SunTimeError {
    /// The sun does not rise on this date.
    #[error("sun stays below the horizon at latitude {latitude}° on {date}")]
    PolarNight { latitude: f64, date: NaiveDate },
    /// The sun does not set on this date.
    #[error("sun stays above the horizon at latitude {latitude}° on {date}")]
    MidnightSun { latitude: f64, date: NaiveDate },
    /// The instant cannot be shifted without leaving chrono's range.
    #[error("instant {0} is outside the supported date range")]
    OutOfRange(DateTime<Utc>),
}

/// Astronomical sunrise/sunset provider with a configurable aviation margin.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use nighttime::{NoaaSunTimes, Place, SunTimeProvider};
///
/// let palma = Place::new(39.5517, 2.73881, Utc.with_ymd_and_hms(2021, 12, 8, 12, 0, 0).unwrap());
/// let day = NoaaSunTimes::default().sun_times(&palma).unwrap();
/// assert!(day.contains(palma.timestamp()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoaaSunTimes {
    margin: Duration,
}

impl Default for NoaaSunTimes {
    fn default() -> Self {
        Self {
            margin: AVIATION_TWILIGHT_MARGIN,
        }
    }
}

impl NoaaSunTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the twilight margin; `Duration::zero()` yields civil
    /// (apparent) sunrise and sunset.
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    pub fn margin(&self) -> Duration {
        self.margin
    }
}

impl SunTimeProvider for NoaaSunTimes {
    type Error = SunTimeError;

    fn sun_times(&self, place: &Place) -> Result<SunTimes, Self::Error> {
        let latitude = place.latitude().value();
        let longitude = place.longitude().value();
        let at = place.timestamp();

        let local = at
            .checked_add_signed(minutes(MINUTES_PER_DEGREE * longitude))
            .ok_or(SunTimeError::OutOfRange(at))?;
        let date = local.date_naive();
        let midnight = date.and_time(NaiveTime::MIN).and_utc();

        let noon_jd = julian_day(midnight) + Days::new(0.5 - longitude / 360.0);
        let sun = SolarEphemeris::at(julian_centuries(noon_jd));

        let (lat, decl) = (latitude.to_radians(), sun.declination.to_radians());
        let cos_h = SUNRISE_ZENITH_DEG.to_radians().cos() / (lat.cos() * decl.cos())
            - lat.tan() * decl.tan();
        if cos_h > 1.0 {
            return Err(SunTimeError::PolarNight { latitude, date });
        }
        if cos_h < -1.0 {
            return Err(SunTimeError::MidnightSun { latitude, date });
        }
        let half_day = MINUTES_PER_DEGREE * cos_h.acos().to_degrees();

        // Minutes after 00:00 UTC of `date`.
        let noon = 720.0 - MINUTES_PER_DEGREE * longitude - sun.equation_of_time;
        let shift = |offset: f64, margin: Duration| {
            midnight
                .checked_add_signed(minutes(offset))
                .and_then(|t| t.checked_add_signed(margin))
                .ok_or(SunTimeError::OutOfRange(at))
        };

        let sunrise = shift(noon - half_day, -self.margin)?;
        let sunset = shift(noon + half_day, self.margin)?;
        Ok(SunTimes::new(sunrise, sunset))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Solar equations
// ═══════════════════════════════════════════════════════════════════════════

/// Declination (degrees) and equation of time (minutes) of the sun.
#[derive(Debug, Clone, Copy)]
struct SolarEphemeris {
    declination: f64,
    equation_of_time: f64,
}

impl SolarEphemeris {
    /// Evaluate at `t` Julian centuries since J2000.0.
    fn at(t: f64) -> Self {
        let mean_longitude = normalize_degrees(280.46646 + t * (36_000.76983 + t * 0.000_303_2));
        let mean_anomaly = normalize_degrees(357.52911 + t * (35_999.05029 - t * 0.000_153_7));
        let eccentricity = 0.016_708_634 - t * (0.000_042_037 + t * 0.000_000_126_7);

        let m = mean_anomaly.to_radians();
        let centre = m.sin() * (1.914_602 - t * (0.004_817 + t * 0.000_014))
            + (2.0 * m).sin() * (0.019_993 - t * 0.000_101)
            + (3.0 * m).sin() * 0.000_289;

        let omega = (125.04 - 1_934.136 * t).to_radians();
        let apparent_longitude = mean_longitude + centre - 0.005_69 - 0.004_78 * omega.sin();

        let mean_obliquity =
            23.0 + (26.0 + (21.448 - t * (46.815 + t * (0.000_59 - t * 0.001_813))) / 60.0) / 60.0;
        let obliquity = (mean_obliquity + 0.002_56 * omega.cos()).to_radians();

        let declination = (obliquity.sin() * apparent_longitude.to_radians().sin())
            .asin()
            .to_degrees();

        let y = (obliquity / 2.0).tan().powi(2);
        let l0 = mean_longitude.to_radians();
        let eq = y * (2.0 * l0).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin();

        Self {
            declination,
            equation_of_time: MINUTES_PER_DEGREE * eq.to_degrees(),
        }
    }
}

/// Julian Day (UT) of a UTC instant.
fn julian_day(at: DateTime<Utc>) -> Days {
    let seconds = Seconds::new(at.timestamp() as f64)
        + Seconds::new(at.timestamp_subsec_nanos() as f64 / 1e9);
    UNIX_EPOCH_JD + seconds.to::<Day>()
}

fn julian_centuries(jd: Days) -> f64 {
    ((jd - J2000) / JULIAN_CENTURY).simplify().value()
}

fn normalize_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Fractional minutes as a millisecond-precision chrono duration.
fn minutes(value: f64) -> Duration {
    Duration::milliseconds((value * 60_000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn assert_near(actual: DateTime<Utc>, expected: DateTime<Utc>, tolerance_min: i64) {
        let delta = (actual - expected).num_seconds().abs();
        assert!(
            delta <= tolerance_min * 60,
            "{actual} differs from {expected} by {delta} s"
        );
    }

    #[test]
    fn julian_day_at_j2000() {
        let jd = julian_day(utc(2000, 1, 1, 12, 0));
        assert!((jd - J2000).abs() < Days::new(1e-9));
        assert!(julian_centuries(jd).abs() < 1e-12);
    }

    #[test]
    fn declination_near_solstices() {
        // 2021-12-21 and 2022-06-21 at noon.
        let winter = SolarEphemeris::at(julian_centuries(julian_day(utc(2021, 12, 21, 12, 0))));
        let summer = SolarEphemeris::at(julian_centuries(julian_day(utc(2022, 6, 21, 12, 0))));
        assert!((winter.declination + 23.44).abs() < 0.05);
        assert!((summer.declination - 23.44).abs() < 0.05);
    }

    #[test]
    fn equation_of_time_early_november() {
        // The sun runs about 16.4 minutes fast at the start of November.
        let eq = SolarEphemeris::at(julian_centuries(julian_day(utc(2021, 11, 3, 12, 0))));
        assert!((eq.equation_of_time - 16.4).abs() < 0.2);
    }

    #[test]
    fn palma_winter_day_includes_margin() {
        let palma = Place::new(39.551700592, 2.7388100624, utc(2021, 12, 8, 12, 0));
        let day = NoaaSunTimes::default().sun_times(&palma).unwrap();
        assert_near(day.sunrise, utc(2021, 12, 8, 6, 27), 2);
        assert_near(day.sunset, utc(2021, 12, 8, 16, 55), 2);
    }

    #[test]
    fn zero_margin_gives_civil_times() {
        let palma = Place::new(39.551700592, 2.7388100624, utc(2021, 12, 8, 12, 0));
        let aviation = NoaaSunTimes::default().sun_times(&palma).unwrap();
        let civil = NoaaSunTimes::new()
            .with_margin(Duration::zero())
            .sun_times(&palma)
            .unwrap();
        assert_eq!(NoaaSunTimes::default().margin(), AVIATION_TWILIGHT_MARGIN);
        assert_eq!(civil.sunrise - aviation.sunrise, AVIATION_TWILIGHT_MARGIN);
        assert_eq!(aviation.sunset - civil.sunset, AVIATION_TWILIGHT_MARGIN);
    }

    #[test]
    fn result_depends_only_on_local_date() {
        let provider = NoaaSunTimes::default();
        let morning = Place::new(50.9014, 4.4844, utc(2022, 6, 3, 3, 0));
        let evening = morning.at(utc(2022, 6, 3, 21, 0));
        assert_eq!(
            provider.sun_times(&morning).unwrap(),
            provider.sun_times(&evening).unwrap()
        );
    }

    #[test]
    fn local_date_follows_longitude() {
        // 23:00 UTC on the 8th is already the 9th at 150° E.
        let sydney = Place::new(-33.9461, 151.1772, utc(2021, 12, 8, 23, 0));
        let day = NoaaSunTimes::default().sun_times(&sydney).unwrap();
        assert!(day.sunrise > utc(2021, 12, 8, 17, 0));
        assert!(day.sunrise < utc(2021, 12, 8, 19, 0));
        assert!(day.contains(sydney.timestamp()));
    }

    #[test]
    fn polar_night_is_reported() {
        let tromso = Place::new(69.6496, 18.9560, utc(2021, 12, 15, 12, 0));
        let err = NoaaSunTimes::default().sun_times(&tromso).unwrap_err();
        assert!(matches!(err, SunTimeError::PolarNight { .. }));
    }

    #[test]
    fn midnight_sun_is_reported() {
        let longyearbyen = Place::new(78.2232, 15.6267, utc(2022, 6, 21, 12, 0));
        let err = NoaaSunTimes::default().sun_times(&longyearbyen).unwrap_err();
        assert!(matches!(err, SunTimeError::MidnightSun { .. }));
    }

    #[test]
    fn instant_past_chrono_range_is_out_of_range() {
        // Shifting to local solar time at 180° E adds twelve hours.
        let edge = Place::new(0.0, 180.0, DateTime::<Utc>::MAX_UTC);
        let err = NoaaSunTimes::default().sun_times(&edge).unwrap_err();
        assert_eq!(err, SunTimeError::OutOfRange(DateTime::<Utc>::MAX_UTC));
    }
}
