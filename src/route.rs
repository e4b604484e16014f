// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Places, routes and route kinematics.
//!
//! A [`Route`] is a pair of timestamped [`Place`]s flown along the great
//! circle joining them at constant ground speed.  Every derived quantity
//! (distance, flight time, speed) is a pure function of the two endpoints.

use chrono::{DateTime, Duration, Utc};
use qtty::Degrees;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::geo;

/// Shortest flight accepted by [`Route::new`].
pub const MIN_FLIGHT_DURATION: Duration = Duration::minutes(1);

/// Shortest great-circle distance accepted by [`Route::new`], in nautical miles.
pub const MIN_ROUTE_DISTANCE_NM: f64 = 0.01;

// ═══════════════════════════════════════════════════════════════════════════
// Place
// ═══════════════════════════════════════════════════════════════════════════

/// A position on the Earth at a given UTC instant.
///
/// `Place` is an immutable value: the crossing solver builds a new one for
/// every candidate point instead of updating an existing one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Place {
    latitude: f64,
    longitude: f64,
    timestamp: DateTime<Utc>,
}

impl Place {
    /// Create a place from decimal-degree coordinates and a UTC instant.
    ///
    /// Coordinates are stored as given; range checks happen when the place
    /// becomes a route endpoint.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Same coordinates, different instant.
    #[inline]
    pub const fn at(&self, timestamp: DateTime<Utc>) -> Self {
        Self::new(self.latitude, self.longitude, timestamp)
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.latitude)
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.longitude)
    }

    #[inline]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Great-circle distance to `other`, in nautical miles.
    #[inline]
    pub fn distance_to(&self, other: &Place) -> f64 {
        geo::distance(
            self.latitude(),
            self.longitude(),
            other.latitude(),
            other.longitude(),
        )
    }

    /// Coordinates halfway to `other`.  The caller assigns the instant.
    #[inline]
    pub fn midpoint(&self, other: &Place) -> (Degrees, Degrees) {
        geo::midpoint(
            self.latitude(),
            self.longitude(),
            other.latitude(),
            other.longitude(),
        )
    }

    fn validate(&self) -> std::result::Result<(), RouteError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RouteError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RouteError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.5}°, {:.5}°) at {}",
            self.latitude,
            self.longitude,
            self.timestamp.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Route
// ═══════════════════════════════════════════════════════════════════════════

/// A single point-to-point flight.
///
/// Construction through [`Route::new`] guarantees that the arrival is at
/// least [`MIN_FLIGHT_DURATION`] after the departure and that both ends are
/// at least [`MIN_ROUTE_DISTANCE_NM`] apart, so [`Route::speed`] is always a
/// finite, positive number.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRoute"))]
pub struct Route {
    departure: Place,
    arrival: Place,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRoute {
    departure: Place,
    arrival: Place,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRoute> for Route {
    type Error = RouteError;

    fn try_from(raw: RawRoute) -> std::result::Result<Self, Self::Error> {
        Route::checked(raw.departure, raw.arrival)
    }
}

impl Route {
    /// Build a route, rejecting flights that go backwards in time, are
    /// shorter than a minute, or do not move.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use nighttime::{Place, Route};
    ///
    /// let dep = Place::new(39.5517, 2.73881, Utc.with_ymd_and_hms(2021, 12, 8, 10, 4, 0).unwrap());
    /// let arr = Place::new(56.9291, 14.728, Utc.with_ymd_and_hms(2021, 12, 8, 12, 53, 0).unwrap());
    /// let route = Route::new(dep, arr).unwrap();
    ///
    /// assert_eq!(route.flight_duration().num_minutes(), 169);
    /// assert!(route.speed() > 400.0);
    /// ```
    pub fn new(departure: Place, arrival: Place) -> Result<Self> {
        Ok(Self::checked(departure, arrival)?)
    }

    fn checked(departure: Place, arrival: Place) -> std::result::Result<Self, RouteError> {
        departure.validate()?;
        arrival.validate()?;

        let duration = arrival.timestamp - departure.timestamp;
        if duration <= Duration::zero() {
            return Err(RouteError::NonPositiveDuration { duration });
        }
        if duration < MIN_FLIGHT_DURATION {
            return Err(RouteError::TooShort { duration });
        }

        let distance_nm = departure.distance_to(&arrival);
        if distance_nm < MIN_ROUTE_DISTANCE_NM {
            return Err(RouteError::Degenerate { distance_nm });
        }

        Ok(Self { departure, arrival })
    }

    #[inline]
    pub const fn departure(&self) -> &Place {
        &self.departure
    }

    #[inline]
    pub const fn arrival(&self) -> &Place {
        &self.arrival
    }

    /// Great-circle length of the route, in nautical miles.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.departure.distance_to(&self.arrival)
    }

    /// Block time from departure to arrival.
    #[inline]
    pub fn flight_duration(&self) -> Duration {
        self.arrival.timestamp - self.departure.timestamp
    }

    /// Average ground speed, in knots.
    pub fn speed(&self) -> f64 {
        self.distance() / hours(self.flight_duration())
    }

    /// Instant at which the aircraft has flown `distance_nm` from the
    /// departure at the route's average speed.
    ///
    /// The distance is clamped to the route length, so the result always
    /// lies within `[departure, arrival]`.
    pub fn time_at_distance(&self, distance_nm: f64) -> DateTime<Utc> {
        let distance_nm = distance_nm.clamp(0.0, self.distance());
        let elapsed_ms = (distance_nm / self.speed() * 3_600_000.0).round() as i64;
        self.departure.timestamp + Duration::milliseconds(elapsed_ms)
    }
}

/// Fractional hours in a chrono duration.
#[inline]
pub(crate) fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}
