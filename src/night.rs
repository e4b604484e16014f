// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Night-time classification of a route.
//!
//! A route falls into one of four [`FlightPhase`]s depending on whether
//! its departure and arrival happen inside their respective aviation day
//! windows.  Only the two mixed phases need the crossing solver; the
//! others are answered from the endpoint windows alone.
//!
//! Routes that cross the day/night boundary more than once (e.g. long-haul
//! flights spanning a whole night) are classified from their endpoints only.

use chrono::Duration;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::route::Route;
use crate::solver::{self, Crossing, SolverConfig};
use crate::sun::{SunTimeProvider, TwilightTarget};

/// Temporal pattern of a flight with respect to the aviation day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FlightPhase {
    /// Departure and arrival both in daylight.
    AllDay,
    /// Day departure, night landing.
    DayToNight,
    /// Night departure, day landing.
    NightToDay,
    /// Neither endpoint in daylight.
    AllNight,
}

impl FlightPhase {
    /// Boundary the solver must locate, if any.
    pub const fn crossing_target(self) -> Option<TwilightTarget> {
        match self {
            FlightPhase::DayToNight => Some(TwilightTarget::Sunset),
            FlightPhase::NightToDay => Some(TwilightTarget::Sunrise),
            FlightPhase::AllDay | FlightPhase::AllNight => None,
        }
    }
}

/// Outcome of [`NightTimeCalculator::analyze`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightTime {
    pub phase: FlightPhase,
    /// Time flown outside the aviation day.
    pub night: Duration,
    /// Boundary crossing, present for the two mixed phases.
    pub crossing: Option<Crossing>,
}

/// Computes night flying time for routes, backed by a [`SunTimeProvider`].
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use nighttime::{NightTimeCalculator, NoaaSunTimes, Place, Route};
///
/// let route = Route::new(
///     Place::new(39.5517, 2.73881, Utc.with_ymd_and_hms(2021, 12, 8, 20, 4, 0).unwrap()),
///     Place::new(56.9291, 14.728, Utc.with_ymd_and_hms(2021, 12, 8, 22, 53, 0).unwrap()),
/// )
/// .unwrap();
///
/// let calculator = NightTimeCalculator::new(NoaaSunTimes::default());
/// assert_eq!(calculator.night_duration(&route).unwrap(), route.flight_duration());
/// ```
#[derive(Debug, Clone)]
pub struct NightTimeCalculator<P> {
    provider: P,
    config: SolverConfig,
}

impl<P: SunTimeProvider> NightTimeCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, SolverConfig::default())
    }

    pub fn with_config(provider: P, config: SolverConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Decide which phase `route` belongs to.
    pub fn classify(&self, route: &Route) -> Result<FlightPhase> {
        let dep = route.departure();
        let arr = route.arrival();

        let departs_by_day = self
            .provider
            .sun_times(dep)
            .map_err(Error::upstream)?
            .contains(dep.timestamp());
        let lands_by_day = self
            .provider
            .sun_times(arr)
            .map_err(Error::upstream)?
            .contains(arr.timestamp());

        Ok(match (departs_by_day, lands_by_day) {
            (true, true) => FlightPhase::AllDay,
            (true, false) => FlightPhase::DayToNight,
            (false, true) => FlightPhase::NightToDay,
            (false, false) => FlightPhase::AllNight,
        })
    }

    /// Locate a twilight crossing along `route` with this calculator's
    /// provider and solver policy.
    pub fn find_crossing(&self, route: &Route, target: TwilightTarget) -> Result<Crossing> {
        solver::find_crossing(route, target, &self.provider, &self.config)
    }

    /// Classify `route` and measure its night portion.
    ///
    /// Any provider failure aborts the whole computation as
    /// [`Error::UpstreamUnavailable`].  With [`NoaaSunTimes`](crate::NoaaSunTimes)
    /// this includes routes touching polar night or midnight sun, where no
    /// sunrise or sunset exists on the date of one of the looked-up places.
    pub fn analyze(&self, route: &Route) -> Result<NightTime> {
        let phase = self.classify(route)?;
        let total = route.flight_duration();

        let crossing = match phase.crossing_target() {
            Some(target) => Some(self.find_crossing(route, target)?),
            None => None,
        };

        let night = match (phase, &crossing) {
            (FlightPhase::DayToNight, Some(c)) => route.arrival().timestamp() - c.place.timestamp(),
            (FlightPhase::NightToDay, Some(c)) => c.place.timestamp() - route.departure().timestamp(),
            (FlightPhase::AllNight, _) => total,
            _ => Duration::zero(),
        };
        let night = night.clamp(Duration::zero(), total);

        debug!(
            "route {} -> {}: {:?}, night {} min of {} min",
            route.departure(),
            route.arrival(),
            phase,
            night.num_minutes(),
            total.num_minutes()
        );

        Ok(NightTime {
            phase,
            night,
            crossing,
        })
    }

    /// Time flown outside the aviation day.
    pub fn night_duration(&self, route: &Route) -> Result<Duration> {
        Ok(self.analyze(route)?.night)
    }
}
