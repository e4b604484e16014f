// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Night Flying Time
//!
//! This crate computes how much of a point-to-point flight takes place at
//! night, for logbook and regulatory reporting.
//!
//! # Core types
//!
//! - [`Place`]: decimal-degree position at a UTC instant.
//! - [`Route`]: validated departure/arrival pair with derived distance,
//!   flight time and ground speed.
//! - [`SunTimeProvider`]: trait for sources of aviation sunrise/sunset.
//! - [`NoaaSunTimes`]: built-in provider based on the NOAA solar equations.
//! - [`NightTimeCalculator`]: classifies a route and measures its night portion.
//! - [`Crossing`]: point where the aircraft meets sunrise or sunset.
//!
//! # Model
//!
//! The route is flown along its great circle at constant ground speed.
//! "Night" is anything outside the aviation day, i.e. before sunrise minus
//! [`AVIATION_TWILIGHT_MARGIN`] or after sunset plus the same margin.
//!
//! | Departure | Arrival | Night time |
//! |-----------|---------|------------|
//! | day | day | zero |
//! | day | night | arrival − sunset crossing |
//! | night | day | sunrise crossing − departure |
//! | night | night | whole flight |
//!
//! Crossings are located by bisection along the route (see [`solver`]).
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use nighttime::{NightTimeCalculator, NoaaSunTimes, Place, Route};
//!
//! let route = Route::new(
//!     Place::new(39.5517, 2.73881, Utc.with_ymd_and_hms(2021, 12, 8, 5, 4, 0).unwrap()),
//!     Place::new(56.9291, 14.728, Utc.with_ymd_and_hms(2021, 12, 8, 7, 53, 0).unwrap()),
//! )?;
//!
//! let night = NightTimeCalculator::new(NoaaSunTimes::default()).night_duration(&route)?;
//! assert!((night.num_minutes() - 95).abs() <= 2);
//! # Ok::<(), nighttime::Error>(())
//! ```

mod error;
pub mod geo;
pub(crate) mod night;
pub(crate) mod route;
mod solar;
pub mod solver;
pub(crate) mod sun;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{Error, Result, RouteError, UpstreamError};
pub use night::{FlightPhase, NightTime, NightTimeCalculator};
pub use route::{Place, Route, MIN_FLIGHT_DURATION, MIN_ROUTE_DISTANCE_NM};
pub use solar::{NoaaSunTimes, SunTimeError};
pub use solver::{find_crossing, Crossing, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use sun::{SunTimeProvider, SunTimes, TwilightTarget, AVIATION_TWILIGHT_MARGIN};
