// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Twilight-boundary crossing solver.
//!
//! Finds the point of a [`Route`] where the aircraft's clock time meets the
//! aviation sunrise or sunset of the place it is flying over.
//!
//! The search bisects the route **geometrically**: each candidate is the
//! great-circle midpoint of the current bracket, and its timestamp follows
//! from the distance flown at the route's average ground speed.  Because
//! time along the path grows monotonically with distance, the signed
//! residual `clock − twilight` changes sign at most once on routes that
//! cross the boundary once, which is what makes bisection valid.

use chrono::Duration;
use log::{debug, trace, warn};
use qtty::Seconds;

use crate::error::{Error, Result};
use crate::route::{Place, Route};
use crate::sun::{SunTimeProvider, TwilightTarget};

/// Default bisection cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Default convergence tolerance on `|clock − twilight|`.
pub const DEFAULT_TOLERANCE: Seconds = Seconds::new(60.0);

/// Bisection policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Upper bound on provider lookups per search; `0` behaves as `1`.
    pub max_iterations: usize,
    /// Residual below which a candidate is accepted.
    pub tolerance: Seconds,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: Seconds) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Result of a crossing search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Point on the route, timestamped with the interpolated clock time.
    pub place: Place,
    /// Number of candidates evaluated.
    pub iterations: usize,
    /// Whether the residual fell within tolerance before the cap.
    pub converged: bool,
    /// Signed `clock − twilight` residual of the returned candidate.
    pub offset: Duration,
}

/// Locate the `target` crossing along `route`.
///
/// Never fails on non-convergence: when the iteration cap is reached, the
/// last candidate is returned with `converged == false`.  Provider errors
/// abort the search as [`Error::UpstreamUnavailable`].
pub fn find_crossing<P>(
    route: &Route,
    target: TwilightTarget,
    provider: &P,
    config: &SolverConfig,
) -> Result<Crossing>
where
    P: SunTimeProvider + ?Sized,
{
    let departure = route.departure();
    let max_iterations = config.max_iterations.max(1);

    let mut low = *departure;
    let mut high = *route.arrival();
    let mut iterations = 0;

    loop {
        iterations += 1;

        let (lat, lon) = low.midpoint(&high);
        let position = Place::new(lat.value(), lon.value(), departure.timestamp());
        let candidate = position.at(route.time_at_distance(departure.distance_to(&position)));

        let twilight = provider
            .sun_times(&candidate)
            .map_err(Error::upstream)?
            .instant(target);
        let offset = candidate.timestamp() - twilight;
        let residual = Seconds::new(offset.num_milliseconds() as f64 / 1e3);

        trace!(
            "{target} search #{iterations}: {candidate}, residual {}",
            residual
        );

        if residual.abs() <= config.tolerance {
            debug!("{target} crossing found after {iterations} iterations at {candidate}");
            return Ok(Crossing {
                place: candidate,
                iterations,
                converged: true,
                offset,
            });
        }

        if iterations >= max_iterations {
            warn!(
                "{target} search stopped after {iterations} iterations, residual {}",
                residual
            );
            return Ok(Crossing {
                place: candidate,
                iterations,
                converged: false,
                offset,
            });
        }

        if residual.value() > 0.0 {
            high = candidate;
        } else {
            low = candidate;
        }
    }
}
