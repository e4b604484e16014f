// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error kinds surfaced by a night-time computation.

use chrono::Duration;
use thiserror::Error;

/// Boxed error coming from a [`SunTimeProvider`](crate::SunTimeProvider).
pub type UpstreamError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The route cannot be flown as described (see [`RouteError`]).
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] RouteError),
    /// The sun-time provider failed to resolve sunrise/sunset for a place.
    #[error("sun time provider unavailable: {0}")]
    UpstreamUnavailable(#[source] UpstreamError),
}

/// Reasons a [`Route`](crate::Route) is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RouteError {
    /// Arrival is not after departure.
    #[error("arrival must be after departure (flight time {duration})")]
    NonPositiveDuration { duration: Duration },
    /// Flight time is too short to derive a stable ground speed.
    #[error("flight time {duration} is below the minimum of one minute")]
    TooShort { duration: Duration },
    /// Departure and arrival are (almost) the same point.
    #[error("departure and arrival are {distance_nm} NM apart")]
    Degenerate { distance_nm: f64 },
    /// Latitude outside `[-90, 90]` degrees or not finite.
    #[error("latitude {0}° is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]` degrees or not finite.
    #[error("longitude {0}° is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a provider failure.
    pub(crate) fn upstream<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::UpstreamUnavailable(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_error_converts_into_invalid_route() {
        let err: Error = RouteError::Degenerate { distance_nm: 0.0 }.into();
        assert!(matches!(
            err,
            Error::InvalidRoute(RouteError::Degenerate { .. })
        ));
        assert!(err.to_string().starts_with("invalid route"));
    }

    #[test]
    fn upstream_error_keeps_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no zone");
        let err = Error::upstream(io);
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "no zone");
    }
}
