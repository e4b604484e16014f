// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise/sunset collaborator interface.
//!
//! The night-time core never computes sun times itself: it asks a
//! [`SunTimeProvider`] for the twilight window of each place it looks at.
//! Providers return **aviation** sunrise and sunset, i.e. already widened by
//! the twilight margin, so the margin is applied exactly once.

use chrono::{DateTime, Duration, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::route::Place;

/// Offset applied to civil sunrise (earlier) and sunset (later) to obtain
/// the aviation day.
pub const AVIATION_TWILIGHT_MARGIN: Duration = Duration::minutes(30);

/// Which twilight boundary the crossing solver is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TwilightTarget {
    Sunrise,
    Sunset,
}

impl std::fmt::Display for TwilightTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TwilightTarget::Sunrise => "sunrise",
            TwilightTarget::Sunset => "sunset",
        })
    }
}

/// Margin-adjusted daylight window for one place and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    #[inline]
    pub const fn new(sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> Self {
        Self { sunrise, sunset }
    }

    /// `true` when `instant` lies strictly between sunrise and sunset.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.sunrise < instant && instant < self.sunset
    }

    /// The boundary selected by `target`.
    #[inline]
    pub const fn instant(&self, target: TwilightTarget) -> DateTime<Utc> {
        match target {
            TwilightTarget::Sunrise => self.sunrise,
            TwilightTarget::Sunset => self.sunset,
        }
    }

    /// Length of the aviation day.
    #[inline]
    pub fn daylight(&self) -> Duration {
        self.sunset - self.sunrise
    }
}

/// Source of aviation sunrise/sunset instants.
///
/// Implementations must be deterministic functions of the place's
/// coordinates and date.  The core calls [`sun_times`](Self::sun_times) once
/// per route endpoint and once per bisection candidate.
pub trait SunTimeProvider {
    /// Failure raised when a place cannot be resolved.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Aviation sunrise and sunset for `place` on the date of its timestamp.
    fn sun_times(&self, place: &Place) -> Result<SunTimes, Self::Error>;
}

impl<P: SunTimeProvider + ?Sized> SunTimeProvider for &P {
    type Error = P::Error;

    #[inline]
    fn sun_times(&self, place: &Place) -> Result<SunTimes, Self::Error> {
        (**self).sun_times(place)
    }
}

impl<P: SunTimeProvider + ?Sized> SunTimeProvider for Box<P> {
    type Error = P::Error;

    #[inline]
    fn sun_times(&self, place: &Place) -> Result<SunTimes, Self::Error> {
        (**self).sun_times(place)
    }
}
