//! Acquiring the coordinate a forecast is generated for.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, LocatePolicy};
use crate::weather::Coordinates;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("permission to locate was denied")]
    Denied,

    #[error("no fix within {0} ms")]
    Timeout(u64),

    #[error("{0}")]
    Unavailable(String),
}

impl From<LocationError> for crate::error::Error {
    fn from(err: LocationError) -> Self {
        Self::LocationUnavailable(err.to_string())
    }
}

/// A source of location fixes.
pub trait Geolocator {
    fn locate(&self, policy: &LocatePolicy) -> Result<Coordinates, LocationError>;
}

/// A fix supplied up front, e.g. from the command line.
#[derive(Debug, Clone, Default)]
pub struct ManualFix {
    fix: Option<Coordinates>,
}

impl ManualFix {
    pub fn new(fix: Option<Coordinates>) -> Self {
        Self { fix }
    }
}

impl Geolocator for ManualFix {
    fn locate(&self, _policy: &LocatePolicy) -> Result<Coordinates, LocationError> {
        let fix = self.fix.ok_or(LocationError::Denied)?;
        if !(-90.0..=90.0).contains(&fix.latitude) || !(-180.0..=180.0).contains(&fix.longitude)
        {
            return Err(LocationError::Unavailable(format!(
                "{fix} is not a valid coordinate"
            )));
        }
        Ok(fix)
    }
}

/// Where the forecast is for, and whether it is the fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum Located {
    Fix(Coordinates),
    Fallback {
        at: Coordinates,
        cause: LocationError,
    },
}

impl Located {
    pub fn coordinates(&self) -> Coordinates {
        match self {
            Located::Fix(at) | Located::Fallback { at, .. } => *at,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Located::Fallback { .. })
    }
}

/// Asks `geolocator` for a fix, substituting the configured fallback.
pub fn resolve<G: Geolocator + ?Sized>(geolocator: &G, config: &Config) -> Located {
    match geolocator.locate(&config.locate) {
        Ok(at) => {
            info!(%at, "located");
            Located::Fix(at)
        }
        Err(cause) => {
            warn!(%cause, fallback = %config.fallback, "using fallback location");
            Located::Fallback {
                at: config.fallback,
                cause,
            }
        }
    }
}
