//! Local forecast, alerts and feels-like temperatures from the U.S. National
//! Weather Service API.
//!
//! A cycle resolves a location ([`locate`]), fetches the point, alerts and
//! forecasts ([`nws`], [`pipeline`]), derives display values ([`derive`])
//! and renders them ([`render`]).

pub mod config;
pub mod derive;
pub mod error;
pub mod locate;
pub mod nws;
pub mod pipeline;
pub mod render;
pub mod units;
pub mod weather;

pub use error::{Error, Result};
