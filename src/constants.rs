//! # Constants and type definitions
//!
//! This module centralizes the **physical constants**, **unit conversions**, and **type aliases**
//! shared by the solver, the propagator and the maneuver helpers.
//!
//! ## Overview
//!
//! - Angular constants (2π, degree ↔ radian)
//! - Time conversions (seconds per day)
//! - Gravitational parameters and mean radii of the central bodies used in the
//!   Earth–Moon scenarios
//! - Unit type aliases, so that signatures document the expected units
//!
//! All lengths are in **kilometers** and all times in **seconds** unless a name says otherwise.

// -------------------------------------------------------------------------------------------------
// Angular constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, one full revolution in radians
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

// -------------------------------------------------------------------------------------------------
// Central bodies
// -------------------------------------------------------------------------------------------------

/// Earth gravitational parameter μ = G·M (km³/s²)
pub const MU_EARTH: f64 = 398_600.0;

/// Moon gravitational parameter μ = G·M (km³/s²)
pub const MU_MOON: f64 = 4_905.0;

/// Earth equatorial radius (km)
pub const EARTH_RADIUS: f64 = 6_378.0;

/// Moon mean radius (km)
pub const MOON_RADIUS: f64 = 1_737.4;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KmPerSecond = f64;
/// Duration or instant in seconds
pub type Second = f64;
/// Duration or instant in days
pub type Day = f64;
