//! Semantic unit types for weather inputs
//!
//! Newtype wrappers keep provider-supplied quantities from being mixed up
//! (a wind speed is not a direction, a temperature is not a percentage).
//!
//! # Design Philosophy
//! - All types wrap `f32`; grid animation never needs more precision
//! - Total ordering via `Ord` (NaN sorts above every other value)
//! - `Deref` to the raw value for arithmetic at the call site
//! - Serde support, serialised transparently as the bare number
//!
//! # Usage
//! ```
//! use weather_fx_core::core_types::units::{Degrees, MilesPerHour};
//!
//! let speed = MilesPerHour::new(12.0);
//! assert_eq!(*speed, 12.0);
//!
//! // Winds from the eastern half of the compass push glyphs to the right
//! assert_eq!(Degrees::new(90.0).hemisphere_sign(), 1.0);
//! assert_eq!(Degrees::new(270.0).hemisphere_sign(), -1.0);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f32 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f32_total_cmp(a: f32, b: f32) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Fahrenheit(f32);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Fahrenheit {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Fahrenheit {
    /// Water freezing point
    pub const FREEZING: Fahrenheit = Fahrenheit(32.0);

    /// Create a new Fahrenheit temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Fahrenheit(value)
    }

    /// Build from a Celsius reading
    #[inline]
    #[must_use]
    pub fn from_celsius(celsius: f32) -> Self {
        Fahrenheit(celsius * 9.0 / 5.0 + 32.0)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Fahrenheit {
    fn from(v: f32) -> Self {
        Fahrenheit::new(v)
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°F", self.0)
    }
}

// ============================================================================
// WIND
// ============================================================================

/// Wind speed in miles per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MilesPerHour(f32);

impl Eq for MilesPerHour {}

impl PartialOrd for MilesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MilesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for MilesPerHour {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl MilesPerHour {
    /// Create a new `MilesPerHour` value.
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        MilesPerHour(value)
    }

    /// Build from a km/h reading
    #[inline]
    #[must_use]
    pub fn from_kmh(kmh: f32) -> Self {
        MilesPerHour(kmh / 1.609_344)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for MilesPerHour {
    fn from(v: f32) -> Self {
        MilesPerHour::new(v)
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}mph", self.0)
    }
}

/// Compass bearing in degrees (0 = North, 90 = East)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f32);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Degrees {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Degrees {
    /// Create a new bearing. Values are not normalised.
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Degrees(value)
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Horizontal push on the grid: `+1.0` for bearings in `[0, 180]`,
    /// `-1.0` for everything else (including un-normalised values).
    #[inline]
    #[must_use]
    pub fn hemisphere_sign(self) -> f32 {
        if (0.0..=180.0).contains(&self.0) {
            1.0
        } else {
            -1.0
        }
    }
}

impl From<f32> for Degrees {
    fn from(v: f32) -> Self {
        Degrees::new(v)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°", self.0)
    }
}

// ============================================================================
// DIMENSIONLESS
// ============================================================================

/// Percentage in `[0, 100]` (cloud cover)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f32);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f32_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Percent {
    /// Create a new percentage, clamped into `[0, 100]`
    #[inline]
    #[must_use]
    pub fn new(value: f32) -> Self {
        Percent(value.clamp(0.0, 100.0))
    }

    /// Get the raw f32 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Percent {
    fn from(v: f32) -> Self {
        Percent::new(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_sign_bounds() {
        assert_eq!(Degrees::new(0.0).hemisphere_sign(), 1.0);
        assert_eq!(Degrees::new(180.0).hemisphere_sign(), 1.0);
        assert_eq!(Degrees::new(180.5).hemisphere_sign(), -1.0);
        assert_eq!(Degrees::new(360.0).hemisphere_sign(), -1.0);
        assert_eq!(Degrees::new(-10.0).hemisphere_sign(), -1.0);
    }

    #[test]
    fn test_conversions() {
        assert!((*Fahrenheit::from_celsius(100.0) - 212.0).abs() < 1e-3);
        assert!((*MilesPerHour::from_kmh(16.093_44) - 10.0).abs() < 1e-3);
        assert_eq!(Percent::new(140.0), Percent::new(100.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Fahrenheit::new(71.6).to_string(), "72°F");
        assert_eq!(MilesPerHour::new(9.2).to_string(), "9mph");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&MilesPerHour::new(5.5)).unwrap();
        assert_eq!(json, "5.5");
    }
}
