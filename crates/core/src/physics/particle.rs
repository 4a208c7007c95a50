//! Glyph particles and their per-frame integration rule
//!
//! A particle is a single character that moves across the grid. Units are grid
//! cells and frames: a velocity of `(0, 1)` moves one row down per frame.
//!
//! # Integration order
//!
//! Every frame a particle goes through, in this order:
//!
//! 1. **Drift** - optional sinusoidal nudge applied straight to `x`
//! 2. **Forces** - `vy += gravity`, `vx += wind`
//! 3. **Drag** - both velocity components scaled by `1 - drag`
//! 4. **Motion** - `position += velocity`
//! 5. **Ageing** - `age += 1`
//!
//! Gravity and wind land before drag, so a constant force converges to the terminal
//! velocity `force * (1 - drag) / drag` rather than `force / drag`. Seeded replays
//! depend on this order.

use crate::core_types::{Colour, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Sinusoidal lateral sway (snowflakes)
///
/// The offset `amplitude * sin(age * frequency + phase)` is added to `x` before the
/// kinematic step. It never touches the velocity, so sway does not compound with
/// drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Drift {
    /// Create a drift with an explicit phase
    pub fn new(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    /// Create a drift with a uniformly random phase in `[0, 2π)`
    pub fn with_random_phase<R: Rng + ?Sized>(amplitude: f32, frequency: f32, rng: &mut R) -> Self {
        Self::new(amplitude, frequency, rng.random_range(0.0..TAU))
    }

    /// Horizontal offset for a particle of the given age
    #[inline]
    pub fn offset(&self, age: u32) -> f32 {
        self.amplitude * (age as f32 * self.frequency + self.phase).sin()
    }
}

/// A single moving glyph
///
/// # Example
///
/// ```
/// use weather_fx_core::{Colour, Particle, Vec2};
///
/// let mut drop = Particle::new(Vec2::new(20.0, 0.0), Vec2::new(0.0, 1.0), '|', Colour::Cyan)
///     .with_max_age(10);
///
/// // No forces: one row per frame
/// drop.step(0.0, 0.0, 0.0);
/// assert_eq!(drop.position.y, 1.0);
/// assert_eq!(drop.age, 1);
/// assert!(!drop.is_expired());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub glyph: char,
    pub colour: Colour,
    pub age: u32,
    /// `None` means the particle only dies by leaving the visible region
    pub max_age: Option<u32>,
    /// `None` means straight-line motion
    pub drift: Option<Drift>,
}

impl Particle {
    /// Create a fresh particle with age 0, no lifetime bound and no drift
    pub fn new(position: Vec2, velocity: Vec2, glyph: char, colour: Colour) -> Self {
        Self {
            position,
            velocity,
            glyph,
            colour,
            age: 0,
            max_age: None,
            drift: None,
        }
    }

    /// Bound the lifetime to `max_age` frames
    pub fn with_max_age(mut self, max_age: u32) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Attach sinusoidal drift
    pub fn with_drift(mut self, drift: Drift) -> Self {
        self.drift = Some(drift);
        self
    }

    /// Advance one frame under the given coefficients
    #[inline]
    pub fn step(&mut self, gravity: f32, wind: f32, drag: f32) {
        if let Some(drift) = self.drift {
            self.position.x += drift.offset(self.age);
        }

        self.velocity.y += gravity;
        self.velocity.x += wind;
        self.velocity *= 1.0 - drag;

        self.position += self.velocity;
        self.age += 1;
    }

    /// Whether the lifetime bound has been reached
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.max_age.is_some_and(|max_age| self.age >= max_age)
    }

    /// Grid cell currently covered, truncating toward zero
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        (self.position.x as i32, self.position.y as i32)
    }
}
