//! Weather Effects Core Library
//!
//! Frame-stepped particle animations for character grids: rain with splashes,
//! drifting snow that piles up, thunderstorms with branching lightning, fog banks,
//! clouds and clear skies.
//!
//! ## Layout
//!
//! - [`physics`]: particles, particle systems, the snow heightmap and lightning bolts
//! - [`effects`]: complete animations and [`compose`], which picks one for a weather record
//! - [`surface`]: the [`Surface`] trait effects draw into, plus the in-memory [`GridBuffer`]
//! - [`provider`]: weather sources and the TTL cache in front of them
//!
//! Everything is single-threaded and driven by the caller: once per frame call
//! `update` with the current grid size and a random source, then `draw`. Seeding the
//! random source (for example `StdRng::seed_from_u64`) makes a run reproducible.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use weather_fx_core::{compose, GridBuffer, WeatherCondition, WeatherData};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let weather = WeatherData::preset(WeatherCondition::HeavyRain);
//! let mut screen = GridBuffer::new(40, 12);
//! let mut effect = compose(&weather, 40, 12, &mut rng);
//!
//! for _ in 0..20 {
//!     effect.update(40, 12, &mut rng);
//!     effect.draw(&mut screen, &mut rng);
//! }
//! assert!(effect.particle_count() > 0);
//! ```

// Core types and utilities
pub mod core_types;

pub mod effects;
pub mod physics;
pub mod provider;
pub mod surface;

// Re-export core types
pub use core_types::{
    Colour, Degrees, Fahrenheit, GridPoint, MilesPerHour, Percent, Vec2, WeatherCondition,
    WeatherData,
};

// Re-export physics and effects
pub use effects::{compose, Control, Effect, Scene};
pub use physics::{
    AccumulationField, BoltConfig, Bounds, Drift, LightningBolt, Particle, ParticleSystem,
};
pub use provider::{CachedProvider, StaticProvider, WeatherProvider};
pub use surface::{Cell, GridBuffer, Surface};
