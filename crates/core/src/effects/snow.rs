//! Drifting snow that piles up along the bottom of the grid

use super::{pick, step_intensity, Control, Effect};
use crate::core_types::{Colour, Vec2, WeatherCondition, WeatherData};
use crate::physics::{AccumulationField, Bounds, Drift, Particle, ParticleSystem};
use crate::surface::Surface;
use rand::{Rng, RngCore};
use std::ops::RangeInclusive;
use tracing::debug;

pub const FLAKE_GLYPHS: [char; 10] = ['*', '❄', '❅', '❆', '·', '°', '✧', '+', '.', '✦'];
pub const WEATHER_FLAKE_GLYPHS: [char; 8] = ['*', '❄', '❅', '❆', '·', '°', '✧', '.'];

/// Glyph used for settled snow
pub const PILE_GLYPH: char = '█';

/// Wind speed (mph) that maps to one cell per frame of drift
pub const WIND_DIVISOR: f32 = 150.0;

/// Parameters of a snow effect
#[derive(Debug, Clone, PartialEq)]
pub struct SnowConfig {
    pub gravity: f32,
    pub wind: f32,
    /// Change applied per `WindLeft`/`WindRight`
    pub wind_step: f32,
    /// Steering keeps `|wind|` at or below this
    pub wind_limit: f32,

    /// Flakes spawned per frame
    pub intensity: u32,
    pub min_intensity: u32,
    pub max_intensity: u32,

    pub glyphs: &'static [char],
    pub vx_jitter: f32,
    pub vy: RangeInclusive<f32>,
    /// Depth factors; a flake's `vy` is scaled by one of these
    pub depth_scale: &'static [f32],
    pub drift_amplitude: RangeInclusive<f32>,
    pub drift_frequency: RangeInclusive<f32>,

    /// Pile cap is `height / cap_divisor`
    pub cap_divisor: u16,
    pub settle_probability: f64,
}

impl SnowConfig {
    /// Stand-alone snow scene with per-flake sway and steerable wind
    pub fn toy() -> Self {
        Self {
            gravity: 0.01,
            wind: 0.0,
            wind_step: 0.02,
            wind_limit: 0.2,
            intensity: 2,
            min_intensity: 1,
            max_intensity: 15,
            glyphs: &FLAKE_GLYPHS,
            vx_jitter: 0.1,
            vy: 0.2..=0.5,
            depth_scale: &[0.3, 0.5, 0.8, 1.0],
            drift_amplitude: 0.2..=0.8,
            drift_frequency: 0.05..=0.15,
            cap_divisor: 3,
            settle_probability: 0.02,
        }
    }

    /// Snow driven by an observation
    ///
    /// Intensity is 3 for snow and 8 for heavy snow, unless the provider reports a
    /// snowfall rate, in which case it is `clamp(rate * 3, 2, 15)`.
    pub fn for_weather(weather: &WeatherData) -> Self {
        let mut intensity = if weather.condition == WeatherCondition::HeavySnow {
            8
        } else {
            3
        };
        if let Some(rate) = weather.snow_intensity.filter(|&r| r > 0.0) {
            intensity = ((rate * 3.0) as u32).clamp(2, 15);
        }

        let wind = weather.wind_drift(WIND_DIVISOR);
        Self {
            wind,
            wind_limit: wind.abs().max(0.2),
            intensity,
            glyphs: &WEATHER_FLAKE_GLYPHS,
            depth_scale: &[1.0],
            drift_amplitude: 0.3..=0.3,
            drift_frequency: 0.1..=0.1,
            cap_divisor: 4,
            settle_probability: 0.015,
            ..Self::toy()
        }
    }

    fn cap_for(&self, height: u16) -> u16 {
        height / self.cap_divisor.max(1)
    }
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self::toy()
    }
}

/// Falling flakes over an accumulating snow pile
#[derive(Debug, Clone)]
pub struct Snow {
    config: SnowConfig,
    flakes: ParticleSystem,
    pile: AccumulationField,
    settled: u64,
}

impl Snow {
    /// Snow for a `width` x `height` grid; the pile is sized from it
    pub fn new(config: SnowConfig, width: u16, height: u16) -> Self {
        Self {
            flakes: ParticleSystem::new(config.gravity, config.wind, 0.0),
            pile: AccumulationField::new(width, config.cap_for(height)),
            config,
            settled: 0,
        }
    }

    pub fn config(&self) -> &SnowConfig {
        &self.config
    }

    pub fn intensity(&self) -> u32 {
        self.config.intensity
    }

    pub fn wind(&self) -> f32 {
        self.flakes.wind
    }

    pub fn flakes(&self) -> &ParticleSystem {
        &self.flakes
    }

    pub fn pile(&self) -> &AccumulationField {
        &self.pile
    }

    /// Flakes absorbed into the pile so far
    pub fn settled(&self) -> u64 {
        self.settled
    }

    /// `◀`/`▶` repeated in proportion to the wind, `○` when calm
    pub fn wind_indicator(&self) -> String {
        let wind = self.flakes.wind;
        let marks = (wind.abs() * 25.0) as usize;
        if marks == 0 {
            "○".to_string()
        } else if wind < 0.0 {
            "◀".repeat(marks)
        } else {
            "▶".repeat(marks)
        }
    }

    fn spawn_flakes<R: Rng + ?Sized>(&mut self, width: f32, rng: &mut R) {
        let c = &self.config;
        for _ in 0..c.intensity {
            let depth = c.depth_scale[rng.random_range(0..c.depth_scale.len())];
            let drift = Drift::with_random_phase(
                rng.random_range(c.drift_amplitude.clone()),
                rng.random_range(c.drift_frequency.clone()),
                rng,
            );
            let flake = Particle::new(
                Vec2::new(rng.random_range(0.0..=width), 0.0),
                Vec2::new(
                    rng.random_range(-c.vx_jitter..=c.vx_jitter),
                    rng.random_range(c.vy.clone()) * depth,
                ),
                pick(c.glyphs, rng),
                Colour::White,
            )
            .with_drift(drift);
            self.flakes.spawn(flake);
        }
    }

    fn nudge_intensity(&mut self, step: i32) {
        let c = &mut self.config;
        c.intensity = step_intensity(c.intensity, step, c.min_intensity, c.max_intensity);
    }

    fn steer(&mut self, delta: f32) {
        let limit = self.config.wind_limit;
        self.flakes.wind = (self.flakes.wind + delta).clamp(-limit, limit);
    }
}

impl Effect for Snow {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn update(&mut self, width: u16, height: u16, rng: &mut dyn RngCore) {
        let cap = self.config.cap_for(height);
        if self.pile.width() != usize::from(width) || self.pile.cap() != cap {
            self.pile.resize(width, cap);
        }

        self.spawn_flakes(f32::from(width), rng);
        // No bottom cull yet: a fast flake may step from above the pile to below
        // the last row and still gets its settle roll
        let bounds = Bounds {
            height: f32::INFINITY,
            ..Bounds::new(width, height)
        };
        self.flakes.update(bounds);

        let probability = self.config.settle_probability;
        let bottom = f32::from(height);
        let pile = &mut self.pile;
        let mut settled = 0;
        self.flakes.retain(|flake| {
            let (x, y) = (flake.position.x, flake.position.y);
            if y < pile.ground_level(x, height) {
                return true;
            }
            if pile.try_settle(x, probability, rng) {
                settled += 1;
                return false;
            }
            y < bottom
        });
        self.settled += settled;

        debug!(flakes = self.flakes.len(), settled, "snow frame");
    }

    fn draw(&self, surface: &mut dyn Surface, _rng: &mut dyn RngCore) {
        surface.clear(Colour::Black);
        let bottom = i32::from(surface.height()) - 1;
        for (x, &height) in (0_i32..).zip(self.pile.heights()) {
            for dy in 0..i32::from(height) {
                surface.place(x, bottom - dy, PILE_GLYPH, Colour::White);
            }
        }
        self.flakes.draw(surface);
    }

    fn apply(&mut self, control: Control) -> bool {
        match control {
            Control::MoreIntensity => self.nudge_intensity(1),
            Control::LessIntensity => self.nudge_intensity(-1),
            Control::WindLeft => self.steer(-self.config.wind_step),
            Control::WindRight => self.steer(self.config.wind_step),
            Control::ClearAccumulation => self.pile.reset(),
            Control::Strike => return false,
        }
        true
    }

    fn status(&self) -> String {
        format!(
            "SNOW  intensity: {}  wind: {}",
            self.config.intensity,
            self.wind_indicator()
        )
    }

    fn particle_count(&self) -> usize {
        self.flakes.len()
    }
}
