//! Rain with ground splashes

use super::{draw_ground, pick, step_intensity, CloudBand, Control, Effect};
use crate::core_types::{Colour, Vec2, WeatherCondition, WeatherData};
use crate::physics::{Bounds, Particle, ParticleSystem};
use crate::surface::Surface;
use rand::{Rng, RngCore};
use std::ops::RangeInclusive;
use tracing::debug;

pub const LIGHT_GLYPHS: [char; 3] = ['|', '│', '┃'];
pub const RAIN_GLYPHS: [char; 5] = ['│', '|', '┃', ':', '\''];
pub const HEAVY_GLYPHS: [char; 4] = ['┃', '║', '│', '|'];
pub const DRIZZLE_GLYPHS: [char; 4] = ['.', '·', '\'', ','];

/// Wind speed (mph) that maps to one cell per frame of drift
pub const WIND_DIVISOR: f32 = 100.0;

/// Parameters of a rain effect
#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub gravity: f32,
    pub wind: f32,
    pub drag: f32,

    /// Drops spawned per frame
    pub intensity: u32,
    pub min_intensity: u32,
    pub max_intensity: u32,

    /// Drops spawn across `[-spawn_margin, width + spawn_margin)`
    pub spawn_margin: f32,
    /// Spawn row range (negative rows start above the grid)
    pub spawn_rows: RangeInclusive<f32>,
    /// Initial `vx` is `wind * wind_carry + U(vx_jitter)`
    pub wind_carry: f32,
    pub vx_jitter: RangeInclusive<f32>,
    pub vy: RangeInclusive<f32>,
    pub glyphs: &'static [char],

    pub splash_gravity: f32,
    pub splash_drag: f32,
    /// Splashes per drop reaching the ground
    pub splash_count: RangeInclusive<u32>,
    /// Splashes scatter with `vx` in `[-splash_spread, splash_spread]`
    pub splash_spread: f32,
    pub splash_glyphs: &'static [char],
    pub splash_lifetime: RangeInclusive<u32>,

    pub clouds: Option<CloudBand>,
}

impl RainConfig {
    /// Stand-alone rain scene: steady light drift, no clouds
    pub fn toy() -> Self {
        Self {
            gravity: 0.05,
            wind: 0.02,
            drag: 0.01,
            intensity: 3,
            min_intensity: 1,
            max_intensity: 20,
            spawn_margin: 0.0,
            spawn_rows: 0.0..=0.0,
            wind_carry: 0.0,
            vx_jitter: 0.1..=0.3,
            vy: 1.0..=2.0,
            glyphs: &LIGHT_GLYPHS,
            splash_gravity: 0.02,
            splash_drag: 0.1,
            splash_count: 1..=3,
            splash_spread: 0.5,
            splash_glyphs: &['·', '°', '˙', '*'],
            splash_lifetime: 5..=15,
            clouds: None,
        }
    }

    /// Rain driven by an observation
    ///
    /// Intensity is 15 for heavy rain, 2 for drizzle and 5 otherwise, unless the
    /// provider reports a rain rate, in which case it is `clamp(rate * 2, 3, 20)`.
    pub fn for_weather(weather: &WeatherData) -> Self {
        let mut intensity = match weather.condition {
            WeatherCondition::HeavyRain => 15,
            WeatherCondition::Drizzle => 2,
            _ => 5,
        };
        if let Some(rate) = weather.rain_intensity.filter(|&r| r > 0.0) {
            intensity = ((rate * 2.0) as u32).clamp(3, 20);
        }

        let glyphs: &'static [char] = match weather.condition {
            WeatherCondition::HeavyRain => &HEAVY_GLYPHS,
            WeatherCondition::Drizzle => &DRIZZLE_GLYPHS,
            _ => &RAIN_GLYPHS,
        };

        Self {
            wind: weather.wind_drift(WIND_DIVISOR),
            intensity,
            spawn_margin: 10.0,
            spawn_rows: -3.0..=0.0,
            wind_carry: 3.0,
            vx_jitter: -0.1..=0.1,
            vy: 1.2..=2.0,
            glyphs,
            splash_count: 1..=2,
            splash_spread: 0.4,
            splash_glyphs: &['·', '°'],
            splash_lifetime: 5..=10,
            clouds: Some(CloudBand::new(1..4, 0.8)),
            ..Self::toy()
        }
    }
}

impl Default for RainConfig {
    fn default() -> Self {
        Self::toy()
    }
}

/// Falling drops plus the short-lived splashes they throw up
#[derive(Debug, Clone)]
pub struct Rain {
    config: RainConfig,
    drops: ParticleSystem,
    splashes: ParticleSystem,
    frame: u64,
}

impl Rain {
    pub fn new(config: RainConfig) -> Self {
        Self {
            drops: ParticleSystem::new(config.gravity, config.wind, config.drag),
            splashes: ParticleSystem::new(config.splash_gravity, 0.0, config.splash_drag),
            config,
            frame: 0,
        }
    }

    pub fn config(&self) -> &RainConfig {
        &self.config
    }

    pub fn intensity(&self) -> u32 {
        self.config.intensity
    }

    pub fn drops(&self) -> &ParticleSystem {
        &self.drops
    }

    pub fn splashes(&self) -> &ParticleSystem {
        &self.splashes
    }

    fn spawn_drops<R: Rng + ?Sized>(&mut self, width: f32, rng: &mut R) {
        let c = &self.config;
        for _ in 0..c.intensity {
            let x = rng.random_range(-c.spawn_margin..=width + c.spawn_margin);
            let y = rng.random_range(c.spawn_rows.clone());
            let vx = c.wind * c.wind_carry + rng.random_range(c.vx_jitter.clone());
            let vy = rng.random_range(c.vy.clone());
            let glyph = pick(c.glyphs, rng);
            self.drops.spawn(Particle::new(
                Vec2::new(x, y),
                Vec2::new(vx, vy),
                glyph,
                Colour::Cyan,
            ));
        }
    }

    /// Splashes for every drop within two rows of the bottom
    fn spawn_splashes<R: Rng + ?Sized>(&mut self, height: f32, rng: &mut R) {
        let c = &self.config;
        let ground = height - 1.0;
        for drop in self.drops.particles() {
            if drop.position.y < height - 2.0 {
                continue;
            }
            for _ in 0..rng.random_range(c.splash_count.clone()) {
                let splash = Particle::new(
                    Vec2::new(drop.position.x, ground),
                    Vec2::new(
                        rng.random_range(-c.splash_spread..=c.splash_spread),
                        rng.random_range(-0.3..=-0.1),
                    ),
                    pick(c.splash_glyphs, rng),
                    Colour::White,
                )
                .with_max_age(rng.random_range(c.splash_lifetime.clone()));
                self.splashes.spawn(splash);
            }
        }
    }
}

impl Effect for Rain {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn update(&mut self, width: u16, height: u16, rng: &mut dyn RngCore) {
        self.frame += 1;
        self.spawn_drops(f32::from(width), rng);
        self.spawn_splashes(f32::from(height), rng);

        let bounds = Bounds::new(width, height);
        self.drops.update(bounds);
        self.splashes.update(bounds);

        debug!(
            frame = self.frame,
            drops = self.drops.len(),
            splashes = self.splashes.len(),
            "rain frame"
        );
    }

    fn draw(&self, surface: &mut dyn Surface, rng: &mut dyn RngCore) {
        surface.clear(Colour::Black);
        if let Some(clouds) = &self.config.clouds {
            clouds.draw(surface, rng, |y| if y == 2 { '▓' } else { '░' });
        }
        self.drops.draw(surface);
        self.splashes.draw(surface);
        draw_ground(surface, '▁');
    }

    fn apply(&mut self, control: Control) -> bool {
        let step = match control {
            Control::MoreIntensity => 1,
            Control::LessIntensity => -1,
            _ => return false,
        };
        let c = &mut self.config;
        c.intensity = step_intensity(c.intensity, step, c.min_intensity, c.max_intensity);
        true
    }

    fn status(&self) -> String {
        format!("RAIN  intensity: {}", self.config.intensity)
    }

    fn particle_count(&self) -> usize {
        self.drops.len() + self.splashes.len()
    }
}
