//! Thunderstorm: gusty rain, random lightning and background flashes

use super::{draw_ground, pick, step_intensity, CloudBand, Control, Effect};
use crate::core_types::{Colour, Vec2, WeatherData};
use crate::physics::{BoltConfig, Bounds, LightningBolt, Particle, ParticleSystem};
use crate::surface::Surface;
use rand::{Rng, RngCore};
use std::ops::RangeInclusive;
use tracing::debug;

pub const STORM_GLYPHS: [char; 5] = ['|', '│', '/', '\\', ':'];

/// Wind speed (mph) that maps to one cell per frame of drift
pub const WIND_DIVISOR: f32 = 60.0;

/// Parameters of a storm
#[derive(Debug, Clone, PartialEq)]
pub struct StormConfig {
    pub gravity: f32,
    pub drag: f32,
    /// Mean wind; every frame the rain wind is re-rolled within `base_wind ± gust`
    pub base_wind: f32,
    pub gust: f32,

    /// Drops spawned per frame
    pub intensity: u32,
    pub min_intensity: u32,
    pub max_intensity: u32,
    pub intensity_step: i32,

    /// Drops spawn across `[-spawn_margin, width + spawn_margin)`
    pub spawn_margin: f32,
    pub spawn_rows: RangeInclusive<f32>,
    /// Initial `vx` is `gusted wind * wind_carry ± vx_jitter`
    pub wind_carry: f32,
    pub vx_jitter: f32,
    pub vy: RangeInclusive<f32>,
    pub glyphs: &'static [char],
    /// Horizontal liveness margin; wider than the spawn spread so gusts do not
    /// cull drops that are about to blow on screen
    pub margin: f32,

    /// Chance of a spontaneous strike each frame
    pub lightning_chance: f64,
    pub bolt: BoltConfig,
    /// Flash timer value set by a strike
    pub flash_frames: u32,
    /// Background is white while the flash timer is above this
    pub bright_above: u32,
    /// Count the flash down before this frame's strikes rather than after, so a
    /// fresh strike shows its full `flash_frames`
    pub decay_flash_first: bool,
    /// Swap the ground glyph while the flash is active
    pub flash_ground: bool,

    pub clouds: CloudBand,
}

impl StormConfig {
    /// Stand-alone storm scene
    pub fn toy() -> Self {
        Self {
            gravity: 0.08,
            drag: 0.01,
            base_wind: 0.15,
            gust: 0.05,
            intensity: 8,
            min_intensity: 2,
            max_intensity: 30,
            intensity_step: 2,
            spawn_margin: 20.0,
            spawn_rows: -5.0..=0.0,
            wind_carry: 3.0,
            vx_jitter: 0.2,
            vy: 1.5..=2.5,
            glyphs: &STORM_GLYPHS,
            margin: 25.0,
            lightning_chance: 0.02,
            bolt: BoltConfig::toy(),
            flash_frames: 3,
            bright_above: 0,
            decay_flash_first: true,
            flash_ground: true,
            clouds: CloudBand::new(0..3, 0.7),
        }
    }

    /// Storm driven by an observation: stronger wind, more lightning, a brief
    /// white flash followed by a few frames of heavy cloud
    pub fn for_weather(weather: &WeatherData) -> Self {
        Self {
            base_wind: weather.wind_drift(WIND_DIVISOR),
            gust: 0.08,
            intensity: 12,
            wind_carry: 4.0,
            glyphs: &super::rain::HEAVY_GLYPHS,
            lightning_chance: 0.03,
            bolt: BoltConfig::weather(),
            flash_frames: 4,
            bright_above: 2,
            decay_flash_first: false,
            flash_ground: false,
            clouds: CloudBand::new(1..5, 0.8),
            ..Self::toy()
        }
    }
}

impl Default for StormConfig {
    fn default() -> Self {
        Self::toy()
    }
}

/// Rain, lightning bolts and the flash timer
#[derive(Debug, Clone)]
pub struct Storm {
    config: StormConfig,
    rain: ParticleSystem,
    bolts: Vec<LightningBolt>,
    flash_timer: u32,
    /// Strike requested through [`Control::Strike`], fired on the next update
    pending_strike: bool,
    strikes: u64,
}

impl Storm {
    pub fn new(config: StormConfig) -> Self {
        Self {
            rain: ParticleSystem::new(config.gravity, config.base_wind, config.drag),
            config,
            bolts: Vec::new(),
            flash_timer: 0,
            pending_strike: false,
            strikes: 0,
        }
    }

    pub fn config(&self) -> &StormConfig {
        &self.config
    }

    pub fn intensity(&self) -> u32 {
        self.config.intensity
    }

    pub fn rain(&self) -> &ParticleSystem {
        &self.rain
    }

    pub fn bolts(&self) -> &[LightningBolt] {
        &self.bolts
    }

    pub fn flash_timer(&self) -> u32 {
        self.flash_timer
    }

    /// Whether the background is currently flashed white
    pub fn is_bright(&self) -> bool {
        self.flash_timer > self.config.bright_above
    }

    /// Strikes so far, spontaneous and manual
    pub fn strikes(&self) -> u64 {
        self.strikes
    }

    /// Add a bolt for a `width` x `height` grid and restart the flash
    pub fn strike<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.bolts
            .push(LightningBolt::generate(width, height, &self.config.bolt, rng));
        self.flash_timer = self.config.flash_frames;
        self.strikes += 1;
        debug!(strikes = self.strikes, bolts = self.bolts.len(), "lightning");
    }

    fn nudge_intensity(&mut self, step: i32) {
        let c = &mut self.config;
        c.intensity = step_intensity(c.intensity, step, c.min_intensity, c.max_intensity);
    }

    fn spawn_drops<R: Rng + ?Sized>(&mut self, width: f32, rng: &mut R) {
        let c = &self.config;
        let wind = self.rain.wind;
        for _ in 0..c.intensity {
            let drop = Particle::new(
                Vec2::new(
                    rng.random_range(-c.spawn_margin..=width + c.spawn_margin),
                    rng.random_range(c.spawn_rows.clone()),
                ),
                Vec2::new(
                    wind * c.wind_carry + rng.random_range(-c.vx_jitter..=c.vx_jitter),
                    rng.random_range(c.vy.clone()),
                ),
                pick(c.glyphs, rng),
                Colour::Cyan,
            );
            self.rain.spawn(drop);
        }
    }
}

impl Effect for Storm {
    fn name(&self) -> &'static str {
        "storm"
    }

    fn update(&mut self, width: u16, height: u16, rng: &mut dyn RngCore) {
        if self.config.decay_flash_first {
            self.flash_timer = self.flash_timer.saturating_sub(1);
        }

        let gust = self.config.gust;
        self.rain.wind = self.config.base_wind + rng.random_range(-gust..=gust);
        self.spawn_drops(f32::from(width), rng);

        if std::mem::take(&mut self.pending_strike) {
            self.strike(width, height, rng);
        }
        if rng.random::<f64>() < self.config.lightning_chance {
            self.strike(width, height, rng);
        }
        if !self.config.decay_flash_first {
            self.flash_timer = self.flash_timer.saturating_sub(1);
        }

        self.rain
            .update(Bounds::new(width, height).with_margin(self.config.margin));

        for bolt in &mut self.bolts {
            bolt.update();
        }
        self.bolts.retain(LightningBolt::is_alive);

        debug!(
            drops = self.rain.len(),
            bolts = self.bolts.len(),
            flash = self.flash_timer,
            "storm frame"
        );
    }

    fn draw(&self, surface: &mut dyn Surface, rng: &mut dyn RngCore) {
        let flashing = self.flash_timer > 0;
        surface.clear(if self.is_bright() {
            Colour::White
        } else {
            Colour::Black
        });

        let cloud = if flashing { '▓' } else { '░' };
        self.config.clouds.draw(surface, rng, |_| cloud);
        self.rain.draw(surface);
        for bolt in &self.bolts {
            bolt.draw(surface, rng);
        }
        draw_ground(
            surface,
            if flashing && self.config.flash_ground {
                '▔'
            } else {
                '▁'
            },
        );
    }

    fn apply(&mut self, control: Control) -> bool {
        let step = self.config.intensity_step;
        match control {
            Control::MoreIntensity => self.nudge_intensity(step),
            Control::LessIntensity => self.nudge_intensity(-step),
            Control::Strike => self.pending_strike = true,
            Control::WindLeft | Control::WindRight | Control::ClearAccumulation => return false,
        }
        true
    }

    fn status(&self) -> String {
        format!(
            "STORM  intensity: {}  strikes: {}",
            self.config.intensity, self.strikes
        )
    }

    fn particle_count(&self) -> usize {
        self.rain.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::WeatherCondition;
    use crate::surface::GridBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calm(config: StormConfig) -> StormConfig {
        StormConfig {
            lightning_chance: 0.0,
            ..config
        }
    }

    #[test]
    fn test_weather_parameters() {
        let weather = WeatherData::preset(WeatherCondition::Thunderstorm).with_wind(30.0, 270.0);
        let config = StormConfig::for_weather(&weather);
        assert_eq!(config.base_wind, -0.5);
        assert_eq!(config.intensity, 12);
        assert_eq!(config.lightning_chance, 0.03);
        assert_eq!(config.bolt.start_row, 3);
    }

    #[test]
    fn test_gusts_stay_around_base_wind() {
        let mut rng = StdRng::seed_from_u64(51);
        let mut storm = Storm::new(calm(StormConfig::toy()));
        for _ in 0..200 {
            storm.update(60, 20, &mut rng);
            let wind = storm.rain().wind;
            assert!((0.1 - 1e-6..=0.2 + 1e-6).contains(&wind), "wind {wind}");
        }
    }

    #[test]
    fn test_manual_strike_flashes_toy_background() {
        let mut rng = StdRng::seed_from_u64(52);
        let mut storm = Storm::new(calm(StormConfig::toy()));
        let mut screen = GridBuffer::new(60, 20);

        assert!(storm.apply(Control::Strike));
        let mut bright = 0;
        for _ in 0..10 {
            storm.update(60, 20, &mut rng);
            storm.draw(&mut screen, &mut rng);
            if screen.background() == Colour::White {
                bright += 1;
            }
        }
        assert_eq!(bright, 3);
        assert_eq!(storm.strikes(), 1);
        assert!(storm.bolts().is_empty());
    }

    #[test]
    fn test_weather_flash_is_brief() {
        let mut rng = StdRng::seed_from_u64(53);
        let weather = WeatherData::preset(WeatherCondition::Thunderstorm);
        let mut storm = Storm::new(calm(StormConfig::for_weather(&weather)));

        // One white frame, then heavy cloud until the timer runs out
        storm.apply(Control::Strike);
        let mut states = Vec::new();
        for _ in 0..6 {
            storm.update(60, 20, &mut rng);
            states.push((storm.is_bright(), storm.flash_timer() > 0));
        }
        assert_eq!(
            states,
            vec![
                (true, true),
                (false, true),
                (false, true),
                (false, false),
                (false, false),
                (false, false)
            ]
        );
    }

    #[test]
    fn test_fresh_bolt_drawn_as_strike() {
        let mut rng = StdRng::seed_from_u64(54);
        let mut storm = Storm::new(calm(StormConfig::toy()));
        let mut screen = GridBuffer::new(60, 20);

        storm.apply(Control::Strike);
        storm.update(60, 20, &mut rng);
        storm.draw(&mut screen, &mut rng);
        assert!(screen.count('█') > 0);
        assert_eq!(screen.count('▔'), 60);
    }

    #[test]
    fn test_intensity_steps_by_two() {
        let mut storm = Storm::new(StormConfig::toy());
        storm.apply(Control::MoreIntensity);
        assert_eq!(storm.intensity(), 10);
        for _ in 0..20 {
            storm.apply(Control::LessIntensity);
        }
        assert_eq!(storm.intensity(), 2);
        assert!(!storm.apply(Control::ClearAccumulation));
    }

    #[test]
    fn test_spontaneous_lightning_over_time() {
        let mut rng = StdRng::seed_from_u64(55);
        let mut storm = Storm::new(StormConfig::toy());
        for _ in 0..1000 {
            storm.update(80, 24, &mut rng);
        }
        // p = 0.02 over 1000 frames
        assert!(storm.strikes() > 5);
    }
}
