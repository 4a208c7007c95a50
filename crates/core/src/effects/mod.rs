//! Weather animations built from the physics primitives
//!
//! Each effect owns its particle systems, fields and bolts outright. A driver calls
//! [`Effect::update`] then [`Effect::draw`] once per frame, passing the current grid
//! size and a random source; nothing here sleeps, blocks or reads input.
//!
//! [`compose`] picks the effect for a weather record. [`Scene`] builds the
//! stand-alone synthetic scenes, which reuse the same effects with livelier
//! parameters and user controls.

pub mod clear;
pub mod cloudy;
pub mod fog;
pub mod rain;
pub mod snow;
pub mod storm;

pub use clear::ClearSky;
pub use cloudy::Cloudy;
pub use fog::Fog;
pub use rain::{Rain, RainConfig};
pub use snow::{Snow, SnowConfig};
pub use storm::{Storm, StormConfig};

use crate::core_types::{Colour, WeatherCondition, WeatherData};
use crate::surface::Surface;
use rand::{Rng, RngCore};
use std::ops::Range;
use tracing::info;

/// User input an effect may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MoreIntensity,
    LessIntensity,
    WindLeft,
    WindRight,
    /// Trigger a lightning strike now
    Strike,
    /// Remove settled snow
    ClearAccumulation,
}

/// A frame-stepped animation
pub trait Effect {
    /// Short name for logs and status lines
    fn name(&self) -> &'static str;

    /// Advance one frame on a `width` x `height` grid
    ///
    /// The size may differ from the previous frame; effects adapt instead of
    /// assuming it is fixed.
    fn update(&mut self, width: u16, height: u16, rng: &mut dyn RngCore);

    /// Clear `surface` to the effect's background and draw the current frame
    fn draw(&self, surface: &mut dyn Surface, rng: &mut dyn RngCore);

    /// React to a control, returning whether it had any effect
    fn apply(&mut self, _control: Control) -> bool {
        false
    }

    /// One-line description of the effect's adjustable state
    fn status(&self) -> String;

    /// Live particles across all of the effect's systems
    fn particle_count(&self) -> usize {
        0
    }
}

/// Build the animation matching `weather` for a `width` x `height` grid
pub fn compose(
    weather: &WeatherData,
    width: u16,
    height: u16,
    rng: &mut dyn RngCore,
) -> Box<dyn Effect> {
    let effect: Box<dyn Effect> = match weather.condition {
        WeatherCondition::Clear => Box::new(ClearSky::new(weather, width, height, rng)),
        WeatherCondition::PartlyCloudy | WeatherCondition::Cloudy | WeatherCondition::Unknown => {
            Box::new(Cloudy::new(weather, width, height, rng))
        }
        WeatherCondition::Fog => Box::new(Fog::new(rng)),
        WeatherCondition::Drizzle
        | WeatherCondition::Rain
        | WeatherCondition::HeavyRain
        | WeatherCondition::FreezingRain => Box::new(Rain::new(RainConfig::for_weather(weather))),
        WeatherCondition::Snow | WeatherCondition::HeavySnow => {
            Box::new(Snow::new(SnowConfig::for_weather(weather), width, height))
        }
        WeatherCondition::Thunderstorm => Box::new(Storm::new(StormConfig::for_weather(weather))),
    };

    info!(
        condition = %weather.condition,
        effect = effect.name(),
        width,
        height,
        wind_mph = weather.wind_speed.value(),
        "composed weather effect"
    );
    effect
}

/// Stand-alone synthetic scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Rain,
    Snow,
    Storm,
}

impl Scene {
    pub const ALL: [Scene; 3] = [Scene::Rain, Scene::Snow, Scene::Storm];

    /// Parse `"rain"`, `"snow"` or `"storm"` (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "rain" => Some(Scene::Rain),
            "snow" => Some(Scene::Snow),
            "storm" | "thunderstorm" => Some(Scene::Storm),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Rain => "rain",
            Scene::Snow => "snow",
            Scene::Storm => "storm",
        }
    }

    /// Build the scene's effect for a `width` x `height` grid
    pub fn build(self, width: u16, height: u16) -> Box<dyn Effect> {
        let effect: Box<dyn Effect> = match self {
            Scene::Rain => Box::new(Rain::new(RainConfig::toy())),
            Scene::Snow => Box::new(Snow::new(SnowConfig::toy(), width, height)),
            Scene::Storm => Box::new(Storm::new(StormConfig::toy())),
        };
        info!(scene = self.name(), width, height, "built synthetic scene");
        effect
    }
}

/// Uniformly chosen glyph
pub(crate) fn pick<R: Rng + ?Sized>(glyphs: &[char], rng: &mut R) -> char {
    glyphs[rng.random_range(0..glyphs.len())]
}

/// Fill the bottom row with `glyph` in blue
pub(crate) fn draw_ground(surface: &mut dyn Surface, glyph: char) {
    let y = i32::from(surface.height()) - 1;
    for x in 0..i32::from(surface.width()) {
        surface.place(x, y, glyph, Colour::Blue);
    }
}

/// Ragged band of cloud cells re-rolled every frame
#[derive(Debug, Clone, PartialEq)]
pub struct CloudBand {
    pub rows: Range<i32>,
    /// Chance that any given cell of the band is drawn
    pub density: f64,
}

impl CloudBand {
    pub fn new(rows: Range<i32>, density: f64) -> Self {
        Self { rows, density }
    }

    /// Draw the band, asking `glyph_for_row` which glyph each row uses
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        rng: &mut dyn RngCore,
        glyph_for_row: impl Fn(i32) -> char,
    ) {
        for y in self.rows.clone() {
            let glyph = glyph_for_row(y);
            for x in 0..i32::from(surface.width()) {
                if rng.random::<f64>() < self.density {
                    surface.place(x, y, glyph, Colour::White);
                }
            }
        }
    }
}

/// Clamp a stepped intensity into `range`
pub(crate) fn step_intensity(current: u32, step: i32, min: u32, max: u32) -> u32 {
    let next = i64::from(current) + i64::from(step);
    next.clamp(i64::from(min), i64::from(max)) as u32
}
