//! Clear sky: a sun by day, twinkling stars and a moon by night

use super::{draw_ground, pick, Effect};
use crate::core_types::{Colour, WeatherData};
use crate::surface::Surface;
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

pub const STAR_GLYPHS: [char; 6] = ['·', '.', '+', '*', '✦', '✧'];

/// One star per this many cells (2% of the sky)
pub const CELLS_PER_STAR: usize = 50;

const MOON: char = '☾';

const SUN: [&str; 5] = [
    "    \\   |   /    ",
    "  ─  ░░███░░  ─  ",
    "    ░███████░    ",
    "  ─  ░░███░░  ─  ",
    "    /   |   \\    ",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub phase: f32,
    pub speed: f32,
}

impl Star {
    /// Twinkle level in `[0, 1]` at `frame`
    pub fn brightness(&self, frame: u64) -> f32 {
        ((frame as f32 * self.speed + self.phase).sin() + 1.0) / 2.0
    }

    /// Colour at `frame`, `None` while too dim to show
    pub fn colour(&self, frame: u64) -> Option<Colour> {
        match self.brightness(frame) {
            b if b > 0.7 => Some(Colour::White),
            b if b > 0.3 => Some(Colour::Cyan),
            _ => None,
        }
    }
}

/// Stars scattered over a `width` x `height` sky, clear of the header rows and ground
fn scatter_stars<R: Rng + ?Sized>(width: u16, height: u16, rng: &mut R) -> Vec<Star> {
    let lowest = i32::from(height) - 3;
    if width == 0 || lowest < 2 {
        return Vec::new();
    }
    let count = usize::from(width) * usize::from(height) / CELLS_PER_STAR;
    (0..count)
        .map(|_| Star {
            x: rng.random_range(0..i32::from(width)),
            y: rng.random_range(2..=lowest),
            glyph: pick(&STAR_GLYPHS, rng),
            phase: rng.random_range(0.0..TAU),
            speed: rng.random_range(0.05..0.15),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ClearSky {
    is_day: bool,
    stars: Vec<Star>,
    size: (u16, u16),
    frame: u64,
}

impl ClearSky {
    pub fn new(weather: &WeatherData, width: u16, height: u16, rng: &mut dyn RngCore) -> Self {
        let stars = if weather.is_day {
            Vec::new()
        } else {
            scatter_stars(width, height, rng)
        };
        Self {
            is_day: weather.is_day,
            stars,
            size: (width, height),
            frame: 0,
        }
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn draw_sun(surface: &mut dyn Surface) {
        let left = i32::from(surface.width()) / 2 - 5;
        for (dy, line) in (0_i32..).zip(SUN) {
            for (dx, glyph) in (0_i32..).zip(line.chars()) {
                if glyph != ' ' {
                    surface.place(left + dx, 4 + dy, glyph, Colour::Yellow);
                }
            }
        }
    }

    fn draw_night(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            if let Some(colour) = star.colour(self.frame) {
                surface.place(star.x, star.y, star.glyph, colour);
            }
        }
        surface.place(i32::from(surface.width()) - 15, 3, MOON, Colour::Yellow);
    }
}

impl Effect for ClearSky {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn update(&mut self, width: u16, height: u16, rng: &mut dyn RngCore) {
        self.frame += 1;
        if !self.is_day && self.size != (width, height) {
            self.stars = scatter_stars(width, height, rng);
        }
        self.size = (width, height);
    }

    fn draw(&self, surface: &mut dyn Surface, _rng: &mut dyn RngCore) {
        surface.clear(Colour::Black);
        if self.is_day {
            Self::draw_sun(surface);
        } else {
            self.draw_night(surface);
        }
        draw_ground(surface, '▁');
    }

    fn status(&self) -> String {
        if self.is_day {
            "CLEAR  day".to_string()
        } else {
            format!("CLEAR  night  stars: {}", self.stars.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::WeatherCondition;
    use crate::surface::GridBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn night() -> WeatherData {
        WeatherData::preset(WeatherCondition::Clear).with_daylight(false)
    }

    #[test]
    fn test_star_count_and_placement() {
        let mut rng = StdRng::seed_from_u64(81);
        let sky = ClearSky::new(&night(), 100, 20, &mut rng);
        assert_eq!(sky.stars().len(), 40);
        for star in sky.stars() {
            assert!((0..100).contains(&star.x));
            assert!((2..=17).contains(&star.y));
        }
    }

    #[test]
    fn test_twinkle_thresholds() {
        let star = Star {
            x: 0,
            y: 0,
            glyph: '*',
            phase: 0.0,
            speed: 0.0,
        };
        // sin(0) = 0 gives brightness 0.5
        assert_eq!(star.colour(0), Some(Colour::Cyan));
        let bright = Star {
            phase: std::f32::consts::FRAC_PI_2,
            ..star
        };
        assert_eq!(bright.colour(0), Some(Colour::White));
        let dark = Star {
            phase: -std::f32::consts::FRAC_PI_2,
            ..star
        };
        assert_eq!(dark.colour(0), None);
    }

    #[test]
    fn test_stars_regenerated_on_resize() {
        let mut rng = StdRng::seed_from_u64(82);
        let mut sky = ClearSky::new(&night(), 50, 20, &mut rng);
        assert_eq!(sky.stars().len(), 20);
        sky.update(100, 40, &mut rng);
        assert_eq!(sky.stars().len(), 80);
        assert!(sky.stars().iter().all(|s| s.y <= 37));
    }

    #[test]
    fn test_day_draws_sun_without_stars() {
        let mut rng = StdRng::seed_from_u64(83);
        let day = WeatherData::preset(WeatherCondition::Clear);
        let mut sky = ClearSky::new(&day, 40, 16, &mut rng);
        sky.update(40, 16, &mut rng);
        let mut screen = GridBuffer::new(40, 16);
        sky.draw(&mut screen, &mut rng);
        assert!(sky.stars().is_empty());
        assert_eq!(screen.count('█'), 13);
        assert_eq!(screen.count(MOON), 0);
        // spaces in the art do not blank what is underneath
        assert_eq!(screen.get(15, 4).map(|c| c.glyph), Some(' '));
        assert_eq!(screen.get(19, 4).map(|c| c.glyph), Some('\\'));
    }

    #[test]
    fn test_night_draws_moon() {
        let mut rng = StdRng::seed_from_u64(84);
        let sky = ClearSky::new(&night(), 40, 16, &mut rng);
        let mut screen = GridBuffer::new(40, 16);
        sky.draw(&mut screen, &mut rng);
        assert_eq!(screen.get(25, 3).map(|c| c.glyph), Some(MOON));
    }

    #[test]
    fn test_tiny_grid_has_no_stars() {
        let mut rng = StdRng::seed_from_u64(85);
        let sky = ClearSky::new(&night(), 10, 4, &mut rng);
        assert!(sky.stars().is_empty());
    }
}
