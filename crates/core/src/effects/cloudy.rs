//! Clouds drifting across the sky

use super::{draw_ground, Effect};
use crate::core_types::{Colour, Percent, WeatherData};
use crate::surface::Surface;
use rand::{Rng, RngCore};

/// Fewest clouds shown, however clear the reported sky
pub const MIN_CLOUDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Columns per frame, always rightwards
    pub speed: f32,
}

impl Cloud {
    fn random<R: Rng + ?Sized>(grid_width: u16, grid_height: u16, rng: &mut R) -> Self {
        let lowest = (i32::from(grid_height) / 2).max(3);
        Self {
            x: rng.random_range(0.0..=f32::from(grid_width)),
            y: rng.random_range(3..=lowest),
            width: rng.random_range(8..=20),
            height: rng.random_range(2..=4),
            speed: rng.random_range(0.02..=0.08),
        }
    }

    /// Move right, re-entering from the left once fully past the right edge
    fn drift(&mut self, grid_width: u16) {
        self.x += self.speed;
        let width = self.width as f32;
        if self.x > f32::from(grid_width) + width {
            self.x = -width;
        }
    }

    /// Lens shape: the middle row is the widest and solid, outer rows are indented
    /// and shaded
    fn draw(&self, surface: &mut dyn Surface) {
        let (left, middle) = (self.x as i32, self.height / 2);
        let ground = i32::from(surface.height()) - 1;
        for dy in 0..self.height {
            let indent = (dy - middle).abs();
            let glyph = if dy == middle { '█' } else { '▓' };
            let y = self.y + dy;
            if !(2..ground).contains(&y) {
                continue;
            }
            for dx in 0..self.width - indent * 2 {
                surface.place(left + indent + dx, y, glyph, Colour::White);
            }
        }
    }
}

/// Cloud count for a reported cover: one cloud per 15%, at least [`MIN_CLOUDS`]
pub fn cloud_count(cover: Percent) -> usize {
    ((cover.value() / 15.0) as usize).max(MIN_CLOUDS)
}

/// Partly cloudy and overcast skies
#[derive(Debug, Clone)]
pub struct Cloudy {
    clouds: Vec<Cloud>,
    cover: Percent,
}

impl Cloudy {
    pub fn new(weather: &WeatherData, width: u16, height: u16, rng: &mut dyn RngCore) -> Self {
        Self {
            clouds: (0..cloud_count(weather.cloud_cover))
                .map(|_| Cloud::random(width, height, rng))
                .collect(),
            cover: weather.cloud_cover,
        }
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }
}

impl Effect for Cloudy {
    fn name(&self) -> &'static str {
        "cloudy"
    }

    fn update(&mut self, width: u16, _height: u16, _rng: &mut dyn RngCore) {
        for cloud in &mut self.clouds {
            cloud.drift(width);
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _rng: &mut dyn RngCore) {
        surface.clear(Colour::Black);
        for cloud in &self.clouds {
            cloud.draw(surface);
        }
        draw_ground(surface, '▁');
    }

    fn status(&self) -> String {
        format!("CLOUDY  cover: {}  clouds: {}", self.cover, self.clouds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::WeatherCondition;
    use crate::surface::GridBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_cloud_count_from_cover() {
        assert_eq!(cloud_count(Percent::new(0.0)), 3);
        assert_eq!(cloud_count(Percent::new(44.0)), 3);
        assert_eq!(cloud_count(Percent::new(60.0)), 4);
        assert_eq!(cloud_count(Percent::new(100.0)), 6);
    }

    #[test]
    fn test_clouds_wrap_around() {
        let mut cloud = Cloud {
            x: 49.95,
            y: 4,
            width: 10,
            height: 3,
            speed: 0.1,
        };
        cloud.drift(40);
        assert_eq!(cloud.x, -10.0);
        cloud.drift(40);
        assert!(cloud.x > -10.0);
    }

    #[test]
    fn test_lens_shape() {
        let cloud = Cloud {
            x: 5.0,
            y: 4,
            width: 10,
            height: 3,
            speed: 0.0,
        };
        let mut screen = GridBuffer::new(30, 12);
        cloud.draw(&mut screen);
        // middle row full width and solid, outer rows indented by one each side
        assert_eq!(screen.row(5).iter().filter(|c| c.glyph == '█').count(), 10);
        assert_eq!(screen.row(4).iter().filter(|c| c.glyph == '▓').count(), 8);
        assert_eq!(screen.row(6).iter().filter(|c| c.glyph == '▓').count(), 8);
        assert_eq!(screen.get(5, 4).map(|c| c.glyph), Some(' '));
        assert_eq!(screen.get(6, 4).map(|c| c.glyph), Some('▓'));
    }

    #[test]
    fn test_overcast_has_more_clouds() {
        let mut rng = StdRng::seed_from_u64(71);
        let partly = WeatherData::preset(WeatherCondition::PartlyCloudy);
        let overcast = WeatherData::preset(WeatherCondition::Cloudy);
        let few = Cloudy::new(&partly, 80, 24, &mut rng);
        let many = Cloudy::new(&overcast, 80, 24, &mut rng);
        assert!(many.clouds().len() > few.clouds().len());
        for cloud in many.clouds() {
            assert!((3..=12).contains(&cloud.y));
        }
    }
}
