//! Slowly drifting fog banks

use super::{draw_ground, Effect};
use crate::core_types::Colour;
use crate::surface::Surface;
use rand::{Rng, RngCore};

/// Number of stacked fog bands
pub const LAYERS: usize = 5;

/// Rows between consecutive band centres
const LAYER_SPACING: i32 = 3;

/// One horizontal band of fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogLayer {
    pub offset: f32,
    /// Columns per frame
    pub speed: f32,
    /// Fraction of the band that shows fog, in `[0, 1]`
    pub density: f32,
}

impl FogLayer {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            offset: rng.random_range(0.0..100.0),
            speed: rng.random_range(0.02..0.08),
            density: rng.random_range(0.3..0.7),
        }
    }

    /// Fog thickness at column `x`, two overlaid sines giving a value in `[0, 1]`
    pub fn thickness(&self, x: f32) -> f32 {
        let u = x + self.offset;
        let base = (u * 0.1).sin() * 0.5 + 0.5;
        base * ((u * 0.03).sin() * 0.3 + 0.7)
    }

    /// Glyph at column `x`, `None` where the band is clear
    pub fn glyph_at(&self, x: f32) -> Option<char> {
        let thickness = self.thickness(x);
        if thickness <= 1.0 - self.density {
            return None;
        }
        Some(if thickness > 0.8 {
            '▓'
        } else if thickness > 0.5 {
            '░'
        } else {
            '·'
        })
    }
}

/// Fog bands stacked from a third of the way down the grid
#[derive(Debug, Clone)]
pub struct Fog {
    layers: Vec<FogLayer>,
}

impl Fog {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        Self {
            layers: (0..LAYERS).map(|_| FogLayer::random(rng)).collect(),
        }
    }

    pub fn layers(&self) -> &[FogLayer] {
        &self.layers
    }
}

impl Effect for Fog {
    fn name(&self) -> &'static str {
        "fog"
    }

    fn update(&mut self, _width: u16, _height: u16, _rng: &mut dyn RngCore) {
        for layer in &mut self.layers {
            layer.offset += layer.speed;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, _rng: &mut dyn RngCore) {
        surface.clear(Colour::Black);
        let height = i32::from(surface.height());
        for (i, layer) in (0_i32..).zip(&self.layers) {
            let centre = height / 3 + i * LAYER_SPACING;
            for x in 0..i32::from(surface.width()) {
                let Some(glyph) = layer.glyph_at(x as f32) else {
                    continue;
                };
                for y in centre - 1..=centre + 1 {
                    // Keep the top rows and the ground clear
                    if (2..height - 1).contains(&y) {
                        surface.place(x, y, glyph, Colour::White);
                    }
                }
            }
        }
        draw_ground(surface, '▁');
    }

    fn status(&self) -> String {
        "FOG".to_string()
    }
}
