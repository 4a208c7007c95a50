//! Branching lightning bolts
//!
//! A bolt is a jagged random walk from near the top of the grid down to five rows
//! above the bottom, with short side branches sprinkled along the way. The path is
//! fixed at construction; afterwards the bolt only ages until it expires.

use crate::core_types::{Colour, GridPoint};
use crate::surface::Surface;
use rand::Rng;
use std::ops::RangeInclusive;

/// Glyph used while the bolt is fresh
pub const STRIKE_GLYPH: char = '█';

/// Glyphs picked per frame for the fading afterglow
pub const AFTERGLOW_GLYPHS: [char; 3] = ['│', '╲', '╱'];

/// Frames during which the bolt is drawn as a solid strike
pub const STRIKE_FRAMES: u32 = 2;

/// Lateral steps a branch may take per row
const BRANCH_STEPS: [i32; 4] = [-2, -1, 1, 2];

/// Generation parameters for a bolt
#[derive(Debug, Clone, PartialEq)]
pub struct BoltConfig {
    /// Row the trunk starts on
    pub start_row: i32,
    /// Lifetime in frames, sampled per bolt
    pub max_age: RangeInclusive<u32>,
    /// Chance of a branch after each trunk step
    pub branch_probability: f64,
    /// Branch length in points, sampled per branch
    pub branch_len: RangeInclusive<u32>,
}

impl BoltConfig {
    /// Bolts for the synthetic storm: from the very top, longer branches
    pub fn toy() -> Self {
        Self {
            start_row: 0,
            max_age: 3..=8,
            branch_probability: 0.2,
            branch_len: 2..=5,
        }
    }

    /// Bolts for weather-driven storms: start below the cloud band
    pub fn weather() -> Self {
        Self {
            start_row: 3,
            max_age: 4..=8,
            branch_probability: 0.2,
            branch_len: 2..=4,
        }
    }
}

impl Default for BoltConfig {
    fn default() -> Self {
        Self::toy()
    }
}

/// A single bolt
#[derive(Debug, Clone, PartialEq)]
pub struct LightningBolt {
    path: Vec<GridPoint>,
    /// Index of the last trunk point in `path`
    tip: usize,
    pub age: u32,
    pub max_age: u32,
}

impl LightningBolt {
    /// Generate a bolt for a `width` x `height` grid
    ///
    /// Every point lies inside the grid. Tiny grids still get a bolt: the start
    /// column range collapses and rows are clamped, so the walk always terminates.
    pub fn generate<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        config: &BoltConfig,
        rng: &mut R,
    ) -> Self {
        let max_x = (i32::from(width) - 1).max(0);
        let max_y = (i32::from(height) - 1).max(0);
        let target = i32::from(height) - 5;

        let lo = 10.min(i32::from(width) / 2);
        let hi = (i32::from(width) - 10).max(lo);
        let mut x = rng.random_range(lo..=hi).min(max_x);
        let mut y = config.start_row.clamp(0, max_y);

        let mut path = vec![GridPoint::new(x, y)];
        let mut tip = 0;

        // y < height - 5 before a step of at most 3, so trunk rows never need clamping
        while y < target {
            y += rng.random_range(1..=3);
            x = (x + rng.random_range(-3..=3)).clamp(0, max_x);
            path.push(GridPoint::new(x, y));
            tip = path.len() - 1;

            if rng.random::<f64>() < config.branch_probability {
                let (mut bx, mut by) = (x, y);
                for _ in 0..rng.random_range(config.branch_len.clone()) {
                    by = (by + 1).min(max_y);
                    bx = (bx + BRANCH_STEPS[rng.random_range(0..BRANCH_STEPS.len())])
                        .clamp(0, max_x);
                    path.push(GridPoint::new(bx, by));
                }
            }
        }

        let max_age = rng.random_range(config.max_age.clone());
        tracing::debug!(points = path.len(), max_age, "lightning strike");

        Self {
            path,
            tip,
            age: 0,
            max_age,
        }
    }

    /// Trunk and branch points in generation order
    pub fn path(&self) -> &[GridPoint] {
        &self.path
    }

    /// Last point of the trunk (branches excluded)
    pub fn tip(&self) -> GridPoint {
        self.path[self.tip]
    }

    pub fn update(&mut self) {
        self.age += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.max_age
    }

    /// Whether the bolt is still in its solid strike phase
    pub fn is_striking(&self) -> bool {
        self.age < STRIKE_FRAMES
    }

    /// Draw the bolt: a solid white strike first, then a flickering yellow afterglow
    pub fn draw<S: Surface + ?Sized, R: Rng + ?Sized>(&self, surface: &mut S, rng: &mut R) {
        for point in &self.path {
            let (glyph, colour) = if self.is_striking() {
                (STRIKE_GLYPH, Colour::White)
            } else {
                (
                    AFTERGLOW_GLYPHS[rng.random_range(0..AFTERGLOW_GLYPHS.len())],
                    Colour::Yellow,
                )
            };
            surface.place(point.x, point.y, glyph, colour);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GridBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reaches_lower_rows_on_standard_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let bolt = LightningBolt::generate(80, 24, &BoltConfig::toy(), &mut rng);
            assert!(!bolt.path().is_empty());
            assert!(bolt.tip().y >= 19);
            assert_eq!(bolt.path()[0].y, 0);
        }
    }

    #[test]
    fn test_points_stay_on_grid() {
        let mut rng = StdRng::seed_from_u64(12);
        for (w, h) in [(10, 10), (11, 13), (25, 12), (80, 24), (200, 60)] {
            for config in [BoltConfig::toy(), BoltConfig::weather()] {
                for _ in 0..50 {
                    let bolt = LightningBolt::generate(w, h, &config, &mut rng);
                    for p in bolt.path() {
                        assert!(p.x >= 0 && p.x < i32::from(w), "{p:?} in {w}x{h}");
                        assert!(p.y >= 0 && p.y < i32::from(h), "{p:?} in {w}x{h}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_tiny_grids_terminate() {
        let mut rng = StdRng::seed_from_u64(13);
        for (w, h) in [(1, 1), (3, 2), (5, 7), (0, 0)] {
            let bolt = LightningBolt::generate(w, h, &BoltConfig::weather(), &mut rng);
            assert!(!bolt.path().is_empty());
        }
    }

    #[test]
    fn test_start_column_range() {
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..200 {
            let bolt = LightningBolt::generate(80, 24, &BoltConfig::weather(), &mut rng);
            let start = bolt.path()[0];
            assert!((10..=70).contains(&start.x));
            assert_eq!(start.y, 3);
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut bolt = LightningBolt::generate(40, 20, &BoltConfig::toy(), &mut rng);
        assert!((3..=8).contains(&bolt.max_age));

        let mut frames = 0;
        while bolt.is_alive() {
            bolt.update();
            frames += 1;
        }
        assert_eq!(frames, bolt.max_age);
    }

    #[test]
    fn test_strike_then_afterglow() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut bolt = LightningBolt::generate(40, 20, &BoltConfig::toy(), &mut rng);
        let mut screen = GridBuffer::new(40, 20);

        bolt.draw(&mut screen, &mut rng);
        assert!(screen.count(STRIKE_GLYPH) > 0);
        let tip = bolt.tip();
        assert_eq!(screen.get(tip.x, tip.y).map(|c| c.colour), Some(Colour::White));

        bolt.update();
        bolt.update();
        screen.clear(Colour::Black);
        bolt.draw(&mut screen, &mut rng);
        assert_eq!(screen.count(STRIKE_GLYPH), 0);
        let glow: usize = AFTERGLOW_GLYPHS.iter().map(|&g| screen.count(g)).sum();
        assert!(glow > 0);
    }
}
