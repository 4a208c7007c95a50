//! Settled-snow heightmap
//!
//! One counter per grid column. A falling particle that reaches the top of its
//! column's pile gets one chance per frame to settle; settling raises the pile by one
//! cell up to a fixed cap. Piles never shrink on their own (no melting); only an
//! explicit [`AccumulationField::reset`] clears them.

use rand::Rng;

/// Per-column saturating height counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulationField {
    heights: Vec<u16>,
    cap: u16,
}

impl AccumulationField {
    /// Flat field `width` columns wide, each pile limited to `cap` cells
    pub fn new(width: u16, cap: u16) -> Self {
        Self {
            heights: vec![0; usize::from(width)],
            cap,
        }
    }

    /// Field whose cap is a fraction of the grid height (`height / divisor`)
    pub fn for_grid(width: u16, height: u16, divisor: u16) -> Self {
        Self::new(width, height / divisor.max(1))
    }

    /// Column index for a horizontal position
    ///
    /// The position is truncated toward zero and wrapped into `[0, width)`, so
    /// particles blown past either edge still land on some pile.
    pub fn column(&self, x: f32) -> Option<usize> {
        if self.heights.is_empty() {
            return None;
        }
        let width = self.heights.len() as i64;
        Some((x as i64).rem_euclid(width) as usize)
    }

    /// Pile height under `x`
    pub fn height_at(&self, x: f32) -> u16 {
        self.column(x).map_or(0, |col| self.heights[col])
    }

    /// Row a particle at `x` has to reach to touch the pile:
    /// `grid_height - 1 - heights[column]`
    pub fn ground_level(&self, x: f32, grid_height: u16) -> f32 {
        f32::from(grid_height) - 1.0 - f32::from(self.height_at(x))
    }

    /// Roll once against `settle_probability` for a particle at `x`
    ///
    /// On success the column grows by one cell (never past the cap) and `true` is
    /// returned; the caller removes the particle. On failure the particle keeps
    /// falling. Probabilities outside `[0, 1]` behave as never/always.
    pub fn try_settle<R: Rng + ?Sized>(
        &mut self,
        x: f32,
        settle_probability: f64,
        rng: &mut R,
    ) -> bool {
        let Some(col) = self.column(x) else {
            return false;
        };
        if rng.random::<f64>() >= settle_probability {
            return false;
        }
        self.heights[col] = self.heights[col].saturating_add(1).min(self.cap);
        true
    }

    /// Clear every pile
    pub fn reset(&mut self) {
        self.heights.fill(0);
    }

    /// Adapt to a new grid size
    ///
    /// Existing columns keep their piles, new columns start empty, and piles are
    /// trimmed to the new cap if the grid got shorter.
    pub fn resize(&mut self, width: u16, cap: u16) {
        self.heights.resize(usize::from(width), 0);
        self.cap = cap;
        for h in &mut self.heights {
            *h = (*h).min(cap);
        }
    }

    pub fn heights(&self) -> &[u16] {
        &self.heights
    }

    pub fn cap(&self) -> u16 {
        self.cap
    }

    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// Whether every column has reached the cap
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h >= self.cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_saturates_at_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = AccumulationField::new(10, 5);
        for _ in 0..1000 {
            field.try_settle(3.0, 0.02, &mut rng);
        }
        assert_eq!(field.heights()[3], 5);
        assert!(field
            .heights()
            .iter()
            .enumerate()
            .all(|(i, &h)| i == 3 || h == 0));
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = AccumulationField::new(4, 100);
        for _ in 0..50 {
            assert!(!field.try_settle(1.0, 0.0, &mut rng));
        }
        assert_eq!(field.heights()[1], 0);

        for _ in 0..50 {
            assert!(field.try_settle(1.0, 1.0, &mut rng));
        }
        assert_eq!(field.heights()[1], 50);

        // Out-of-range probabilities clamp in effect, never panic
        assert!(field.try_settle(2.0, 7.5, &mut rng));
        assert!(!field.try_settle(2.0, -1.0, &mut rng));
    }

    #[test]
    fn test_columns_wrap() {
        let field = AccumulationField::new(10, 3);
        assert_eq!(field.column(13.7), Some(3));
        assert_eq!(field.column(-1.0), Some(9));
        assert_eq!(field.column(-0.5), Some(0));
        assert_eq!(AccumulationField::new(0, 3).column(1.0), None);
    }

    #[test]
    fn test_ground_level_rises_with_pile() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = AccumulationField::new(10, 5);
        assert_eq!(field.ground_level(4.2, 20), 19.0);
        field.try_settle(4.2, 1.0, &mut rng);
        field.try_settle(4.9, 1.0, &mut rng);
        assert_eq!(field.ground_level(4.0, 20), 17.0);
    }

    #[test]
    fn test_reset_and_resize() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = AccumulationField::for_grid(8, 24, 3);
        assert_eq!(field.cap(), 8);
        for x in 0..8 {
            for _ in 0..10 {
                field.try_settle(x as f32, 1.0, &mut rng);
            }
        }
        assert!(field.is_full());

        field.resize(12, 4);
        assert_eq!(field.width(), 12);
        assert_eq!(&field.heights()[..8], &[4; 8]);
        assert_eq!(&field.heights()[8..], &[0; 4]);

        field.reset();
        assert!(field.heights().iter().all(|&h| h == 0));
    }
}
