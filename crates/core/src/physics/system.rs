//! Particle collections sharing one set of force coefficients

use crate::core_types::Vec2;
use crate::physics::particle::Particle;
use crate::surface::Surface;

/// Visible region used by the liveness check
///
/// Particles are removed once they fall past `height` or drift more than `margin`
/// cells beyond either side of `[0, width)`. The margin exists because spawns
/// intentionally start off-screen; it is a parameter rather than a constant since
/// different scenes scatter their spawns over different widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Bounds {
    /// Margin used when a scene does not ask for another one
    pub const DEFAULT_MARGIN: f32 = 10.0;

    /// Bounds for a `width` x `height` grid with the default margin
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: f32::from(width),
            height: f32::from(height),
            margin: Self::DEFAULT_MARGIN,
        }
    }

    /// Bounds matching a surface's current dimensions
    pub fn of<S: Surface + ?Sized>(surface: &S) -> Self {
        Self::new(surface.width(), surface.height())
    }

    /// Replace the horizontal margin
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Whether a position is still (or may become) visible
    #[inline]
    pub fn contains(&self, position: &Vec2) -> bool {
        position.y < self.height
            && position.x >= -self.margin
            && position.x < self.width + self.margin
    }
}

/// Ordered particle collection with shared gravity, wind and drag
///
/// Coefficients are public so callers can change them between frames (gusts,
/// user-steered wind). Particle order is insertion order and is preserved by
/// every operation, which keeps seeded runs bit-for-bit reproducible.
///
/// # Example
///
/// ```
/// use weather_fx_core::{Bounds, Colour, GridBuffer, Particle, ParticleSystem, Vec2};
///
/// let mut rain = ParticleSystem::new(0.05, 0.0, 0.01);
/// rain.spawn(Particle::new(Vec2::new(5.0, -2.0), Vec2::new(0.0, 1.5), '|', Colour::Cyan));
///
/// let mut screen = GridBuffer::new(10, 10);
/// for _ in 0..3 {
///     rain.update(Bounds::of(&screen));
/// }
/// rain.draw(&mut screen);
/// assert_eq!(screen.count('|'), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub gravity: f32,
    pub wind: f32,
    pub drag: f32,
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Create an empty system
    pub fn new(gravity: f32, wind: f32, drag: f32) -> Self {
        Self {
            gravity,
            wind,
            drag,
            particles: Vec::new(),
        }
    }

    /// Append a fully formed particle. No validation; off-screen spawns are expected.
    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Advance every particle one frame and drop the ones that left `bounds`
    /// or reached their maximum age
    pub fn update(&mut self, bounds: Bounds) {
        let (gravity, wind, drag) = (self.gravity, self.wind, self.drag);
        self.particles.retain_mut(|p| {
            p.step(gravity, wind, drag);
            bounds.contains(&p.position) && !p.is_expired()
        });
    }

    /// Keep only the particles for which `keep` returns true, preserving order
    pub fn retain(&mut self, keep: impl FnMut(&Particle) -> bool) {
        self.particles.retain(keep);
    }

    /// Draw every particle at its truncated cell
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            let (x, y) = p.cell();
            surface.place(x, y, p.glyph, p.colour);
        }
    }

    /// Live particles in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle, keeping the coefficients
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Colour;
    use crate::surface::GridBuffer;

    fn drop_at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::new(vx, vy), '|', Colour::Cyan)
    }

    #[test]
    fn test_falls_one_row_per_frame_until_bottom() {
        let bounds = Bounds::new(40, 20);
        let mut system = ParticleSystem::new(0.0, 0.0, 0.0);
        system.spawn(drop_at(20.0, 0.0, 0.0, 1.0));

        for _ in 0..19 {
            system.update(bounds);
        }
        assert_eq!(system.len(), 1);
        assert_eq!(system.particles()[0].position.y, 19.0);

        system.update(bounds);
        assert!(system.is_empty());
    }

    #[test]
    fn test_gravity_accelerates_exit() {
        let bounds = Bounds::new(40, 20);
        let mut system = ParticleSystem::new(0.05, 0.0, 0.0);
        system.spawn(drop_at(20.0, 0.0, 0.0, 1.0));

        let mut frames = 0;
        while !system.is_empty() {
            system.update(bounds);
            frames += 1;
        }
        // y after n frames is n + 0.025 n (n + 1): 19.25 at n = 14, 21 at n = 15
        assert_eq!(frames, 15);
    }

    #[test]
    fn test_margin_controls_horizontal_removal() {
        let mut system = ParticleSystem::new(0.0, 0.0, 0.0);
        system.spawn(drop_at(-5.0, 0.0, -1.0, 0.0));
        system.spawn(drop_at(45.0, 0.0, 1.0, 0.0));

        let narrow = Bounds::new(40, 20).with_margin(0.0);
        let wide = Bounds::new(40, 20).with_margin(20.0);

        let mut kept = system.clone();
        kept.update(wide);
        assert_eq!(kept.len(), 2);

        system.update(narrow);
        assert!(system.is_empty());
    }

    #[test]
    fn test_aged_out_particles_removed() {
        let bounds = Bounds::new(40, 20);
        let mut system = ParticleSystem::new(0.0, 0.0, 0.0);
        system.spawn(drop_at(5.0, 5.0, 0.0, 0.0).with_max_age(3));
        system.spawn(drop_at(6.0, 5.0, 0.0, 0.0));

        for _ in 0..3 {
            system.update(bounds);
        }
        assert_eq!(system.len(), 1);
        assert_eq!(system.particles()[0].position.x, 6.0);
    }

    #[test]
    fn test_order_preserved() {
        let bounds = Bounds::new(40, 20);
        let mut system = ParticleSystem::new(0.0, 0.0, 0.0);
        for i in 0..10 {
            let vy = if i % 3 == 0 { 30.0 } else { 0.0 };
            system.spawn(drop_at(i as f32, 0.0, 0.0, vy));
        }
        system.update(bounds);
        let xs: Vec<f32> = system.particles().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 4.0, 5.0, 7.0, 8.0]);
    }

    #[test]
    fn test_draw_off_grid_is_silent() {
        let mut system = ParticleSystem::default();
        system.spawn(drop_at(-3.0, -2.0, 0.0, 0.0));
        system.spawn(drop_at(2.0, 1.0, 0.0, 0.0));
        system.spawn(drop_at(500.0, 1.0, 0.0, 0.0));

        let mut screen = GridBuffer::new(4, 4);
        system.draw(&mut screen);
        assert_eq!(screen.count('|'), 1);
        assert_eq!(screen.get(2, 1).map(|c| c.glyph), Some('|'));
    }

    #[test]
    fn test_drag_of_one_freezes() {
        let bounds = Bounds::new(40, 20);
        let mut system = ParticleSystem::new(0.5, 0.5, 1.0);
        system.spawn(drop_at(10.0, 10.0, 3.0, 3.0));
        for _ in 0..50 {
            system.update(bounds);
        }
        assert_eq!(system.len(), 1);
        assert_eq!(system.particles()[0].position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_drag_above_one_reverses_without_panicking() {
        let bounds = Bounds::new(40, 20).with_margin(1000.0);
        let mut system = ParticleSystem::new(0.0, 0.0, 1.5);
        system.spawn(drop_at(10.0, 10.0, 2.0, 0.0));
        system.update(bounds);
        assert!(system.particles()[0].velocity.x < 0.0);
    }
}
