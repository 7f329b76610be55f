use dvd_framework::coords::{Rect as Bounds, Vec2};
use dvd_framework::paint::Color;

/// A solid, moving rectangle.
///
/// `position` is the center in logical pixels; `velocity` is in logical pixels
/// per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub color: Color,
}

impl Rect {
    pub fn new(position: Vec2, size: Vec2, velocity: Vec2, color: Color) -> Self {
        Self { position, size, velocity, color }
    }

    /// Moves by `velocity * dt`.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Screen-space extent.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_scales_velocity_by_dt() {
        let mut r = Rect::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(100.0, -50.0),
            Color::WHITE,
        );
        r.advance(0.5);
        assert_eq!(r.position, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn bounds_are_centered_on_position() {
        let r = Rect::new(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0), Vec2::zero(), Color::WHITE);
        let b = r.bounds();
        assert_eq!(b.min(), Vec2::new(40.0, 35.0));
        assert_eq!(b.max(), Vec2::new(60.0, 45.0));
    }
}
