use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 2D vector in logical pixels (or logical pixels per second for velocities).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_velocity_step() {
        let pos = Vec2::new(10.0, 20.0);
        let vel = Vec2::new(100.0, -50.0);
        assert_eq!(pos + vel * 0.5, Vec2::new(60.0, -5.0));
    }

    #[test]
    fn add_assign_accumulates() {
        let mut p = Vec2::zero();
        p += Vec2::new(1.5, 2.0);
        p += Vec2::new(1.5, -4.0);
        assert_eq!(p, Vec2::new(3.0, -2.0));
    }

    #[test]
    fn length_of_3_4_is_5() {
        assert_eq!(Vec2::new(3.0, -4.0).length(), 5.0);
        assert_eq!((-Vec2::new(3.0, 4.0)).length(), 5.0);
    }
}
