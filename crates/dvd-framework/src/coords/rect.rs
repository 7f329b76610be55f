use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Builds a rectangle of `size` centered on `center`.
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self { origin: center - size * 0.5, size }
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same area with non-negative width and height.
    pub fn normalized(self) -> Self {
        let (x0, x1) = min_max(self.origin.x, self.origin.x + self.size.x);
        let (y0, y1) = min_max(self.origin.y, self.origin.y + self.size.y);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Overlap of two rectangles; `None` when they only touch or are disjoint.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let (a, b) = (self.normalized(), other.normalized());
        let lo = Vec2::new(a.min().x.max(b.min().x), a.min().y.max(b.min().y));
        let hi = Vec2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));

        let size = hi - lo;
        (size.x > 0.0 && size.y > 0.0).then_some(Rect { origin: lo, size })
    }
}

#[inline]
fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
