/// Board extent. Valid coordinates are `0..=width` and `0..=height`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn clamp_x(&self, x: i32) -> i32 {
        clamp(x, 0, self.width)
    }

    pub fn clamp_y(&self, y: i32) -> i32 {
        clamp(y, 0, self.height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..=self.width).contains(&x) && (0..=self.height).contains(&y)
    }
}

pub fn clamp(val: i32, min: i32, max: i32) -> i32 {
    if val < min {
        return min;
    }
    if val > max {
        return max;
    }
    val
}

/// Squared Euclidean distance between two grid points.
///
/// Ordering by squared distance is the same as ordering by distance,
/// so no square root is ever needed.
pub fn sqr_dist(a: (i32, i32), b: (i32, i32)) -> i64 {
    let dx = (a.0 - b.0) as i64;
    let dy = (a.1 - b.1) as i64;
    dx * dx + dy * dy
}
