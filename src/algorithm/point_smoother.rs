use crate::models::geometry::Point;

pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Exponential filter for one tracked point.
///
/// The first observation is taken as-is so the marker does not glide in
/// from the origin.
#[derive(Debug, Clone, Copy)]
pub struct PointSmoother {
    factor: f64,
    state: Option<Point>,
}

impl PointSmoother {
    pub fn new(factor: f64) -> Self {
        Self {
            factor: factor.clamp(f64::EPSILON, 1.0),
            state: None,
        }
    }

    pub fn smooth(&mut self, target_x: f64, target_y: f64) -> Point {
        let next = match self.state {
            None => Point::new(target_x, target_y),
            Some(current) => Point::new(
                lerp(current.x, target_x, self.factor),
                lerp(current.y, target_y, self.factor),
            ),
        };
        self.state = Some(next);
        next
    }

    pub fn current(&self) -> Option<Point> {
        self.state
    }
}
