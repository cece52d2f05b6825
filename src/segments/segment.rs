use nalgebra::{Point2, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Line segment between two integer pixel positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            p0: [x1, y1],
            p1: [x2, y2],
        }
    }

    pub fn start(&self) -> Point2<f32> {
        Point2::new(self.p0[0] as f32, self.p0[1] as f32)
    }

    pub fn end(&self) -> Point2<f32> {
        Point2::new(self.p1[0] as f32, self.p1[1] as f32)
    }

    pub fn delta(&self) -> Vector2<f32> {
        self.end() - self.start()
    }

    pub fn length(&self) -> f32 {
        self.delta().norm()
    }

    pub fn midpoint(&self) -> Point2<f32> {
        nalgebra::center(&self.start(), &self.end())
    }

    /// Unit direction from `p0` to `p1`; zero for a degenerate segment.
    pub fn direction(&self) -> Vector2<f32> {
        self.delta()
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector2::zeros)
    }

    /// Undirected orientation in degrees, `[0, 180)`, measured in image
    /// coordinates (y grows downwards).
    pub fn angle_deg(&self) -> f32 {
        let d = self.delta();
        d.y.atan2(d.x).to_degrees().rem_euclid(180.0)
    }

    /// Line representation `ax + by + c = 0` with `sqrt(a^2+b^2)=1`.
    pub fn line(&self) -> Vector3<f32> {
        let (p0, p1) = (self.start(), self.end());
        let a = p1.y - p0.y;
        let b = p0.x - p1.x;
        let c = p1.x * p0.y - p0.x * p1.y;
        let norm = (a * a + b * b).sqrt().max(f32::EPSILON);
        Vector3::new(a / norm, b / norm, c / norm)
    }

    /// Perpendicular distance from `(x, y)` to the infinite line through the segment.
    pub fn distance_to_line(&self, x: f32, y: f32) -> f32 {
        let l = self.line();
        (l.x * x + l.y * y + l.z).abs()
    }

    /// Both endpoints inside `[0, width) × [0, height)`.
    pub fn within(&self, width: usize, height: usize) -> bool {
        let inside = |p: [i32; 2]| {
            p[0] >= 0 && p[1] >= 0 && (p[0] as usize) < width && (p[1] as usize) < height
        };
        inside(self.p0) && inside(self.p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_of_a_diagonal() {
        let seg = LineSegment::new(0, 0, 30, 40);
        assert!((seg.length() - 50.0).abs() < 1e-5);
        assert_eq!(seg.midpoint(), Point2::new(15.0, 20.0));
        assert!((seg.direction().norm() - 1.0).abs() < 1e-6);
        assert!(seg.distance_to_line(15.0, 20.0) < 1e-4);
        assert!((seg.distance_to_line(0.0, 10.0) - 6.0).abs() < 1e-4);
    }

    #[test]
    fn angle_is_undirected() {
        let a = LineSegment::new(0, 0, 10, 10);
        let b = LineSegment::new(10, 10, 0, 0);
        assert!((a.angle_deg() - 45.0).abs() < 1e-4);
        assert!((b.angle_deg() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_segment_is_safe() {
        let seg = LineSegment::new(3, 3, 3, 3);
        assert_eq!(seg.length(), 0.0);
        assert_eq!(seg.direction(), Vector2::zeros());
        assert!(seg.within(4, 4));
        assert!(!seg.within(3, 4));
    }
}
