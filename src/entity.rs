#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clamp each coordinate into its own inclusive range.
    pub fn clamped(&self, min: Point, max: Point) -> Self {
        Point::new(self.x.max(min.x).min(max.x), self.y.max(min.y).min(max.y))
    }
}

/// Identity of a target. Two targets at the same coordinates are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    pub position: Point,
    /// Current wander goal. `None` until the first tick after spawning.
    pub destination: Option<Point>,
}

impl Target {
    pub fn new(id: TargetId, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
            destination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_clamped_keeps_inner_points() {
        let min = Point::new(15.0, 15.0);
        let max = Point::new(785.0, 385.0);

        assert_eq!(Point::new(100.0, 200.0).clamped(min, max), Point::new(100.0, 200.0));
        assert_eq!(Point::new(-4.0, 390.0).clamped(min, max), Point::new(15.0, 385.0));
        assert_eq!(Point::new(800.0, 0.0).clamped(min, max), Point::new(785.0, 15.0));
    }

    #[test]
    fn test_new_target_has_no_destination() {
        let target = Target::new(TargetId(7), 10.0, 20.0);
        assert_eq!(target.id, TargetId(7));
        assert!(target.destination.is_none());
    }
}
