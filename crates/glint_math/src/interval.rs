/// A closed range of real values.
///
/// Used for ray parameter bounds, radius ranges, placement bounds and
/// output clamping. A range with `min > max` holds nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range from `min` up to positive infinity.
    pub const fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Inclusive at both ends.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_range_size() {
        assert_eq!(Interval::new(0.1, 0.4).size(), 0.3);
        assert_eq!(Interval::new(-10.0, 10.0).size(), 20.0);
        assert_eq!(Interval::from_min(0.001).size(), f32::INFINITY);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let ray_t = Interval::new(0.001, 4.0);

        assert!(ray_t.contains(0.001));
        assert!(ray_t.contains(4.0));
        assert!(ray_t.contains(2.0));
        assert!(!ray_t.contains(0.0));
        assert!(!ray_t.contains(4.001));
        assert!(!ray_t.contains(f32::NAN));
    }

    #[test]
    fn test_output_clamp() {
        let intensity = Interval::new(0.0, 0.999);

        assert_eq!(intensity.clamp(-5.0), 0.0);
        assert_eq!(intensity.clamp(0.5), 0.5);
        assert_eq!(intensity.clamp(1.0), 0.999);
    }

    #[test]
    fn test_from_min_and_with_max() {
        let ray_t = Interval::from_min(0.001);
        assert!(ray_t.contains(1e30));
        assert!(!ray_t.contains(0.0));

        let shrunk = ray_t.with_max(2.0);
        assert_eq!(shrunk, Interval::new(0.001, 2.0));
        assert!(!shrunk.contains(2.5));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert!(Interval::new(0.4, 0.1).is_empty());
        assert!(!Interval::new(0.1, 0.4).is_empty());
        // A single point is still a valid range
        assert!(!Interval::new(0.3, 0.3).is_empty());
    }
}
