/// Open window `(min, max)` of accepted ray distances.
///
/// The intersector narrows `max` to the closest hit found so far, so a
/// later candidate must be strictly nearer to replace it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min < t < max`. NaN is never inside.
    pub fn surrounds(&self, t: f32) -> bool {
        t > self.min && t < self.max
    }

    /// Shrink the window so it ends at `max`.
    pub fn with_max(self, max: f32) -> Self {
        Self { max, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_bounds() {
        let window = Interval::new(0.0, 99_999.0);

        assert!(window.surrounds(1e-6));
        assert!(window.surrounds(42.0));
        assert!(!window.surrounds(0.0));
        assert!(!window.surrounds(99_999.0));
        assert!(!window.surrounds(-3.0));
        assert!(!window.surrounds(f32::NAN));
    }

    #[test]
    fn test_narrowing_rejects_ties() {
        let window = Interval::new(0.0, 100.0).with_max(4.0);

        assert_eq!(window, Interval::new(0.0, 4.0));
        assert!(window.surrounds(3.5));
        assert!(!window.surrounds(4.0));
        assert!(!window.surrounds(6.0));
    }
}
