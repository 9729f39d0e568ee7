use crate::game::OffsetType;

/// Places an object relative to the judgement line.
///
/// `0.0` is on the line, negative has passed it, `1.0` is one `time_range` ahead.
pub trait ScrollAlgorithm {
    fn position_for(
        &self,
        object_time: OffsetType,
        current_time: OffsetType,
        time_range: OffsetType,
    ) -> f64;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LinearScrollAlgorithm;

/// Linear scroll with a constant speed multiplier.
#[derive(Copy, Clone, Debug)]
pub struct ScaledScrollAlgorithm {
    speed: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollKind {
    Linear,
    Scaled(f64),
}

impl ScrollAlgorithm for LinearScrollAlgorithm {
    #[inline]
    fn position_for(
        &self,
        object_time: OffsetType,
        current_time: OffsetType,
        time_range: OffsetType,
    ) -> f64 {
        (object_time - current_time) / time_range
    }
}

impl ScaledScrollAlgorithm {
    /// `speed` must be positive and finite.
    pub fn new(speed: f64) -> Option<Self> {
        (speed.is_finite() && speed > 0.0).then_some(Self { speed })
    }
}

impl ScrollAlgorithm for ScaledScrollAlgorithm {
    #[inline]
    fn position_for(
        &self,
        object_time: OffsetType,
        current_time: OffsetType,
        time_range: OffsetType,
    ) -> f64 {
        (object_time - current_time) * self.speed / time_range
    }
}

impl Default for ScrollKind {
    fn default() -> Self {
        Self::Linear
    }
}

impl ScrollKind {
    pub fn is_valid(&self) -> bool {
        match self {
            ScrollKind::Linear => true,
            ScrollKind::Scaled(speed) => ScaledScrollAlgorithm::new(*speed).is_some(),
        }
    }

    pub fn create(&self) -> Option<Box<dyn ScrollAlgorithm>> {
        match self {
            ScrollKind::Linear => Some(Box::new(LinearScrollAlgorithm)),
            ScrollKind::Scaled(speed) => ScaledScrollAlgorithm::new(*speed)
                .map(|x| Box::new(x) as Box<dyn ScrollAlgorithm>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_the_line_when_due() {
        for range in [1.0, 250.0, 1000.0, 12345.5] {
            for time in [-500.0, 0.0, 1000.0, 98765.25] {
                assert_eq!(LinearScrollAlgorithm.position_for(time, time, range), 0.0);
                let scaled = ScaledScrollAlgorithm::new(1.5).unwrap();
                assert_eq!(scaled.position_for(time, time, range), 0.0);
            }
        }
    }

    #[test]
    fn linear_offsets() {
        let linear = LinearScrollAlgorithm;
        assert_eq!(linear.position_for(1500.0, 1000.0, 1000.0), 0.5);
        assert_eq!(linear.position_for(500.0, 1000.0, 1000.0), -0.5);
        assert_eq!(linear.position_for(3000.0, 1000.0, 1000.0), 2.0);
    }

    #[test]
    fn monotonic_in_object_time() {
        let algorithms: [Box<dyn ScrollAlgorithm>; 2] = [
            ScrollKind::Linear.create().unwrap(),
            ScrollKind::Scaled(2.0).create().unwrap(),
        ];
        for algorithm in &algorithms {
            let mut last = f64::NEG_INFINITY;
            for t in (0..50).map(|x| x as f64 * 37.5 - 400.0) {
                let pos = algorithm.position_for(t, 120.0, 800.0);
                assert!(pos > last);
                last = pos;
            }
        }
    }

    #[test]
    fn rejects_bad_speed() {
        assert!(ScaledScrollAlgorithm::new(0.0).is_none());
        assert!(ScaledScrollAlgorithm::new(-1.0).is_none());
        assert!(ScaledScrollAlgorithm::new(f64::NAN).is_none());
        assert!(!ScrollKind::Scaled(f64::INFINITY).is_valid());
        assert!(ScrollKind::Scaled(0.75).is_valid());
    }
}
