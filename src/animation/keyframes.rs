//! Piecewise-linear keyframe tracks.

use glam::Vec3;

use crate::error::HelixError;

/// Values that can be linearly interpolated.
pub trait Lerp: Copy {
    /// Blend from `self` to `other` by `t` in `[0, 1]`.
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Ordered `(time, value)` pairs sampled with clamping at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Lerp> KeyframeTrack<T> {
    /// Build a track. Times must be finite and strictly increasing, and
    /// there must be exactly one value per time.
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self, HelixError> {
        if values.is_empty() {
            return Err(HelixError::InvalidKeyframes(
                "no keyframe values".to_owned(),
            ));
        }
        if times.len() != values.len() {
            return Err(HelixError::InvalidKeyframes(format!(
                "{} timestamps for {} values",
                times.len(),
                values.len()
            )));
        }
        if let Some(bad) = times.iter().find(|t| !t.is_finite()) {
            return Err(HelixError::InvalidKeyframes(format!(
                "non-finite timestamp {bad}"
            )));
        }
        if let Some(pair) = times.windows(2).find(|w| w[1] <= w[0]) {
            return Err(HelixError::InvalidKeyframes(format!(
                "timestamps must increase, got {} then {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self { times, values })
    }

    /// Time of the first keyframe.
    #[must_use]
    pub fn start_time(&self) -> f32 {
        self.times[0]
    }

    /// Time of the last keyframe.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times[self.times.len() - 1]
    }

    /// Number of keyframes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: a track holds at least one keyframe.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the last keyframe.
    #[must_use]
    pub fn last_value(&self) -> T {
        self.values[self.values.len() - 1]
    }

    /// Sample at `t`. Before the first keyframe the first value holds,
    /// after the last the last value holds, and a time that lands exactly
    /// on a keyframe returns that keyframe's value unchanged.
    #[must_use]
    pub fn sample(&self, t: f32) -> T {
        if t <= self.start_time() {
            return self.values[0];
        }
        if t >= self.end_time() {
            return self.last_value();
        }
        // First keyframe strictly after t; always in 1..len here.
        let next = self.times.partition_point(|&k| k <= t);
        let prev = next - 1;
        let (t0, t1) = (self.times[prev], self.times[next]);
        let local = (t - t0) / (t1 - t0);
        self.values[prev].lerp_to(self.values[next], local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> KeyframeTrack<Vec3> {
        KeyframeTrack::new(
            vec![0.0, 1.0, 3.0],
            vec![Vec3::ZERO, Vec3::X * 10.0, Vec3::new(10.0, 20.0, 0.0)],
        )
        .unwrap()
    }

    #[test]
    fn samples_exact_keyframes() {
        let track = track();
        assert_eq!(track.sample(0.0), Vec3::ZERO);
        assert_eq!(track.sample(1.0), Vec3::X * 10.0);
        assert_eq!(track.sample(3.0), Vec3::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn interpolates_between_keyframes() {
        let track = track();
        assert!((track.sample(0.5) - Vec3::X * 5.0).length() < 1e-6);
        assert!((track.sample(2.0) - Vec3::new(10.0, 10.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn clamps_outside_range() {
        let track = track();
        assert_eq!(track.sample(-4.0), Vec3::ZERO);
        assert_eq!(track.sample(99.0), Vec3::new(10.0, 20.0, 0.0));
    }

    #[test]
    fn single_keyframe_is_constant() {
        let track = KeyframeTrack::new(vec![2.0], vec![7.0f32]).unwrap();
        assert_eq!(track.sample(0.0), 7.0);
        assert_eq!(track.sample(5.0), 7.0);
        assert_eq!(track.start_time(), track.end_time());
    }

    #[test]
    fn rejects_malformed_tracks() {
        assert!(KeyframeTrack::<f32>::new(vec![], vec![]).is_err());
        assert!(KeyframeTrack::new(vec![0.0, 1.0], vec![1.0f32]).is_err());
        assert!(KeyframeTrack::new(vec![0.0, 0.0], vec![1.0f32, 2.0]).is_err());
        assert!(KeyframeTrack::new(vec![1.0, 0.5], vec![1.0f32, 2.0]).is_err());
        assert!(KeyframeTrack::new(vec![0.0, f32::NAN], vec![1.0f32, 2.0]).is_err());
    }
}
