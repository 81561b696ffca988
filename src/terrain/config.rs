use std::fmt;

use glam::Vec3;

pub const BASE_COLOR: Vec3 = Vec3::new(0.0, 0.19, 0.4);
pub const HIGHLIGHT_COLOR: Vec3 = Vec3::new(0.1, 0.5, 1.0);

pub const WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=30.0;
pub const SEGMENT_RANGE: std::ops::RangeInclusive<u32> = 1..=50;
pub const MAX_SEGMENTS: u32 = 1024;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 16.0,
            width_segments: 25,
            height_segments: 25,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GridConfigError {
    NonPositiveWidth(f32),
    NonPositiveHeight(f32),
    ZeroSegments { width: u32, height: u32 },
    TooManySegments { width: u32, height: u32 },
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWidth(w) => write!(f, "grid width must be positive, got {}", w),
            Self::NonPositiveHeight(h) => write!(f, "grid height must be positive, got {}", h),
            Self::ZeroSegments { width, height } => write!(
                f,
                "segment counts must be at least 1, got {}x{}",
                width, height
            ),
            Self::TooManySegments { width, height } => write!(
                f,
                "segment counts must be at most {}, got {}x{}",
                MAX_SEGMENTS, width, height
            ),
        }
    }
}

impl std::error::Error for GridConfigError {}

impl GridConfig {
    pub fn new(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            width,
            height,
            width_segments,
            height_segments,
        }
    }

    pub fn validate(&self) -> Result<(), GridConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(GridConfigError::NonPositiveWidth(self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(GridConfigError::NonPositiveHeight(self.height));
        }
        if self.width_segments == 0 || self.height_segments == 0 {
            return Err(GridConfigError::ZeroSegments {
                width: self.width_segments,
                height: self.height_segments,
            });
        }

        if self.width_segments > MAX_SEGMENTS || self.height_segments > MAX_SEGMENTS {
            return Err(GridConfigError::TooManySegments {
                width: self.width_segments,
                height: self.height_segments,
            });
        }

        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        (self.width_segments as usize + 1) * (self.height_segments as usize + 1)
    }

    pub fn triangle_count(&self) -> usize {
        2 * self.width_segments as usize * self.height_segments as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    pub amplitude: f32,
    pub time_step: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            amplitude: 0.001,
            time_step: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    #[default]
    QuadOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightSettings {
    pub highlight_color: Vec3,
    pub base_color: Vec3,
    pub duration: f32,
    pub ease: Ease,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            highlight_color: HIGHLIGHT_COLOR,
            base_color: BASE_COLOR,
            duration: 0.5,
            ease: Ease::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GridConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.vertex_count(), 676);
        assert_eq!(config.triangle_count(), 1250);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            GridConfig::new(0.0, 1.0, 1, 1).validate(),
            Err(GridConfigError::NonPositiveWidth(0.0))
        );
        assert_eq!(
            GridConfig::new(1.0, -2.0, 1, 1).validate(),
            Err(GridConfigError::NonPositiveHeight(-2.0))
        );
        assert!(GridConfig::new(f32::NAN, 1.0, 1, 1).validate().is_err());
        assert!(GridConfig::new(1.0, f32::INFINITY, 1, 1).validate().is_err());
    }

    #[test]
    fn rejects_zero_segments() {
        assert_eq!(
            GridConfig::new(1.0, 1.0, 0, 3).validate(),
            Err(GridConfigError::ZeroSegments { width: 0, height: 3 })
        );
    }

    #[test]
    fn rejects_oversized_segment_counts() {
        assert_eq!(
            GridConfig::new(1.0, 1.0, 65534, 65534).validate(),
            Err(GridConfigError::TooManySegments { width: 65534, height: 65534 })
        );
        assert!(GridConfig::new(1.0, 1.0, u32::MAX, 2).validate().is_err());
        assert!(GridConfig::new(1.0, 1.0, 2, MAX_SEGMENTS + 1).validate().is_err());
        assert_eq!(GridConfig::new(1.0, 1.0, MAX_SEGMENTS, 1).validate(), Ok(()));
    }

    #[test]
    fn eases_hit_endpoints_and_increase() {
        for ease in [Ease::Linear, Ease::QuadOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            let mut prev = 0.0;
            for i in 1..100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v > prev && v < 1.0, "{:?} at {}", ease, i);
                prev = v;
            }
        }
    }
}
