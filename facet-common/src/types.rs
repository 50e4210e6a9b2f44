use serde::{Deserialize, Serialize};

/// RGBA color, each channel in [0, 1].
pub type Rgba = [f32; 4];

/// Angular extent of one pie slice, in radians from twelve o'clock.
///
/// `pad_angle` is the gap reserved after this slice; it does not change
/// where the slice starts or ends.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArcAttr {
    pub start_angle: f32,
    pub end_angle: f32,
    pub pad_angle: f32,
}

impl ArcAttr {
    pub fn new(start_angle: f32, end_angle: f32, pad_angle: f32) -> Self {
        Self {
            start_angle,
            end_angle,
            pad_angle,
        }
    }

    /// A zero-width arc at the given angle. Used as the enter start state
    /// and the exit target state.
    pub fn collapsed_at(angle: f32) -> Self {
        Self {
            start_angle: angle,
            end_angle: angle,
            pad_angle: 0.0,
        }
    }

    pub fn span(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub fn is_collapsed(&self) -> bool {
        self.span() == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_has_zero_span() {
        let arc = ArcAttr::collapsed_at(1.25);
        assert_eq!(arc.span(), 0.0);
        assert!(arc.is_collapsed());
        assert_eq!(arc.start_angle, 1.25);
    }
}
