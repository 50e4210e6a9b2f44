use std::f32::consts::TAU;

use crate::error::FacetLayoutError;
use facet_common::types::ArcAttr;

/// Converts group weights into consecutive angular spans starting at angle
/// zero, proportional to weight and summing to a full circle.
///
/// A fixed pad angle (default 0) is reserved after each nonzero span; pads
/// are carved out of the circle before apportioning, so the non-pad arc
/// lengths stay proportional. Zero-weight groups keep a collapsed span at
/// their natural position so their key survives for stable re-entry.
#[derive(Debug, Clone)]
pub struct PieLayout {
    pad_angle: f32,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self { pad_angle: 0.0 }
    }
}

impl PieLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pad_angle(mut self, pad_angle: f32) -> Self {
        self.pad_angle = pad_angle.max(0.0);
        self
    }

    pub fn pad_angle(&self) -> f32 {
        self.pad_angle
    }

    pub fn layout(&self, weights: &[f64]) -> Result<Vec<ArcAttr>, FacetLayoutError> {
        if let Some(w) = weights.iter().find(|w| **w < 0.0 || w.is_nan()) {
            return Err(FacetLayoutError::NegativeWeight(*w));
        }

        let total: f64 = weights.iter().sum();
        if total == 0.0 {
            // Nothing to apportion; every slice collapses at the origin
            return Ok(weights.iter().map(|_| ArcAttr::collapsed_at(0.0)).collect());
        }

        let nonzero = weights.iter().filter(|w| **w > 0.0).count();
        let available = (TAU - self.pad_angle * nonzero as f32).max(0.0);

        let mut cursor = 0.0_f32;
        let arcs = weights
            .iter()
            .map(|w| {
                if *w > 0.0 {
                    let span = (w / total) as f32 * available;
                    let arc = ArcAttr::new(cursor, cursor + span, self.pad_angle);
                    cursor += span + self.pad_angle;
                    arc
                } else {
                    ArcAttr::collapsed_at(cursor)
                }
            })
            .collect();

        Ok(arcs)
    }
}
