use facet_common::types::{ArcAttr, Rgba};
use facet_scene::attr::{AttrSet, AttrValue};

/// Linear interpolation between two values of the same shape at
/// elapsed-time fraction `t` in [0, 1].
pub trait Tweenable: Clone {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

impl Tweenable for Rgba {
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        [
            f32::lerp(&a[0], &b[0], t),
            f32::lerp(&a[1], &b[1], t),
            f32::lerp(&a[2], &b[2], t),
            f32::lerp(&a[3], &b[3], t),
        ]
    }
}

impl Tweenable for ArcAttr {
    /// Each sub-field interpolates independently, so an arc growing from a
    /// collapsed span sweeps open rather than jumping.
    fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        ArcAttr {
            start_angle: f32::lerp(&a.start_angle, &b.start_angle, t),
            end_angle: f32::lerp(&a.end_angle, &b.end_angle, t),
            pad_angle: f32::lerp(&a.pad_angle, &b.pad_angle, t),
        }
    }
}

/// Interpolates one attribute. Matching continuous variants lerp; discrete
/// or mismatched values hold the start value and snap to the end at
/// completion.
pub fn lerp_attr(a: &AttrValue, b: &AttrValue, t: f32) -> AttrValue {
    match (a, b) {
        (AttrValue::Scalar(a), AttrValue::Scalar(b)) => AttrValue::Scalar(f32::lerp(a, b, t)),
        (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(Rgba::lerp(a, b, t)),
        (AttrValue::Arc(a), AttrValue::Arc(b)) => AttrValue::Arc(ArcAttr::lerp(a, b, t)),
        _ => {
            if t >= 1.0 {
                b.clone()
            } else {
                a.clone()
            }
        }
    }
}

/// Interpolates every attribute named by `to`. Attributes absent from
/// `from` cannot animate and take their target value immediately.
pub fn lerp_attrs(from: &AttrSet, to: &AttrSet, t: f32) -> AttrSet {
    let mut out = AttrSet::new();
    for (name, target) in to.iter() {
        let value = match from.get(name) {
            Some(start) => lerp_attr(start, target, t),
            None => target.clone(),
        };
        out.set(name, value);
    }
    out
}
