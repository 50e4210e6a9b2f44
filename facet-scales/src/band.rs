use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::FacetScaleError;
use facet_common::value::ScalarOrArray;

/// An ordinal-band scale: divides a continuous pixel range into uniform
/// bands, one per category, with padding inserted between bands.
///
/// Unknown categories map to NaN; callers must treat NaN as "do not place
/// this element".
#[derive(Debug, Clone)]
pub struct BandScale<D: Debug + Clone + Hash + Eq> {
    domain: Vec<D>,
    starts: IndexMap<D, f32>,
    range: (f32, f32),
    padding_inner: f32,
    padding_outer: f32,
    align: f32,
    round: bool,
}

impl<D: Debug + Clone + Hash + Eq> BandScale<D> {
    /// Creates a band scale over the given category domain.
    ///
    /// Defaults: range (0, 1), inner padding 0.1, no outer padding,
    /// centered alignment, no rounding.
    pub fn try_new(domain: Vec<D>) -> Result<Self, FacetScaleError> {
        if domain.is_empty() {
            return Err(FacetScaleError::EmptyDomain);
        }

        let mut this = Self {
            domain,
            starts: IndexMap::new(),
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.0,
            align: 0.5,
            round: false,
        };
        this.rebuild_starts();
        Ok(this)
    }

    fn rebuild_starts(&mut self) {
        let n = self.domain.len();

        let reverse = self.range.1 < self.range.0;
        let (start, stop) = if reverse {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        };

        let step = (stop - start)
            / 1.0_f32.max(bandspace(n, self.padding_inner, self.padding_outer));
        let step = if self.round { step.floor() } else { step };

        let start = start + (stop - start - step * (n as f32 - self.padding_inner)) * self.align;
        let start = if self.round { start.round() } else { start };

        let mut positions: Vec<f32> = (0..n).map(|i| start + step * i as f32).collect();
        if reverse {
            positions.reverse();
        }

        self.starts = self
            .domain
            .iter()
            .cloned()
            .zip(positions)
            .collect::<IndexMap<_, _>>();
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range = range;
        self.rebuild_starts();
        self
    }

    /// Inner padding ratio in [0, 1]: the share of each step left blank
    /// between adjacent bands.
    pub fn with_padding_inner(mut self, padding: f32) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.rebuild_starts();
        self
    }

    /// Outer padding in steps reserved before the first and after the last
    /// band.
    pub fn with_padding_outer(mut self, padding: f32) -> Self {
        self.padding_outer = padding.max(0.0);
        self.rebuild_starts();
        self
    }

    /// Sets inner and outer padding together.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self.rebuild_starts();
        self
    }

    pub fn with_align(mut self, align: f32) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self.rebuild_starts();
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self.rebuild_starts();
        self
    }

    pub fn domain(&self) -> &[D] {
        &self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn padding_inner(&self) -> f32 {
        self.padding_inner
    }

    /// Width of each band.
    pub fn bandwidth(&self) -> f32 {
        let bandwidth = self.step_unrounded() * (1.0 - self.padding_inner);
        if self.round {
            bandwidth.round()
        } else {
            bandwidth
        }
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f32 {
        let step = self.step_unrounded();
        if self.round {
            step.floor()
        } else {
            step
        }
    }

    fn step_unrounded(&self) -> f32 {
        let n = self.domain.len();
        let (start, stop) = if self.range.1 < self.range.0 {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        };
        (stop - start) / 1.0_f32.max(bandspace(n, self.padding_inner, self.padding_outer))
    }

    /// Start position of the band for one category; NaN for categories
    /// outside the domain.
    pub fn scale_scalar(&self, value: &D) -> f32 {
        self.starts.get(value).copied().unwrap_or(f32::NAN)
    }

    pub fn scale(&self, values: &[D]) -> ScalarOrArray<f32> {
        ScalarOrArray::Array(values.iter().map(|v| self.scale_scalar(v)).collect())
    }

    /// Maps a range interval back to the categories whose bands it touches.
    pub fn invert_range(&self, range_values: (f32, f32)) -> Option<Vec<D>> {
        let (mut lo, mut hi) = range_values;
        if lo.is_nan() || hi.is_nan() {
            return None;
        }
        if hi < lo {
            std::mem::swap(&mut lo, &mut hi);
        }

        let reverse = self.range.1 < self.range.0;
        let (start, stop) = if reverse {
            (self.range.1, self.range.0)
        } else {
            (self.range.0, self.range.1)
        };
        if hi < start || lo > stop {
            return None;
        }

        let values: Vec<f32> = if reverse {
            self.starts.values().rev().copied().collect()
        } else {
            self.starts.values().copied().collect()
        };

        let mut a = values.partition_point(|&x| x <= lo).saturating_sub(1);
        let b = if (lo - hi).abs() < f32::EPSILON {
            a
        } else {
            values.partition_point(|&x| x <= hi).saturating_sub(1)
        };

        // lo landing in the padding gap after band `a` excludes band `a`
        if lo - values[a] > self.bandwidth() + 1e-10 {
            a += 1;
        }

        let (a, b) = if reverse {
            let n = values.len() - 1;
            (n - b, n - a)
        } else {
            (a, b)
        };

        if a > b {
            return None;
        }

        Some((a..=b).map(|i| self.domain[i].clone()).collect())
    }

    pub fn invert(&self, value: f32) -> Option<D> {
        self.invert_range((value, value))
            .map(|categories| categories[0].clone())
    }
}

/// Number of steps a band scale needs for `count` categories with the given
/// padding settings.
pub fn bandspace(count: usize, padding_inner: f32, padding_outer: f32) -> f32 {
    let padding_inner = padding_inner.clamp(0.0, 1.0);
    let padding_outer = padding_outer.max(0.0);
    count as f32 - padding_inner + padding_outer * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn defaults() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?;
        assert_eq!(scale.range(), (0.0, 1.0));
        assert_eq!(scale.padding_inner(), 0.1);
        Ok(())
    }

    #[test]
    fn empty_domain_is_an_error() {
        let err = BandScale::<String>::try_new(vec![]).unwrap_err();
        assert_eq!(err, FacetScaleError::EmptyDomain);
    }

    #[test]
    fn no_padding_divides_range_evenly() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?.with_padding(0.0);

        let result = scale.scale(&["a", "b", "c", "f"]).as_vec(4);
        assert_approx_eq!(f32, result[0], 0.0);
        assert_approx_eq!(f32, result[1], 0.3333333);
        assert_approx_eq!(f32, result[2], 0.6666667);
        assert!(result[3].is_nan());
        assert_approx_eq!(f32, scale.bandwidth(), 0.3333333);
        assert_approx_eq!(f32, scale.step(), 0.3333333);
        Ok(())
    }

    #[test]
    fn padding_insets_bands() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?
            .with_range((0.0, 120.0))
            .with_padding(0.2);

        let result = scale.scale(&["a", "b", "c"]).as_vec(3);
        assert_approx_eq!(f32, result[0], 7.5);
        assert_approx_eq!(f32, result[1], 45.0);
        assert_approx_eq!(f32, result[2], 82.5);
        assert_approx_eq!(f32, scale.bandwidth(), 30.0);
        Ok(())
    }

    #[test]
    fn inner_padding_shrinks_bandwidth_not_step_share() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?
            .with_range((0.0, 100.0))
            .with_padding_inner(0.1);
        assert_approx_eq!(f32, scale.bandwidth(), scale.step() * 0.9);
        Ok(())
    }

    #[test]
    fn round_produces_integer_positions() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?
            .with_range((0.0, 100.0))
            .with_padding(0.0)
            .with_round(true);

        let result = scale.scale(&["a", "b", "c"]).as_vec(3);
        assert_eq!(result[0], 1.0);
        assert_eq!(result[1], 34.0);
        assert_eq!(result[2], 67.0);
        assert_eq!(scale.bandwidth(), 33.0);
        Ok(())
    }

    #[test]
    fn invert_finds_band_and_rejects_gaps() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?
            .with_range((0.0, 120.0))
            .with_padding(0.2);

        assert_eq!(scale.invert(7.5), Some("a"));
        assert_eq!(scale.invert(45.0), Some("b"));
        assert_eq!(scale.invert(15.0), Some("a"));
        // in the padding gap between bands
        assert_eq!(scale.invert(40.0), None);
        assert_eq!(scale.invert(-10.0), None);
        assert_eq!(scale.invert(130.0), None);
        Ok(())
    }

    #[test]
    fn invert_range_spans_bands() -> Result<(), FacetScaleError> {
        let scale = BandScale::try_new(vec!["a", "b", "c"])?
            .with_range((0.0, 120.0))
            .with_padding(0.2);

        assert_eq!(scale.invert_range((7.5, 82.5)), Some(vec!["a", "b", "c"]));
        assert_eq!(scale.invert_range((45.0, 82.5)), Some(vec!["b", "c"]));
        // reversed input interval is reordered
        assert_eq!(scale.invert_range((82.5, 45.0)), Some(vec!["b", "c"]));
        assert_eq!(scale.invert_range((-10.0, -5.0)), None);
        assert_eq!(scale.invert_range((f32::NAN, 50.0)), None);
        Ok(())
    }

    #[test]
    fn test_bandspace() {
        assert_eq!(bandspace(3, 0.0, 0.0), 3.0);
        assert_eq!(bandspace(3, 0.2, 0.0), 2.8);
        assert_eq!(bandspace(3, 0.0, 0.5), 4.0);
        assert_eq!(bandspace(3, 1.5, -0.5), 2.0);
    }
}
