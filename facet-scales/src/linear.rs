use facet_common::value::ScalarOrArray;

use crate::array;

#[derive(Clone, Debug)]
pub struct LinearScaleConfig {
    pub domain: (f32, f32),
    pub range: (f32, f32),
    pub clamp: bool,
    pub round: bool,
    pub nice: Option<usize>,
}

impl Default for LinearScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            round: false,
            nice: None,
        }
    }
}

/// A linear scale mapping a numeric domain interval onto a pixel range.
///
/// Values outside the fitted domain map to NaN ("unplaceable") unless
/// clamping is enabled; callers must skip placement for NaN outputs rather
/// than defaulting them to zero.
#[derive(Clone, Debug)]
pub struct LinearScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
    clamp: bool,
    round: bool,
}

impl LinearScale {
    pub fn new(config: &LinearScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            round: config.round,
        };

        if let Some(nice) = config.nice {
            this = this.nice(Some(nice));
        }

        this
    }

    /// Refits the domain. Pure with respect to the rest of the scale and
    /// idempotent for the same interval.
    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.domain_start, self.domain_end)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_start, self.range_end)
    }

    /// Extends the domain outward to nice round numbers.
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let reversed = self.domain_start > self.domain_end;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let count = count.unwrap_or(10);
        let mut prestep = 0.0;
        let mut max_iter = 10;
        while max_iter > 0 {
            let step = array::tick_increment(start, stop, count as f32);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = step;
            max_iter -= 1;
        }

        if reversed {
            self.domain_start = stop;
            self.domain_end = start;
        } else {
            self.domain_start = start;
            self.domain_end = stop;
        }
        self
    }

    fn degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }

    /// Maps one domain value into the range.
    pub fn scale_scalar(&self, value: f32) -> f32 {
        if self.degenerate() {
            return self.range_start;
        }

        let (domain_min, domain_max) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let value = if self.clamp {
            value.clamp(domain_min, domain_max)
        } else if value < domain_min || value > domain_max || value.is_nan() {
            // Outside the fitted domain: unplaceable
            return f32::NAN;
        } else {
            value
        };

        let scale = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let out = self.range_start + scale * (value - self.domain_start);
        if self.round {
            out.round()
        } else {
            out
        }
    }

    /// Maps a slice of domain values into the range.
    pub fn scale(&self, values: &[f32]) -> ScalarOrArray<f32> {
        if self.degenerate() {
            return ScalarOrArray::Scalar(self.range_start);
        }
        ScalarOrArray::Array(values.iter().map(|v| self.scale_scalar(*v)).collect())
    }

    /// Maps a range value back into the domain.
    pub fn invert(&self, value: f32) -> f32 {
        if self.degenerate() {
            return self.domain_start;
        }

        let scale = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        let out = self.domain_start + scale * (value - self.range_start);
        if self.clamp {
            let (lo, hi) = if self.domain_start <= self.domain_end {
                (self.domain_start, self.domain_end)
            } else {
                (self.domain_end, self.domain_start)
            };
            out.clamp(lo, hi)
        } else {
            out
        }
    }

    /// Tick values within the current domain, suitable for axis rendering.
    pub fn ticks(&self, count: Option<usize>) -> Vec<f32> {
        array::ticks(
            self.domain_start,
            self.domain_end,
            count.unwrap_or(10) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn maps_domain_to_range() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 100.0),
            range: (0.0, 480.0),
            ..Default::default()
        });

        let result = scale.scale(&[0.0, 25.0, 100.0]).as_vec(3);
        assert_approx_eq!(f32, result[0], 0.0);
        assert_approx_eq!(f32, result[1], 120.0);
        assert_approx_eq!(f32, result[2], 480.0);
    }

    #[test]
    fn out_of_domain_is_unplaceable() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert!(scale.scale_scalar(-1.0).is_nan());
        assert!(scale.scale_scalar(10.5).is_nan());
        assert!(scale.scale_scalar(f32::NAN).is_nan());
        assert_approx_eq!(f32, scale.scale_scalar(10.0), 100.0);
    }

    #[test]
    fn clamp_pins_to_range_edges() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });

        assert_approx_eq!(f32, scale.scale_scalar(-5.0), 0.0);
        assert_approx_eq!(f32, scale.scale_scalar(20.0), 100.0);
    }

    #[test]
    fn degenerate_domain_collapses_to_range_start() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (5.0, 5.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert_eq!(scale.scale_scalar(5.0), 0.0);
        assert_eq!(scale.scale(&[1.0, 2.0]), ScalarOrArray::Scalar(0.0));
    }

    #[test]
    fn invert_roundtrips() {
        let scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, 50.0),
            range: (0.0, 200.0),
            ..Default::default()
        });

        assert_approx_eq!(f32, scale.invert(scale.scale_scalar(37.0)), 37.0);
    }

    #[test]
    fn refit_is_idempotent() {
        let scale = LinearScale::new(&LinearScaleConfig::default())
            .with_domain((0.0, 42.0))
            .with_domain((0.0, 42.0));
        assert_eq!(scale.domain(), (0.0, 42.0));
    }

    #[test]
    fn nice_extends_to_round_numbers() {
        let scale = LinearScale::new(&LinearScaleConfig::default())
            .with_domain((0.13, 9.87))
            .nice(Some(10));
        assert_eq!(scale.domain(), (0.0, 10.0));
    }

    #[test]
    fn ticks_cover_domain() {
        let scale = LinearScale::new(&LinearScaleConfig::default()).with_domain((0.0, 100.0));
        let ticks = scale.ticks(Some(10));
        assert_eq!(ticks.first(), Some(&0.0));
        assert_eq!(ticks.last(), Some(&100.0));
        assert_eq!(ticks.len(), 11);
    }
}
