use ordered_float::OrderedFloat;

use crate::error::FacetLayoutError;
use facet_scales::array;

/// One histogram bucket: the half-open interval `[x0, x1)` (the last bin of
/// a series is closed on both ends) and the indices of the member records.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub x0: f32,
    pub x1: f32,
    pub members: Vec<usize>,
}

impl Bin {
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// The lower bound doubles as the bin's stable key: boundaries are
    /// strictly ascending within one series, so keys are unique.
    pub fn key(&self) -> OrderedFloat<f32> {
        OrderedFloat(self.x0)
    }
}

#[derive(Debug, Clone)]
enum Thresholds {
    Count(usize),
    Boundaries(Vec<f32>),
}

/// Buckets a numeric attribute into contiguous bins covering a domain
/// interval. Bins with no members are still emitted so empty intervals
/// render rather than compressing the axis.
#[derive(Debug, Clone)]
pub struct BinBuilder {
    domain: (f32, f32),
    thresholds: Thresholds,
}

impl BinBuilder {
    pub fn new(domain: (f32, f32)) -> Result<Self, FacetLayoutError> {
        if !(domain.0 <= domain.1) || !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(FacetLayoutError::InvalidDomain {
                start: domain.0,
                end: domain.1,
            });
        }
        Ok(Self {
            domain,
            thresholds: Thresholds::Count(10),
        })
    }

    /// Approximately `count` bins with nicely-rounded boundaries.
    pub fn thresholds(mut self, count: usize) -> Self {
        self.thresholds = Thresholds::Count(count);
        self
    }

    /// Explicit interior boundaries. Must be ascending; values outside the
    /// open domain interval are dropped.
    pub fn boundaries(mut self, boundaries: Vec<f32>) -> Result<Self, FacetLayoutError> {
        if !boundaries.windows(2).all(|w| w[0] < w[1]) {
            return Err(FacetLayoutError::BoundariesNotAscending(boundaries));
        }
        self.thresholds = Thresholds::Boundaries(boundaries);
        Ok(self)
    }

    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    fn separators(&self) -> Vec<f32> {
        let (d0, d1) = self.domain;
        let candidates = match &self.thresholds {
            Thresholds::Count(count) => array::ticks(d0, d1, *count as f32),
            Thresholds::Boundaries(boundaries) => boundaries.clone(),
        };
        candidates
            .into_iter()
            .filter(|b| *b > d0 && *b < d1)
            .collect()
    }

    /// Bins `records` by the numeric attribute the accessor extracts.
    ///
    /// Records whose accessor yields `None` (missing/unparsable value) are
    /// excluded from the series; values outside the domain are not placed.
    pub fn bin<R>(&self, records: &[R], accessor: impl Fn(&R) -> Option<f64>) -> Vec<Bin> {
        let (d0, d1) = self.domain;
        let separators = self.separators();

        let mut edges = Vec::with_capacity(separators.len() + 2);
        edges.push(d0);
        edges.extend_from_slice(&separators);
        edges.push(d1);

        let mut bins: Vec<Bin> = edges
            .windows(2)
            .map(|w| Bin {
                x0: w[0],
                x1: w[1],
                members: Vec::new(),
            })
            .collect();

        if bins.is_empty() {
            return bins;
        }

        for (index, record) in records.iter().enumerate() {
            let Some(value) = accessor(record) else {
                continue;
            };
            let value = value as f32;
            if value < d0 || value > d1 || value.is_nan() {
                continue;
            }
            // Values equal to a separator belong to the upper bin; the
            // domain maximum lands in the final (closed) bin.
            let slot = separators.partition_point(|s| *s <= value);
            bins[slot].members.push(index);
        }

        debug_assert!(
            bins.windows(2).all(|w| w[0].x1 == w[1].x0),
            "bins must tile the domain contiguously"
        );

        bins
    }
}
