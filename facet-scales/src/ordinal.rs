use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::FacetScaleError;
use facet_common::value::ScalarOrArray;

/// A discrete scale mapping category values to a fixed set of outputs, with
/// a default for categories outside the domain. Insertion order of the
/// domain is preserved.
#[derive(Debug, Clone)]
pub struct OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug,
    R: Clone + Debug,
{
    mapping: IndexMap<D, R>,
    default_value: R,
}

impl<D, R> OrdinalScale<D, R>
where
    D: Clone + Hash + Eq + Debug,
    R: Clone + Debug,
{
    pub fn new(domain: &[D], range: &[R], default_value: R) -> Result<Self, FacetScaleError> {
        if domain.len() != range.len() {
            return Err(FacetScaleError::DomainRangeMismatch {
                domain_len: domain.len(),
                range_len: range.len(),
            });
        }

        let mapping = domain
            .iter()
            .cloned()
            .zip(range.iter().cloned())
            .collect::<IndexMap<_, _>>();

        Ok(Self {
            mapping,
            default_value,
        })
    }

    pub fn domain(&self) -> Vec<D> {
        self.mapping.keys().cloned().collect()
    }

    pub fn range(&self) -> Vec<R> {
        self.mapping.values().cloned().collect()
    }

    pub fn scale_scalar(&self, value: &D) -> R {
        self.mapping
            .get(value)
            .unwrap_or(&self.default_value)
            .clone()
    }

    pub fn scale(&self, values: &[D]) -> ScalarOrArray<R> {
        ScalarOrArray::Array(values.iter().map(|v| self.scale_scalar(v)).collect())
    }
}
