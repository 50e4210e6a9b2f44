#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FacetScaleError {
    #[error("Domain length ({domain_len}) does not match range length ({range_len})")]
    DomainRangeMismatch { domain_len: usize, range_len: usize },

    #[error("Empty domain")]
    EmptyDomain,
}
