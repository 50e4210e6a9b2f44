#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FacetLayoutError {
    #[error("Invalid bin domain [{start}, {end}]")]
    InvalidDomain { start: f32, end: f32 },

    #[error("Bin boundaries must be in ascending order: {0:?}")]
    BoundariesNotAscending(Vec<f32>),

    #[error("Negative pie weight: {0}")]
    NegativeWeight(f64),
}
