use facet_layout::error::FacetLayoutError;
use facet_scales::error::FacetScaleError;

#[derive(Debug, thiserror::Error)]
pub enum FacetAppError {
    #[error(transparent)]
    Scale(#[from] FacetScaleError),

    #[error(transparent)]
    Layout(#[from] FacetLayoutError),

    #[error("Unknown filter dimension: {0}")]
    UnknownDimension(String),
}
