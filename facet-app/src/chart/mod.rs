pub mod bar;
pub mod histogram;
pub mod pie;

pub use bar::BarChart;
pub use histogram::{DomainSpec, Histogram};
pub use pie::PieChart;

use facet_common::time::Instant;
use facet_scene::surface::Surface;

use crate::error::FacetAppError;
use crate::filter::FilterState;

/// One linked chart. The controller rebuilds every chart's series from the
/// shared filtered record set and fans `update` out; `tick` advances the
/// chart's transitions against the shared clock.
pub trait Chart<R> {
    fn name(&self) -> &str;

    /// The filter dimension this chart's click interactions toggle, if any.
    fn dimension(&self) -> Option<&str> {
        None
    }

    /// Recomputes the chart's series from the filtered records, reconciles
    /// the element pool, refits scales and schedules transitions.
    fn update(
        &mut self,
        records: &[R],
        filter: &FilterState,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError>;

    /// Steps in-flight transitions. Returns how many are still running.
    fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize;
}
