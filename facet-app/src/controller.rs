use indexmap::IndexMap;
use log::{debug, info};

use facet_common::time::Instant;
use facet_scene::surface::Surface;

use crate::chart::Chart;
use crate::error::FacetAppError;
use crate::event::InteractionEvent;
use crate::filter::{Dimension, FilterState};

/// Owns the records, the filter state and the charts, and keeps them in
/// agreement: every interaction updates the filter, re-derives the filtered
/// record set once, and fans the same set out to every chart with a single
/// shared timestamp.
pub struct CrossFilter<R: Clone> {
    records: Vec<R>,
    dimensions: IndexMap<String, Dimension<R>>,
    filter: FilterState,
    charts: Vec<Box<dyn Chart<R>>>,
}

impl<R: Clone> CrossFilter<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            dimensions: IndexMap::new(),
            filter: FilterState::new(),
            charts: Vec::new(),
        }
    }

    pub fn with_dimension(
        mut self,
        name: impl Into<String>,
        accessor: impl Fn(&R) -> String + 'static,
    ) -> Self {
        let name = name.into();
        self.dimensions
            .insert(name.clone(), Dimension::new(name, accessor));
        self
    }

    pub fn add_chart(&mut self, chart: Box<dyn Chart<R>>) {
        self.charts.push(chart);
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn selection_label(&self, dimension: &str) -> String {
        self.filter.selection_label(dimension)
    }

    /// Records passing every active selection, in original order. Each
    /// chart sees the same filtered set; a pie chart for a dimension is
    /// filtered by its own selection too, so a selected slice grows to the
    /// whole circle.
    pub fn filtered(&self) -> Vec<R> {
        self.records
            .iter()
            .filter(|r| self.filter.passes(*r, &self.dimensions))
            .cloned()
            .collect()
    }

    /// Translates a click on one of `chart`'s elements into the toggle
    /// event for that chart's filter dimension. Clicks on charts without a
    /// dimension (histograms, bar charts) are ignored.
    pub fn slice_clicked(
        &mut self,
        chart: &str,
        key: &str,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError> {
        let Some(dimension) = self
            .charts
            .iter()
            .find(|c| c.name() == chart)
            .and_then(|c| c.dimension())
            .map(str::to_string)
        else {
            return Ok(());
        };
        self.handle(&InteractionEvent::slice_clicked(dimension, key), now, surface)
    }

    /// Applies one interaction to the filter and refreshes every chart.
    /// Events naming an unregistered dimension are rejected before any
    /// state changes.
    pub fn handle(
        &mut self,
        event: &InteractionEvent,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError> {
        if !self.dimensions.contains_key(event.dimension()) {
            return Err(FacetAppError::UnknownDimension(
                event.dimension().to_string(),
            ));
        }

        match event {
            InteractionEvent::SliceClicked { dimension, key } => {
                let active = self.filter.toggle(dimension, key);
                info!(
                    "{dimension}: {}",
                    if active { key.as_str() } else { "cleared" }
                );
            }
            InteractionEvent::ControlChanged { dimension, value } => {
                let value = (!value.is_empty()).then(|| value.clone());
                info!("{dimension}: {:?}", value);
                self.filter.set(dimension, value);
            }
        }

        self.update_all(now, surface)
    }

    /// Re-derives the filtered set and pushes it to every chart. Also the
    /// entry point for the initial render, before any interaction.
    pub fn update_all(
        &mut self,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError> {
        let filtered = self.filtered();
        debug!("{} of {} records pass", filtered.len(), self.records.len());
        for chart in &mut self.charts {
            chart.update(&filtered, &self.filter, now, surface)?;
        }
        Ok(())
    }

    /// Advances every chart's animations to `now`. Returns the number of
    /// transitions still running across all charts.
    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize {
        self.charts
            .iter_mut()
            .map(|chart| chart.tick(now, surface))
            .sum()
    }
}
