use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;

use facet_common::time::Instant;
use facet_scales::band::BandScale;
use facet_scales::linear::{LinearScale, LinearScaleConfig};
use facet_scene::attr::AttrSet;
use facet_scene::element::{ElementKey, ElementKind};
use facet_scene::pool::ElementPool;
use facet_scene::surface::Surface;
use facet_transition::timeline::Timeline;

use crate::axis::{Axis, AxisOrientation};
use crate::chart::Chart;
use crate::error::FacetAppError;
use crate::filter::FilterState;

/// A horizontal bar chart: one rect per category on an ordinal-band axis,
/// bar length on a linear value axis. Bars are keyed by category, so the
/// same category is always bound to the same element across updates.
pub struct BarChart<R> {
    name: String,
    width: f32,
    height: f32,
    category: Arc<dyn Fn(&R) -> String>,
    value: Arc<dyn Fn(&R) -> Option<f64>>,
    pool: ElementPool,
    timeline: Timeline,
    value_axis: Axis,
    band_axis: Axis,
}

impl<R> BarChart<R> {
    pub fn new(
        name: impl Into<String>,
        width: f32,
        height: f32,
        category: impl Fn(&R) -> String + 'static,
        value: impl Fn(&R) -> Option<f64> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            category: Arc::new(category),
            value: Arc::new(value),
            pool: ElementPool::new(),
            timeline: Timeline::new(),
            value_axis: Axis::new(AxisOrientation::Top),
            band_axis: Axis::new(AxisOrientation::Left),
        }
    }

    pub fn pool(&self) -> &ElementPool {
        &self.pool
    }

    /// One entry per category in first-seen order. Inserting through a map
    /// makes the key-unique precondition structural; a category appearing
    /// twice keeps its last value.
    fn series(&self, records: &[R]) -> IndexMap<String, f64> {
        let mut series = IndexMap::new();
        for record in records {
            if let Some(value) = (self.value)(record) {
                series.insert((self.category)(record), value);
            }
        }
        series
    }
}

impl<R> Chart<R> for BarChart<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(
        &mut self,
        records: &[R],
        _filter: &FilterState,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError> {
        let series = self.series(records);
        debug!("{}: {} categories", self.name, series.len());

        let max_value = series.values().fold(0.0_f64, |a, b| a.max(*b));
        let value_scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, max_value as f32),
            range: (0.0, self.width),
            ..Default::default()
        });

        let keys: Vec<ElementKey> = series
            .keys()
            .map(|c| ElementKey::category(c.clone()))
            .collect();

        let band_scale = if series.is_empty() {
            None
        } else {
            Some(
                BandScale::try_new(series.keys().cloned().collect::<Vec<_>>())?
                    .with_range((0.0, self.height)),
            )
        };

        let join = self.pool.reconcile(&keys, ElementKind::Rect, surface, |key| {
            let y = match (key, &band_scale) {
                (ElementKey::Category(c), Some(scale)) => scale.scale_scalar(c),
                _ => f32::NAN,
            };
            let mut attrs = AttrSet::new().with("x", 0.0).with("width", 0.0);
            if !y.is_nan() {
                attrs.set("y", y);
                attrs.set(
                    "height",
                    band_scale.as_ref().map(|s| s.bandwidth()).unwrap_or(0.0),
                );
            }
            attrs
        });

        if let Some(scale) = &band_scale {
            for (key, (category, value)) in join.ordered.iter().zip(&series) {
                let y = scale.scale_scalar(category);
                let bar_width = value_scale.scale_scalar(*value as f32);
                if y.is_nan() || bar_width.is_nan() {
                    continue;
                }

                let target = AttrSet::new()
                    .with("x", 0.0)
                    .with("y", y)
                    .with("height", scale.bandwidth())
                    .with("width", bar_width);
                self.timeline
                    .schedule(now, &self.pool, key.clone(), target, false);

                self.pool.apply(
                    key,
                    &AttrSet::new().with("title", category.as_str()),
                    surface,
                );
            }
        }

        for key in &join.exit {
            self.timeline.schedule(
                now,
                &self.pool,
                key.clone(),
                AttrSet::new().with("width", 0.0),
                true,
            );
        }

        self.value_axis.update_linear(&value_scale, now, surface);
        if let Some(scale) = &band_scale {
            self.band_axis.update_band(scale, now, surface);
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize {
        self.timeline.step(now, &mut self.pool, surface)
            + self.value_axis.tick(now, surface)
            + self.band_axis.tick(now, surface)
    }
}
