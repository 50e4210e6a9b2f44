use std::sync::Arc;

use log::debug;

use facet_common::time::Instant;
use facet_layout::bin::BinBuilder;
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

/// How the bin domain refits on each update.
#[derive(Debug, Clone, Copy)]
pub enum DomainSpec {
    /// A fixed interval, independent of the filtered data (e.g. ages over
    /// [0, 100]).
    Fixed(f32, f32),
    /// `[0, max]` of the attribute over the current filtered records.
    ZeroToMax,
}

/// A horizontal-bar histogram: one rect per bin, laid out along a linear
/// domain axis, bar length proportional to bin count. Bins are keyed by
/// lower bound, so refitting the domain animates surviving bins in place.
pub struct Histogram<R> {
    name: String,
    width: f32,
    height: f32,
    domain: DomainSpec,
    thresholds: usize,
    accessor: Arc<dyn Fn(&R) -> Option<f64>>,
    pool: ElementPool,
    timeline: Timeline,
    count_axis: Axis,
    domain_axis: Axis,
}

impl<R> Histogram<R> {
    pub fn new(
        name: impl Into<String>,
        width: f32,
        height: f32,
        domain: DomainSpec,
        thresholds: usize,
        accessor: impl Fn(&R) -> Option<f64> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            domain,
            thresholds,
            accessor: Arc::new(accessor),
            pool: ElementPool::new(),
            timeline: Timeline::new(),
            count_axis: Axis::new(AxisOrientation::Top),
            domain_axis: Axis::new(AxisOrientation::Left),
        }
    }

    pub fn pool(&self) -> &ElementPool {
        &self.pool
    }

    fn fit_domain(&self, records: &[R]) -> (f32, f32) {
        match self.domain {
            DomainSpec::Fixed(d0, d1) => (d0, d1),
            DomainSpec::ZeroToMax => {
                let max = records
                    .iter()
                    .filter_map(|r| (self.accessor)(r))
                    .fold(f64::NEG_INFINITY, f64::max);
                if max.is_finite() && max > 0.0 {
                    (0.0, max as f32)
                } else {
                    (0.0, 1.0)
                }
            }
        }
    }
}

impl<R> Chart<R> for Histogram<R> {
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
        let domain = self.fit_domain(records);
        let bins = BinBuilder::new(domain)?
            .thresholds(self.thresholds)
            .bin(records, |r| (self.accessor)(r));

        let max_count = bins.iter().map(|b| b.count()).max().unwrap_or(0);
        let count_scale = LinearScale::new(&LinearScaleConfig {
            domain: (0.0, max_count as f32),
            range: (0.0, self.width),
            ..Default::default()
        });
        let domain_scale = LinearScale::new(&LinearScaleConfig {
            domain,
            range: (0.0, self.height),
            ..Default::default()
        });

        debug!("{}: {} bins over [{}, {}]", self.name, bins.len(), domain.0, domain.1);

        let keys: Vec<ElementKey> = bins.iter().map(|b| ElementKey::lower(b.x0)).collect();
        let join = self.pool.reconcile(&keys, ElementKind::Rect, surface, |_| {
            // collapsed start state: grows open instead of popping in
            AttrSet::new()
                .with("x", 0.0)
                .with("y", 0.0)
                .with("width", 0.0)
                .with("height", 0.0)
        });

        for (key, bin) in join.ordered.iter().zip(&bins) {
            let y0 = domain_scale.scale_scalar(bin.x0);
            let y1 = domain_scale.scale_scalar(bin.x1);
            let bar_width = count_scale.scale_scalar(bin.count() as f32);
            if y0.is_nan() || y1.is_nan() || bar_width.is_nan() {
                // unplaceable under the refitted scales; leave as-is
                continue;
            }

            let target = AttrSet::new()
                .with("x", 0.0)
                .with("y", y0 + 1.0)
                .with("height", (y1 - y0 - 2.0).max(0.0))
                .with("width", bar_width);
            self.timeline
                .schedule(now, &self.pool, key.clone(), target, false);

            let title = format!("{}: {}", bin.x0, bin.count());
            self.pool
                .apply(key, &AttrSet::new().with("title", title), surface);
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

        self.count_axis.update_linear(&count_scale, now, surface);
        self.domain_axis.update_linear(&domain_scale, now, surface);
        Ok(())
    }

    fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize {
        self.timeline.step(now, &mut self.pool, surface)
            + self.count_axis.tick(now, surface)
            + self.domain_axis.tick(now, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_common::time::Duration;
    use facet_scene::surface::RecordingSurface;
    use float_cmp::assert_approx_eq;

    #[derive(Clone)]
    struct Person {
        age: Option<f64>,
    }

    fn people(ages: &[f64]) -> Vec<Person> {
        ages.iter().map(|a| Person { age: Some(*a) }).collect()
    }

    fn settle<R>(chart: &mut Histogram<R>, mut now: Instant, surface: &mut RecordingSurface) -> Instant {
        loop {
            now += Duration::from_millis(50);
            if chart.tick(now, surface) == 0 {
                return now;
            }
        }
    }

    fn age_histogram() -> Histogram<Person> {
        Histogram::new(
            "age",
            460.0,
            350.0,
            DomainSpec::Fixed(0.0, 100.0),
            10,
            |p: &Person| p.age,
        )
    }

    #[test]
    fn renders_one_bar_per_bin_including_empties() {
        let mut chart = age_histogram();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&people(&[10.0, 55.0, 97.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        assert_eq!(chart.pool().len(), 10);

        let now = settle(&mut chart, now, &mut surface);
        let _ = now;

        // bars with one member reach 1/1 of the count range
        let full = chart
            .pool()
            .get(&ElementKey::lower(10.0))
            .unwrap()
            .attrs
            .scalar("width")
            .unwrap();
        assert_approx_eq!(f32, full, 460.0);

        let empty = chart
            .pool()
            .get(&ElementKey::lower(20.0))
            .unwrap()
            .attrs
            .scalar("width")
            .unwrap();
        assert_approx_eq!(f32, empty, 0.0);
    }

    #[test]
    fn bars_keep_identity_across_filter_changes() {
        let mut chart = age_histogram();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&people(&[10.0, 55.0, 97.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        let id = chart.pool().get(&ElementKey::lower(50.0)).unwrap().id;
        let now = settle(&mut chart, now, &mut surface);

        chart
            .update(&people(&[55.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        assert_eq!(chart.pool().get(&ElementKey::lower(50.0)).unwrap().id, id);
        assert_eq!(chart.pool().len(), 10);
    }

    #[test]
    fn titles_carry_bin_counts() {
        let mut chart = age_histogram();
        let mut surface = RecordingSurface::new();
        chart
            .update(
                &people(&[12.0, 15.0]),
                &FilterState::new(),
                Instant::now(),
                &mut surface,
            )
            .unwrap();

        let element = chart.pool().get(&ElementKey::lower(10.0)).unwrap();
        assert_eq!(element.attrs.text("title"), Some("10: 2"));
    }

    #[test]
    fn derived_domain_shrinks_with_the_data() {
        let mut chart = Histogram::new(
            "fare",
            460.0,
            350.0,
            DomainSpec::ZeroToMax,
            10,
            |p: &Person| p.age,
        );
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&people(&[80.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        let wide = chart.pool().len();
        let now = settle(&mut chart, now, &mut surface);

        chart
            .update(&people(&[8.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);
        let _ = now;

        // domain refit rebinned; stale bins exited and were removed
        assert!(chart.pool().len() <= wide.max(11));
        assert!(chart.pool().keys().all(|k| match k {
            ElementKey::Lower(v) => v.0 <= 8.0,
            _ => false,
        }));
    }

    #[test]
    fn empty_records_exit_all_bars_gracefully() {
        let mut chart = age_histogram();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&people(&[50.0]), &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);

        // fixed domain: bins persist with zero counts
        chart
            .update(&people(&[]), &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);
        let _ = now;
        assert_eq!(chart.pool().len(), 10);
        let widths: Vec<f32> = chart
            .pool()
            .keys()
            .map(|k| chart.pool().get(k).unwrap().attrs.scalar("width").unwrap())
            .collect();
        assert!(widths.iter().all(|w| *w == 0.0));
    }
}
