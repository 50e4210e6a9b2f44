use std::sync::Arc;

use indexmap::IndexMap;
use itertools::izip;
use log::debug;

use facet_common::time::Instant;
use facet_common::types::{ArcAttr, Rgba};
use facet_layout::pie::PieLayout;
use facet_scales::ordinal::OrdinalScale;
use facet_scene::attr::AttrSet;
use facet_scene::element::{ElementKey, ElementKind};
use facet_scene::pool::ElementPool;
use facet_scene::surface::Surface;
use facet_transition::timeline::Timeline;

use crate::chart::Chart;
use crate::error::FacetAppError;
use crate::filter::FilterState;

/// The d3 category10 palette, used when no explicit palette is given.
pub const CATEGORY10: [Rgba; 10] = [
    [0.121, 0.466, 0.705, 1.0],
    [1.0, 0.498, 0.054, 1.0],
    [0.172, 0.627, 0.172, 1.0],
    [0.839, 0.152, 0.156, 1.0],
    [0.580, 0.403, 0.741, 1.0],
    [0.549, 0.337, 0.294, 1.0],
    [0.890, 0.466, 0.760, 1.0],
    [0.498, 0.498, 0.498, 1.0],
    [0.737, 0.741, 0.133, 1.0],
    [0.090, 0.745, 0.811, 1.0],
];

const GRAY: Rgba = [0.5, 0.5, 0.5, 1.0];

/// A pie chart over a fixed category universe, acting as a filter control
/// for one dimension. Every known category always has a slice; categories
/// with no matching records keep a collapsed slice at their natural angle
/// so they grow back in place when records return.
pub struct PieChart<R> {
    name: String,
    dimension: String,
    categories: Vec<String>,
    accessor: Arc<dyn Fn(&R) -> String>,
    colors: OrdinalScale<String, Rgba>,
    layout: PieLayout,
    pool: ElementPool,
    timeline: Timeline,
}

impl<R> PieChart<R> {
    pub fn new(
        name: impl Into<String>,
        dimension: impl Into<String>,
        categories: Vec<String>,
        accessor: impl Fn(&R) -> String + 'static,
    ) -> Result<Self, FacetAppError> {
        Self::with_palette(name, dimension, categories, accessor, &CATEGORY10)
    }

    pub fn with_palette(
        name: impl Into<String>,
        dimension: impl Into<String>,
        categories: Vec<String>,
        accessor: impl Fn(&R) -> String + 'static,
        palette: &[Rgba],
    ) -> Result<Self, FacetAppError> {
        // Cycle the palette so every category has a color
        let range: Vec<Rgba> = palette
            .iter()
            .cycle()
            .take(categories.len())
            .cloned()
            .collect();
        let colors = OrdinalScale::new(&categories, &range, GRAY)?;

        Ok(Self {
            name: name.into(),
            dimension: dimension.into(),
            categories,
            accessor: Arc::new(accessor),
            colors,
            layout: PieLayout::new(),
            pool: ElementPool::new(),
            timeline: Timeline::new(),
        })
    }

    pub fn with_pad_angle(mut self, pad_angle: f32) -> Self {
        self.layout = self.layout.with_pad_angle(pad_angle);
        self
    }

    pub fn pool(&self) -> &ElementPool {
        &self.pool
    }

    fn counts(&self, records: &[R]) -> Vec<usize> {
        let mut counts = vec![0usize; self.categories.len()];
        let index: IndexMap<&str, usize> = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        for record in records {
            if let Some(i) = index.get((self.accessor)(record).as_str()) {
                counts[*i] += 1;
            }
        }
        counts
    }
}

impl<R> Chart<R> for PieChart<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Option<&str> {
        Some(&self.dimension)
    }

    fn update(
        &mut self,
        records: &[R],
        filter: &FilterState,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Result<(), FacetAppError> {
        let counts = self.counts(records);
        debug!("{}: counts {:?}", self.name, counts);

        let weights: Vec<f64> = counts.iter().map(|c| *c as f64).collect();
        let arcs = self.layout.layout(&weights)?;

        let keys: Vec<ElementKey> = self
            .categories
            .iter()
            .map(|c| ElementKey::category(c.clone()))
            .collect();
        let targets: IndexMap<&ElementKey, &ArcAttr> = keys.iter().zip(&arcs).collect();

        let colors = &self.colors;
        let join = self.pool.reconcile(&keys, ElementKind::Arc, surface, |key| {
            // New slices grow out of their final position instead of
            // sweeping in from angle zero
            let start = targets
                .get(key)
                .map(|arc| arc.start_angle)
                .unwrap_or(0.0);
            let fill = match key {
                ElementKey::Category(c) => colors.scale_scalar(c),
                _ => GRAY,
            };
            AttrSet::new()
                .with("arc", ArcAttr::collapsed_at(start))
                .with("fill", fill)
        });

        for (key, arc, category, count) in izip!(&join.ordered, &arcs, &self.categories, &counts) {
            let target = AttrSet::new()
                .with("arc", *arc)
                .with("fill", self.colors.scale_scalar(category));
            self.timeline
                .schedule(now, &self.pool, key.clone(), target, false);

            let selected = filter.selected(&self.dimension) == Some(category.as_str());
            self.pool.apply(
                key,
                &AttrSet::new()
                    .with("title", format!("{category}: {count}"))
                    .with("selected", selected),
                surface,
            );
        }

        // The category universe is fixed, but a reconfigured chart may drop
        // categories; those slices collapse where they stand and leave
        for key in &join.exit {
            let start = self
                .pool
                .get(key)
                .and_then(|el| el.attrs.arc("arc"))
                .map(|arc| arc.start_angle)
                .unwrap_or(0.0);
            self.timeline.schedule(
                now,
                &self.pool,
                key.clone(),
                AttrSet::new().with("arc", ArcAttr::collapsed_at(start)),
                true,
            );
        }
        Ok(())
    }

    fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize {
        self.timeline.step(now, &mut self.pool, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_common::time::Duration;
    use facet_scene::surface::RecordingSurface;
    use float_cmp::assert_approx_eq;
    use std::f32::consts::TAU;

    #[derive(Clone)]
    struct Passenger {
        sex: &'static str,
    }

    fn passengers() -> Vec<Passenger> {
        let mut rows = vec![Passenger { sex: "male" }; 3];
        rows.push(Passenger { sex: "female" });
        rows
    }

    fn chart() -> PieChart<Passenger> {
        PieChart::new(
            "sex",
            "sex",
            vec!["male".to_string(), "female".to_string()],
            |p: &Passenger| p.sex.to_string(),
        )
        .unwrap()
    }

    fn settle(
        chart: &mut PieChart<Passenger>,
        mut now: Instant,
        surface: &mut RecordingSurface,
    ) -> Instant {
        loop {
            now += Duration::from_millis(50);
            if chart.tick(now, surface) == 0 {
                return now;
            }
        }
    }

    #[test]
    fn slice_spans_match_category_proportions() {
        let mut chart = chart();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&passengers(), &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);
        let _ = now;

        let male = chart
            .pool()
            .get(&ElementKey::category("male"))
            .unwrap()
            .attrs
            .arc("arc")
            .unwrap();
        let female = chart
            .pool()
            .get(&ElementKey::category("female"))
            .unwrap()
            .attrs
            .arc("arc")
            .unwrap();

        assert_approx_eq!(f32, male.span(), TAU * 0.75, epsilon = 1e-4);
        assert_approx_eq!(f32, female.span(), TAU * 0.25, epsilon = 1e-4);
        assert_approx_eq!(f32, female.start_angle, male.end_angle, epsilon = 1e-4);
    }

    #[test]
    fn empty_category_keeps_a_collapsed_slice() {
        let mut chart = chart();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        let males: Vec<Passenger> = passengers()
            .into_iter()
            .filter(|p| p.sex == "male")
            .collect();
        chart
            .update(&males, &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);
        let _ = now;

        assert_eq!(chart.pool().len(), 2);
        let female = chart
            .pool()
            .get(&ElementKey::category("female"))
            .unwrap()
            .attrs
            .arc("arc")
            .unwrap();
        assert!(female.is_collapsed());
        assert_approx_eq!(f32, female.start_angle, TAU, epsilon = 1e-4);
    }

    #[test]
    fn slices_keep_identity_as_proportions_shift() {
        let mut chart = chart();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        chart
            .update(&passengers(), &FilterState::new(), now, &mut surface)
            .unwrap();
        let male_id = chart.pool().get(&ElementKey::category("male")).unwrap().id;
        let now = settle(&mut chart, now, &mut surface);

        let mut rows = passengers();
        rows.extend(vec![Passenger { sex: "female" }; 5]);
        chart
            .update(&rows, &FilterState::new(), now, &mut surface)
            .unwrap();
        let now = settle(&mut chart, now, &mut surface);
        let _ = now;

        assert_eq!(
            chart.pool().get(&ElementKey::category("male")).unwrap().id,
            male_id
        );
    }

    #[test]
    fn selected_flag_follows_the_filter() {
        let mut chart = chart();
        let mut surface = RecordingSurface::new();
        let now = Instant::now();

        let mut filter = FilterState::new();
        filter.toggle("sex", "female");
        chart
            .update(&passengers(), &filter, now, &mut surface)
            .unwrap();

        let flag = |cat: &str| {
            chart
                .pool()
                .get(&ElementKey::category(cat))
                .unwrap()
                .attrs
                .flag("selected")
                .unwrap()
        };
        assert!(flag("female"));
        assert!(!flag("male"));
    }

    #[test]
    fn titles_carry_category_counts() {
        let mut chart = chart();
        let mut surface = RecordingSurface::new();

        chart
            .update(&passengers(), &FilterState::new(), Instant::now(), &mut surface)
            .unwrap();

        let title = chart
            .pool()
            .get(&ElementKey::category("male"))
            .unwrap()
            .attrs
            .text("title")
            .map(str::to_string)
            .unwrap();
        assert_eq!(title, "male: 3");
    }
}
