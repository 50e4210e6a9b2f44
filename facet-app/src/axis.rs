use indexmap::IndexMap;

use facet_common::time::Instant;
use facet_scales::band::BandScale;
use facet_scales::linear::LinearScale;
use facet_scene::attr::AttrSet;
use facet_scene::element::{ElementKey, ElementKind};
use facet_scene::pool::ElementPool;
use facet_scene::surface::Surface;
use facet_transition::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Top,
    Left,
}

impl AxisOrientation {
    /// The positional attribute ticks slide along.
    fn position_attr(&self) -> &'static str {
        match self {
            AxisOrientation::Top => "x",
            AxisOrientation::Left => "y",
        }
    }
}

/// An axis whose tick marks are reconciled and tweened like any other
/// keyed element: refitting the scale animates surviving ticks to their new
/// positions instead of snapping the whole axis.
#[derive(Debug)]
pub struct Axis {
    orientation: AxisOrientation,
    pool: ElementPool,
    timeline: Timeline,
}

impl Axis {
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            pool: ElementPool::new(),
            timeline: Timeline::new(),
        }
    }

    pub fn pool(&self) -> &ElementPool {
        &self.pool
    }

    /// Rebuilds tick marks from a refitted continuous scale. Tick values
    /// are the stable keys: a value surviving the refit keeps its element
    /// and animates; new values appear in place; dropped values exit.
    pub fn update_linear(&mut self, scale: &LinearScale, now: Instant, surface: &mut dyn Surface) {
        let ticks = scale.ticks(None);
        let positions = scale.scale(&ticks).as_vec(ticks.len());
        let attr = self.orientation.position_attr();

        let targets: IndexMap<ElementKey, AttrSet> = ticks
            .iter()
            .zip(&positions)
            .map(|(tick, pos)| {
                (
                    ElementKey::tick(*tick),
                    AttrSet::new().with(attr, *pos).with("length", 5.0),
                )
            })
            .collect();

        self.apply_targets(&ticks.iter().map(|t| t.to_string()).collect::<Vec<_>>(), targets, now, surface);
    }

    /// Rebuilds tick labels from a refitted band scale, one tick centered
    /// per band.
    pub fn update_band(
        &mut self,
        scale: &BandScale<String>,
        now: Instant,
        surface: &mut dyn Surface,
    ) {
        let attr = self.orientation.position_attr();
        let half_band = scale.bandwidth() / 2.0;

        let labels: Vec<String> = scale.domain().to_vec();
        let targets: IndexMap<ElementKey, AttrSet> = labels
            .iter()
            .map(|category| {
                let pos = scale.scale_scalar(category) + half_band;
                (
                    ElementKey::category(category.clone()),
                    AttrSet::new().with(attr, pos).with("length", 5.0),
                )
            })
            .collect();

        self.apply_targets(&labels, targets, now, surface);
    }

    fn apply_targets(
        &mut self,
        labels: &[String],
        targets: IndexMap<ElementKey, AttrSet>,
        now: Instant,
        surface: &mut dyn Surface,
    ) {
        let keys: Vec<ElementKey> = targets.keys().cloned().collect();

        // New ticks appear at their final position; only repositioning of
        // surviving ticks is animated.
        let join = self.pool.reconcile(&keys, ElementKind::Rule, surface, |key| {
            targets.get(key).cloned().unwrap_or_default()
        });

        for (key, label) in join.ordered.iter().zip(labels) {
            if let Some(target) = targets.get(key) {
                self.timeline
                    .schedule(now, &self.pool, key.clone(), target.clone(), false);
            }
            self.pool
                .apply(key, &AttrSet::new().with("label", label.as_str()), surface);
        }

        for key in &join.exit {
            self.timeline
                .schedule(now, &self.pool, key.clone(), AttrSet::new(), true);
        }
    }

    pub fn tick(&mut self, now: Instant, surface: &mut dyn Surface) -> usize {
        self.timeline.step(now, &mut self.pool, surface)
    }
}
