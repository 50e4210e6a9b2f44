use indexmap::IndexMap;
use log::trace;

use facet_common::time::{Duration, Instant};
use facet_scene::attr::AttrSet;
use facet_scene::element::ElementKey;
use facet_scene::pool::ElementPool;
use facet_scene::surface::Surface;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// One in-flight attribute animation for one element.
#[derive(Debug, Clone)]
struct Transition {
    from: AttrSet,
    to: AttrSet,
    start: Instant,
    duration: Duration,
    remove_on_complete: bool,
}

impl Transition {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// The shared cooperative clock driving all transitions of one pool.
///
/// At most one transition runs per element: scheduling a new one while
/// another is mid-flight supersedes it, starting from the currently
/// interpolated attributes so there is no jump discontinuity. The
/// superseded transition is simply abandoned.
#[derive(Debug, Default)]
pub struct Timeline {
    active: IndexMap<ElementKey, Transition>,
    duration: Duration,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            active: IndexMap::new(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts (or supersedes) a transition toward `to` for the element
    /// bound to `key`. With `remove_on_complete` set, the element is an
    /// exit: it drops from the pool and the surface once `t` reaches 1.
    pub fn schedule(
        &mut self,
        now: Instant,
        pool: &ElementPool,
        key: ElementKey,
        to: AttrSet,
        remove_on_complete: bool,
    ) {
        let Some(element) = pool.get(&key) else {
            trace!("schedule for unknown key {key}, ignored");
            return;
        };

        // The pooled attrs carry everything the superseded transition's
        // target omitted; the interpolated values win for the attrs it
        // actually animated.
        let mut from = element.attrs.clone();
        if let Some(running) = self.active.get(&key) {
            from.merge(&crate::tween::lerp_attrs(
                &running.from,
                &running.to,
                running.progress(now),
            ));
        }

        self.active.insert(
            key,
            Transition {
                from,
                to,
                start: now,
                duration: self.duration,
                remove_on_complete,
            },
        );
    }

    /// Advances every in-flight transition to `now`, writing interpolated
    /// attributes to the pool and the surface. Completed exits are removed
    /// here; completed enters flip to the live phase. Returns the number of
    /// transitions still running.
    pub fn step(
        &mut self,
        now: Instant,
        pool: &mut ElementPool,
        surface: &mut dyn Surface,
    ) -> usize {
        let mut completed: Vec<(ElementKey, bool)> = Vec::new();

        for (key, transition) in self.active.iter() {
            let t = transition.progress(now);
            let attrs = crate::tween::lerp_attrs(&transition.from, &transition.to, t);

            match pool.get_mut(key) {
                Some(element) => {
                    element.attrs.merge(&attrs);
                    surface.set_attrs(element.id, &attrs);
                    if t >= 1.0 {
                        completed.push((key.clone(), transition.remove_on_complete));
                    }
                }
                None => {
                    // Element vanished out from under the transition
                    completed.push((key.clone(), false));
                }
            }
        }

        for (key, remove) in completed {
            if remove {
                pool.remove_completed(&key, surface);
            } else {
                pool.mark_live(&key);
            }
            self.active.shift_remove(&key);
        }

        self.active.len()
    }

    pub fn is_animating(&self, key: &ElementKey) -> bool {
        self.active.contains_key(key)
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_scene::attr::AttrSet;
    use facet_scene::element::{ElementKind, Phase};
    use facet_scene::surface::RecordingSurface;
    use float_cmp::assert_approx_eq;

    fn setup(keys: &[&str]) -> (ElementPool, RecordingSurface) {
        let mut pool = ElementPool::new();
        let mut surface = RecordingSurface::new();
        let keys: Vec<ElementKey> = keys.iter().map(|k| ElementKey::category(*k)).collect();
        pool.reconcile(&keys, ElementKind::Rect, &mut surface, |_| {
            AttrSet::new().with("width", 0.0)
        });
        (pool, surface)
    }

    #[test]
    fn drives_attributes_to_target() {
        let (mut pool, mut surface) = setup(&["a"]);
        let mut timeline = Timeline::new().with_duration(Duration::from_millis(100));
        let key = ElementKey::category("a");
        let t0 = Instant::now();

        timeline.schedule(t0, &pool, key.clone(), AttrSet::new().with("width", 10.0), false);

        timeline.step(t0 + Duration::from_millis(50), &mut pool, &mut surface);
        let mid = pool.get(&key).unwrap().attrs.scalar("width").unwrap();
        assert_approx_eq!(f32, mid, 5.0);

        let remaining = timeline.step(t0 + Duration::from_millis(100), &mut pool, &mut surface);
        assert_eq!(remaining, 0);
        let element = pool.get(&key).unwrap();
        assert_approx_eq!(f32, element.attrs.scalar("width").unwrap(), 10.0);
        assert_eq!(element.phase, Phase::Live);
    }

    #[test]
    fn supersede_starts_from_interpolated_value() {
        let (mut pool, mut surface) = setup(&["a"]);
        let mut timeline = Timeline::new().with_duration(Duration::from_millis(100));
        let key = ElementKey::category("a");
        let t0 = Instant::now();

        timeline.schedule(t0, &pool, key.clone(), AttrSet::new().with("width", 10.0), false);

        // halfway through, retarget without stepping first
        let t_half = t0 + Duration::from_millis(50);
        timeline.schedule(t_half, &pool, key.clone(), AttrSet::new().with("width", 0.0), false);

        // immediately after retargeting, the value is the old midpoint
        timeline.step(t_half, &mut pool, &mut surface);
        let width = pool.get(&key).unwrap().attrs.scalar("width").unwrap();
        assert_approx_eq!(f32, width, 5.0);

        // and it animates from there toward the new target
        timeline.step(t_half + Duration::from_millis(50), &mut pool, &mut surface);
        let width = pool.get(&key).unwrap().attrs.scalar("width").unwrap();
        assert_approx_eq!(f32, width, 2.5);
    }

    #[test]
    fn exit_removes_element_on_completion_only() {
        let (mut pool, mut surface) = setup(&["a", "b"]);
        let mut timeline = Timeline::new().with_duration(Duration::from_millis(100));
        let t0 = Instant::now();

        // reconcile away "a", then animate it out
        let keep = vec![ElementKey::category("b")];
        let join = pool.reconcile(&keep, ElementKind::Rect, &mut surface, |_| AttrSet::new());
        let exit_key = join.exit[0].clone();
        let exit_id = pool.get(&exit_key).unwrap().id;
        timeline.schedule(
            t0,
            &pool,
            exit_key.clone(),
            AttrSet::new().with("width", 0.0),
            true,
        );

        timeline.step(t0 + Duration::from_millis(50), &mut pool, &mut surface);
        assert!(pool.contains(&exit_key));
        assert!(surface.live_ids().contains(&exit_id));

        timeline.step(t0 + Duration::from_millis(100), &mut pool, &mut surface);
        assert!(!pool.contains(&exit_key));
        assert!(!surface.live_ids().contains(&exit_id));
        assert_eq!(pool.live_keys(), keep);
    }

    #[test]
    fn revived_exit_resumes_from_current_value() {
        let (mut pool, mut surface) = setup(&["a"]);
        let mut timeline = Timeline::new().with_duration(Duration::from_millis(100));
        let key = ElementKey::category("a");
        let t0 = Instant::now();

        // grow to full size instantly for a known starting point
        timeline.schedule(t0, &pool, key.clone(), AttrSet::new().with("width", 10.0), false);
        timeline.step(t0 + Duration::from_millis(100), &mut pool, &mut surface);

        // begin exiting
        pool.reconcile(&[], ElementKind::Rect, &mut surface, |_| AttrSet::new());
        let t1 = t0 + Duration::from_millis(200);
        timeline.schedule(t1, &pool, key.clone(), AttrSet::new().with("width", 0.0), true);

        // halfway out, the key re-enters: revive and grow back
        let t2 = t1 + Duration::from_millis(50);
        pool.reconcile(
            &[key.clone()],
            ElementKind::Rect,
            &mut surface,
            |_| AttrSet::new(),
        );
        timeline.schedule(t2, &pool, key.clone(), AttrSet::new().with("width", 10.0), false);

        // no jump: the new transition starts at the interpolated width 5
        timeline.step(t2, &mut pool, &mut surface);
        let width = pool.get(&key).unwrap().attrs.scalar("width").unwrap();
        assert_approx_eq!(f32, width, 5.0);

        // superseding cleared the removal: the element survives completion
        timeline.step(t2 + Duration::from_millis(100), &mut pool, &mut surface);
        assert!(pool.contains(&key));
        assert_eq!(pool.get(&key).unwrap().phase, Phase::Live);
        assert_approx_eq!(
            f32,
            pool.get(&key).unwrap().attrs.scalar("width").unwrap(),
            10.0
        );
    }

    #[test]
    fn supersede_covers_attrs_the_old_target_omitted() {
        let (mut pool, mut surface) = setup(&["a"]);
        let mut timeline = Timeline::new().with_duration(Duration::from_millis(100));
        let key = ElementKey::category("a");
        let t0 = Instant::now();

        // settle at a known position
        timeline.schedule(t0, &pool, key.clone(), AttrSet::new().with("y", 210.0), false);
        timeline.step(t0 + Duration::from_millis(100), &mut pool, &mut surface);

        // an exit tween with an empty target animates nothing by itself
        let t1 = t0 + Duration::from_millis(200);
        timeline.schedule(t1, &pool, key.clone(), AttrSet::new(), true);

        // superseded mid-exit toward a new position: the start point must
        // still carry the current y, so there is no snap to the target
        let t2 = t1 + Duration::from_millis(50);
        timeline.schedule(t2, &pool, key.clone(), AttrSet::new().with("y", 350.0), false);

        timeline.step(t2, &mut pool, &mut surface);
        let y = pool.get(&key).unwrap().attrs.scalar("y").unwrap();
        assert_approx_eq!(f32, y, 210.0);

        timeline.step(t2 + Duration::from_millis(50), &mut pool, &mut surface);
        let y = pool.get(&key).unwrap().attrs.scalar("y").unwrap();
        assert_approx_eq!(f32, y, 280.0);
    }

    #[test]
    fn zero_duration_completes_in_one_step() {
        let (mut pool, mut surface) = setup(&["a"]);
        let mut timeline = Timeline::new().with_duration(Duration::ZERO);
        let key = ElementKey::category("a");
        let t0 = Instant::now();

        timeline.schedule(t0, &pool, key.clone(), AttrSet::new().with("width", 7.0), false);
        let remaining = timeline.step(t0, &mut pool, &mut surface);
        assert_eq!(remaining, 0);
        assert_eq!(pool.get(&key).unwrap().attrs.scalar("width"), Some(7.0));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let (pool, _surface) = setup(&["a"]);
        let mut timeline = Timeline::new();
        timeline.schedule(
            Instant::now(),
            &pool,
            ElementKey::category("ghost"),
            AttrSet::new().with("width", 1.0),
            false,
        );
        assert!(timeline.is_idle());
    }
}
