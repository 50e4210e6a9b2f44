use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use crate::attr::AttrSet;
use crate::element::{ElementKey, ElementKind, Phase, VisualElement};
use crate::surface::Surface;

/// Result of one keyed reconciliation.
///
/// `ordered` is the enter ∪ update traversal in new-series order, so
/// attribute-setting follows the current domain order. Exiting elements keep
/// their prior slot in the pool until their exit transition completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Join {
    pub enter: Vec<ElementKey>,
    pub update: Vec<ElementKey>,
    pub exit: Vec<ElementKey>,
    pub ordered: Vec<ElementKey>,
}

/// The pool of visual elements bound to one series, indexed by stable key.
///
/// The same key always resolves to the same element across updates; an
/// element is never destroyed and recreated while its key stays in the
/// series. This is the identity invariant the keyed diff exists to uphold.
#[derive(Debug, Default)]
pub struct ElementPool {
    elements: IndexMap<ElementKey, VisualElement>,
}

impl ElementPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffs the new key sequence against the bound pool.
    ///
    /// Enter keys get a fresh surface node initialized from `enter_attrs`
    /// (a collapsed start state, so the following transition grows the
    /// element instead of popping it in). Update keys keep their element
    /// untouched. Keys that disappeared flip to `Exiting` but stay pooled;
    /// call [`remove_completed`](Self::remove_completed) when their exit
    /// transition finishes.
    ///
    /// An exiting element whose key reappears is revived in place and
    /// classified as an update.
    ///
    /// Duplicate keys in `new_keys` are an upstream precondition violation
    /// (the bin/pie engines guarantee key-unique partitions).
    pub fn reconcile(
        &mut self,
        new_keys: &[ElementKey],
        kind: ElementKind,
        surface: &mut dyn Surface,
        mut enter_attrs: impl FnMut(&ElementKey) -> AttrSet,
    ) -> Join {
        debug_assert!(
            new_keys.iter().collect::<HashSet<_>>().len() == new_keys.len(),
            "series keys must be unique"
        );

        let new_set: HashSet<&ElementKey> = new_keys.iter().collect();

        let mut join = Join {
            ordered: new_keys.to_vec(),
            ..Default::default()
        };

        // Old keys no longer present begin exiting; already-exiting
        // elements keep animating and are not reclassified.
        for (key, element) in self.elements.iter_mut() {
            if !new_set.contains(key) && element.phase != Phase::Exiting {
                element.phase = Phase::Exiting;
                join.exit.push(key.clone());
            }
        }

        for key in new_keys {
            match self.elements.get_mut(key) {
                Some(element) => {
                    if element.phase == Phase::Exiting {
                        // Revived mid-exit: same element, same node
                        element.phase = Phase::Live;
                    }
                    join.update.push(key.clone());
                }
                None => {
                    let id = surface.create(kind);
                    let attrs = enter_attrs(key);
                    surface.set_attrs(id, &attrs);
                    self.elements.insert(
                        key.clone(),
                        VisualElement {
                            id,
                            kind,
                            phase: Phase::Entering,
                            attrs,
                        },
                    );
                    join.enter.push(key.clone());
                }
            }
        }

        debug!(
            "reconcile: {} enter, {} update, {} exit",
            join.enter.len(),
            join.update.len(),
            join.exit.len()
        );

        join
    }

    pub fn get(&self, key: &ElementKey) -> Option<&VisualElement> {
        self.elements.get(key)
    }

    pub fn get_mut(&mut self, key: &ElementKey) -> Option<&mut VisualElement> {
        self.elements.get_mut(key)
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.elements.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.elements.keys()
    }

    /// Keys of elements not currently exiting. After exit transitions
    /// drain, this equals the latest series' key set exactly.
    pub fn live_keys(&self) -> Vec<ElementKey> {
        self.elements
            .iter()
            .filter(|(_, e)| e.phase != Phase::Exiting)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Marks an element's enter transition finished.
    pub fn mark_live(&mut self, key: &ElementKey) {
        if let Some(element) = self.elements.get_mut(key) {
            if element.phase == Phase::Entering {
                element.phase = Phase::Live;
            }
        }
    }

    /// Writes attributes to both the pool's copy and the surface, outside
    /// any transition. Used for discrete attributes like titles.
    pub fn apply(&mut self, key: &ElementKey, attrs: &AttrSet, surface: &mut dyn Surface) {
        if let Some(element) = self.elements.get_mut(key) {
            element.attrs.merge(attrs);
            surface.set_attrs(element.id, attrs);
        }
    }

    /// Drops an exited element from the pool and the surface. The only
    /// removal path; callers invoke it when the exit transition completes.
    pub fn remove_completed(&mut self, key: &ElementKey, surface: &mut dyn Surface) {
        if let Some(element) = self.elements.get(key) {
            debug_assert_eq!(element.phase, Phase::Exiting, "only exiting elements drop");
            surface.remove(element.id);
            self.elements.shift_remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
