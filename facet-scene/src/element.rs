use std::fmt;

use ordered_float::OrderedFloat;

use crate::attr::AttrSet;

/// Handle for one drawable node on the surface. Allocated by the surface at
/// create time and stable for the node's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The drawable node types a surface must support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Rect,
    Arc,
    Rule,
    Text,
}

/// Where an element is in its lifecycle. Exiting elements remain in the
/// pool (and on screen) until their exit transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Live,
    Exiting,
}

/// Stable identity of a series item across updates.
///
/// Bin lower bounds and axis tick values are both f32 keys; the separate
/// variants keep them from colliding when one pool ever holds both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Category(String),
    Lower(OrderedFloat<f32>),
    Tick(OrderedFloat<f32>),
}

impl ElementKey {
    pub fn category(value: impl Into<String>) -> Self {
        ElementKey::Category(value.into())
    }

    pub fn lower(value: f32) -> Self {
        ElementKey::Lower(OrderedFloat(value))
    }

    pub fn tick(value: f32) -> Self {
        ElementKey::Tick(OrderedFloat(value))
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKey::Category(c) => write!(f, "{c}"),
            ElementKey::Lower(v) => write!(f, "[{v}"),
            ElementKey::Tick(v) => write!(f, "t{v}"),
        }
    }
}

/// A persistent on-screen object bound to exactly one series key.
#[derive(Debug, Clone)]
pub struct VisualElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub phase: Phase,
    pub attrs: AttrSet,
}
