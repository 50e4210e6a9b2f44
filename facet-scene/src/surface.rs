use indexmap::IndexMap;

use crate::attr::AttrSet;
use crate::element::{ElementId, ElementKind};

/// The drawing backend seam: persistent drawable nodes addressable by id
/// with settable attributes. Everything past this trait (rasterization,
/// layout, styling) is out of scope.
pub trait Surface {
    /// Creates a drawable node and returns its id. Ids are unique across
    /// all pools sharing the surface.
    fn create(&mut self, kind: ElementKind) -> ElementId;

    /// Applies attribute values to an existing node.
    fn set_attrs(&mut self, id: ElementId, attrs: &AttrSet);

    /// Destroys a node. Called only after an exit transition completes.
    fn remove(&mut self, id: ElementId);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Create { id: ElementId, kind: ElementKind },
    SetAttrs { id: ElementId, attrs: AttrSet },
    Remove { id: ElementId },
}

/// A surface that records every operation and mirrors the resulting screen
/// state. Used by tests and the demo in place of a real renderer.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_id: u64,
    ops: Vec<SurfaceOp>,
    live: IndexMap<ElementId, (ElementKind, AttrSet)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Ids of the nodes currently on screen.
    pub fn live_ids(&self) -> Vec<ElementId> {
        self.live.keys().copied().collect()
    }

    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.live.get(&id).map(|(kind, _)| *kind)
    }

    /// The current attribute state of one on-screen node.
    pub fn attrs(&self, id: ElementId) -> Option<&AttrSet> {
        self.live.get(&id).map(|(_, attrs)| attrs)
    }
}

impl Surface for RecordingSurface {
    fn create(&mut self, kind: ElementKind) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.live.insert(id, (kind, AttrSet::new()));
        self.ops.push(SurfaceOp::Create { id, kind });
        id
    }

    fn set_attrs(&mut self, id: ElementId, attrs: &AttrSet) {
        if let Some((_, current)) = self.live.get_mut(&id) {
            current.merge(attrs);
        }
        self.ops.push(SurfaceOp::SetAttrs {
            id,
            attrs: attrs.clone(),
        });
    }

    fn remove(&mut self, id: ElementId) {
        self.live.shift_remove(&id);
        self.ops.push(SurfaceOp::Remove { id });
    }
}
