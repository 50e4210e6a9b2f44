/// A discrete user interaction, carried as an explicit payload rather than
/// handler-bound context: the controller maps each variant to exactly one
/// FilterState mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// A chart element bound to `key` was clicked. Toggle semantics:
    /// clicking the already-selected key clears the dimension.
    SliceClicked { dimension: String, key: String },

    /// A control (select, checkbox) changed value. An empty value clears
    /// the dimension's filter.
    ControlChanged { dimension: String, value: String },
}

impl InteractionEvent {
    pub fn slice_clicked(dimension: impl Into<String>, key: impl Into<String>) -> Self {
        InteractionEvent::SliceClicked {
            dimension: dimension.into(),
            key: key.into(),
        }
    }

    pub fn control_changed(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        InteractionEvent::ControlChanged {
            dimension: dimension.into(),
            value: value.into(),
        }
    }

    pub fn dimension(&self) -> &str {
        match self {
            InteractionEvent::SliceClicked { dimension, .. } => dimension,
            InteractionEvent::ControlChanged { dimension, .. } => dimension,
        }
    }
}
