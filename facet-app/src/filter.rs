use std::sync::Arc;

use indexmap::IndexMap;

/// One filterable attribute of the record type: a name and the categorical
/// accessor the filter predicate compares against.
#[derive(Clone)]
pub struct Dimension<R> {
    name: String,
    accessor: Arc<dyn Fn(&R) -> String>,
}

impl<R> Dimension<R> {
    pub fn new(name: impl Into<String>, accessor: impl Fn(&R) -> String + 'static) -> Self {
        Self {
            name: name.into(),
            accessor: Arc::new(accessor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, record: &R) -> String {
        (self.accessor)(record)
    }
}

impl<R> std::fmt::Debug for Dimension<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dimension").field("name", &self.name).finish()
    }
}

/// The shared record of active cross-filter selections. One instance per
/// controller, living for the whole session; a record passes iff it matches
/// every active selection (no selections = everything passes).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    selections: IndexMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle semantics: selecting the value already active on a dimension
    /// clears that dimension. Returns whether the dimension is active
    /// afterwards.
    pub fn toggle(&mut self, dimension: &str, value: &str) -> bool {
        if self.selected(dimension) == Some(value) {
            self.selections.shift_remove(dimension);
            false
        } else {
            self.selections
                .insert(dimension.to_string(), value.to_string());
            true
        }
    }

    /// Sets or clears a dimension outright (select-control semantics).
    pub fn set(&mut self, dimension: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.selections.insert(dimension.to_string(), value);
            }
            None => {
                self.selections.shift_remove(dimension);
            }
        }
    }

    pub fn selected(&self, dimension: &str) -> Option<&str> {
        self.selections.get(dimension).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.selections
            .iter()
            .map(|(d, v)| (d.as_str(), v.as_str()))
    }

    /// Readout text for auxiliary "currently selected" displays.
    pub fn selection_label(&self, dimension: &str) -> String {
        self.selected(dimension).unwrap_or("None").to_string()
    }

    /// Conjunction of all active predicates.
    pub fn passes<R>(&self, record: &R, dimensions: &IndexMap<String, Dimension<R>>) -> bool {
        self.selections.iter().all(|(name, selected)| {
            match dimensions.get(name) {
                Some(dimension) => &dimension.value(record) == selected,
                // selection on an unregistered dimension excludes nothing
                None => true,
            }
        })
    }
}
