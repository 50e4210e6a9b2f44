use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use facet_common::types::{ArcAttr, Rgba};

/// One settable attribute of a visual element.
///
/// Scalar, color and arc attributes interpolate during transitions; text
/// and flag attributes are discrete and snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AttrValue {
    Scalar(f32),
    Color(Rgba),
    Arc(ArcAttr),
    Text(String),
    Flag(bool),
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Scalar(value)
    }
}

impl From<Rgba> for AttrValue {
    fn from(value: Rgba) -> Self {
        AttrValue::Color(value)
    }
}

impl From<ArcAttr> for AttrValue {
    fn from(value: ArcAttr) -> Self {
        AttrValue::Arc(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

/// A named set of attributes, ordered by first insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrSet {
    values: IndexMap<String, AttrValue>,
}

impl AttrSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<f32> {
        match self.values.get(name) {
            Some(AttrValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn color(&self, name: &str) -> Option<Rgba> {
        match self.values.get(name) {
            Some(AttrValue::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn arc(&self, name: &str) -> Option<ArcAttr> {
        match self.values.get(name) {
            Some(AttrValue::Arc(a)) => Some(*a),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(AttrValue::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(AttrValue::Flag(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrites this set's entries with those of `other`, inserting any
    /// names not yet present.
    pub fn merge(&mut self, other: &AttrSet) {
        for (name, value) in other.iter() {
            self.values.insert(name.to_string(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
