use serde::{Deserialize, Serialize};

/// A value that is either a single scalar applied to every element of a
/// series, or one value per element.
///
/// Scales return this so a constant output (degenerate domain, single fill
/// color) does not allocate a full vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ScalarOrArray<T: Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Clone> ScalarOrArray<T> {
    pub fn as_iter<'a>(&'a self, scalar_len: usize) -> Box<dyn Iterator<Item = &T> + 'a> {
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat(value).take(scalar_len)),
            ScalarOrArray::Array(values) => Box::new(values.iter()),
        }
    }

    pub fn as_vec(&self, scalar_len: usize) -> Vec<T> {
        self.as_iter(scalar_len).cloned().collect()
    }

    pub fn map<U: Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl<T: Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}
