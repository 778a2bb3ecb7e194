// Normalization for relationships that are one-to-one in the domain but may
// come back from the database as zero, one or many rows.

use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Related<T> {
    None,
    One(T),
    Many(Vec<T>),
}

impl<T> Related<T> {
    /// Collapse to a single nullable value. When several rows matched, the
    /// first one wins.
    pub fn into_single(self) -> Option<T> {
        match self {
            Related::None => None,
            Related::One(value) => Some(value),
            Related::Many(values) => {
                debug!("Collapsing {} related rows to the first one", values.len());
                values.into_iter().next()
            }
        }
    }
}

impl<T> From<Option<T>> for Related<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Related::One(value),
            None => Related::None,
        }
    }
}

impl<T> From<Vec<T>> for Related<T> {
    fn from(mut values: Vec<T>) -> Self {
        match values.len() {
            0 => Related::None,
            1 => Related::One(values.remove(0)),
            _ => Related::Many(values),
        }
    }
}
