use crate::error::{Error, Result};
use std::ops::Deref;
use std::vec::IntoIter;

/// Per-member results of a read accessor, in member order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Values<T>(Vec<T>);

/// The null / scalar / list view of a `Values`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collapsed<T> {
    Null,
    One(T),
    Many(Vec<T>),
}

impl<T> Values<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Values(values)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    /// Returns the only value, failing unless the collection had exactly one member.
    pub fn single(self) -> Result<T> {
        let len = self.0.len();
        if len != 1 {
            return Err(Error::SizeMismatch(len));
        }

        self.0.into_iter().next().ok_or(Error::SizeMismatch(0))
    }

    /// Collapses to nothing, one value or the whole list depending on the member count.
    pub fn collapse(self) -> Collapsed<T> {
        let mut values = self.0;
        match values.len() {
            0 => Collapsed::Null,
            1 => values.pop().map_or(Collapsed::Null, Collapsed::One),
            _ => Collapsed::Many(values),
        }
    }
}

impl<T> Deref for Values<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> IntoIterator for Values<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T> Collapsed<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Collapsed::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(Values::<u8>::new(vec![]).collapse(), Collapsed::Null);
        assert_eq!(Values::new(vec![1]).collapse(), Collapsed::One(1));
        assert_eq!(Values::new(vec![1, 2]).collapse(), Collapsed::Many(vec![1, 2]));
    }

    #[test]
    fn test_single() {
        assert_eq!(Values::new(vec!["a"]).single().unwrap(), "a");
        assert!(matches!(
            Values::new(vec!["a", "b"]).single(),
            Err(Error::SizeMismatch(2))
        ));
        assert!(matches!(
            Values::<&str>::new(vec![]).single(),
            Err(Error::SizeMismatch(0))
        ));
    }
}
