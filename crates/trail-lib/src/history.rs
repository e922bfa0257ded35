//! The ordered trail of known positions

use crate::Coordinate;
use std::sync::Arc;

/// Chronological list of coordinates, oldest first
///
/// The history is never edited in place: a successful poll swaps in a whole new
/// list, so a reader holding a clone always sees one complete response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    points: Arc<[Coordinate]>,
}

impl History {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Replace the whole trail with a new server response
    pub fn replace(&mut self, points: Vec<Coordinate>) {
        self.points = points.into();
    }

    /// Most recent position
    #[inline]
    pub fn latest(&self) -> Option<&Coordinate> {
        self.points.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Coordinate> {
        self.points.iter()
    }
}

impl From<Vec<Coordinate>> for History {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn test_empty_history() {
        let history = History::default();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut history = History::new(vec![c(1.0, 1.0), c(2.0, 2.0), c(3.0, 3.0)]);
        history.replace(vec![c(9.0, 9.0)]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(&c(9.0, 9.0)));
    }

    #[test]
    fn test_clone_is_a_snapshot() {
        let mut history = History::new(vec![c(1.0, 1.0)]);
        let snapshot = history.clone();
        history.replace(vec![c(2.0, 2.0), c(3.0, 3.0)]);
        assert_eq!(snapshot.as_slice(), &[c(1.0, 1.0)]);
        assert_eq!(history.len(), 2);
    }
}
