//! Segment intersection tests, with caching.

use std::collections::HashMap;

use crate::{geom::Point, Error, SegIdx, Segments};

/// A cache for intersection tests, so that each pair of segments needs to be tested at most once.
///
/// During a sweep, the same two segments can become neighbors several times
/// (every time something between them leaves the sweep-line, for example).
/// Exact intersection tests aren't free, so we remember the answers.
#[derive(Clone, Debug, Default)]
pub struct ComparisonCache {
    inner: HashMap<(SegIdx, SegIdx), Option<Point>>,
}

impl ComparisonCache {
    /// Creates a new, empty, comparison cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the intersection point between two segments, if there is one.
    ///
    /// Fails if the two segments are parallel.
    pub fn intersection(
        &mut self,
        segments: &Segments,
        i: SegIdx,
        j: SegIdx,
    ) -> Result<Option<Point>, Error> {
        let key = (i.min(j), i.max(j));
        if let Some(p) = self.inner.get(&key) {
            return Ok(p.clone());
        }

        let p = segments[key.0]
            .intersection(&segments[key.1])
            .map_err(|_| Error::DegenerateIntersection(key.0, key.1))?;
        self.inner.insert(key, p.clone());
        Ok(p)
    }

    /// The number of pairs that have been tested so far.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Have we tested any pairs?
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
