use std::cmp::Ordering;

use malachite::Rational;

use crate::{SegIdx, Segments};

/// The segments that currently intersect the sweep-line, ordered from left to right.
///
/// The sweep-line's height isn't stored here: every method that needs to
/// compare positions takes it as an argument. The order is only meaningful
/// at the height of the most recent event. In particular, when two
/// segments cross, they must be explicitly [swapped](SegmentOrder::swap),
/// because no single height gives a consistent order on both sides of the
/// crossing.
#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(transparent)]
pub struct SegmentOrder {
    segs: Vec<SegIdx>,
}

impl SegmentOrder {
    /// The number of segments on the sweep-line.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Is the sweep-line empty?
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// The segment at position `idx`, counting from the left.
    pub fn get(&self, idx: usize) -> Option<SegIdx> {
        self.segs.get(idx).copied()
    }

    /// Iterates over the segments, from left to right.
    pub fn iter(&self) -> impl Iterator<Item = SegIdx> + '_ {
        self.segs.iter().copied()
    }

    /// The segments immediately to the left and right of position `idx`.
    pub fn neighbors(&self, idx: usize) -> (Option<SegIdx>, Option<SegIdx>) {
        let left = idx.checked_sub(1).and_then(|i| self.get(i));
        (left, self.get(idx + 1))
    }

    /// Finds an index into this sweep line where it's ok to insert `seg`.
    ///
    /// Everything before the returned index is to the left of `seg` at
    /// height `y` (or just below `y`, for segments touching `seg` there).
    pub fn insertion_idx(&self, seg: SegIdx, y: &Rational, segments: &Segments) -> usize {
        let new_seg = &segments[seg];
        self.segs
            .partition_point(|&other| segments[other].cmp_at(new_seg, y) == Ordering::Less)
    }

    /// Inserts `seg` in order at height `y`, returning its new position.
    pub fn insert(&mut self, seg: SegIdx, y: &Rational, segments: &Segments) -> usize {
        let idx = self.insertion_idx(seg, y, segments);
        self.segs.insert(idx, seg);
        idx
    }

    /// Finds the position of `seg` on the sweep-line.
    ///
    /// The positions are found by binary search on the horizontal position
    /// at height `y`, which is valid as long as every crossing above `y` has
    /// already been processed. If that goes wrong (which can happen for
    /// inputs that aren't in general position), we fall back to a linear
    /// search.
    pub fn position(&self, seg: SegIdx, y: &Rational, segments: &Segments) -> Option<usize> {
        if self.segs.len() <= 32 {
            return self.segs.iter().position(|&s| s == seg);
        }

        let x = segments[seg].current_x(y);
        // `start_idx` points to the first segment that isn't strictly to our
        // left. Everything in the run of segments at the same position is a
        // candidate.
        let start_idx = self
            .segs
            .partition_point(|&other| segments[other].current_x(y) < x);

        self.segs[start_idx..]
            .iter()
            .take_while(|&&other| segments[other].current_x(y) == x)
            .position(|&s| s == seg)
            .map(|i| i + start_idx)
            .or_else(|| self.segs.iter().position(|&s| s == seg))
    }

    /// Removes `seg` from the sweep-line, returning the position it used to have.
    pub fn remove(&mut self, seg: SegIdx, y: &Rational, segments: &Segments) -> Option<usize> {
        let idx = self.position(seg, y, segments)?;
        self.segs.remove(idx);
        Some(idx)
    }

    /// Exchanges the segments at positions `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.segs.swap(i, j);
    }

    /// Checks that the segments are in order at height `y`.
    ///
    /// Returns the first pair of neighbors where the left one is strictly to
    /// the right of the other one at `y`, or `None` if there isn't one.
    pub fn find_invalid_order(
        &self,
        y: &Rational,
        segments: &Segments,
    ) -> Option<(SegIdx, SegIdx)> {
        self.segs.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            (segments[a].current_x(y) > segments[b].current_x(y)).then_some((a, b))
        })
    }
}
