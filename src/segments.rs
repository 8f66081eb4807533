use std::collections::HashSet;

use crate::{
    geom::{Point, Segment},
    num::Coord,
    Error,
};

/// An index into our segment arena.
///
/// Throughout this library, we assign identities to segments, so that we may
/// consider segments as different even if they have the same start- and end-points.
///
/// This index is used to identify a segment, whose data can be retrieved by looking
/// it up in [`Segments`]. (Of course, this index-as-identifier breaks down if there are
/// multiple `Segments` in flight. Just be careful not to mix them up.)
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

/// An intersection between two segments, found by brute force.
pub type PairIntersection = (SegIdx, SegIdx, Point);

/// An arena of line segments.
///
/// Segments are indexed by [`SegIdx`] and can be retrieved by indexing (i.e. with square brackets).
#[derive(Debug, Clone, Default)]
pub struct Segments {
    segs: Vec<Segment>,
}

impl Segments {
    /// The number of line segments in this arena.
    pub fn len(&self) -> usize {
        self.segs.len()
    }

    /// Is this arena empty?
    pub fn is_empty(&self) -> bool {
        self.segs.is_empty()
    }

    /// Iterate over all indices that can be used to index into this arena.
    pub fn indices(&self) -> impl Iterator<Item = SegIdx> {
        (0..self.segs.len()).map(SegIdx)
    }

    /// Iterate over all segments in this arena.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segs.iter()
    }

    /// Add a segment between two points to this arena.
    ///
    /// Fails if the segment is horizontal or vertical. The endpoints can be
    /// given in either order: they get stored in sweep-line order.
    pub fn add_points(&mut self, p: Point, q: Point) -> Result<SegIdx, Error> {
        self.segs.push(Segment::new(p, q)?);
        Ok(SegIdx(self.segs.len() - 1))
    }

    /// Add the segment from `(x1, y1)` to `(x2, y2)` to this arena.
    pub fn add<C: Coord>(&mut self, x1: C, y1: C, x2: C, y2: C) -> Result<SegIdx, Error> {
        self.add_points(Point::from_coords(x1, y1)?, Point::from_coords(x2, y2)?)
    }

    /// Construct a segment arena from `[x1, y1, x2, y2]` coordinate arrays.
    ///
    /// Segment indices follow the iteration order.
    pub fn from_coords<C: Coord>(coords: impl IntoIterator<Item = [C; 4]>) -> Result<Self, Error> {
        let mut ret = Self::default();
        for [x1, y1, x2, y2] in coords {
            ret.add(x1, y1, x2, y2)?;
        }
        Ok(ret)
    }

    /// A floating-point bounding box of all the segments, or `None` if there aren't any.
    pub fn bounding_box(&self) -> Option<kurbo::Rect> {
        self.segs
            .iter()
            .map(|s| kurbo::Rect::from_points(s.start().to_kurbo(), s.end().to_kurbo()))
            .reduce(|a, b| a.union(b))
    }

    /// Finds every intersecting pair by testing all of them.
    ///
    /// This takes quadratic time, so it's mainly useful as a reference for
    /// testing the sweep-line. Pairs are reported with the smaller index first.
    pub fn pairwise_intersections(&self) -> Result<Vec<PairIntersection>, Error> {
        let mut ret = Vec::new();
        for i in self.indices() {
            for j in self.indices().skip(i.0 + 1) {
                let p = self[i]
                    .intersection(&self[j])
                    .map_err(|_| Error::DegenerateIntersection(i, j))?;
                if let Some(p) = p {
                    ret.push((i, j, p));
                }
            }
        }
        Ok(ret)
    }

    /// Checks whether these segments are in general position.
    ///
    /// That means that no two segments are parallel, no two endpoints
    /// coincide, no intersection point is an endpoint, and no two pairs of
    /// segments intersect at the same point. (Horizontal and vertical segments
    /// were already rejected when they were added.)
    ///
    /// This takes quadratic time.
    pub fn is_in_general_position(&self) -> bool {
        let Ok(intersections) = self.pairwise_intersections() else {
            return false;
        };

        let mut endpoints = HashSet::new();
        for seg in &self.segs {
            for p in [seg.start(), seg.end()] {
                if !endpoints.insert(p.clone()) {
                    return false;
                }
            }
        }

        let mut seen = HashSet::new();
        intersections
            .into_iter()
            .all(|(_, _, p)| !endpoints.contains(&p) && seen.insert(p))
    }
}

impl std::ops::Index<SegIdx> for Segments {
    type Output = Segment;

    fn index(&self, index: SegIdx) -> &Self::Output {
        &self.segs[index.0]
    }
}
