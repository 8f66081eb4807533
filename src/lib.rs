#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
mod geom;
mod num;
pub mod order;
mod segments;
pub mod sweep;

#[cfg(any(test, feature = "generators"))]
pub mod generators;

pub use geom::{InvalidSegment, Parallel, Point, Segment};
pub use num::Coord;
pub use segments::{PairIntersection, SegIdx, Segments};
pub use sweep::{sweep, Intersection, SweepReport, Sweeper};

#[derive(Clone, Copy, Debug, PartialEq)]
/// The input segments were faulty.
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
    /// One of the inputs was horizontal or vertical.
    InvalidSegment(InvalidSegment),
    /// Two of the inputs were exactly parallel, so their intersection can't be computed.
    DegenerateIntersection(SegIdx, SegIdx),
}

impl From<InvalidSegment> for Error {
    fn from(err: InvalidSegment) -> Self {
        Error::InvalidSegment(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Infinity => write!(f, "one of the inputs was infinite"),
            Error::NaN => write!(f, "one of the inputs had a NaN"),
            Error::InvalidSegment(InvalidSegment::Horizontal) => {
                write!(f, "one of the inputs was a horizontal segment")
            }
            Error::InvalidSegment(InvalidSegment::Vertical) => {
                write!(f, "one of the inputs was a vertical segment")
            }
            Error::DegenerateIntersection(a, b) => {
                write!(f, "segments {a:?} and {b:?} are parallel")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Finds all the intersections between a collection of line segments.
///
/// Each segment is given as `[x1, y1, x2, y2]`. The segments must not be
/// horizontal or vertical, and they should be in general position (see
/// [`Sweeper`]).
pub fn find_intersections<C: Coord>(
    coords: impl IntoIterator<Item = [C; 4]>,
) -> Result<SweepReport, Error> {
    let segments = Segments::from_coords(coords)?;
    Sweeper::new(&segments).run()
}
