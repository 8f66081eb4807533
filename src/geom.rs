//! Geometric primitives, like points and lines.

use std::cmp::Ordering;

use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;

use crate::num::{to_f64, Coord};
use crate::Error;

/// A two-dimensional point with exact coordinates.
///
/// Points are sorted in the order that our sweep-line visits them: by
/// decreasing `y`, and then by increasing `x`. In other words, the sweep
/// moves from the top of the plane to the bottom, and from left to right
/// along each horizontal line.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: Rational,
    /// Vertical coordinate. Larger values are "up", and get visited first.
    pub y: Rational,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        other.y.cmp(&self.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl serde::Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&(self.x.to_string(), self.y.to_string()), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(String, String)>::deserialize(deserializer)?;
        let parse = |s: &str| {
            s.trim()
                .parse::<Rational>()
                .map_err(|_| serde::de::Error::custom(format!("invalid rational {s:?}")))
        };
        Ok(Point::new(parse(&x)?, parse(&y)?))
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: Rational, y: Rational) -> Self {
        Point { x, y }
    }

    /// Create a new point from any exactly-convertible coordinates.
    pub fn from_coords<C: Coord>(x: C, y: C) -> Result<Self, Error> {
        Ok(Point {
            x: x.to_exact()?,
            y: y.to_exact()?,
        })
    }

    /// The closest floating-point approximation to this point.
    pub fn to_kurbo(&self) -> kurbo::Point {
        kurbo::Point::new(to_f64(&self.x), to_f64(&self.y))
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x.into(), y.into())
    }
}

/// The reasons a segment can be rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidSegment {
    /// Both endpoints have the same `y` coordinate.
    Horizontal,
    /// Both endpoints have the same `x` coordinate.
    Vertical,
}

/// Two segments are exactly parallel (or collinear), so the intersection
/// test's determinant vanishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parallel;

/// A line segment, in sweep-line order.
///
/// `start` is the endpoint that the sweep-line reaches first (the upper one),
/// and `end` is the one it reaches last. Horizontal and vertical segments
/// are not representable.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    pub(crate) start: Point,
    pub(crate) end: Point,
    slope: Rational,
    intercept: Rational,
    inv_slope: Rational,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?}", self.start, self.end)
    }
}

impl Segment {
    /// Create a new segment between two points, in either order.
    pub fn new(p: Point, q: Point) -> Result<Self, InvalidSegment> {
        if p.y == q.y {
            return Err(InvalidSegment::Horizontal);
        }
        if p.x == q.x {
            return Err(InvalidSegment::Vertical);
        }
        let (start, end) = if p < q { (p, q) } else { (q, p) };

        let dx = &end.x - &start.x;
        let dy = &end.y - &start.y;
        let slope = &dy / &dx;
        let intercept = &end.y - &slope * &end.x;
        let inv_slope = dx / dy;
        Ok(Segment {
            start,
            end,
            slope,
            intercept,
            inv_slope,
        })
    }

    /// The upper endpoint, where the sweep-line starts touching this segment.
    pub fn start(&self) -> &Point {
        &self.start
    }

    /// The lower endpoint, where the sweep-line stops touching this segment.
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// The slope `dy / dx`. Never zero, and always defined.
    pub fn slope(&self) -> &Rational {
        &self.slope
    }

    /// The `y` coordinate at which this segment's line crosses `x = 0`.
    pub fn intercept(&self) -> &Rational {
        &self.intercept
    }

    /// Our `x` coordinate at the given height.
    ///
    /// This is evaluated on the segment's supporting line, so it is defined
    /// even outside the segment's vertical range.
    pub fn current_x(&self, y: &Rational) -> Rational {
        (y - &self.intercept) / &self.slope
    }

    /// Compares the horizontal positions of two segments at height `y`.
    ///
    /// If they are at the same position, we compare their positions just
    /// below `y`, which is where the sweep-line is heading.
    pub fn cmp_at(&self, other: &Segment, y: &Rational) -> Ordering {
        self.current_x(y)
            .cmp(&other.current_x(y))
            // Going down by `d` moves us horizontally by `-d * inv_slope`.
            .then_with(|| other.inv_slope.cmp(&self.inv_slope))
    }

    /// Does the closed vertical range of this segment contain `y`?
    pub fn spans(&self, y: &Rational) -> bool {
        &self.end.y <= y && y <= &self.start.y
    }

    /// Computes the intersection point of two segments, if there is one.
    ///
    /// Endpoints count: two segments that touch at an endpoint intersect
    /// there. Parallel segments are an error, whether or not they share a
    /// line: the determinant is zero and there's no unique solution.
    pub fn intersection(&self, other: &Segment) -> Result<Option<Point>, Parallel> {
        let (x1, y1) = (&self.start.x, &self.start.y);
        let (x, y) = (&other.start.x, &other.start.y);

        let dx1 = &self.end.x - x1;
        let dy1 = &self.end.y - y1;
        let dx = &other.end.x - x;
        let dy = &other.end.y - y;
        let wx = x - x1;
        let wy = y - y1;

        let det = &dx * &dy1 - &dx1 * &dy;
        if det == Rational::ZERO {
            return Err(Parallel);
        }

        let r = (&dx * &wy - &dy * &wx) / &det;
        let s = (&dx1 * &wy - &dy1 * &wx) / &det;
        let unit = |t: &Rational| &Rational::ZERO <= t && t <= &Rational::ONE;
        if !unit(&r) || !unit(&s) {
            return Ok(None);
        }

        Ok(Some(Point::new(x1 + &r * dx1, y1 + r * dy1)))
    }

    /// The closest floating-point approximation to this segment.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.start.to_kurbo(), self.end.to_kurbo())
    }
}
