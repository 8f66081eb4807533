//! A thin abstraction over the different numerical types we accept as input.
//!
//! Internally, every coordinate is an exact [`Rational`]. The sweep compares
//! intersection points against endpoints and against each other, and any
//! rounding there would produce spurious (or missing) intersections.

use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::Rational;
use ordered_float::{NotNan, OrderedFloat};

use crate::Error;

/// A trait for numbers that can be converted exactly into a [`Rational`].
///
/// Integers always convert. Floats convert exactly too (every finite `f64`
/// is a dyadic rational), but infinities and NaNs are rejected.
pub trait Coord {
    /// Convert this number to a rational, for exact computation.
    fn to_exact(&self) -> Result<Rational, Error>;
}

impl Coord for Rational {
    fn to_exact(&self) -> Result<Rational, Error> {
        Ok(self.clone())
    }
}

impl Coord for i64 {
    fn to_exact(&self) -> Result<Rational, Error> {
        Ok(Rational::from(*self))
    }
}

impl Coord for i32 {
    fn to_exact(&self) -> Result<Rational, Error> {
        Ok(Rational::from(i64::from(*self)))
    }
}

impl Coord for u32 {
    fn to_exact(&self) -> Result<Rational, Error> {
        Ok(Rational::from(i64::from(*self)))
    }
}

impl Coord for f64 {
    fn to_exact(&self) -> Result<Rational, Error> {
        if self.is_nan() {
            return Err(Error::NaN);
        }
        if self.is_infinite() {
            return Err(Error::Infinity);
        }
        Rational::try_from(*self).map_err(|_| Error::NaN)
    }
}

impl Coord for f32 {
    fn to_exact(&self) -> Result<Rational, Error> {
        f64::from(*self).to_exact()
    }
}

impl Coord for NotNan<f64> {
    fn to_exact(&self) -> Result<Rational, Error> {
        self.into_inner().to_exact()
    }
}

impl Coord for OrderedFloat<f64> {
    fn to_exact(&self) -> Result<Rational, Error> {
        self.into_inner().to_exact()
    }
}

impl<C: Coord> Coord for &C {
    fn to_exact(&self) -> Result<Rational, Error> {
        (*self).to_exact()
    }
}

/// Rounds a rational to the nearest `f64`.
pub(crate) fn to_f64(x: &Rational) -> f64 {
    f64::rounding_from(x, RoundingMode::Nearest).0
}
