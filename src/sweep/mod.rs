//! The sweep-line implementation.
//!
//! The main entry point is [`Sweeper`], which finds all the intersection
//! points between a collection of line segments, one event at a time. If you
//! just want all the intersections at once, see [`sweep`] or
//! [`crate::find_intersections`].

mod event;
mod segment_order;
mod sweep_line;

pub use event::{Event, EventKind, EventQueue};
pub use segment_order::SegmentOrder;
pub use sweep_line::{sweep, Intersection, SweepReport, Sweeper};
