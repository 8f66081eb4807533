use std::collections::BTreeSet;

use crate::{geom::Point, SegIdx, Segments};

/// What happens at an [`Event`].
///
/// The variant order matters: among events at the same point, segments
/// leave the sweep-line before new segments enter it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum EventKind {
    /// The sweep-line reaches the lower endpoint of a segment.
    End(SegIdx),
    /// The sweep-line reaches the upper endpoint of a segment.
    Start(SegIdx),
    /// Two segments that are adjacent on the sweep-line cross.
    Intersection {
        /// The segment that was on the left just above the intersection.
        left: SegIdx,
        /// The segment that was on the right just above the intersection.
        right: SegIdx,
    },
}

/// A point where the sweep-line's set of segments, or their order, changes.
///
/// Events are ordered by their point (in sweep order; see [`Point`]), then by
/// their kind, then by the segments involved. This order is total, so the
/// sweep is deterministic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Event {
    /// Where the event happens.
    pub point: Point,
    /// What happens there.
    pub kind: EventKind,
}

impl Event {
    /// The event of the sweep-line reaching the upper endpoint of `idx`.
    pub fn start(idx: SegIdx, segments: &Segments) -> Self {
        Event {
            point: segments[idx].start().clone(),
            kind: EventKind::Start(idx),
        }
    }

    /// The event of the sweep-line reaching the lower endpoint of `idx`.
    pub fn end(idx: SegIdx, segments: &Segments) -> Self {
        Event {
            point: segments[idx].end().clone(),
            kind: EventKind::End(idx),
        }
    }

    /// The event of `left` and `right` crossing at `point`.
    pub fn intersection(left: SegIdx, right: SegIdx, point: Point) -> Self {
        Event {
            point,
            kind: EventKind::Intersection { left, right },
        }
    }

    /// The smallest event that can happen at `point`.
    fn first_at(point: Point) -> Self {
        Event {
            point,
            kind: EventKind::End(SegIdx(0)),
        }
    }

    /// Is this an intersection event?
    pub fn is_intersection(&self) -> bool {
        matches!(self.kind, EventKind::Intersection { .. })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EventKind::Start(s) => write!(f, "start {s:?} at {}", self.point),
            EventKind::End(s) => write!(f, "end {s:?} at {}", self.point),
            EventKind::Intersection { left, right } => {
                write!(f, "cross {left:?}/{right:?} at {}", self.point)
            }
        }
    }
}

/// The queue of pending events, in sweep order.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: BTreeSet<Event>,
}

impl EventQueue {
    /// Creates a queue holding the start and end events of every segment.
    pub fn new(segments: &Segments) -> Self {
        let events = segments
            .indices()
            .flat_map(|idx| [Event::start(idx, segments), Event::end(idx, segments)])
            .collect();
        EventQueue { events }
    }

    /// Adds an event. Returns false if an identical event was already queued.
    pub fn push(&mut self, ev: Event) -> bool {
        self.events.insert(ev)
    }

    /// Removes and returns the next event, if there is one.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_first()
    }

    /// The next event, without removing it.
    pub fn peek(&self) -> Option<&Event> {
        self.events.first()
    }

    /// Is there any queued event (of any kind) at exactly this point?
    pub fn has_event_at(&self, point: &Point) -> bool {
        self.events
            .range(Event::first_at(point.clone())..)
            .next()
            .is_some_and(|ev| &ev.point == point)
    }

    /// The number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Are there no pending events?
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over the pending events, in the order they'll be processed.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}
