//! The sweep engine.

use malachite::num::basic::traits::Zero;
use malachite::Rational;

use crate::{geom::Point, order::ComparisonCache, Error, SegIdx, Segments};

use super::{
    event::{Event, EventKind, EventQueue},
    segment_order::SegmentOrder,
};

/// A crossing found by the sweep.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Intersection {
    /// Where the two segments cross.
    pub point: Point,
    /// The segment that was on the left just above the crossing.
    pub left: SegIdx,
    /// The segment that was on the right just above the crossing.
    pub right: SegIdx,
}

/// The outcome of a complete sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SweepReport {
    /// The total number of events processed, including intersection events.
    pub events: usize,
    /// Every intersection, in the order that the sweep-line reached them.
    pub intersections: Vec<Intersection>,
}

impl SweepReport {
    /// The number of intersections found.
    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    /// The intersection points, in sweep order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.intersections.iter().map(|i| &i.point)
    }
}

/// Encapsulates the state of the sweep-line algorithm and allows iterating over events.
///
/// The sweep-line moves from top to bottom. At every event, it updates the
/// order of the segments crossing it and tests the segments that just became
/// neighbors for intersections. Crossings that are still ahead of us get
/// added to the event queue.
///
/// The inputs are assumed to be in "general position": no two segments are
/// parallel, no three segments meet at a point, and no segment passes
/// through another one's endpoint. Parallel neighbors are detected (and
/// reported as [`Error::DegenerateIntersection`]); the other degeneracies
/// are not, and might result in missed intersections. Parallel segments
/// that are never next to each other on the sweep-line are never compared,
/// so they don't cause an error.
#[derive(Clone, Debug)]
pub struct Sweeper<'segs> {
    y: Rational,
    events: EventQueue,
    line: SegmentOrder,
    cache: ComparisonCache,
    segments: &'segs Segments,

    processed: usize,
    intersections: Vec<Intersection>,
    // Once something goes wrong, the sweep can't continue.
    failed: Option<Error>,
}

impl<'segs> Sweeper<'segs> {
    /// Creates a new sweeper for a collection of segments.
    pub fn new(segments: &'segs Segments) -> Self {
        let events = EventQueue::new(segments);
        let y = events
            .peek()
            .map(|ev| ev.point.y.clone())
            .unwrap_or(Rational::ZERO);

        Sweeper {
            y,
            events,
            line: SegmentOrder::default(),
            cache: ComparisonCache::new(),
            segments,
            processed: 0,
            intersections: Vec::new(),
            failed: None,
        }
    }

    /// The current height of the sweep-line.
    ///
    /// Before the first event is processed, this is the height of the first event.
    pub fn y(&self) -> &Rational {
        &self.y
    }

    /// The segments currently crossing the sweep-line, from left to right.
    pub fn line(&self) -> &SegmentOrder {
        &self.line
    }

    /// The segments that we're sweeping over.
    pub fn segments(&self) -> &'segs Segments {
        self.segments
    }

    /// The number of events processed so far.
    pub fn events_processed(&self) -> usize {
        self.processed
    }

    /// The intersections processed so far.
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// The events that haven't been processed yet.
    pub fn pending_events(&self) -> &EventQueue {
        &self.events
    }

    /// Processes the next event, and returns it.
    ///
    /// Returns `Ok(None)` when there are no more events. If processing an
    /// event fails, the sweep is over: this and every subsequent call
    /// return the error.
    pub fn next_event(&mut self) -> Result<Option<Event>, Error> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        let Some(ev) = self.events.pop() else {
            return Ok(None);
        };

        self.y = ev.point.y.clone();
        self.processed += 1;
        tracing::trace!(y = %self.y, line = self.line.len(), "{ev}");

        let result = match ev.kind {
            EventKind::Start(seg) => self.process_start(seg),
            EventKind::End(seg) => self.process_end(seg),
            EventKind::Intersection { left, right } => {
                self.process_intersection(left, right, &ev.point)
            }
        };
        if let Err(err) = result {
            self.failed = Some(err);
            return Err(err);
        }

        self.check_invariants();
        Ok(Some(ev))
    }

    /// Runs the sweep to completion.
    pub fn run(mut self) -> Result<SweepReport, Error> {
        while self.next_event()?.is_some() {}
        Ok(self.into_report())
    }

    fn into_report(self) -> SweepReport {
        tracing::debug!(
            events = self.processed,
            intersections = self.intersections.len(),
            cached_pairs = self.cache.len(),
            "sweep finished"
        );
        SweepReport {
            events: self.processed,
            intersections: self.intersections,
        }
    }

    fn process_start(&mut self, seg: SegIdx) -> Result<(), Error> {
        let idx = self.line.insert(seg, &self.y, self.segments);
        let (left, right) = self.line.neighbors(idx);
        if let Some(left) = left {
            self.check(left, seg)?;
        }
        if let Some(right) = right {
            self.check(seg, right)?;
        }
        Ok(())
    }

    fn process_end(&mut self, seg: SegIdx) -> Result<(), Error> {
        let Some(idx) = self.line.remove(seg, &self.y, self.segments) else {
            tracing::warn!(?seg, "ending segment wasn't on the sweep-line");
            return Ok(());
        };

        // The old neighbors are now next to each other.
        if let (Some(left), Some(right)) = (
            idx.checked_sub(1).and_then(|i| self.line.get(i)),
            self.line.get(idx),
        ) {
            self.check(left, right)?;
        }
        Ok(())
    }

    fn process_intersection(
        &mut self,
        left: SegIdx,
        right: SegIdx,
        point: &Point,
    ) -> Result<(), Error> {
        let (Some(i), Some(j)) = (
            self.line.position(left, &self.y, self.segments),
            self.line.position(right, &self.y, self.segments),
        ) else {
            tracing::warn!(?left, ?right, "crossing segments weren't on the sweep-line");
            return Ok(());
        };

        if j != i + 1 {
            // Something else is between them (or they're in the wrong
            // order), so more than two segments meet here.
            tracing::warn!(?left, ?right, i, j, %point, "crossing segments aren't adjacent");
        }
        self.line.swap(i, j);
        self.intersections.push(Intersection {
            point: point.clone(),
            left,
            right,
        });

        let (lo, hi) = (i.min(j), i.max(j));
        if let (Some(outer), Some(inner)) = (
            lo.checked_sub(1).and_then(|k| self.line.get(k)),
            self.line.get(lo),
        ) {
            self.check(outer, inner)?;
        }
        if let (Some(inner), Some(outer)) = (self.line.get(hi), self.line.get(hi + 1)) {
            self.check(inner, outer)?;
        }
        Ok(())
    }

    // Tests two neighboring segments (`left` is to the left of `right`), and
    // queues an intersection event if they cross below the sweep-line.
    fn check(&mut self, left: SegIdx, right: SegIdx) -> Result<(), Error> {
        let Some(p) = self.cache.intersection(self.segments, left, right)? else {
            return Ok(());
        };

        if p.y < self.y && !self.events.has_event_at(&p) {
            tracing::debug!(?left, ?right, point = %p, "queueing intersection");
            self.events.push(Event::intersection(left, right, p));
        }
        Ok(())
    }

    #[cfg(feature = "slow-asserts")]
    fn check_invariants(&self) {
        for seg in self.line.iter() {
            assert!(
                self.segments[seg].spans(&self.y),
                "segment {seg:?} out of range at y={}",
                self.y
            );
        }

        assert!(self
            .line
            .find_invalid_order(&self.y, self.segments)
            .is_none());

        // Every pair of neighbors that cross below us has a witness in the queue.
        let segs: Vec<_> = self.line.iter().collect();
        for pair in segs.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if let Ok(Some(p)) = self.segments[a].intersection(&self.segments[b]) {
                if p.y < self.y {
                    assert!(
                        self.events.has_event_at(&p),
                        "segments {a:?} and {b:?} cross at {p}, but there is no witness"
                    );
                }
            }
        }
    }

    #[cfg(not(feature = "slow-asserts"))]
    fn check_invariants(&self) {}
}

/// Runs the sweep-line algorithm, calling the provided callback after every event.
pub fn sweep<C: FnMut(&Sweeper<'_>, &Event)>(
    segments: &Segments,
    mut callback: C,
) -> Result<SweepReport, Error> {
    let mut state = Sweeper::new(segments);
    while let Some(ev) = state.next_event()? {
        callback(&state, &ev);
    }
    Ok(state.into_report())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use crate::{geom::Segment, num::tests::Reasonable};

    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::from((x, y))
    }

    fn segs(coords: &[[i64; 4]]) -> Segments {
        Segments::from_coords(coords.iter().copied()).unwrap()
    }

    fn trace(segments: &Segments) -> String {
        let mut lines = Vec::new();
        sweep(segments, |_, ev| lines.push(ev.to_string())).unwrap();
        lines.join("\n")
    }

    // Runs the sweep, and checks that it agrees with brute force.
    fn check_against_brute_force(segments: &Segments) {
        let expected = segments.pairwise_intersections().unwrap();
        let report = sweep(segments, |sweeper, _| {
            assert!(sweeper
                .line()
                .find_invalid_order(sweeper.y(), segments)
                .is_none());
            for seg in sweeper.line().iter() {
                assert!(segments[seg].spans(sweeper.y()));
            }
        })
        .unwrap();

        assert_eq!(report.intersection_count(), expected.len());
        assert_eq!(report.events, 2 * segments.len() + expected.len());

        let mut found: Vec<_> = report.points().cloned().collect();
        let mut expected: Vec<_> = expected.into_iter().map(|(_, _, p)| p).collect();
        found.sort();
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn single_crossing() {
        let segments = segs(&[[0, 0, 4, 4], [0, 4, 4, 0]]);
        let report = Sweeper::new(&segments).run().unwrap();
        assert_eq!(report.events, 5);
        assert_eq!(
            report.intersections,
            vec![Intersection {
                point: p(2, 2),
                left: SegIdx(1),
                right: SegIdx(0),
            }]
        );

        insta::assert_snapshot!(trace(&segments), @r"
        start s_1 at (0, 4)
        start s_0 at (4, 4)
        cross s_1/s_0 at (2, 2)
        end s_0 at (0, 0)
        end s_1 at (4, 0)
        ");
    }

    #[test]
    fn parallel_neighbors_are_fatal() {
        let segments = segs(&[[0, 0, 4, 4], [1, 0, 5, 4], [2, 0, 6, 4]]);
        let mut sweeper = Sweeper::new(&segments);
        assert_matches!(sweeper.next_event(), Ok(Some(_)));
        assert_matches!(
            sweeper.next_event(),
            Err(Error::DegenerateIntersection(SegIdx(0), SegIdx(1)))
        );
        assert_eq!(sweeper.events_processed(), 2);
    }

    #[test]
    fn parallel_offset_vertically() {
        // Parallel, but never on the sweep-line at the same time.
        let segments = segs(&[[0, 0, 2, 2], [1, 3, 3, 5], [2, 6, 4, 8]]);
        let report = Sweeper::new(&segments).run().unwrap();
        assert_eq!(report.events, 6);
        assert_eq!(report.intersection_count(), 0);
    }

    #[test]
    fn disjoint_crosses() {
        let coords: Vec<_> = (0..3i64)
            .flat_map(|k| [[10 * k, 0, 10 * k + 4, 4], [10 * k, 4, 10 * k + 4, 0]])
            .collect();
        let segments = segs(&coords);
        let report = Sweeper::new(&segments).run().unwrap();
        assert_eq!(report.events, 15);
        assert_eq!(
            report.points().cloned().collect::<Vec<_>>(),
            vec![p(2, 2), p(12, 2), p(22, 2)]
        );
        // The rising segments are all parallel. Brute force compares them,
        // but the sweep never makes them neighbors.
        assert_matches!(
            segments.pairwise_intersections(),
            Err(Error::DegenerateIntersection(..))
        );
    }

    #[test]
    fn non_integer_crossing() {
        let segments = segs(&[[0, 0, 3, 3], [0, 2, 3, 0], [5, 7, 6, 1]]);
        let report = Sweeper::new(&segments).run().unwrap();
        assert_eq!(report.events, 7);
        let six_fifths = Rational::from(6) / Rational::from(5);
        assert_eq!(
            report.points().collect::<Vec<_>>(),
            vec![&Point::new(six_fifths.clone(), six_fifths)]
        );
        check_against_brute_force(&segments);
    }

    #[test]
    fn neighbors_after_end() {
        // The middle segment keeps the outer two apart until it ends.
        let segments = segs(&[[0, 10, 10, 0], [4, 10, 5, 8], [10, 10, 0, 0]]);
        insta::assert_snapshot!(trace(&segments), @r"
        start s_0 at (0, 10)
        start s_1 at (4, 10)
        start s_2 at (10, 10)
        end s_1 at (5, 8)
        cross s_0/s_2 at (5, 5)
        end s_2 at (0, 0)
        end s_0 at (10, 0)
        ");
        check_against_brute_force(&segments);
    }

    #[test]
    fn empty() {
        let segments = Segments::default();
        let mut sweeper = Sweeper::new(&segments);
        assert_eq!(sweeper.y(), &Rational::ZERO);
        assert_eq!(sweeper.next_event(), Ok(None));
        assert_eq!(sweeper.run(), Ok(SweepReport::default()));
    }

    #[test]
    fn step_by_step() {
        let segments = segs(&[[0, 0, 4, 4], [0, 4, 4, 0]]);
        let mut sweeper = Sweeper::new(&segments);
        assert_eq!(sweeper.pending_events().len(), 4);

        sweeper.next_event().unwrap();
        sweeper.next_event().unwrap();
        assert_eq!(sweeper.y(), &Rational::from(4));
        assert_eq!(
            sweeper.line().iter().collect::<Vec<_>>(),
            vec![SegIdx(1), SegIdx(0)]
        );
        // Both ends, plus the crossing.
        assert_eq!(sweeper.pending_events().len(), 3);

        let ev = sweeper.next_event().unwrap().unwrap();
        assert!(ev.is_intersection());
        assert_eq!(
            sweeper.line().iter().collect::<Vec<_>>(),
            vec![SegIdx(0), SegIdx(1)]
        );
        assert_eq!(sweeper.intersections().len(), 1);
        assert_eq!(sweeper.events_processed(), 3);
    }

    #[test]
    fn collinear_is_fatal() {
        let segments = segs(&[[0, 0, 2, 2], [1, 1, 3, 3]]);
        let mut sweeper = Sweeper::new(&segments);
        assert_matches!(sweeper.next_event(), Ok(Some(_)));
        assert_matches!(
            sweeper.next_event(),
            Err(Error::DegenerateIntersection(SegIdx(0), SegIdx(1)))
        );
        // The sweep is dead now.
        assert_matches!(sweeper.next_event(), Err(Error::DegenerateIntersection(..)));
        assert_matches!(sweeper.run(), Err(Error::DegenerateIntersection(..)));
    }

    #[test]
    fn triple_point_is_counted_once() {
        // Three segments through (2, 2). Only the first pair to be found gets reported.
        let segments = segs(&[[0, 0, 4, 4], [0, 4, 4, 0], [1, 0, 3, 4]]);
        assert_eq!(segments.pairwise_intersections().unwrap().len(), 3);
        let report = Sweeper::new(&segments).run().unwrap();
        assert_eq!(report.points().collect::<Vec<_>>(), vec![&p(2, 2)]);
        assert_eq!(report.events, 7);
    }

    #[test]
    fn deterministic() {
        let segments = segs(&[
            [0, 0, 10, 9],
            [1, 9, 9, 1],
            [3, 0, 5, 10],
            [-2, 5, 12, 4],
            [7, 8, 2, 3],
        ]);
        let first = trace(&segments);
        assert_eq!(first, trace(&segments));
    }

    #[test]
    fn arbitrary_general_position() {
        arbtest::arbtest(|u| {
            let segments = crate::arbitrary::general_position_segments(u)?;
            check_against_brute_force(&segments);
            Ok(())
        })
        .budget_ms(2_000);
    }

    fn general_position() -> impl Strategy<Value = Segments> {
        prop::collection::vec(Segment::reasonable(), 0..16).prop_filter_map(
            "not in general position",
            |segs| {
                let mut ret = Segments::default();
                for s in segs {
                    ret.add_points(s.start().clone(), s.end().clone()).ok()?;
                }
                ret.is_in_general_position().then_some(ret)
            },
        )
    }

    proptest! {
        #[test]
        fn agrees_with_brute_force(segments in general_position()) {
            check_against_brute_force(&segments);
        }

        #[test]
        fn reruns_agree(segments in general_position()) {
            let first = Sweeper::new(&segments).run().unwrap();
            let second = Sweeper::new(&segments).run().unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
