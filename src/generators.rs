//! Synthetic inputs, for benchmarks and demos.
//!
//! Every generator here produces segments in general position (in
//! particular, no two of them are parallel), with a known number of
//! intersections.

/// `n` disjoint pairs of crossing segments, laid out in a row.
///
/// Pair `k` is an "X" whose height grows with `k`, so that no two segments
/// are parallel. There are `2 * n` segments and `n` intersections.
pub fn crosses(n: usize) -> Vec<[i64; 4]> {
    (0..n as i64)
        .flat_map(|k| {
            let (x, h) = (10 * k, 4 + k);
            [[x, 0, x + 4, h], [x, h, x + 4, 0]]
        })
        .collect()
}

/// `n` segments leaning one way and `n` leaning the other, where every
/// segment of one family crosses every segment of the other.
///
/// Both families keep their left-to-right order from top to bottom, so
/// segments in the same family never meet, and no two crossings share a
/// point. Each segment has its own slope. There are `2 * n` segments and
/// `n * n` intersections.
pub fn lattice(n: usize) -> Vec<[i64; 4]> {
    let n = n as i64;
    let h = 12 * n + 20;
    // Starts at the top right, and ends at the bottom left.
    let leaning_left = (0..n).map(|i| [h + 10 * i, h, 11 * i, 0]);
    // Starts at the top left, and ends at the bottom right.
    let leaning_right = (0..n).map(|j| [10 * j, h, h + 11 * j, 0]);
    leaning_left.chain(leaning_right).collect()
}

/// A fan of `n` segments where every segment crosses all of the others.
///
/// Segment `i` (counting from 1) goes from `(i, h)` down to `(-i * i, 0)`,
/// so segments `i` and `j` cross at height `h * (i + j) / (i + j + 1)`, at a
/// point that no other pair shares. There are `n` segments and
/// `n * (n - 1) / 2` intersections.
pub fn fan(n: usize) -> Vec<[i64; 4]> {
    let h = 100;
    (1..=n as i64).map(|i| [i, h, -i * i, 0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Segments;

    fn check(coords: Vec<[i64; 4]>, intersections: usize) {
        let segs = Segments::from_coords(coords).unwrap();
        assert!(segs.is_in_general_position());
        let report = crate::Sweeper::new(&segs).run().unwrap();
        assert_eq!(report.intersection_count(), intersections);
        assert_eq!(report.events, 2 * segs.len() + intersections);
        assert_eq!(
            segs.pairwise_intersections().unwrap().len(),
            intersections
        );
    }

    #[test]
    fn crosses_count() {
        check(crosses(0), 0);
        check(crosses(5), 5);
    }

    #[test]
    fn lattice_count() {
        check(lattice(1), 1);
        check(lattice(4), 16);
    }

    #[test]
    fn fan_count() {
        check(fan(2), 1);
        check(fan(6), 15);
    }

    // These have more than 32 segments on the sweep-line at once, so
    // `SegmentOrder::position` uses its binary search.
    #[test]
    fn long_sweep_lines() {
        check(lattice(20), 400);
        check(fan(40), 780);
        check(crosses(40), 40);
    }

    #[test]
    fn long_sweep_lines_keep_order() {
        let segs = Segments::from_coords(lattice(20)).unwrap();
        let mut widest = 0;
        crate::sweep(&segs, |sweeper, _| {
            widest = widest.max(sweeper.line().len());
            assert!(sweeper
                .line()
                .find_invalid_order(sweeper.y(), &segs)
                .is_none());
        })
        .unwrap();
        assert_eq!(widest, 40);
    }
}
