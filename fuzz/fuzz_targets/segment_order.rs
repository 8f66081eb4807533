#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use malachite::Rational;
use planesweep::{sweep::SegmentOrder, SegIdx, Segments};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { seg: u8 },
    Remove { seg: u8 },
}

// A collection of segments that all cross the line y = 0, and no two of
// which meet there. Their order at y = 0 is the order of their indices.
fn segments() -> Segments {
    Segments::from_coords((0..64i64).map(|i| [4 * i, 1, 4 * i + 1 + i % 3, -1])).unwrap()
}

fuzz_target!(|ops: Vec<Op>| {
    let segs = segments();
    let y = Rational::from(0);
    let mut order = SegmentOrder::default();
    let mut model: Vec<SegIdx> = Vec::new();

    for op in ops {
        match op {
            Op::Insert { seg } => {
                let seg = SegIdx(seg as usize % segs.len());
                if model.contains(&seg) {
                    continue;
                }
                order.insert(seg, &y, &segs);
                model.push(seg);
                model.sort();
            }
            Op::Remove { seg } => {
                let seg = SegIdx(seg as usize % segs.len());
                let expected = model.iter().position(|&s| s == seg);
                assert_eq!(order.remove(seg, &y, &segs), expected);
                model.retain(|&s| s != seg);
            }
        }
        assert_eq!(order.iter().collect::<Vec<_>>(), model);
    }
});
