#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(segs) = planesweep::arbitrary::general_position_segments(&mut u) else {
        return;
    };

    let report = planesweep::Sweeper::new(&segs).run().unwrap();
    let expected = segs.pairwise_intersections().unwrap();
    assert_eq!(report.intersection_count(), expected.len());
    assert_eq!(report.events, 2 * segs.len() + expected.len());
});
