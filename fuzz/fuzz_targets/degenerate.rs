#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;
use planesweep::Error;

// Inputs that aren't in general position may give wrong answers, but they
// shouldn't panic.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(segs) = planesweep::arbitrary::clustered_segments(&mut u) else {
        return;
    };

    match planesweep::Sweeper::new(&segs).run() {
        Ok(report) => assert!(report.events >= 2 * segs.len()),
        Err(Error::DegenerateIntersection(a, b)) => assert!(a < b),
        Err(e) => panic!("unexpected error {e}"),
    }
});
