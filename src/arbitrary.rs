//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::Segments;

/// The largest number of segments that [`general_position_segments`] will produce.
pub const MAX_SEGMENTS: usize = 24;

/// Generate an arbitrary coordinate in some range.
pub fn coord_in_range(
    start: i64,
    end: i64,
    u: &mut Unstructured<'_>,
) -> Result<i64, arbitrary::Error> {
    u.int_in_range(start..=end)
}

fn coord(u: &mut Unstructured<'_>) -> Result<i64, arbitrary::Error> {
    coord_in_range(-10_000, 10_000, u)
}

// A non-zero offset, so that we never produce horizontal or vertical segments.
fn offset(u: &mut Unstructured<'_>) -> Result<i64, arbitrary::Error> {
    let len = coord_in_range(1, 5_000, u)?;
    Ok(if u.arbitrary()? { len } else { -len })
}

/// Generate the coordinates `[x1, y1, x2, y2]` of a segment that is neither
/// horizontal nor vertical.
pub fn segment_coords(u: &mut Unstructured<'_>) -> Result<[i64; 4], arbitrary::Error> {
    let x = coord(u)?;
    let y = coord(u)?;
    Ok([x, y, x + offset(u)?, y + offset(u)?])
}

/// Generate an arbitrary collection of segments in general position.
///
/// Segments are generated one at a time, and any segment that would break
/// general position (by being parallel to some other segment, by
/// sharing an endpoint, and so on) is skipped.
pub fn general_position_segments(u: &mut Unstructured<'_>) -> Result<Segments, arbitrary::Error> {
    let count = u.int_in_range(0..=MAX_SEGMENTS)?;
    let mut ret = Segments::default();
    for _ in 0..count {
        let [x1, y1, x2, y2] = segment_coords(u)?;
        let mut candidate = ret.clone();
        if candidate.add(x1, y1, x2, y2).is_ok() && candidate.is_in_general_position() {
            ret = candidate;
        }
    }
    Ok(ret)
}

/// Generate an arbitrary collection of segments, with no guarantees of general position.
///
/// The coordinates come from a small grid, so that parallel and touching
/// segments are common.
pub fn clustered_segments(u: &mut Unstructured<'_>) -> Result<Segments, arbitrary::Error> {
    let count = u.int_in_range(0..=MAX_SEGMENTS)?;
    let mut ret = Segments::default();
    for _ in 0..count {
        let x1 = coord_in_range(-8, 8, u)?;
        let y1 = coord_in_range(-8, 8, u)?;
        let x2 = coord_in_range(-8, 8, u)?;
        let y2 = coord_in_range(-8, 8, u)?;
        // Axis-aligned segments get rejected; just skip them.
        let _ = ret.add(x1, y1, x2, y2);
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_segments_are_usable() {
        arbtest::arbtest(|u| {
            let [x1, y1, x2, y2] = segment_coords(u)?;
            assert!(x1 != x2 && y1 != y2);

            let segs = general_position_segments(u)?;
            assert!(segs.len() <= MAX_SEGMENTS);
            assert!(segs.is_in_general_position());
            Ok(())
        })
        .budget_ms(500);
    }

    #[test]
    fn clustered_segments_never_panic() {
        arbtest::arbtest(|u| {
            let segs = clustered_segments(u)?;
            // Parallel inputs fail, but they fail gracefully.
            let _ = crate::Sweeper::new(&segs).run();
            Ok(())
        })
        .budget_ms(500);
    }
}
