//! Mapping from unbounded logical positions onto the adapter's item range.

use crate::error::{PileError, Result};

/// Maps a signed logical position onto `[0, item_count)`.
///
/// Positions at or above zero wrap forward; negative positions count back
/// from the end, so `-1` is the last item and `-item_count` is item `0`
/// again. The mapping is periodic in `item_count` in both directions.
pub fn data_index(position: i64, item_count: usize) -> Result<usize> {
    if item_count == 0 {
        return Err(PileError::EmptyAdapter);
    }
    let n = item_count as u64;
    if position >= 0 {
        return Ok((position as u64 % n) as usize);
    }
    let back = position.unsigned_abs() % n;
    Ok(if back == 0 { 0 } else { (n - back) as usize })
}
