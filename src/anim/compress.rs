//! Leading/trailing run trimming.
//!
//! A runtime player holds the first frame until playback reaches the kept
//! range and holds the last one after it, so identical frames at either end
//! carry no information and are dropped. Interior repeats are kept.

use crate::core::FrameRange;
use crate::util::{Error, Result};

/// Frames kept after trimming, in absolute frame numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompressedRange {
    pub keep_start: i32,
    pub keep_end: i32,
}

impl CompressedRange {
    /// Number of kept frames.
    pub fn len(&self) -> usize {
        (self.keep_end as i64 - self.keep_start as i64 + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when only a single frame survived trimming.
    pub fn is_single(&self) -> bool {
        self.keep_start == self.keep_end
    }

    pub fn as_range(&self) -> FrameRange {
        FrameRange::new(self.keep_start, self.keep_end)
    }

    /// Shift both ends by `offset`, saturating at the `i32` bounds.
    pub fn offset(&self, offset: i32) -> Self {
        Self {
            keep_start: self.keep_start.saturating_add(offset),
            keep_end: self.keep_end.saturating_add(offset),
        }
    }
}

/// Find the kept range of `records`, where `records[i]` belongs to frame
/// `range.start + i`.
///
/// Walks forward from the first frame while it equals its successor, and
/// backward from the last frame while it equals its predecessor. A fully
/// constant sequence makes the walks cross; it collapses onto the first
/// frame.
pub fn compress<T: PartialEq>(range: FrameRange, records: &[T]) -> Result<CompressedRange> {
    if records.is_empty() {
        return Err(Error::EmptySequence);
    }
    if records.len() != range.len() {
        return Err(Error::SequenceLength {
            expected: range.len(),
            actual: records.len(),
        });
    }

    let last = records.len() - 1;

    let mut first_kept = 0;
    while first_kept < last && records[first_kept] == records[first_kept + 1] {
        first_kept += 1;
    }

    let mut last_kept = last;
    while last_kept > 0 && records[last_kept] == records[last_kept - 1] {
        last_kept -= 1;
    }

    // Static
    if last_kept < first_kept {
        first_kept = 0;
        last_kept = 0;
    }

    Ok(CompressedRange {
        keep_start: range.start + first_kept as i32,
        keep_end: range.start + last_kept as i32,
    })
}
