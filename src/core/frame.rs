//! Frame ranges, host timeline info and the scoped frame cursor.

use std::ops::{Deref, DerefMut, RangeInclusive};

use crate::core::FrameCursor;

/// Inclusive range of absolute frame numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRange {
    pub start: i32,
    pub end: i32,
}

impl FrameRange {
    /// Create a range. `end` below `start` is clamped up to `start`.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Range holding a single frame.
    pub const fn single(frame: i32) -> Self {
        Self { start: frame, end: frame }
    }

    /// Number of frames in the range (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        (self.end as i64 - self.start as i64 + 1) as usize
    }

    /// Ranges are never empty; kept for API symmetry with slices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, frame: i32) -> bool {
        frame >= self.start && frame <= self.end
    }

    /// Iterate frames in increasing order.
    pub fn frames(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Shift both ends by `offset`, saturating at the `i32` bounds.
    pub fn offset(&self, offset: i32) -> Self {
        Self {
            start: self.start.saturating_add(offset),
            end: self.end.saturating_add(offset),
        }
    }
}

/// Playback settings of the host scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    pub frame_start: i32,
    pub frame_end: i32,
    pub fps: f64,
    pub fps_base: f64,
}

impl Timeline {
    /// Effective frames per second (`fps / fps_base`).
    pub fn frame_rate(&self) -> f64 {
        if self.fps_base == 0.0 {
            self.fps
        } else {
            self.fps / self.fps_base
        }
    }

    pub fn range(&self) -> FrameRange {
        FrameRange::new(self.frame_start, self.frame_end)
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            frame_start: 1,
            frame_end: 250,
            fps: 24.0,
            fps_base: 1.0,
        }
    }
}

/// Saves the host frame cursor and restores it when dropped.
///
/// Derefs to the wrapped host, so sampling code can step the cursor and
/// query transforms through the scope. The restore also runs when sampling
/// bails out early with an error.
pub struct FrameCursorScope<'a, H: FrameCursor + ?Sized> {
    host: &'a mut H,
    saved: i32,
}

impl<'a, H: FrameCursor + ?Sized> FrameCursorScope<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        let saved = host.current_frame();
        Self { host, saved }
    }

    /// Frame that will be restored on drop.
    pub fn saved_frame(&self) -> i32 {
        self.saved
    }
}

impl<H: FrameCursor + ?Sized> Deref for FrameCursorScope<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: FrameCursor + ?Sized> DerefMut for FrameCursorScope<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: FrameCursor + ?Sized> Drop for FrameCursorScope<'_, H> {
    fn drop(&mut self) {
        self.host.set_current_frame(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cursor(i32);

    impl FrameCursor for Cursor {
        fn current_frame(&self) -> i32 {
            self.0
        }
        fn set_current_frame(&mut self, frame: i32) {
            self.0 = frame;
        }
    }

    #[test]
    fn test_range_len() {
        assert_eq!(FrameRange::new(0, 9).len(), 10);
        assert_eq!(FrameRange::new(5, 5).len(), 1);
        assert_eq!(FrameRange::new(7, 3), FrameRange::single(7));
    }

    #[test]
    fn test_range_offset() {
        let r = FrameRange::new(10, 20).offset(-5);
        assert_eq!(r, FrameRange { start: 5, end: 15 });
        assert!(r.contains(5) && r.contains(15) && !r.contains(16));
    }

    #[test]
    fn test_range_offset_saturates() {
        let r = FrameRange::new(0, 10).offset(i32::MAX);
        assert_eq!(r, FrameRange { start: i32::MAX, end: i32::MAX });
        let r = FrameRange::new(-5, 0).offset(i32::MIN);
        assert_eq!(r.start, i32::MIN);
    }

    #[test]
    fn test_timeline_rate() {
        let t = Timeline { frame_start: 0, frame_end: 10, fps: 30.0, fps_base: 1.001 };
        assert!((t.frame_rate() - 29.97).abs() < 0.001);
    }

    #[test]
    fn test_scope_restores() {
        let mut cursor = Cursor(42);
        {
            let mut scope = FrameCursorScope::new(&mut cursor);
            scope.set_current_frame(3);
            assert_eq!(scope.current_frame(), 3);
            assert_eq!(scope.saved_frame(), 42);
        }
        assert_eq!(cursor.0, 42);
    }
}
