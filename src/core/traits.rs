//! Abstract traits for the host scene.
//!
//! These traits define the interface between the exporter and whatever
//! application owns the animated objects. The exporter never depends on a
//! concrete 3D host API.

use crate::util::DMat4;

// ============================================================================
// Transform access
// ============================================================================

/// Source of per-frame local transforms.
///
/// `O` is the host's object handle. Returning `None` for a frame inside the
/// requested range is a contract violation and aborts the export.
pub trait TransformProvider<O: ?Sized> {
    /// Local (parent-relative) transform of `object` at `frame`.
    fn local_transform(&self, object: &O, frame: i32) -> Option<DMat4>;
}

impl<O, F> TransformProvider<O> for F
where
    O: ?Sized,
    F: Fn(&O, i32) -> Option<DMat4>,
{
    #[inline]
    fn local_transform(&self, object: &O, frame: i32) -> Option<DMat4> {
        self(object, frame)
    }
}

// ============================================================================
// Frame cursor
// ============================================================================

/// The host's global "current frame" pointer.
///
/// Hosts typically evaluate animation at the current frame only, so sampling
/// moves this cursor. Use [`FrameCursorScope`](crate::core::FrameCursorScope)
/// to get it restored afterwards.
pub trait FrameCursor {
    /// Frame the host is currently evaluated at.
    fn current_frame(&self) -> i32;

    /// Move the host to `frame` and re-evaluate.
    fn set_current_frame(&mut self, frame: i32);
}

// ============================================================================
// Objects
// ============================================================================

/// A named object that may be exported.
pub trait SceneNode {
    /// Object name, substituted into the class name template.
    fn name(&self) -> &str;

    /// Whether the object can carry an exported sequence.
    fn is_exportable(&self) -> bool {
        true
    }
}

impl SceneNode for str {
    fn name(&self) -> &str {
        self
    }
}

impl SceneNode for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
