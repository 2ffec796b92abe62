//! Math type re-exports and axis-convention helpers.
//!
//! This module re-exports the double precision types from `glam` and
//! provides the snapping and axis swizzles applied to every sample.

pub use glam::{DMat4, DQuat, DVec3, DVec4};

/// Components with an absolute value below this are written as exact zero.
pub const SNAP_EPSILON: f64 = 1e-5;

/// Snap a single value to zero if it is within [`SNAP_EPSILON`].
///
/// Negative zero also becomes positive zero.
#[inline]
pub fn snap(v: f64) -> f64 {
    if v.abs() < SNAP_EPSILON {
        0.0
    } else {
        v
    }
}

/// Snap every component of a vector.
#[inline]
pub fn snap_vec3(v: DVec3) -> DVec3 {
    DVec3::new(snap(v.x), snap(v.y), snap(v.z))
}

/// Snap every component of a quaternion (x, y, z and w).
#[inline]
pub fn snap_quat(q: DQuat) -> DQuat {
    DQuat::from_xyzw(snap(q.x), snap(q.y), snap(q.z), snap(q.w))
}

/// Host (Z-up, right handed) position to runtime (Y-up, left handed).
#[inline]
pub fn position_to_runtime(p: DVec3) -> DVec3 {
    DVec3::new(-p.x, p.z, p.y)
}

/// Host rotation to runtime rotation; same swizzle as positions, W untouched.
#[inline]
pub fn rotation_to_runtime(q: DQuat) -> DQuat {
    DQuat::from_xyzw(-q.x, q.z, q.y, q.w)
}

/// Host scale to runtime scale. Scale has no handedness, so only Y/Z swap.
#[inline]
pub fn scale_to_runtime(s: DVec3) -> DVec3 {
    DVec3::new(s.x, s.z, s.y)
}
