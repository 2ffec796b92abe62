//! Frame sampler.
//!
//! Turns host local matrices into runtime-convention transform samples,
//! one per frame of the requested range.

use crate::core::{FrameCursor, FrameCursorScope, FrameRange, SceneNode, TransformProvider};
use crate::util::{
    position_to_runtime, rotation_to_runtime, scale_to_runtime, snap_quat, snap_vec3, DMat4,
    DQuat, DVec3, Error, Result,
};

/// Decomposed transform of one object at one frame, in runtime axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSample {
    pub position: DVec3,
    /// Quaternion, x/y/z/w.
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Default for TransformSample {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformSample {
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// Decompose a host local matrix, convert to runtime axes and snap
    /// near-zero components to zero.
    ///
    /// Scale components are snapped as well. Real scales are almost never
    /// that small, but generated scripts have always been written this way
    /// and consumers may compare against them.
    ///
    /// Returns `None` if the matrix or its decomposition is not finite.
    pub fn from_host_matrix(m: &DMat4) -> Option<Self> {
        if !m.is_finite() {
            return None;
        }
        let (scale, rotation, translation) = m.to_scale_rotation_translation();
        if !(scale.is_finite() && rotation.is_finite() && translation.is_finite()) {
            return None;
        }

        // q and -q are the same rotation; keep w >= 0
        let rotation = if rotation.w < 0.0 { -rotation } else { rotation };

        // Snap after the swizzle so a flipped zero stays +0
        Some(Self {
            position: snap_vec3(position_to_runtime(translation)),
            rotation: snap_quat(rotation_to_runtime(rotation)),
            scale: snap_vec3(scale_to_runtime(scale)),
        })
    }
}

/// Samples of one object over a contiguous frame range.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    range: FrameRange,
    samples: Vec<TransformSample>,
}

impl Sequence {
    /// Build a sequence. The sample count must match the range length.
    pub fn new(range: FrameRange, samples: Vec<TransformSample>) -> Result<Self> {
        if samples.len() != range.len() {
            return Err(Error::SequenceLength {
                expected: range.len(),
                actual: samples.len(),
            });
        }
        Ok(Self { range, samples })
    }

    /// A sequence holding the same sample on every frame.
    pub fn constant(range: FrameRange, sample: TransformSample) -> Self {
        Self {
            range,
            samples: vec![sample; range.len()],
        }
    }

    #[inline]
    pub fn range(&self) -> FrameRange {
        self.range
    }

    #[inline]
    pub fn samples(&self) -> &[TransformSample] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at an absolute frame number.
    pub fn get(&self, frame: i32) -> Option<&TransformSample> {
        if !self.range.contains(frame) {
            return None;
        }
        self.samples.get((frame - self.range.start) as usize)
    }

    /// Iterate `(frame, sample)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &TransformSample)> + '_ {
        self.range.frames().zip(self.samples.iter())
    }
}

/// Sample `object` at every frame of `range`.
///
/// Fails with [`Error::MissingTransform`] when the provider has no matrix
/// for a frame, and [`Error::InvalidTransform`] when it cannot be
/// decomposed. Either aborts the whole object.
pub fn sample<O, P>(provider: &P, object: &O, range: FrameRange) -> Result<Sequence>
where
    O: SceneNode + ?Sized,
    P: TransformProvider<O> + ?Sized,
{
    let mut samples = Vec::with_capacity(range.len());
    for frame in range.frames() {
        samples.push(sample_frame(provider, object, frame)?);
    }
    tracing::trace!("sampled '{}' over {} frames", object.name(), samples.len());
    Sequence::new(range, samples)
}

/// Like [`sample`], but steps the host frame cursor to each frame before
/// querying it. The cursor is back where it started when this returns,
/// whether sampling succeeded or not.
pub fn sample_scoped<O, H>(host: &mut H, object: &O, range: FrameRange) -> Result<Sequence>
where
    O: SceneNode + ?Sized,
    H: TransformProvider<O> + FrameCursor + ?Sized,
{
    let mut scope = FrameCursorScope::new(host);
    let mut samples = Vec::with_capacity(range.len());
    for frame in range.frames() {
        scope.set_current_frame(frame);
        samples.push(sample_frame(&*scope, object, frame)?);
    }
    drop(scope);
    tracing::trace!("sampled '{}' over {} frames", object.name(), samples.len());
    Sequence::new(range, samples)
}

fn sample_frame<O, P>(provider: &P, object: &O, frame: i32) -> Result<TransformSample>
where
    O: SceneNode + ?Sized,
    P: TransformProvider<O> + ?Sized,
{
    let matrix = provider
        .local_transform(object, frame)
        .ok_or_else(|| Error::missing(object.name(), frame))?;
    TransformSample::from_host_matrix(&matrix).ok_or_else(|| Error::InvalidTransform {
        object: object.name().to_string(),
        frame,
    })
}
