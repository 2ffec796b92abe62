//! # Anima export
//!
//! Converts per-frame local transforms of animated objects into Anima
//! sequence scripts for the runtime animation player.
//!
//! Each object is sampled over a frame range, frames that repeat at the
//! start or end of the range are trimmed, and every remaining frame is
//! written as one instruction (`PLocRotScale(...)`, `PLocation(...)`, ...)
//! inside a generated class.
//!
//! ## Modules
//!
//! - [`util`] - Errors, math re-exports, snapping and literal formatting
//! - [`core`] - Host traits, frame ranges, export settings
//! - [`anim`] - Sampler, record layouts, compressor and script writer
//! - [`export`] - Multi-object export driver
//! - [`scene`] - JSON scene document usable as a host
//!
//! ## Example
//!
//! ```ignore
//! use anima_export::prelude::*;
//!
//! let mut scene = SceneDocument::open("door.json")?;
//! let config = ExportConfig::default().with_timeline(&scene.timeline.timeline());
//! let stats = scene.export_to_path(&[], &config, "door.cs")?;
//! println!("{} objects", stats.objects);
//! ```

pub mod util;
pub mod core;
pub mod anim;
pub mod export;
pub mod scene;

// Re-export commonly used types
pub use util::{Error, Result};
pub use export::{export_sequences, export_to_path, ExportStats};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::core::{
        Channels, ExportConfig, FrameCursor, FrameCursorScope, FrameRange, SceneNode, Timeline,
        TransformProvider,
    };
    pub use crate::anim::{
        compress, emit_sequence, sample, sample_scoped, CompressedRange, RecordLayout, Sequence,
        TransformSample,
    };
    pub use crate::export::{export_sequences, export_to_path, select_exportable, ExportStats};
    pub use crate::scene::{ObjectKind, SceneDocument, SceneObject, TransformKey, TransformParts};
}
