//! Core layer - host traits, frame bookkeeping and export settings.
//!
//! This module provides:
//! - [`TransformProvider`] / [`FrameCursor`] / [`SceneNode`] - What the exporter needs from a host
//! - [`FrameRange`] / [`Timeline`] - Frame numbering
//! - [`FrameCursorScope`] - Save/restore of the host frame cursor
//! - [`ExportConfig`] / [`Channels`] - Per-run settings

mod config;
mod frame;
mod traits;

pub use config::{
    Channels, ExportConfig, MAX_FRAME, MAX_FRAME_RATE, MAX_OFFSET, MIN_OFFSET, NAME_PLACEHOLDER,
};
pub use frame::{FrameCursorScope, FrameRange, Timeline};
pub use traits::{FrameCursor, SceneNode, TransformProvider};
