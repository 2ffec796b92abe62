//! Utility types and functions for the exporter.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam, epsilon snapping and axis swizzles
//! - [`format_float`] - Numeric literal formatting for emitted scripts

mod error;
mod math;
mod number;

pub use error::*;
pub use math::*;
pub use number::*;
