//! Numeric literal formatting for the emitted script.

use std::fmt;

/// A float rendered as a script literal: shortest round-trippable decimal
/// followed by the `f` type suffix.
///
/// Uses `f64` `Display`: shortest round-trip digits, never exponent notation.
///
/// Not byte-identical to scripts produced with `%g` (six significant
/// digits), which could also contain `-0`: `0.707107f` there is
/// `0.7071067811865476f` here, and `-0` prints as `0f`. Frame trimming
/// compares this text, so samples that differ only past the sixth digit
/// are kept apart here where `%g` output would have merged them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatLiteral(pub f64);

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // -0 would be a valid literal, but snapped values must print as 0
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{}f", v)
    }
}

/// Format a float as a script literal (`1.5f`, `-2f`, `0f`).
pub fn format_float(v: f64) -> String {
    FloatLiteral(v).to_string()
}
