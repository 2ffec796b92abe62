//! Per-frame instruction records.
//!
//! Each kept frame becomes one call in the generated `PData()` body. Which
//! call depends on the enabled channel set, one fixed shape per combination:
//!
//! | position | rotation | scaling | record |
//! |---|---|---|---|
//! | x | x | x | `PLocRotScale(px,py,pz,rx,ry,rz,rw,sx,sy,sz)` |
//! | x |   |   | `PLocation(px,py,pz)` |
//! |   | x |   | `PRotation(rx,ry,rz,rw)` |
//! |   |   | x | `PScaling(sx,sy,sz)` |
//! | x | x |   | `PLocRot(px,py,pz,rx,ry,rz,rw)` |
//! | x |   | x | `PLocScale(px,py,pz,sx,sy,sz)` |
//! |   | x | x | `PRotScale(rx,ry,rz,rw,sx,sy,sz)` |
//! |   |   |   | `PNone()` |

use std::fmt::Write as _;

use crate::anim::{Sequence, TransformSample};
use crate::core::Channels;
use crate::util::FloatLiteral;

/// Record shape selected by the enabled channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordLayout {
    LocRotScale,
    Location,
    Rotation,
    Scaling,
    LocRot,
    LocScale,
    RotScale,
    None,
}

impl RecordLayout {
    /// All layouts, in table order.
    pub const ALL: [Self; 8] = [
        Self::LocRotScale,
        Self::Location,
        Self::Rotation,
        Self::Scaling,
        Self::LocRot,
        Self::LocScale,
        Self::RotScale,
        Self::None,
    ];

    pub fn from_channels(channels: Channels) -> Self {
        match (channels.position, channels.rotation, channels.scaling) {
            (true, true, true) => Self::LocRotScale,
            (true, false, false) => Self::Location,
            (false, true, false) => Self::Rotation,
            (false, false, true) => Self::Scaling,
            (true, true, false) => Self::LocRot,
            (true, false, true) => Self::LocScale,
            (false, true, true) => Self::RotScale,
            (false, false, false) => Self::None,
        }
    }

    pub fn channels(self) -> Channels {
        match self {
            Self::LocRotScale => Channels::new(true, true, true),
            Self::Location => Channels::new(true, false, false),
            Self::Rotation => Channels::new(false, true, false),
            Self::Scaling => Channels::new(false, false, true),
            Self::LocRot => Channels::new(true, true, false),
            Self::LocScale => Channels::new(true, false, true),
            Self::RotScale => Channels::new(false, true, true),
            Self::None => Channels::new(false, false, false),
        }
    }

    /// Runtime method name of the record.
    pub fn call_name(self) -> &'static str {
        match self {
            Self::LocRotScale => "PLocRotScale",
            Self::Location => "PLocation",
            Self::Rotation => "PRotation",
            Self::Scaling => "PScaling",
            Self::LocRot => "PLocRot",
            Self::LocScale => "PLocScale",
            Self::RotScale => "PRotScale",
            Self::None => "PNone",
        }
    }

    /// Number of float arguments in the record.
    pub fn arity(self) -> usize {
        let c = self.channels();
        3 * c.position as usize + 4 * c.rotation as usize + 3 * c.scaling as usize
    }

    /// Render one sample, without the trailing `;`.
    pub fn render(self, sample: &TransformSample) -> String {
        let c = self.channels();
        let p = sample.position;
        let r = sample.rotation;
        let s = sample.scale;

        let mut args: Vec<f64> = Vec::with_capacity(self.arity());
        if c.position {
            args.extend([p.x, p.y, p.z]);
        }
        if c.rotation {
            args.extend([r.x, r.y, r.z, r.w]);
        }
        if c.scaling {
            args.extend([s.x, s.y, s.z]);
        }

        let mut out = String::with_capacity(16 + args.len() * 10);
        out.push_str(self.call_name());
        out.push('(');
        for (i, v) in args.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}", FloatLiteral(*v));
        }
        out.push(')');
        out
    }

    /// Render every frame of a sequence, in frame order.
    pub fn render_sequence(self, sequence: &Sequence) -> Vec<String> {
        sequence.samples().iter().map(|s| self.render(s)).collect()
    }
}

impl From<Channels> for RecordLayout {
    fn from(channels: Channels) -> Self {
        Self::from_channels(channels)
    }
}
