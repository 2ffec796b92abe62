//! JSON scene document.
//!
//! Stand-in for a live 3D host: objects with stepped transform keys plus a
//! timeline carrying the current-frame cursor. Enough to drive an export
//! from the command line or from tests.
//!
//! ```json
//! {
//!   "timeline": { "frame_start": 0, "frame_end": 10, "frame_current": 1, "fps": 24 },
//!   "objects": [
//!     { "name": "Cube", "kind": "mesh", "selected": true,
//!       "keys": { "0": { "location": [0, 0, 1] }, "5": { "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 2,0,0,1] } } }
//!   ]
//! }
//! ```

mod object;

pub use object::{ObjectKind, SceneObject, TransformKey, TransformParts};

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::core::{ExportConfig, FrameCursor, Timeline, TransformProvider};
use crate::export::{export_sequences, ExportStats};
use crate::util::{DMat4, Error, Result};

/// Timeline section of the document. Owns the current-frame cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTimeline {
    pub frame_start: i32,
    pub frame_end: i32,
    pub frame_current: i32,
    pub fps: f64,
    pub fps_base: f64,
}

impl Default for SceneTimeline {
    fn default() -> Self {
        let t = Timeline::default();
        Self {
            frame_start: t.frame_start,
            frame_end: t.frame_end,
            frame_current: t.frame_start,
            fps: t.fps,
            fps_base: t.fps_base,
        }
    }
}

impl SceneTimeline {
    pub fn timeline(&self) -> Timeline {
        Timeline {
            frame_start: self.frame_start,
            frame_end: self.frame_end,
            fps: self.fps,
            fps_base: self.fps_base,
        }
    }
}

impl FrameCursor for SceneTimeline {
    fn current_frame(&self) -> i32 {
        self.frame_current
    }

    fn set_current_frame(&mut self, frame: i32) {
        self.frame_current = frame;
    }
}

impl TransformProvider<SceneObject> for SceneTimeline {
    fn local_transform(&self, object: &SceneObject, frame: i32) -> Option<DMat4> {
        object.transform_at(frame)
    }
}

/// A parsed scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDocument {
    pub timeline: SceneTimeline,
    pub objects: Vec<SceneObject>,
}

impl SceneDocument {
    /// Read a scene document from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("reading scene {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Objects to export: the named ones, or every selected object when
    /// `names` is empty. Unknown names are an error.
    ///
    /// Eligibility (mesh only) is not checked here; the export driver
    /// filters and reports an empty result.
    pub fn selection(&self, names: &[String]) -> Result<Vec<&SceneObject>> {
        select_from(&self.objects, names)
    }

    /// Split into the cursor-owning timeline and the object list, so objects
    /// can be borrowed while the cursor moves.
    pub fn parts_mut(&mut self) -> (&mut SceneTimeline, &[SceneObject]) {
        (&mut self.timeline, &self.objects)
    }

    /// Export the selection (see [`selection`](Self::selection)) to `out`.
    pub fn export<W: Write + ?Sized>(
        &mut self,
        names: &[String],
        config: &ExportConfig,
        out: &mut W,
    ) -> Result<ExportStats> {
        let (timeline, objects) = self.parts_mut();
        let selection = select_from(objects, names)?;
        export_sequences(timeline, &selection[..], config, out)
    }

    /// Export the selection into a file. Nothing is written on failure.
    pub fn export_to_path(
        &mut self,
        names: &[String],
        config: &ExportConfig,
        path: impl AsRef<Path>,
    ) -> Result<ExportStats> {
        let mut buf = Vec::new();
        let stats = self.export(names, config, &mut buf)?;
        std::fs::write(path, &buf)?;
        Ok(stats)
    }
}

fn select_from<'a>(objects: &'a [SceneObject], names: &[String]) -> Result<Vec<&'a SceneObject>> {
    if names.is_empty() {
        return Ok(objects.iter().filter(|o| o.selected).collect());
    }
    names
        .iter()
        .map(|n| {
            objects
                .iter()
                .find(|o| &o.name == n)
                .ok_or_else(|| Error::ObjectNotFound(n.clone()))
        })
        .collect()
}
