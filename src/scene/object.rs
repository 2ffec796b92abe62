//! Scene objects and their transform keys.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::SceneNode;
use crate::util::{DMat4, DQuat, DVec3};

/// Object type. Only meshes carry exportable sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Mesh,
    Empty,
    Camera,
    Light,
    Armature,
    #[serde(other)]
    Other,
}

/// Local transform at one key frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformKey {
    /// Full local matrix, column-major.
    Matrix { matrix: [f64; 16] },
    Parts(TransformParts),
}

/// Separate location/rotation/scale parts; missing parts are identity.
/// Unknown fields are rejected so a malformed `matrix` key cannot fall
/// through to an identity transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformParts {
    pub location: [f64; 3],
    /// Quaternion x, y, z, w.
    pub rotation: [f64; 4],
    pub scale: [f64; 3],
}

impl Default for TransformParts {
    fn default() -> Self {
        Self {
            location: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

impl Default for TransformKey {
    fn default() -> Self {
        Self::Parts(TransformParts::default())
    }
}

impl TransformKey {
    pub fn from_matrix(m: &DMat4) -> Self {
        Self::Matrix { matrix: m.to_cols_array() }
    }

    pub fn matrix(&self) -> DMat4 {
        match self {
            Self::Matrix { matrix } => DMat4::from_cols_array(matrix),
            Self::Parts(p) => DMat4::from_scale_rotation_translation(
                DVec3::from_array(p.scale),
                DQuat::from_array(p.rotation).normalize(),
                DVec3::from_array(p.location),
            ),
        }
    }
}

/// One object of the scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub selected: bool,
    /// Stepped keys by frame number.
    pub keys: BTreeMap<i32, TransformKey>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }

    /// Add or replace a key, builder style.
    pub fn with_key(mut self, frame: i32, key: TransformKey) -> Self {
        self.keys.insert(frame, key);
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Local transform at `frame`: the latest key at or before it.
    /// `None` before the first key.
    pub fn transform_at(&self, frame: i32) -> Option<DMat4> {
        self.keys
            .range(..=frame)
            .next_back()
            .map(|(_, key)| key.matrix())
    }
}

impl SceneNode for SceneObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_exportable(&self) -> bool {
        self.kind == ObjectKind::Mesh
    }
}
