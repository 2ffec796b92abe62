//! Integration tests for exporting scene documents to Anima scripts.

use anima_export::prelude::*;

use tempfile::tempdir;

const DOOR_SCENE: &str = r#"{
    "timeline": { "frame_start": 0, "frame_end": 9, "frame_current": 4, "fps": 30, "fps_base": 1 },
    "objects": [
        { "name": "Door", "kind": "mesh", "selected": true,
          "keys": {
            "0": { "location": [0, 0, 0] },
            "3": { "location": [0, 0, 0], "rotation": [0, 0, 0.3826834323650898, 0.9238795325112867] },
            "6": { "location": [0, 0, 0], "rotation": [0, 0, 0.7071067811865476, 0.7071067811865476] }
          } },
        { "name": "Frame", "kind": "mesh", "selected": true,
          "keys": { "0": { "location": [1, 2, 3] } } },
        { "name": "Camera", "kind": "camera", "selected": true,
          "keys": { "0": {} } },
        { "name": "Handle", "kind": "mesh", "selected": false,
          "keys": { "5": { "location": [0, 0, 1] } } }
    ]
}"#;

fn door_scene() -> SceneDocument {
    SceneDocument::from_json(DOOR_SCENE).expect("Failed to parse scene")
}

fn config_for(scene: &SceneDocument) -> ExportConfig {
    ExportConfig::default().with_timeline(&scene.timeline.timeline())
}

#[test]
fn test_export_file_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("door.cs");

    let mut scene = door_scene();
    let config = config_for(&scene);
    let stats = scene.export_to_path(&[], &config, &path).expect("Export failed");

    assert_eq!(stats.objects, 2, "camera must be skipped, handle is unselected");
    assert_eq!(scene.timeline.frame_current, 4, "frame cursor must be restored");

    let text = std::fs::read_to_string(&path).expect("Failed to read output");
    println!("{}", text);

    assert!(text.starts_with("using AnimaScript;\n\nnamespace AnimaData\n{\n"));
    assert!(text.ends_with("}\n"));
    assert_eq!(text.matches("namespace ").count(), 1);
    assert!(text.contains("    public class Seq_Door : AnimaSeqBase\n"));
    assert!(text.contains("    public class Seq_Frame : AnimaSeqBase\n"));
    assert!(!text.contains("Seq_Camera"));

    // Door: 0..2 identical, 3..5 identical, 6..9 identical
    assert!(text.contains("PInit(\"Seq_Door\",0,9,30f,2,6);"));
    // Frame never moves
    assert!(text.contains("PInit(\"Seq_Frame\",0,9,30f,0,0);"));
    assert!(text.contains("            PLocRotScale(-1f,3f,2f,0f,0f,0f,1f,1f,1f,1f);\n"));
}

#[test]
fn test_door_kept_frames() {
    let mut scene = door_scene();
    let config = config_for(&scene);
    let mut out = Vec::new();
    let stats = scene.export(&["Door".to_string()], &config, &mut out).expect("Export failed");

    let door = &stats.sequences[0];
    assert_eq!(door.kept, CompressedRange { keep_start: 2, keep_end: 6 });
    assert_eq!(door.instructions, 5);
    assert_eq!(stats.frames_sampled, 10);

    let text = String::from_utf8(out).expect("utf8");
    let body: Vec<&str> = text
        .lines()
        .filter(|l| l.trim_start().starts_with("PLocRotScale("))
        .collect();
    assert_eq!(body.len(), 5);
    // Host Z rotation becomes runtime Y rotation
    let last = body[4].trim_start();
    assert!(last.starts_with("PLocRotScale(0f,0f,0f,0f,0.707"), "{}", last);
    assert!(last.contains("f,0f,0.707"), "{}", last);
}

#[test]
fn test_offset_shifts_frame_numbers() {
    let mut scene = door_scene();
    let base = config_for(&scene);
    let shifted = ExportConfig { frame_offset: -5, ..base.clone() };

    let mut a = Vec::new();
    let mut b = Vec::new();
    let sa = scene.export(&["Door".to_string()], &base, &mut a).expect("Export failed");
    let sb = scene.export(&["Door".to_string()], &shifted, &mut b).expect("Export failed");

    let b = String::from_utf8(b).expect("utf8");
    assert!(b.contains("PInit(\"Seq_Door\",-5,4,30f,-3,1);"));
    assert_eq!(sa.instructions, sb.instructions);
}

#[test]
fn test_channel_selection() {
    let mut scene = door_scene();
    let config = ExportConfig {
        channels: Channels::new(true, false, false),
        ..config_for(&scene)
    };
    let mut out = Vec::new();
    scene.export(&["Frame".to_string()], &config, &mut out).expect("Export failed");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.contains("            PLocation(-1f,3f,2f);\n"));
    assert!(!text.contains("PLocRotScale"));
}

#[test]
fn test_location_only_door_is_static() {
    // The door only rotates, so its location never changes
    let mut scene = door_scene();
    let config = ExportConfig {
        channels: Channels::new(true, false, false),
        ..config_for(&scene)
    };
    let mut out = Vec::new();
    let stats = scene.export(&["Door".to_string()], &config, &mut out).expect("Export failed");
    assert!(stats.sequences[0].kept.is_single());
    assert!(String::from_utf8(out).unwrap().contains("PLocation(0f,0f,0f);"));
}

#[test]
fn test_missing_key_aborts_batch() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.cs");

    // Handle has no key before frame 5
    let mut scene = door_scene();
    let config = config_for(&scene);
    let names = ["Door".to_string(), "Handle".to_string(), "Frame".to_string()];
    let err = scene.export_to_path(&names, &config, &path).unwrap_err();

    assert!(matches!(err, Error::MissingTransform { ref object, frame: 0 } if object == "Handle"));
    assert!(err.is_contract_violation());
    assert!(!path.exists(), "no output file on failure");
    assert_eq!(scene.timeline.frame_current, 4);
}

#[test]
fn test_no_eligible_selection() {
    let mut scene = door_scene();
    let config = config_for(&scene);
    let mut out = Vec::new();
    let err = scene.export(&["Camera".to_string()], &config, &mut out).unwrap_err();
    assert!(matches!(err, Error::NoSelection));
    assert!(out.is_empty());
}

#[test]
fn test_unknown_object_name() {
    let mut scene = door_scene();
    let config = config_for(&scene);
    let err = scene
        .export(&["Window".to_string()], &config, &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, Error::ObjectNotFound(ref n) if n == "Window"));
}

#[test]
fn test_scene_and_config_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let scene_path = dir.path().join("door.json");
    let config_path = dir.path().join("export.json");
    let out_path = dir.path().join("door.cs");

    std::fs::write(&scene_path, DOOR_SCENE).expect("write scene");
    std::fs::write(
        &config_path,
        r#"{ "namespace": "Hangar", "class_name": "Anim@Seq", "frame_end": 5 }"#,
    )
    .expect("write config");

    let mut scene = SceneDocument::open(&scene_path).expect("open scene");
    let config = config_for(&scene).overlay_file(&config_path).expect("load config");
    assert_eq!(config.frame_rate, 30.0, "timeline rate survives the overlay");

    scene.export_to_path(&[], &config, &out_path).expect("Export failed");
    let text = std::fs::read_to_string(&out_path).expect("read output");
    assert!(text.contains("namespace Hangar\n"));
    assert!(text.contains("public class AnimDoorSeq : AnimaSeqBase"));
    assert!(text.contains("PInit(\"AnimDoorSeq\",0,5,30f,2,3);"));
}
