//! Snapshot JSON shape for non-Rust hosts

use blocktris::core::{ScriptedSource, Session};
use blocktris::types::PieceKind;
use serde_json::Value;

#[test]
fn snapshot_serializes_with_camel_case_fields() {
    let mut src = ScriptedSource::repeat(PieceKind::I);
    let session = Session::new().start(&mut src).session;
    let session = session.hard_drop(&mut src).session;

    let json = serde_json::to_value(session.snapshot()).unwrap();

    assert_eq!(json["status"], "playing");
    assert_eq!(json["score"], 0);
    assert_eq!(json["board"].as_array().unwrap().len(), 20);
    assert_eq!(json["board"][19][3], "cyan");
    assert_eq!(json["board"][0][3], Value::Null);
    assert_eq!(json["activePieceOverlay"][0][3], "cyan");
    assert_eq!(json["active"]["kind"], "I");
    assert_eq!(json["active"]["row"], 0);
    assert_eq!(json["active"]["cells"].as_array().unwrap().len(), 4);
    assert_eq!(json["active"]["cells"][0], serde_json::json!([3, 0]));
}

#[test]
fn idle_snapshot_has_no_active_piece() {
    let json = serde_json::to_value(Session::new().snapshot()).unwrap();
    assert_eq!(json["status"], "idle");
    assert_eq!(json["active"], Value::Null);
}
