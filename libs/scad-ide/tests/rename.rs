//! Rename through the full pipeline: prepare, edit computation and
//! atomic application.

use scad_ide::rename::apply_edits;
use scad_ide::{prepare_rename, provide_rename_edits, CancellationToken, RenameError, Session};

#[test]
fn rename_variable_everywhere() {
    let source = "height = 20;\nbracket(height);\nplate(height + 5);";
    let session = Session::new(source);

    let edits = provide_rename_edits(&session, 0, "depth").expect("edits");
    assert_eq!(edits.len(), 3);
    assert_eq!(
        apply_edits(source, &edits),
        "depth = 20;\nbracket(depth);\nplate(depth + 5);"
    );
}

#[test]
fn rename_reaches_into_primitive_arguments() {
    let source = "height = 20;\ncylinder(h=height, r=1);";
    let session = Session::new(source);

    let edits = provide_rename_edits(&session, 0, "depth").expect("edits");
    assert_eq!(edits.len(), 2);
    assert_eq!(
        apply_edits(source, &edits),
        "depth = 20;\ncylinder(h=depth, r=1);"
    );
}

#[test]
fn rename_module_from_call_site() {
    let source = "module m() { cube(1); }\nm();\nm();";
    let session = Session::new(source);
    let call_offset = source.rfind("m()").unwrap();

    let edits = provide_rename_edits(&session, call_offset, "n").expect("edits");
    assert_eq!(edits.len(), 3);

    let renamed = apply_edits(source, &edits);
    assert_eq!(renamed, "module n() { cube(1); }\nn();\nn();");
    // Single-letter rename must not touch containing text.
    assert!(!renamed.contains("nn"));
}

#[test]
fn rename_is_all_or_nothing() {
    let source = "size = 4;\nbracket(size);";
    let session = Session::new(source);

    // A reserved target name yields no edits at all, never a subset.
    assert_eq!(provide_rename_edits(&session, 0, "for"), None);
    assert_eq!(provide_rename_edits(&session, 0, "sphere"), None);
    assert_eq!(session.source(), source);
}

#[test]
fn builtin_constant_cannot_be_renamed() {
    let source = "circumference = 2 * PI * r;\nr = 3;";
    let session = Session::new(source);
    let offset = source.find("PI").unwrap();
    let token = CancellationToken::new();

    assert_eq!(
        prepare_rename(&session, offset, &token),
        Err(RenameError::CannotRenameConstant("PI".to_string()))
    );
    assert_eq!(provide_rename_edits(&session, offset, "TAU"), None);
}

#[test]
fn rename_for_binding_stays_in_loop() {
    let source = "i = 99;\nfor (i = [0:3]) bracket(i);";
    let session = Session::new(source);
    let binder_offset = source.find("(i =").unwrap() + 1;

    let edits = provide_rename_edits(&session, binder_offset, "step").expect("edits");
    assert_eq!(edits.len(), 2);
    assert_eq!(
        apply_edits(source, &edits),
        "i = 99;\nfor (step = [0:3]) bracket(step);"
    );
}

#[test]
fn rename_survives_incremental_edit() {
    let mut session = Session::new("w = 1;\nbracket(w);");

    let new_text = "w = 2;\nbracket(w);";
    session.update(new_text, 4, 5, 5);

    let edits = provide_rename_edits(&session, 0, "width").expect("edits");
    assert_eq!(edits.len(), 2);
    assert_eq!(apply_edits(new_text, &edits), "width = 2;\nbracket(width);");
}

#[test]
fn edits_serialize_for_the_editor() {
    let session = Session::new("size = 4;\nbracket(size);");
    let edits = provide_rename_edits(&session, 0, "width").expect("edits");

    let json = serde_json::to_string(&edits).expect("serializable");
    assert!(json.contains("\"new_text\":\"width\""));
}

#[test]
fn cancelled_prepare_reports_nothing() {
    let session = Session::new("size = 4;");
    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(prepare_rename(&session, 0, &token), Ok(None));
}
