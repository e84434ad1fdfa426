use scad_ast::{parse_to_ast, AstNode, BooleanKind, CubeSize, ParamValue, TransformKind};

#[test]
fn builds_primitives_with_typed_parameters() {
    let src = "cube([10, 20, 30], center=true); sphere(d=8);";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());
    assert_eq!(ast.len(), 2);

    match &ast[0] {
        AstNode::Cube { size, center, .. } => {
            assert_eq!(*size, Some(CubeSize::Vector(vec![10.0, 20.0, 30.0])));
            assert_eq!(*center, Some(true));
        }
        other => panic!("expected Cube, got {other:?}"),
    }
    match &ast[1] {
        AstNode::Sphere { r, .. } => assert_eq!(*r, Some(4.0)),
        other => panic!("expected Sphere, got {other:?}"),
    }
}

#[test]
fn builds_transform_chain() {
    let src = "translate([1,2,3]) rotate(45) cube(1);";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());

    match &ast[0] {
        AstNode::Transform { kind, children, .. } => {
            assert_eq!(*kind, TransformKind::Translate);
            match &children[0] {
                AstNode::Transform { kind, argument, children, .. } => {
                    assert_eq!(*kind, TransformKind::Rotate);
                    assert_eq!(*argument, Some(ParamValue::Number(45.0)));
                    assert!(matches!(children[0], AstNode::Cube { .. }));
                }
                other => panic!("expected inner Transform, got {other:?}"),
            }
        }
        other => panic!("expected Transform, got {other:?}"),
    }
}

#[test]
fn builds_boolean_tree_in_source_order() {
    let src = "difference() { cube(10); translate([5,5,5]) sphere(3); }";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());

    match &ast[0] {
        AstNode::BooleanOp { op, children, .. } => {
            assert_eq!(*op, BooleanKind::Difference);
            assert!(matches!(children[0], AstNode::Cube { .. }));
            assert!(matches!(children[1], AstNode::Transform { .. }));
        }
        other => panic!("expected BooleanOp, got {other:?}"),
    }
}

#[test]
fn builds_definitions_and_calls() {
    let src = "module mount(w=10) { cube(w); }\nmount(w=20);";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());
    assert_eq!(ast.len(), 2);

    match &ast[0] {
        AstNode::ModuleDefinition { name, params, .. } => {
            assert_eq!(name, "mount");
            assert_eq!(params[0].name, "w");
        }
        other => panic!("expected ModuleDefinition, got {other:?}"),
    }
    match &ast[1] {
        AstNode::ModuleCall { name, parameters, .. } => {
            assert_eq!(name, "mount");
            assert_eq!(parameters[0].value, ParamValue::Number(20.0));
        }
        other => panic!("expected ModuleCall, got {other:?}"),
    }
}

#[test]
fn builds_control_flow() {
    let src = "for (i = [0:2:10]) translate([i, 0, 0]) cube(1);";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());

    match &ast[0] {
        AstNode::For { bindings, body, .. } => {
            assert_eq!(bindings[0].name, "i");
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected For, got {other:?}"),
    }
}

#[test]
fn special_variable_assignment_is_marked() {
    let src = "$fn = 64;";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());

    match &ast[0] {
        AstNode::Assignment { name, special, .. } => {
            assert_eq!(name, "fn");
            assert!(special);
        }
        other => panic!("expected Assignment, got {other:?}"),
    }
}

#[test]
fn include_and_use_differ_in_body_execution() {
    let src = "include <lib/shapes.scad>;\nuse <util.scad>;";
    let (ast, diagnostics) = parse_to_ast(src);
    assert!(!diagnostics.has_errors());

    match (&ast[0], &ast[1]) {
        (
            AstNode::Include { path: p1, executes_body: e1, .. },
            AstNode::Include { path: p2, executes_body: e2, .. },
        ) => {
            assert_eq!(p1, "lib/shapes.scad");
            assert!(e1);
            assert_eq!(p2, "util.scad");
            assert!(!e2);
        }
        other => panic!("expected two Includes, got {other:?}"),
    }
}
