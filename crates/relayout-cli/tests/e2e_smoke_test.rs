use std::{fs, path::PathBuf};

use tempfile::tempdir;

use relayout::{
    geometry::{Point, Size},
    semantic::{Diagram, Node},
};
use relayout_cli::{Args, run};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn args(input: &PathBuf, output: &PathBuf, changes: Option<&PathBuf>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        changes: changes.map(|path| path.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

fn read_output(path: &PathBuf) -> Diagram {
    let content = fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&content).expect("Output is a valid snapshot")
}

fn find<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find_map(|node| {
        if node.id() == id {
            Some(node)
        } else {
            find(node.child_nodes(), id)
        }
    })
}

fn assert_fully_placed(nodes: &[Node]) {
    for node in nodes {
        assert!(!node.position().is_unset(), "`{}` has no position", node.id());
        assert!(!node.size().is_unset(), "`{}` has no size", node.id());
        assert_fully_placed(node.child_nodes());
    }
}

#[test]
fn e2e_smoke_test_fresh_snapshot() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    run(&args(&fixture("package.json"), &output, None)).expect("Layout succeeds");

    let diagram = read_output(&output);
    assert_fully_placed(diagram.nodes());

    // The image file does not exist, so the default image size is scaled.
    let logo = find(diagram.nodes(), "logo").unwrap();
    assert_eq!(logo.size(), Size::new(50.0, 50.0));

    let note = find(diagram.nodes(), "note").unwrap();
    assert_eq!(note.size(), Size::new(120.0, 60.0));

    // Style metadata comes back exactly as it went in.
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written["nodes"][0]["style"],
        serde_json::json!({
            "kind": "rectangle",
            "color": "#ffffff",
            "borderColor": "#000000",
            "borderSize": 1,
            "borderRadius": 3
        })
    );
    assert_eq!(
        written["nodes"][2]["style"],
        serde_json::json!({ "kind": "note", "color": "#fff59d" })
    );

    let uses = &diagram.edges()[0];
    assert_eq!(uses.routing_points().len(), 2);
    assert!(!uses.center_label().unwrap().position().is_unset());

    let dangling = &diagram.edges()[1];
    assert_eq!(
        dangling.routing_points(),
        &[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]
    );
}

#[test]
fn e2e_smoke_test_second_pass_is_stable() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let first = temp_dir.path().join("first.json");
    let second = temp_dir.path().join("second.json");

    run(&args(&fixture("package.json"), &first, None)).expect("First pass succeeds");
    run(&args(&first, &second, None)).expect("Second pass succeeds");

    assert_eq!(read_output(&first), read_output(&second));
}

#[test]
fn e2e_smoke_test_applies_changes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");
    let changes = fixture("package.changes.json");

    run(&args(&fixture("package.json"), &output, Some(&changes))).expect("Layout succeeds");

    let diagram = read_output(&output);
    assert_fully_placed(diagram.nodes());

    let class_b = find(diagram.nodes(), "class-b").unwrap();
    assert_eq!(class_b.position(), Point::new(320.0, 240.0));

    let package = find(diagram.nodes(), "package").unwrap();
    assert!(package.size().width() >= 320.0 + class_b.size().width());
    assert!(package.size().height() >= 240.0 + class_b.size().height());

    let note = find(diagram.nodes(), "note").unwrap();
    assert_eq!(note.size(), Size::new(200.0, 90.0));
}

#[test]
fn e2e_smoke_test_error_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut unexpectedly_succeeded = Vec::new();
    for name in ["duplicate-ids.json", "malformed.json", "does-not-exist.json"] {
        let output = temp_dir.path().join(format!("error_{name}"));
        if run(&args(&fixture(name), &output, None)).is_ok() {
            unexpectedly_succeeded.push(name);
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "error fixtures succeeded unexpectedly: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");
    let mut args = args(&fixture("package.json"), &output, None);
    args.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());

    assert!(run(&args).is_err());
    assert!(!output.exists());
}
