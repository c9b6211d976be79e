//! End-to-end tests for the `tree` command.
//!
//! These tests invoke the actual CLI binary and validate the behavior of the
//! `tree` subcommand from a user's perspective.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_tree_help() {
    let mut cmd = cargo_bin_cmd!("cocos-components");

    cmd.arg("tree")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Display the dependency tree of a component",
        ));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_tree_shows_shared_dependencies_under_each_parent() {
    let fixture = TestFixture::new().with_sample_library().initialized();

    let output = fixture
        .command()
        .args(["tree", "button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency tree for: button"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("core").count(), 2);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_tree_depth_limits_expansion() {
    let fixture = TestFixture::new().with_sample_library().initialized();

    fixture
        .command()
        .args(["tree", "button", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tween"))
        .stdout(predicate::str::contains("core").not());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_tree_marks_cycles() {
    let fixture = TestFixture::new()
        .with_file(
            "library/components/registry.json",
            r#"{ "components": [
                { "name": "a", "path": "a" },
                { "name": "b", "path": "b" }
            ] }"#,
        )
        .with_component("a", r#"{ "name": "a", "type": "logic", "dependencies": ["b"] }"#, &[])
        .with_component("b", r#"{ "name": "b", "type": "logic", "dependencies": ["a"] }"#, &[])
        .initialized();

    fixture
        .command()
        .args(["tree", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a (cycle)"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_tree_unknown_component() {
    let fixture = TestFixture::new().with_sample_library().initialized();

    fixture
        .command()
        .args(["tree", "twen"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Did you mean 'tween'?"));
}
