//! End-to-end tests for the `init` command.

mod common;
use common::prelude::*;

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_init_with_local_library() {
    let fixture = TestFixture::new().with_sample_library();

    fixture
        .command()
        .args(["init", "--library", "library", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created .cocos-components.yaml"))
        .stdout(predicate::str::contains("4 component(s) available"));

    fixture
        .child(".cocos-components.yaml")
        .assert(predicate::str::contains("library_path: library"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_init_outside_cocos_project() {
    let fixture = TestFixture::bare();

    fixture
        .command()
        .args(["init", "--repository", "org/components", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a Cocos Creator project"))
        .stderr(predicate::str::contains("--skip-project-check"));
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_init_refuses_to_overwrite_without_force() {
    let fixture = TestFixture::new().with_sample_library().initialized();

    fixture
        .command()
        .args(["init", "--library", "library", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    fixture
        .command()
        .args(["init", "--library", "library", "--yes", "--force"])
        .assert()
        .success();
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_init_repository_and_library_conflict() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["init", "--library", "library", "--repository", "org/kit"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
