use crate::common::EncoreTest;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

#[test]
fn test_latest_picks_highest_prefixed_tag() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "v0.9.0", "v1.0.0", "nightly", "v0.10.2"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.0.0\n");
}

#[test]
fn test_latest_keeps_first_of_equal_versions() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "v0.9.0", "v1.0.0", "v1.0.0-beta"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.0.0\n");

    let result = test.encore(&["latest", "v1.0", "v1.0.0"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.0\n");
}

#[test]
fn test_latest_json() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "v2.1", "v2.0.5", "--format", "json"]);
    result.assert_success();
    assert_snapshot!(result.stdout().trim_end(), @r#"
    {
      "tag": "v2.1",
      "version": "2.1"
    }
    "#);
}

#[test]
fn test_latest_without_prefixed_tags() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "1.0.0", "release-2"]);
    result.assert_failure();
    assert_eq!(result.stdout(), "");
    assert!(
        result.stderr().contains("None of the 2 tags start with `v`"),
        "{}",
        result.stderr()
    );
}

#[test]
fn test_latest_prefix_is_case_sensitive() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "V9.0.0", "v1.0.0"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.0.0\n");
}

#[test]
fn test_latest_flags_after_tags() {
    let test = EncoreTest::new();
    let result = test.encore(&["latest", "v1.0", "v1.1", "-q", "--color", "never"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.1\n");
}
