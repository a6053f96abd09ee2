use crate::common::EncoreTest;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

#[test]
fn test_compare_newer() {
    let test = EncoreTest::new();
    let result = test.encore(&["compare", "1.2.0", "1.1.9"]);
    result.assert_success();
    assert_eq!(result.stdout(), "newer\n");
}

#[test]
fn test_compare_not_newer() {
    let test = EncoreTest::new();
    for (candidate, baseline) in [
        ("1.0.0", "1.0.0"),
        ("1.0", "1.0.0"),
        ("1.0.0", "1.0"),
        ("1.9", "1.10"),
        ("1.0.0-beta", "1.0.0"),
        ("", ""),
    ] {
        let result = test.encore(&["compare", candidate, baseline]);
        result.assert_success();
        assert_eq!(
            result.stdout(),
            "not newer\n",
            "{candidate:?} vs {baseline:?}"
        );
    }
}

#[test]
fn test_compare_malformed_segments() {
    let test = EncoreTest::new();
    let result = test.encore(&["compare", "1.x.1", "1.0.0"]);
    result.assert_success();
    assert_eq!(result.stdout(), "newer\n");

    let result = test.encore(&["compare", "--", "-1", "0"]);
    result.assert_success();
    assert_eq!(result.stdout(), "not newer\n");
}

#[test]
fn test_compare_json() {
    let test = EncoreTest::new();
    let result = test.encore(&["compare", "2.0", "1.99.99", "--format", "json"]);
    result.assert_success();
    assert_snapshot!(result.stdout().trim_end(), @r#"
    {
      "candidate": "2.0",
      "baseline": "1.99.99",
      "newer": true
    }
    "#);
}

#[test]
fn test_compare_requires_two_versions() {
    let test = EncoreTest::new();
    let result = test.encore(&["compare", "1.0"]);
    result.assert_failure();
    assert!(result.stderr().contains("<BASELINE>"), "{}", result.stderr());
}
