use crate::common::EncoreTest;
use insta::assert_snapshot;
use mockito::{Mock, ServerGuard};
use pretty_assertions::assert_eq;

const RELEASES: &str = include_str!("../../../encore-release/testdata/releases.json");

fn mock_releases(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/releases")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("cache-control", "public, max-age=600")
        .with_header("etag", "\"releases-v1\"")
        .with_body(RELEASES)
}

fn check_test(server: &ServerGuard) -> EncoreTest {
    let mut test = EncoreTest::new();
    test.use_releases_url(format!("{}/releases", server.url()));
    test
}

#[test]
fn test_check_update_available() {
    let mut server = mockito::Server::new();
    let mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    let result = test.encore(&["check", "--current", "1.1.0"]);
    result.assert_success();
    // Prereleases are eligible by default, and `0-beta` reads as 0 so the beta ranks above 1.2.0.
    assert_snapshot!(result.stdout().trim_end(), @r"
    Update available: 1.1.0 -> 1.2.0-beta.1
    Encore 1.2.0 beta 1: https://github.com/encore-player/encore/releases/tag/v1.2.0-beta.1
    ");
    mock.assert();
}

#[test]
fn test_check_excludes_prereleases() {
    let mut server = mockito::Server::new();
    let _mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    test.encore(&["prefs", "set", "include_prereleases", "false"])
        .assert_success();

    let result = test.encore(&["check", "--current", "1.1.0"]);
    result.assert_success();
    assert_snapshot!(result.stdout().trim_end(), @r"
    Update available: 1.1.0 -> 1.2.0
    Encore 1.2.0: https://github.com/encore-player/encore/releases/tag/v1.2.0
    ");
}

#[test]
fn test_check_up_to_date() {
    let mut server = mockito::Server::new();
    let _mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    let result = test.encore(&["check", "--current", "1.3"]);
    result.assert_success();
    assert_eq!(
        result.stdout(),
        "1.3 is up to date (latest release: 1.2.0-beta.1)\n"
    );
}

#[test]
fn test_check_same_version_is_up_to_date() {
    let mut server = mockito::Server::new();
    let _mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    test.encore(&["prefs", "set", "include_prereleases", "no"])
        .assert_success();

    let result = test.encore(&["check", "--current", "1.2"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.2 is up to date (latest release: 1.2.0)\n");
}

#[test]
fn test_check_json() {
    let mut server = mockito::Server::new();
    let _mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    let result = test.encore(&["check", "--current", "1.0", "--format", "json"]);
    result.assert_success();

    let status: serde_json::Value = serde_json::from_str(&result.stdout()).unwrap();
    assert_eq!(status["status"], "available");
    assert_eq!(status["current"], "1.0");
    assert_eq!(status["latest"], "1.2.0-beta.1");
    assert_eq!(status["release"]["tag_name"], "v1.2.0-beta.1");
    assert_eq!(status["release"]["prerelease"], true);
}

#[test]
fn test_check_records_last_seen_version() {
    let mut server = mockito::Server::new();
    let _mock = mock_releases(&mut server).create();
    let test = check_test(&server);

    test.encore(&["check", "--current", "1.0"]).assert_success();

    let result = test.encore(&["prefs", "get", "last_seen_version"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.2.0-beta.1\n");

    let prefs: serde_json::Value =
        serde_json::from_str(&fs_read(&test.preferences_file())).unwrap();
    assert_eq!(prefs["last_seen_version"], "1.2.0-beta.1");
}

#[test]
fn test_check_uses_cached_releases() {
    let mut server = mockito::Server::new();
    let mock = mock_releases(&mut server).expect(1).create();
    let test = check_test(&server);

    test.encore(&["check", "--current", "1.0"]).assert_success();
    let result = test.encore(&["check", "--current", "1.0"]);
    result.assert_success();
    assert!(result.stdout().starts_with("Update available: 1.0 -> "));

    mock.assert();
    assert!(test.cache_dir().join("releases").is_dir());
}

#[test]
fn test_check_no_cache_refetches() {
    let mut server = mockito::Server::new();
    let mock = mock_releases(&mut server).expect(2).create();
    let test = check_test(&server);

    test.encore(&["--no-cache", "check", "--current", "1.0"])
        .assert_success();
    test.encore(&["--no-cache", "check", "--current", "1.0"])
        .assert_success();

    mock.assert();
    assert!(!test.cache_dir().join("releases").exists());
}

#[test]
fn test_check_disabled() {
    let mut server = mockito::Server::new();
    let mock = mock_releases(&mut server).expect(0).create();
    let test = check_test(&server);

    test.encore(&["prefs", "set", "check_for_updates", "off"])
        .assert_success();

    let result = test.encore(&["check", "--current", "1.0"]);
    result.assert_success();
    assert_eq!(
        result.stdout(),
        "Update checks are turned off. Run `encore prefs set check_for_updates true` or pass --force.\n"
    );
    mock.assert();
}

#[test]
fn test_check_disabled_with_force() {
    let mut server = mockito::Server::new();
    let mock = mock_releases(&mut server).expect(1).create();
    let test = check_test(&server);

    test.encore(&["prefs", "set", "check_for_updates", "false"])
        .assert_success();

    let result = test.encore(&["check", "--current", "1.0", "--force"]);
    result.assert_success();
    assert!(result.stdout().starts_with("Update available: 1.0 -> "));
    mock.assert();
}

#[test]
fn test_check_server_error_without_cache() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/releases").with_status(503).create();
    let test = check_test(&server);

    let result = test.encore(&["check", "--current", "1.0"]);
    result.assert_success();
    assert_eq!(result.stdout(), "1.0 is up to date\n");
    assert!(
        result.stderr().contains("No releases found"),
        "{}",
        result.stderr()
    );
}

#[test]
fn test_check_without_feed() {
    let test = EncoreTest::new();
    let result = test.encore(&["check", "--current", "0.1"]);
    result.assert_success();
    assert_eq!(result.stdout(), "0.1 is up to date\n");
}

#[test]
fn test_check_invalid_repository_preference() {
    let test = EncoreTest::new();
    fs_err::create_dir_all(test.config_dir()).unwrap();
    fs_err::write(
        test.preferences_file(),
        r#"{ "update_repository": "not a repository" }"#,
    )
    .unwrap();

    let result = test.encore(&["check"]);
    result.assert_failure();
    assert!(
        result
            .stderr()
            .contains("The update_repository preference is invalid"),
        "{}",
        result.stderr()
    );
}

fn fs_read(path: &camino::Utf8Path) -> String {
    fs_err::read_to_string(path).unwrap()
}
