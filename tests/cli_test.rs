//! Tests of the command-line binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const TWEETS: &str = r#"{"id_str":"1","id":1,"text":"hello #foo","user":{"id_str":"u1","id":1,"screen_name":"alice"},"entities":{"hashtags":[{"text":"foo"}],"symbols":[],"user_mentions":[],"urls":[{"url":"https://t.co/a","expanded_url":"https://example.com/a","display_url":"example.com/a"}]}}
{"limit":{"track":5,"timestamp_ms":"1700000000000"}}
{"id_str":"2","text":"RT @bob: hi","user":{"id_str":"u1","screen_name":"alice"},"retweeted_status":{"id_str":"3","text":"hi","user":{"id_str":"u2","screen_name":"bob"},"entities":{"hashtags":[],"symbols":[],"user_mentions":[],"urls":[]}},"entities":{"hashtags":[],"symbols":[],"user_mentions":[],"urls":[]}}
"#;

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("tweets.json");
    fs::write(&path, contents).unwrap();
    path
}

fn command() -> Command {
    let mut cmd = Command::cargo_bin("tweet-archive-graphml").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_default_output_path_and_summary() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), TWEETS);

    command()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tweets Processed: 3"))
        .stdout(predicate::str::contains("Users extracted: 2"))
        .stdout(predicate::str::contains("Hashtags extracted: 1"))
        .stdout(predicate::str::contains("Urls extracted: 0"))
        .stdout(predicate::str::contains("Records skipped: 1"));

    let output = fs::read_to_string(dir.path().join("tweets.json.graphml")).unwrap();
    assert!(output.contains("<graph id=\"Default Graph Name\" edgedefault=\"directed\">"));
    assert!(output.contains("<edge source=\"tweet_id:2\" target=\"tweet_id:3\">"));
}

#[test]
fn test_all_flag_and_explicit_output() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), TWEETS);
    let output = dir.path().join("network.graphml");

    command()
        .args(["-a", "-g", "My Tweets", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Urls extracted: 1"))
        .stdout(predicate::str::contains("TLDs extracted: 1"));

    let document = fs::read_to_string(&output).unwrap();
    assert!(document.contains("<graph id=\"My Tweets\""));
    assert!(document.contains("<node id=\"tld:example.com\">"));
    assert!(document.contains("<node id=\"url:https://example.com/a\">"));
}

#[test]
fn test_malformed_line_is_fatal_by_default() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), &format!("{TWEETS}{{oops\n"));

    command()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 4"));

    assert!(!dir.path().join("tweets.json.graphml").exists());
}

#[test]
fn test_keep_going_skips_malformed_line() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), &format!("{TWEETS}{{oops\n"));

    command()
        .args(["--keep-going"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tweets Processed: 3"))
        .stdout(predicate::str::contains("Records skipped: 2"));
}

#[test]
fn test_environment_enables_urls() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), TWEETS);

    command()
        .current_dir(dir.path())
        .env("TWEET_GRAPHML__GRAPH__INCLUDE_URLS", "true")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Urls extracted: 1"))
        .stdout(predicate::str::contains("TLDs extracted: 0"));

    let document = fs::read_to_string(dir.path().join("tweets.json.graphml")).unwrap();
    assert!(document.contains("<node id=\"url:https://example.com/a\">"));
}

#[test]
fn test_environment_excluded_tlds_list() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), TWEETS);

    command()
        .current_dir(dir.path())
        .env("TWEET_GRAPHML__GRAPH__EXCLUDED_TLDS", "twitter.com,example.com")
        .args(["-t"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("TLDs extracted: 0"));

    let document = fs::read_to_string(dir.path().join("tweets.json.graphml")).unwrap();
    assert!(!document.contains("tld:example.com"));
}

#[test]
fn test_environment_invalid_value_fails() {
    let dir = tempdir().unwrap();
    let input = write_input(dir.path(), TWEETS);

    command()
        .current_dir(dir.path())
        .env("TWEET_GRAPHML__LOGGING__LEVEL", "chatty")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}

#[test]
fn test_missing_input_fails() {
    command()
        .arg("/definitely/not/here.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_requires_an_input() {
    command().assert().failure();
}
