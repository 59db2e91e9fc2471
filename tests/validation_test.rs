//! Unit tests for validation.rs module

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tweet_archive_graphml::validation::{InputValidator, MAX_GRAPH_NAME_LEN};

#[test]
fn test_validate_graph_name_valid() {
    assert!(InputValidator::validate_graph_name("Default Graph Name").is_ok());
}

#[test]
fn test_validate_graph_name_empty() {
    assert!(InputValidator::validate_graph_name("").is_err());
}

#[test]
fn test_validate_graph_name_whitespace_only() {
    assert!(InputValidator::validate_graph_name("   ").is_err());
}

#[test]
fn test_validate_graph_name_too_long() {
    let long_name = "a".repeat(MAX_GRAPH_NAME_LEN + 1);
    assert!(InputValidator::validate_graph_name(&long_name).is_err());
}

#[test]
fn test_validate_graph_name_exactly_max_chars() {
    let name = "é".repeat(MAX_GRAPH_NAME_LEN);
    assert!(InputValidator::validate_graph_name(&name).is_ok());
}

#[test]
fn test_validate_graph_name_with_newline() {
    assert!(InputValidator::validate_graph_name("my\ngraph").is_err());
}

#[test]
fn test_validate_graph_name_with_markup() {
    // escaped on output, so allowed
    assert!(InputValidator::validate_graph_name("<tweets & friends>").is_ok());
}

#[test]
fn test_validate_input_path_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tweets.json");
    fs::write(&path, "{}\n").unwrap();
    assert!(InputValidator::validate_input_path(&path).is_ok());
}

#[test]
fn test_validate_input_path_missing() {
    assert!(InputValidator::validate_input_path(Path::new("/no/such/tweets.json")).is_err());
}

#[test]
fn test_validate_input_path_directory() {
    let dir = tempdir().unwrap();
    assert!(InputValidator::validate_input_path(dir.path()).is_err());
}

#[test]
fn test_validate_input_path_empty() {
    assert!(InputValidator::validate_input_path(Path::new("")).is_err());
}

#[test]
fn test_validate_output_path_new_file() {
    let dir = tempdir().unwrap();
    assert!(InputValidator::validate_output_path(&dir.path().join("out.graphml")).is_ok());
}

#[test]
fn test_validate_output_path_relative_file() {
    assert!(InputValidator::validate_output_path(Path::new("out.graphml")).is_ok());
}

#[test]
fn test_validate_output_path_is_directory() {
    let dir = tempdir().unwrap();
    assert!(InputValidator::validate_output_path(dir.path()).is_err());
}

#[test]
fn test_validate_output_path_missing_parent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.graphml");
    assert!(InputValidator::validate_output_path(&path).is_err());
}
