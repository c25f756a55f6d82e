//! Workflow tests across the whole stack
//!
//! Each test drives real files through layout discovery, resolution and
//! persistence the way a command-line session would.

use pretty_assertions::assert_eq;
use scope_core::{ConfigStorage, Error};
use scope_format::{Key, Scope};
use scope_fs::{ScopeLayout, discover_metadata_dir};
use scope_test_utils::{TEST_TOOL, TestScopes};
use std::ffi::OsString;
use std::fs;

fn key(s: &str) -> Key {
    Key::parse(s).unwrap()
}

/// A `.git/config` the way git itself writes it.
const GIT_WRITTEN_CONFIG: &str = r#"[core]
	repositoryformatversion = 0
	filemode = true
	bare = false
	logallrefupdates = true
[remote "origin"]
	url = git@example.com:team/project.git
	fetch = +refs/heads/*:refs/remotes/origin/*
[branch "main"]
	remote = origin
	merge = refs/heads/main
"#;

fn storage_for(scopes: &TestScopes) -> ConfigStorage<scope_fs::FsScopeStore> {
    let metadata_dir = discover_metadata_dir(TEST_TOOL, &scopes.work_dir()).unwrap();
    let system = scopes.path(Scope::System).as_os_str().to_os_string();
    let user = scopes.path(Scope::User).as_os_str().to_os_string();
    let layout = ScopeLayout::for_tool_with_env(TEST_TOOL, metadata_dir, |name| match name {
        "TEST_CONFIG_SYSTEM" => Some(system.clone()),
        "TEST_CONFIG_GLOBAL" => Some(user.clone()),
        _ => None::<OsString>,
    })
    .unwrap();
    ConfigStorage::open(layout)
}

#[test]
fn reads_a_config_written_by_git() {
    let scopes = TestScopes::new();
    scopes.write(Scope::Local, GIT_WRITTEN_CONFIG);

    let merged = storage_for(&scopes).resolve().unwrap();

    assert_eq!(
        merged.get(&key("remote.origin.url")),
        Some("git@example.com:team/project.git")
    );
    assert_eq!(merged.get(&key("branch.main.merge")), Some("refs/heads/main"));
    assert_eq!(merged.get(&key("core.filemode")), Some("true"));
}

#[test]
fn rewriting_an_untouched_git_config_is_byte_identical() {
    let scopes = TestScopes::new();
    scopes.write(Scope::Local, GIT_WRITTEN_CONFIG);
    let storage = storage_for(&scopes);

    let merged = storage.resolve().unwrap();
    storage.persist(merged.scoped(Scope::Local).unwrap()).unwrap();

    assert_eq!(scopes.read(Scope::Local).as_deref(), Some(GIT_WRITTEN_CONFIG));
}

#[test]
fn session_of_edits_across_scopes() {
    let scopes = TestScopes::new();
    scopes.write(Scope::System, "[core]\n\tbare = false\n\tautocrlf = input\n");
    let storage = storage_for(&scopes);

    // user identity goes to the user scope
    let mut merged = storage.resolve().unwrap();
    merged
        .scoped_mut(Scope::User)
        .unwrap()
        .set(&key("user.name"), "Alice");
    storage.persist(merged.scoped(Scope::User).unwrap()).unwrap();

    // repository override goes to local
    let mut merged = storage.resolve().unwrap();
    merged.set(&key("core.bare"), "true");
    storage.persist(merged.scoped(Scope::Local).unwrap()).unwrap();

    let merged = storage.resolve().unwrap();
    assert_eq!(merged.get(&key("core.bare")), Some("true"));
    assert_eq!(merged.get(&key("core.autocrlf")), Some("input"));
    assert_eq!(merged.get(&key("user.name")), Some("Alice"));
    assert_eq!(
        scopes.read(Scope::System).as_deref(),
        Some("[core]\n\tbare = false\n\tautocrlf = input\n")
    );
    scopes.assert_contains(Scope::User, "name = Alice");
    scopes.assert_contains(Scope::Local, "bare = true");
}

#[test]
fn failed_write_leaves_previous_content() {
    let scopes = TestScopes::new();
    scopes.write(Scope::Local, "[core]\n\tbare = true\n");
    let storage = storage_for(&scopes);

    let mut merged = storage.resolve().unwrap();
    merged.set(&key("core.bare"), "bad\0value");
    let err = storage.persist(&merged).unwrap_err();

    assert!(matches!(err, Error::Validation { scope: Scope::Local, .. }));
    assert_eq!(
        scopes.read(Scope::Local).as_deref(),
        Some("[core]\n\tbare = true\n")
    );
    scopes.assert_missing(Scope::System);
    scopes.assert_missing(Scope::User);
}

#[test]
fn no_temp_files_are_left_behind() {
    let scopes = TestScopes::new();
    let storage = storage_for(&scopes);

    let mut merged = storage.resolve().unwrap();
    merged.set(&key("core.bare"), "true");
    storage.persist(&merged).unwrap();

    let metadata_dir = scopes.path(Scope::Local).parent().unwrap().to_path_buf();
    let names: Vec<String> = fs::read_dir(metadata_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["config".to_string()]);
}

#[test]
fn special_values_survive_a_round_trip() {
    let scopes = TestScopes::new();
    let storage = storage_for(&scopes);
    let values = [
        ("alias.lg", "log --graph --format=\"%h %s\""),
        ("core.comment", "# not a comment"),
        ("core.padded", "  spaced  "),
        ("core.multiline", "first\nsecond"),
        ("core.tabbed", "a\tb"),
        ("core.path", "C:\\Program Files\\tool"),
        ("core.empty", ""),
    ];

    let mut merged = storage.resolve().unwrap();
    for (k, v) in values {
        merged.set(&key(k), v);
    }
    storage.persist(merged.scoped(Scope::Local).unwrap()).unwrap();

    let merged = storage.resolve().unwrap();
    for (k, v) in values {
        assert_eq!(merged.get(&key(k)), Some(v), "value of {k}");
    }
}
