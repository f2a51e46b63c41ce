use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_tempfile(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create tempfile");
    write!(file, "{contents}").expect("write tempfile");
    file
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("json-diff-lite").expect("binary json-diff-lite should be built");
    cmd.env_remove("JSON_DIFF_LITE_LOG").env_remove("NO_COLOR");
    cmd
}

const PERSON_OLD: &str = r#"{"name": "Ana", "age": 30, "city": "SP"}"#;
const PERSON_NEW: &str = r#"{"name": "Ana Maria", "age": 30, "email": "ana@example.com"}"#;

#[test]
fn help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Compare two JSON files and show differences"));
}

#[test]
fn version_banner_short_and_long() {
    let banner = format!("json-diff-lite {}\n", env!("CARGO_PKG_VERSION"));
    cli().arg("-v").assert().code(0).stdout(banner.clone());
    cli().arg("--version").assert().code(0).stdout(banner);
}

#[test]
fn version_wins_over_missing_files() {
    cli()
        .args(["-v", "missing-a.json", "missing-b.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("json-diff-lite "));
}

#[test]
fn identical_documents_exit_zero() {
    let lhs = write_tempfile(r#"{"a": [1, 2], "b": {"c": null}}"#);
    let rhs = write_tempfile(r#"{"b": {"c": null}, "a": [1, 2]}"#);

    cli()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(0)
        .stdout("No differences found.\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn differences_are_listed_in_key_order() {
    let lhs = write_tempfile(PERSON_OLD);
    let rhs = write_tempfile(PERSON_NEW);

    cli()
        .args(["--color", "never"])
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout("- city: \"SP\"\n+ email: \"ana@example.com\"\n~ name: \"Ana\" -> \"Ana Maria\"\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn piped_output_is_not_colored() {
    let lhs = write_tempfile("{\"age\": 30}");
    let rhs = write_tempfile("{\"age\": 31}");

    cli().arg(lhs.path()).arg(rhs.path()).assert().code(1).stdout("~ age: 30 -> 31\n");
}

#[test]
fn color_always_wraps_each_line() {
    let lhs = write_tempfile("{\"a\": 1, \"b\": 2}");
    let rhs = write_tempfile("{\"b\": 3, \"c\": 4}");

    cli()
        .args(["--color", "always"])
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(
            "\u{1b}[31m- a: 1\u{1b}[0m\n\u{1b}[33m~ b: 2 -> 3\u{1b}[0m\n\u{1b}[32m+ c: 4\u{1b}[0m\n",
        );
}

#[test]
fn quiet_mode_only_sets_exit_code() {
    let lhs = write_tempfile(PERSON_OLD);
    let rhs = write_tempfile(PERSON_NEW);
    cli().arg("-q").arg(lhs.path()).arg(rhs.path()).assert().code(1).stdout(predicate::str::is_empty());

    let same = write_tempfile(PERSON_OLD);
    cli()
        .arg("--quiet")
        .arg(lhs.path())
        .arg(same.path())
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_file_exits_two() {
    let rhs = write_tempfile("{}");

    cli()
        .arg("does-not-exist.json")
        .arg(rhs.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("File not found: does-not-exist.json"));
}

#[test]
fn invalid_json_exits_two() {
    let lhs = write_tempfile("{\"a\": ");
    let rhs = write_tempfile("{}");

    cli()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn empty_file_is_invalid_json() {
    let lhs = write_tempfile("");
    let rhs = write_tempfile("{}");

    cli().arg(lhs.path()).arg(rhs.path()).assert().code(2);
}

#[test]
fn wrong_number_of_inputs_is_a_usage_error() {
    let only = write_tempfile("{}");

    cli().arg(only.path()).assert().code(2).stderr(predicate::str::contains("expected two input files"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cli().arg("--definitely-not-a-flag").assert().code(2);
}

#[test]
fn list_key_matches_reordered_elements() {
    let lhs = write_tempfile(r#"{"users": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Bo"}]}"#);
    let rhs = write_tempfile(r#"{"users": [{"id": 2, "name": "Bob"}, {"id": 1, "name": "Ana"}]}"#);

    cli()
        .args(["--list-key", "id"])
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout("~ users[id=2].name: \"Bo\" -> \"Bob\"\n");

    cli()
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("~ users[0].id: 1 -> 2"));
}

#[test]
fn config_file_supplies_list_keys() {
    let lhs = write_tempfile(r#"[{"sku": "a", "qty": 1}, {"sku": "b", "qty": 2}]"#);
    let rhs = write_tempfile(r#"[{"sku": "b", "qty": 2}, {"sku": "a", "qty": 5}]"#);
    let config = write_tempfile(r#"{"list_key": ["id", "sku"]}"#);

    cli()
        .arg("-c")
        .arg(config.path())
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout("~ [sku=a].qty: 1 -> 5\n");
}

#[test]
fn invalid_config_exits_two() {
    let lhs = write_tempfile("{}");
    let rhs = write_tempfile("{}");
    let config = write_tempfile(r#"{"list_keys": "id"}"#);

    cli()
        .arg("--config")
        .arg(config.path())
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn json_format_emits_change_records() {
    let lhs = write_tempfile("{\"age\": 30, \"tags\": [\"a\"]}");
    let rhs = write_tempfile("{\"age\": 31, \"tags\": []}");

    let output = cli()
        .args(["--format", "json"])
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let records: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(
        records,
        serde_json::json!([
            {"op": "modify", "path": "age", "old": 30, "new": 31},
            {"op": "remove", "path": "tags[0]", "value": "a"}
        ])
    );
}

#[test]
fn json_format_without_changes_is_empty_array() {
    let lhs = write_tempfile("[1, 2]");
    let rhs = write_tempfile("[1, 2.0]");

    cli().args(["-f", "json"]).arg(lhs.path()).arg(rhs.path()).assert().code(0).stdout("[]\n");
}

#[test]
fn yaml_inputs_are_supported() {
    let lhs = write_tempfile("name: Ana\nage: 30\n");
    let rhs = write_tempfile("name: Ana\nage: 31\n");

    cli().arg("--yaml").arg(lhs.path()).arg(rhs.path()).assert().code(1).stdout("~ age: 30 -> 31\n");
}

#[test]
fn output_flag_writes_to_file() {
    let lhs = write_tempfile("{\"a\": true}");
    let rhs = write_tempfile("{\"a\": false}");
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("changes.txt");

    cli()
        .arg("-o")
        .arg(&out)
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).expect("output file written");
    assert_eq!(written, "~ a: true -> false\n");
}

#[test]
fn verbose_logs_go_to_stderr() {
    let lhs = write_tempfile("[{\"id\": 1}]");
    let rhs = write_tempfile("[{\"id\": 2}]");

    cli()
        .args(["--verbose", "-k", "id"])
        .arg(lhs.path())
        .arg(rhs.path())
        .assert()
        .code(1)
        .stdout("- [id=1]: {\"id\":1}\n+ [id=2]: {\"id\":2}\n")
        .stderr(predicate::str::contains("matching list elements by key"));
}
