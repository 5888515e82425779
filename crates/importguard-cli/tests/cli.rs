//! End-to-end tests for the `importguard` binary against temporary source trees.

use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn importguard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("importguard").unwrap();
    cmd.env_remove("IMPORTGUARD_LOG");
    cmd
}

fn setup(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    for (rel, text) in files {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent dirs");
        std::fs::write(&path, text).expect("write file");
    }
    (temp, root)
}

fn read_json(path: &Utf8PathBuf) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("read report");
    serde_json::from_str(&text).expect("parse report")
}

#[test]
fn clean_tree_passes() {
    let (_temp, root) = setup(&[("webapp/a/A.js", "import B from 'b/B';\n")]);
    let report = root.join("out/report.json");

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .success();

    let json = read_json(&report);
    assert_eq!(json["schema"], "importguard.report.v1");
    assert_eq!(json["verdict"], "pass");
    assert_eq!(json["data"]["files_scanned"], 1);
}

#[test]
fn relative_import_fails_with_exit_code_2() {
    let (_temp, root) = setup(&[("webapp/a/A.js", "import B from '../b/B';\n")]);
    let report = root.join("out/report.json");
    let markdown = root.join("out/comment.md");

    importguard_cmd()
        .args([
            "--repo-root",
            root.as_str(),
            "check",
            "--report-out",
            report.as_str(),
            "--write-markdown",
            "--markdown-out",
            markdown.as_str(),
        ])
        .assert()
        .code(2);

    let json = read_json(&report);
    assert_eq!(json["verdict"], "fail");
    let finding = &json["findings"][0];
    assert_eq!(finding["check_id"], "imports.no_relative_paths");
    assert_eq!(finding["code"], "relative_path");
    assert_eq!(finding["location"]["path"], "webapp/a/A.js");
    assert_eq!(finding["location"]["line"], 1);
    assert_eq!(finding["fix"]["replacement"], "\"b/B\"");

    let md = std::fs::read_to_string(&markdown).expect("read markdown");
    assert!(md.contains("Verdict: **FAIL**"));
}

#[test]
fn warn_profile_fails_on_warnings_unless_relaxed() {
    let (_temp, root) = setup(&[("webapp/a/A.js", "const b = require('./b');\n")]);
    let report = root.join("report.json");

    importguard_cmd()
        .args([
            "--repo-root",
            root.as_str(),
            "--profile",
            "warn",
            "check",
            "--report-out",
            report.as_str(),
        ])
        .assert()
        .code(2);

    // `warn` fails on warnings; config can relax that.
    std::fs::write(root.join("importguard.toml"), "profile = \"warn\"\nfail_on = \"error\"\n")
        .expect("write config");
    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .success();
    assert_eq!(read_json(&report)["verdict"], "warn");
}

#[test]
fn config_rules_deny_imports() {
    let (_temp, root) = setup(&[
        (
            "importguard.toml",
            r#"
aliases = []
blacklisted-imports = [{ from = ".*", to = "^lodash$" }]
"#,
        ),
        (
            "webapp/a/A.js",
            "import React from 'react';\nimport _ from 'lodash';\n",
        ),
    ]);
    let report = root.join("report.json");

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .code(2);

    let json = read_json(&report);
    assert_eq!(json["findings"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["findings"][0]["code"], "import_disallowed");
    assert_eq!(json["findings"][0]["location"]["line"], 2);
    assert_eq!(
        json["findings"][0]["message"],
        "Import disallowed by rules: lodash"
    );
}

#[test]
fn invalid_config_writes_runtime_error_report() {
    let (_temp, root) = setup(&[
        ("importguard.toml", "whitelisted-imports = [{ from = \"(\", to = \".*\" }]\n"),
        ("webapp/a/A.js", "import B from 'b/B';\n"),
    ]);
    let report = root.join("report.json");

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("importguard error"));

    let json = read_json(&report);
    assert_eq!(json["verdict"], "fail");
    assert_eq!(json["findings"][0]["check_id"], "tool.runtime");
    assert_eq!(json["findings"][0]["code"], "runtime_error");
}

#[test]
fn fix_rewrites_files_and_dry_run_does_not() {
    let source = "import B from '../b/B';\nconst c = require(\"./c\");\n";
    let (_temp, root) = setup(&[("webapp/a/A.js", source)]);
    let file = root.join("webapp/a/A.js");

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "fix", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would fix webapp/a/A.js (2 edit(s))"));
    assert_eq!(std::fs::read_to_string(&file).expect("read"), source);

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed webapp/a/A.js"));
    assert_eq!(
        std::fs::read_to_string(&file).expect("read"),
        "import B from \"b/B\";\nconst c = require(\"a/c\");\n"
    );

    let report = root.join("report.json");
    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .success();
}

#[test]
fn md_and_annotations_render_existing_report() {
    let (_temp, root) = setup(&[("webapp/a/A.js", "import B from '../b/B';\n")]);
    let report = root.join("report.json");

    importguard_cmd()
        .args(["--repo-root", root.as_str(), "check", "--report-out", report.as_str()])
        .assert()
        .code(2);

    importguard_cmd()
        .args(["md", "--report", report.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Importguard report"))
        .stdout(predicate::str::contains("`imports.no_relative_paths` / `relative_path`"));

    importguard_cmd()
        .args(["annotations", "--report", report.as_str(), "--max", "5"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=webapp/a/A.js,line=1,col=1,title=imports.no_relative_paths::",
        ));
}

#[test]
fn custom_root_marker_override() {
    let (_temp, root) = setup(&[("pinboard/webapp/a/A.js", "import B from '../b/B';\n")]);
    let report = root.join("report.json");

    importguard_cmd()
        .args([
            "--repo-root",
            root.as_str(),
            "--root-marker",
            "pinboard/webapp",
            "check",
            "--report-out",
            report.as_str(),
        ])
        .assert()
        .code(2);

    let json = read_json(&report);
    assert_eq!(json["data"]["root_marker"], "pinboard/webapp");
    assert_eq!(json["findings"][0]["fix"]["replacement"], "\"b/B\"");
}

#[test]
fn explain_known_and_unknown() {
    importguard_cmd()
        .args(["explain", "relative_path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relative_path: "))
        .stdout(predicate::str::contains("```js"));

    importguard_cmd()
        .args(["explain", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: nope"));
}
