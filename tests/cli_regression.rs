// Regression tests for the paramtest binary.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

mod common;

use assert_cmd::Command;
use common::fixture;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn paramtest() -> Command {
    let mut cmd = Command::cargo_bin("paramtest").unwrap();
    cmd.arg("--color").arg("never");
    cmd
}

#[test]
fn cli_expands_valid_file() {
    paramtest()
        .arg("expand")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(
            contains("    func testF_2() {\n        let value: Int = 3\n        print(value)\n    }")
                .and(contains("        let c: Int = 3\n        assert(a + b == c)"))
                .and(contains("@ParameterizedTest").not())
                .and(contains("p.testAssertWithTuple_1()")),
        );
}

#[test]
fn cli_respects_indent_width() {
    paramtest()
        .arg("--indent")
        .arg("2")
        .arg("expand")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(contains("  func testF_0() {\n    let value: Int = 1\n"));
}

#[test]
fn cli_expand_json_report() {
    paramtest()
        .arg("expand")
        .arg("--json")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(
            contains("\"generated\"")
                .and(contains("\"testAssertWithTuple_1\""))
                .and(contains("\"failures\": []")),
        );
}

#[test]
fn cli_expand_diff_marks_generated_lines() {
    paramtest()
        .arg("expand")
        .arg("--diff")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(contains("+    func testF_0() {").and(contains("-    @ParameterizedTest")));
}

#[test]
fn cli_reports_miette_diagnostics_on_expansion_failure() {
    paramtest()
        .arg("check")
        .arg(fixture("invalid"))
        .assert()
        .failure()
        .stderr(contains("paramtest::expand::different_tuple_element_count"))
        .stdout(contains("1 test(s) generated, 1 failure(s)"));
}

#[test]
fn cli_check_passes_on_valid_directory() {
    paramtest()
        .arg("check")
        .arg(fixture("valid"))
        .assert()
        .success()
        .stdout(contains("checked 1 file(s): 5 test(s) generated, 0 failure(s)"));
}

#[test]
fn cli_expand_fails_without_output_for_failed_file() {
    paramtest()
        .arg("expand")
        .arg(fixture("invalid/Arity.swift"))
        .assert()
        .failure()
        .stdout(contains("testPositive_0").not());
}

#[test]
fn cli_lists_generated_names() {
    paramtest()
        .arg("list")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(
            contains("    testF_0\n    testF_1\n    testF_2\n")
                .and(contains("    testAssertWithTuple_1")),
        );
}

#[test]
fn cli_lists_registered_macros() {
    paramtest()
        .arg("list-macros")
        .assert()
        .success()
        .stdout(contains("@ParameterizedTest"));
}

#[test]
fn cli_prints_ast_as_json() {
    paramtest()
        .arg("ast")
        .arg(fixture("valid/Client.swift"))
        .assert()
        .success()
        .stdout(contains("\"Type\"").and(contains("\"assertWithTuple\"")));
}

#[test]
fn cli_reports_missing_path() {
    paramtest()
        .arg("check")
        .arg(fixture("does-not-exist"))
        .assert()
        .failure()
        .stderr(contains("paramtest::io"));
}

#[test]
fn cli_expand_continues_past_unparsable_file() {
    paramtest()
        .arg("expand")
        .arg(fixture("mixed"))
        .assert()
        .failure()
        .stderr(contains("paramtest::parse"))
        .stdout(contains("func testGood_0() {\n    let a: Int = 1\n    assert(a > 0)\n}"));
}

#[test]
fn cli_check_counts_unparsable_file_as_failure() {
    paramtest()
        .arg("check")
        .arg(fixture("mixed"))
        .assert()
        .failure()
        .stdout(contains("checked 2 file(s): 1 test(s) generated, 1 failure(s)"));
}
