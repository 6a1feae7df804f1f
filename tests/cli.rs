use assert_cmd::Command;
use predicates::prelude::*;

const SAMPLE_CSV: &str = "\
Company Name,Month,Supplier Name,Type,Total GST,Document Number (2B),Document Date (2B)
TestCorp,Jan,Supplier A,Missing_2B_Cumulative,100,DOC001,01-01-2024
TestCorp,Jan,Supplier A,Missing_in_PR_Cumulative,200,DOC002,02-01-2024
TestCorp,Jan,Supplier B,Missing_2B_Cumulative,50,DOC003,03-01-2024
";

fn gstrecon(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("gstrecon").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1");
    cmd
}

fn write_sample(dir: &std::path::Path, content: &str) -> String {
    let path = dir.join("upload.csv");
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_categories_lists_labels() {
    let dir = tempfile::tempdir().unwrap();
    gstrecon(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Admin").and(predicate::str::contains("None")));
}

#[test]
fn test_suppliers_summary_with_assignment() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(dir.path(), SAMPLE_CSV);
    gstrecon(dir.path())
        .args(["suppliers", &file, "--assign", "TestCorp|Jan|Supplier A=Admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("None \u{2192} Admin (2 rows)"))
        .stdout(predicate::str::contains("DOC001"))
        .stdout(predicate::str::contains("DOC002"))
        .stdout(predicate::str::contains("3 discrepancies across 2 suppliers"));
}

#[test]
fn test_repeat_assignment_reports_no_change() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(dir.path(), SAMPLE_CSV);
    gstrecon(dir.path())
        .args([
            "suppliers",
            &file,
            "--assign",
            "TestCorp|Jan|Supplier A=Admin",
            "--assign",
            "testcorp|JAN|supplier a=admin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("already Admin"));
}

#[test]
fn test_discrepancies_filtered_by_supplier() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(dir.path(), SAMPLE_CSV);
    gstrecon(dir.path())
        .args(["discrepancies", &file, "--supplier", "supplier a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DOC001"))
        .stdout(predicate::str::contains("DOC002"))
        .stdout(predicate::str::contains("DOC003").not());
}

#[test]
fn test_invalid_category_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(dir.path(), SAMPLE_CSV);
    gstrecon(dir.path())
        .args(["suppliers", &file, "--assign", "TestCorp|Jan|Supplier A=Bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid category: Bogus"));
}

#[test]
fn test_blank_supplier_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_sample(
        dir.path(),
        "Company Name,Month,Supplier Name,Type,Total GST\n\
         TestCorp,Jan,Supplier A,Missing_2B,10\n\
         TestCorp,Jan,,Missing_in_PR,20\n",
    );
    gstrecon(dir.path())
        .args(["suppliers", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record at row 2: supplier_name"));
}

#[test]
fn test_init_writes_settings() {
    let dir = tempfile::tempdir().unwrap();
    gstrecon(dir.path())
        .args(["init", "--default-company", "TestCorp"])
        .assert()
        .success();
    let content =
        std::fs::read_to_string(dir.path().join(".config/gstrecon/settings.json")).unwrap();
    assert!(content.contains("\"default_company\": \"TestCorp\""));
}
