//! CLI smoke tests over the built binary.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

fn write_generation_file(path: &Path, date_cell: &str, rows: &[(&str, f64)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "DAILY GENERATION REPORT").unwrap();
    sheet.write_string(1, 0, date_cell).unwrap();
    sheet.write_string(2, 0, "All figures in MU").unwrap();
    sheet.write_string(3, 0, "THERMAL STATION").unwrap();
    sheet.write_string(3, 1, "TODAY'S ACTUAL").unwrap();
    for (i, (plant, value)) in rows.iter().enumerate() {
        let row = (4 + i) as u32;
        sheet.write_string(row, 0, *plant).unwrap();
        sheet.write_number(row, 1, *value).unwrap();
    }
    workbook.save(path).unwrap();
}

fn write_coal_file(path: &Path, date_cell: &str, rows: &[(&str, f64)]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "COAL POSITION").unwrap();
    sheet.write_string(1, 0, "CEA").unwrap();
    sheet.write_string(2, 0, date_cell).unwrap();
    sheet.write_string(3, 0, "Thermal Station").unwrap();
    sheet.write_string(3, 1, "Coal Consumption").unwrap();
    for (i, (plant, value)) in rows.iter().enumerate() {
        let row = (4 + i) as u32;
        sheet.write_string(row, 0, *plant).unwrap();
        sheet.write_number(row, 1, *value).unwrap();
    }
    workbook.save(path).unwrap();
}

#[test]
fn test_plants_lists_registry() {
    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.arg("plants")
        .assert()
        .success()
        .stdout(predicate::str::contains("PANIPAT TPS"))
        .stdout(predicate::str::contains("NORTHERN"));
}

#[test]
fn test_merge_writes_workbook() {
    let dir = TempDir::new().unwrap();
    let gen = dir.path().join("gen_01.xlsx");
    let coal = dir.path().join("coal_01.xlsx");
    let output = dir.path().join("merged.xlsx");
    write_generation_file(&gen, "Date: 01/06/2024", &[("Panipat TPS", 12.5)]);
    write_coal_file(&coal, "Date: 01/06/2024", &[("Panipat TPS", 4.2)]);

    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.args(["merge", "-g"])
        .arg(&gen)
        .arg("-c")
        .arg(&coal)
        .args(["--month", "June", "--year", "2024"])
        .args(["--plants", "PANIPAT TPS"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Merged rows"));
    assert!(output.exists());
}

#[test]
fn test_merge_accepts_directories() {
    let dir = TempDir::new().unwrap();
    let gen_dir = dir.path().join("gen");
    let coal_dir = dir.path().join("coal");
    std::fs::create_dir_all(&gen_dir).unwrap();
    std::fs::create_dir_all(&coal_dir).unwrap();
    write_generation_file(
        &gen_dir.join("gen_01.xlsx"),
        "Date: 01/06/2024",
        &[("Panipat TPS", 12.5)],
    );
    write_coal_file(
        &coal_dir.join("coal_01.xlsx"),
        "Date: 01/06/2024",
        &[("Panipat TPS", 4.2)],
    );
    let output = dir.path().join("merged.xlsx");

    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.arg("merge")
        .arg("-g")
        .arg(&gen_dir)
        .arg("-c")
        .arg(&coal_dir)
        .args(["--month", "June", "--year", "2024", "--plants", "PANIPAT TPS"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}

#[test]
fn test_merge_rejects_unknown_plant() {
    let dir = TempDir::new().unwrap();
    let gen = dir.path().join("gen_01.xlsx");
    let coal = dir.path().join("coal_01.xlsx");
    write_generation_file(&gen, "Date: 01/06/2024", &[("Panipat TPS", 12.5)]);
    write_coal_file(&coal, "Date: 01/06/2024", &[("Panipat TPS", 4.2)]);

    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.arg("merge")
        .arg("-g")
        .arg(&gen)
        .arg("-c")
        .arg(&coal)
        .args(["--month", "June", "--year", "2024", "--plants", "ATLANTIS TPS"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown plant"));
}

#[test]
fn test_merge_rejects_unknown_month() {
    let dir = TempDir::new().unwrap();
    let gen = dir.path().join("gen_01.xlsx");
    write_generation_file(&gen, "Date: 01/06/2024", &[("Panipat TPS", 12.5)]);

    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.arg("merge")
        .arg("-g")
        .arg(&gen)
        .arg("-c")
        .arg(&gen)
        .args(["--month", "Smarch", "--year", "2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown month"));
}

#[test]
fn test_inspect_reports_interpretation() {
    let dir = TempDir::new().unwrap();
    let coal = dir.path().join("coal_01.xlsx");
    write_coal_file(&coal, "Date: 01/06/2024", &[("Panipat TPS", 4.2)]);

    let mut cmd = Command::cargo_bin("carbonmerge").unwrap();
    cmd.arg("inspect")
        .arg(&coal)
        .args(["--kind", "coal", "--month", "June", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("01/06/2024"))
        .stdout(predicate::str::contains("Panipat TPS"));
}
