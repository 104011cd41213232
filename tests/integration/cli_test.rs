//! CLI binary tests
//!
//! Every run points `--config` at a file inside a temp dir so the user's own
//! config never leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{read_result, run_pipelog, temp_log_dir};

fn pipelog(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pipelog").unwrap();
    cmd.arg("--config")
        .arg(temp.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    pipelog(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn analyze_prints_report_and_writes_results() {
    let (temp, logs) = temp_log_dir(&["multiline.log", "crlf.log"]);
    let out = temp.path().join("resultados");

    let (stdout, stderr, exit_code) = run_pipelog(
        &temp,
        &["analyze", logs.to_str().unwrap(), "--out", out.to_str().unwrap()],
    );

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("ERR: 3 (42.86%)"));
    assert!(stdout.contains("Processed 2 of 2 file(s)"));
    assert!(stdout.contains("Wrote 6 result file(s)"));
    assert!(read_result(&out, "errores_completos.csv").contains("Sin papel"));
}

#[test]
fn analyze_json_keeps_stdout_parseable() {
    let (temp, logs) = temp_log_dir(&["multiline.log"]);

    let (stdout, _stderr, exit_code) =
        run_pipelog(&temp, &["analyze", logs.to_str().unwrap(), "--json", "--no-export"]);

    assert_eq!(exit_code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["states"]["ERR"], 2);
    assert_eq!(json["files_processed"], 1);
    assert!(!temp.path().join("resultados").exists());
}

#[test]
fn analyze_missing_folder_fails() {
    let temp = TempDir::new().unwrap();
    pipelog(&temp)
        .arg("analyze")
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input folder not found"));
}

#[test]
fn analyze_empty_folder_fails() {
    let temp = TempDir::new().unwrap();
    pipelog(&temp)
        .arg("analyze")
        .arg(temp.path())
        .arg("--no-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .log files found"));
}

#[test]
fn analyze_honors_extension_and_states() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("logs");
    fs::create_dir_all(&logs).unwrap();
    fs::write(
        logs.join("app.txt"),
        "01/01/2024 10:00:00.000 | h | 1 | m | CRT | CAJA7 | Red | Enlace | caido\n\
         01/01/2024 10:00:01.000 | h | 1 | m | ERR | CAJA8 | Red | Enlace | sin ruta\n",
    )
    .unwrap();
    let out = temp.path().join("out");

    pipelog(&temp)
        .args(["analyze", "--ext", "txt", "--states", "CRT", "--out"])
        .arg(&out)
        .arg(&logs)
        .assert()
        .success()
        .stdout(predicate::str::contains("CRT: 1 (50.00%)"))
        .stdout(predicate::str::contains("CAJA8: 1"));

    // ERR rows are captured even though only CRT was asked for.
    assert_eq!(
        read_result(&out, "errores_completos.csv"),
        "Fecha,Estado,Caja,Modulo,Flujo,Mensaje\n\
         01/01/2024 10:00:01.000,ERR,CAJA8,Red,Enlace,sin ruta\n"
    );
    assert!(read_result(&out, "errores_por_caja.csv").contains("CAJA8,Red,Enlace"));
}

#[test]
fn analyze_uses_config_file_settings() {
    let (temp, logs) = temp_log_dir(&["multiline.log"]);
    let out = temp.path().join("from-config");
    fs::write(
        temp.path().join("config.toml"),
        format!(
            "[input]\ndirectory = {:?}\n\n[output]\ndirectory = {:?}\njson = false\n",
            logs.to_str().unwrap(),
            out.to_str().unwrap()
        ),
    )
    .unwrap();

    pipelog(&temp)
        .args(["analyze", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(out.join("errores_completos.csv").exists());
    assert!(!out.join("resumen.json").exists());
}

#[test]
fn zero_jobs_is_rejected() {
    let (temp, logs) = temp_log_dir(&["multiline.log"]);
    pipelog(&temp)
        .args(["analyze", "--jobs", "0", "--no-export"])
        .arg(&logs)
        .assert()
        .failure()
        .stderr(predicate::str::contains("workers"));
}

#[test]
fn config_init_then_show() {
    let temp = TempDir::new().unwrap();

    pipelog(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(temp.path().join("config.toml").exists());

    pipelog(&temp)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    pipelog(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[analysis]"))
        .stdout(predicate::str::contains("\"ERR\""));
}

#[test]
fn config_path_prints_explicit_file() {
    let temp = TempDir::new().unwrap();
    pipelog(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    pipelog(&temp)
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipelog"));
}
