//! Integration tests for the mgps binary.
//!
//! These tests drive the interactive session over stdin and verify:
//! - Correlative report numbering
//! - Validation of speeding events and indicators
//! - The two-phase delete confirmation
//! - Filters, per-indicator counts and the CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mgps"))
}

/// An isolated default config, so a developer's real config file can never
/// leak into the assertions.
fn default_config(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, "").expect("Failed to write config");
    path
}

/// Script for one non-speeding add: date (today), indicator, unit, driver,
/// location, description.
fn add_script(indicator: &str, unit: &str, description: &str) -> String {
    format!(
        "add\n\n{}\n{}\nJuan Perez\nPatio central\n{}\n",
        indicator, unit, description
    )
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fleet incident event log"));
}

#[test]
fn test_indicators_subcommand_lists_base_catalog() {
    let temp_dir = tempfile::tempdir().unwrap();
    cli()
        .arg("indicators")
        .arg("--config")
        .arg(default_config(&temp_dir))
        .assert()
        .success()
        .stdout(predicate::str::contains("Exceso de velocidad"))
        .stdout(predicate::str::contains("Parada no autorizada"));
}

#[test]
fn test_report_numbers_are_sequential() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = format!(
        "{}{}quit\n",
        add_script("Fumar", "U1", "Primer evento"),
        add_script("Fumar", "U1", "Segundo evento")
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evento agregado ✅ (Reporte MGPS-0001)"))
        .stdout(predicate::str::contains("Evento agregado ✅ (Reporte MGPS-0002)"));
}

#[test]
fn test_indicator_can_be_picked_by_number() {
    let temp_dir = tempfile::tempdir().unwrap();
    // 19 is "Fumar" in the base catalog
    let script = "add\n\n19\nU1\nJuan Perez\nPatio central\nPor numero\njson\nquit\n";

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evento agregado"))
        .stdout(predicate::str::contains("\"indicator\": \"Fumar\""));
}

#[test]
fn test_speeding_without_speed_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script =
        "add\n\nExceso de velocidad\nU1\nJuan Perez\n0\nAutopista\nmuy rapido\nlist\nquit\n";

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error:"))
        .stdout(predicate::str::contains("Evento agregado").not())
        .stdout(predicate::str::contains(
            "No hay eventos para mostrar con los filtros seleccionados.",
        ));
}

#[test]
fn test_speeding_with_speed_is_stored() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script =
        "add\n\nExceso de velocidad\nU1\nJuan Perez\n95\nAutopista\nmuy rapido\njson\nquit\n";

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evento agregado ✅ (Reporte MGPS-0001)"))
        .stdout(predicate::str::contains("\"speed_kmh\": 95"));
}

#[test]
fn test_delete_confirmed_removes_the_row() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = format!(
        "{}{}delete\n1\ns\ncounts\nquit\n",
        add_script("Fumar", "U1", "se elimina"),
        add_script("Bostezo", "U2", "queda")
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("¿Seguro que quieres eliminar este evento?"))
        .stdout(predicate::str::contains("Evento eliminado ❌"))
        .stdout(predicate::str::is_match(r"(?m)^  Fumar +0$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^  Bostezo +1$").unwrap());
}

#[test]
fn test_delete_cancelled_leaves_the_row() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = format!(
        "{}delete\n1\nn\ncounts\nquit\n",
        add_script("Fumar", "U1", "sigue aqui")
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Eliminación cancelada"))
        .stdout(predicate::str::is_match(r"(?m)^  Fumar +1$").unwrap());
}

#[test]
fn test_delete_on_empty_log() {
    let temp_dir = tempfile::tempdir().unwrap();
    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin("delete\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay eventos registrados."));
}

#[test]
fn test_filter_by_unit() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = format!(
        "{}{}filter\nU2\n\nquit\n",
        add_script("Fumar", "U1", "PRIMERA"),
        add_script("Bostezo", "U2", "SEGUNDA")
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("SEGUNDA"))
        .stdout(predicate::str::contains("PRIMERA").not());
}

#[test]
fn test_counts_include_zero_indicators() {
    let temp_dir = tempfile::tempdir().unwrap();
    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin("counts\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?m)^  Secuestro de unidad +0$").unwrap());
}

#[test]
fn test_catalog_grows_at_runtime() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = format!(
        "catalog Puerta abierta en marcha\n{}quit\n",
        add_script("Puerta abierta en marcha", "U4", "nueva categoria")
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Indicador agregado: Puerta abierta en marcha"))
        .stdout(predicate::str::contains("Evento agregado ✅ (Reporte MGPS-0001)"));
}

#[test]
fn test_export_writes_csv_snapshot() {
    let temp_dir = tempfile::tempdir().unwrap();
    let csv_path = temp_dir.path().join("tabla.csv");
    let script = format!(
        "{}export {}\nquit\n",
        add_script("Fumar", "U1", "exportado"),
        csv_path.display()
    );

    cli()
        .arg("--config")
        .arg(default_config(&temp_dir))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Tabla exportada"));

    let contents = fs::read_to_string(&csv_path).expect("Failed to read export");
    assert!(contents.contains("Número de reporte"));
    assert!(contents.contains("MGPS-0001"));
    assert!(contents.contains("exportado"));
}

#[test]
fn test_config_prefix_and_extra_indicator() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[report]\nprefix = \"CARONI\"\n\n[indicators]\nextra = [\"Puerta abierta\"]\n",
    )
    .unwrap();

    let script = format!("{}quit\n", add_script("Puerta abierta", "U9", "con config"));

    cli()
        .arg("--config")
        .arg(&config_path)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evento agregado ✅ (Reporte CARONI-0001)"));
}
