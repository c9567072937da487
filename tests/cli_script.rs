use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("finance_core_cli").unwrap();
    cmd.env("FINANCE_CORE_CLI_SCRIPT", "1")
        .env("FINANCE_CORE_HOME", home.path())
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_records_and_persists_transactions() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add expense 42 cat-food \"Tacos al pastor\" acc-cash\ntransactions\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded expense $42.00"))
        .stdout(predicate::str::contains("Tacos al pastor"));

    let data = std::fs::read_to_string(home.path().join("data/finance_app_data_v3.json")).unwrap();
    assert!(data.contains("Tacos al pastor"));

    cli(&home)
        .write_stdin("accounts\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Efectivo"));
}

#[test]
fn script_mode_reports_bad_input_and_continues() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("sumary\ntransfer 10 acc-cash acc-cash\nhelp transfer\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean `summary`?"))
        .stderr(predicate::str::contains("Source and destination accounts must differ"))
        .stdout(predicate::str::contains("Usage: transfer <amount>"));
}

#[test]
fn transfer_and_quick_templates_from_script() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("transfer 150 acc-debit acc-cash\nrun qt-cafe\nrun qt-uber\nrun qt-uber 80\nquick\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved $150.00 from Cuenta Ahorro to Efectivo"))
        .stdout(predicate::str::contains("Recorded Café $55.00."))
        .stderr(predicate::str::contains("has no fixed amount"))
        .stdout(predicate::str::contains("Recorded Uber $80.00."))
        .stdout(predicate::str::contains("Cada 15° del mes"));
}

#[test]
fn locale_change_applies_to_schedules_and_persists() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("locale en\nquick\nlocale fr\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Locale set to en."))
        .stdout(predicate::str::contains("Every 15th of the month"))
        .stderr(predicate::str::contains("unknown locale `fr`"));

    cli(&home)
        .write_stdin("locale\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Locale: en"));
}
