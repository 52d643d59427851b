use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn couple(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("couple").unwrap();
    cmd.env("COUPLE_PLANNER_DATA_DIR", data_dir)
        .env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let temp = TempDir::new().unwrap();
    couple(temp.path())
        .args(["init", "--name", "Ana", "--partner", "Bruno"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created profile for Ana & Bruno"));
    temp
}

#[test]
fn commands_require_init() {
    let temp = TempDir::new().unwrap();
    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("couple init"));
}

#[test]
fn init_twice_keeps_the_first_profile() {
    let temp = initialized();
    couple(temp.path())
        .args(["init", "--name", "Carla"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized for Ana & Bruno"));

    couple(temp.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Couple: Ana & Bruno"));
}

#[test]
fn preset_is_saved_and_reloaded() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "preset", "standard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved."))
        .stdout(predicate::str::contains("R$ 90000.00"));

    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 40000.00"))
        .stdout(predicate::str::contains("Unsaved changes").not());
}

#[test]
fn custom_category_lifecycle() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "add", "Lua de Mel", "--planned", "5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lua de Mel"));

    couple(temp.path())
        .args(["wedding", "add", "lua de mel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    couple(temp.path())
        .args(["wedding", "rename", "Lua de Mel", "Honeymoon"])
        .assert()
        .success();

    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Honeymoon"))
        .stdout(predicate::str::contains("R$ 5000.00"));

    couple(temp.path())
        .args(["wedding", "remove", "honeymoon"])
        .assert()
        .success();

    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Honeymoon").not());
}

#[test]
fn dry_run_does_not_save() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "set", "ceremony", "--planned", "123", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 123.00"))
        .stdout(predicate::str::contains("Dry run"));

    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 123.00").not());
}

#[test]
fn builtin_categories_are_fixed_in_presets_mode() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "remove", "Party"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built-in"));

    couple(temp.path())
        .args(["wedding", "rename", "Party", "Festa"])
        .assert()
        .failure();
}

#[test]
fn custom_mode_hides_unpersisted_builtins() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "mode", "custom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No categories yet"));

    couple(temp.path())
        .args(["wedding", "preset", "luxury"])
        .assert()
        .failure();

    couple(temp.path())
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculator mode: custom"));
}

#[test]
fn summary_reflects_income_housing_and_recurring_costs() {
    let temp = initialized();
    couple(temp.path())
        .args(["profile", "income", "--you", "6000", "--partner", "4000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 10000.00"));

    couple(temp.path())
        .args(["housing", "rent", "3000", "--select"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rent (selected)"));

    couple(temp.path())
        .args(["recurring", "add", "Internet", "500", "--category", "Utilities"])
        .assert()
        .success();

    couple(temp.path())
        .args(["recurring", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("utilities"))
        .stdout(predicate::str::contains("Monthly total: R$ 500.00"));

    couple(temp.path())
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Within budget"))
        .stdout(predicate::str::contains("R$ 6500.00"));

    couple(temp.path())
        .args(["projection"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved in 12 months: R$ 78000.00"));
}

#[test]
fn home_checklist_flow() {
    let temp = initialized();
    couple(temp.path())
        .args([
            "home", "add", "Sofa", "--room", "living room", "--type", "furniture",
            "--estimated", "3000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added item: Sofa"));

    couple(temp.path())
        .args(["home", "toggle", "sofa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sofa is now Purchased"));

    couple(temp.path())
        .args(["home", "list", "--status", "purchased"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"));

    couple(temp.path())
        .args(["home", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 purchased (100%)"));
}

#[test]
fn invalid_amount_is_rejected() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "set", "party", "--planned", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid planned amount"));
}

#[test]
fn summary_suggests_reserve_when_wedding_exceeds_a_year_of_income() {
    let temp = initialized();
    couple(temp.path())
        .args(["profile", "income", "--combined", "5000"])
        .assert()
        .success();

    couple(temp.path())
        .args(["wedding", "preset", "standard"])
        .assert()
        .success();

    couple(temp.path())
        .args(["summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 9000.00 (10%) as an emergency reserve"));
}

#[test]
fn huge_amounts_do_not_crash() {
    let temp = initialized();
    couple(temp.path())
        .args(["wedding", "set", "party", "--planned", "92233720368547759"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));

    for category in ["party", "ceremony"] {
        couple(temp.path())
            .args(["wedding", "set", category, "--planned", "50000000000000000"])
            .assert()
            .success();
    }

    couple(temp.path())
        .args(["wedding", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 92233720368547758.07"));
}
