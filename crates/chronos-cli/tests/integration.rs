#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chronos(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chronos").unwrap();
    cmd.current_dir(dir.path()).env("CHRONOS_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    chronos(dir).arg("init").assert().success();
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.arg("--json").assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn add_activity(dir: &TempDir, title: &str, start: &str, end: &str, day: &str) -> i64 {
    let json = json_output(chronos(dir).args([
        "activity", "add", title, "--start", start, "--end", end, "--day", day,
    ]));
    json["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// chronos init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_config_and_database() {
    let dir = TempDir::new().unwrap();
    chronos(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .chronos/config.yaml"));

    assert!(dir.path().join(".chronos").is_dir());
    assert!(dir.path().join(".chronos/config.yaml").exists());
    assert!(dir.path().join(".chronos/timetable.db").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let id = add_activity(&dir, "Gym", "07:00", "08:00", "mon");
    chronos(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .chronos/config.yaml"));

    let list = json_output(chronos(&dir).args(["activity", "list"]));
    assert_eq!(list[0]["id"], id);
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    chronos(&dir)
        .args(["activity", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
    chronos(&dir)
        .args(["day"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chronos init"));
}

// ---------------------------------------------------------------------------
// chronos activity
// ---------------------------------------------------------------------------

#[test]
fn activity_add_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args([
            "activity", "add", "Deep", "work", "--start", "09:00", "--end", "10:30", "--day", "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added activity [1]: Deep work (Wed 09:00-10:30)"));

    chronos(&dir)
        .args(["activity", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep work"))
        .stdout(predicate::str::contains("09:00-10:30"));

    let list = json_output(chronos(&dir).args(["activity", "list", "--day", "wed"]));
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["category"], "General");
    assert_eq!(list[0]["color"], "blue");
    assert_eq!(list[0]["completed"], false);

    let other_day = json_output(chronos(&dir).args(["activity", "list", "--day", "thu"]));
    assert_eq!(other_day, serde_json::json!([]));
}

#[test]
fn activity_add_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["activity", "add", "Gym", "--start", "7:00", "--end", "08:00", "--day", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --start '7:00'"));
    chronos(&dir)
        .args(["activity", "add", "Gym", "--start", "07:00", "--end", "08:00", "--day", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --day"));
    chronos(&dir)
        .args(["activity", "add", " ", "--start", "07:00", "--end", "08:00", "--day", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title must not be empty"));

    let list = json_output(chronos(&dir).args(["activity", "list"]));
    assert_eq!(list, serde_json::json!([]));
}

#[test]
fn activity_toggle_twice_restores() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let id = add_activity(&dir, "Read", "20:00", "21:00", "tue");
    let id_arg = id.to_string();

    chronos(&dir)
        .args(["activity", "toggle", &id_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed activity"));
    let list = json_output(chronos(&dir).args(["activity", "list"]));
    assert_eq!(list[0]["completed"], true);

    chronos(&dir)
        .args(["activity", "toggle", &id_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened activity"));
    let list = json_output(chronos(&dir).args(["activity", "list"]));
    assert_eq!(list[0]["completed"], false);
}

#[test]
fn activity_toggle_and_delete_missing_ids_succeed() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["activity", "toggle", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));
    let json = json_output(chronos(&dir).args(["activity", "delete", "99"]));
    assert_eq!(json["success"], true);
}

#[test]
fn activity_delete_removes() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let id = add_activity(&dir, "Read", "20:00", "21:00", "tue");
    chronos(&dir)
        .args(["activity", "delete", &id.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted activity"));
    chronos(&dir)
        .args(["activity", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activities."));
}

// ---------------------------------------------------------------------------
// chronos template
// ---------------------------------------------------------------------------

#[test]
fn save_template_then_use_it() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let id = add_activity(&dir, "Piano", "18:00", "18:45", "thu");

    let saved = json_output(chronos(&dir).args(["activity", "save-template", &id.to_string()]));
    let template_id = saved["id"].as_i64().unwrap().to_string();

    let templates = json_output(chronos(&dir).args(["template", "list"]));
    assert_eq!(templates[0]["title"], "Piano");

    let used = json_output(chronos(&dir).args([
        "template", "use", &template_id, "--day", "sat", "--start", "11:00",
    ]));
    assert_eq!(used["activity"]["title"], "Piano");
    assert_eq!(used["activity"]["dayOfWeek"], 6);
    assert_eq!(used["activity"]["startTime"], "11:00");
    assert_eq!(used["activity"]["endTime"], "10:00");

    let list = json_output(chronos(&dir).args(["activity", "list"]));
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[test]
fn template_use_fills_defaults() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let saved = json_output(chronos(&dir).args(["template", "add", "Morning", "run"]));
    let template_id = saved["id"].as_i64().unwrap().to_string();

    let used = json_output(chronos(&dir).args(["template", "use", &template_id, "--day", "1"]));
    assert_eq!(used["activity"]["title"], "Morning run");
    assert_eq!(used["activity"]["category"], "General");
    assert_eq!(used["activity"]["color"], "blue");
    assert_eq!(used["activity"]["startTime"], "09:00");
    assert_eq!(used["activity"]["endTime"], "10:00");
}

#[test]
fn save_template_for_missing_activity_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["activity", "save-template", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("activity [5] not found"));
    chronos(&dir)
        .args(["template", "use", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template [5] not found"));
}

#[test]
fn template_delete() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["template", "add", "Run", "--color", "rose"])
        .assert()
        .success();
    chronos(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rose"));
    chronos(&dir)
        .args(["template", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted template [1]"));
    chronos(&dir)
        .args(["template", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No templates."));
}

// ---------------------------------------------------------------------------
// chronos day / watch
// ---------------------------------------------------------------------------

#[test]
fn day_view_classifies_entries() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    add_activity(&dir, "Review", "10:30", "11:00", "wed");
    add_activity(&dir, "Deep work", "09:00", "10:00", "wed");
    add_activity(&dir, "Gym", "07:00", "08:00", "wed");

    let view = json_output(chronos(&dir).args(["day", "--day", "3", "--today", "3", "--at", "09:30"]));
    let statuses: Vec<&str> = view["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, vec!["past", "now", "future"]);
    assert_eq!(view["summary"], "0/3 completed");

    chronos(&dir)
        .args(["day", "--day", "wed", "--today", "wed", "--at", "09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wednesday"))
        .stdout(predicate::str::contains("Ended"))
        .stdout(predicate::str::contains("Now"));
}

#[test]
fn day_navigation_wraps() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let view = json_output(chronos(&dir).args(["day", "--day", "sat", "--next"]));
    assert_eq!(view["dayName"], "Sunday");
    let view = json_output(chronos(&dir).args(["day", "--day", "sun", "--prev"]));
    assert_eq!(view["dayName"], "Saturday");
    assert_eq!(view["isEmpty"], true);
}

#[test]
fn day_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["day", "--at", "24:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --at"));
}

#[test]
fn watch_once_renders_board() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    add_activity(&dir, "Gym", "07:00", "08:00", "fri");
    chronos(&dir)
        .args(["watch", "--day", "fri", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Friday"))
        .stdout(predicate::str::contains("Gym"));
}

// ---------------------------------------------------------------------------
// chronos config
// ---------------------------------------------------------------------------

#[test]
fn config_show_and_validate() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    chronos(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tick_seconds: 30"));
    chronos(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(
        dir.path().join(".chronos/config.yaml"),
        "version: 1\nclock:\n  tick_seconds: 0\n",
    )
    .unwrap();
    chronos(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error]"))
        .stderr(predicate::str::contains("config validation found errors"));
}
