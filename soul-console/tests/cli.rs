use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "soul-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run(saves: &Path, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_soul-console");
    Command::new(exe)
        .arg("--saves")
        .arg(saves)
        .args(args)
        .output()
        .expect("run cli")
}

fn json_report(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("json report")
}

fn read_save(saves: &Path, player: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(saves.join(format!("{player}.json"))).expect("read save");
    serde_json::from_str(&text).expect("parse save")
}

#[test]
fn cli_debug_commands_require_debug_mode() {
    let saves = temp_path("gate");
    let output = run(&saves, &["addxp", "500"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("debug command"));
}

#[test]
fn cli_addxp_levels_and_persists() {
    let saves = temp_path("addxp");
    let output = run(&saves, &["--debug", "--report", "json", "addxp", "2000"]);
    assert!(output.status.success());
    let report = json_report(&output);
    assert_eq!(report["hud"]["level"], 4);
    assert_eq!(report["hud"]["experience"], 399);
    assert_eq!(report["outcome"]["level_ups"].as_array().unwrap().len(), 3);

    let save = read_save(&saves, "player");
    assert_eq!(save["currentLevel"], 4);
    assert_eq!(save["currentXP"], 399);
    assert_eq!(save["basicPoints"], 3);
}

#[test]
fn cli_kills_accumulate_across_runs() {
    let saves = temp_path("kills");
    for _ in 0..2 {
        let output = run(
            &saves,
            &["--player", "Guide", "--report", "json", "kill", "--hp", "10000"],
        );
        assert!(output.status.success());
    }
    let save = read_save(&saves, "Guide");
    assert_eq!(save["currentXP"], 200);

    let boss = run(
        &saves,
        &["--player", "Guide", "kill", "--hp", "50000", "--boss"],
    );
    assert!(boss.status.success());
    assert_eq!(read_save(&saves, "Guide")["currentXP"], 200);
}

#[test]
fn cli_refused_allocation_exits_nonzero() {
    let saves = temp_path("allocate");
    let output = run(&saves, &["allocate", "defense"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("needs 2"));

    let setup = run(&saves, &["--debug", "addbasic", "2"]);
    assert!(setup.status.success());
    let output = run(&saves, &["--report", "json", "allocate", "defense"]);
    assert!(output.status.success());
    assert_eq!(json_report(&output)["hud"]["attributes"][1]["rank"], 1);
    assert_eq!(read_save(&saves, "player")["soulDefenseRank"], 1);
}

#[test]
fn cli_talents_lists_the_tree() {
    let saves = temp_path("talents");
    let output = run(&saves, &["--report", "json", "talents"]);
    assert!(output.status.success());
    let report = json_report(&output);
    let talents = report["talents"].as_array().unwrap();
    assert_eq!(talents.len(), 7);
    assert_eq!(talents[0]["id"], "soul_core");
    assert_eq!(talents[0]["status"], "locked_points");
}

#[test]
fn cli_simulation_is_seeded() {
    let first = run(
        &temp_path("sim-a"),
        &["--report", "json", "simulate", "--seed", "42", "--kills", "250"],
    );
    let second = run(
        &temp_path("sim-b"),
        &["--report", "json", "simulate", "--seed", "42", "--kills", "250"],
    );
    assert!(first.status.success());
    assert!(second.status.success());
    assert_eq!(
        json_report(&first)["outcome"]["simulation"],
        json_report(&second)["outcome"]["simulation"]
    );
}

#[test]
fn cli_phase_flag_raises_the_cap() {
    let saves = temp_path("phase");
    let output = run(
        &saves,
        &["--debug", "--phase", "hardmode", "--report", "json", "setlevel", "35"],
    );
    assert!(output.status.success());
    let report = json_report(&output);
    assert_eq!(report["hud"]["level"], 35);
    assert_eq!(report["hud"]["level_cap"], 40);
}

#[test]
fn cli_logs_refusals_and_save_writes() {
    let saves = temp_path("logging");
    let output = Command::new(env!("CARGO_BIN_EXE_soul-console"))
        .env("RUST_LOG", "soul_console=debug")
        .arg("--saves")
        .arg(&saves)
        .args(["allocate", "agility"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loaded player at level 1"));
    assert!(stderr.contains("allocate refused for player"));
    assert!(stderr.contains("saved player at level 1"));
}
