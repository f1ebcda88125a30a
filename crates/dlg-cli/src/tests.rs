use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use dlg_api::create_session_from_sources;
use dlg_core::PlayerState;
use dlg_player::Player;
use dlg_runtime::DialogueSession;

use crate::line_mode::run_play_with_io;
use crate::source_loader::collect_script_paths;

const SHOP_SCRIPT: &str = "ROOT:start\n\
    NODE:start\n\
    SPEAKER:Merchant\n\
    MSG:Care to trade?\n\
    CHOICE:Buy potion|target:farewell|gold:-10|item:Health Potion:POTION:25|condition:gold>=10\n\
    CHOICE:Leave|target:farewell\n\
    NODE:farewell\n\
    MSG:Safe travels.\n";

fn shop_session() -> DialogueSession {
    create_session_from_sources(&[("shop.dlg".to_string(), SHOP_SCRIPT.to_string())])
        .expect("shop script should load")
}

fn run_line_mode(
    session: &mut DialogueSession,
    player: &mut Player,
    save_file: &str,
    input: &str,
) -> (i32, String) {
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    let code = run_play_with_io(save_file, session, player, &mut reader, &mut output)
        .expect("line mode should run");
    (code, String::from_utf8(output).expect("output should be utf-8"))
}

#[test]
fn line_mode_renders_the_node_and_ends_on_a_terminal_target() {
    let mut session = shop_session();
    let mut player = Player::new("Tester");

    let (code, output) = run_line_mode(&mut session, &mut player, "unused.json", "1\n");
    assert_eq!(code, 0);
    assert!(output.contains("Merchant: Care to trade?"));
    assert!(output.contains("[0] Buy potion"));
    assert!(output.contains("Safe travels."));
    assert!(output.contains("(the conversation ends)"));
}

#[test]
fn line_mode_reports_a_blocked_choice() {
    let mut session = shop_session();
    let mut player = Player::new("Tester");

    let (code, output) = run_line_mode(&mut session, &mut player, "unused.json", "0\n:quit\n");
    assert_eq!(code, 0);
    assert!(output.contains("(condition not met: gold>=10)"));
    assert_eq!(player.gold(), 0);
}

#[test]
fn line_mode_applies_a_purchase() {
    let mut session = shop_session();
    let mut player = Player::new("Tester");
    player.stats_mut().add_gold(15);

    let (code, _) = run_line_mode(&mut session, &mut player, "unused.json", "0\n");
    assert_eq!(code, 0);
    assert_eq!(player.gold(), 5);
    assert!(player.has_item("Health Potion"));
}

#[test]
fn line_mode_rejects_junk_and_out_of_range_input() {
    let mut session = shop_session();
    let mut player = Player::new("Tester");

    let (_, output) = run_line_mode(
        &mut session,
        &mut player,
        "unused.json",
        "banana\n7\n:quit\n",
    );
    assert!(output.contains("enter a choice number or :help"));
    assert!(output.contains("no choice 7"));
}

#[test]
fn line_mode_prints_stats_on_command() {
    let mut session = shop_session();
    let mut player = Player::new("Tester");

    let (_, output) = run_line_mode(&mut session, &mut player, "unused.json", ":stats\n:quit\n");
    assert!(output.contains("=== Tester (level 1) ==="));
    assert!(output.contains("HP 100/100"));
}

#[test]
fn line_mode_saves_and_loads_through_the_session() {
    let save_file = env::temp_dir().join(format!(
        "dlg_cli_save_roundtrip_{}.json",
        std::process::id()
    ));
    let save_file = save_file.to_string_lossy().to_string();

    let mut session = shop_session();
    let mut player = Player::new("Tester");
    player.stats_mut().add_gold(77);
    let (_, output) = run_line_mode(&mut session, &mut player, &save_file, ":save\n:quit\n");
    assert!(output.contains("saved to"));

    let mut session = shop_session();
    let mut restored = Player::new("Someone Else");
    let (_, output) = run_line_mode(&mut session, &mut restored, &save_file, ":load\n:quit\n");
    fs::remove_file(&save_file).expect("temp save should clean up");
    assert!(output.contains("loaded"));
    assert_eq!(restored.stats().name(), "Tester");
    assert_eq!(restored.gold(), 77);
}

fn temp_scripts_dir(tag: &str) -> PathBuf {
    env::temp_dir().join(format!("dlg_cli_scripts_{}_{}", tag, std::process::id()))
}

#[test]
fn collect_script_paths_puts_main_first() {
    let dir = temp_scripts_dir("main_first");
    fs::create_dir_all(&dir).expect("temp dir should create");
    fs::write(dir.join("a.dlg"), "NODE:a\n").expect("script should write");
    fs::write(dir.join("main.dlg"), "ROOT:a\n").expect("script should write");
    fs::write(dir.join("notes.txt"), "not a script").expect("file should write");

    let paths = collect_script_paths(&dir.to_string_lossy(), None)
        .expect("scripts should collect");
    fs::remove_dir_all(&dir).expect("temp dir should clean up");

    let names: Vec<String> = paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["main.dlg".to_string(), "a.dlg".to_string()]);
}

#[test]
fn collect_script_paths_honors_an_explicit_primary() {
    let dir = temp_scripts_dir("explicit");
    fs::create_dir_all(&dir).expect("temp dir should create");
    fs::write(dir.join("a.dlg"), "NODE:a\n").expect("script should write");
    fs::write(dir.join("main.dlg"), "ROOT:a\n").expect("script should write");

    let paths = collect_script_paths(&dir.to_string_lossy(), Some("a.dlg"))
        .expect("scripts should collect");
    fs::remove_dir_all(&dir).expect("temp dir should clean up");

    assert_eq!(
        paths[0].file_name().unwrap().to_string_lossy(),
        "a.dlg"
    );
}

#[test]
fn collect_script_paths_fails_for_a_missing_primary() {
    let dir = temp_scripts_dir("missing_primary");
    fs::create_dir_all(&dir).expect("temp dir should create");
    fs::write(dir.join("a.dlg"), "NODE:a\n").expect("script should write");

    let error = collect_script_paths(&dir.to_string_lossy(), Some("ghost.dlg"))
        .expect_err("missing primary should fail");
    fs::remove_dir_all(&dir).expect("temp dir should clean up");
    assert_eq!(error.code, "CLI_PRIMARY_NOT_FOUND");
}

#[test]
fn collect_script_paths_fails_on_an_empty_directory() {
    let dir = temp_scripts_dir("empty");
    fs::create_dir_all(&dir).expect("temp dir should create");

    let error = collect_script_paths(&dir.to_string_lossy(), None)
        .expect_err("empty directory should fail");
    fs::remove_dir_all(&dir).expect("temp dir should clean up");
    assert_eq!(error.code, "CLI_NO_SCRIPTS");
}
