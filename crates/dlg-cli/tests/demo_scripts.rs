use std::path::PathBuf;

use dlg_api::create_session_from_files;
use dlg_core::PlayerState;
use dlg_player::Player;
use dlg_runtime::{ChoiceOutcome, DialogueSession};

fn demo_paths() -> Vec<PathBuf> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("demos");
    vec![root.join("main.dlg"), root.join("village.dlg")]
}

fn demo_session() -> DialogueSession {
    create_session_from_files(&demo_paths()).expect("demo scripts should load")
}

#[test]
fn demo_scripts_load_and_every_node_resolves() {
    let mut session = demo_session();
    let root = session.resolve_root().expect("root should resolve");
    assert_eq!(session.node(root).id, "gate");

    for id in session.graph().record_ids() {
        session
            .resolve_node(&id)
            .unwrap_or_else(|error| panic!("node \"{}\" should resolve: {}", id, error));
    }
}

#[test]
fn demo_graph_cycles_across_files() {
    let mut session = demo_session();
    let gate = session.resolve_root().expect("root should resolve");
    let market = session.node(gate).choices[0]
        .target
        .expect("gate should lead to the market");

    // market's "Back to the gate." choice closes the cross-file cycle.
    let back = session
        .node(market)
        .choices
        .iter()
        .find_map(|choice| (choice.text == "Back to the gate.").then_some(choice.target))
        .expect("market should link back");
    assert_eq!(back, Some(gate));
}

#[test]
fn demo_market_job_pays_out() {
    let mut session = demo_session();
    let market = session.resolve_node("market").expect("market should resolve");
    let job = session.resolve_node("job").expect("job should resolve");

    let mut player = Player::new("Smoke");
    let outcome = session
        .select_choice(market, 2, &mut player)
        .expect("asking about work should run");
    assert_eq!(outcome, ChoiceOutcome::Advanced { target: Some(job) });

    let outcome = session
        .select_choice(job, 0, &mut player)
        .expect("helping out should run");
    assert_eq!(
        outcome,
        ChoiceOutcome::Advanced {
            target: Some(market)
        }
    );
    assert_eq!(player.gold(), 20);

    // Earned enough for the potion now.
    let outcome = session
        .select_choice(market, 0, &mut player)
        .expect("buying the potion should run");
    assert!(matches!(outcome, ChoiceOutcome::Advanced { .. }));
    assert_eq!(player.gold(), 10);
    assert!(player.has_item("Health Potion"));
}
