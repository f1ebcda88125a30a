use std::io::{self, BufRead, Write};
use std::time::Instant;

use dlg_api::create_session_from_files;
use dlg_core::{DialogueError, NodeId};
use dlg_player::{load_game, save_game, Player};
use dlg_runtime::{ChoiceOutcome, DialogueSession};

use crate::{collect_script_paths, map_io, PlayArgs};

pub(crate) fn run_play(args: PlayArgs) -> Result<i32, DialogueError> {
    let paths = collect_script_paths(&args.scripts_dir, args.primary.as_deref())?;
    let mut session = create_session_from_files(&paths)?;
    let mut player = Player::new(args.player_name);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_play_with_io(
        &args.save_file,
        &mut session,
        &mut player,
        &mut reader,
        &mut writer,
    )
}

pub(crate) fn run_play_with_io(
    save_file: &str,
    session: &mut DialogueSession,
    player: &mut Player,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogueError> {
    writeln!(writer, "dialogue-player line mode").map_err(map_io)?;
    writeln!(writer, "commands: :help :stats :save :load :quit").map_err(map_io)?;

    let mut current = session.resolve_root()?;
    render_node(writer, session, current)?;
    if session.node(current).choices.is_empty() {
        writeln!(writer, "(the conversation ends)").map_err(map_io)?;
        return Ok(0);
    }

    let mut last_input = Instant::now();
    loop {
        write!(writer, "> ").map_err(map_io)?;
        writer.flush().map_err(map_io)?;

        let mut raw = String::new();
        if reader.read_line(&mut raw).map_err(map_io)? == 0 {
            return Ok(0);
        }
        let raw = raw.trim();

        // Delayed actions advance by the wall-clock time the player spent on
        // this prompt.
        session.tick(last_input.elapsed().as_secs_f32(), player);
        last_input = Instant::now();

        match raw {
            "" => continue,
            ":quit" => return Ok(0),
            ":help" => {
                writeln!(writer, "commands: :help :stats :save :load :quit").map_err(map_io)?;
                writeln!(writer, "enter a choice number to pick it").map_err(map_io)?;
                continue;
            }
            ":stats" => {
                render_stats(writer, player)?;
                continue;
            }
            ":save" => {
                let node_id = session.node(current).id.clone();
                match save_game(player, &node_id, save_file) {
                    Ok(()) => writeln!(writer, "saved to {}", save_file).map_err(map_io)?,
                    Err(error) => {
                        writeln!(writer, "save failed: {}", error).map_err(map_io)?
                    }
                }
                continue;
            }
            ":load" => {
                match load_session_state(session, save_file) {
                    Ok((loaded, node)) => {
                        *player = loaded;
                        current = node;
                        writeln!(writer, "loaded {}", save_file).map_err(map_io)?;
                        render_node(writer, session, current)?;
                    }
                    Err(error) => {
                        writeln!(writer, "load failed: {}", error).map_err(map_io)?
                    }
                }
                continue;
            }
            _ => {}
        }

        let Ok(index) = raw.parse::<usize>() else {
            writeln!(writer, "enter a choice number or :help").map_err(map_io)?;
            continue;
        };
        if index >= session.node(current).choices.len() {
            writeln!(writer, "no choice {}", index).map_err(map_io)?;
            continue;
        }

        match session.select_choice(current, index, player)? {
            ChoiceOutcome::Blocked { condition } => {
                writeln!(writer, "(condition not met: {})", condition).map_err(map_io)?;
            }
            ChoiceOutcome::Advanced {
                target: Some(target),
            } => {
                current = target;
                render_node(writer, session, current)?;
                if session.node(current).choices.is_empty() {
                    writeln!(writer, "(the conversation ends)").map_err(map_io)?;
                    return Ok(0);
                }
            }
            ChoiceOutcome::Advanced { target: None } => {
                writeln!(writer, "(the conversation ends)").map_err(map_io)?;
                return Ok(0);
            }
        }
    }
}

fn load_session_state(
    session: &mut DialogueSession,
    save_file: &str,
) -> Result<(Player, NodeId), DialogueError> {
    let (player, node_id) = load_game(save_file)?;
    let node = session.resolve_node(&node_id)?;
    Ok((player, node))
}

fn render_node(
    writer: &mut dyn Write,
    session: &DialogueSession,
    node_id: NodeId,
) -> Result<(), DialogueError> {
    let node = session.node(node_id);
    writeln!(writer).map_err(map_io)?;
    if node.speaker.is_empty() {
        writeln!(writer, "{}", node.message).map_err(map_io)?;
    } else {
        writeln!(writer, "{}: {}", node.speaker, node.message).map_err(map_io)?;
    }
    for (index, choice) in node.choices.iter().enumerate() {
        writeln!(writer, "  [{}] {}", index, choice.text).map_err(map_io)?;
    }
    Ok(())
}

fn render_stats(writer: &mut dyn Write, player: &Player) -> Result<(), DialogueError> {
    let stats = player.stats();
    writeln!(writer, "=== {} (level {}) ===", stats.name(), stats.level()).map_err(map_io)?;
    writeln!(
        writer,
        "HP {}/{}  MP {}/{}",
        stats.current_health(),
        stats.max_health(),
        stats.current_mana(),
        stats.max_mana()
    )
    .map_err(map_io)?;
    writeln!(
        writer,
        "STR {}  DEF {}  INT {}  AGI {}",
        stats.strength(),
        stats.defense(),
        stats.intelligence(),
        stats.agility()
    )
    .map_err(map_io)?;
    writeln!(
        writer,
        "gold {}  xp {}/{}",
        stats.gold(),
        stats.experience(),
        stats.level() * 100
    )
    .map_err(map_io)?;
    writeln!(
        writer,
        "carrying {} item(s), {}/{} weight",
        player.inventory().item_count(),
        player.inventory().current_weight(),
        player.inventory().max_weight()
    )
    .map_err(map_io)?;
    Ok(())
}
