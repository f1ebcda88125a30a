use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dlg_api::create_session_from_files;
use dlg_core::{DialogueError, NodeId};
use dlg_player::{load_game, save_game, Player};
use dlg_runtime::{ChoiceOutcome, DialogueSession};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use crate::{collect_script_paths, map_io, TuiArgs};

const FRAME_TICK_MS: u64 = 100;
const TYPEWRITER_CHARS_PER_SECOND: f32 = 60.0;

struct TuiTerminal {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiTerminal {
    fn new() -> Result<Self, DialogueError> {
        enable_raw_mode().map_err(map_io)?;
        io::stdout().execute(EnterAlternateScreen).map_err(map_io)?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).map_err(map_io)?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TuiTerminal {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
    }
}

struct UiState {
    current: NodeId,
    selected: usize,
    revealed: f32,
    status: String,
    ended: bool,
}

impl UiState {
    fn enter_node(&mut self, node: NodeId) {
        self.current = node;
        self.selected = 0;
        self.revealed = 0.0;
    }
}

pub(crate) fn run_tui(args: TuiArgs) -> Result<i32, DialogueError> {
    let paths = collect_script_paths(&args.scripts_dir, args.primary.as_deref())?;
    let mut session = create_session_from_files(&paths)?;
    let mut player = Player::new(args.player_name.clone());

    let root = session.resolve_root()?;
    let mut ui = UiState {
        current: root,
        selected: 0,
        revealed: 0.0,
        status: "up/down select, enter confirm, s save, l load, q quit".to_string(),
        ended: session.node(root).choices.is_empty(),
    };

    let mut terminal = TuiTerminal::new()?;
    let tick = Duration::from_millis(FRAME_TICK_MS);
    let mut last_frame = Instant::now();

    loop {
        terminal
            .terminal_mut()
            .draw(|frame| render(frame, &session, &player, &ui))
            .map_err(map_io)?;

        let delta = last_frame.elapsed().as_secs_f32();
        last_frame = Instant::now();
        session.tick(delta, &mut player);
        ui.revealed += delta * TYPEWRITER_CHARS_PER_SECOND;

        if !event::poll(tick).map_err(map_io)? {
            continue;
        }
        let Event::Key(key) = event::read().map_err(map_io)? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let choice_count = session.node(ui.current).choices.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(0),
            KeyCode::Up => {
                if choice_count > 0 {
                    ui.selected = ui.selected.checked_sub(1).unwrap_or(choice_count - 1);
                }
            }
            KeyCode::Down => {
                if choice_count > 0 {
                    ui.selected = (ui.selected + 1) % choice_count;
                }
            }
            KeyCode::Char('s') => {
                let node_id = session.node(ui.current).id.clone();
                ui.status = match save_game(&player, &node_id, &args.save_file) {
                    Ok(()) => format!("saved to {}", args.save_file),
                    Err(error) => format!("save failed: {}", error),
                };
            }
            KeyCode::Char('l') => match load_game(&args.save_file) {
                Ok((loaded, node_id)) => match session.resolve_node(&node_id) {
                    Ok(node) => {
                        player = loaded;
                        ui.enter_node(node);
                        ui.ended = session.node(node).choices.is_empty();
                        ui.status = format!("loaded {}", args.save_file);
                    }
                    Err(error) => ui.status = format!("load failed: {}", error),
                },
                Err(error) => ui.status = format!("load failed: {}", error),
            },
            KeyCode::Enter => {
                let message_len = session.node(ui.current).message.chars().count() as f32;
                if ui.revealed < message_len {
                    // First enter completes the reveal.
                    ui.revealed = message_len;
                } else if ui.ended {
                    return Ok(0);
                } else if choice_count > 0 {
                    match session.select_choice(ui.current, ui.selected, &mut player)? {
                        ChoiceOutcome::Blocked { condition } => {
                            ui.status = format!("condition not met: {}", condition);
                        }
                        ChoiceOutcome::Advanced {
                            target: Some(target),
                        } => {
                            ui.enter_node(target);
                            ui.ended = session.node(target).choices.is_empty();
                            if ui.ended {
                                ui.status =
                                    "the conversation ends, enter or q to leave".to_string();
                            }
                        }
                        ChoiceOutcome::Advanced { target: None } => {
                            ui.ended = true;
                            ui.status = "the conversation ends, enter or q to leave".to_string();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn render(frame: &mut Frame, session: &DialogueSession, player: &Player, ui: &UiState) {
    let node = session.node(ui.current);
    let choice_rows = node.choices.len().max(1) as u16 + 2;
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(choice_rows),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let shown: String = node
        .message
        .chars()
        .take(ui.revealed.max(0.0) as usize)
        .collect();
    let title = if node.speaker.is_empty() {
        "dialogue".to_string()
    } else {
        node.speaker.clone()
    };
    frame.render_widget(
        Paragraph::new(shown)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        areas[0],
    );

    let items: Vec<ListItem> = if node.choices.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "(no choices)",
            Style::default().fg(Color::DarkGray),
        )))]
    } else {
        node.choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                let (marker, style) = if index == ui.selected {
                    (
                        "> ",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default())
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{}{}", marker, choice.text),
                    style,
                )))
            })
            .collect()
    };
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title("choices")),
        areas[1],
    );

    let stats = player.stats();
    let status_line = format!(
        "{}  lv {}  HP {}/{}  MP {}/{}  gold {}  |  {}",
        stats.name(),
        stats.level(),
        stats.current_health(),
        stats.max_health(),
        stats.current_mana(),
        stats.max_mana(),
        stats.gold(),
        ui.status
    );
    frame.render_widget(
        Paragraph::new(status_line).block(Block::default().borders(Borders::ALL)),
        areas[2],
    );
}
