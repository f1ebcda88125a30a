use std::path::Path;

use dlg_core::{DialogueError, NodeId};
use dlg_player::{load_game, Player};
use dlg_runtime::DialogueSession;

/// Builds a session from in-memory sources in load order. The first source
/// is the primary file: its `ROOT:` line configures the session root.
pub fn create_session_from_sources(
    sources: &[(String, String)],
) -> Result<DialogueSession, DialogueError> {
    let Some(((primary_name, primary_source), rest)) = sources.split_first() else {
        return Err(DialogueError::new(
            "API_NO_SOURCES",
            "At least one script source is required.",
        ));
    };

    let mut session = DialogueSession::new();
    session.load_primary_source(primary_name.clone(), primary_source)?;
    for (name, source) in rest {
        session.load_additional_source(name.clone(), source)?;
    }
    Ok(session)
}

/// Builds a session from script files in load order; the first path is the
/// primary file.
pub fn create_session_from_files(
    paths: &[impl AsRef<Path>],
) -> Result<DialogueSession, DialogueError> {
    let Some((primary, rest)) = paths.split_first() else {
        return Err(DialogueError::new(
            "API_NO_SOURCES",
            "At least one script file is required.",
        ));
    };

    let mut session = DialogueSession::new();
    session.load_primary_file(primary)?;
    for path in rest {
        session.load_additional_file(path)?;
    }
    Ok(session)
}

/// Loads a save record and resumes `session` at the node it recorded,
/// building that node on demand. Returns the restored player and the resumed
/// node.
pub fn resume_session(
    session: &mut DialogueSession,
    save_path: impl AsRef<Path>,
) -> Result<(Player, NodeId), DialogueError> {
    let (player, node_id) = load_game(save_path)?;
    let node = session.resolve_node(&node_id)?;
    Ok((player, node))
}
