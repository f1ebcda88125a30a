use dlg_api::create_session_from_files;
use dlg_core::DialogueError;

use crate::{collect_script_paths, CheckArgs};

/// Loads a scripts directory, builds every defined node, and reports choice
/// targets that no loaded file defines. Missing targets are lint findings,
/// not build failures.
pub(crate) fn run_check(args: CheckArgs) -> Result<i32, DialogueError> {
    let paths = collect_script_paths(&args.scripts_dir, args.primary.as_deref())?;
    let mut session = create_session_from_files(&paths)?;

    let mut findings = Vec::new();
    if let Err(error) = session.resolve_root() {
        findings.push(format!(
            "root \"{}\" does not resolve: {}",
            session.graph().root_node_id(),
            error
        ));
    }

    let ids = session.graph().record_ids();
    for id in &ids {
        session.resolve_node(id)?;
    }
    for id in &ids {
        let Some(record) = session.graph().record(id) else {
            continue;
        };
        for choice in &record.choices {
            let target = &choice.target_node_id;
            if !target.is_empty() && session.graph().cached_id(target).is_none() {
                findings.push(format!(
                    "node \"{}\" choice \"{}\" targets undefined node \"{}\"",
                    id, choice.text, target
                ));
            }
        }
    }

    println!(
        "checked {} node(s) across {} file(s)",
        ids.len(),
        session.graph().file_names().len()
    );
    if findings.is_empty() {
        println!("all choice targets resolve");
        return Ok(0);
    }
    for finding in &findings {
        println!("{}", finding);
    }
    Ok(1)
}
