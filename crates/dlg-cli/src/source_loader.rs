use std::path::PathBuf;

use dlg_core::DialogueError;
use walkdir::WalkDir;

const SCRIPT_EXTENSION: &str = "dlg";
const DEFAULT_PRIMARY: &str = "main.dlg";

/// Collects every script file under `scripts_dir` in stable path order and
/// moves the primary file to the front. The primary is `primary` when given,
/// else `main.dlg` when present, else the first file in path order.
pub(crate) fn collect_script_paths(
    scripts_dir: &str,
    primary: Option<&str>,
) -> Result<Vec<PathBuf>, DialogueError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(scripts_dir).sort_by_file_name() {
        let entry = entry.map_err(|error| {
            DialogueError::new(
                "CLI_SCRIPTS_DIR",
                format!("Failed to scan \"{}\": {}", scripts_dir, error),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(SCRIPT_EXTENSION) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(DialogueError::new(
            "CLI_NO_SCRIPTS",
            format!("No .{} scripts found under \"{}\".", SCRIPT_EXTENSION, scripts_dir),
        ));
    }

    let primary_index = match primary {
        Some(name) => Some(find_by_file_name(&paths, name).ok_or_else(|| {
            DialogueError::new(
                "CLI_PRIMARY_NOT_FOUND",
                format!("Primary script \"{}\" is not under \"{}\".", name, scripts_dir),
            )
        })?),
        None => find_by_file_name(&paths, DEFAULT_PRIMARY),
    };
    if let Some(index) = primary_index {
        let primary_path = paths.remove(index);
        paths.insert(0, primary_path);
    }

    Ok(paths)
}

fn find_by_file_name(paths: &[PathBuf], name: &str) -> Option<usize> {
    paths
        .iter()
        .position(|path| path.file_name().and_then(|f| f.to_str()) == Some(name))
}
