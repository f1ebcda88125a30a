use std::io;

use dlg_core::DialogueError;

pub(crate) fn map_io(error: io::Error) -> DialogueError {
    DialogueError::new("CLI_IO", error.to_string())
}
