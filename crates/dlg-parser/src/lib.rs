mod script;

pub use script::{parse_choice_line, parse_script, ParsedScript};
