use dlg_core::{ActionKind, ActionRecord, ChoiceRecord, DialogueError, NodeRecord};

/// Output of parsing one script source: the node records in declaration
/// order, plus the root id if the source carried a `ROOT:` line. Whether that
/// root is honored is decided by the loader (primary file only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedScript {
    pub root_id: Option<String>,
    pub nodes: Vec<NodeRecord>,
}

/// Parses the line-oriented dialogue format. Lines are trimmed; blank lines,
/// `#` comments, and unrecognized line shapes are skipped. A malformed
/// numeric field fails the whole parse.
pub fn parse_script(source: &str) -> Result<ParsedScript, DialogueError> {
    let mut parsed = ParsedScript::default();
    let mut current: Option<NodeRecord> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(id) = line.strip_prefix("NODE:") {
            if let Some(node) = current.take() {
                parsed.nodes.push(node);
            }
            current = Some(NodeRecord {
                id: id.trim().to_string(),
                ..NodeRecord::default()
            });
        } else if let Some(speaker) = line.strip_prefix("SPEAKER:") {
            if let Some(node) = current.as_mut() {
                node.speaker = speaker.trim().to_string();
            }
        } else if let Some(message) = line.strip_prefix("MSG:") {
            if let Some(node) = current.as_mut() {
                node.message = message.trim().to_string();
            }
        } else if let Some(choice) = line.strip_prefix("CHOICE:") {
            if let Some(node) = current.as_mut() {
                node.choices.push(parse_choice_line(choice, line_number)?);
            }
        } else if let Some(root) = line.strip_prefix("ROOT:") {
            parsed.root_id = Some(root.trim().to_string());
        }
    }

    if let Some(node) = current.take() {
        parsed.nodes.push(node);
    }

    Ok(parsed)
}

/// Parses the `|`-separated payload of a `CHOICE:` line. The first field is
/// the display text; the rest are `key:value` pairs. Unknown keys are
/// skipped.
pub fn parse_choice_line(
    line: &str,
    line_number: usize,
) -> Result<ChoiceRecord, DialogueError> {
    let mut record = ChoiceRecord::default();

    for (index, part) in line.split('|').enumerate() {
        let part = part.trim();
        if index == 0 {
            record.text = part.to_string();
            continue;
        }

        if let Some(target) = part.strip_prefix("target:") {
            record.target_node_id = target.trim().to_string();
        } else if let Some(payload) = part.strip_prefix("gold:") {
            let amount = parse_amount("gold", payload, line_number)?;
            record
                .actions
                .push(ActionRecord::numeric(ActionKind::Gold, amount));
        } else if let Some(payload) = part.strip_prefix("xp:") {
            let amount = parse_amount("xp", payload, line_number)?;
            record
                .actions
                .push(ActionRecord::numeric(ActionKind::Xp, amount));
        } else if let Some(payload) = part.strip_prefix("health:") {
            let amount = parse_amount("health", payload, line_number)?;
            record
                .actions
                .push(ActionRecord::numeric(ActionKind::Health, amount));
        } else if let Some(payload) = part.strip_prefix("mana:") {
            let amount = parse_amount("mana", payload, line_number)?;
            record
                .actions
                .push(ActionRecord::numeric(ActionKind::Mana, amount));
        } else if let Some(spec) = part.strip_prefix("item:") {
            record.actions.push(ActionRecord::item(spec.trim()));
        } else if let Some(expr) = part.strip_prefix("condition:") {
            record.conditions.push(expr.trim().to_string());
        }
    }

    Ok(record)
}

fn parse_amount(field: &str, payload: &str, line_number: usize) -> Result<i32, DialogueError> {
    let payload = payload.trim();
    payload.parse::<i32>().map_err(|_| {
        DialogueError::with_line(
            "PARSE_NUMERIC_FIELD",
            format!(
                "Field \"{}\" expects an integer, got \"{}\".",
                field, payload
            ),
            line_number,
        )
    })
}
