use serde::{Deserialize, Serialize};

use crate::condition::ConditionRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Gold,
    Item,
    Xp,
    Health,
    Mana,
    EndDialogue,
}

/// One effect attached to a choice. The sign of `int_param` carries the
/// semantics: positive is a gain, non-positive is a cost or damage of that
/// magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub int_param: i32,
    pub string_param: String,
}

impl ActionRecord {
    pub fn numeric(kind: ActionKind, amount: i32) -> Self {
        Self {
            kind,
            int_param: amount,
            string_param: String::new(),
        }
    }

    pub fn item(spec: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Item,
            int_param: 0,
            string_param: spec.into(),
        }
    }

    pub fn end_dialogue() -> Self {
        Self {
            kind: ActionKind::EndDialogue,
            int_param: 0,
            string_param: String::new(),
        }
    }
}

/// One selectable option as parsed from a `CHOICE:` line. An empty
/// `target_node_id` marks a terminal choice. Conditions are raw expression
/// strings; all of them must hold for the actions to execute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub text: String,
    pub target_node_id: String,
    pub actions: Vec<ActionRecord>,
    pub conditions: Vec<String>,
}

/// Parsed, pre-graph representation of one script node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub speaker: String,
    pub message: String,
    pub choices: Vec<ChoiceRecord>,
}

/// Arena index of a built node. Two equal ids always resolve to the same
/// `NodeId` within one loaded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// A choice compiled at graph-build time: parsed conditions, the action list,
/// and the resolved target. Kept as plain data so the runtime can dispatch on
/// it and tools can inspect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledChoice {
    pub text: String,
    pub conditions: Vec<ConditionRecord>,
    pub actions: Vec<ActionRecord>,
    pub target: Option<NodeId>,
}

/// The graph-resident node handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueNode {
    pub id: String,
    pub speaker: String,
    pub message: String,
    pub choices: Vec<CompiledChoice>,
}
