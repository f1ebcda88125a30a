use serde::{Deserialize, Serialize};

/// Closed item categorization. Type tokens in scripts are matched
/// case-sensitively; anything unrecognized is `Misc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    QuestItem,
    Consumable,
    Misc,
}

impl ItemKind {
    pub fn parse(token: &str) -> Self {
        match token {
            "WEAPON" => Self::Weapon,
            "ARMOR" => Self::Armor,
            "POTION" => Self::Potion,
            "QUEST_ITEM" => Self::QuestItem,
            "CONSUMABLE" => Self::Consumable,
            _ => Self::Misc,
        }
    }
}

/// The `name:type:bonus` payload of an `item:` action field, parsed at
/// execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    pub kind: ItemKind,
    pub bonus: i32,
}

impl ItemSpec {
    /// Segments are colon-delimited and trimmed. Missing segments keep their
    /// defaults; a non-numeric bonus reads as 0.
    pub fn parse(spec: &str) -> Self {
        let mut name = "Unknown".to_string();
        let mut kind = ItemKind::Misc;
        let mut bonus = 0;

        for (index, part) in spec.split(':').enumerate() {
            let part = part.trim();
            match index {
                0 if !part.is_empty() => name = part.to_string(),
                1 => kind = ItemKind::parse(part),
                2 => bonus = part.parse().unwrap_or(0),
                _ => {}
            }
        }

        Self { name, kind, bonus }
    }
}
