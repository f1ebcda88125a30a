use std::fs;
use std::path::Path;

use dlg_core::DialogueError;
use serde::{Deserialize, Serialize};

use crate::{Inventory, Player, PlayerStats};

pub const SAVE_SCHEMA: &str = "save.v1";
pub const MAX_SAVE_SLOTS: usize = 3;

/// The flat persisted record: player stats plus the node the dialogue was
/// on. Equipment bonuses are already folded into the stats they modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGame {
    pub schema: String,
    pub name: String,
    pub level: i32,
    pub experience: i32,
    pub max_health: i32,
    pub current_health: i32,
    pub max_mana: i32,
    pub current_mana: i32,
    pub strength: i32,
    pub defense: i32,
    pub intelligence: i32,
    pub agility: i32,
    pub gold: i32,
    pub current_node_id: String,
}

/// Summary of one save slot for menu listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlotInfo {
    pub filename: String,
    pub player_name: String,
    pub level: i32,
    pub exists: bool,
}

impl SaveGame {
    pub fn from_player(player: &Player, current_node_id: impl Into<String>) -> Self {
        let stats = player.stats();
        Self {
            schema: SAVE_SCHEMA.to_string(),
            name: stats.name().to_string(),
            level: stats.level(),
            experience: stats.experience(),
            max_health: stats.max_health(),
            current_health: stats.current_health(),
            max_mana: stats.max_mana(),
            current_mana: stats.current_mana(),
            strength: stats.strength(),
            defense: stats.defense(),
            intelligence: stats.intelligence(),
            agility: stats.agility(),
            gold: stats.gold(),
            current_node_id: current_node_id.into(),
        }
    }

    pub fn into_player(self) -> (Player, String) {
        let stats = PlayerStats {
            name: self.name,
            level: self.level,
            experience: self.experience,
            max_health: self.max_health,
            current_health: self.current_health,
            max_mana: self.max_mana,
            current_mana: self.current_mana,
            strength: self.strength,
            defense: self.defense,
            intelligence: self.intelligence,
            agility: self.agility,
            gold: self.gold,
        };
        (
            Player::from_parts(stats, Inventory::new()),
            self.current_node_id,
        )
    }
}

pub fn save_game(
    player: &Player,
    current_node_id: &str,
    path: impl AsRef<Path>,
) -> Result<(), DialogueError> {
    let path = path.as_ref();
    let record = SaveGame::from_player(player, current_node_id);
    let body = serde_json::to_string_pretty(&record).map_err(|error| {
        DialogueError::new(
            "SAVE_SERIALIZE",
            format!("Failed to serialize save record: {}", error),
        )
    })?;
    fs::write(path, body).map_err(|error| {
        DialogueError::new(
            "SAVE_WRITE",
            format!("Failed to write \"{}\": {}", path.display(), error),
        )
    })
}

pub fn load_game(path: impl AsRef<Path>) -> Result<(Player, String), DialogueError> {
    let path = path.as_ref();
    let body = fs::read_to_string(path).map_err(|error| {
        DialogueError::new(
            "SAVE_READ",
            format!("Failed to read \"{}\": {}", path.display(), error),
        )
    })?;
    let record: SaveGame = serde_json::from_str(&body).map_err(|error| {
        DialogueError::new(
            "SAVE_INVALID",
            format!("Save record in \"{}\" is invalid: {}", path.display(), error),
        )
    })?;
    if record.schema != SAVE_SCHEMA {
        return Err(DialogueError::new(
            "SAVE_INVALID",
            format!(
                "Save record in \"{}\" has schema \"{}\", expected \"{}\".",
                path.display(),
                record.schema,
                SAVE_SCHEMA
            ),
        ));
    }
    Ok(record.into_player())
}

pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

/// Slots are numbered 1 through `MAX_SAVE_SLOTS`.
pub fn slot_filename(slot: usize) -> String {
    format!("save_slot_{}.json", slot)
}

pub fn save_to_slot(
    player: &Player,
    current_node_id: &str,
    slot: usize,
) -> Result<(), DialogueError> {
    check_slot(slot)?;
    save_game(player, current_node_id, slot_filename(slot))
}

pub fn load_from_slot(slot: usize) -> Result<(Player, String), DialogueError> {
    check_slot(slot)?;
    load_game(slot_filename(slot))
}

pub fn slot_info(slot: usize) -> SaveSlotInfo {
    let filename = slot_filename(slot);
    match load_game(&filename) {
        Ok((player, _)) => SaveSlotInfo {
            filename,
            player_name: player.stats().name().to_string(),
            level: player.stats().level(),
            exists: true,
        },
        Err(_) => SaveSlotInfo {
            filename,
            player_name: String::new(),
            level: 0,
            exists: false,
        },
    }
}

fn check_slot(slot: usize) -> Result<(), DialogueError> {
    if slot == 0 || slot > MAX_SAVE_SLOTS {
        return Err(DialogueError::new(
            "SAVE_SLOT_RANGE",
            format!("Save slot {} is out of range 1..={}.", slot, MAX_SAVE_SLOTS),
        ));
    }
    Ok(())
}
