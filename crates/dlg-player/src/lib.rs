mod inventory;
mod item;
pub mod save;
mod stats;

use dlg_core::{ItemKind, ItemSpec, PlayerState};
use log::warn;

pub use inventory::{Inventory, DEFAULT_MAX_WEIGHT};
pub use item::Item;
pub use save::{
    load_from_slot, load_game, save_exists, save_game, save_to_slot, slot_filename, slot_info,
    SaveGame, SaveSlotInfo, MAX_SAVE_SLOTS, SAVE_SCHEMA,
};
pub use stats::PlayerStats;

/// An equipped weapon or armor piece: the item's name and the stat bonus it
/// currently contributes, so unequipping can revert it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquippedItem {
    pub name: String,
    pub bonus: i32,
}

/// The concrete player-state service: stats, inventory, and equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    stats: PlayerStats,
    inventory: Inventory,
    equipped_weapon: Option<EquippedItem>,
    equipped_armor: Option<EquippedItem>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_MAX_WEIGHT)
    }

    pub fn with_capacity(name: impl Into<String>, max_weight: i32) -> Self {
        Self {
            stats: PlayerStats::new(name),
            inventory: Inventory::with_capacity(max_weight),
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    pub(crate) fn from_parts(stats: PlayerStats, inventory: Inventory) -> Self {
        Self {
            stats,
            inventory,
            equipped_weapon: None,
            equipped_armor: None,
        }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn equipped_weapon(&self) -> Option<&EquippedItem> {
        self.equipped_weapon.as_ref()
    }

    pub fn equipped_armor(&self) -> Option<&EquippedItem> {
        self.equipped_armor.as_ref()
    }

    /// Consumes or equips the named inventory item. Consumables apply their
    /// restores and are removed; weapons and armor are equipped.
    pub fn use_item(&mut self, name: &str) -> bool {
        let Some(item) = self.inventory.find_item(name).cloned() else {
            warn!("\"{}\" not found in inventory", name);
            return false;
        };

        if item.is_consumable() {
            if item.health_restore > 0 {
                self.stats.heal(item.health_restore);
            }
            if item.mana_restore > 0 {
                self.stats.restore_mana(item.mana_restore);
            }
            self.inventory.remove_item(name);
            return true;
        }
        if item.is_equippable() {
            self.equip_item(name);
            return true;
        }

        warn!("\"{}\" cannot be used", name);
        false
    }

    /// Equips the named weapon or armor, reverting the bonus of whatever was
    /// in that slot before.
    pub fn equip_item(&mut self, name: &str) {
        let Some(item) = self.inventory.find_item(name).cloned() else {
            warn!("\"{}\" not found in inventory", name);
            return;
        };

        match item.kind {
            ItemKind::Weapon => {
                if let Some(previous) = self.equipped_weapon.take() {
                    self.stats.modify_strength(-previous.bonus);
                }
                self.stats.modify_strength(item.attack_bonus);
                self.equipped_weapon = Some(EquippedItem {
                    name: item.name,
                    bonus: item.attack_bonus,
                });
            }
            ItemKind::Armor => {
                if let Some(previous) = self.equipped_armor.take() {
                    self.stats.modify_defense(-previous.bonus);
                }
                self.stats.modify_defense(item.defense_bonus);
                self.equipped_armor = Some(EquippedItem {
                    name: item.name,
                    bonus: item.defense_bonus,
                });
            }
            _ => warn!("\"{}\" is not equippable", name),
        }
    }

    pub fn unequip_weapon(&mut self) {
        if let Some(previous) = self.equipped_weapon.take() {
            self.stats.modify_strength(-previous.bonus);
        }
    }

    pub fn unequip_armor(&mut self) {
        if let Some(previous) = self.equipped_armor.take() {
            self.stats.modify_defense(-previous.bonus);
        }
    }

    /// Spends `price` gold and adds `item`. A failed spend adds nothing.
    pub fn buy_item(&mut self, item: Item, price: i32) -> bool {
        if !self.stats.spend_gold(price) {
            return false;
        }
        self.inventory.add_item(item)
    }

    /// Removes the named item and credits `price` gold. A missing item sells
    /// nothing.
    pub fn sell_item(&mut self, name: &str, price: i32) -> bool {
        if !self.inventory.remove_item(name) {
            return false;
        }
        self.stats.add_gold(price);
        true
    }
}

impl PlayerState for Player {
    fn add_gold(&mut self, amount: i32) {
        self.stats.add_gold(amount);
    }

    fn spend_gold(&mut self, amount: i32) -> bool {
        self.stats.spend_gold(amount)
    }

    fn gold(&self) -> i32 {
        self.stats.gold()
    }

    fn heal(&mut self, amount: i32) {
        self.stats.heal(amount);
    }

    fn take_damage(&mut self, amount: i32) {
        self.stats.take_damage(amount);
    }

    fn restore_mana(&mut self, amount: i32) {
        self.stats.restore_mana(amount);
    }

    fn gain_experience(&mut self, amount: i32) {
        self.stats.gain_experience(amount);
    }

    fn level(&self) -> i32 {
        self.stats.level()
    }

    fn current_mana(&self) -> i32 {
        self.stats.current_mana()
    }

    fn pickup_item(&mut self, spec: &ItemSpec) -> bool {
        self.inventory.add_item(Item::from_spec(spec))
    }

    fn has_item(&self, name: &str) -> bool {
        self.inventory.has_item(name)
    }
}
