use dlg_core::{ItemKind, ItemSpec};
use serde::{Deserialize, Serialize};

/// An inventory item. Restore and bonus fields are zero unless set by the
/// type-directed construction in `from_spec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    pub value: i32,
    pub weight: i32,
    pub health_restore: i32,
    pub mana_restore: i32,
    pub attack_bonus: i32,
    pub defense_bonus: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, value: i32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            value,
            weight: 1,
            health_restore: 0,
            mana_restore: 0,
            attack_bonus: 0,
            defense_bonus: 0,
        }
    }

    /// Builds the item a `name:type:bonus` spec describes, routing the bonus
    /// by type: weapons to attack, armor to defense, potions and consumables
    /// to health restore. Other types carry no bonus.
    pub fn from_spec(spec: &ItemSpec) -> Self {
        let mut item = Item::new(spec.name.clone(), spec.kind, spec.bonus);
        match spec.kind {
            ItemKind::Weapon => item.attack_bonus = spec.bonus,
            ItemKind::Armor => item.defense_bonus = spec.bonus,
            ItemKind::Potion | ItemKind::Consumable => item.health_restore = spec.bonus,
            ItemKind::QuestItem | ItemKind::Misc => {}
        }
        item
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Potion | ItemKind::Consumable)
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon | ItemKind::Armor)
    }
}
