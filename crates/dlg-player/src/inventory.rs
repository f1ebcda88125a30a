use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::item::Item;

pub const DEFAULT_MAX_WEIGHT: i32 = 100;

/// Weight-bounded item storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub(crate) items: Vec<Item>,
    pub(crate) max_weight: i32,
    pub(crate) current_weight: i32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_WEIGHT)
    }

    pub fn with_capacity(max_weight: i32) -> Self {
        Self {
            items: Vec::new(),
            max_weight,
            current_weight: 0,
        }
    }

    /// Adds `item`, or fails when it would push the carried weight over
    /// capacity.
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.current_weight + item.weight > self.max_weight {
            warn!("inventory full, cannot carry \"{}\"", item.name);
            return false;
        }
        self.current_weight += item.weight;
        info!("added \"{}\" to inventory", item.name);
        self.items.push(item);
        true
    }

    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.name == name) else {
            warn!("\"{}\" not found in inventory", name);
            return false;
        };
        let removed = self.items.remove(index);
        self.current_weight -= removed.weight;
        info!("removed \"{}\" from inventory", removed.name);
        true
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.find_item(name).is_some()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn current_weight(&self) -> i32 {
        self.current_weight
    }

    pub fn max_weight(&self) -> i32 {
        self.max_weight
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
