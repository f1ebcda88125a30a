use crate::item::ItemSpec;

/// The player-state service the action runtime mutates and queries. The
/// dialogue crates never own player data; a concrete implementation is
/// supplied by the embedding game.
pub trait PlayerState {
    fn add_gold(&mut self, amount: i32);
    /// Attempts to spend `amount` gold. Returns false, deducting nothing,
    /// when funds are insufficient.
    fn spend_gold(&mut self, amount: i32) -> bool;
    fn gold(&self) -> i32;

    fn heal(&mut self, amount: i32);
    fn take_damage(&mut self, amount: i32);
    fn restore_mana(&mut self, amount: i32);
    fn gain_experience(&mut self, amount: i32);
    fn level(&self) -> i32;
    fn current_mana(&self) -> i32;

    /// Adds the item described by `spec` to the inventory. Returns false when
    /// the inventory rejects it.
    fn pickup_item(&mut self, spec: &ItemSpec) -> bool;
    fn has_item(&self, name: &str) -> bool;
}
